use async_trait::async_trait;
use snapix_domain::error::DomainResult;
use snapix_domain::file::{FileId, FileKind, FileRecord, ImageMime};
use snapix_domain::persist::{FileFilter, FileRepository};
use snapix_domain::post::PostId;
use snapix_domain::user::UserId;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};
use uuid::Uuid;

const COLUMNS: &str = "id, owner_id, kind, key, mime, original_name, size, post_id, created_at";

pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_row(row: PgRow) -> DomainResult<FileRecord> {
    let kind: String = row.try_get("kind")?;
    let mime: String = row.try_get("mime")?;
    let size: i64 = row.try_get("size")?;
    let post_id: Option<Uuid> = row.try_get("post_id")?;

    Ok(FileRecord::builder()
        .id(FileId::new(row.try_get("id")?))
        .owner_id(UserId::new(row.try_get("owner_id")?))
        .kind(kind.parse::<FileKind>()?)
        .key(row.try_get("key")?)
        .mime(ImageMime::from_mime(&mime)?)
        .original_name(row.try_get("original_name")?)
        .size(size.max(0) as u64)
        .maybe_post_id(post_id.map(PostId::new))
        .created_at(row.try_get("created_at")?)
        .build())
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn save(&self, record: FileRecord) -> DomainResult<FileRecord> {
        sqlx::query(
            r#"
            INSERT INTO files (id, owner_id, kind, key, mime, original_name, size, post_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                post_id = EXCLUDED.post_id
            "#,
        )
        .bind(record.id.value())
        .bind(record.owner_id.value())
        .bind(record.kind.as_str())
        .bind(&record.key)
        .bind(record.mime.as_mime())
        .bind(&record.original_name)
        .bind(record.size as i64)
        .bind(record.post_id.map(|p| p.value()))
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn find_one(&self, filter: FileFilter) -> DomainResult<Option<FileRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM files WHERE owner_id = $1 AND kind = $2 \
             ORDER BY created_at LIMIT 1"
        ))
        .bind(filter.owner_id.value())
        .bind(filter.kind.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(parse_row).transpose()
    }

    async fn find_by_id(&self, id: FileId) -> DomainResult<Option<FileRecord>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM files WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;
        row.map(parse_row).transpose()
    }

    async fn delete_one(&self, id: FileId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
