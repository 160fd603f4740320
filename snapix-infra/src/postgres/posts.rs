use async_trait::async_trait;
use snapix_domain::error::DomainResult;
use snapix_domain::file::FileId;
use snapix_domain::persist::PostRepository;
use snapix_domain::post::{Post, PostId};
use snapix_domain::user::UserId;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};

pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_row(row: PgRow) -> DomainResult<Post> {
    Ok(Post {
        id: PostId::new(row.try_get("id")?),
        author_id: UserId::new(row.try_get("author_id")?),
        image_id: FileId::new(row.try_get("image_id")?),
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn save(&self, post: Post) -> DomainResult<Post> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, image_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                content = EXCLUDED.content,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(post.id.value())
        .bind(post.author_id.value())
        .bind(post.image_id.value())
        .bind(&post.content)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let row = sqlx::query(
            "SELECT id, author_id, image_id, content, created_at, updated_at FROM posts WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;
        row.map(parse_row).transpose()
    }

    async fn delete_one(&self, id: PostId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
