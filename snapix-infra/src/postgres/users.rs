use async_trait::async_trait;
use snapix_domain::error::DomainResult;
use snapix_domain::persist::UserRepository;
use snapix_domain::user::{Email, UserId, UserProfile};
use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};

const COLUMNS: &str = "id, username, email, email_confirmed, first_name, last_name, \
    date_of_birth, city, about_me, confirmation_code, recovery_code, \
    recovery_code_expires_at, created_at, updated_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_row(row: PgRow) -> DomainResult<UserProfile> {
    Ok(UserProfile::builder()
        .id(UserId::new(row.try_get("id")?))
        .username(row.try_get("username")?)
        .email(row.try_get("email")?)
        .email_confirmed(row.try_get("email_confirmed")?)
        .maybe_first_name(row.try_get("first_name")?)
        .maybe_last_name(row.try_get("last_name")?)
        .maybe_date_of_birth(row.try_get("date_of_birth")?)
        .maybe_city(row.try_get("city")?)
        .maybe_about_me(row.try_get("about_me")?)
        .maybe_confirmation_code(row.try_get("confirmation_code")?)
        .maybe_recovery_code(row.try_get("recovery_code")?)
        .maybe_recovery_code_expires_at(row.try_get("recovery_code_expires_at")?)
        .created_at(row.try_get("created_at")?)
        .updated_at(row.try_get("updated_at")?)
        .build())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn count(&self) -> DomainResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<UserProfile>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;
        row.map(parse_row).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<UserProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM users WHERE lower(email) = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(parse_row).transpose()
    }

    async fn save(&self, user: UserProfile) -> DomainResult<UserProfile> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, email, email_confirmed, first_name, last_name,
                date_of_birth, city, about_me, confirmation_code, recovery_code,
                recovery_code_expires_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                email = EXCLUDED.email,
                email_confirmed = EXCLUDED.email_confirmed,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                date_of_birth = EXCLUDED.date_of_birth,
                city = EXCLUDED.city,
                about_me = EXCLUDED.about_me,
                confirmation_code = EXCLUDED.confirmation_code,
                recovery_code = EXCLUDED.recovery_code,
                recovery_code_expires_at = EXCLUDED.recovery_code_expires_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user.id.value())
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.email_confirmed)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.date_of_birth)
        .bind(&user.city)
        .bind(&user.about_me)
        .bind(&user.confirmation_code)
        .bind(&user.recovery_code)
        .bind(user.recovery_code_expires_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(user)
    }
}
