use daybook_core::{Email, User, UserStore, UserStoreError};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, postgres::PgRow};

#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO users (email, hashed_password, image)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.email_str())
        .bind(user.hashed_password().map(|h| h.as_ref().expose_secret().as_str()))
        .bind(user.image());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT email, hashed_password, image
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        parse_row(&row)
    }

    #[tracing::instrument(name = "Upserting federated user in PostgreSQL", skip_all)]
    async fn upsert_federated_user(
        &self,
        email: &Email,
        image: Option<String>,
    ) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                INSERT INTO users (email, image)
                VALUES ($1, $2)
                ON CONFLICT (email)
                DO UPDATE SET image = COALESCE(EXCLUDED.image, users.image)
                RETURNING email, hashed_password, image
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .bind(image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        parse_row(&row)
    }
}

fn parse_row(row: &PgRow) -> Result<User, UserStoreError> {
    let unexpected = |e: sqlx::Error| UserStoreError::UnexpectedError(e.to_string());

    let email: String = row.try_get("email").map_err(unexpected)?;
    let hashed_password: Option<String> = row.try_get("hashed_password").map_err(unexpected)?;
    let image: Option<String> = row.try_get("image").map_err(unexpected)?;

    User::parse(
        Secret::new(email),
        hashed_password.map(Secret::new),
        image,
    )
    .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
}
