use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// User record. The argon2 hash is stored but never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

const UNIQUE_VIOLATION: &str = "23505";

/// Insert failures on the email unique index become `DuplicateEmail`;
/// everything else stays a store failure.
fn map_insert_error(e: sqlx::Error) -> ApiError {
    match &e {
        sqlx::Error::Database(d) if d.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            ApiError::DuplicateEmail
        }
        _ => ApiError::Store(e),
    }
}

impl User {
    /// Insert a new user. A duplicate email surfaces as `DuplicateEmail`
    /// via the unique index rather than a racy pre-check.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> ApiResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(map_insert_error)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("ann@x.com"));
    }

    #[derive(Debug)]
    struct PgErrorShim(&'static str);

    impl std::fmt::Display for PgErrorShim {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "database error {}", self.0)
        }
    }

    impl std::error::Error for PgErrorShim {}

    impl sqlx::error::DatabaseError for PgErrorShim {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.0 {
                "23505" => sqlx::error::ErrorKind::UniqueViolation,
                _ => sqlx::error::ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn unique_violation_becomes_duplicate_email() {
        let err = map_insert_error(sqlx::Error::Database(Box::new(PgErrorShim("23505"))));
        assert!(matches!(err, ApiError::DuplicateEmail));
    }

    #[test]
    fn other_database_errors_stay_store_failures() {
        let err = map_insert_error(sqlx::Error::Database(Box::new(PgErrorShim("23503"))));
        assert!(matches!(err, ApiError::Store(_)));

        let err = map_insert_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ApiError::Store(_)));
    }
}
