//! User repository

use sqlx::PgPool;

use super::DbError;
use crate::models::{Email, NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, name FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user. The unique index on email reports duplicates as `Conflict`.
    pub async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, name
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.name)
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(DbError::Conflict {
                resource: "user",
                id: user.email.as_str().to_owned(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, password, name FROM users ORDER BY created_at ASC, email ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_is_conflict() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let email = Email::new(&format!("dup-{}@example.com", uuid::Uuid::new_v4())).unwrap();
        let new_user = NewUser {
            email: email.clone(),
            password_hash: "hash".into(),
            name: "Dup".into(),
        };
        let repo = UserRepo::new(&pool);
        repo.create(new_user.clone()).await.expect("first insert");

        let err = repo.create(new_user).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));
        assert!(repo.find_by_email(&email).await.unwrap().is_some());
    }
}
