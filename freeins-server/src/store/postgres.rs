//! PostgreSQL-backed store delegating to the repositories in `crate::db`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ContentStore, StoreError, StoreResult};
use crate::db::{PageRepo, UserRepo};
use crate::models::{Email, NewPage, NewUser, Page, PageFilter, PagePatch, User};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn find_user_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        Ok(UserRepo::new(&self.pool).find_by_email(email).await?)
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        Ok(UserRepo::new(&self.pool).create(user).await?)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(UserRepo::new(&self.pool).list().await?)
    }

    async fn list_pages(&self, filter: &PageFilter) -> StoreResult<Vec<Page>> {
        Ok(PageRepo::new(&self.pool).list(filter).await?)
    }

    async fn get_page(&self, id: Uuid) -> StoreResult<Page> {
        Ok(PageRepo::new(&self.pool).get(id).await?)
    }

    async fn create_page(&self, page: NewPage) -> StoreResult<Page> {
        Ok(PageRepo::new(&self.pool).create(page).await?)
    }

    async fn update_page(&self, id: Uuid, patch: PagePatch) -> StoreResult<Page> {
        Ok(PageRepo::new(&self.pool).update(id, patch).await?)
    }

    async fn delete_page(&self, id: Uuid) -> StoreResult<()> {
        Ok(PageRepo::new(&self.pool).delete(id).await?)
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::Database)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
