//! Storage seam for users and pages.
//!
//! Handlers and auth code talk to `dyn ContentStore`. `PgStore` is the
//! durable backend; `MemoryStore` backs development runs without a
//! database and the HTTP tests.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::db::DbError;
use crate::models::{Email, NewPage, NewUser, Page, PageFilter, PagePatch, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
    #[error("conflict: {resource} '{id}' already exists")]
    Conflict { resource: &'static str, id: String },
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { resource, id } => Self::Conflict { resource, id },
            DbError::Sqlx(e) => Self::Database(e),
        }
    }
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn find_user_by_email(&self, email: &Email) -> StoreResult<Option<User>>;
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn list_pages(&self, filter: &PageFilter) -> StoreResult<Vec<Page>>;
    async fn get_page(&self, id: Uuid) -> StoreResult<Page>;
    async fn create_page(&self, page: NewPage) -> StoreResult<Page>;
    async fn update_page(&self, id: Uuid, patch: PagePatch) -> StoreResult<Page>;
    async fn delete_page(&self, id: Uuid) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}

pub(crate) fn page_not_found(id: Uuid) -> StoreError {
    StoreError::NotFound {
        resource: "page",
        id: id.to_string(),
    }
}
