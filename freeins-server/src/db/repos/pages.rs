//! Page repository
//!
//! - list: optional locale/slug filters in one query
//! - update: COALESCE so absent fields keep their value
//! - update/delete report a missing id as `NotFound`

use sqlx::PgPool;
use uuid::Uuid;

use super::DbError;
use crate::models::{NewPage, Page, PageFilter, PagePatch};

const PAGE_COLUMNS: &str = "id, title, content, slug, locale, created_at";

/// Page repository
pub struct PageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List pages matching the filter, oldest first.
    pub async fn list(&self, filter: &PageFilter) -> Result<Vec<Page>, DbError> {
        let sql = format!(
            r#"
            SELECT {PAGE_COLUMNS}
            FROM pages
            WHERE ($1::text IS NULL OR locale = $1)
              AND ($2::text IS NULL OR slug = $2)
            ORDER BY created_at ASC, id ASC
            "#
        );

        let pages = sqlx::query_as::<_, Page>(&sql)
            .bind(filter.locale.as_deref())
            .bind(filter.slug.as_deref())
            .fetch_all(self.pool)
            .await?;

        Ok(pages)
    }

    pub async fn get(&self, id: Uuid) -> Result<Page, DbError> {
        let sql = format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = $1");

        sqlx::query_as::<_, Page>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, page: NewPage) -> Result<Page, DbError> {
        let sql = format!(
            r#"
            INSERT INTO pages (title, content, slug, locale)
            VALUES ($1, $2, $3, $4)
            RETURNING {PAGE_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Page>(&sql)
            .bind(page.title.as_str())
            .bind(page.content.as_str())
            .bind(page.slug.as_str())
            .bind(page.locale.as_str())
            .fetch_one(self.pool)
            .await?;

        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: PagePatch) -> Result<Page, DbError> {
        let sql = format!(
            r#"
            UPDATE pages
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                slug = COALESCE($4, slug),
                locale = COALESCE($5, locale)
            WHERE id = $1
            RETURNING {PAGE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Page>(&sql)
            .bind(id)
            .bind(patch.title.as_ref().map(|t| t.as_str()))
            .bind(patch.content.as_ref().map(|c| c.as_str()))
            .bind(patch.slug.as_ref().map(|s| s.as_str()))
            .bind(patch.locale.as_ref().map(|l| l.as_str()))
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: Uuid) -> DbError {
    DbError::NotFound {
        resource: "page",
        id: id.to_string(),
    }
}
