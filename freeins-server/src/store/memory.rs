//! In-memory store.
//!
//! Users and pages live in `Vec`s behind `tokio::sync::RwLock`. Nothing is
//! durable; every restart begins empty. Pages keep insertion order, which
//! is also `created_at` order.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{page_not_found, ContentStore, StoreError, StoreResult};
use crate::models::{Email, NewPage, NewUser, Page, PageFilter, PagePatch, User};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    pages: RwLock<Vec<Page>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find_user_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email.as_str()).cloned())
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email.as_str()) {
            return Err(StoreError::Conflict {
                resource: "user",
                id: user.email.as_str().to_owned(),
            });
        }

        let created = User {
            id: Uuid::new_v4(),
            email: user.email.as_str().to_owned(),
            password_hash: user.password_hash,
            name: user.name,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn list_pages(&self, filter: &PageFilter) -> StoreResult<Vec<Page>> {
        let pages = self.pages.read().await;
        Ok(pages.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn get_page(&self, id: Uuid) -> StoreResult<Page> {
        let pages = self.pages.read().await;
        pages
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| page_not_found(id))
    }

    async fn create_page(&self, page: NewPage) -> StoreResult<Page> {
        let created = Page {
            id: Uuid::new_v4(),
            title: page.title.into_string(),
            content: page.content.into_string(),
            slug: page.slug.into_string(),
            locale: page.locale.into_string(),
            created_at: Utc::now(),
        };
        self.pages.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_page(&self, id: Uuid, patch: PagePatch) -> StoreResult<Page> {
        let mut pages = self.pages.write().await;
        let page = pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| page_not_found(id))?;
        patch.apply(page);
        Ok(page.clone())
    }

    async fn delete_page(&self, id: Uuid) -> StoreResult<()> {
        let mut pages = self.pages.write().await;
        let idx = pages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| page_not_found(id))?;
        pages.remove(idx);
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocaleSet, PageContent, PageTitle, Slug};

    fn new_page(locale: &str, slug: &str) -> NewPage {
        NewPage {
            title: PageTitle::new("Title").unwrap(),
            content: PageContent::new("<p>body</p>".into()).unwrap(),
            slug: Slug::new(slug).unwrap(),
            locale: LocaleSet::default().parse(locale).unwrap(),
        }
    }

    #[tokio::test]
    async fn duplicate_slug_locale_pairs_are_allowed() {
        let store = MemoryStore::new();
        let a = store.create_page(new_page("en", "about")).await.unwrap();
        let b = store.create_page(new_page("en", "about")).await.unwrap();
        assert_ne!(a.id, b.id);

        let filter = PageFilter::new(Some("en".into()), Some("about".into()));
        assert_eq!(store.list_pages(&filter).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn list_keeps_creation_order() {
        let store = MemoryStore::new();
        let first = store.create_page(new_page("en", "company")).await.unwrap();
        let second = store.create_page(new_page("zh", "company")).await.unwrap();

        let all = store.list_pages(&PageFilter::default()).await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let store = MemoryStore::new();
        let page = store.create_page(new_page("en", "contact")).await.unwrap();
        store.delete_page(page.id).await.unwrap();

        let err = store.delete_page(page.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { resource: "page", .. }));
        assert!(matches!(
            store.get_page(page.id).await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn duplicate_user_email_conflicts() {
        let store = MemoryStore::new();
        let user = NewUser {
            email: Email::new("admin@example.com").unwrap(),
            password_hash: "hash".into(),
            name: "Admin".into(),
        };
        store.create_user(user.clone()).await.unwrap();

        let err = store.create_user(user).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { resource: "user", .. }));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }
}
