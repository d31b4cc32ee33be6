//! Default admin account created at startup

use std::fmt;

use super::{register_user, AuthError};
use crate::models::{Email, User};
use crate::store::{ContentStore, StoreError};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";
pub const DEFAULT_ADMIN_NAME: &str = "Admin";

/// Credentials for the seeded admin
#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl AdminSeed {
    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_ADMIN_PASSWORD
    }
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            email: DEFAULT_ADMIN_EMAIL.to_owned(),
            password: DEFAULT_ADMIN_PASSWORD.to_owned(),
            name: DEFAULT_ADMIN_NAME.to_owned(),
        }
    }
}

impl fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug)]
pub enum SeedOutcome {
    Created(User),
    AlreadyPresent,
}

/// Create the admin user unless one with the seed email exists.
pub async fn seed_admin(
    store: &dyn ContentStore,
    seed: &AdminSeed,
    bcrypt_cost: u32,
) -> Result<SeedOutcome, AuthError> {
    let email = Email::new(&seed.email)?;
    if store.find_user_by_email(&email).await?.is_some() {
        tracing::debug!(email = %email.as_str(), "admin user already present");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    if seed.uses_default_password() {
        tracing::warn!(
            email = %email.as_str(),
            "seeding admin with the default password; set ADMIN_PASSWORD"
        );
    }

    match register_user(store, &seed.email, &seed.password, &seed.name, bcrypt_cost).await {
        Ok(user) => {
            tracing::info!(email = %user.email, "admin user created");
            Ok(SeedOutcome::Created(user))
        }
        // Another instance seeded it between our lookup and insert
        Err(AuthError::Store(StoreError::Conflict { .. })) => Ok(SeedOutcome::AlreadyPresent),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = MemoryStore::new();
        let seed = AdminSeed::default();

        let first = seed_admin(&store, &seed, 4).await.unwrap();
        assert!(matches!(first, SeedOutcome::Created(ref u) if u.email == DEFAULT_ADMIN_EMAIL));

        let second = seed_admin(&store, &seed, 4).await.unwrap();
        assert!(matches!(second, SeedOutcome::AlreadyPresent));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeded_password_is_hashed() {
        let store = MemoryStore::new();
        let seed = AdminSeed {
            email: "owner@example.com".into(),
            password: "s3cret".into(),
            name: "Owner".into(),
        };
        seed_admin(&store, &seed, 4).await.unwrap();

        let users = store.list_users().await.unwrap();
        assert_ne!(users[0].password_hash, "s3cret");
        assert!(bcrypt::verify("s3cret", &users[0].password_hash).unwrap());
    }

    #[test]
    fn debug_hides_password() {
        assert!(!format!("{:?}", AdminSeed::default()).contains("\"admin\""));
    }
}
