//! freeins-server: content API for the freeins marketing site
//!
//! Admins log in with email/password and receive a bearer token; the
//! public site reads localized pages, the admin dashboard writes them.
//!
//! ```ignore
//! let store: Arc<dyn ContentStore> = Arc::new(MemoryStore::new());
//! auth::seed_admin(store.as_ref(), &AdminSeed::default(), DEFAULT_BCRYPT_COST).await?;
//! let state = Arc::new(AppState {
//!     store,
//!     tokens: TokenIssuer::new(secret.as_bytes(), DEFAULT_TOKEN_TTL),
//!     locales: LocaleSet::default(),
//! });
//! run_server(state, ServerConfig::default()).await?;
//! ```

pub mod auth;
pub mod db;
pub mod http;
pub mod models;
pub mod store;

pub use auth::{AdminSeed, AuthConfig, AuthError, TokenIssuer};
pub use http::{router, run_server, AppState, CorsPolicy, ServerConfig, ServerError};
pub use store::{ContentStore, MemoryStore, PgStore, StoreError};
