//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod page;
pub mod user;

pub use validation::ValidationError;
pub use page::{
    Locale, LocaleSet, NewPage, Page, PageContent, PageFilter, PagePatch, PageTitle, Slug,
};
pub use user::{Email, NewUser, User, UserSummary};
