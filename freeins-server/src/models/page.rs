//! Page records and the validated fields they are built from
//!
//! A page is a localized piece of site content (title + HTML body)
//! addressed by `slug` within a `locale`. Nothing here enforces
//! uniqueness of (slug, locale); duplicates are allowed.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::FromRow;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for page titles (characters)
const MAX_TITLE_LEN: usize = 256;

/// Maximum length for slugs
const MAX_SLUG_LEN: usize = 128;

/// Maximum size of the HTML body (bytes)
const MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Locales the site ships with.
pub const DEFAULT_LOCALES: &[&str] = &["zh", "en", "es", "vi", "id", "fr", "ms", "ar"];

/// Lowercase alphanumeric segments joined by `-`, `_` or `/`
static SLUG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(?:[-_/][a-z0-9]+)*$").expect("invalid slug regex")
});

/// `en`, `zh-CN`, `fil`, `es-419`
static LOCALE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,3}(?:-[A-Za-z0-9]{2,4})?$").expect("invalid locale regex")
});

/// Stored page
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub locale: String,
    pub created_at: DateTime<Utc>,
}

/// Validated page title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTitle(String);

impl PageTitle {
    /// Create a page title.
    ///
    /// # Rules
    /// - Non-empty after trimming whitespace (stored trimmed)
    /// - Max 256 characters
    ///
    /// # Example
    /// ```
    /// use freeins_server::models::PageTitle;
    ///
    /// assert!(PageTitle::new("About us").is_ok());
    /// assert!(PageTitle::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Page body. HTML is stored as given; an empty body is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent(String);

impl PageContent {
    pub fn new(s: String) -> Result<Self, ValidationError> {
        if s.len() > MAX_CONTENT_BYTES {
            return Err(ValidationError::TooLarge {
                field: "content",
                max_bytes: MAX_CONTENT_BYTES,
            });
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated slug (`about`, `products/insurance`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// # Example
    /// ```
    /// use freeins_server::models::Slug;
    ///
    /// assert!(Slug::new("products/life-insurance").is_ok());
    /// assert!(Slug::new("About").is_err());
    /// assert!(Slug::new("/leading").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "slug" });
        }

        if s.len() > MAX_SLUG_LEN {
            return Err(ValidationError::TooLong {
                field: "slug",
                max: MAX_SLUG_LEN,
            });
        }

        if !SLUG_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "slug",
                reason: "must be lowercase alphanumeric segments separated by '-', '_' or '/'",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Locale code accepted by a [`LocaleSet`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// The locales pages may be written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet(Vec<String>);

impl LocaleSet {
    /// Build a set from configured codes. Blank entries are skipped.
    ///
    /// Every code must be well-formed; the first bad one is reported.
    pub fn new<I, S>(codes: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locales: Vec<String> = Vec::new();
        for code in codes {
            let code = code.as_ref().trim();
            if code.is_empty() {
                continue;
            }
            check_locale_format(code)?;
            if !locales.iter().any(|l| l == code) {
                locales.push(code.to_owned());
            }
        }

        if locales.is_empty() {
            return Err(ValidationError::Empty {
                field: "supported locales",
            });
        }

        Ok(Self(locales))
    }

    /// Validate a page locale against this set.
    pub fn parse(&self, s: &str) -> Result<Locale, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "locale" });
        }
        check_locale_format(s)?;

        if !self.contains(s) {
            return Err(ValidationError::Unsupported {
                field: "locale",
                value: s.to_owned(),
            });
        }

        Ok(Locale(s.to_owned()))
    }

    pub fn contains(&self, s: &str) -> bool {
        self.0.iter().any(|l| l == s)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for LocaleSet {
    fn default() -> Self {
        Self(DEFAULT_LOCALES.iter().map(|s| (*s).to_owned()).collect())
    }
}

fn check_locale_format(s: &str) -> Result<(), ValidationError> {
    if LOCALE_RE.is_match(s) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: "locale",
            reason: "must be a language code like 'en' or 'zh-CN'",
        })
    }
}

/// Fields for a new page
#[derive(Debug, Clone)]
pub struct NewPage {
    pub title: PageTitle,
    pub content: PageContent,
    pub slug: Slug,
    pub locale: Locale,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct PagePatch {
    pub title: Option<PageTitle>,
    pub content: Option<PageContent>,
    pub slug: Option<Slug>,
    pub locale: Option<Locale>,
}

impl PagePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.slug.is_none() && self.locale.is_none()
    }

    /// Apply the patch to an in-memory record.
    pub fn apply(self, page: &mut Page) {
        if let Some(title) = self.title {
            page.title = title.into_string();
        }
        if let Some(content) = self.content {
            page.content = content.into_string();
        }
        if let Some(slug) = self.slug {
            page.slug = slug.into_string();
        }
        if let Some(locale) = self.locale {
            page.locale = locale.into_string();
        }
    }
}

/// Read filter for page listings.
///
/// Values are matched exactly. Filters are not validated: an unknown
/// locale simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFilter {
    pub locale: Option<String>,
    pub slug: Option<String>,
}

impl PageFilter {
    /// Empty strings (`?locale=`) count as no filter.
    pub fn new(locale: Option<String>, slug: Option<String>) -> Self {
        Self {
            locale: locale.filter(|s| !s.is_empty()),
            slug: slug.filter(|s| !s.is_empty()),
        }
    }

    pub fn matches(&self, page: &Page) -> bool {
        self.locale.as_deref().map_or(true, |l| page.locale == l)
            && self.slug.as_deref().map_or(true, |s| page.slug == s)
    }
}
