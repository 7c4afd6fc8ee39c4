//! The browser-control capability the extractors are written against.
//!
//! Everything the scraper needs from a live rendered page is expressed through
//! [`PageAccessor`]: navigation, element lookup, text reads, clicks and scrolling.
//! [`crate::WebDriverPage`] is the production implementation; tests use an
//! in-memory snapshot.

use crate::page::error::PageError;
use async_trait::async_trait;
use std::fmt;

/// A structural address (XPath expression) used to find one element among many.
///
/// # Examples
///
/// ```
/// use eltiempo::Locator;
///
/// let locator = Locator::xpath("thead/tr/th[{col}]").fill("col", 2);
/// assert_eq!(locator.as_str(), "thead/tr/th[2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    /// Replaces every `{key}` placeholder with `value`.
    pub fn fill(self, key: &str, value: impl fmt::Display) -> Self {
        Self(self.0.replace(&format!("{{{key}}}"), &value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to an element of the current page, as returned by [`PageAccessor::find`].
///
/// Handles are only valid for the page they were found on; navigating away
/// invalidates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Navigation, lookup and interaction primitives over one live page session.
///
/// Lookups take an optional `scope`: `None` searches from the document root,
/// `Some(element)` evaluates the locator relative to that element. A missing
/// element is reported as `Ok(None)` (or an empty vector), never as an error;
/// errors are reserved for session and transport failures.
#[async_trait]
pub trait PageAccessor: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), PageError>;

    async fn find(
        &self,
        scope: Option<&ElementRef>,
        locator: &Locator,
    ) -> Result<Option<ElementRef>, PageError>;

    async fn find_all(
        &self,
        scope: Option<&ElementRef>,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, PageError>;

    async fn text(&self, element: &ElementRef) -> Result<String, PageError>;

    async fn click(&self, element: &ElementRef) -> Result<(), PageError>;

    /// Scrolls the viewport by the given amount of CSS pixels.
    async fn scroll(&self, dx: i64, dy: i64) -> Result<(), PageError>;

    /// Ends the session. No other call is valid afterwards.
    async fn release(&self) -> Result<(), PageError>;

    /// Finds an element and reads its text in one go.
    async fn find_text(
        &self,
        scope: Option<&ElementRef>,
        locator: &Locator,
    ) -> Result<Option<String>, PageError> {
        match self.find(scope, locator).await? {
            Some(element) => Ok(Some(self.text(&element).await?)),
            None => Ok(None),
        }
    }
}
