use crate::page::error::PageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// An expected element, table or widget is absent from the page.
    #[error("Page structure not found: {what} at '{locator}'")]
    StructureNotFound { what: String, locator: String },

    /// No dropdown option matched the month name, or the option rejected the selection.
    #[error("Could not select month '{month}' using '{locator}'")]
    InteractionMismatch { month: String, locator: String },

    #[error(transparent)]
    Page(#[from] PageError),
}

impl ExtractError {
    pub(crate) fn structure(what: &str, locator: impl ToString) -> Self {
        ExtractError::StructureNotFound {
            what: what.to_string(),
            locator: locator.to_string(),
        }
    }
}
