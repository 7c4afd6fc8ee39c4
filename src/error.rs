use crate::config::ConfigError;
use crate::extract::error::ExtractError;
use crate::page::error::PageError;
use crate::writer::WriteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("City index not found on the page (looked for '{locator}')")]
    CityIndexNotFound { locator: String },
}
