use crate::extract::monthly::MonthFailurePolicy;
use crate::types::page_schema::PageSchema;
use bon::Builder;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read page schema '{0}'")]
    SchemaRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse page schema '{0}'")]
    SchemaParse(PathBuf, #[source] toml::de::Error),
}

/// Settings for one scraping run.
///
/// ```
/// use eltiempo::ScrapeConfig;
///
/// let config = ScrapeConfig::builder().headless(true).build();
/// assert_eq!(config.webdriver_url, "http://localhost:9515");
/// assert_eq!(config.daily_table, "dataset1");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ScrapeConfig {
    /// Address of the WebDriver server (chromedriver listens on 9515).
    #[builder(into, default = "http://localhost:9515".to_string())]
    pub webdriver_url: String,
    #[builder(default)]
    pub headless: bool,
    /// How long element lookups wait before reporting not-found.
    #[builder(default = Duration::from_secs(5))]
    pub implicit_wait: Duration,
    #[builder(into, default = PathBuf::from("dataset"))]
    pub output_dir: PathBuf,
    #[builder(into, default = "dataset1".to_string())]
    pub daily_table: String,
    #[builder(into, default = "dataset2".to_string())]
    pub monthly_table: String,
    #[builder(default)]
    pub schema: PageSchema,
    #[builder(default)]
    pub month_failure: MonthFailurePolicy,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Loads a page schema from a TOML file. Keys left out keep their eltiempo.es defaults.
pub fn load_schema(path: impl AsRef<Path>) -> Result<PageSchema, ConfigError> {
    let path = path.as_ref();
    let toml =
        fs::read_to_string(path).map_err(|e| ConfigError::SchemaRead(path.to_path_buf(), e))?;
    toml::from_str(&toml).map_err(|e| ConfigError::SchemaParse(path.to_path_buf(), e))
}
