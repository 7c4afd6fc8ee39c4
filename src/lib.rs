mod config;
mod error;
mod extract;
mod page;
mod progress;
mod scraper;
mod types;
mod writer;

pub use config::{load_schema, ConfigError, ScrapeConfig};
pub use error::ScraperError;
pub use scraper::{ScrapeOutcome, WeatherScraper};

pub use page::accessor::{ElementRef, Locator, PageAccessor};
pub use page::error::PageError;
pub use page::interstitials::{accept_cookies, close_ads, dismiss_interstitials};
pub use page::webdriver::WebDriverPage;

pub use extract::cities::{enumerate_cities, read_city_index};
pub use extract::daily::DailyForecastExtractor;
pub use extract::error::ExtractError;
pub use extract::monthly::{MonthFailurePolicy, MonthlySummaryExtractor};

pub use types::city_selector::CitySelector;
pub use types::datasets::{DailyForecastDataset, MonthlySummaryDataset, RecordSet};
pub use types::months::MonthNames;
pub use types::page_schema::{ForecastTableSchema, MonthlyWidgetSchema, PageSchema};
pub use types::records::{DailyForecastRecord, MonthlySummaryRecord, TabularRecord};

pub use progress::{BarProgress, LogProgress, NullProgress, Progress};
pub use writer::{CsvDatasetWriter, DatasetWriter, WriteError};
