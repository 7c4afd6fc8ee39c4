//! Named locators and fixed offsets describing the eltiempo.es page layout.
//!
//! The extractors never hard-code a path into the page; they read it from a
//! [`PageSchema`]. When the site layout drifts, the schema (or a TOML file
//! overriding part of it) changes, not the extraction code.
//!
//! Templates use `{col}`, `{month}`, `{base}` and `{city}` placeholders, filled
//! in through [`crate::Locator::fill`].

use crate::page::accessor::Locator;
use serde::Deserialize;

/// The full schema for one site, with defaults matching the current eltiempo.es layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageSchema {
    pub base_url: String,
    /// URL of a city's forecast page; `{base}` and `{city}` are substituted.
    pub city_url_template: String,
    /// Path (relative to `base_url`) of the page listing every city.
    pub city_index_path: String,
    pub city_index_container: String,
    /// Entries inside the container; each entry's text holds one city per line.
    pub city_index_entries: String,
    pub cookie_accept_button: String,
    pub ad_close_button: String,
    /// Scroll applied between the two extractors so lazy content loads.
    pub scroll_dx: i64,
    pub scroll_dy: i64,
    pub forecast: ForecastTableSchema,
    pub monthly: MonthlyWidgetSchema,
}

impl Default for PageSchema {
    fn default() -> Self {
        Self {
            base_url: "https://www.eltiempo.es".to_string(),
            city_url_template: "{base}/{city}.html".to_string(),
            city_index_path: "/espana".to_string(),
            city_index_container: "//*[@id='main']/div[4]/div/section[2]/article/div".to_string(),
            city_index_entries: "//*[@class='drop-down closed']".to_string(),
            cookie_accept_button: "//*[@id='didomi-notice-agree-button']".to_string(),
            ad_close_button: "//*[@src='https://secure-ds.serving-sys.com/BurstingCachedScripts//HTML5FactoryFiles/ExpandFS/1_0_0/default_close']".to_string(),
            scroll_dx: 0,
            scroll_dy: 1300,
            forecast: ForecastTableSchema::default(),
            monthly: MonthlyWidgetSchema::default(),
        }
    }
}

impl PageSchema {
    pub fn city_url(&self, city: &str) -> String {
        self.city_url_template
            .replace("{base}", self.base_url.trim_end_matches('/'))
            .replace("{city}", city)
    }

    pub fn city_index_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.city_index_path)
    }
}

/// Layout of the two-week forecast table.
///
/// Columns are one-indexed as in XPath; the day window covers
/// `first_column..first_column + days`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastTableSchema {
    pub table: String,
    /// Header cell of a column, relative to the table.
    pub header_cell: String,
    /// The remaining four are relative to the header cell.
    pub day: String,
    pub week_day: String,
    pub temperature_max: String,
    pub temperature_min: String,
    /// Body cells, relative to the table.
    pub rain: String,
    pub snow: String,
    pub wind: String,
    pub sunrise: String,
    pub sunset: String,
    pub first_column: usize,
    pub days: usize,
}

impl Default for ForecastTableSchema {
    fn default() -> Self {
        Self {
            table: "//*[@id='cityPoisTable']//table".to_string(),
            header_cell: "thead/tr/th[{col}]".to_string(),
            day: "div[1]/span".to_string(),
            week_day: "span".to_string(),
            temperature_max: "div[2]/div[1]/span".to_string(),
            temperature_min: "div[2]/div[2]/span".to_string(),
            rain: "tbody/tr[4]/td[{col}]".to_string(),
            snow: "tbody/tr[5]/td[{col}]".to_string(),
            wind: "tbody/tr[6]/td[{col}]".to_string(),
            sunrise: "tbody/tr[7]/td[{col}]".to_string(),
            sunset: "tbody/tr[8]/td[{col}]".to_string(),
            first_column: 2,
            days: 14,
        }
    }
}

impl ForecastTableSchema {
    /// The one-indexed columns making up the forecast window, in page order.
    pub fn columns(&self) -> std::ops::Range<usize> {
        self.first_column..self.first_column + self.days
    }

    pub(crate) fn at_column(template: &str, column: usize) -> Locator {
        Locator::xpath(template).fill("col", column)
    }
}

/// Layout of the monthly climate widget and its month dropdown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonthlyWidgetSchema {
    pub card: String,
    /// Relative to the card.
    pub dropdown: String,
    /// Option of the opened dropdown whose text equals `{month}`.
    pub month_option: String,
    pub avg_temp: String,
    pub max_temp: String,
    pub min_temp: String,
    pub rain_days: String,
    pub rain_accum: String,
    pub avg_wind: String,
}

impl Default for MonthlyWidgetSchema {
    fn default() -> Self {
        Self {
            card: "//div[@class='card']".to_string(),
            dropdown: "//*[@id='main']/div[4]/div/main/section[4]/section/div/div/article[1]/div/div/div".to_string(),
            month_option: "//*[@id='month_average_chosen']/div/ul/li[text()='{month}']".to_string(),
            avg_temp: "//span[@id='temp']".to_string(),
            max_temp: "//span[@id='temp-max']".to_string(),
            min_temp: "//span[@id='temp-min']".to_string(),
            rain_days: "//span[@id='rain-days']".to_string(),
            rain_accum: "//span[@id='rain']".to_string(),
            avg_wind: "//span[@id='wind']".to_string(),
        }
    }
}

impl MonthlyWidgetSchema {
    pub(crate) fn month_option(&self, month: &str) -> Locator {
        Locator::xpath(&self.month_option).fill("month", month)
    }
}
