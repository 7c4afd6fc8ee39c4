//! The scrape orchestrator: drives both extractors over every target city.

use crate::error::ScraperError;
use crate::extract::cities::enumerate_cities;
use crate::extract::daily::DailyForecastExtractor;
use crate::extract::error::ExtractError;
use crate::extract::monthly::{MonthFailurePolicy, MonthlySummaryExtractor};
use crate::page::accessor::PageAccessor;
use crate::page::error::PageError;
use crate::page::interstitials::dismiss_interstitials;
use crate::progress::Progress;
use crate::types::city_selector::CitySelector;
use crate::types::datasets::{DailyForecastDataset, MonthlySummaryDataset};
use crate::types::months::MonthNames;
use crate::types::page_schema::PageSchema;
use crate::writer::{DatasetWriter, WriteError};
use bon::bon;
use log::{info, warn};
use std::path::PathBuf;

/// The two datasets accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeOutcome {
    pub daily: DailyForecastDataset,
    pub monthly: MonthlySummaryDataset,
}

impl ScrapeOutcome {
    /// Hands both datasets to `writer`, daily table first.
    pub fn write(
        &self,
        writer: &mut dyn DatasetWriter,
        daily_table: &str,
        monthly_table: &str,
    ) -> Result<Vec<PathBuf>, WriteError> {
        let mut daily = self.daily.to_dataframe().map_err(|source| WriteError::Table {
            table: daily_table.to_string(),
            source,
        })?;
        let mut monthly = self.monthly.to_dataframe().map_err(|source| WriteError::Table {
            table: monthly_table.to_string(),
            source,
        })?;

        let daily_path = writer.write(daily_table, &mut daily)?;
        info!("Wrote {} daily rows to {}", daily.height(), daily_path.display());
        let monthly_path = writer.write(monthly_table, &mut monthly)?;
        info!("Wrote {} monthly rows to {}", monthly.height(), monthly_path.display());
        Ok(vec![daily_path, monthly_path])
    }
}

/// Visits each city on one shared page session and accumulates its records.
///
/// Cities are processed strictly one after another. A city missing its
/// forecast table or its climate widget simply contributes fewer records;
/// only page session failures stop the run.
pub struct WeatherScraper<P: PageAccessor> {
    page: P,
    schema: PageSchema,
    months: MonthNames,
    month_failure: MonthFailurePolicy,
}

#[bon]
impl<P: PageAccessor> WeatherScraper<P> {
    #[builder]
    pub fn new(
        page: P,
        #[builder(default)] schema: PageSchema,
        #[builder(default)] months: MonthNames,
        #[builder(default)] month_failure: MonthFailurePolicy,
    ) -> Self {
        Self {
            page,
            schema,
            months,
            month_failure,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Turns the selector into the list of cities to visit.
    ///
    /// `All` reads the site's city index, which must exist.
    pub async fn resolve_cities(
        &self,
        selector: &CitySelector,
    ) -> Result<Vec<String>, ScraperError> {
        match selector {
            CitySelector::One(city) => Ok(vec![city.clone()]),
            CitySelector::All => match enumerate_cities(&self.page, &self.schema).await {
                Ok(cities) => Ok(cities),
                Err(ExtractError::StructureNotFound { locator, .. }) => {
                    Err(ScraperError::CityIndexNotFound { locator })
                }
                Err(ExtractError::Page(e)) => Err(ScraperError::Page(e)),
                Err(e) => Err(ScraperError::Extract(e)),
            },
        }
    }

    /// Scrapes `cities` in order. The page session is left open.
    pub async fn scrape(
        &self,
        cities: &[String],
        progress: &mut dyn Progress,
    ) -> Result<ScrapeOutcome, PageError> {
        let mut outcome = ScrapeOutcome::default();
        for city in cities {
            let (daily, monthly) = self.scrape_city(city, &mut outcome).await?;
            progress.city_done(city, daily, monthly);
        }
        Ok(outcome)
    }

    /// Resolves the selector, scrapes every city and releases the page session.
    ///
    /// The session is released whether or not the run succeeds.
    pub async fn run(
        &self,
        selector: &CitySelector,
        progress: &mut dyn Progress,
    ) -> Result<ScrapeOutcome, ScraperError> {
        let result = self.resolve_and_scrape(selector, progress).await;
        progress.finish();

        match result {
            Ok(outcome) => {
                self.page.release().await?;
                Ok(outcome)
            }
            Err(e) => {
                if let Err(release_error) = self.page.release().await {
                    warn!("Failed to release page session after error: {}", release_error);
                }
                Err(e)
            }
        }
    }

    async fn resolve_and_scrape(
        &self,
        selector: &CitySelector,
        progress: &mut dyn Progress,
    ) -> Result<ScrapeOutcome, ScraperError> {
        let cities = self.resolve_cities(selector).await?;
        progress.begin(cities.len());
        Ok(self.scrape(&cities, progress).await?)
    }

    /// Runs both extractors for one city, returning how many daily and monthly records it added.
    async fn scrape_city(
        &self,
        city: &str,
        outcome: &mut ScrapeOutcome,
    ) -> Result<(usize, usize), PageError> {
        let url = self.schema.city_url(city);
        info!("Scraping {} from {}", city, url);
        self.page.navigate(&url).await?;
        dismiss_interstitials(&self.page, &self.schema).await;

        let forecast =
            DailyForecastExtractor::locate(&self.page, &self.schema.forecast, city).await?;
        let daily = match forecast {
            Some(extractor) => extractor.collect_remaining().await?,
            None => Vec::new(),
        };
        let daily_count = daily.len();
        outcome.daily.extend(daily);

        self.page
            .scroll(self.schema.scroll_dx, self.schema.scroll_dy)
            .await?;

        let widget =
            MonthlySummaryExtractor::locate(&self.page, &self.schema.monthly, city).await?;
        let monthly = match widget {
            Some(extractor) => extractor.extract_all(&self.months, self.month_failure).await?,
            None => Vec::new(),
        };
        let monthly_count = monthly.len();
        for record in monthly {
            outcome.monthly.prepend(record);
        }

        info!(
            "{}: {} daily and {} monthly records",
            city, daily_count, monthly_count
        );
        Ok((daily_count, monthly_count))
    }
}
