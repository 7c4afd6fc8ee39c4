//! Reads the two-week forecast table of a city page, one day column at a time.

use crate::page::accessor::{ElementRef, Locator, PageAccessor};
use crate::page::error::PageError;
use crate::types::page_schema::ForecastTableSchema;
use crate::types::records::DailyForecastRecord;
use log::{debug, warn};

/// A finite, forward-only cursor over the day columns of a located forecast table.
///
/// Each call to [`DailyForecastExtractor::next_record`] reads one column; fields
/// are addressed purely by position, so a table laid out differently silently
/// yields different values. The cursor stops at the end of the window or at the
/// first column missing any cell, whichever comes first. Records already
/// produced are kept; days are never gap-filled.
pub struct DailyForecastExtractor<'a, P: PageAccessor + ?Sized> {
    page: &'a P,
    schema: &'a ForecastTableSchema,
    table: ElementRef,
    place: String,
    columns: std::ops::Range<usize>,
    exhausted: bool,
}

impl<'a, P: PageAccessor + ?Sized> DailyForecastExtractor<'a, P> {
    /// Looks up the forecast table on the current page.
    ///
    /// Returns `Ok(None)` when the table is absent, in which case the city
    /// contributes no daily records.
    pub async fn locate(
        page: &'a P,
        schema: &'a ForecastTableSchema,
        place: &str,
    ) -> Result<Option<Self>, PageError> {
        let Some(table) = page.find(None, &Locator::xpath(&schema.table)).await? else {
            warn!("No forecast table found for {}", place);
            return Ok(None);
        };
        Ok(Some(Self::new(page, schema, table, place)))
    }

    /// Builds a cursor over an already located table element.
    pub fn new(
        page: &'a P,
        schema: &'a ForecastTableSchema,
        table: ElementRef,
        place: &str,
    ) -> Self {
        Self {
            page,
            schema,
            table,
            place: place.to_string(),
            columns: schema.columns(),
            exhausted: false,
        }
    }

    /// Reads the next day column, or `Ok(None)` once the window is exhausted.
    pub async fn next_record(&mut self) -> Result<Option<DailyForecastRecord>, PageError> {
        if self.exhausted {
            return Ok(None);
        }
        let Some(column) = self.columns.next() else {
            self.exhausted = true;
            return Ok(None);
        };

        let record = self.read_column(column).await?;
        if record.is_none() {
            debug!(
                "Forecast table for {} ends early at column {}",
                self.place, column
            );
            self.exhausted = true;
        }
        Ok(record)
    }

    /// Drains the cursor into a vector.
    pub async fn collect_remaining(mut self) -> Result<Vec<DailyForecastRecord>, PageError> {
        let mut records = Vec::with_capacity(self.columns.len());
        while let Some(record) = self.next_record().await? {
            records.push(record);
        }
        Ok(records)
    }

    async fn read_column(&self, column: usize) -> Result<Option<DailyForecastRecord>, PageError> {
        let schema = self.schema;
        let header_locator = ForecastTableSchema::at_column(&schema.header_cell, column);
        let Some(header) = self.page.find(Some(&self.table), &header_locator).await? else {
            return Ok(None);
        };

        let header_locators = [
            &schema.day,
            &schema.week_day,
            &schema.temperature_max,
            &schema.temperature_min,
        ]
        .map(|template| Locator::xpath(template));
        let Some([day, week_day, temperature_max, temperature_min]) =
            self.read_texts(&header, header_locators).await?
        else {
            return Ok(None);
        };

        let row_locators = [
            &schema.rain,
            &schema.snow,
            &schema.wind,
            &schema.sunrise,
            &schema.sunset,
        ]
        .map(|template| ForecastTableSchema::at_column(template, column));
        let Some([rain, snow, wind, sunrise, sunset]) =
            self.read_texts(&self.table, row_locators).await?
        else {
            return Ok(None);
        };

        Ok(Some(DailyForecastRecord {
            day,
            week_day,
            temperature_max,
            temperature_min,
            rain,
            snow,
            wind,
            sunrise,
            sunset,
            place: self.place.clone(),
        }))
    }

    /// Reads every locator under `scope`; `None` as soon as one is missing.
    async fn read_texts<const N: usize>(
        &self,
        scope: &ElementRef,
        locators: [Locator; N],
    ) -> Result<Option<[String; N]>, PageError> {
        let mut texts = Vec::with_capacity(N);
        for locator in &locators {
            match self.page.find_text(Some(scope), locator).await? {
                Some(text) => texts.push(text),
                None => return Ok(None),
            }
        }
        Ok(texts.try_into().ok())
    }
}
