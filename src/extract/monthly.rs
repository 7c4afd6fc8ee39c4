//! Reads the monthly climate widget by stepping its month dropdown through the year.

use crate::extract::error::ExtractError;
use crate::page::accessor::{ElementRef, Locator, PageAccessor};
use crate::page::error::PageError;
use crate::types::months::MonthNames;
use crate::types::page_schema::MonthlyWidgetSchema;
use crate::types::records::MonthlySummaryRecord;
use log::warn;
use std::fmt;
use std::str::FromStr;

/// What to do with the rest of a city's months when one month cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFailurePolicy {
    /// Skip the failing month and continue with the next one.
    #[default]
    SkipMonth,
    /// Stop the city's monthly pass, keeping the months already read.
    AbortCity,
}

impl FromStr for MonthFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" | "skip-month" => Ok(MonthFailurePolicy::SkipMonth),
            "abort" | "abort-city" => Ok(MonthFailurePolicy::AbortCity),
            other => Err(format!(
                "Unknown month failure policy '{other}' (expected skip or abort)"
            )),
        }
    }
}

impl fmt::Display for MonthFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFailurePolicy::SkipMonth => f.write_str("skip"),
            MonthFailurePolicy::AbortCity => f.write_str("abort"),
        }
    }
}

/// Extracts one [`MonthlySummaryRecord`] per month from a located widget.
pub struct MonthlySummaryExtractor<'a, P: PageAccessor + ?Sized> {
    page: &'a P,
    schema: &'a MonthlyWidgetSchema,
    card: ElementRef,
    dropdown: ElementRef,
    place: String,
}

impl<'a, P: PageAccessor + ?Sized> MonthlySummaryExtractor<'a, P> {
    /// Looks up the widget card and its dropdown on the current page.
    ///
    /// Returns `Ok(None)` if either is absent; the city then contributes no
    /// monthly records.
    pub async fn locate(
        page: &'a P,
        schema: &'a MonthlyWidgetSchema,
        place: &str,
    ) -> Result<Option<Self>, PageError> {
        let Some(card) = page.find(None, &Locator::xpath(&schema.card)).await? else {
            warn!("No monthly climate widget found for {}", place);
            return Ok(None);
        };
        let Some(dropdown) = page
            .find(Some(&card), &Locator::xpath(&schema.dropdown))
            .await?
        else {
            warn!("Monthly climate widget for {} has no month selector", place);
            return Ok(None);
        };
        Ok(Some(Self {
            page,
            schema,
            card,
            dropdown,
            place: place.to_string(),
        }))
    }

    /// Selects `month` in the dropdown and reads the six summary fields it reveals.
    ///
    /// # Errors
    ///
    /// * [`ExtractError::InteractionMismatch`] if no option's text equals `month`
    ///   or the option refuses the click.
    /// * [`ExtractError::StructureNotFound`] if a summary field is missing.
    /// * [`ExtractError::Page`] for session or transport failures.
    pub async fn extract_month(&self, month: &str) -> Result<MonthlySummaryRecord, ExtractError> {
        self.page.click(&self.dropdown).await?;

        let option_locator = self.schema.month_option(month);
        let option = self
            .page
            .find(None, &option_locator)
            .await?
            .ok_or_else(|| ExtractError::InteractionMismatch {
                month: month.to_string(),
                locator: option_locator.to_string(),
            })?;
        self.page.click(&option).await.map_err(|e| {
            if e.is_interaction() {
                ExtractError::InteractionMismatch {
                    month: month.to_string(),
                    locator: option_locator.to_string(),
                }
            } else {
                ExtractError::Page(e)
            }
        })?;

        Ok(MonthlySummaryRecord {
            month: month.to_string(),
            avg_temp: self.read_field("average temperature", &self.schema.avg_temp).await?,
            max_temp: self.read_field("maximum temperature", &self.schema.max_temp).await?,
            min_temp: self.read_field("minimum temperature", &self.schema.min_temp).await?,
            rain_days: self.read_field("rain days", &self.schema.rain_days).await?,
            rain_accum: self.read_field("accumulated rain", &self.schema.rain_accum).await?,
            avg_wind: self.read_field("average wind", &self.schema.avg_wind).await?,
            place: self.place.clone(),
        })
    }

    /// Extracts every month in order, applying `policy` to months that fail locally.
    ///
    /// Only session and transport failures are returned as errors.
    pub async fn extract_all(
        &self,
        months: &MonthNames,
        policy: MonthFailurePolicy,
    ) -> Result<Vec<MonthlySummaryRecord>, PageError> {
        let mut records = Vec::with_capacity(months.names().len());
        for month in months.iter() {
            match self.extract_month(month).await {
                Ok(record) => records.push(record),
                Err(ExtractError::Page(e)) if !e.is_interaction() => return Err(e),
                Err(e) => {
                    warn!("Skipping {} for {}: {}", month, self.place, e);
                    if policy == MonthFailurePolicy::AbortCity {
                        warn!(
                            "Abandoning remaining months for {} after {} of {}",
                            self.place,
                            records.len(),
                            months.names().len()
                        );
                        break;
                    }
                }
            }
        }
        Ok(records)
    }

    async fn read_field(&self, what: &str, xpath: &str) -> Result<String, ExtractError> {
        let locator = Locator::xpath(xpath);
        self.page
            .find_text(Some(&self.card), &locator)
            .await?
            .ok_or_else(|| ExtractError::structure(what, &locator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fake::{add_monthly_widget, FakePage};
    use std::collections::HashSet;

    async fn extract(
        page: &FakePage,
        schema: &MonthlyWidgetSchema,
        policy: MonthFailurePolicy,
    ) -> Result<Vec<MonthlySummaryRecord>, PageError> {
        MonthlySummaryExtractor::locate(page, schema, "madrid")
            .await?
            .expect("widget is present")
            .extract_all(&MonthNames::spanish(), policy)
            .await
    }

    #[tokio::test]
    async fn test_all_twelve_months() -> Result<(), PageError> {
        let schema = MonthlyWidgetSchema::default();
        let months = MonthNames::spanish();
        let mut page = FakePage::new();
        add_monthly_widget(&mut page, &schema, &months.iter().collect::<Vec<_>>());

        let records = extract(&page, &schema, MonthFailurePolicy::SkipMonth).await?;

        assert_eq!(records.len(), 12);
        let names: HashSet<&str> = records.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(names.len(), 12);
        assert!(names.iter().all(|m| months.contains(m)));
        assert!(records.iter().all(|r| r.place == "madrid"));

        let march = &records[2];
        assert_eq!(march.month, "Marzo");
        assert_eq!(march.avg_temp, "avg Marzo");
        assert_eq!(march.rain_accum, "accum Marzo");
        assert_eq!(march.avg_wind, "wind Marzo");
        Ok(())
    }

    #[tokio::test]
    async fn test_unmatched_month_is_skipped() -> Result<(), PageError> {
        let schema = MonthlyWidgetSchema::default();
        let mut page = FakePage::new();
        add_monthly_widget(&mut page, &schema, &["Enero", "Febrero", "Abril"]);

        let records = extract(&page, &schema, MonthFailurePolicy::SkipMonth).await?;

        let names: Vec<&str> = records.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(names, ["Enero", "Febrero", "Abril"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_unmatched_month_aborts_city() -> Result<(), PageError> {
        let schema = MonthlyWidgetSchema::default();
        let mut page = FakePage::new();
        add_monthly_widget(&mut page, &schema, &["Enero", "Febrero", "Abril"]);

        let records = extract(&page, &schema, MonthFailurePolicy::AbortCity).await?;

        let names: Vec<&str> = records.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(names, ["Enero", "Febrero"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_intercepted_option_click_counts_as_month_failure() -> Result<(), PageError> {
        let schema = MonthlyWidgetSchema::default();
        let months = MonthNames::spanish();
        let mut page = FakePage::new();
        add_monthly_widget(&mut page, &schema, &months.iter().collect::<Vec<_>>());
        let june = page
            .find(None, &schema.month_option("Junio"))
            .await?
            .expect("option registered");
        page.fail_click(&june, "element click intercepted");

        let records = extract(&page, &schema, MonthFailurePolicy::SkipMonth).await?;

        assert_eq!(records.len(), 11);
        assert!(records.iter().all(|r| r.month != "Junio"));
        Ok(())
    }

    #[tokio::test]
    async fn test_session_failure_propagates() {
        let schema = MonthlyWidgetSchema::default();
        let mut page = FakePage::new();
        let card = add_monthly_widget(&mut page, &schema, &["Enero"]);
        let dropdown = page
            .find(Some(&card), &Locator::xpath(&schema.dropdown))
            .await
            .unwrap()
            .unwrap();
        page.fail_click(&dropdown, "invalid session id");

        let result = extract(&page, &schema, MonthFailurePolicy::SkipMonth).await;

        assert!(matches!(
            result,
            Err(PageError::WebDriver { ref error, .. }) if error == "invalid session id"
        ));
    }

    #[tokio::test]
    async fn test_missing_widget_or_dropdown() -> Result<(), PageError> {
        let schema = MonthlyWidgetSchema::default();
        let page = FakePage::new();
        assert!(MonthlySummaryExtractor::locate(&page, &schema, "huesca").await?.is_none());

        let mut page = FakePage::new();
        page.add(None, &schema.card, "");
        assert!(MonthlySummaryExtractor::locate(&page, &schema, "huesca").await?.is_none());
        Ok(())
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("skip".parse(), Ok(MonthFailurePolicy::SkipMonth));
        assert_eq!("ABORT".parse(), Ok(MonthFailurePolicy::AbortCity));
        assert!("retry".parse::<MonthFailurePolicy>().is_err());
        assert_eq!(MonthFailurePolicy::AbortCity.to_string(), "abort");
    }
}
