//! In-memory page snapshot used by the unit tests.
//!
//! Elements are registered against the exact `(scope, locator)` pair the
//! extractors look them up with. A node may carry month-dependent text, and
//! clicking a node may select a month, which is enough to emulate the monthly
//! dropdown widget.

use crate::page::accessor::{ElementRef, Locator, PageAccessor};
use crate::page::error::PageError;
use crate::types::months::MonthNames;
use crate::types::page_schema::{ForecastTableSchema, MonthlyWidgetSchema, PageSchema};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Node {
    text: String,
    by_month: HashMap<String, String>,
    selects_month: Option<String>,
    click_error: Option<String>,
}

#[derive(Default)]
pub(crate) struct Journal {
    pub navigations: Vec<String>,
    pub clicks: Vec<ElementRef>,
    pub scrolls: Vec<(i64, i64)>,
    pub released: bool,
    selected_month: Option<String>,
}

#[derive(Default)]
pub(crate) struct FakePage {
    nodes: Vec<Node>,
    lookups: HashMap<(Option<ElementRef>, String), Vec<ElementRef>>,
    navigation_error: Option<String>,
    journal: Mutex<Journal>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, scope: Option<&ElementRef>, xpath: &str, text: &str) -> ElementRef {
        let element = ElementRef::new(format!("node-{}", self.nodes.len()));
        self.nodes.push(Node {
            text: text.to_string(),
            ..Default::default()
        });
        self.lookups
            .entry((scope.cloned(), xpath.to_string()))
            .or_default()
            .push(element.clone());
        element
    }

    pub fn set_month_text(&mut self, element: &ElementRef, month: &str, text: &str) {
        self.node_mut(element)
            .by_month
            .insert(month.to_string(), text.to_string());
    }

    pub fn select_on_click(&mut self, element: &ElementRef, month: &str) {
        self.node_mut(element).selects_month = Some(month.to_string());
    }

    pub fn fail_click(&mut self, element: &ElementRef, code: &str) {
        self.node_mut(element).click_error = Some(code.to_string());
    }

    pub fn fail_navigation(&mut self, code: &str) {
        self.navigation_error = Some(code.to_string());
    }

    pub fn journal(&self) -> MutexGuard<'_, Journal> {
        self.journal.lock().unwrap()
    }

    fn node_mut(&mut self, element: &ElementRef) -> &mut Node {
        let index = Self::index(element);
        &mut self.nodes[index]
    }

    fn index(element: &ElementRef) -> usize {
        element.id().trim_start_matches("node-").parse().unwrap()
    }
}

#[async_trait]
impl PageAccessor for FakePage {
    async fn navigate(&self, url: &str) -> Result<(), PageError> {
        if let Some(code) = &self.navigation_error {
            return Err(PageError::WebDriver {
                command: "navigate".to_string(),
                error: code.clone(),
                message: url.to_string(),
            });
        }
        self.journal().navigations.push(url.to_string());
        Ok(())
    }

    async fn find(
        &self,
        scope: Option<&ElementRef>,
        locator: &Locator,
    ) -> Result<Option<ElementRef>, PageError> {
        Ok(self.find_all(scope, locator).await?.into_iter().next())
    }

    async fn find_all(
        &self,
        scope: Option<&ElementRef>,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, PageError> {
        Ok(self
            .lookups
            .get(&(scope.cloned(), locator.as_str().to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn text(&self, element: &ElementRef) -> Result<String, PageError> {
        let node = &self.nodes[Self::index(element)];
        let journal = self.journal();
        let text = journal
            .selected_month
            .as_ref()
            .and_then(|month| node.by_month.get(month))
            .unwrap_or(&node.text);
        Ok(text.clone())
    }

    async fn click(&self, element: &ElementRef) -> Result<(), PageError> {
        let node = &self.nodes[Self::index(element)];
        if let Some(code) = &node.click_error {
            return Err(PageError::WebDriver {
                command: "element click".to_string(),
                error: code.clone(),
                message: String::new(),
            });
        }
        let mut journal = self.journal();
        journal.clicks.push(element.clone());
        if let Some(month) = &node.selects_month {
            journal.selected_month = Some(month.clone());
        }
        Ok(())
    }

    async fn scroll(&self, dx: i64, dy: i64) -> Result<(), PageError> {
        self.journal().scrolls.push((dx, dy));
        Ok(())
    }

    async fn release(&self) -> Result<(), PageError> {
        self.journal().released = true;
        Ok(())
    }
}

/// Registers a forecast table with `columns` populated day columns.
pub(crate) fn add_forecast_table(
    page: &mut FakePage,
    schema: &ForecastTableSchema,
    columns: usize,
) -> ElementRef {
    let table = page.add(None, &schema.table, "");
    for (offset, col) in (schema.first_column..schema.first_column + columns).enumerate() {
        let header = page.add(
            Some(&table),
            ForecastTableSchema::at_column(&schema.header_cell, col).as_str(),
            "",
        );
        page.add(Some(&header), &schema.day, &format!("{}", 10 + offset));
        page.add(Some(&header), &schema.week_day, &format!("wd{}", offset % 7));
        page.add(Some(&header), &schema.temperature_max, &format!("{}º", 20 + offset));
        page.add(Some(&header), &schema.temperature_min, &format!("{}º", 5 + offset));
        for (template, value) in [
            (&schema.rain, format!("{offset} mm")),
            (&schema.snow, "0 cm".to_string()),
            (&schema.wind, format!("{} km/h", 8 + offset)),
            (&schema.sunrise, format!("08:{:02}", 10 + offset)),
            (&schema.sunset, format!("19:{:02}", 40 + offset)),
        ] {
            page.add(
                Some(&table),
                ForecastTableSchema::at_column(template, col).as_str(),
                &value,
            );
        }
    }
    table
}

/// Registers the monthly widget with a dropdown offering `offered` months.
///
/// Summary fields read `"<field> <month>"` once a month has been selected.
pub(crate) fn add_monthly_widget(
    page: &mut FakePage,
    schema: &MonthlyWidgetSchema,
    offered: &[&str],
) -> ElementRef {
    let card = page.add(None, &schema.card, "");
    page.add(Some(&card), &schema.dropdown, "");
    for month in offered {
        let option = page.add(None, schema.month_option(month).as_str(), month);
        page.select_on_click(&option, month);
    }
    for (field, locator) in [
        ("avg", &schema.avg_temp),
        ("max", &schema.max_temp),
        ("min", &schema.min_temp),
        ("days", &schema.rain_days),
        ("accum", &schema.rain_accum),
        ("wind", &schema.avg_wind),
    ] {
        let element = page.add(Some(&card), locator, "");
        for month in offered {
            page.set_month_text(&element, month, &format!("{field} {month}"));
        }
    }
    card
}

/// Registers the city index with one entry per string; entries may hold several lines.
pub(crate) fn add_city_index(page: &mut FakePage, schema: &PageSchema, entries: &[&str]) {
    let container = page.add(None, &schema.city_index_container, "");
    for entry in entries {
        page.add(Some(&container), &schema.city_index_entries, entry);
    }
}

/// A page holding a full forecast table and a widget accepting every month.
pub(crate) fn complete_city_page(schema: &PageSchema, months: &MonthNames) -> FakePage {
    let mut page = FakePage::new();
    add_forecast_table(&mut page, &schema.forecast, schema.forecast.days);
    let offered: Vec<&str> = months.iter().collect();
    add_monthly_widget(&mut page, &schema.monthly, &offered);
    page
}
