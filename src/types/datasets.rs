//! Append-only record sets accumulated over one scraping run.

use crate::types::records::{DailyForecastRecord, MonthlySummaryRecord, TabularRecord};
use polars::prelude::*;
use std::collections::VecDeque;

/// An ordered collection of same-shaped records that only ever grows.
///
/// Records can be added at either end ([`RecordSet::push`] / [`RecordSet::prepend`]),
/// never updated or removed. The tabular form is built only when the set is
/// written, through [`RecordSet::to_dataframe`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet<R> {
    records: VecDeque<R>,
}

pub type DailyForecastDataset = RecordSet<DailyForecastRecord>;
pub type MonthlySummaryDataset = RecordSet<MonthlySummaryRecord>;

impl<R> Default for RecordSet<R> {
    fn default() -> Self {
        Self {
            records: VecDeque::new(),
        }
    }
}

impl<R> RecordSet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: R) {
        self.records.push_back(record);
    }

    /// Inserts a record ahead of everything accumulated so far.
    pub fn prepend(&mut self, record: R) {
        self.records.push_front(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }
}

impl<R> Extend<R> for RecordSet<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl<R: TabularRecord> RecordSet<R> {
    /// Lays the records out as a string-typed `DataFrame`, one column per field.
    ///
    /// An empty set still yields every column, so the written file keeps its header.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Vec<&str>> = R::FIELDS
            .iter()
            .map(|_| Vec::with_capacity(self.records.len()))
            .collect();

        for record in &self.records {
            for (column, value) in columns.iter_mut().zip(record.values()) {
                column.push(value);
            }
        }

        let columns = R::FIELDS
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::new(PlSmallStr::from_static(*name), values))
            .collect();
        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(name: &str, place: &str) -> MonthlySummaryRecord {
        MonthlySummaryRecord {
            month: name.to_string(),
            place: place.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut set = MonthlySummaryDataset::new();
        set.prepend(month("Enero", "madrid"));
        set.prepend(month("Febrero", "madrid"));
        set.push(month("Marzo", "madrid"));

        let order: Vec<&str> = set.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(order, ["Febrero", "Enero", "Marzo"]);
    }

    #[test]
    fn test_to_dataframe_columns_and_rows() -> Result<(), PolarsError> {
        let mut set = DailyForecastDataset::new();
        set.extend((1..=3).map(|d| DailyForecastRecord {
            day: d.to_string(),
            place: "sevilla".to_string(),
            ..Default::default()
        }));

        let df = set.to_dataframe()?;
        assert_eq!(df.shape(), (3, DailyForecastRecord::FIELDS.len()));
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, DailyForecastRecord::FIELDS);

        let days = df.column("day")?.str()?;
        assert_eq!(days.get(0), Some("1"));
        assert_eq!(days.get(2), Some("3"));
        let places = df.column("place")?.str()?;
        assert!(places.into_iter().all(|p| p == Some("sevilla")));
        Ok(())
    }

    #[test]
    fn test_empty_set_keeps_schema() -> Result<(), PolarsError> {
        let df = MonthlySummaryDataset::new().to_dataframe()?;
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), MonthlySummaryRecord::FIELDS.len());
        assert_eq!(df.column("rain_accum")?.dtype(), &DataType::String);
        Ok(())
    }
}
