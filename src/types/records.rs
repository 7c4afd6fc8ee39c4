//! The two record shapes produced by the extractors.
//!
//! All fields are kept as the free-form text the page renders (units included);
//! numeric parsing is left to consumers of the written datasets.

/// A record that can be laid out as one row of a table with fixed, ordered columns.
pub trait TabularRecord {
    /// Column names, in output order.
    const FIELDS: &'static [&'static str];

    /// Field values, in the same order as [`TabularRecord::FIELDS`].
    fn values(&self) -> Vec<&str>;
}

/// One day of a city's two-week forecast.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DailyForecastRecord {
    pub day: String,
    pub week_day: String,
    pub temperature_max: String,
    pub temperature_min: String,
    pub rain: String,
    pub snow: String,
    pub wind: String,
    pub sunrise: String,
    pub sunset: String,
    pub place: String,
}

impl TabularRecord for DailyForecastRecord {
    const FIELDS: &'static [&'static str] = &[
        "day",
        "week_day",
        "temperature_max",
        "temperature_min",
        "rain",
        "snow",
        "wind",
        "sunrise",
        "sunset",
        "place",
    ];

    fn values(&self) -> Vec<&str> {
        vec![
            self.day.as_str(),
            self.week_day.as_str(),
            self.temperature_max.as_str(),
            self.temperature_min.as_str(),
            self.rain.as_str(),
            self.snow.as_str(),
            self.wind.as_str(),
            self.sunrise.as_str(),
            self.sunset.as_str(),
            self.place.as_str(),
        ]
    }
}

/// Climate summary of one calendar month for a city, keyed by the localized month name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthlySummaryRecord {
    pub month: String,
    pub avg_temp: String,
    pub max_temp: String,
    pub min_temp: String,
    pub rain_days: String,
    pub rain_accum: String,
    pub avg_wind: String,
    pub place: String,
}

impl TabularRecord for MonthlySummaryRecord {
    const FIELDS: &'static [&'static str] = &[
        "month",
        "avg_temp",
        "max_temp",
        "min_temp",
        "rain_days",
        "rain_accum",
        "avg_wind",
        "place",
    ];

    fn values(&self) -> Vec<&str> {
        vec![
            self.month.as_str(),
            self.avg_temp.as_str(),
            self.max_temp.as_str(),
            self.min_temp.as_str(),
            self.rain_days.as_str(),
            self.rain_accum.as_str(),
            self.avg_wind.as_str(),
            self.place.as_str(),
        ]
    }
}
