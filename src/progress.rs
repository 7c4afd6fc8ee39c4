use indicatif::{ProgressBar, ProgressStyle};
use log::info;

/// Progress reporting for a scraping run.
///
/// The scraper calls these at the start, once per finished city, and at the end.
/// Every method has a no-op default, so sinks only implement what they display.
pub trait Progress {
    /// Called at the start with the number of cities to process.
    fn begin(&mut self, _total: usize) {}

    /// Called when one city is done, with the number of records it contributed.
    fn city_done(&mut self, _city: &str, _daily: usize, _monthly: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Reports each finished city as a `[n/total] city` info line.
#[derive(Debug, Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn done(&self) -> usize {
        self.done
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn city_done(&mut self, city: &str, daily: usize, monthly: usize) {
        self.done += 1;
        info!(
            "[{}/{}] {} ({} days, {} months)",
            self.done, self.total, city, daily, monthly
        );
    }

    fn finish(&mut self) {
        info!("Processed {} of {} cities", self.done, self.total);
    }
}

/// Draws a terminal progress bar advancing once per city, with the city as its message.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    pub fn with_bar(bar: ProgressBar) -> Self {
        let style = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn begin(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn city_done(&mut self, city: &str, _daily: usize, _monthly: usize) {
        self.bar.set_message(city.to_string());
        self.bar.inc(1);
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}
