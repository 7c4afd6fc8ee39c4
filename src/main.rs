use argh::FromArgs;
use eltiempo::{
    load_schema, BarProgress, CitySelector, CsvDatasetWriter, LogProgress, MonthFailurePolicy,
    Progress, ScrapeConfig, ScraperError, WeatherScraper, WebDriverPage,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

#[derive(FromArgs)]
/// Scrape two-week forecasts and monthly climate summaries from eltiempo.es
struct Args {
    /// city identifier as used in the site's URLs, or "all" to scrape every listed city
    #[argh(option, short = 'c', default = "CitySelector::All")]
    city: CitySelector,

    /// webdriver server to drive (default: http://localhost:9515)
    #[argh(option)]
    webdriver: Option<String>,

    /// run the browser without a window
    #[argh(switch)]
    headless: bool,

    /// directory the two CSV datasets are written to (default: dataset)
    #[argh(option, short = 'o')]
    output_dir: Option<PathBuf>,

    /// TOML file overriding the default page locators
    #[argh(option)]
    schema: Option<PathBuf>,

    /// seconds each element lookup waits before giving up (default: 5)
    #[argh(option)]
    wait_secs: Option<u64>,

    /// what to do when one month cannot be selected: skip or abort (default: skip)
    #[argh(option, default = "MonthFailurePolicy::SkipMonth")]
    month_failure: MonthFailurePolicy,
}

impl Args {
    fn into_config(self) -> Result<(CitySelector, ScrapeConfig), ScraperError> {
        let schema = match &self.schema {
            Some(path) => Some(load_schema(path)?),
            None => None,
        };
        let config = ScrapeConfig::builder()
            .maybe_webdriver_url(self.webdriver)
            .headless(self.headless)
            .maybe_implicit_wait(self.wait_secs.map(Duration::from_secs))
            .maybe_output_dir(self.output_dir)
            .maybe_schema(schema)
            .month_failure(self.month_failure)
            .build();
        Ok((self.city, config))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();
    let (selector, config) = args.into_config()?;

    println!("Scraping has started");
    log::info!("Target: {}, WebDriver: {}", selector, config.webdriver_url);

    let page = WebDriverPage::connect()
        .server_url(&config.webdriver_url)
        .headless(config.headless)
        .implicit_wait(config.implicit_wait)
        .call()
        .await?;

    let scraper = WeatherScraper::builder()
        .page(page)
        .schema(config.schema.clone())
        .month_failure(config.month_failure)
        .build();

    // Redirected runs get one log line per city instead of a bar.
    let mut progress: Box<dyn Progress> = if std::io::stderr().is_terminal() {
        Box::new(BarProgress::new())
    } else {
        Box::new(LogProgress::new())
    };
    let outcome = scraper.run(&selector, progress.as_mut()).await?;

    let mut writer = CsvDatasetWriter::new(&config.output_dir)?;
    outcome.write(&mut writer, &config.daily_table, &config.monthly_table)?;

    println!("Scraping successfully completed");
    Ok(())
}
