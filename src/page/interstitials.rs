use crate::page::accessor::{Locator, PageAccessor};
use crate::types::page_schema::PageSchema;
use log::debug;

/// Clicks away the cookie banner and the full-screen ad, if either is showing.
///
/// Best effort: nothing here can fail the run.
pub async fn dismiss_interstitials<P: PageAccessor + ?Sized>(page: &P, schema: &PageSchema) {
    accept_cookies(page, schema).await;
    close_ads(page, schema).await;
}

pub async fn accept_cookies<P: PageAccessor + ?Sized>(page: &P, schema: &PageSchema) {
    click_if_present(page, &schema.cookie_accept_button, "cookie banner").await;
}

pub async fn close_ads<P: PageAccessor + ?Sized>(page: &P, schema: &PageSchema) {
    click_if_present(page, &schema.ad_close_button, "ad overlay").await;
}

async fn click_if_present<P: PageAccessor + ?Sized>(page: &P, xpath: &str, what: &str) {
    let locator = Locator::xpath(xpath);
    match page.find(None, &locator).await {
        Ok(Some(element)) => match page.click(&element).await {
            Ok(()) => debug!("Dismissed {}", what),
            Err(e) => debug!("Could not dismiss {}: {}", what, e),
        },
        Ok(None) => debug!("No {} to dismiss", what),
        Err(e) => debug!("Lookup for {} failed: {}", what, e),
    }
}
