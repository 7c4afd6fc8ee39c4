//! Enumerates the city identifiers listed on the site's index page.

use crate::extract::error::ExtractError;
use crate::page::accessor::{Locator, PageAccessor};
use crate::page::interstitials::accept_cookies;
use crate::types::page_schema::PageSchema;
use log::info;

/// Opens the city index and returns every listed city, in page order.
///
/// Makes a single pass without retries. Duplicates are passed through as the
/// page lists them; blank lines are skipped.
///
/// # Errors
///
/// [`ExtractError::StructureNotFound`] if the index container itself is absent.
/// An index whose entries are partly missing yields whatever entries exist.
pub async fn enumerate_cities<P: PageAccessor + ?Sized>(
    page: &P,
    schema: &PageSchema,
) -> Result<Vec<String>, ExtractError> {
    page.navigate(&schema.city_index_url()).await?;
    accept_cookies(page, schema).await;

    let cities = read_city_index(page, schema).await?;
    info!("Found {} cities on the index page", cities.len());
    Ok(cities)
}

/// Reads the city list from the already loaded index page.
pub async fn read_city_index<P: PageAccessor + ?Sized>(
    page: &P,
    schema: &PageSchema,
) -> Result<Vec<String>, ExtractError> {
    let container_locator = Locator::xpath(&schema.city_index_container);
    let container = page
        .find(None, &container_locator)
        .await?
        .ok_or_else(|| ExtractError::structure("city index", &container_locator))?;

    let entries = page
        .find_all(Some(&container), &Locator::xpath(&schema.city_index_entries))
        .await?;

    let mut cities = Vec::new();
    for entry in &entries {
        let text = page.text(entry).await?;
        cities.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    Ok(cities)
}
