use std::fmt;
use std::str::FromStr;

/// Which cities a run covers.
///
/// # Examples
///
/// ```
/// use eltiempo::CitySelector;
///
/// assert_eq!("all".parse::<CitySelector>().unwrap(), CitySelector::All);
/// assert_eq!(
///     "madrid".parse::<CitySelector>().unwrap(),
///     CitySelector::One("madrid".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CitySelector {
    /// Enumerate every city listed on the site's index page.
    #[default]
    All,
    /// Exactly one city, by its URL identifier (e.g. `madrid`).
    One(String),
}

impl CitySelector {
    /// Sentinel value selecting every city.
    pub const ALL: &'static str = "all";

    /// Blank input counts as absent and selects every city.
    pub fn from_option(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => CitySelector::All,
            Some(v) if v.eq_ignore_ascii_case(Self::ALL) => CitySelector::All,
            Some(v) => CitySelector::One(v.to_string()),
        }
    }
}

impl FromStr for CitySelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_option(Some(s)))
    }
}

impl fmt::Display for CitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitySelector::All => f.write_str(Self::ALL),
            CitySelector::One(city) => f.write_str(city),
        }
    }
}
