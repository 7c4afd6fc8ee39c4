use chrono::{Locale, TimeZone, Utc};

/// The twelve localized, capitalised month names in calendar order.
///
/// These are matched verbatim against the monthly widget's dropdown options
/// and written as the `month` column, so they must equal what the site renders.
///
/// # Examples
///
/// ```
/// use eltiempo::MonthNames;
///
/// let months = MonthNames::spanish();
/// assert_eq!(months.names()[0], "Enero");
/// assert_eq!(months.names()[11], "Diciembre");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNames([String; 12]);

impl MonthNames {
    /// Month names as rendered by the site (Spanish).
    pub fn spanish() -> Self {
        Self::localized(Locale::es_ES)
    }

    pub fn localized(locale: Locale) -> Self {
        Self(std::array::from_fn(|i| {
            let name = Utc
                .with_ymd_and_hms(2000, i as u32 + 1, 1, 0, 0, 0)
                .single()
                .map(|date| date.format_localized("%B", locale).to_string())
                .unwrap_or_default();
            capitalize(&name)
        }))
    }

    pub fn names(&self) -> &[String; 12] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, month: &str) -> bool {
        self.0.iter().any(|name| name == month)
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::spanish()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_spanish_month_names() {
        let months = MonthNames::spanish();
        let expected = [
            "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio", "Agosto",
            "Septiembre", "Octubre", "Noviembre", "Diciembre",
        ];
        assert_eq!(months.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_month_names_are_distinct() {
        let months = MonthNames::localized(Locale::en_US);
        let distinct: HashSet<&str> = months.iter().collect();
        assert_eq!(distinct.len(), 12);
        assert!(months.contains("January"));
        assert!(!months.contains("january"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("enero"), "Enero");
        assert_eq!(capitalize("état"), "État");
        assert_eq!(capitalize(""), "");
    }
}
