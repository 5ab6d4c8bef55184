use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A from/to range on a card. The end may be a date or free text
/// ("expected 2026") and defaults to "now" when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    #[serde(default)]
    pub to: ToDate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToDate {
    Date(NaiveDate),
    Text(String),
}

impl Default for ToDate {
    fn default() -> Self {
        Self::Text("now".to_string())
    }
}

impl fmt::Display for ToDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

impl DateRange {
    pub fn from_as_str(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    pub fn to_as_str(&self) -> String {
        self.to.to_string()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_to_may_be_date_or_text() {
        let range: DateRange = serde_yaml::from_str(indoc! {"
            from: 2021-01-15
            to: 2022-10-01
        "})
        .unwrap();
        assert_eq!(range.to_as_str(), "2022-10-01");

        let range: DateRange = serde_yaml::from_str(indoc! {"
            from: 2021-01-15
            to: expected 2026
        "})
        .unwrap();
        assert_eq!(range.to_as_str(), "expected 2026");
    }

    #[test]
    fn test_to_defaults_to_now() {
        let range: DateRange = serde_yaml::from_str("from: 2021-01-15").unwrap();

        assert_eq!(range.from_as_str(), "2021-01-15");
        assert_eq!(range.to_as_str(), "now");
    }
}
