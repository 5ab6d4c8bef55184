use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// A category of portfolio content, rendered as its own page.
///
/// Kinds round-trip to their lowercase route segment, which doubles as
/// the stem of the YAML file they are loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Experience,
    Education,
    Projects,
    Certifications,
    About,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Experience,
        ContentKind::Education,
        ContentKind::Projects,
        ContentKind::Certifications,
        ContentKind::About,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Projects => "projects",
            Self::Certifications => "certifications",
            Self::About => "about",
        }
    }

    /// The YAML file this kind is loaded from, relative to the config dir.
    pub fn config_file(&self) -> String {
        format!("{}.yml", self.as_str())
    }

    /// The heading shown on the kind's page.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Projects => "Projects",
            Self::Certifications => "Certifications",
            Self::About => "About Me",
        }
    }

    /// A regex alternation matching the route segments of `kinds`, used by
    /// the routing table.
    pub fn routing_pattern(kinds: &[ContentKind]) -> String {
        let segments = kinds
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join("|");

        format!("^/({segments})$")
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown content kind '{0}'")]
pub struct UnknownContentKind(String);

impl FromStr for ContentKind {
    type Err = UnknownContentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownContentKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_round_trip_through_route_segment() {
        for kind in ContentKind::ALL {
            assert_eq!(kind.as_str().parse::<ContentKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!("blog".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_config_file_name() {
        assert_eq!(ContentKind::Certifications.config_file(), "certifications.yml");
    }

    #[test]
    fn test_routing_pattern() {
        let pattern =
            ContentKind::routing_pattern(&[ContentKind::Experience, ContentKind::Projects]);

        assert_eq!(pattern, "^/(experience|projects)$");
    }
}
