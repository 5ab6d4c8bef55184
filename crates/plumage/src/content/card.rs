use serde::Deserialize;

use crate::content::DateRange;

/// Fields shared by every card kind.
///
/// The description is trusted operator HTML from the YAML config and is
/// rendered unescaped.
#[derive(Debug, Clone, Deserialize)]
pub struct CardBase {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceCard {
    #[serde(flatten)]
    pub base: CardBase,
    pub company: String,
    #[serde(flatten)]
    pub dates: DateRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationCard {
    #[serde(flatten)]
    pub base: CardBase,
    pub school: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(flatten)]
    pub dates: DateRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectCard {
    #[serde(flatten)]
    pub base: CardBase,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertificationCard {
    #[serde(flatten)]
    pub base: CardBase,
    #[serde(flatten)]
    pub dates: DateRange,
}
