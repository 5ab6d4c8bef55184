mod card;
mod date_range;
mod kind;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub use card::*;
pub use date_range::*;
pub use kind::*;

/// The deserialized contents of one content kind's YAML file.
#[derive(Debug, Clone)]
pub enum ContentSet {
    Experience(Vec<ExperienceCard>),
    Education(Vec<EducationCard>),
    Projects(Vec<ProjectCard>),
    Certifications(Vec<CertificationCard>),
    About(AboutMe),
}

/// The about page is a single HTML body rather than a list of cards.
#[derive(Debug, Clone, Deserialize)]
pub struct AboutMe {
    pub me: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ExperienceFile {
    experiences: Vec<ExperienceCard>,
}

#[derive(Debug, Clone, Deserialize)]
struct EducationFile {
    educations: Vec<EducationCard>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProjectsFile {
    projects: Vec<ProjectCard>,
}

#[derive(Debug, Clone, Deserialize)]
struct CertificationsFile {
    certifications: Vec<CertificationCard>,
}

#[derive(Error, Debug)]
pub enum LoadContentError {
    #[error("failed to read content file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse content file '{}': {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl ContentSet {
    /// Loads the YAML file backing the given content kind from the config
    /// directory.
    pub fn load(kind: ContentKind, config_dir: &Path) -> Result<Self, LoadContentError> {
        let path = config_dir.join(kind.config_file());
        let text = fs::read_to_string(&path).map_err(|source| LoadContentError::Io {
            path: path.clone(),
            source,
        })?;

        Self::parse(kind, &text).map_err(|source| LoadContentError::Yaml { path, source })
    }

    pub fn parse(kind: ContentKind, text: &str) -> Result<Self, serde_yaml::Error> {
        Ok(match kind {
            ContentKind::Experience => {
                Self::Experience(serde_yaml::from_str::<ExperienceFile>(text)?.experiences)
            }
            ContentKind::Education => {
                Self::Education(serde_yaml::from_str::<EducationFile>(text)?.educations)
            }
            ContentKind::Projects => {
                Self::Projects(serde_yaml::from_str::<ProjectsFile>(text)?.projects)
            }
            ContentKind::Certifications => Self::Certifications(
                serde_yaml::from_str::<CertificationsFile>(text)?.certifications,
            ),
            ContentKind::About => Self::About(serde_yaml::from_str::<AboutMe>(text)?),
        })
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Experience(_) => ContentKind::Experience,
            Self::Education(_) => ContentKind::Education,
            Self::Projects(_) => ContentKind::Projects,
            Self::Certifications(_) => ContentKind::Certifications,
            Self::About(_) => ContentKind::About,
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_experience_file() {
        let yaml = indoc! {"
            experiences:
              - name: Backend Engineer
                company: Acme Corp
                image: img/acme.png
                link: https://acme.example
                description: <p>Built the billing pipeline.</p>
                from: 2021-03-01
                to: 2023-06-30
              - name: Intern
                company: Initech
                from: 2020-07-01
        "};

        let ContentSet::Experience(cards) =
            ContentSet::parse(ContentKind::Experience, yaml).unwrap()
        else {
            panic!("expected experience cards");
        };

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].base.name, "Backend Engineer");
        assert_eq!(cards[0].company, "Acme Corp");
        assert_eq!(cards[0].dates.from_as_str(), "2021-03-01");
        assert_eq!(cards[0].dates.to_as_str(), "2023-06-30");
        assert_eq!(cards[1].dates.to_as_str(), "now");
    }

    #[test]
    fn test_parse_education_file() {
        let yaml = indoc! {"
            educations:
              - name: BSc Computer Science
                school: ETH
                specialization: Distributed Systems
                from: 2016-09-01
                to: 2019-08-31
        "};

        let ContentSet::Education(cards) = ContentSet::parse(ContentKind::Education, yaml).unwrap()
        else {
            panic!("expected education cards");
        };

        assert_eq!(cards[0].school, "ETH");
        assert_eq!(cards[0].specialization, "Distributed Systems");
    }

    #[test]
    fn test_parse_about_file() {
        let yaml = "me: <p>Hi, I write software.</p>\n";

        let ContentSet::About(about) = ContentSet::parse(ContentKind::About, yaml).unwrap() else {
            panic!("expected about body");
        };

        assert_eq!(about.me, "<p>Hi, I write software.</p>");
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(ContentSet::parse(ContentKind::Projects, "experiences: []").is_err());
    }
}
