use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lettre::Address;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::warn;

use crate::content::ContentKind;
use crate::mail::SmtpConfig;

/// The name of the YAML file holding the main application config.
pub const CONFIG_FILE: &str = "config.yml";

/// A social media link shown in the footer and on the index page. The type
/// should name one of the "social" Bootstrap icons.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialMedia {
    #[serde(rename = "type")]
    pub kind: String,
    pub link: String,
}

/// The static configuration describing the site owner: identity, social
/// links, and the content kinds enabled for the site.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub brandname: String,
    /// Raw HTML rendered next to the brand name in the navbar.
    pub brandimage: Option<String>,
    pub bannerimage: Option<String>,
    pub avatar: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub email: Option<EmailAddress>,
    /// Raw HTML heading on the index page.
    pub heading: Option<String>,
    /// Raw HTML subheading on the index page.
    pub subheading: Option<String>,
    pub slogan: Option<String>,
    pub contactheading: Option<String>,
    #[serde(rename = "social")]
    pub social_media: Vec<SocialMedia>,
    #[serde(rename = "content")]
    pub content_kinds: Vec<ContentKind>,
    pub animations: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            brandname: "Plumage".to_string(),
            brandimage: None,
            bannerimage: None,
            avatar: None,
            firstname: String::new(),
            lastname: String::new(),
            email: None,
            heading: None,
            subheading: None,
            slogan: None,
            contactheading: None,
            social_media: Vec::new(),
            content_kinds: Vec::new(),
            animations: false,
        }
    }
}

impl ProfileConfig {
    pub fn is_kind_enabled(&self, kind: ContentKind) -> bool {
        self.content_kinds.contains(&kind)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    pub smtp: Option<SmtpConfig>,
    /// Whether the contact form is rendered. Requires a complete SMTP
    /// config and a profile email address.
    #[serde(skip)]
    pub render_contact: bool,
}

#[derive(Error, Debug)]
pub enum LoadConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl Config {
    /// Loads the main config from `<config_dir>/config.yml`.
    ///
    /// An absent or incomplete SMTP section is not an error: the site comes
    /// up without the contact form.
    pub fn load(config_dir: &Path) -> Result<Self, LoadConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let text = fs::read_to_string(&path).map_err(|source| LoadConfigError::Io {
            path: path.clone(),
            source,
        })?;

        Self::parse(&text).map_err(|source| LoadConfigError::Yaml { path, source })
    }

    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Config = serde_yaml::from_str(text)?;

        config.render_contact = match (&config.smtp, &config.profile.email) {
            (Some(smtp), Some(_)) if smtp.is_complete() => true,
            (Some(_), _) => {
                warn!("incomplete smtp configuration, contact form disabled");
                false
            }
            (None, _) => {
                warn!("no smtp configuration, contact form disabled");
                false
            }
        };

        Ok(config)
    }
}

/// An email address validated at config-load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(pub Address);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmailAddress {
    type Err = lettre::address::AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Address::from_str(s)?))
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| D::Error::custom(format!("invalid email address '{raw}'")))
    }
}
