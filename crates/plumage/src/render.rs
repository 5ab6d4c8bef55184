use crate::base_path::BasePath;
use crate::config::ProfileConfig;

/// Everything the templates need besides the page-specific data.
pub struct RenderContext<'a> {
    pub profile: &'a ProfileConfig,
    pub base_path: &'a BasePath,
    pub render_contact: bool,
}

impl RenderContext<'_> {
    /// Rewrites a site-internal path under the configured base path.
    pub fn join(&self, path: &str) -> String {
        self.base_path.join(path)
    }

    pub fn owner_name(&self) -> String {
        format!("{} {}", self.profile.firstname, self.profile.lastname)
            .trim()
            .to_string()
    }
}
