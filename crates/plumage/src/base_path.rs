use url::Url;

/// The base path the site is mounted under, normalized to always start
/// and end with a slash (`/`, `/portfolio/`, ...).
///
/// Every site-internal href and asset reference is routed through
/// [`BasePath::join`] so the generated pages work when the site is
/// hosted below a path prefix.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct BasePath(String);

impl Default for BasePath {
    fn default() -> Self {
        Self("/".to_string())
    }
}

impl BasePath {
    pub fn new(path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self(format!("/{trimmed}/"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rewrites a site-internal path to live under the base path.
    ///
    /// Absolute URLs (scheme and host present) are returned untouched, and
    /// paths that already carry the prefix are not prefixed twice.
    pub fn join(&self, path: &str) -> String {
        if let Ok(url) = Url::parse(path) {
            if url.has_host() {
                return path.to_string();
            }
        }

        let path = path
            .strip_prefix(self.0.trim_end_matches('/'))
            .unwrap_or(path);

        format!("{}{}", self.0, path.trim_start_matches('/'))
    }

    /// Strips the base path off a request path, yielding the site-relative
    /// path. Returns `None` when the request path lives outside the base.
    pub fn strip(&self, path: &str) -> Option<String> {
        if self.0 == "/" {
            return Some(path.to_string());
        }

        if path == self.0.trim_end_matches('/') {
            return Some("/".to_string());
        }

        path.strip_prefix(&self.0)
            .map(|stripped| format!("/{stripped}"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_normalizes() {
        assert_eq!(BasePath::new("/").as_str(), "/");
        assert_eq!(BasePath::new("").as_str(), "/");
        assert_eq!(BasePath::new("portfolio").as_str(), "/portfolio/");
        assert_eq!(BasePath::new("/portfolio/").as_str(), "/portfolio/");
    }

    #[test]
    fn test_join_with_root_base() {
        let base = BasePath::new("/");

        assert_eq!(base.join("/static/css/main.css"), "/static/css/main.css");
        assert_eq!(base.join("contact"), "/contact");
    }

    #[test]
    fn test_join_with_prefix() {
        let base = BasePath::new("/portfolio");

        assert_eq!(base.join("/experience"), "/portfolio/experience");
        assert_eq!(
            base.join("/static/img/avatar.png"),
            "/portfolio/static/img/avatar.png"
        );
    }

    #[test]
    fn test_join_does_not_double_prefix() {
        let base = BasePath::new("/portfolio");

        assert_eq!(base.join("/portfolio/experience"), "/portfolio/experience");
    }

    #[test]
    fn test_join_leaves_absolute_urls_untouched() {
        let base = BasePath::new("/portfolio");

        assert_eq!(
            base.join("https://github.com/someone"),
            "https://github.com/someone"
        );
    }

    #[test]
    fn test_strip() {
        let base = BasePath::new("/portfolio");

        assert_eq!(base.strip("/portfolio/mail").as_deref(), Some("/mail"));
        assert_eq!(base.strip("/portfolio").as_deref(), Some("/"));
        assert_eq!(base.strip("/elsewhere/mail"), None);
    }

    #[test]
    fn test_strip_with_root_base() {
        let base = BasePath::default();

        assert_eq!(base.strip("/mail").as_deref(), Some("/mail"));
    }
}
