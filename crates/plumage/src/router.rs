use regex::Regex;

use crate::base_path::BasePath;

struct Route<T> {
    pattern: Regex,
    target: T,
}

/// An order-sensitive regex routing table: the first registered pattern
/// matching the request path wins.
///
/// The configured base path is stripped off the request path before
/// matching; requests outside the base path never match.
pub struct RegexRouter<T> {
    routes: Vec<Route<T>>,
    base_path: BasePath,
}

/// A resolved route: the registered target plus the request path relative
/// to the base path.
pub struct RouteMatch<'a, T> {
    pub target: &'a T,
    pub path: String,
}

impl<T> RegexRouter<T> {
    pub fn new(base_path: BasePath) -> Self {
        Self {
            routes: Vec::new(),
            base_path,
        }
    }

    pub fn add(&mut self, pattern: &str, target: T) -> Result<(), regex::Error> {
        self.routes.push(Route {
            pattern: Regex::new(pattern)?,
            target,
        });

        Ok(())
    }

    pub fn recognize(&self, request_path: &str) -> Option<RouteMatch<'_, T>> {
        let path = self.base_path.strip(request_path)?;

        self.routes
            .iter()
            .find(|route| route.pattern.is_match(&path))
            .map(|route| RouteMatch {
                target: &route.target,
                path,
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum Target {
        Static,
        Mail,
        Content,
        Generic,
    }

    fn router() -> RegexRouter<Target> {
        let mut router = RegexRouter::new(BasePath::default());
        router.add("^/static/", Target::Static).unwrap();
        router.add("^/mail$", Target::Mail).unwrap();
        router.add("^/(experience|projects)$", Target::Content).unwrap();
        router.add(".*", Target::Generic).unwrap();
        router
    }

    #[test]
    fn test_first_match_wins() {
        let router = router();

        assert_eq!(
            router.recognize("/static/css/main.css").unwrap().target,
            &Target::Static
        );
        assert_eq!(router.recognize("/mail").unwrap().target, &Target::Mail);
        assert_eq!(
            router.recognize("/projects").unwrap().target,
            &Target::Content
        );
    }

    #[test]
    fn test_catch_all_matches_everything_else() {
        let router = router();

        assert_eq!(router.recognize("/").unwrap().target, &Target::Generic);
        assert_eq!(
            router.recognize("/education").unwrap().target,
            &Target::Generic
        );
    }

    #[test]
    fn test_base_path_is_stripped_before_matching() {
        let mut router = RegexRouter::new(BasePath::new("/portfolio"));
        router.add("^/mail$", Target::Mail).unwrap();

        let recognized = router.recognize("/portfolio/mail").unwrap();
        assert_eq!(recognized.target, &Target::Mail);
        assert_eq!(recognized.path, "/mail");

        assert!(router.recognize("/other/mail").is_none());
    }
}
