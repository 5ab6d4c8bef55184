use std::collections::HashMap;

use hyper::StatusCode;
use tracing::warn;

use crate::config::EmailAddress;

/// The two status endpoints a request can be redirected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Success,
    Fail,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "fail" => Some(Self::Fail),
            _ => None,
        }
    }

    /// Routing pattern matching both status endpoints.
    pub fn routing_pattern() -> &'static str {
        "^/(success|fail)$"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Contact,
    Address,
    NotFound,
    Generic,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Address => "address",
            Self::NotFound => "notfound",
            Self::Generic => "generic",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "contact" => Some(Self::Contact),
            "address" => Some(Self::Address),
            "notfound" => Some(Self::NotFound),
            "generic" => Some(Self::Generic),
            _ => None,
        }
    }
}

/// An alert rendered on the status page.
#[derive(Debug, Clone)]
pub struct Message {
    pub title: &'static str,
    pub header: &'static str,
    /// Raw HTML alert body.
    pub body: String,
    /// Bootstrap alert class suffix (success, warning, danger).
    pub alert_kind: &'static str,
    pub status: StatusCode,
    pub image: &'static str,
}

/// The registry of status messages, compiled once from the profile email
/// so failure messages can embed a mailto link.
#[derive(Debug, Clone)]
pub struct Messages {
    messages: HashMap<(Endpoint, MessageKind), Message>,
}

impl Messages {
    pub fn compile(email: Option<&EmailAddress>) -> Self {
        let mailto = email
            .map(|email| format!(r#"<a href="mailto:{email}">{email}</a>"#))
            .unwrap_or_default();

        let messages = HashMap::from([
            (
                (Endpoint::Success, MessageKind::Contact),
                Message {
                    title: "Success",
                    header: "Message sent successfully",
                    body: "I will get in touch with you shortly".to_string(),
                    alert_kind: "success",
                    status: StatusCode::OK,
                    image: "delivered.svg",
                },
            ),
            (
                (Endpoint::Fail, MessageKind::Address),
                Message {
                    title: "Error",
                    header: "Oops, something went wrong",
                    body: "I could not understand your email address, please try again"
                        .to_string(),
                    alert_kind: "danger",
                    status: StatusCode::BAD_REQUEST,
                    image: "undelivered.svg",
                },
            ),
            (
                (Endpoint::Fail, MessageKind::Contact),
                Message {
                    title: "Error",
                    header: "Oops, something went wrong",
                    body: format!(
                        "I could not process your contact request, please contact me here: {mailto}"
                    ),
                    alert_kind: "warning",
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    image: "undelivered.svg",
                },
            ),
            (
                (Endpoint::Fail, MessageKind::NotFound),
                Message {
                    title: "404",
                    header: "Oops, something went wrong",
                    body: "I could not find the page you are looking for".to_string(),
                    alert_kind: "danger",
                    status: StatusCode::NOT_FOUND,
                    image: "404.svg",
                },
            ),
            (
                (Endpoint::Fail, MessageKind::Generic),
                Message {
                    title: "Error",
                    header: "Oops, something went wrong",
                    body: format!(
                        "There was an error on my end, please try again or contact me on {mailto}"
                    ),
                    alert_kind: "warning",
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    image: "error.svg",
                },
            ),
        ]);

        Self { messages }
    }

    pub fn get(&self, endpoint: Endpoint, kind: MessageKind) -> &Message {
        self.messages.get(&(endpoint, kind)).unwrap_or_else(|| {
            warn!(
                endpoint = endpoint.as_str(),
                kind = kind.as_str(),
                "invalid message requested"
            );
            &self.messages[&(Endpoint::Fail, MessageKind::Generic)]
        })
    }

    /// Looks up a message from raw route/query segments, falling back to
    /// the generic failure for anything unknown.
    pub fn lookup(&self, endpoint: &str, kind: &str) -> &Message {
        match (Endpoint::parse(endpoint), MessageKind::parse(kind)) {
            (Some(endpoint), Some(kind)) => self.get(endpoint, kind),
            _ => {
                warn!(endpoint, kind, "invalid message requested");
                self.get(Endpoint::Fail, MessageKind::Generic)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_lookup_known_message() {
        let messages = Messages::compile(None);

        let msg = messages.lookup("success", "contact");
        assert_eq!(msg.status, StatusCode::OK);
        assert_eq!(msg.alert_kind, "success");
    }

    #[test]
    fn test_lookup_falls_back_to_generic() {
        let messages = Messages::compile(None);

        let msg = messages.lookup("fail", "bogus");
        assert_eq!(msg.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg.alert_kind, "warning");

        // success/notfound is not a compiled combination either
        let msg = messages.lookup("success", "notfound");
        assert_eq!(msg.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_failure_bodies_embed_mailto() {
        let email: EmailAddress = "jane@example.com".parse().unwrap();
        let messages = Messages::compile(Some(&email));

        let msg = messages.get(Endpoint::Fail, MessageKind::Generic);
        assert!(msg.body.contains(r#"<a href="mailto:jane@example.com">"#));
    }

    #[test]
    fn test_not_found_status() {
        let messages = Messages::compile(None);

        assert_eq!(
            messages.get(Endpoint::Fail, MessageKind::NotFound).status,
            StatusCode::NOT_FOUND
        );
    }
}
