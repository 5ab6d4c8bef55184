use crate::html::*;
use crate::messages::Message;
use crate::render::RenderContext;

/// The alert page a request gets redirected to after a success or
/// failure.
pub fn status(ctx: &RenderContext, message: &Message) -> HtmlElement {
    section()
        .class("status text-center")
        .child(
            img()
                .class("status-image")
                .src(ctx.join(&format!("/static/img/status/{}", message.image)))
                .alt(message.title),
        )
        .child(h2().class("status-header").text(message.header))
        .child(
            div()
                .class(format!("alert alert-{}", message.alert_kind))
                .raw(message.body.clone()),
        )
}

#[cfg(test)]
mod tests {
    use crate::base_path::BasePath;
    use crate::config::ProfileConfig;
    use crate::messages::{Endpoint, MessageKind, Messages};

    use super::*;

    #[test]
    fn test_status_renders_alert_kind_and_body() {
        let profile = ProfileConfig::default();
        let base_path = BasePath::default();
        let ctx = RenderContext {
            profile: &profile,
            base_path: &base_path,
            render_contact: false,
        };

        let email = "jane@example.com".parse().unwrap();
        let messages = Messages::compile(Some(&email));
        let message = messages.get(Endpoint::Fail, MessageKind::NotFound);

        let rendered = status(&ctx, message).render_to_string().unwrap();

        assert!(rendered.contains("alert alert-danger"));
        assert!(rendered.contains("could not find the page"));
        assert!(rendered.contains(r#"src="/static/img/status/404.svg""#));
    }
}
