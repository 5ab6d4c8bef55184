use crate::html::*;
use crate::render::RenderContext;

/// The contact form. Submissions POST to `/mail`; the server redirects to
/// a status page afterwards so a refresh cannot resend the mail.
pub fn contact(ctx: &RenderContext) -> HtmlElement {
    let heading = ctx
        .profile
        .contactheading
        .clone()
        .unwrap_or_else(|| "Get in touch".to_string());

    section()
        .class("contact")
        .child(h2().class("contact-heading text-center").text(heading))
        .child(
            form()
                .class("contact-form mx-auto")
                .attr("method", "post")
                .attr("action", ctx.join("/mail"))
                .child(
                    div()
                        .class("mb-3")
                        .child(label().class("form-label").attr("for", "name").text("Name"))
                        .child(
                            input()
                                .class("form-control")
                                .id("name")
                                .name("name")
                                .attr("type", "text")
                                .attr("required", "required"),
                        ),
                )
                .child(
                    div()
                        .class("mb-3")
                        .child(
                            label()
                                .class("form-label")
                                .attr("for", "email")
                                .text("Email"),
                        )
                        .child(
                            input()
                                .class("form-control")
                                .id("email")
                                .name("email")
                                .attr("type", "email")
                                .attr("required", "required"),
                        ),
                )
                .child(
                    div()
                        .class("mb-3")
                        .child(
                            label()
                                .class("form-label")
                                .attr("for", "message")
                                .text("Message"),
                        )
                        .child(
                            textarea()
                                .class("form-control")
                                .id("message")
                                .name("message")
                                .attr("rows", "6")
                                .attr("required", "required"),
                        ),
                )
                .child(
                    button()
                        .class("btn btn-primary")
                        .attr("type", "submit")
                        .text("Send"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use crate::base_path::BasePath;
    use crate::config::ProfileConfig;

    use super::*;

    #[test]
    fn test_form_posts_to_mail_under_base_path() {
        let profile = ProfileConfig::default();
        let base_path = BasePath::new("/folio");
        let ctx = RenderContext {
            profile: &profile,
            base_path: &base_path,
            render_contact: true,
        };

        let rendered = contact(&ctx).render_to_string().unwrap();

        assert!(rendered.contains(r#"action="/folio/mail""#));
        assert!(rendered.contains(r#"method="post""#));
        assert!(rendered.contains(r#"name="name""#));
        assert!(rendered.contains(r#"name="email""#));
        assert!(rendered.contains(r#"name="message""#));
    }
}
