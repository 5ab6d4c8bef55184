use crate::html::*;
use crate::render::RenderContext;

/// The landing page: banner, heading, slogan, avatar and social links.
pub fn index(ctx: &RenderContext) -> HtmlElement {
    let profile = ctx.profile;

    let mut banner = section().class("banner text-center");
    if let Some(banner_image) = &profile.bannerimage {
        banner = banner.child(
            img()
                .class("banner-image img-fluid")
                .src(ctx.join(banner_image))
                .alt("banner"),
        );
    }
    if let Some(avatar) = &profile.avatar {
        banner = banner.child(
            img()
                .class("avatar rounded-circle")
                .src(ctx.join(avatar))
                .alt(ctx.owner_name()),
        );
    }

    let mut intro = section().class("intro text-center");
    if let Some(heading) = &profile.heading {
        intro = intro.child(h1().class("display-4").raw(heading.clone()));
    }
    if let Some(subheading) = &profile.subheading {
        intro = intro.child(p().class("lead").raw(subheading.clone()));
    }
    if let Some(slogan) = &profile.slogan {
        intro = intro.child(p().class("slogan text-muted").text(slogan.clone()));
    }

    let socials = profile.social_media.iter().map(|social| {
        a().class("btn btn-outline-secondary mx-1")
            .href(social.link.clone())
            .child(i().class(format!("bi-{}", social.kind)))
    });

    div()
        .class("index")
        .child(banner)
        .child(intro)
        .child(section().class("social text-center").children(socials))
}

#[cfg(test)]
mod tests {
    use crate::base_path::BasePath;
    use crate::config::ProfileConfig;

    use super::*;

    #[test]
    fn test_index_renders_profile_fields() {
        let profile = ProfileConfig {
            brandname: "Jane".to_string(),
            firstname: "Jane".to_string(),
            lastname: "Doe".to_string(),
            avatar: Some("/static/img/avatar.png".to_string()),
            heading: Some("<span>Hi there</span>".to_string()),
            slogan: Some("Building things.".to_string()),
            ..Default::default()
        };
        let base_path = BasePath::default();
        let ctx = RenderContext {
            profile: &profile,
            base_path: &base_path,
            render_contact: false,
        };

        let rendered = index(&ctx).render_to_string().unwrap();

        assert!(rendered.contains(r#"src="/static/img/avatar.png""#));
        assert!(rendered.contains("<span>Hi there</span>"));
        assert!(rendered.contains("Building things."));
    }
}
