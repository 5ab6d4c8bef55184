mod cards;
mod contact;
mod index;
mod status;

pub use cards::*;
pub use contact::*;
pub use index::*;
pub use status::*;

use crate::html::*;
use crate::render::RenderContext;

/// Assembles a page body into the full document shell and renders it.
pub fn page(
    ctx: &RenderContext,
    page_title: &str,
    page_body: HtmlElement,
) -> Result<String, std::fmt::Error> {
    let document = base(ctx, page_title, page_body).render_to_string()?;

    Ok(format!("<!DOCTYPE html>\n{document}"))
}

/// The base template every page is embedded into: head, navbar, main
/// content, footer.
pub fn base(ctx: &RenderContext, page_title: &str, page_body: HtmlElement) -> HtmlElement {
    let mut body_element = body();
    if ctx.profile.animations {
        body_element = body_element.class("animated");
    }

    html()
        .lang("en")
        .child(
            head()
                .child(meta().attr("charset", "utf-8"))
                .child(
                    meta()
                        .name("viewport")
                        .attr("content", "width=device-width, initial-scale=1"),
                )
                .child(title().text(format!("{} | {page_title}", ctx.profile.brandname)))
                .child(
                    link()
                        .rel("stylesheet")
                        .href(ctx.join("/static/css/bootstrap.min.css")),
                )
                .child(
                    link()
                        .rel("stylesheet")
                        .href(ctx.join("/static/css/main.css")),
                )
                .child(
                    link()
                        .rel("icon")
                        .href(ctx.join("/favicon.ico")),
                ),
        )
        .child(
            body_element
                .child(navbar(ctx))
                .child(main().class("container py-4").child(page_body))
                .child(footer(ctx)),
        )
}

fn navbar(ctx: &RenderContext) -> HtmlElement {
    let mut brand = a().class("navbar-brand").href(ctx.join("/"));
    if let Some(brand_image) = &ctx.profile.brandimage {
        brand = brand.raw(brand_image.clone());
    }
    brand = brand.text(format!(" {}", ctx.profile.brandname));

    let mut items = ul().class("navbar-nav ms-auto");
    for kind in &ctx.profile.content_kinds {
        items = items.child(
            li().class("nav-item").child(
                a().class("nav-link")
                    .href(ctx.join(&format!("/{kind}")))
                    .text(kind.title()),
            ),
        );
    }
    if ctx.render_contact {
        items = items.child(
            li().class("nav-item").child(
                a().class("nav-link")
                    .href(ctx.join("/contact"))
                    .text("Contact"),
            ),
        );
    }

    nav()
        .class("navbar navbar-expand-lg")
        .child(div().class("container").child(brand).child(items))
}

fn footer(ctx: &RenderContext) -> HtmlElement {
    let socials = ctx.profile.social_media.iter().map(|social| {
        a().class("mx-1")
            .href(social.link.clone())
            .child(i().class(format!("bi-{}", social.kind)))
    });

    crate::html::footer()
        .class("footer text-center py-3")
        .child(div().class("social-links").children(socials))
        .child(
            small()
                .class("text-muted")
                .text(format!("© {}", ctx.owner_name())),
        )
}
