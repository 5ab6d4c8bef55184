use crate::content::{CardBase, ContentSet, DateRange};
use crate::html::*;
use crate::render::RenderContext;

/// The page body for a content kind: the kind's title above a grid of
/// cards (or the raw bio body for the about page).
pub fn content(ctx: &RenderContext, set: &ContentSet) -> HtmlElement {
    let kind = set.kind();

    let body = match set {
        ContentSet::Experience(cards) => grid(cards.iter().map(|card| {
            self::card(
                ctx,
                &card.base,
                Some(card.company.clone()),
                Some(&card.dates),
            )
        })),
        ContentSet::Education(cards) => grid(cards.iter().map(|card| {
            let subtitle = if card.specialization.is_empty() {
                card.school.clone()
            } else {
                format!("{}, {}", card.school, card.specialization)
            };
            self::card(ctx, &card.base, Some(subtitle), Some(&card.dates))
        })),
        ContentSet::Projects(cards) => {
            grid(cards.iter().map(|card| self::card(ctx, &card.base, None, None)))
        }
        ContentSet::Certifications(cards) => grid(
            cards
                .iter()
                .map(|card| self::card(ctx, &card.base, None, Some(&card.dates))),
        ),
        ContentSet::About(about) => div().class("about").raw(about.me.clone()),
    };

    section()
        .class(format!("content content-{kind}"))
        .child(h2().class("content-title").text(kind.title()))
        .child(body)
}

fn grid(cards: impl IntoIterator<Item = HtmlElement>) -> HtmlElement {
    div().class("row row-cols-1 row-cols-md-2 g-4").children(
        cards
            .into_iter()
            .map(|card| div().class("col").child(card)),
    )
}

fn card(
    ctx: &RenderContext,
    base: &CardBase,
    subtitle: Option<String>,
    dates: Option<&DateRange>,
) -> HtmlElement {
    let mut element = div().class("card h-100");

    if let Some(image) = &base.image {
        element = element.child(
            img()
                .class("card-img-top")
                .src(ctx.join(image))
                .alt(base.name.clone()),
        );
    }

    let mut body = div().class("card-body");

    let heading = match &base.link {
        Some(link) => h5()
            .class("card-title")
            .child(a().href(link.clone()).text(base.name.clone())),
        None => h5().class("card-title").text(base.name.clone()),
    };
    body = body.child(heading);

    if let Some(subtitle) = subtitle {
        body = body.child(h6().class("card-subtitle text-muted").text(subtitle));
    }

    body = body.child(div().class("card-text").raw(base.description.clone()));

    element = element.child(body);

    if let Some(dates) = dates {
        element = element.child(
            div().class("card-footer").child(
                small()
                    .class("text-muted")
                    .text(format!("{} - {}", dates.from_as_str(), dates.to_as_str())),
            ),
        );
    }

    element
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::base_path::BasePath;
    use crate::config::ProfileConfig;
    use crate::content::ContentKind;

    use super::*;

    #[test]
    fn test_experience_cards_render_company_and_dates() {
        let set = ContentSet::parse(
            ContentKind::Experience,
            indoc! {"
                experiences:
                  - name: Backend Engineer
                    company: Acme Corp
                    description: <p>Billing pipeline.</p>
                    from: 2021-03-01
            "},
        )
        .unwrap();

        let profile = ProfileConfig::default();
        let base_path = BasePath::default();
        let ctx = RenderContext {
            profile: &profile,
            base_path: &base_path,
            render_contact: false,
        };

        let rendered = content(&ctx, &set).render_to_string().unwrap();

        assert!(rendered.contains("Backend Engineer"));
        assert!(rendered.contains("Acme Corp"));
        assert!(rendered.contains("<p>Billing pipeline.</p>"));
        assert!(rendered.contains("2021-03-01 - now"));
        assert!(rendered.contains("Experience"));
    }

    #[test]
    fn test_card_images_are_rewritten_under_base_path() {
        let set = ContentSet::parse(
            ContentKind::Projects,
            indoc! {"
                projects:
                  - name: plumage
                    image: img/plumage.png
                    link: https://example.com/plumage
            "},
        )
        .unwrap();

        let profile = ProfileConfig::default();
        let base_path = BasePath::new("/folio");
        let ctx = RenderContext {
            profile: &profile,
            base_path: &base_path,
            render_contact: false,
        };

        let rendered = content(&ctx, &set).render_to_string().unwrap();

        assert!(rendered.contains(r#"src="/folio/img/plumage.png""#));
        // external links stay untouched
        assert!(rendered.contains(r#"href="https://example.com/plumage""#));
    }

    #[test]
    fn test_about_renders_raw_body() {
        let set = ContentSet::parse(ContentKind::About, "me: <p>Hi!</p>").unwrap();

        let profile = ProfileConfig::default();
        let base_path = BasePath::default();
        let ctx = RenderContext {
            profile: &profile,
            base_path: &base_path,
            render_contact: false,
        };

        let rendered = content(&ctx, &set).render_to_string().unwrap();

        assert!(rendered.contains("<p>Hi!</p>"));
        assert!(rendered.contains("About Me"));
    }
}
