use std::fmt::Write;

use indexmap::IndexMap;

/// A node in the rendered document tree.
///
/// Text nodes are entity-escaped on render; raw nodes pass through
/// unchanged and exist for operator-provided HTML fragments coming out
/// of the YAML configs.
#[derive(Debug, Clone)]
pub enum Node {
    Element(HtmlElement),
    Text(String),
    Raw(String),
}

#[derive(Debug, Clone)]
pub struct HtmlElement {
    pub tag_name: String,
    pub children: Vec<Node>,
    pub attrs: IndexMap<String, String>,
}

/// Tags that must render without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for char in text.chars() {
        match char {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(char),
        }
    }

    escaped
}

impl HtmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag_name: tag.into(),
            children: Vec::new(),
            attrs: IndexMap::new(),
        }
    }

    pub fn attr<V>(mut self, name: impl Into<String>, value: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        let name = name.into();
        match value.into() {
            Some(value) => {
                *self.attrs.entry(name).or_default() = value.into();
            }
            None => {
                self.attrs.remove(&name);
            }
        }

        self
    }

    pub fn child(mut self, child: HtmlElement) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = HtmlElement>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Appends an escaped text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends an unescaped HTML fragment.
    pub fn raw(mut self, html: impl Into<String>) -> Self {
        self.children.push(Node::Raw(html.into()));
        self
    }

    pub fn render_to_string(&self) -> Result<String, std::fmt::Error> {
        let mut html = String::new();

        write!(&mut html, "<{}", self.tag_name)?;

        for (name, value) in &self.attrs {
            write!(&mut html, " ")?;
            write!(&mut html, r#"{name}="{}""#, escape(value))?;
        }

        write!(&mut html, ">")?;

        if VOID_TAGS.contains(&self.tag_name.as_str()) {
            return Ok(html);
        }

        for child in &self.children {
            match child {
                Node::Element(element) => write!(&mut html, "{}", element.render_to_string()?)?,
                Node::Text(text) => write!(&mut html, "{}", escape(text))?,
                Node::Raw(raw) => write!(&mut html, "{raw}")?,
            }
        }

        write!(&mut html, "</{}>", self.tag_name)?;

        Ok(html)
    }
}

impl HtmlElement {
    pub fn id<V>(self, id: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("id", id)
    }

    pub fn class<V>(self, class: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("class", class)
    }

    pub fn href<V>(self, href: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("href", href)
    }

    pub fn src<V>(self, src: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("src", src)
    }

    pub fn alt<V>(self, alt: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("alt", alt)
    }

    pub fn name<V>(self, name: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("name", name)
    }

    pub fn lang<V>(self, lang: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("lang", lang)
    }

    pub fn rel<V>(self, rel: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("rel", rel)
    }
}

macro_rules! element_fns {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name() -> HtmlElement {
                HtmlElement::new(stringify!($name))
            }
        )*
    };
}

element_fns! {
    html, head, title, meta, link, body, header, nav, main, footer,
    section, div, span, p, a, img, ul, li, form, input, textarea,
    button, label, small, i, br,
    h1, h2, h3, h4, h5, h6,
}
