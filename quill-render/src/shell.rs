//! The HTML document shell wrapped around every rendered page.

use askama::Template;
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const VIEWPORT: &str = "width=device-width, initial-scale=1, shrink-to-fit=no";
const BODY_ID: &str = "___gatsby";

/// A third-party script or stylesheet appended to every page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalResource {
    Script {
        src: &'static str,
        integrity: Option<&'static str>,
        crossorigin: Option<&'static str>,
    },
    Stylesheet {
        href: &'static str,
    },
}

impl ExternalResource {
    pub fn url(&self) -> &'static str {
        match *self {
            ExternalResource::Script { src, .. } => src,
            ExternalResource::Stylesheet { href } => href,
        }
    }

    /// Render the resource as a single tag
    pub fn to_html(&self) -> String {
        match self {
            ExternalResource::Script {
                src,
                integrity,
                crossorigin,
            } => {
                let mut tag = format!("<script src=\"{}\"", src);
                if let Some(integrity) = integrity {
                    tag.push_str(&format!(" integrity=\"{}\"", integrity));
                }
                if let Some(crossorigin) = crossorigin {
                    tag.push_str(&format!(" crossorigin=\"{}\"", crossorigin));
                }
                tag.push_str("></script>");
                tag
            }
            ExternalResource::Stylesheet { href } => {
                format!("<link rel=\"stylesheet\" href=\"{}\"/>", href)
            }
        }
    }
}

/// Resources injected after the framework-provided body components, in order
pub const EXTERNAL_RESOURCES: &[ExternalResource] = &[
    ExternalResource::Script {
        src: "https://cdnjs.cloudflare.com/ajax/libs/jquery/3.2.1/jquery.slim.min.js",
        integrity: Some("sha512-yrjEr6HY46i3hW7imuklZtRM7q1wyNUz8smKl2130OHTFHGbXGpHN4nYxrIeu0uJprDsLhycYY+xQ368d9OiaQ=="),
        crossorigin: Some("anonymous"),
    },
    ExternalResource::Script {
        src: "https://cdnjs.cloudflare.com/ajax/libs/popper.js/1.12.9/umd/popper.min.js",
        integrity: Some("sha384-ApNbgh9B+Y1QKtv3Rn7W3mgPxhU9K/ScQsAP7hUibX39j7fakFPskvXusvfa0b4Q"),
        crossorigin: Some("anonymous"),
    },
    ExternalResource::Script {
        src: "https://maxcdn.bootstrapcdn.com/bootstrap/4.0.0/js/bootstrap.min.js",
        integrity: Some("sha384-JZR6Spejh4U02d8jOt6vLEHfe/JQGiRRSQQxSfFWpi1MquVdAyjUar5+76PVCmYl"),
        crossorigin: Some("anonymous"),
    },
    ExternalResource::Stylesheet {
        href: "https://cdnjs.cloudflare.com/ajax/libs/fancybox/3.2.1/jquery.fancybox.min.css",
    },
    ExternalResource::Script {
        src: "https://cdnjs.cloudflare.com/ajax/libs/fancybox/3.2.1/jquery.fancybox.min.js",
        integrity: None,
        crossorigin: None,
    },
];

/// Inputs supplied by the page renderer; every field defaults to empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShellProps {
    pub html_attributes: BTreeMap<String, String>,
    pub head_components: Vec<String>,
    pub body_attributes: BTreeMap<String, String>,
    pub pre_body_components: Vec<String>,
    /// Pre-rendered page body, inserted verbatim
    pub body: String,
    pub post_body_components: Vec<String>,
}

impl ShellProps {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }
}

#[derive(Template)]
#[template(path = "html.html")]
struct ShellTemplate<'a> {
    lang: &'a str,
    viewport: &'a str,
    body_id: &'a str,
    html_attributes: String,
    head_components: Vec<Cow<'a, str>>,
    body_attributes: String,
    pre_body_components: Vec<Cow<'a, str>>,
    body: &'a str,
    post_body_components: Vec<Cow<'a, str>>,
    resources: &'a [ExternalResource],
}

/// Render the full HTML document for a page
///
/// `lang` always wins over a `lang` entry in `html_attributes`. Viewport meta
/// tags inside head, pre-body and post-body components are removed so the
/// document carries exactly one; the rest of each component is kept, and a
/// component left blank is skipped. The only failure is a formatter error
/// from the template engine.
pub fn render_shell(props: &ShellProps, lang: &str) -> askama::Result<String> {
    let html_attributes: BTreeMap<&str, &str> = props
        .html_attributes
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case("lang"))
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let template = ShellTemplate {
        lang,
        viewport: VIEWPORT,
        body_id: BODY_ID,
        html_attributes: render_attributes(html_attributes),
        head_components: without_viewport(&props.head_components),
        body_attributes: render_attributes(
            props
                .body_attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        ),
        pre_body_components: without_viewport(&props.pre_body_components),
        body: &props.body,
        post_body_components: without_viewport(&props.post_body_components),
        resources: EXTERNAL_RESOURCES,
    };

    template.render()
}

/// ` name="value"` pairs, each preceded by a space
fn render_attributes<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    attributes
        .into_iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, value)| format!(" {}=\"{}\"", html_escape(name.trim()), html_escape(value)))
        .collect()
}

static VIEWPORT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Remove every `<meta name="viewport" ...>` tag from a component
fn strip_viewport_meta(component: &str) -> Cow<'_, str> {
    VIEWPORT_REGEX
        .get_or_init(|| {
            Regex::new(r#"(?i)<meta\b[^>]*\bname\s*=\s*["']?viewport\b[^>]*>"#)
                .expect("viewport regex is valid")
        })
        .replace_all(component, "")
}

fn without_viewport(components: &[String]) -> Vec<Cow<'_, str>> {
    components
        .iter()
        .map(|c| strip_viewport_meta(c))
        .filter(|c| !c.trim().is_empty())
        .collect()
}

/// HTML escape function for attribute names and values
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
