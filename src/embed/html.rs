//! Tag-level scanning of third-party HTML.
//!
//! Only two things are ever needed from a foreign page: the oEmbed discovery
//! `<link>` and the `<img>` tags inside an embed's HTML fragment. Both are
//! located with regular expressions over tags; no DOM is built.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use super::options::HtmlOptions;

static LINK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<link\b[^>]*>").expect("valid link regex"));

static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid img regex"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid attribute regex")
});

const OEMBED_JSON_TYPES: &[&str] = &["application/json+oembed", "text/json+oembed"];

/// Value of attribute `name` in a single tag, entity-decoded.
fn attribute(tag: &str, name: &str) -> Option<String> {
    ATTRIBUTE.captures_iter(tag).find_map(|caps| {
        let key = caps.get(1)?.as_str();
        if !key.eq_ignore_ascii_case(name) {
            return None;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        Some(decode_entities(value))
    })
}

/// Decode the handful of entities that show up in attribute values.
fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Find the JSON oEmbed endpoint a page advertises, resolved against `base`.
///
/// Only JSON discovery links are honored; XML endpoints are ignored.
pub fn discover_oembed_endpoint(html: &str, base: &Url) -> Option<Url> {
    LINK_TAG.find_iter(html).find_map(|tag| {
        let tag = tag.as_str();
        let kind = attribute(tag, "type")?;
        if !OEMBED_JSON_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(kind.trim()))
        {
            return None;
        }
        let href = attribute(tag, "href")?;
        base.join(href.trim()).ok()
    })
}

/// Host of an image source, or `None` when the source is relative.
fn absolute_host(src: &str, page: &Url) -> Option<String> {
    let src = src.trim();
    let lower = src.to_ascii_lowercase();
    if lower.starts_with("//") {
        let with_scheme = format!("{}:{}", page.scheme(), src);
        return Url::parse(&with_scheme).ok()?.host_str().map(str::to_string);
    }
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Url::parse(src).ok()?.host_str().map(str::to_string);
    }
    None
}

fn same_site(a: &str, b: &str) -> bool {
    let strip = |h: &str| h.trim_start_matches("www.").to_ascii_lowercase();
    strip(a) == strip(b)
}

/// Apply the image limits to an embed HTML fragment.
///
/// At most `max_images` `<img>` tags are inspected. Unless
/// `external_images` is set, inspected tags whose source is on a different
/// host than `page` are removed. Tags past the limit are kept verbatim.
pub fn filter_images(html: &str, page: &Url, options: &HtmlOptions) -> String {
    if options.external_images {
        return html.to_string();
    }

    let page_host = page.host_str().unwrap_or_default();
    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for tag in IMG_TAG.find_iter(html).take(options.max_images) {
        let external = attribute(tag.as_str(), "src")
            .and_then(|src| absolute_host(&src, page))
            .is_some_and(|host| !same_site(&host, page_host));

        if external {
            out.push_str(&html[last..tag.start()]);
            last = tag.end();
        }
    }

    out.push_str(&html[last..]);
    out
}
