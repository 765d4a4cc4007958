//! Generic oEmbed lookups.
//!
//! A URL is resolved against the configured provider registry first; hosts
//! not in the registry get their page fetched and scanned for a JSON oEmbed
//! discovery link. The endpoint's JSON object becomes the embed, after the
//! thumbnail and HTML limits in [`EmbedOptions`] are applied.

use std::sync::Arc;

use mediabridge_common::{Miss, Resolution};
use reqwest::Url;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::html::{discover_oembed_endpoint, filter_images};
use super::options::EmbedOptions;
use crate::config::ProviderEndpoint;
use crate::transport::HttpTransport;

/// Provider key reported for every oEmbed-derived result.
pub const OEMBED_PROVIDER_KEY: &str = "oembed";

const THUMBNAIL_FIELDS: [&str; 3] = ["thumbnail_url", "thumbnail_width", "thumbnail_height"];

/// Attributes a provider returned for a URL.
///
/// Serializes as the bare field bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedResult {
    #[serde(skip)]
    pub provider_key: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EmbedResult {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Resolves arbitrary URLs through oEmbed.
pub struct EmbedFetcher {
    transport: Arc<dyn HttpTransport>,
    providers: Vec<ProviderEndpoint>,
}

impl EmbedFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, providers: Vec<ProviderEndpoint>) -> Self {
        Self {
            transport,
            providers,
        }
    }

    pub async fn resolve(&self, url: &str, options: &EmbedOptions) -> Resolution<EmbedResult> {
        match self.try_resolve(url, options).await {
            Ok(result) => Resolution::Found(result),
            Err(miss) => {
                debug!(url, %miss, "oEmbed resolution failed");
                Resolution::NotFound(miss)
            }
        }
    }

    async fn try_resolve(&self, url: &str, options: &EmbedOptions) -> Result<EmbedResult, Miss> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Miss::invalid_input("empty URL"));
        }

        let page = Url::parse(url).map_err(|e| Miss::invalid_input(format!("{url}: {e}")))?;
        if !matches!(page.scheme(), "http" | "https") {
            return Err(Miss::invalid_input(format!(
                "unsupported scheme {}",
                page.scheme()
            )));
        }

        let endpoint = match self.registered_endpoint(&page)? {
            Some(endpoint) => endpoint,
            None => self.discover_endpoint(&page).await?,
        };
        debug!(%endpoint, "querying oEmbed endpoint");

        let body = self
            .transport
            .fetch(endpoint.as_str())
            .await
            .map_err(|e| Miss::transport(e.to_string()))?;

        let fields = match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return Err(Miss::malformed(format!(
                    "endpoint returned {} instead of an object",
                    json_kind(&other)
                )))
            }
            Err(e) => return Err(Miss::malformed(format!("endpoint body: {e}"))),
        };

        Ok(EmbedResult {
            provider_key: OEMBED_PROVIDER_KEY.to_string(),
            fields: apply_options(fields, &page, options),
        })
    }

    /// Endpoint URL from the provider registry, if the host is registered.
    fn registered_endpoint(&self, page: &Url) -> Result<Option<Url>, Miss> {
        let Some(host) = page.host_str() else {
            return Ok(None);
        };
        let host = host.to_ascii_lowercase();

        let Some(provider) = self
            .providers
            .iter()
            .find(|p| p.hosts.iter().any(|h| host_matches(&host, h)))
        else {
            return Ok(None);
        };

        debug!(provider = %provider.name, "using registered oEmbed provider");
        Url::parse_with_params(
            &provider.endpoint,
            &[("url", page.as_str()), ("format", "json")],
        )
        .map(Some)
        .map_err(|e| Miss::invalid_input(format!("provider {} endpoint: {e}", provider.name)))
    }

    async fn discover_endpoint(&self, page: &Url) -> Result<Url, Miss> {
        let body = self
            .transport
            .fetch(page.as_str())
            .await
            .map_err(|e| Miss::transport(e.to_string()))?;

        let html = String::from_utf8_lossy(&body);
        discover_oembed_endpoint(&html, page)
            .ok_or_else(|| Miss::absent(format!("no oEmbed provider for {page}")))
    }
}

fn host_matches(host: &str, registered: &str) -> bool {
    let registered = registered.to_ascii_lowercase();
    host == registered
        || host
            .strip_suffix(registered.as_str())
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn apply_options(
    mut fields: Map<String, Value>,
    page: &Url,
    options: &EmbedOptions,
) -> Map<String, Value> {
    let too_small = |key: &str, min: u32| {
        fields
            .get(key)
            .and_then(as_dimension)
            .is_some_and(|v| v < u64::from(min))
    };

    if too_small("thumbnail_width", options.min_image_width)
        || too_small("thumbnail_height", options.min_image_height)
    {
        for key in THUMBNAIL_FIELDS {
            fields.remove(key);
        }
    }

    if let Some(Value::String(html)) = fields.get_mut("html") {
        *html = filter_images(html, page, &options.html);
    }

    fields
}

/// Providers disagree on whether sizes are numbers or strings.
fn as_dimension(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::testing::StubTransport;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn providers() -> Vec<ProviderEndpoint> {
        vec![ProviderEndpoint {
            name: "youtube".into(),
            hosts: vec!["youtube.com".into(), "youtu.be".into()],
            endpoint: "https://www.youtube.com/oembed".into(),
        }]
    }

    const VIDEO: &str = "https://www.youtube.com/watch?v=abc";
    const VIDEO_ENDPOINT: &str =
        "https://www.youtube.com/oembed?url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc&format=json";

    fn fetcher(stub: &Arc<StubTransport>) -> EmbedFetcher {
        EmbedFetcher::new(stub.clone(), providers())
    }

    #[test]
    fn subdomains_match_registered_hosts() {
        assert!(host_matches("www.youtube.com", "youtube.com"));
        assert!(host_matches("youtube.com", "YouTube.com"));
        assert!(!host_matches("notyoutube.com", "youtube.com"));
    }

    #[tokio::test]
    async fn registered_provider_is_queried_directly() {
        let body = json!({
            "type": "video",
            "title": "A video",
            "html": "<iframe src=\"https://www.youtube.com/embed/abc\"></iframe>",
            "thumbnail_url": "https://i.ytimg.com/vi/abc/hq.jpg",
            "thumbnail_width": 480,
            "thumbnail_height": 360,
        });
        let stub = Arc::new(StubTransport::new().respond(VIDEO_ENDPOINT, &body.to_string()));

        let result = fetcher(&stub)
            .resolve(VIDEO, &EmbedOptions::default())
            .await
            .into_option()
            .unwrap();

        assert_eq!(result.provider_key, "oembed");
        assert_eq!(result.field("title"), Some(&json!("A video")));
        assert_eq!(result.field("thumbnail_width"), Some(&json!(480)));
        assert_eq!(stub.calls(), vec![VIDEO_ENDPOINT.to_string()]);
        assert_eq!(serde_json::to_value(&result).unwrap(), body);
    }

    #[tokio::test]
    async fn discovery_is_used_for_unknown_hosts() {
        let page = r#"<html><head><link rel="alternate" type="application/json+oembed"
            href="https://blog.test/oembed?id=7"></head></html>"#;
        let stub = Arc::new(
            StubTransport::new()
                .respond("https://blog.test/posts/7", page)
                .respond("https://blog.test/oembed?id=7", r#"{"type":"rich","title":"Post"}"#),
        );

        let result = fetcher(&stub)
            .resolve("https://blog.test/posts/7", &EmbedOptions::default())
            .await;

        assert_matches!(result, Resolution::Found(ref r) if r.field("title") == Some(&json!("Post")));
        assert_eq!(stub.calls().len(), 2);
    }

    #[tokio::test]
    async fn page_without_discovery_link_is_not_found() {
        let stub = Arc::new(StubTransport::new().respond("https://plain.test/", "<p>hi</p>"));
        let result = fetcher(&stub)
            .resolve("https://plain.test/", &EmbedOptions::default())
            .await;
        assert_matches!(result, Resolution::NotFound(Miss::Absent(_)));
    }

    #[tokio::test]
    async fn bad_input_is_not_found_without_network() {
        let stub = Arc::new(StubTransport::new());
        for url in ["", "   ", "not a url", "ftp://files.test/a.mp4"] {
            let result = fetcher(&stub).resolve(url, &EmbedOptions::default()).await;
            assert_matches!(result, Resolution::NotFound(Miss::InvalidInput(_)));
        }
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn non_object_payload_is_malformed() {
        let stub = Arc::new(StubTransport::new().respond(VIDEO_ENDPOINT, "[1, 2, 3]"));
        let result = fetcher(&stub).resolve(VIDEO, &EmbedOptions::default()).await;
        assert_matches!(result, Resolution::NotFound(Miss::Malformed(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_not_found() {
        let stub = Arc::new(StubTransport::new());
        let result = fetcher(&stub).resolve(VIDEO, &EmbedOptions::default()).await;
        assert_matches!(result, Resolution::NotFound(Miss::Transport(_)));
    }

    #[test]
    fn small_thumbnails_are_dropped() {
        let page = Url::parse(VIDEO).unwrap();
        let fields = json!({
            "title": "tiny",
            "thumbnail_url": "https://i.ytimg.com/t.jpg",
            "thumbnail_width": "40",
            "thumbnail_height": 90,
        });
        let Value::Object(fields) = fields else { unreachable!() };

        let kept = apply_options(fields, &page, &EmbedOptions::default());
        assert!(kept.contains_key("title"));
        for key in THUMBNAIL_FIELDS {
            assert!(!kept.contains_key(key), "{key} should be dropped");
        }
    }

    #[test]
    fn html_external_images_are_filtered() {
        let page = Url::parse(VIDEO).unwrap();
        let Value::Object(fields) = json!({
            "html": r#"<img src="https://youtube.com/a.png"><img src="https://ads.test/b.png">"#,
        }) else {
            unreachable!()
        };

        let filtered = apply_options(fields, &page, &EmbedOptions::default());
        assert_eq!(
            filtered["html"],
            json!(r#"<img src="https://youtube.com/a.png">"#)
        );
    }
}
