//! Podcast embeds for Apple Podcasts URLs.
//!
//! Apple does not serve oEmbed for podcast pages, so an embed is synthesized
//! from two lookups:
//!
//! 1. the numeric catalog id in the URL is looked up in the podcast
//!    directory, which must return exactly one show;
//! 2. the show's RSS feed is fetched and its episodes listed.
//!
//! Each step is attempted once, under its own deadline. Any failure ends the
//! chain with [`Resolution::NotFound`].

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use mediabridge_common::{Miss, Resolution};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::feed::{parse_feed, Feed};
use crate::transport::HttpTransport;

static CATALOG_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id(\d+)").expect("valid catalog id regex"));

const PODCAST_HOSTS: &[&str] = &["itunes.apple.com", "podcasts.apple.com"];

/// One episode of a podcast embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodcastEpisode {
    pub title: String,
    /// Audio enclosure URL.
    #[serde(rename = "mp3")]
    pub audio_url: String,
}

/// Embed data for a podcast show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodcastDescriptor {
    pub title: String,
    pub description: String,
    #[serde(rename = "artwork")]
    pub artwork_url: String,
    #[serde(rename = "url")]
    pub collection_url: String,
    pub items: Vec<PodcastEpisode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    #[serde(default)]
    result_count: i64,
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResult {
    feed_url: Option<String>,
    artwork_url600: Option<String>,
    collection_view_url: Option<String>,
}

/// `true` when `url` points at the Apple podcast catalog.
pub fn is_podcast_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    PODCAST_HOSTS.iter().any(|host| lower.contains(host))
}

/// The digits following the first `id` in `url`.
///
/// ```
/// use mediabridge::embed::podcast::extract_catalog_id;
///
/// let url = "https://podcasts.apple.com/gb/podcast/night-shift/id1234567890?i=1";
/// assert_eq!(extract_catalog_id(url), Some("1234567890"));
/// assert_eq!(extract_catalog_id("https://podcasts.apple.com/browse"), None);
/// ```
pub fn extract_catalog_id(url: &str) -> Option<&str> {
    CATALOG_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolves Apple Podcasts URLs into [`PodcastDescriptor`]s.
pub struct PodcastResolver {
    transport: Arc<dyn HttpTransport>,
    lookup_url: String,
    step_timeout: Duration,
}

impl PodcastResolver {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        lookup_url: impl Into<String>,
        step_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            lookup_url: lookup_url.into(),
            step_timeout,
        }
    }

    pub async fn resolve(&self, url: &str) -> Resolution<PodcastDescriptor> {
        match self.try_resolve(url).await {
            Ok(podcast) => Resolution::Found(podcast),
            Err(miss) => {
                debug!(url, %miss, "podcast resolution failed");
                Resolution::NotFound(miss)
            }
        }
    }

    async fn try_resolve(&self, url: &str) -> Result<PodcastDescriptor, Miss> {
        let id = extract_catalog_id(url)
            .ok_or_else(|| Miss::invalid_input(format!("no catalog id in {url}")))?;

        let show = self.lookup(id).await?;

        let feed_url = show
            .feed_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                Miss::malformed(format!("directory result for {id} has no feedUrl"))
            })?;

        let feed = self.fetch_feed(feed_url).await?;

        let items: Vec<PodcastEpisode> = feed
            .items
            .into_iter()
            .map(|item| PodcastEpisode {
                title: item.title,
                audio_url: item.enclosure_url,
            })
            .collect();

        if items.is_empty() {
            return Err(Miss::absent(format!("feed {feed_url} has no items")));
        }

        Ok(PodcastDescriptor {
            title: feed.title.trim().to_string(),
            description: feed.description,
            artwork_url: show.artwork_url600.unwrap_or_default(),
            collection_url: show.collection_view_url.unwrap_or_default(),
            items,
        })
    }

    /// Directory lookup; succeeds only on exactly one match.
    async fn lookup(&self, id: &str) -> Result<LookupResult, Miss> {
        let url = reqwest::Url::parse_with_params(
            &self.lookup_url,
            &[("entity", "podcast"), ("id", id)],
        )
        .map_err(|e| Miss::invalid_input(format!("lookup URL: {e}")))?;

        let body = self.fetch_step(url.as_str()).await?;

        let text = String::from_utf8_lossy(&body);
        let response: LookupResponse = serde_json::from_str(text.trim())
            .map_err(|e| Miss::malformed(format!("directory response: {e}")))?;

        if response.result_count != 1 {
            return Err(Miss::absent(format!(
                "directory returned {} results for {id}",
                response.result_count
            )));
        }

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Miss::malformed("resultCount is 1 but results is empty"))
    }

    async fn fetch_feed(&self, feed_url: &str) -> Result<Feed, Miss> {
        let body = self.fetch_step(feed_url).await?;
        parse_feed(&body).map_err(|e| Miss::malformed(format!("feed {feed_url}: {e}")))
    }

    async fn fetch_step(&self, url: &str) -> Result<bytes::Bytes, Miss> {
        tokio::time::timeout(self.step_timeout, self.transport.fetch(url))
            .await
            .map_err(|_| Miss::transport(format!("{url} exceeded {:?}", self.step_timeout)))?
            .map_err(|e| Miss::transport(e.to_string()))
    }
}
