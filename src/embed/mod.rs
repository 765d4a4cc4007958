//! Embeddable representations of third-party URLs.
//!
//! [`EmbedResolver`] is the single entry point used by the HTTP layer: Apple
//! Podcasts URLs are handed to [`PodcastResolver`], everything else goes
//! through the generic [`EmbedFetcher`].

pub mod feed;
pub mod html;
pub mod oembed;
pub mod options;
pub mod podcast;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use mediabridge_common::Resolution;
use serde::Serialize;

pub use oembed::{EmbedFetcher, EmbedResult};
pub use options::{EmbedOptions, HtmlOptions};
pub use podcast::{is_podcast_url, PodcastDescriptor, PodcastEpisode, PodcastResolver};

use crate::config::Config;
use crate::transport::HttpTransport;

/// Whatever a URL resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EmbedData {
    Embed(EmbedResult),
    Podcast(PodcastDescriptor),
}

/// Routes a URL to the resolver that understands it.
pub struct EmbedResolver {
    fetcher: EmbedFetcher,
    podcasts: PodcastResolver,
    options: EmbedOptions,
}

impl EmbedResolver {
    pub fn new(fetcher: EmbedFetcher, podcasts: PodcastResolver, options: EmbedOptions) -> Self {
        Self {
            fetcher,
            podcasts,
            options,
        }
    }

    /// Build both resolvers over one transport from configuration.
    pub fn from_config(transport: Arc<dyn HttpTransport>, config: &Config) -> Self {
        let fetcher = EmbedFetcher::new(transport.clone(), config.embed.providers.clone());
        let podcasts = PodcastResolver::new(
            transport,
            config.podcast.lookup_url.clone(),
            Duration::from_secs(config.podcast.step_timeout_secs),
        );
        Self::new(fetcher, podcasts, config.embed.options.clone())
    }

    pub async fn resolve(&self, url: &str) -> Resolution<EmbedData> {
        if is_podcast_url(url) {
            self.podcasts.resolve(url).await.map(EmbedData::Podcast)
        } else {
            self.fetcher
                .resolve(url, &self.options)
                .await
                .map(EmbedData::Embed)
        }
    }
}
