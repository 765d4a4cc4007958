use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::embed::EmbedOptions;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub thumbnails: ThumbnailConfig,

    #[serde(default)]
    pub embed: EmbedConfig,

    #[serde(default)]
    pub podcast: PodcastConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Sizing of the in-editor preview image.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreviewConfig {
    /// Width the editor preview is scaled down to (0 disables scaling)
    #[serde(default = "default_max_preview_width")]
    pub max_preview_width: u32,
}

fn default_max_preview_width() -> u32 {
    800
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_preview_width: default_max_preview_width(),
        }
    }
}

/// Bounding box for the inline gallery block.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GalleryConfig {
    /// Display width of the gallery block
    #[serde(default = "default_gallery_width")]
    pub width: u32,

    /// Display height of the gallery block
    #[serde(default = "default_gallery_height")]
    pub height: u32,

    /// Largest width an individual gallery image is rendered at
    #[serde(default = "default_gallery_max_width")]
    pub max_width: u32,

    /// Largest height an individual gallery image is rendered at
    #[serde(default = "default_gallery_max_height")]
    pub max_height: u32,
}

fn default_gallery_width() -> u32 {
    800
}
fn default_gallery_height() -> u32 {
    450
}
fn default_gallery_max_width() -> u32 {
    1920
}
fn default_gallery_max_height() -> u32 {
    1080
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            width: default_gallery_width(),
            height: default_gallery_height(),
            max_width: default_gallery_max_width(),
            max_height: default_gallery_max_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

/// Thumbnail sizes and link format owned by the asset manager.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThumbnailConfig {
    /// Size used for file-picker thumbnails
    #[serde(default = "default_small_thumbnail")]
    pub small: ThumbnailSize,

    /// Size used for asset-library thumbnails
    #[serde(default = "default_large_thumbnail")]
    pub large: ThumbnailSize,

    /// Link template; `{id}`, `{name}`, `{width}` and `{height}` are substituted
    #[serde(default = "default_link_template")]
    pub link_template: String,
}

fn default_small_thumbnail() -> ThumbnailSize {
    ThumbnailSize {
        width: 60,
        height: 60,
    }
}
fn default_large_thumbnail() -> ThumbnailSize {
    ThumbnailSize {
        width: 247,
        height: 184,
    }
}
fn default_link_template() -> String {
    "/assets/_resampled/{width}x{height}/{name}".to_string()
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            small: default_small_thumbnail(),
            large: default_large_thumbnail(),
            link_template: default_link_template(),
        }
    }
}

/// A known oEmbed endpoint, used instead of HTML discovery for matching hosts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderEndpoint {
    pub name: String,

    /// Hosts served by this endpoint; subdomains match too
    pub hosts: Vec<String>,

    /// Endpoint URL; the target URL is passed as `url` and `format=json`
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbedConfig {
    #[serde(default)]
    pub options: EmbedOptions,

    /// Per-request timeout for page and endpoint fetches
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,

    /// User-Agent sent to third-party sites (crate default if unset)
    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderEndpoint>,
}

fn default_remote_timeout() -> u64 {
    10
}

fn default_providers() -> Vec<ProviderEndpoint> {
    let provider = |name: &str, hosts: &[&str], endpoint: &str| ProviderEndpoint {
        name: name.to_string(),
        hosts: hosts.iter().map(|h| (*h).to_string()).collect(),
        endpoint: endpoint.to_string(),
    };

    vec![
        provider(
            "youtube",
            &["youtube.com", "youtu.be"],
            "https://www.youtube.com/oembed",
        ),
        provider("vimeo", &["vimeo.com"], "https://vimeo.com/api/oembed.json"),
        provider("soundcloud", &["soundcloud.com"], "https://soundcloud.com/oembed"),
        provider("spotify", &["open.spotify.com"], "https://open.spotify.com/oembed"),
        provider(
            "flickr",
            &["flickr.com", "flic.kr"],
            "https://www.flickr.com/services/oembed/",
        ),
    ]
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            options: EmbedOptions::default(),
            timeout_secs: default_remote_timeout(),
            user_agent: None,
            providers: default_providers(),
        }
    }
}

/// Podcast directory settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PodcastConfig {
    /// Directory lookup endpoint (queried with `entity=podcast&id=<id>`)
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,

    /// Deadline for each of the lookup and feed steps
    #[serde(default = "default_remote_timeout")]
    pub step_timeout_secs: u64,
}

fn default_lookup_url() -> String {
    "https://itunes.apple.com/lookup".to_string()
}

impl Default for PodcastConfig {
    fn default() -> Self {
        Self {
            lookup_url: default_lookup_url(),
            step_timeout_secs: default_remote_timeout(),
        }
    }
}

/// Location of the asset and page catalog.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// JSON catalog file listing assets and pages
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Directory asset filenames are resolved against (defaults to the
    /// catalog file's directory)
    #[serde(default)]
    pub media_root: Option<PathBuf>,
}

/// Cache-Control max-age values, in seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_filedata_max_age")]
    pub filedata_max_age: u64,

    #[serde(default = "default_oembed_max_age")]
    pub oembed_max_age: u64,
}

fn default_filedata_max_age() -> u64 {
    60
}
fn default_oembed_max_age() -> u64 {
    600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            filedata_max_age: default_filedata_max_age(),
            oembed_max_age: default_oembed_max_age(),
        }
    }
}
