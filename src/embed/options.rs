//! Options applied to every generic oEmbed lookup.

use serde::{Deserialize, Serialize};

/// Options bag for [`EmbedFetcher`](super::EmbedFetcher).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbedOptions {
    /// Thumbnails narrower than this are dropped from the result
    #[serde(default = "default_min_image_size")]
    pub min_image_width: u32,

    /// Thumbnails shorter than this are dropped from the result
    #[serde(default = "default_min_image_size")]
    pub min_image_height: u32,

    #[serde(default)]
    pub html: HtmlOptions,
}

/// Limits on the `<img>` tags inside an embed's HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HtmlOptions {
    /// Number of `<img>` tags inspected; later tags are left untouched
    #[serde(default = "default_max_images")]
    pub max_images: usize,

    /// Keep `<img>` tags whose source lives on another host
    #[serde(default)]
    pub external_images: bool,
}

fn default_min_image_size() -> u32 {
    60
}

fn default_max_images() -> usize {
    10
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            min_image_width: default_min_image_size(),
            min_image_height: default_min_image_size(),
            html: HtmlOptions::default(),
        }
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            max_images: default_max_images(),
            external_images: false,
        }
    }
}
