//! Layout data for the inline gallery block.

use std::sync::Arc;

use mediabridge_common::AssetId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assets::AssetStore;
use crate::config::GalleryConfig;
use crate::dimensions::fit_box;

/// One image as referenced by a gallery block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryImageRef {
    pub id: AssetId,
    /// Replaces the asset's own caption when non-empty.
    #[serde(default)]
    pub caption: Option<String>,
    /// Replaces the asset's own credit when non-empty.
    #[serde(default)]
    pub credit: Option<String>,
}

impl From<AssetId> for GalleryImageRef {
    fn from(id: AssetId) -> Self {
        Self {
            id,
            caption: None,
            credit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryImage {
    pub id: AssetId,
    pub title: String,
    pub url: String,
    pub caption: String,
    pub credit: String,
    pub width: u32,
    pub height: u32,
}

/// A laid-out gallery block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gallery {
    pub images: Vec<GalleryImage>,
    pub width: u32,
    pub height: u32,
}

pub struct GalleryLayout {
    assets: Arc<dyn AssetStore>,
    config: GalleryConfig,
}

impl GalleryLayout {
    pub fn new(assets: Arc<dyn AssetStore>, config: GalleryConfig) -> Self {
        Self { assets, config }
    }

    /// Size every existing referenced image to the gallery bounds, in order.
    pub async fn layout(&self, refs: &[GalleryImageRef]) -> Gallery {
        let mut images = Vec::with_capacity(refs.len());

        for image_ref in refs {
            let Some(asset) = self.assets.get(image_ref.id).await else {
                debug!("Gallery image {} does not exist, skipping", image_ref.id);
                continue;
            };

            let size = fit_box(
                asset.dimensions(),
                self.config.max_width,
                self.config.max_height,
            );

            images.push(GalleryImage {
                id: asset.id,
                title: asset.title,
                url: asset.url,
                caption: non_empty_or(&image_ref.caption, asset.caption),
                credit: non_empty_or(&image_ref.credit, asset.credit),
                width: size.width,
                height: size.height,
            });
        }

        Gallery {
            images,
            width: self.config.width,
            height: self.config.height,
        }
    }
}

fn non_empty_or(preferred: &Option<String>, fallback: String) -> String {
    match preferred {
        Some(value) if !value.is_empty() => value.clone(),
        _ => fallback,
    }
}
