//! Editor-facing descriptions of stored assets.

use std::sync::Arc;

use mediabridge_common::files::type_description;
use mediabridge_common::{AssetId, FileCategory, Miss, Resolution};
use serde::Serialize;
use tracing::debug;

use crate::assets::{Asset, AssetStore, ImageProber, ThumbnailLinker};
use crate::config::Config;
use crate::dimensions::{fit_width, Dimensions};

/// Everything the editor shows about one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    pub id: AssetId,
    pub title: String,
    pub exists: bool,
    #[serde(rename = "type")]
    pub type_description: String,
    pub category: Option<FileCategory>,
    pub name: String,
    pub url: String,
    /// Link sized like the preview.
    pub large_thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
    /// Link at the configured large thumbnail size.
    pub thumbnail: Option<String>,
    pub width: u32,
    pub height: u32,
    pub preview_width: u32,
    pub preview_height: u32,
}

/// Builds [`MediaDescriptor`]s from the asset collaborators.
pub struct MediaDescriptorBuilder {
    assets: Arc<dyn AssetStore>,
    linker: Arc<dyn ThumbnailLinker>,
    prober: Arc<dyn ImageProber>,
    max_preview_width: u32,
    small: Dimensions,
    large: Dimensions,
}

impl MediaDescriptorBuilder {
    pub fn new(
        assets: Arc<dyn AssetStore>,
        linker: Arc<dyn ThumbnailLinker>,
        prober: Arc<dyn ImageProber>,
        config: &Config,
    ) -> Self {
        let thumbnails = &config.thumbnails;
        Self {
            assets,
            linker,
            prober,
            max_preview_width: config.preview.max_preview_width,
            small: Dimensions::new(thumbnails.small.width, thumbnails.small.height),
            large: Dimensions::new(thumbnails.large.width, thumbnails.large.height),
        }
    }

    pub async fn describe(&self, id: AssetId) -> Resolution<MediaDescriptor> {
        let Some(asset) = self.assets.get(id).await else {
            return Resolution::NotFound(Miss::absent(format!("asset {id}")));
        };

        let natural = self.natural_size(&asset).await;
        let preview = fit_width(natural, self.max_preview_width);

        Resolution::Found(MediaDescriptor {
            id: asset.id,
            title: asset.title.clone(),
            exists: true,
            type_description: type_description(&asset.name),
            category: asset.category(),
            name: asset.name.clone(),
            url: asset.url.clone(),
            large_thumbnail: self.linker.link_for(&asset, preview),
            small_thumbnail: self.linker.link_for(&asset, self.small),
            thumbnail: self.linker.link_for(&asset, self.large),
            width: natural.width,
            height: natural.height,
            preview_width: preview.width,
            preview_height: preview.height,
        })
    }

    /// Stored size, or the probed size for images stored without one.
    async fn natural_size(&self, asset: &Asset) -> Dimensions {
        let stored = asset.dimensions();
        if !asset.is_image() || !stored.is_unknown() {
            return stored;
        }

        let bytes = match self.assets.read_bytes(asset).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Cannot probe asset {}: {}", asset.id, e);
                return stored;
            }
        };

        self.prober.probe_size(&bytes).unwrap_or(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{CatalogStore, HeaderProber, TemplateLinker};
    use assert_matches::assert_matches;
    use std::io::Cursor;
    use std::path::Path;

    fn asset(id: u64, name: &str, size: Option<(u32, u32)>, path: Option<&str>) -> Asset {
        Asset {
            id: AssetId::new(id),
            title: format!("Asset {id}"),
            name: name.into(),
            mime_type: None,
            width: size.map(|s| s.0),
            height: size.map(|s| s.1),
            url: format!("/assets/{name}"),
            caption: String::new(),
            credit: String::new(),
            path: path.map(Into::into),
        }
    }

    fn builder(assets: Vec<Asset>, media_root: Option<&Path>) -> MediaDescriptorBuilder {
        let store = CatalogStore::new(assets, Vec::new(), media_root.map(Path::to_path_buf));
        MediaDescriptorBuilder::new(
            Arc::new(store),
            Arc::new(TemplateLinker::new("/t/{width}x{height}/{name}")),
            Arc::new(HeaderProber),
            &Config::default(),
        )
    }

    #[tokio::test]
    async fn large_photo_gets_scaled_preview() {
        let b = builder(vec![asset(1, "cat.jpg", Some((4000, 3000)), None)], None);
        let d = b.describe(AssetId::new(1)).await.into_option().unwrap();

        assert_eq!((d.width, d.height), (4000, 3000));
        assert_eq!((d.preview_width, d.preview_height), (800, 600));
        assert_eq!(d.large_thumbnail.as_deref(), Some("/t/800x600/cat.jpg"));
        assert_eq!(d.small_thumbnail.as_deref(), Some("/t/60x60/cat.jpg"));
        assert_eq!(d.thumbnail.as_deref(), Some("/t/247x184/cat.jpg"));
        assert_eq!(d.category, Some(FileCategory::Image));
        assert_eq!(d.type_description, "JPEG image - good for photos");
        assert!(d.exists);
    }

    #[tokio::test]
    async fn small_image_is_not_upscaled() {
        let b = builder(vec![asset(2, "icon.png", Some((640, 480)), None)], None);
        let d = b.describe(AssetId::new(2)).await.into_option().unwrap();
        assert_eq!((d.preview_width, d.preview_height), (640, 480));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let b = builder(Vec::new(), None);
        assert_matches!(
            b.describe(AssetId::new(404)).await,
            Resolution::NotFound(Miss::Absent(_))
        );
    }

    #[tokio::test]
    async fn missing_dimensions_are_probed_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut png = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(image::RgbImage::new(1600, 900))
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();
        std::fs::write(dir.path().join("wide.png"), png.into_inner()).unwrap();

        let b = builder(
            vec![asset(3, "wide.png", None, Some("wide.png"))],
            Some(dir.path()),
        );
        let d = b.describe(AssetId::new(3)).await.into_option().unwrap();

        assert_eq!((d.width, d.height), (1600, 900));
        assert_eq!((d.preview_width, d.preview_height), (800, 450));
    }

    #[tokio::test]
    async fn unreadable_file_keeps_zero_size() {
        let b = builder(vec![asset(4, "gone.png", None, Some("gone.png"))], None);
        let d = b.describe(AssetId::new(4)).await.into_option().unwrap();
        assert_eq!((d.width, d.height, d.preview_width), (0, 0, 0));
    }

    #[tokio::test]
    async fn documents_have_no_thumbnails() {
        let b = builder(vec![asset(5, "report.pdf", None, None)], None);
        let d = b.describe(AssetId::new(5)).await.into_option().unwrap();

        assert_eq!(d.category, Some(FileCategory::Document));
        assert_eq!(d.type_description, "Adobe Acrobat PDF file");
        assert!(d.large_thumbnail.is_none());
        assert!(d.small_thumbnail.is_none());
        assert!(d.thumbnail.is_none());
    }

    #[tokio::test]
    async fn serializes_camel_case_keys() {
        let b = builder(vec![asset(1, "cat.jpg", Some((4000, 3000)), None)], None);
        let d = b.describe(AssetId::new(1)).await.into_option().unwrap();
        let json = serde_json::to_value(&d).unwrap();

        assert_eq!(json["previewWidth"], 800);
        assert_eq!(json["largeThumbnail"], "/t/800x600/cat.jpg");
        assert_eq!(json["type"], "JPEG image - good for photos");
        assert_eq!(json["category"], "image");
        assert_eq!(json["id"], 1);
    }
}
