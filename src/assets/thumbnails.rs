//! Thumbnail links built from a URL template.

use super::{Asset, ThumbnailLinker};
use crate::dimensions::Dimensions;

/// Fills `{width}`, `{height}`, `{name}` and `{id}` in a link template.
///
/// Only images get links; every other asset yields `None`.
#[derive(Debug, Clone)]
pub struct TemplateLinker {
    template: String,
}

impl TemplateLinker {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl ThumbnailLinker for TemplateLinker {
    fn link_for(&self, asset: &Asset, size: Dimensions) -> Option<String> {
        if !asset.is_image() {
            return None;
        }

        Some(
            self.template
                .replace("{width}", &size.width.to_string())
                .replace("{height}", &size.height.to_string())
                .replace("{id}", &asset.id.to_string())
                .replace("{name}", &asset.name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediabridge_common::AssetId;

    fn asset(name: &str) -> Asset {
        serde_json::from_value(serde_json::json!({"id": 9, "name": name})).unwrap()
    }

    #[test]
    fn fills_template() {
        let linker = TemplateLinker::new("/assets/_resampled/{width}x{height}/{id}/{name}");
        assert_eq!(
            linker.link_for(&asset("cat.jpg"), Dimensions::new(60, 45)),
            Some("/assets/_resampled/60x45/9/cat.jpg".to_string())
        );
        assert_eq!(asset("cat.jpg").id, AssetId::new(9));
    }

    #[test]
    fn non_images_have_no_thumbnail() {
        let linker = TemplateLinker::new("/{name}");
        assert_eq!(linker.link_for(&asset("talk.mp3"), Dimensions::new(60, 60)), None);
    }
}
