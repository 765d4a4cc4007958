//! Asset records and the collaborators that serve them.
//!
//! Handlers and builders only see the traits defined here:
//!
//! - [`AssetStore`] looks up stored files and reads their bytes.
//! - [`PageStore`] lists editorial pages for link pickers.
//! - [`ThumbnailLinker`] produces resized-image links.
//! - [`ImageProber`] reads pixel dimensions from raw image bytes.
//!
//! [`CatalogStore`], [`TemplateLinker`] and [`HeaderProber`] are the
//! implementations wired up by the server.

pub mod catalog;
pub mod probe;
pub mod thumbnails;

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use mediabridge_common::files::category_for;
use mediabridge_common::{AssetId, FileCategory, PageId};
use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;

pub use catalog::CatalogStore;
pub use probe::HeaderProber;
pub use thumbnails::TemplateLinker;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    #[serde(default)]
    pub title: String,
    /// File name including extension.
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Stored natural width; absent or zero when never measured.
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// Public URL of the original file.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub credit: String,
    /// Location of the file's bytes, relative to the media root.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Asset {
    pub fn category(&self) -> Option<FileCategory> {
        category_for(&self.name, self.mime_type.as_deref())
    }

    pub fn is_image(&self) -> bool {
        self.category() == Some(FileCategory::Image)
    }

    /// Stored dimensions, zero where unknown.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width.unwrap_or(0), self.height.unwrap_or(0))
    }
}

/// An editorial page that can be linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub link: String,
    pub last_edited: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Read access to stored assets.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// The asset with `id`, if one exists.
    async fn get(&self, id: AssetId) -> Option<Asset>;

    /// Raw bytes of an asset's file.
    async fn read_bytes(&self, asset: &Asset) -> mediabridge_common::Result<Bytes>;
}

/// Searchable page listing.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Pages whose title contains `term` (case-insensitive), most recently
    /// edited first, at most `limit` of them.
    async fn search(&self, term: &str, limit: Option<usize>) -> Vec<Page>;
}

/// Produces links to resized renditions of an asset.
pub trait ThumbnailLinker: Send + Sync {
    /// Link to `asset` scaled to `size`, or `None` when the asset has no
    /// image rendition.
    fn link_for(&self, asset: &Asset, size: Dimensions) -> Option<String>;
}

/// Reads pixel dimensions from encoded image bytes.
pub trait ImageProber: Send + Sync {
    fn probe_size(&self, bytes: &[u8]) -> Option<Dimensions>;
}
