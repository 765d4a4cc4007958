//! JSON-file-backed asset and page catalog.
//!
//! The catalog is a single document loaded once at startup:
//!
//! ```json
//! {
//!   "assets": [{"id": 1, "name": "cat.jpg", "width": 4000, "height": 3000, "path": "2024/cat.jpg"}],
//!   "pages":  [{"id": 7, "title": "About", "link": "/about", "last_edited": "2024-05-01T09:00:00Z"}]
//! }
//! ```
//!
//! Asset `path`s are resolved against the configured media root.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use mediabridge_common::{AssetId, Error, Result};
use serde::Deserialize;
use tracing::{debug, info};

use super::{Asset, AssetStore, Page, PageStore};

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    assets: Vec<Asset>,
    #[serde(default)]
    pages: Vec<Page>,
}

/// In-memory catalog of assets and pages.
#[derive(Debug, Default)]
pub struct CatalogStore {
    assets: HashMap<AssetId, Asset>,
    pages: Vec<Page>,
    media_root: Option<PathBuf>,
}

impl CatalogStore {
    /// A catalog with nothing in it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(assets: Vec<Asset>, pages: Vec<Page>, media_root: Option<PathBuf>) -> Self {
        Self {
            assets: assets.into_iter().map(|a| (a.id, a)).collect(),
            pages,
            media_root,
        }
    }

    /// Load a catalog document from disk.
    pub fn load(path: &Path, media_root: Option<PathBuf>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&content)?;

        info!(
            "Loaded catalog {:?}: {} assets, {} pages",
            path,
            file.assets.len(),
            file.pages.len()
        );

        Ok(Self::new(file.assets, file.pages, media_root))
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    fn file_path(&self, asset: &Asset) -> Result<PathBuf> {
        let relative = asset
            .path
            .as_deref()
            .ok_or_else(|| Error::not_found(format!("asset {} has no stored file", asset.id)))?;

        if relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        }) {
            return Err(Error::invalid_input(format!(
                "asset {} path escapes the media root",
                asset.id
            )));
        }

        Ok(match &self.media_root {
            Some(root) => root.join(relative),
            None => relative.to_path_buf(),
        })
    }
}

#[async_trait]
impl AssetStore for CatalogStore {
    async fn get(&self, id: AssetId) -> Option<Asset> {
        self.assets.get(&id).cloned()
    }

    async fn read_bytes(&self, asset: &Asset) -> Result<Bytes> {
        let path = self.file_path(asset)?;
        debug!("Reading asset {} from {:?}", asset.id, path);
        let data = tokio::fs::read(&path).await?;
        Ok(Bytes::from(data))
    }
}

#[async_trait]
impl PageStore for CatalogStore {
    async fn search(&self, term: &str, limit: Option<usize>) -> Vec<Page> {
        let needle = term.trim().to_lowercase();

        let mut matches: Vec<Page> = self
            .pages
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        matches.sort_by(|a, b| b.last_edited.cmp(&a.last_edited));
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        matches
    }
}
