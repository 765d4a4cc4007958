//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which writes a small catalog (plus one real PNG
//! file) into a temporary directory and builds a full [`AppContext`] over it.
//! The [`with_server`](TestHarness::with_server) constructor starts Axum on a
//! random port for HTTP-level testing.

#![allow(dead_code)]

use std::io::Cursor;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::body::Body;
use axum::Router;
use http_body_util::BodyExt;
use mediabridge::config::Config;
use mediabridge::server::{create_router, AppContext};
use tempfile::TempDir;

pub const CATALOG: &str = r#"{
  "assets": [
    {"id": 1, "title": "Harbour at dawn", "name": "harbour.jpg", "url": "/assets/harbour.jpg",
     "width": 4000, "height": 3000, "caption": "The harbour", "credit": "A. Photographer"},
    {"id": 2, "title": "Chart", "name": "chart.png", "url": "/assets/chart.png", "path": "chart.png"},
    {"id": 3, "title": "Annual report", "name": "report.pdf", "url": "/assets/report.pdf"},
    {"id": 4, "title": "Panorama", "name": "pano.jpg", "url": "/assets/pano.jpg",
     "width": 3840, "height": 2160}
  ],
  "pages": [
    {"id": 10, "title": "About the harbour", "link": "/about", "last_edited": "2024-03-01T10:00:00Z"},
    {"id": 11, "title": "Contact", "link": "/contact", "last_edited": "2024-06-01T10:00:00Z"},
    {"id": 12, "title": "Harbour history", "link": "/history", "last_edited": "2024-05-01T10:00:00Z"}
  ]
}"#;

/// Test harness wrapping a fully-constructed [`AppContext`] backed by a
/// catalog in a temporary directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration; the catalog settings
    /// are replaced with the harness's own.
    pub fn with_config(mut config: Config) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let catalog = write_catalog(&dir);

        config.catalog.path = Some(catalog);
        config.catalog.media_root = Some(dir.path().to_path_buf());

        let ctx = AppContext::from_config(config).expect("failed to build context");
        Self { ctx, dir }
    }

    /// Like [`new`](Self::new) but without a `media_root`, so asset files
    /// resolve next to the catalog file.
    pub fn without_media_root() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut config = Config::default();
        config.catalog.path = Some(write_catalog(&dir));

        let ctx = AppContext::from_config(config).expect("failed to build context");
        Self { ctx, dir }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = harness.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

/// Write [`CATALOG`] and a 1200x300 PNG for asset 2; returns the catalog path.
pub fn write_catalog(dir: &TempDir) -> PathBuf {
    let mut png = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image::RgbImage::new(1200, 300))
        .write_to(&mut png, image::ImageFormat::Png)
        .expect("failed to encode png");
    std::fs::write(dir.path().join("chart.png"), png.into_inner()).expect("failed to write png");

    let path = dir.path().join("catalog.json");
    std::fs::write(&path, CATALOG).expect("failed to write catalog");
    path
}

/// Helper to get response body as string
pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper to get response body as JSON
pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}
