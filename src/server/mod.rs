use crate::assets::{CatalogStore, HeaderProber, PageStore, TemplateLinker};
use crate::config::Config;
use crate::descriptor::MediaDescriptorBuilder;
use crate::embed::EmbedResolver;
use crate::gallery::GalleryLayout;
use crate::transport::{HttpTransport, ReqwestTransport};
use anyhow::{Context, Result};
use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub mod response;
pub mod routes_api;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub descriptors: Arc<MediaDescriptorBuilder>,
    pub embeds: Arc<EmbedResolver>,
    pub pages: Arc<dyn PageStore>,
    pub gallery: Arc<GalleryLayout>,
}

impl AppContext {
    /// Wire every collaborator over an already-loaded catalog and transport.
    pub fn new(
        config: Config,
        catalog: Arc<CatalogStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let descriptors = MediaDescriptorBuilder::new(
            catalog.clone(),
            Arc::new(TemplateLinker::new(config.thumbnails.link_template.clone())),
            Arc::new(HeaderProber),
            &config,
        );
        let embeds = EmbedResolver::from_config(transport, &config);
        let gallery = GalleryLayout::new(catalog.clone(), config.gallery.clone());

        Self {
            config: Arc::new(config),
            descriptors: Arc::new(descriptors),
            embeds: Arc::new(embeds),
            pages: catalog,
            gallery: Arc::new(gallery),
        }
    }

    /// Load the catalog and build the outbound client described by `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => {
                let media_root = config
                    .catalog
                    .media_root
                    .clone()
                    .or_else(|| path.parent().map(Path::to_path_buf));
                CatalogStore::load(path, media_root)
                    .with_context(|| format!("Failed to load catalog: {:?}", path))?
            }
            None => CatalogStore::empty(),
        };

        let transport = ReqwestTransport::new(
            Duration::from_secs(config.embed.timeout_secs),
            config.embed.user_agent.as_deref(),
        )
        .context("Failed to build HTTP client")?;

        Ok(Self::new(config, Arc::new(catalog), Arc::new(transport)))
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes_api::api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext::from_config(config)?;
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
