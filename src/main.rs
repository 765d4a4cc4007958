mod cli;

use mediabridge::{
    config,
    dimensions::{fit_box, fit_width, Dimensions},
    server::{self, AppContext},
};
use mediabridge_common::AssetId;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // CLI flags win over the config file
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting mediabridge");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediabridge=trace,mediabridge_common=debug,tower_http=debug".to_string()
        } else {
            "mediabridge=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Describe { id } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(describe(&id, cli.config.as_deref()))
        }
        Commands::Resolve { url } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(resolve(&url, cli.config.as_deref()))
        }
        Commands::Fit {
            width,
            height,
            max_width,
            max_height,
            gallery,
        } => fit(
            Dimensions::new(width, height),
            max_width,
            max_height,
            gallery,
            cli.config.as_deref(),
        ),
        Commands::Version => {
            println!("mediabridge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn describe(id: &str, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let id: AssetId = id.parse()?;

    let ctx = AppContext::from_config(config)?;
    let descriptor = ctx
        .descriptors
        .describe(id)
        .await
        .into_logged_option("describe")
        .with_context(|| format!("Asset {} not found", id))?;

    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

async fn resolve(url: &str, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let ctx = AppContext::from_config(config)?;
    let data = ctx
        .embeds
        .resolve(url)
        .await
        .into_logged_option("resolve")
        .with_context(|| format!("No embed found for {}", url))?;

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

fn fit(
    natural: Dimensions,
    max_width: Option<u32>,
    max_height: Option<u32>,
    gallery: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let fitted = if gallery {
        fit_box(
            natural,
            max_width.unwrap_or(config.gallery.max_width),
            max_height.unwrap_or(config.gallery.max_height),
        )
    } else {
        if max_height.is_some() {
            anyhow::bail!("--max-height only applies with --gallery");
        }
        fit_width(
            natural,
            max_width.unwrap_or(config.preview.max_preview_width),
        )
    };

    println!("{}x{}", fitted.width, fitted.height);
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!(
                "  Gallery bounds: {}x{}",
                config.gallery.max_width, config.gallery.max_height
            );
            println!("  Preview width: {}", config.preview.max_preview_width);
            println!("  oEmbed providers: {}", config.embed.providers.len());
            match &config.catalog.path {
                Some(catalog) => println!("  Catalog: {}", catalog.display()),
                None => println!("  Catalog: none"),
            }
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
        }
    }

    Ok(())
}
