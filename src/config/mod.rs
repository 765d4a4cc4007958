mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    // Relative catalog paths are relative to the config file, not the cwd
    if let Some(dir) = path.parent() {
        for catalog_path in [&mut config.catalog.path, &mut config.catalog.media_root] {
            if let Some(p) = catalog_path.as_mut().filter(|p| p.is_relative()) {
                *p = dir.join(&*p);
            }
        }
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./mediabridge.toml",
        "./config.toml",
        "~/.config/mediabridge/config.toml",
        "/etc/mediabridge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let gallery = &config.gallery;
    if gallery.max_width == 0 || gallery.max_height == 0 {
        anyhow::bail!(
            "Gallery bounds must be positive (got {}x{})",
            gallery.max_width,
            gallery.max_height
        );
    }

    for (label, size) in [
        ("small", config.thumbnails.small),
        ("large", config.thumbnails.large),
    ] {
        if size.width == 0 || size.height == 0 {
            anyhow::bail!("Thumbnail size '{}' must be positive", label);
        }
    }

    reqwest::Url::parse(&config.podcast.lookup_url).with_context(|| {
        format!(
            "Podcast lookup URL is not a valid URL: {}",
            config.podcast.lookup_url
        )
    })?;

    for provider in &config.embed.providers {
        if provider.hosts.is_empty() {
            anyhow::bail!("oEmbed provider '{}' has no hosts", provider.name);
        }
        reqwest::Url::parse(&provider.endpoint).with_context(|| {
            format!("oEmbed provider '{}' has an invalid endpoint", provider.name)
        })?;
    }

    if config.preview.max_preview_width == 0 {
        tracing::warn!("max_preview_width is 0; previews will not be scaled");
    }

    match &config.catalog.path {
        Some(path) if !path.exists() => {
            tracing::warn!("Catalog file does not exist: {:?}", path);
        }
        None => tracing::warn!("No catalog configured; every asset lookup will be empty"),
        _ => {}
    }

    Ok(())
}
