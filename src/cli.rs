use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediabridge")]
#[command(author, version, about = "Media and embed metadata service for block editors")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Print the descriptor the editor would receive for an asset
    Describe {
        /// Asset id
        id: String,
    },

    /// Resolve a URL into embed data
    Resolve {
        /// Page URL to embed
        url: String,
    },

    /// Compute a clamped size without touching any asset
    Fit {
        width: u32,
        height: u32,

        /// Width bound (defaults to the preview or gallery width from config)
        #[arg(long)]
        max_width: Option<u32>,

        /// Height bound, gallery mode only
        #[arg(long)]
        max_height: Option<u32>,

        /// Use the two-bound gallery clamp instead of the preview clamp
        #[arg(long)]
        gallery: bool,
    },

    /// Display version information
    Version,
}
