//! mediabridge - media and embed metadata for block-based content editors
//!
//! The library crate exposes the resolvers and the HTTP router for
//! integration testing and embedding.

pub mod assets;
pub mod config;
pub mod descriptor;
pub mod dimensions;
pub mod embed;
pub mod gallery;
pub mod server;
pub mod transport;
