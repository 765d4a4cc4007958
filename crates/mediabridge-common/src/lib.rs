//! mediabridge-common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across mediabridge:
//!
//! - **Typed IDs**: Numeric wrappers for assets and pages
//! - **File classification**: Application categories and type descriptions by extension
//! - **Resolution**: The `Found` / `NotFound` outcome used by every lookup
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use mediabridge_common::{AssetId, FileCategory, Resolution};
//! use mediabridge_common::files::category_for;
//!
//! let id: AssetId = "42".parse().unwrap();
//! assert_eq!(id.get(), 42);
//!
//! assert_eq!(category_for("photo.JPG", None), Some(FileCategory::Image));
//!
//! let found: Resolution<u32> = Resolution::Found(7);
//! assert_eq!(found.into_option(), Some(7));
//! ```

pub mod error;
pub mod files;
pub mod ids;
pub mod resolution;

pub use error::{Error, Result};
pub use files::FileCategory;
pub use ids::*;
pub use resolution::{Miss, Resolution};
