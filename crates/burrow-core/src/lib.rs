//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the data model, URL validation and the traits shared
//! by the storage, shortener and gateway crates.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;
pub mod validation;

pub use error::{ShortenerError, StorageError};
pub use repository::{Insertion, ReadRepository, Repository, UrlRecord};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
pub use validation::{is_valid_url, normalize_url};
