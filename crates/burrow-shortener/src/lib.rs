//! URL shortener service implementation.
//!
//! This crate ties URL validation, code generation and a [`Repository`]
//! together behind the [`Shortener`] trait. Core types are re-exported from
//! `burrow_core`.
//!
//! [`Repository`]: burrow_core::Repository

pub mod service;
pub mod settings;

pub use burrow_core::{Shortener, ShortenerError, UrlRecord};
pub use service::ShortenerService;
pub use settings::ShortenerSettings;
