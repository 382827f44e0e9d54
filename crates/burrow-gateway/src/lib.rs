//! HTTP gateway for the Burrow URL shortener.
//!
//! Exposes the [`Shortener`](burrow_core::Shortener) operations as a small
//! JSON API plus the short-link redirect itself.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
