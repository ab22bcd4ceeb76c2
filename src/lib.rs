//! Site Locale - translation layer for static sites
//!
//! Loads a translation catalog, resolves the visitor's language from the
//! saved preference, the browser locale and a default, and renders the
//! chosen language into a page through the [`i18n::RenderTarget`] trait.

pub mod config;
pub mod document;
pub mod error;
pub mod i18n;
pub mod state;

pub use config::Config;
pub use document::PageDocument;
pub use error::{AppError, AppResult};
pub use state::LocaleSession;
