//! Internationalization (i18n) module for Site Locale
//!
//! This module contains the translation pipeline organized by stage:
//! - `catalog`: Two-level `locale -> key -> text` data model
//! - `loader`: Single-shot async fetch of the translation resource
//! - `resolver`: Fallback chain choosing the initial locale
//! - `render`: Applying a locale to a render target

mod catalog;
mod loader;
mod render;
mod resolver;

pub use catalog::*;
pub use loader::*;
pub use render::*;
pub use resolver::*;
