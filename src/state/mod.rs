//! State management module for Site Locale
//!
//! This module contains the page-lifetime state organized by concern:
//! - `preference`: Persisted language choice and its durable storage
//! - `selector`: Language selector binding
//! - `session`: Root session owning catalog, page and preferences

mod preference;
mod selector;
mod session;

pub use preference::*;
pub use selector::*;
pub use session::*;
