//! Data models for the parish site.
//!
//! Field names serialize in camelCase to match the web client.

mod content;
mod donation;
mod meta;
mod slide;

pub use content::*;
pub use donation::*;
pub use meta::*;
pub use slide::*;
