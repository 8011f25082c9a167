//! Common utilities for the webfold toolkit.
//!
//! This crate provides shared infrastructure used by the other components:
//! - **Warning System** - colored, deduplicated terminal diagnostics
//! - **URL Joining** - base-URL resolution for sitemap and link checking

pub mod url;
pub mod warning;
