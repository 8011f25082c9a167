//! Page maintenance transformations for Webflow-exported static sites.
//!
//! # Scope
//!
//! Each module is one independent batch-fix, expressed as a pure
//! transformation over in-memory inputs that returns a structured report
//! instead of printing. File discovery, reading, and writing belong to
//! the caller (the CLI):
//!
//! - **sitemap** - emit a `sitemap.xml` document for a list of pages
//! - **links** - append `.html` to extension-less internal anchors
//! - **inject** - insert a script tag before an existing one, textually
//! - **inline** - replace critical stylesheet links with inline styles
//!   and defer non-critical scripts
//! - **check** - resolve and fetch every internal link, reporting status

/// Internal link status checking over HTTP.
pub mod check;
/// Textual script-tag injection.
pub mod inject;
/// Inlining of critical stylesheets and script deferral.
pub mod inline;
/// Internal href rewriting.
pub mod links;
/// Sitemap XML generation.
pub mod sitemap;

pub use check::{CheckError, LinkOutcome, LinkStatus, check_links};
pub use inject::inject_script_before;
pub use inline::{InlineReport, inline_critical_assets};
pub use links::add_html_extension;
pub use sitemap::{SitemapOptions, generate_sitemap};
