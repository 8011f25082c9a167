//! Lexical CSS rule scanning and critical-CSS extraction.
//!
//! # Scope
//!
//! This crate implements:
//! - **Rule Scanning** - a brace-delimited lexical scan of stylesheet
//!   text into (selector list, declaration block) pairs
//! - **Above-the-fold Classification** - a structural heuristic over a
//!   parsed page naming the elements assumed visible on first paint
//! - **Critical-CSS Filtering** - reduction of a stylesheet to the rules
//!   that could affect those elements, plus every `@keyframes` block
//!
//! # Deliberate Limitations
//!
//! The rule scan is a lexical approximation, not a CSS grammar. Nested
//! braces (`@media` wrapping further rules, `@keyframes` interiors) and
//! braces inside selector strings are not understood; malformed CSS with
//! unbalanced braces silently yields a truncated or empty rule list
//! rather than an error. Downstream consumers depend on this approximate
//! behavior, so it is documented here instead of being "fixed".

/// Above-the-fold classification and critical-CSS filtering.
pub mod critical;
/// Brace-delimited lexical scan of stylesheet text.
pub mod rules;

pub use critical::{CriticalSet, classify_above_fold, collect_critical_tokens, extract_critical_css, filter_rules};
pub use rules::{RawRule, keyframes_blocks, scan_rules};
