//! Brace-delimited lexical scan of stylesheet text.
//!
//! A rule is any span of "no open brace, then `{`, then no close brace,
//! then `}`". The declaration block is preserved verbatim; property
//! values are never interpreted. This intentionally mirrors the legacy
//! heuristic the toolkit replaces, including its blind spots: a nested
//! at-rule like `@media` is sliced mid-block, and a selector containing a
//! brace inside a string breaks the span. Unbalanced braces simply stop
//! producing matches.

use once_cell::sync::Lazy;
use regex::Regex;

/// `selector-text { declaration-block }`, both captured lexically.
static RULE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^{]+)\{([^}]+)\}").expect("rule pattern compiles"));

/// A whole `@keyframes` block including its nested step braces, matched
/// lazily up to the first `}` pair that closes the outer block.
static KEYFRAMES_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@keyframes[\s\S]+?\}\s*\}").expect("keyframes pattern compiles"));

/// One lexically scanned rule: a raw comma-separated selector list paired
/// with its raw declaration block.
///
/// Both halves keep their source whitespace so a retained rule can be
/// re-emitted byte-compatibly with the stylesheet it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    /// The selector list text, exactly as captured (untrimmed).
    pub selectors: String,
    /// The declaration block text between the braces, verbatim.
    pub block: String,
}

impl RawRule {
    /// Re-emit the rule as `selectors{block}`.
    ///
    /// The selector list is trimmed (the lexical scan captures the
    /// whitespace separating rules); the declaration block stays
    /// verbatim. Trimming is what makes filtering idempotent: feeding a
    /// filtered stylesheet back through the filter reproduces it byte
    /// for byte.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("{}{{{}}}", self.selectors.trim(), self.block)
    }

    /// The selector groups: the selector list split on `,`, trimmed.
    #[must_use]
    pub fn selector_groups(&self) -> Vec<&str> {
        self.selectors.split(',').map(str::trim).collect()
    }
}

/// Scan stylesheet text into rules, in source order.
///
/// Malformed input degrades silently: spans that never close simply do
/// not match, so the result may be truncated or empty but the scan never
/// fails.
#[must_use]
pub fn scan_rules(css: &str) -> Vec<RawRule> {
    RULE_PATTERN
        .captures_iter(css)
        .map(|caps| RawRule {
            selectors: caps[1].to_string(),
            block: caps[2].to_string(),
        })
        .collect()
}

/// Collect every `@keyframes` block in source order, text verbatim.
#[must_use]
pub fn keyframes_blocks(css: &str) -> Vec<String> {
    KEYFRAMES_PATTERN
        .find_iter(css)
        .map(|m| m.as_str().to_string())
        .collect()
}
