//! Broken-link detection for deployed pages.
//!
//! Collects every site-relative anchor (`<a href="/...">`) from a page,
//! resolves it against the deployed base URL, and fetches each one with
//! a blocking GET. Network failures are recorded per link rather than
//! aborting the whole run.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use webfold_common::url::join_url;
use webfold_dom::DomTree;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Failure to set up the link checker itself.
///
/// Per-link failures are reported through [`LinkOutcome`] instead.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The HTTP client could not be created.
    #[error("failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result of fetching one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// The server answered with a success status.
    Ok(u16),
    /// The server answered with a non-success status.
    Failed(u16),
    /// The request itself failed (DNS, timeout, connection reset).
    Error(String),
}

impl LinkOutcome {
    /// True for links that resolved with a success status.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

/// One checked link: the resolved URL and what fetching it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkStatus {
    /// Fully resolved URL that was fetched.
    pub url: String,
    /// What the fetch produced.
    pub outcome: LinkOutcome,
}

/// Fetch every site-relative anchor in `tree`, resolved against `base_url`.
///
/// Only hrefs beginning with `/` are checked; external links and fragments
/// are the destination site's problem, not ours. Duplicate hrefs are
/// fetched once.
///
/// # Errors
///
/// Returns [`CheckError::Client`] if the HTTP client cannot be created.
pub fn check_links(tree: &DomTree, base_url: &str) -> Result<Vec<LinkStatus>, CheckError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut statuses = Vec::new();

    for id in tree.find_elements(|_, _, data| {
        data.is_tag("a") && data.attribute("href").is_some_and(|h| h.starts_with('/'))
    }) {
        let Some(href) = tree.as_element(id).and_then(|data| data.attribute("href")) else {
            continue;
        };
        if !seen.insert(href.to_string()) {
            continue;
        }

        let url = join_url(base_url, href);
        let outcome = match client.get(&url).header("User-Agent", USER_AGENT).send() {
            Ok(response) if response.status().is_success() => {
                LinkOutcome::Ok(response.status().as_u16())
            }
            Ok(response) => LinkOutcome::Failed(response.status().as_u16()),
            Err(e) => LinkOutcome::Error(e.to_string()),
        };
        statuses.push(LinkStatus { url, outcome });
    }

    Ok(statuses)
}
