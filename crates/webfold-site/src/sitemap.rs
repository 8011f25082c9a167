//! Sitemap XML generation.
//!
//! [Sitemaps XML format](https://www.sitemaps.org/protocol.html)
//!
//! Takes the list of page paths the caller discovered (relative to the
//! site root, e.g. `about.html`, `work/project.html`) and the configured
//! base URL, and emits one `<url>` entry per page. The home page gets
//! priority `1.0`, everything else `0.8`, matching how the export's
//! original deployment weighted them.

use chrono::NaiveDate;
use webfold_common::url::join_url;

/// Per-run configuration for sitemap generation.
///
/// No module-level constants: the base URL and the `<lastmod>` date are
/// explicit inputs so the operation stays a pure text transformation.
#[derive(Debug, Clone)]
pub struct SitemapOptions {
    /// Production base URL, e.g. `https://example.com/`.
    pub base_url: String,
    /// Date stamped into every `<lastmod>` element.
    pub lastmod: NaiveDate,
}

/// Generate sitemap XML for the given page paths.
///
/// Normalization per page path:
/// - a leading `./` is stripped
/// - `index.html` collapses to its directory (`work/index.html` becomes
///   `work/`, the root `index.html` becomes the bare base URL)
/// - anything else is joined onto the base URL as-is
///
/// Entries come out in input order; the caller decides ordering by
/// ordering its page list.
#[must_use]
pub fn generate_sitemap(options: &SitemapOptions, pages: &[String]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    let lastmod = options.lastmod.format("%Y-%m-%d").to_string();

    for page in pages {
        let rel_path = normalize_page_path(page);
        let loc = join_url(&options.base_url, rel_path);
        let priority = if rel_path.is_empty() { "1.0" } else { "0.8" };

        xml.push_str("  <url>\n");
        xml.push_str("    <loc>");
        push_escaped_xml(&loc, &mut xml);
        xml.push_str("</loc>\n");
        xml.push_str("    <lastmod>");
        xml.push_str(&lastmod);
        xml.push_str("</lastmod>\n");
        xml.push_str("    <priority>");
        xml.push_str(priority);
        xml.push_str("</priority>\n");
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Strip `./` and collapse `index.html` to its directory.
///
/// `work/index.html` becomes `work/`; the root `index.html` becomes the
/// empty path, which joins back to the bare base URL. Only the file name
/// `index.html` collapses; a page like `reindex.html` is left alone.
fn normalize_page_path(page: &str) -> &str {
    let page = page.strip_prefix("./").unwrap_or(page);
    if page == "index.html" {
        return "";
    }
    // Keep the directory's trailing slash: `blog/index.html` -> `blog/`.
    page.strip_suffix("/index.html")
        .map_or(page, |dir| &page[..dir.len() + 1])
}

/// Minimal XML escaping for `<loc>` content.
fn push_escaped_xml(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
