//! Sitemap generation tests.

use chrono::NaiveDate;
use webfold_site::{SitemapOptions, generate_sitemap};

fn options() -> SitemapOptions {
    SitemapOptions {
        base_url: "https://example.com".to_string(),
        lastmod: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    }
}

#[test]
fn test_sitemap_contains_every_page() {
    let pages = vec!["index.html".to_string(), "about.html".to_string()];
    let xml = generate_sitemap(&options(), &pages);

    assert!(xml.contains("<loc>https://example.com/</loc>"));
    assert!(xml.contains("<loc>https://example.com/about.html</loc>"));
    assert_eq!(xml.matches("<url>").count(), 2);
}

#[test]
fn test_sitemap_root_priority_is_highest() {
    let pages = vec!["index.html".to_string(), "about.html".to_string()];
    let xml = generate_sitemap(&options(), &pages);

    let root_entry = xml
        .split("<url>")
        .find(|entry| entry.contains("<loc>https://example.com/</loc>"))
        .unwrap();
    assert!(root_entry.contains("<priority>1.0</priority>"));

    let about_entry = xml
        .split("<url>")
        .find(|entry| entry.contains("about.html"))
        .unwrap();
    assert!(about_entry.contains("<priority>0.8</priority>"));
}

#[test]
fn test_sitemap_lastmod_format() {
    let xml = generate_sitemap(&options(), &["index.html".to_string()]);
    assert!(xml.contains("<lastmod>2024-03-01</lastmod>"));
}

#[test]
fn test_sitemap_nested_index_collapses_to_directory() {
    let xml = generate_sitemap(&options(), &["blog/index.html".to_string()]);
    assert!(xml.contains("<loc>https://example.com/blog/</loc>"));
}

#[test]
fn test_sitemap_only_collapses_index_file_name() {
    // A page that merely ends in "index.html" is a page of its own.
    let xml = generate_sitemap(&options(), &["reindex.html".to_string()]);
    assert!(xml.contains("<loc>https://example.com/reindex.html</loc>"));
}

#[test]
fn test_sitemap_strips_leading_dot_slash() {
    let xml = generate_sitemap(&options(), &["./contact.html".to_string()]);
    assert!(xml.contains("<loc>https://example.com/contact.html</loc>"));
}

#[test]
fn test_sitemap_is_valid_urlset_document() {
    let xml = generate_sitemap(&options(), &["index.html".to_string()]);
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
    assert!(xml.trim_end().ends_with("</urlset>"));
}

#[test]
fn test_sitemap_escapes_special_characters_in_loc() {
    let xml = generate_sitemap(&options(), &["terms&conditions.html".to_string()]);
    assert!(xml.contains("terms&amp;conditions.html"));
}

#[test]
fn test_sitemap_empty_page_list() {
    let xml = generate_sitemap(&options(), &[]);
    assert_eq!(xml.matches("<url>").count(), 0);
    assert!(xml.contains("<urlset"));
}
