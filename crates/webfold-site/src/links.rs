//! Internal href rewriting.
//!
//! Webflow exports link between pages without file extensions
//! (`href="/about"`), which breaks static hosting that serves plain
//! files. This fixup appends `.html` to every internal anchor that needs
//! it, editing the parsed tree in place.

use webfold_dom::DomTree;

/// Append `.html` to extension-less internal anchor hrefs.
///
/// An href is rewritten when it starts with `/`, is not exactly the root
/// `/`, and does not already end in `.html`. External URLs, fragments,
/// and relative paths are left alone. Returns the number of anchors
/// rewritten; `0` means the page needs no write-back.
pub fn add_html_extension(tree: &mut DomTree) -> usize {
    let anchors = tree.find_elements(|_, _, data| {
        data.is_tag("a")
            && data
                .attribute("href")
                .is_some_and(|href| needs_extension(href))
    });

    for &id in &anchors {
        if let Some(data) = tree.as_element_mut(id) {
            if let Some(href) = data.attrs.get_mut("href") {
                href.push_str(".html");
            }
        }
    }

    anchors.len()
}

/// The rewrite predicate: internal, not the root, not already `.html`.
fn needs_extension(href: &str) -> bool {
    href.starts_with('/') && href != "/" && !href.ends_with(".html")
}

#[cfg(test)]
mod tests {
    use super::needs_extension;

    #[test]
    fn test_predicate() {
        assert!(needs_extension("/about"));
        assert!(needs_extension("/work/project"));
        assert!(!needs_extension("/"));
        assert!(!needs_extension("/about.html"));
        assert!(!needs_extension("https://example.com/about"));
        assert!(!needs_extension("#section"));
        assert!(!needs_extension("about"));
    }
}
