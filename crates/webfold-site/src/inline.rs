//! Inlining of critical stylesheets and script deferral.
//!
//! A page that links a pre-built critical stylesheet
//! (`<link rel="stylesheet" href="css/critical.css">`) loads faster with
//! that CSS inlined into a `<style>` element; every other external
//! script can be deferred. The stylesheet text comes from a caller
//! supplied resolver so this module stays free of file I/O.

use serde::Serialize;
use webfold_dom::{DomTree, ElementData, NodeType};

/// What [`inline_critical_assets`] did to a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InlineReport {
    /// Stylesheet links replaced by inline `<style>` elements.
    pub inlined_stylesheets: usize,
    /// External scripts that gained a `defer` attribute.
    pub deferred_scripts: usize,
}

impl InlineReport {
    /// True if the page was modified and needs writing back.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.inlined_stylesheets > 0 || self.deferred_scripts > 0
    }
}

/// Inline critical stylesheets and defer non-critical scripts.
///
/// - Every `<link rel="stylesheet">` whose href contains `critical` is
///   replaced in place by a `<style>` element holding the text
///   `resolver(href)` returns. A resolver miss (stylesheet not found)
///   leaves that link untouched.
/// - Every `<script src>` whose src does not contain `critical` gains
///   `defer="defer"`.
pub fn inline_critical_assets<R>(tree: &mut DomTree, resolver: R) -> InlineReport
where
    R: Fn(&str) -> Option<String>,
{
    let mut report = InlineReport::default();

    let critical_links = tree.find_elements(|_, _, data| {
        data.is_tag("link")
            && data.attribute("rel") == Some("stylesheet")
            && data.attribute("href").is_some_and(|h| h.contains("critical"))
    });

    for &link in &critical_links {
        let Some(href) = tree
            .as_element(link)
            .and_then(|data| data.attribute("href"))
            .map(ToString::to_string)
        else {
            continue;
        };
        let Some(css) = resolver(&href) else { continue };

        let style = tree.alloc(NodeType::Element(ElementData::new("style")));
        let text = tree.alloc(NodeType::Text(css));
        tree.append_child(style, text);
        tree.replace_child(link, style);
        report.inlined_stylesheets += 1;
    }

    let deferrable = tree.find_elements(|_, _, data| {
        data.is_tag("script")
            && data
                .attribute("src")
                .is_some_and(|src| !src.contains("critical"))
            && data.attribute("defer").is_none()
    });

    for &script in &deferrable {
        if let Some(data) = tree.as_element_mut(script) {
            let _ = data.attrs.insert("defer".to_string(), "defer".to_string());
            report.deferred_scripts += 1;
        }
    }

    report
}
