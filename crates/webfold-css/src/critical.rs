//! Above-the-fold classification and critical-CSS filtering.
//!
//! The extractor is a pure function from one page's markup and one
//! stylesheet's text to a smaller stylesheet fragment: the rules needed
//! to render the content assumed visible before scrolling. Classification
//! is structural (tags and class naming conventions of a Webflow export),
//! not measured against a real viewport, and errs on the side of keeping
//! too much: a retained rule is always emitted whole, and `@keyframes`
//! blocks are always retained because animations are assumed load-bearing
//! for perceived performance.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use webfold_dom::{DomTree, ElementData, NodeId};

use crate::rules::{keyframes_blocks, scan_rules};

/// `.class` tokens inside a selector group: word characters and hyphens
/// following a full stop.
static CLASS_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.([\w-]+)").expect("class token pattern compiles"));

/// `#id` tokens inside a selector group.
static ID_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([\w-]+)").expect("id token pattern compiles"));

/// Class tokens that mark navigation/header chrome when matched exactly.
const CHROME_CLASSES: &[&str] = &["nav", "navbar", "header", "banner"];

/// Class tokens that mark branding elements when matched exactly.
const BRAND_CLASSES: &[&str] = &["preloader-content", "brand", "logo"];

/// The set of critical tokens collected from above-the-fold elements:
/// lowercased tag names, class tokens verbatim, and `#id` strings.
///
/// Accumulation is order-independent and tokens are never attributed back
/// to the element that contributed them - once a class is in the set it
/// stays in, even if only one contributing element was a false positive.
pub type CriticalSet = HashSet<String>;

/// Classify the elements assumed visible above the fold.
///
/// An element qualifies when ANY of these structural classes hold:
/// 1. its tag is `header` or `nav`;
/// 2. it carries a class token exactly equal to `nav`, `navbar`,
///    `header`, or `banner`;
/// 3. any of its class tokens contains the substring `hero`;
/// 4. it is the first element child of the first `main` element;
/// 5. it carries class token `preloader-content`, `brand`, or `logo`,
///    or id `logo`.
///
/// The result is deduplicated and happens to be in document order, but
/// callers must not rely on ordering - it is a set.
#[must_use]
pub fn classify_above_fold(tree: &DomTree) -> Vec<NodeId> {
    let mut matched = tree.find_elements(|_, _, data| {
        is_chrome_element(data) || is_hero_element(data) || is_brand_element(data)
    });

    let mut seen: HashSet<NodeId> = matched.iter().copied().collect();
    if let Some(first) = first_main_child(tree) {
        if seen.insert(first) {
            matched.push(first);
        }
    }

    matched
}

/// Structural class 1 and 2: header/nav tags and chrome class tokens.
fn is_chrome_element(data: &ElementData) -> bool {
    data.is_tag("header")
        || data.is_tag("nav")
        || CHROME_CLASSES.iter().any(|c| data.has_class(c))
}

/// Structural class 3: partial `hero` class match.
fn is_hero_element(data: &ElementData) -> bool {
    data.class_contains("hero")
}

/// Structural class 5: branding classes and the `logo` id.
fn is_brand_element(data: &ElementData) -> bool {
    BRAND_CLASSES.iter().any(|c| data.has_class(c))
        || data.id().is_some_and(|id| id == "logo")
}

/// Structural class 4: the first element child of the first `main`
/// element (position, not class).
fn first_main_child(tree: &DomTree) -> Option<NodeId> {
    let main = tree
        .find_elements(|_, _, data| data.is_tag("main"))
        .first()
        .copied()?;
    tree.first_child_element(main)
}

/// Collect the identifying tokens of the classified elements.
///
/// Per element: the lowercased tag name, each class token verbatim, and
/// `#<id>` when an id is present. Then the ancestor chain up to (but
/// excluding) the document node contributes every ancestor's class
/// tokens, capturing styling that depends on a critical element's
/// container context (a hero's enclosing section wrapper, for example).
#[must_use]
pub fn collect_critical_tokens(tree: &DomTree, elements: &[NodeId]) -> CriticalSet {
    let mut tokens = CriticalSet::new();

    for &id in elements {
        let Some(data) = tree.as_element(id) else {
            continue;
        };
        let _ = tokens.insert(data.tag_name.to_ascii_lowercase());
        for class in data.class_list() {
            let _ = tokens.insert(class.to_string());
        }
        if let Some(element_id) = data.id() {
            let _ = tokens.insert(format!("#{element_id}"));
        }

        // Ancestor context; the synthetic document node contributes
        // nothing (it has no element data).
        for ancestor in tree.ancestors(id) {
            if let Some(ancestor_data) = tree.as_element(ancestor) {
                for class in ancestor_data.class_list() {
                    let _ = tokens.insert(class.to_string());
                }
            }
        }
    }

    tokens
}

/// Filter stylesheet text down to the rules matching the critical tokens.
///
/// A rule is retained when ANY of its comma-separated selector groups
/// satisfies ANY of:
/// - the group's lowercased, trimmed text equals a token exactly (this is
///   how bare tag selectors match, case-insensitively);
/// - any `.class` token in the group is in the set (case-sensitive);
/// - any `#id` token in the group, as the literal `#id` string, is in
///   the set.
///
/// A retained rule is emitted whole - other non-matching groups in the
/// same rule come along, never split off. Independently, every
/// `@keyframes` block is appended unconditionally. Pieces are
/// newline-joined in source order; empty or unmatchable input yields the
/// empty string, never an error.
#[must_use]
pub fn filter_rules(css: &str, tokens: &CriticalSet) -> String {
    let mut pieces: Vec<String> = Vec::new();

    for rule in scan_rules(css) {
        let retained = rule
            .selector_groups()
            .into_iter()
            .any(|group| group_matches(group, tokens));
        if retained {
            pieces.push(rule.to_css());
        }
    }

    // Keyframes are unconditionally critical, even if the selector pass
    // already captured part of them by accident.
    pieces.extend(keyframes_blocks(css));

    pieces.join("\n")
}

/// One selector group against the critical token set.
fn group_matches(group: &str, tokens: &CriticalSet) -> bool {
    if tokens.contains(&group.to_ascii_lowercase()) {
        return true;
    }
    if CLASS_TOKEN
        .captures_iter(group)
        .any(|caps| tokens.contains(&caps[1]))
    {
        return true;
    }
    ID_TOKEN
        .captures_iter(group)
        .any(|caps| tokens.contains(&format!("#{}", &caps[1])))
}

/// The whole pipeline: classify, collect, filter.
///
/// Pure over its inputs: the tree is never mutated and the result is a
/// new text blob suitable for inlining in a `<style>` element or writing
/// to a file. Safe to run concurrently over independent pages.
#[must_use]
pub fn extract_critical_css(tree: &DomTree, css: &str) -> String {
    let elements = classify_above_fold(tree);
    let tokens = collect_critical_tokens(tree, &elements);
    filter_rules(css, &tokens)
}
