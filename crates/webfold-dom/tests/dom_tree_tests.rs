//! Tests for DOM tree construction, mutation, and traversal.

use webfold_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag)))
}

fn alloc_element_with_attrs(tree: &mut DomTree, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let mut map = AttributesMap::new();
    for (name, value) in attrs {
        let _ = map.insert((*name).to_string(), (*value).to_string());
    }
    tree.alloc(NodeType::Element(ElementData {
        tag_name: tag.to_string(),
        attrs: map,
    }))
}

// ========== append_child / children ==========

#[test]
fn test_append_child_sets_parent_and_order() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    tree.append_child(parent, a);
    tree.append_child(parent, b);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.parent(a), Some(parent));
    assert_eq!(tree.parent(b), Some(parent));
    assert_eq!(tree.first_child(parent), Some(a));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_positions_node() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.parent(b), Some(parent));
}

#[test]
fn test_insert_before_missing_reference_appends() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    tree.append_child(parent, a);

    let detached = alloc_element(&mut tree, "x");
    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, detached);

    assert_eq!(tree.children(parent), &[a, b]);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_detaches() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.parent(b), None);
    // Arena node stays allocated.
    assert!(tree.get(b).is_some());
}

// ========== replace_child ==========

#[test]
fn test_replace_child_keeps_position() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    let replacement = alloc_element(&mut tree, "style");
    tree.replace_child(b, replacement);

    assert_eq!(tree.children(parent), &[a, replacement, c]);
    assert_eq!(tree.parent(replacement), Some(parent));
    assert_eq!(tree.parent(b), None);
}

// ========== traversal ==========

#[test]
fn test_ancestors_walk_to_document() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    let section = alloc_element(&mut tree, "section");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);
    tree.append_child(body, section);

    let chain: Vec<NodeId> = tree.ancestors(section).collect();
    assert_eq!(chain, vec![body, html, NodeId::ROOT]);
}

#[test]
fn test_iter_all_is_document_order() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let head = alloc_element(&mut tree, "head");
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, head);
    tree.append_child(html, body);
    tree.append_child(body, p);

    let order: Vec<NodeId> = tree.iter_all().collect();
    assert_eq!(order, vec![NodeId::ROOT, html, head, body, p]);
}

#[test]
fn test_first_child_element_skips_text() {
    let mut tree = DomTree::new();
    let main = alloc_element(&mut tree, "main");
    tree.append_child(NodeId::ROOT, main);

    let text = tree.alloc(NodeType::Text("\n  ".to_string()));
    let section = alloc_element(&mut tree, "section");
    tree.append_child(main, text);
    tree.append_child(main, section);

    assert_eq!(tree.first_child_element(main), Some(section));
}

#[test]
fn test_document_element_and_body() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::Doctype("html".to_string()));
    tree.append_child(NodeId::ROOT, doctype);
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let body = alloc_element(&mut tree, "body");
    tree.append_child(html, body);

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.body(), Some(body));
}

// ========== ElementData accessors ==========

#[test]
fn test_class_list_preserves_order() {
    let mut tree = DomTree::new();
    let id = alloc_element_with_attrs(&mut tree, "div", &[("class", "hero-banner  dark wide")]);
    let element = tree.as_element(id).unwrap();

    assert_eq!(element.class_list(), vec!["hero-banner", "dark", "wide"]);
    assert!(element.has_class("dark"));
    assert!(!element.has_class("her"));
    assert!(element.class_contains("hero"));
}

#[test]
fn test_attribute_and_id_accessors() {
    let mut tree = DomTree::new();
    let id = alloc_element_with_attrs(&mut tree, "a", &[("href", "/about"), ("id", "logo")]);
    let element = tree.as_element(id).unwrap();

    assert_eq!(element.attribute("href"), Some("/about"));
    assert_eq!(element.attribute("target"), None);
    assert_eq!(element.id().map(String::as_str), Some("logo"));
    assert!(element.is_tag("A"));
}

#[test]
fn test_find_elements_predicate() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    let nav = alloc_element(&mut tree, "nav");
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);
    tree.append_child(body, nav);
    tree.append_child(body, div);

    let found = tree.find_elements(|_, _, data| data.is_tag("nav"));
    assert_eq!(found, vec![nav]);
}
