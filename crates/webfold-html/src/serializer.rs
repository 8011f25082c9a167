//! Plain re-serialization of a DOM tree back to HTML text.
//!
//! [HTML § 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! This is the write-back half of the page fixups: parse, edit
//! attributes or nodes, serialize. It is NOT a pretty-printer; text nodes
//! come back verbatim, so a page that was only partially edited stays
//! close to its source. Attribute order is normalized (sorted by name)
//! because the attribute map does not preserve source order.

use webfold_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::parser::is_void_element;

/// Serialize a tree back to HTML text, starting from the document node.
#[must_use]
pub fn serialize(tree: &DomTree) -> String {
    let mut out = String::new();
    for &child in tree.children(tree.root()) {
        serialize_node(tree, child, &mut out);
    }
    out
}

/// [§ 13.3 step 2] Append the serialization of each node in tree order.
fn serialize_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else { return };

    match &node.node_type {
        NodeType::Document => {}
        NodeType::Doctype(name) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeType::Element(data) => serialize_element(tree, id, data, out),
        NodeType::Text(text) => {
            // [§ 13.3] Text inside script/style is emitted raw; everywhere
            // else the markup-significant characters are escaped.
            if parent_is_raw_text(tree, id) {
                out.push_str(text);
            } else {
                push_escaped_text(text, out);
            }
        }
        NodeType::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
    }
}

fn serialize_element(tree: &DomTree, id: NodeId, data: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&data.tag_name);

    // Sorted for deterministic output; the attribute map is unordered.
    let mut names: Vec<&String> = data.attrs.keys().collect();
    names.sort();
    for name in names {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        push_escaped_attr(&data.attrs[name], out);
        out.push('"');
    }
    out.push('>');

    // [§ 13.3 step 3] "If current node's local name is area, base, ...
    // then continue" - void elements get neither content nor an end tag.
    if is_void_element(&data.tag_name) {
        return;
    }

    for &child in tree.children(id) {
        serialize_node(tree, child, out);
    }

    out.push_str("</");
    out.push_str(&data.tag_name);
    out.push('>');
}

/// True if the node's parent element holds raw text (script/style).
fn parent_is_raw_text(tree: &DomTree, id: NodeId) -> bool {
    tree.parent(id)
        .and_then(|p| tree.as_element(p))
        .is_some_and(|e| e.is_tag("script") || e.is_tag("style"))
}

/// [§ 13.3] "Escaping a string" for text content: `&`, `<`, `>`.
fn push_escaped_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// [§ 13.3] "Escaping a string" in attribute mode: `&` and `"`.
fn push_escaped_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
