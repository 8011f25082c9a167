//! Arena-based DOM tree for the webfold toolkit.
//!
//! This crate provides the typed Element abstraction the page fixups and
//! the critical-CSS extractor operate on, loosely following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships: O(1) access, no borrow checker fights, and cheap
//! ancestor walks. Sibling order is carried entirely by each node's
//! `children` vector; there are no explicit sibling links. Removal
//! detaches a node but never deallocates it (the arena only grows for the
//! lifetime of one parsed page).

use std::collections::{HashMap, HashSet};

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A single node in the tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document... and parent (null or an
/// element)."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// `None` for the document node and for detached nodes.
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// Children in document order.
    pub children: Vec<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    /// The synthetic root; never produced by markup.
    Document,
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    /// A doctype declaration, kept so edited pages serialize faithfully.
    Doctype(String),
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// Element-specific data: local name plus attribute list.
///
/// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
///
/// The tag name is stored as the tokenizer produced it (lowercased for
/// HTML content); comparisons still go through `eq_ignore_ascii_case` so
/// hand-built trees with mixed-case names behave.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Construct an element with no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attrs: AttributesMap::new(),
        }
    }

    /// Returns the element's id attribute value if present.
    ///
    /// [HTML § 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes)
    #[must_use]
    pub fn id(&self) -> Option<&String> {
        self.attrs.get("id")
    }

    /// Look up any attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns the class tokens in attribute order.
    ///
    /// [HTML § 3.2.6](https://html.spec.whatwg.org/multipage/dom.html#global-attributes)
    /// "The class attribute, if specified, must have a value that is a set
    /// of space-separated tokens."
    #[must_use]
    pub fn class_list(&self) -> Vec<&str> {
        match self.attrs.get("class") {
            Some(classlist) => classlist.split_ascii_whitespace().collect(),
            None => Vec::new(),
        }
    }

    /// Returns the class tokens as a set, for membership queries.
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        self.class_list().into_iter().collect()
    }

    /// True if the class attribute contains `token` exactly.
    #[must_use]
    pub fn has_class(&self, token: &str) -> bool {
        self.class_list().iter().any(|c| *c == token)
    }

    /// True if any class token contains `needle` as a substring.
    ///
    /// Used for the `[class*="hero"]`-style partial matches the
    /// above-the-fold heuristic needs.
    #[must_use]
    pub fn class_contains(&self, needle: &str) -> bool {
        self.class_list().iter().any(|c| c.contains(needle))
    }

    /// Case-insensitive tag name comparison.
    #[must_use]
    pub fn is_tag(&self, name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(name)
    }
}

/// Arena-based DOM tree with O(1) node access.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
/// "The DOM represents a document as a tree."
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes ever allocated, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
        };
        DomTree {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of allocated nodes (attached or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true; the Document is always there).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `node` into `parent`'s children immediately before
    /// `reference`. Falls back to appending if `reference` is not a child
    /// of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: NodeId) {
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference);
        match position {
            Some(idx) => self.nodes[parent.0].children.insert(idx, node),
            None => self.nodes[parent.0].children.push(node),
        }
        self.nodes[node.0].parent = Some(parent);
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detaches `child` from `parent`. The node stays allocated in the
    /// arena but is no longer reachable from the root.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.retain(|&c| c != child);
        self.nodes[child.0].parent = None;
    }

    /// [§ 4.2.5 Replace](https://dom.spec.whatwg.org/#concept-node-replace)
    ///
    /// Replaces `old` with `new` in `old`'s parent, keeping the position.
    /// No-op if `old` is detached.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) {
        let Some(parent) = self.parent(old) else {
            return;
        };
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == old);
        if let Some(idx) = position {
            self.nodes[parent.0].children[idx] = new;
            self.nodes[new.0].parent = Some(parent);
            self.nodes[old.0].parent = None;
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the first child of a node that is an element, skipping text
    /// and comment nodes.
    ///
    /// The above-the-fold heuristic uses this for `main > *:first-child`.
    #[must_use]
    pub fn first_child_element(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.as_element(c).is_some())
    }

    /// Iterate over all ancestors of a node, from parent to the document
    /// node inclusive.
    ///
    /// [§ 4.2.6 Ancestor](https://dom.spec.whatwg.org/#concept-tree-ancestor)
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [HTML § 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// The first element child of the document node, `<html>` in a
    /// well-formed page. `None` over a tree with no elements at all.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.first_child_element(NodeId::ROOT)
    }

    /// [HTML § 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// The first `body` (or `frameset`) child of the document element.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .find(|&&id| {
                self.as_element(id)
                    .is_some_and(|e| e.is_tag("body") || e.is_tag("frameset"))
            })
            .copied()
    }

    /// Iterate over every node reachable from the root, in document order.
    #[must_use]
    pub fn iter_all(&self) -> DocumentOrderIterator<'_> {
        DocumentOrderIterator {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Collect every element node (in document order) satisfying the
    /// predicate.
    #[must_use]
    pub fn find_elements<P>(&self, mut predicate: P) -> Vec<NodeId>
    where
        P: FnMut(&DomTree, NodeId, &ElementData) -> bool,
    {
        self.iter_all()
            .filter(|&id| {
                self.as_element(id)
                    .is_some_and(|data| predicate(self, id, data))
            })
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node, parent first.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Depth-first, document-order iterator over reachable nodes.
pub struct DocumentOrderIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DocumentOrderIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Push children reversed so the first child pops first.
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
