//! HTML tree construction over the `html5ever` tokenizer.
//!
//! Tokenization happens in two phases, following the flat-tape approach:
//! a [`TokenSink`] records simplified tokens, then a stack-based builder
//! turns the tape into a [`DomTree`]. Keeping the phases separate avoids
//! threading tree mutation through the sink's `&self` callbacks.

use std::cell::RefCell;

use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts, states,
};
use tendril::StrTendril;
use webfold_common::warning::warn_once;
use webfold_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

/// [HTML § 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// True if `tag` is a void element (lowercase comparison).
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

/// A simplified token recorded from the html5ever token stream.
///
/// Only what tree construction needs survives: tag names are lowercased
/// by the tokenizer, attribute order is the source order, text and
/// comments are verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    /// A start tag with its attributes, `self_closing` for `<br/>` style.
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// Attributes in source order; duplicates keep the first value.
        attrs: Vec<(String, String)>,
        /// Whether the tag was written self-closing.
        self_closing: bool,
    },
    /// An end tag.
    EndTag(String),
    /// A run of character data, verbatim (whitespace preserved so edited
    /// pages serialize close to their source).
    Text(String),
    /// A comment, without the `<!--` `-->` delimiters.
    Comment(String),
    /// A doctype declaration (name only; legacy public/system ids are
    /// dropped).
    Doctype(String),
}

/// Sink that records the token tape.
///
/// `process_token` takes `&self`, hence the borrowed `RefCell`.
struct TapeSink<'a> {
    tokens: &'a RefCell<Vec<MarkupToken>>,
}

impl TapeSink<'_> {
    fn push(&self, token: MarkupToken) {
        self.tokens.borrow_mut().push(token);
    }

    /// The tokenizer emits character data in chunks (splitting at `<` and
    /// at decoded entities); adjacent chunks merge into one text token so
    /// each run of character data becomes a single text node.
    fn push_text(&self, text: &str) {
        let mut tokens = self.tokens.borrow_mut();
        if let Some(MarkupToken::Text(existing)) = tokens.last_mut() {
            existing.push_str(text);
        } else {
            tokens.push(MarkupToken::Text(text.to_string()));
        }
    }

    fn process_tag(&self, tag: &Tag) -> TokenSinkResult<()> {
        let name = tag.name.as_ref().to_ascii_lowercase();
        match tag.kind {
            TagKind::StartTag => {
                let mut attrs: Vec<(String, String)> = Vec::with_capacity(tag.attrs.len());
                for attr in &tag.attrs {
                    let attr_name = attr.name.local.as_ref().to_ascii_lowercase();
                    // [HTML § 13.2.5.33] "if there is already an attribute on the
                    // token with the exact same name, then this is a duplicate-
                    // attribute parse error and the new attribute must be removed"
                    if attrs.iter().any(|(existing, _)| *existing == attr_name) {
                        continue;
                    }
                    attrs.push((attr_name, attr.value.to_string()));
                }
                let self_closing = tag.self_closing;
                self.push(MarkupToken::StartTag {
                    name: name.clone(),
                    attrs,
                    self_closing,
                });

                // [HTML § 13.2.5] The tokenizer must be switched into the
                // matching raw-data state for elements whose content is not
                // markup; otherwise `<style>a>b{...}</style>` would tokenize
                // as tags.
                if self_closing {
                    return TokenSinkResult::Continue;
                }
                match name.as_str() {
                    "script" => TokenSinkResult::RawData(states::RawKind::ScriptData),
                    "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                        TokenSinkResult::RawData(states::RawKind::Rawtext)
                    }
                    "title" | "textarea" => TokenSinkResult::RawData(states::RawKind::Rcdata),
                    _ => TokenSinkResult::Continue,
                }
            }
            TagKind::EndTag => {
                self.push(MarkupToken::EndTag(name));
                TokenSinkResult::Continue
            }
        }
    }
}

impl TokenSink for TapeSink<'_> {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => return self.process_tag(&tag),
            Token::CharacterTokens(text) => self.push_text(&text),
            Token::CommentToken(comment) => self.push(MarkupToken::Comment(comment.to_string())),
            Token::DoctypeToken(doctype) => {
                let name = doctype
                    .name
                    .as_ref()
                    .map_or_else(|| "html".to_string(), ToString::to_string);
                self.push(MarkupToken::Doctype(name));
            }
            Token::NullCharacterToken | Token::EOFToken | Token::ParseError(_) => {}
        }
        TokenSinkResult::Continue
    }
}

/// Tokenize HTML source into a flat token tape.
#[must_use]
pub fn tokenize(html: &str) -> Vec<MarkupToken> {
    let tokens = RefCell::new(Vec::new());
    {
        let sink = TapeSink { tokens: &tokens };
        let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
        let buffer = BufferQueue::default();
        buffer.push_back(StrTendril::from(html));
        let _ = tokenizer.feed(&buffer);
        tokenizer.end();
    }
    tokens.into_inner()
}

/// Parse HTML text into a [`DomTree`].
///
/// Tree construction is a simple stack of open elements:
/// - a start tag appends under the current insertion point and (unless
///   void or self-closing) becomes the new insertion point
/// - an end tag closes the nearest matching open element; an end tag with
///   no matching open element is dropped with a one-shot warning
/// - unclosed elements at end of input are closed implicitly
///
/// Malformed markup therefore degrades to a partial tree instead of
/// failing; callers never see an error from parsing.
#[must_use]
pub fn parse(html: &str) -> DomTree {
    build_tree(&tokenize(html))
}

/// Build a [`DomTree`] from a token tape.
#[must_use]
pub fn build_tree(tokens: &[MarkupToken]) -> DomTree {
    let mut tree = DomTree::new();
    // Stack of open elements; the document node is the sentinel bottom.
    let mut open: Vec<(NodeId, String)> = vec![(NodeId::ROOT, String::new())];

    for token in tokens {
        let insertion_point = open.last().map_or(NodeId::ROOT, |(id, _)| *id);
        match token {
            MarkupToken::StartTag {
                name,
                attrs,
                self_closing,
            } => {
                let mut map = AttributesMap::new();
                for (attr_name, value) in attrs {
                    let _ = map.insert(attr_name.clone(), value.clone());
                }
                let id = tree.alloc(NodeType::Element(ElementData {
                    tag_name: name.clone(),
                    attrs: map,
                }));
                tree.append_child(insertion_point, id);
                if !*self_closing && !is_void_element(name) {
                    open.push((id, name.clone()));
                }
            }
            MarkupToken::EndTag(name) => {
                // Find the nearest matching open element (skip the sentinel).
                let matching = open
                    .iter()
                    .skip(1)
                    .rposition(|(_, open_name)| open_name == name)
                    .map(|idx| idx + 1);
                match matching {
                    Some(idx) => open.truncate(idx),
                    None => warn_once("HTML", &format!("dropped unmatched </{name}> end tag")),
                }
            }
            MarkupToken::Text(text) => {
                let id = tree.alloc(NodeType::Text(text.clone()));
                tree.append_child(insertion_point, id);
            }
            MarkupToken::Comment(comment) => {
                let id = tree.alloc(NodeType::Comment(comment.clone()));
                tree.append_child(insertion_point, id);
            }
            MarkupToken::Doctype(name) => {
                let id = tree.alloc(NodeType::Doctype(name.clone()));
                tree.append_child(insertion_point, id);
            }
        }
    }

    tree
}
