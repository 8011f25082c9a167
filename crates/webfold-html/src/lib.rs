//! HTML parsing and re-serialization for the webfold toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenization** via the `html5ever` tokenizer (the markup parser is
//!   an external collaborator; we drive it with a small [`TokenSink`]
//!   that records a flat token tape)
//! - **Tree Construction** - a stack-of-open-elements builder that turns
//!   the tape into a [`webfold_dom::DomTree`]
//! - **Serialization** - plain text output of an (edited) tree, suitable
//!   for writing a page back to disk
//!
//! # Not Implemented
//!
//! - The full WHATWG tree-construction algorithm (insertion modes, foster
//!   parenting, the adoption agency). Malformed markup degrades to
//!   whatever partial tree the simple builder recovers; that is an
//!   accepted behavior of the toolkit, not an error.
//! - Pretty-printing. Output is a faithful re-serialization only.
//!
//! [`TokenSink`]: html5ever::tokenizer::TokenSink

/// Tree construction from the html5ever token stream.
pub mod parser;
/// Plain re-serialization of a DOM tree back to HTML text.
pub mod serializer;

pub use parser::{MarkupToken, parse, tokenize};
pub use serializer::serialize;
