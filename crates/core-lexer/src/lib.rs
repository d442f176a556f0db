//! Tokenizer and decoration contracts.
//!
//! A `Lexer` turns the full text of a document into decoration spans plus
//! diagnostics. It sees only the text, never the buffer, so it can run on a
//! blocking worker while the owner keeps editing (see `service`). A
//! `DecorationMapper` resolves the tags a lexer emits to semantic class names
//! for a renderer; it must answer for every tag.
//!
//! Lexers are selected per document when a model is registered
//! (`lexer_for_extension`). The plain-text pair is the total default.

use std::fmt::Debug;
use std::sync::Arc;

use core_text::{DecorationTag, TextSpan};
use thiserror::Error;

pub mod diagnostics;
pub mod keyword;
pub mod service;

pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticLevel};
pub use keyword::{KeywordDecorationMapper, KeywordLanguage, KeywordLexer};
pub use service::{LexCompletion, LexRequest, LexService};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("lexer `{lexer}` failed: {message}")]
    Failed {
        lexer: &'static str,
        message: String,
    },
    #[error("lexer `{lexer}` task aborted before completing")]
    Aborted { lexer: &'static str },
}

/// Result of one lex pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexOutput {
    /// Spans in application order (later spans win on overlap).
    pub spans: Vec<TextSpan>,
    pub diagnostics: DiagnosticBag,
}

pub trait Lexer: Send + Sync + Debug {
    fn name(&self) -> &'static str;
    fn tokenize(&self, text: &str) -> Result<LexOutput, LexError>;
}

pub trait DecorationMapper: Send + Sync + Debug {
    fn semantic_class(&self, tag: DecorationTag) -> &'static str;
}

/// Lexer for documents without a grammar: no spans, no diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextLexer;

impl Lexer for PlainTextLexer {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn tokenize(&self, _text: &str) -> Result<LexOutput, LexError> {
        Ok(LexOutput::default())
    }
}

/// Maps every tag to `"none"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDecorationMapper;

impl DecorationMapper for DefaultDecorationMapper {
    fn semantic_class(&self, _tag: DecorationTag) -> &'static str {
        "none"
    }
}

/// A lexer with the mapper that understands its tags.
#[derive(Debug, Clone)]
pub struct LexerPair {
    pub lexer: Arc<dyn Lexer>,
    pub mapper: Arc<dyn DecorationMapper>,
}

impl Default for LexerPair {
    fn default() -> Self {
        Self::plain()
    }
}

impl LexerPair {
    pub fn plain() -> Self {
        Self {
            lexer: Arc::new(PlainTextLexer),
            mapper: Arc::new(DefaultDecorationMapper),
        }
    }
}

/// Pick a lexer pair from a file extension (without the dot).
pub fn lexer_for_extension(extension: &str) -> LexerPair {
    match extension.to_ascii_lowercase().as_str() {
        "rs" => LexerPair {
            lexer: Arc::new(KeywordLexer::rust()),
            mapper: Arc::new(KeywordDecorationMapper),
        },
        _ => LexerPair::plain(),
    }
}
