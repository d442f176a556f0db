//! Reference keyword lexer.
//!
//! Recognises keywords, line comments, quoted strings and decimal numbers for
//! a configurable language description. It is not a grammar: anything it does
//! not recognise is left undecorated. Span offsets are character offsets so
//! they line up with buffer cells.

use std::collections::HashSet;

use core_text::{DECORATION_NONE, DecorationTag, TextSpan};
use tracing::trace;

use crate::diagnostics::DiagnosticBag;
use crate::{DecorationMapper, LexError, LexOutput, Lexer};

pub const TAG_KEYWORD: DecorationTag = 1;
pub const TAG_COMMENT: DecorationTag = 2;
pub const TAG_STRING: DecorationTag = 3;
pub const TAG_NUMBER: DecorationTag = 4;

/// Language rules consumed by `KeywordLexer`.
#[derive(Debug, Clone)]
pub struct KeywordLanguage {
    pub name: &'static str,
    pub keywords: HashSet<&'static str>,
    pub line_comment: &'static str,
    pub string_quote: char,
    /// Characters reported as unexpected tokens.
    pub rejected: &'static [char],
}

impl KeywordLanguage {
    pub fn rust() -> Self {
        Self {
            name: "rust",
            keywords: [
                "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else",
                "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop",
                "match", "mod", "move", "mut", "pub", "ref", "return", "self", "Self",
                "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where",
                "while",
            ]
            .into_iter()
            .collect(),
            line_comment: "//",
            string_quote: '"',
            rejected: &['`'],
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeywordLexer {
    language: KeywordLanguage,
}

impl KeywordLexer {
    pub fn new(language: KeywordLanguage) -> Self {
        Self { language }
    }

    pub fn rust() -> Self {
        Self::new(KeywordLanguage::rust())
    }

    fn starts_with_at(chars: &[char], at: usize, pat: &str) -> bool {
        !pat.is_empty()
            && pat
                .chars()
                .enumerate()
                .all(|(k, p)| chars.get(at + k) == Some(&p))
    }
}

fn is_row_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

impl Lexer for KeywordLexer {
    fn name(&self) -> &'static str {
        self.language.name
    }

    fn tokenize(&self, text: &str) -> Result<LexOutput, LexError> {
        let chars: Vec<char> = text.chars().collect();
        let mut spans = Vec::new();
        let mut diagnostics = DiagnosticBag::new();
        let lang = &self.language;
        let mut i = 0usize;
        while i < chars.len() {
            let c = chars[i];
            if Self::starts_with_at(&chars, i, lang.line_comment) {
                let start = i;
                while i < chars.len() && !is_row_break(chars[i]) {
                    i += 1;
                }
                spans.push(TextSpan::new(start, i, TAG_COMMENT));
            } else if c == lang.string_quote {
                let start = i;
                i += 1;
                let mut closed = false;
                while i < chars.len() {
                    match chars[i] {
                        '\\' => i += 2,
                        q if q == lang.string_quote => {
                            i += 1;
                            closed = true;
                            break;
                        }
                        _ => i += 1,
                    }
                }
                let end = i.min(chars.len());
                i = end;
                spans.push(TextSpan::new(start, end, TAG_STRING));
                if !closed {
                    diagnostics.report_end_of_file_unexpected(TextSpan::new(
                        start,
                        end,
                        DECORATION_NONE,
                    ));
                }
            } else if c.is_ascii_digit() {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                spans.push(TextSpan::new(start, i, TAG_NUMBER));
            } else if c.is_alphabetic() || c == '_' {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if lang.keywords.contains(word.as_str()) {
                    spans.push(TextSpan::new(start, i, TAG_KEYWORD));
                }
            } else {
                if lang.rejected.contains(&c) {
                    diagnostics.report_unexpected_token(
                        TextSpan::new(i, i + 1, DECORATION_NONE),
                        &c.to_string(),
                    );
                }
                i += 1;
            }
        }
        trace!(target: "lexer", lexer = lang.name, chars = chars.len(), spans = spans.len(), diagnostics = diagnostics.len(), "tokenized");
        Ok(LexOutput { spans, diagnostics })
    }
}

/// Class names for the tags `KeywordLexer` emits; unknown tags map to
/// `"none"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordDecorationMapper;

impl DecorationMapper for KeywordDecorationMapper {
    fn semantic_class(&self, tag: DecorationTag) -> &'static str {
        match tag {
            TAG_KEYWORD => "keyword",
            TAG_COMMENT => "comment",
            TAG_STRING => "string",
            TAG_NUMBER => "number",
            _ => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans(text: &str) -> Vec<(usize, usize, DecorationTag)> {
        KeywordLexer::rust()
            .tokenize(text)
            .unwrap()
            .spans
            .into_iter()
            .map(|s| (s.start, s.end, s.decoration))
            .collect()
    }

    #[test]
    fn keywords_comments_numbers() {
        assert_eq!(
            spans("let x = 42; // hi\nfn"),
            vec![
                (0, 3, TAG_KEYWORD),
                (8, 10, TAG_NUMBER),
                (12, 17, TAG_COMMENT),
                (18, 20, TAG_KEYWORD),
            ]
        );
    }

    #[test]
    fn identifiers_containing_keywords_are_plain() {
        assert!(spans("letter fnord").is_empty());
    }

    #[test]
    fn offsets_are_character_offsets() {
        assert_eq!(spans("é fn"), vec![(2, 4, TAG_KEYWORD)]);
    }

    #[test]
    fn strings_with_escapes() {
        assert_eq!(spans(r#"a "b\"c" d"#), vec![(2, 8, TAG_STRING)]);
    }

    #[test]
    fn unterminated_string_reports_end_of_file() {
        let out = KeywordLexer::rust().tokenize("x \"abc").unwrap();
        assert_eq!(out.spans, vec![TextSpan::new(2, 6, TAG_STRING)]);
        assert_eq!(out.diagnostics.len(), 1);
        assert!(out.diagnostics.has_errors());
        // Trailing escape must not run past the end.
        let out = KeywordLexer::rust().tokenize("\"\\").unwrap();
        assert_eq!(out.spans, vec![TextSpan::new(0, 2, TAG_STRING)]);
    }

    #[test]
    fn rejected_character_is_diagnosed() {
        let out = KeywordLexer::rust().tokenize("a ` b").unwrap();
        let d: Vec<_> = out.diagnostics.iter().collect();
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].span.start, 2);
    }

    #[test]
    fn mapper_is_total() {
        let m = KeywordDecorationMapper;
        assert_eq!(m.semantic_class(TAG_STRING), "string");
        for tag in 0..=u8::MAX {
            assert!(!m.semantic_class(tag).is_empty());
        }
    }
}
