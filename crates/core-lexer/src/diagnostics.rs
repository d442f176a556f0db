use core_text::TextSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    Hint,
    Suggestion,
    Warning,
    Error,
}

/// A message attached to a span of the lexed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub span: TextSpan,
}

/// Ordered collection of diagnostics produced by one lex pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticBag {
    items: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, level: DiagnosticLevel, message: impl Into<String>, span: TextSpan) {
        self.items.push(Diagnostic {
            level,
            message: message.into(),
            span,
        });
    }

    pub fn report_end_of_file_unexpected(&mut self, span: TextSpan) {
        self.report(DiagnosticLevel::Error, "'End of file' was unexpected.", span);
    }

    pub fn report_unexpected_token(&mut self, span: TextSpan, token: &str) {
        self.report(
            DiagnosticLevel::Error,
            format!("Unexpected token: '{token}'"),
            span,
        );
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.level == DiagnosticLevel::Error)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_helpers_are_errors() {
        let mut bag = DiagnosticBag::new();
        assert!(!bag.has_errors());
        bag.report(DiagnosticLevel::Hint, "consider", TextSpan::new(0, 1, 0));
        assert!(!bag.has_errors());
        bag.report_unexpected_token(TextSpan::new(2, 3, 0), "`");
        bag.report_end_of_file_unexpected(TextSpan::new(3, 9, 0));
        assert_eq!(bag.len(), 3);
        assert!(bag.has_errors());
        let messages: Vec<&str> = bag.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages[1], "Unexpected token: '`'");
        assert_eq!(messages[2], "'End of file' was unexpected.");
    }
}
