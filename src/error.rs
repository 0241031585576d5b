//! Parse errors.
//!
//! One error type covers all four failure classes: lexical errors latched
//! by the scanner, token mismatches in the parser, early scope errors, and
//! the JSON sub-printer's rejections. Every error carries the byte span of
//! the offending input; `Display` renders the flat one-line message and
//! [`ParseError::display_with_source`] renders a line/caret diagnostic for
//! terminals.

use std::fmt;

use crate::style::Style;
use crate::token::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    // Lexical
    UnexpectedByte(u8),
    UnterminatedString,
    UnterminatedTemplate,
    UnterminatedComment,
    UnterminatedRegexp,
    InvalidEscape,
    InvalidUnicodeEscape,
    /// `what` names the numeric form: "hexadecimal", "binary", "octal".
    InvalidNumber { what: &'static str },

    // Syntactic
    Unexpected {
        found: String,
        context: &'static str,
    },
    Expected {
        expected: Vec<&'static str>,
        found: String,
        context: &'static str,
    },

    // Early errors
    DuplicateDeclaration { name: String },
    DuplicateExport { name: String },
    InvalidAssignTarget,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    pub fn offset(&self) -> usize {
        self.span.start
    }

    /// Renders the error with its source line and a caret underline.
    pub fn display_with_source(&self, source: &str) -> String {
        let (line_num, line_start, line_content) = self.find_context(source);
        let col = self.span.start.saturating_sub(line_start);
        let len = (self.span.end.saturating_sub(self.span.start)).max(1);
        let underline = format!("{}{}", " ".repeat(col), "^".repeat(len));

        format!(
            "{}: {}\n\n{} {} {}\n     {} {}",
            Style::bold_red("error"),
            self,
            Style::blue(&format!("{:4}", line_num)),
            Style::blue("|"),
            line_content,
            Style::blue("|"),
            Style::red(&underline),
        )
    }

    fn find_context<'a>(&self, source: &'a str) -> (usize, usize, &'a str) {
        let mut line_num = 1;
        let mut line_start = 0;

        for (i, c) in source.char_indices() {
            if i >= self.span.start {
                break;
            }
            if c == '\n' {
                line_num += 1;
                line_start = i + 1;
            }
        }

        let line_end = source[line_start..]
            .find('\n')
            .map(|off| line_start + off)
            .unwrap_or(source.len());

        (line_num, line_start, &source[line_start..line_end])
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseErrorKind::*;
        match &self.kind {
            UnexpectedByte(b) => {
                if b.is_ascii_graphic() {
                    write!(f, "unexpected '{}'", *b as char)?;
                } else {
                    write!(f, "unexpected byte 0x{:02x}", b)?;
                }
            }
            UnterminatedString => write!(f, "unexpected end of string literal")?,
            UnterminatedTemplate => write!(f, "unexpected end of template literal")?,
            UnterminatedComment => write!(f, "unexpected end of comment")?,
            UnterminatedRegexp => write!(f, "unexpected end of regular expression")?,
            InvalidEscape => write!(f, "unexpected escape sequence")?,
            InvalidUnicodeEscape => write!(f, "unexpected unicode escape sequence")?,
            InvalidNumber { what } => write!(f, "unexpected digits in {} number", what)?,
            Unexpected { found, context } => {
                write!(f, "unexpected {} in {}", found, context)?;
            }
            Expected {
                expected,
                found,
                context,
            } => {
                write!(f, "expected ")?;
                for (i, e) in expected.iter().enumerate() {
                    if i > 0 {
                        if i == expected.len() - 1 {
                            write!(f, " or ")?;
                        } else {
                            write!(f, ", ")?;
                        }
                    }
                    write!(f, "'{}'", e)?;
                }
                write!(f, " instead of {} in {}", found, context)?;
            }
            DuplicateDeclaration { name } => {
                write!(f, "identifier '{}' has already been declared", name)?;
            }
            DuplicateExport { name } => {
                write!(f, "duplicate export of '{}'", name)?;
            }
            InvalidAssignTarget => write!(f, "invalid assignment target")?,
        }
        write!(f, " at offset {}", self.span.start)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_message_lists_alternatives() {
        let err = ParseError::new(
            ParseErrorKind::Expected {
                expected: vec![";", "}"],
                found: "identifier 'a'".to_string(),
                context: "expression statement",
            },
            Span::new(4, 5),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("expected ';' or '}'"), "{}", msg);
        assert!(msg.contains("instead of identifier 'a'"), "{}", msg);
        assert!(msg.contains("in expression statement"), "{}", msg);
        assert!(msg.contains("at offset 4"), "{}", msg);
    }

    #[test]
    fn unexpected_message_has_context_and_offset() {
        let err = ParseError::new(
            ParseErrorKind::Unexpected {
                found: "')'".to_string(),
                context: "if statement",
            },
            Span::at(9),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("unexpected"), "{}", msg);
        assert!(msg.contains("in if statement at offset 9"), "{}", msg);
    }

    #[test]
    fn display_with_source_underlines_the_span() {
        let source = "let x = ;";
        let err = ParseError::new(
            ParseErrorKind::Unexpected {
                found: "';'".to_string(),
                context: "variable declaration",
            },
            Span::new(8, 9),
        );
        let shown = err.display_with_source(source);
        assert!(shown.contains("let x = ;"), "{}", shown);
        assert!(shown.contains("^"), "{}", shown);
        assert!(shown.contains("\x1b[31m"), "should be colored: {}", shown);
    }

    #[test]
    fn display_with_source_finds_later_lines() {
        let source = "let a = 1\nlet b = !\nlet c = 3";
        let err = ParseError::new(
            ParseErrorKind::Unexpected {
                found: "'!'".to_string(),
                context: "expression",
            },
            Span::new(18, 19),
        );
        let shown = err.display_with_source(source);
        assert!(shown.contains("let b = !"), "{}", shown);
        assert!(!shown.contains("let c"), "{}", shown);
    }
}
