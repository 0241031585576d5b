//! Streaming scanner for ECMAScript 2020.
//!
//! The lexer pulls bytes from [`Source`] and emits one `(TokenType, slice)`
//! pair per call to [`Lexer::next`]. Whitespace, line terminators, and
//! comments are real tokens: the parser needs them for automatic semicolon
//! insertion, and concatenating every emitted slice reproduces the input
//! byte for byte.
//!
//! Two pieces of state make the grammar lexable:
//!
//! - a stack of brace levels at which a template literal is waiting for its
//!   continuation, so `` `a${ {b:1} }c` `` resumes the template at the right
//!   closing brace;
//! - the previous token's start offset, so the parser can ask for a `/` or
//!   `/=` token to be re-scanned as a regular expression once it knows an
//!   expression is expected ([`Lexer::rescan_as_regexp`]).
//!
//! The first lexical error latches: every later call returns the error
//! token again without consuming input.

use crate::error::{ParseError, ParseErrorKind};
use crate::keywords::keyword_token;
use crate::source::Source;
use crate::token::{Span, TokenType};
use crate::unicode;

pub struct Lexer<'s> {
    source: Source<'s>,
    err: Option<ParseError>,
    /// Current `{` nesting depth.
    level: usize,
    /// Brace levels with an open template awaiting `}` continuation.
    templates: Vec<usize>,
    /// Start offset of the most recently returned token.
    token_start: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(input: &'s str) -> Self {
        Lexer {
            source: Source::new(input),
            err: None,
            level: 0,
            templates: Vec::new(),
            token_start: 0,
        }
    }

    /// First lexical error, if any. Stays set once latched.
    pub fn err(&self) -> Option<&ParseError> {
        self.err.as_ref()
    }

    /// Absolute byte offset of the read head.
    pub fn offset(&self) -> usize {
        self.source.offset()
    }

    fn latch(&mut self, kind: ParseErrorKind, start: usize) -> (TokenType, &'s str) {
        if self.err.is_none() {
            self.err = Some(ParseError::new(
                kind,
                Span::new(start, self.source.offset().max(start + 1)),
            ));
        }
        (TokenType::Error, "")
    }

    /// Scans the next token. At end of input returns [`TokenType::Eof`];
    /// after a lexical error keeps returning [`TokenType::Error`].
    pub fn next(&mut self) -> (TokenType, &'s str) {
        if self.err.is_some() {
            return (TokenType::Error, "");
        }
        self.token_start = self.source.offset();
        self.source.skip();

        let c = self.source.peek(0);
        let tt = match c {
            0 if self.source.is_eof() => return (TokenType::Eof, ""),
            b' ' | b'\t' | 0x0b | 0x0c => self.consume_whitespace(),
            b'\n' | b'\r' => self.consume_line_terminators(),
            b'/' => match self.source.peek(1) {
                b'/' => self.consume_line_comment(),
                b'*' => match self.consume_block_comment() {
                    Ok(tt) => tt,
                    Err(kind) => return self.latch(kind, self.token_start),
                },
                b'=' => {
                    self.source.move_by(2);
                    TokenType::DivEq
                }
                _ => {
                    self.source.move_by(1);
                    TokenType::Div
                }
            },
            b'"' | b'\'' => match self.consume_string() {
                Ok(()) => TokenType::String,
                Err(kind) => return self.latch(kind, self.token_start),
            },
            b'`' => {
                self.templates.push(self.level);
                match self.consume_template(true) {
                    Ok(tt) => tt,
                    Err(kind) => return self.latch(kind, self.token_start),
                }
            }
            b'0'..=b'9' => match self.consume_number() {
                Ok(tt) => tt,
                Err(kind) => return self.latch(kind, self.token_start),
            },
            b'.' => {
                if self.source.peek(1).is_ascii_digit() {
                    match self.consume_number() {
                        Ok(tt) => tt,
                        Err(kind) => return self.latch(kind, self.token_start),
                    }
                } else if self.source.peek(1) == b'.' && self.source.peek(2) == b'.' {
                    self.source.move_by(3);
                    TokenType::Ellipsis
                } else {
                    self.source.move_by(1);
                    TokenType::Dot
                }
            }
            b'{' => {
                self.level += 1;
                self.source.move_by(1);
                TokenType::OpenBrace
            }
            b'}' => {
                if self.level > 0 {
                    self.level -= 1;
                }
                if self.templates.last() == Some(&self.level) {
                    match self.consume_template(false) {
                        Ok(tt) => tt,
                        Err(kind) => return self.latch(kind, self.token_start),
                    }
                } else {
                    self.source.move_by(1);
                    TokenType::CloseBrace
                }
            }
            _ => {
                if unicode::is_id_start_byte(c) || c == b'\\' {
                    match self.consume_identifier() {
                        Ok(tt) => tt,
                        Err(kind) => return self.latch(kind, self.token_start),
                    }
                } else if c < 0x80 {
                    match self.consume_punctuator(c) {
                        Some(tt) => tt,
                        None => {
                            return self.latch(
                                ParseErrorKind::UnexpectedByte(c),
                                self.token_start,
                            )
                        }
                    }
                } else {
                    match self.source.peek_rune(0) {
                        Some((r, _)) if unicode::is_space(r) => self.consume_whitespace(),
                        Some((r, _)) if unicode::is_line_terminator(r) => {
                            self.consume_line_terminators()
                        }
                        Some((r, _)) if unicode::is_id_start(r) => {
                            match self.consume_identifier() {
                                Ok(tt) => tt,
                                Err(kind) => return self.latch(kind, self.token_start),
                            }
                        }
                        _ => {
                            return self.latch(
                                ParseErrorKind::UnexpectedByte(c),
                                self.token_start,
                            )
                        }
                    }
                }
            }
        };
        (tt, self.source.shift())
    }

    /// Re-reads the `/` or `/=` token just returned as a regular expression
    /// literal. On failure the lexer latches and returns the error token.
    pub fn rescan_as_regexp(&mut self) -> (TokenType, &'s str) {
        if self.err.is_some() {
            return (TokenType::Error, "");
        }
        let start = self.token_start;
        self.source.rewind(start);
        self.source.skip();
        self.source.move_by(1); // the opening '/'

        let mut in_class = false;
        loop {
            let c = self.source.peek(0);
            match c {
                0 if self.source.is_eof() => {
                    return self.latch(ParseErrorKind::UnterminatedRegexp, start)
                }
                b'\n' | b'\r' => {
                    return self.latch(ParseErrorKind::UnterminatedRegexp, start)
                }
                b'\\' => {
                    self.source.move_by(1);
                    match self.source.peek_rune(0) {
                        None => return self.latch(ParseErrorKind::UnterminatedRegexp, start),
                        Some((r, _)) if unicode::is_line_terminator(r) => {
                            return self.latch(ParseErrorKind::UnterminatedRegexp, start)
                        }
                        Some((_, n)) => self.source.move_by(n as isize),
                    }
                }
                b'[' => {
                    in_class = true;
                    self.source.move_by(1);
                }
                b']' => {
                    in_class = false;
                    self.source.move_by(1);
                }
                b'/' if !in_class => {
                    self.source.move_by(1);
                    break;
                }
                _ if c < 0x80 => self.source.move_by(1),
                _ => match self.source.peek_rune(0) {
                    Some((r, _)) if unicode::is_line_terminator(r) => {
                        return self.latch(ParseErrorKind::UnterminatedRegexp, start)
                    }
                    Some((_, n)) => self.source.move_by(n as isize),
                    None => return self.latch(ParseErrorKind::UnterminatedRegexp, start),
                },
            }
        }
        // Flags are identifier-continue characters.
        loop {
            let c = self.source.peek(0);
            if unicode::is_id_continue_byte(c) && c != b'\\' {
                self.source.move_by(1);
            } else if c >= 0x80 {
                match self.source.peek_rune(0) {
                    Some((r, n)) if unicode::is_id_continue(r) => {
                        self.source.move_by(n as isize)
                    }
                    _ => break,
                }
            } else {
                break;
            }
        }
        (TokenType::Regexp, self.source.shift())
    }

    fn consume_whitespace(&mut self) -> TokenType {
        loop {
            let c = self.source.peek(0);
            match c {
                b' ' | b'\t' | 0x0b | 0x0c => self.source.move_by(1),
                _ if c >= 0x80 => match self.source.peek_rune(0) {
                    Some((r, n)) if unicode::is_space(r) => self.source.move_by(n as isize),
                    _ => break,
                },
                _ => break,
            }
        }
        TokenType::Whitespace
    }

    fn consume_line_terminators(&mut self) -> TokenType {
        loop {
            match self.source.peek(0) {
                b'\r' => {
                    if self.source.peek(1) == b'\n' {
                        self.source.move_by(2);
                    } else {
                        self.source.move_by(1);
                    }
                }
                b'\n' => self.source.move_by(1),
                c if c >= 0x80 => match self.source.peek_rune(0) {
                    Some((r, n)) if unicode::is_line_terminator(r) => {
                        self.source.move_by(n as isize)
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        TokenType::LineTerminator
    }

    fn consume_line_comment(&mut self) -> TokenType {
        self.source.move_by(2);
        loop {
            let c = self.source.peek(0);
            if c == 0 && self.source.is_eof() {
                break;
            }
            if c == b'\n' || c == b'\r' {
                break;
            }
            if c >= 0x80 {
                match self.source.peek_rune(0) {
                    Some((r, _)) if unicode::is_line_terminator(r) => break,
                    Some((_, n)) => self.source.move_by(n as isize),
                    None => break,
                }
            } else {
                self.source.move_by(1);
            }
        }
        TokenType::Comment
    }

    fn consume_block_comment(&mut self) -> Result<TokenType, ParseErrorKind> {
        self.source.move_by(2);
        let mut has_line_terminator = false;
        loop {
            let c = self.source.peek(0);
            if c == 0 && self.source.is_eof() {
                return Err(ParseErrorKind::UnterminatedComment);
            }
            if c == b'*' && self.source.peek(1) == b'/' {
                self.source.move_by(2);
                break;
            }
            if c == b'\n' || c == b'\r' {
                has_line_terminator = true;
                self.source.move_by(1);
            } else if c >= 0x80 {
                match self.source.peek_rune(0) {
                    Some((r, n)) => {
                        if unicode::is_line_terminator(r) {
                            has_line_terminator = true;
                        }
                        self.source.move_by(n as isize);
                    }
                    None => return Err(ParseErrorKind::UnterminatedComment),
                }
            } else {
                self.source.move_by(1);
            }
        }
        Ok(if has_line_terminator {
            TokenType::CommentLineTerminator
        } else {
            TokenType::Comment
        })
    }

    /// Scans an identifier, reclassifying it as a keyword unless it used a
    /// unicode escape.
    fn consume_identifier(&mut self) -> Result<TokenType, ParseErrorKind> {
        let mut has_escape = false;
        let mut first = true;
        loop {
            let c = self.source.peek(0);
            if c == b'\\' {
                has_escape = true;
                self.source.move_by(1);
                self.consume_unicode_escape()?;
            } else if unicode::is_id_continue_byte(c) {
                if first && !unicode::is_id_start_byte(c) {
                    return Err(ParseErrorKind::UnexpectedByte(c));
                }
                self.source.move_by(1);
            } else if c >= 0x80 {
                match self.source.peek_rune(0) {
                    Some((r, n))
                        if (first && unicode::is_id_start(r))
                            || (!first && unicode::is_id_continue(r)) =>
                    {
                        self.source.move_by(n as isize)
                    }
                    _ => break,
                }
            } else {
                break;
            }
            first = false;
        }
        if has_escape {
            Ok(TokenType::Identifier)
        } else {
            Ok(keyword_token(self.source.lexeme()))
        }
    }

    /// Consumes `u{XXXXXX}` or `uXXXX` after a backslash.
    fn consume_unicode_escape(&mut self) -> Result<(), ParseErrorKind> {
        if self.source.peek(0) != b'u' {
            return Err(ParseErrorKind::InvalidUnicodeEscape);
        }
        self.source.move_by(1);
        if self.source.peek(0) == b'{' {
            self.source.move_by(1);
            let mut digits = 0;
            let mut value: u32 = 0;
            while self.source.peek(0).is_ascii_hexdigit() {
                value = value.saturating_mul(16)
                    + (self.source.peek(0) as char).to_digit(16).unwrap_or(0);
                self.source.move_by(1);
                digits += 1;
            }
            if digits == 0 || value > 0x10ffff || self.source.peek(0) != b'}' {
                return Err(ParseErrorKind::InvalidUnicodeEscape);
            }
            self.source.move_by(1);
        } else {
            for _ in 0..4 {
                if !self.source.peek(0).is_ascii_hexdigit() {
                    return Err(ParseErrorKind::InvalidUnicodeEscape);
                }
                self.source.move_by(1);
            }
        }
        Ok(())
    }

    fn consume_number(&mut self) -> Result<TokenType, ParseErrorKind> {
        let mut has_fraction = false;
        let mut has_exponent = false;

        if self.source.peek(0) == b'.' {
            // `.5` — the caller checked a digit follows.
            has_fraction = true;
            self.source.move_by(1);
            while self.source.peek(0).is_ascii_digit() {
                self.source.move_by(1);
            }
        } else if self.source.peek(0) == b'0' {
            self.source.move_by(1);
            match self.source.peek(0) {
                b'x' | b'X' => return self.consume_radix_digits("hexadecimal"),
                b'b' | b'B' => return self.consume_radix_digits("binary"),
                b'o' | b'O' => return self.consume_radix_digits("octal"),
                _ => {}
            }
            while self.source.peek(0).is_ascii_digit() {
                self.source.move_by(1);
            }
        } else {
            while self.source.peek(0).is_ascii_digit() {
                self.source.move_by(1);
            }
        }

        if !has_fraction && self.source.peek(0) == b'.' {
            // A trailing `5.` still belongs to the number; only `e` without
            // digits is pushed back below.
            has_fraction = true;
            self.source.move_by(1);
            while self.source.peek(0).is_ascii_digit() {
                self.source.move_by(1);
            }
        }

        if self.source.peek(0) == b'e' || self.source.peek(0) == b'E' {
            let mark = self.source.mark();
            self.source.move_by(1);
            if self.source.peek(0) == b'+' || self.source.peek(0) == b'-' {
                self.source.move_by(1);
            }
            if self.source.peek(0).is_ascii_digit() {
                has_exponent = true;
                while self.source.peek(0).is_ascii_digit() {
                    self.source.move_by(1);
                }
            } else {
                // `1e` with no digits: the `e` starts the next token.
                self.source.rewind(mark);
            }
        }

        Ok(if has_fraction || has_exponent {
            TokenType::Decimal
        } else {
            TokenType::Integer
        })
    }

    fn consume_radix_digits(
        &mut self,
        what: &'static str,
    ) -> Result<TokenType, ParseErrorKind> {
        self.source.move_by(1); // the radix marker
        let accept: fn(u8) -> bool = match what {
            "hexadecimal" => |b| b.is_ascii_hexdigit(),
            "binary" => |b| b == b'0' || b == b'1',
            _ => |b| (b'0'..=b'7').contains(&b),
        };
        let mut digits = 0;
        while accept(self.source.peek(0)) {
            self.source.move_by(1);
            digits += 1;
        }
        if digits == 0 {
            return Err(ParseErrorKind::InvalidNumber { what });
        }
        Ok(match what {
            "hexadecimal" => TokenType::Hexadecimal,
            "binary" => TokenType::Binary,
            _ => TokenType::Octal,
        })
    }

    fn consume_string(&mut self) -> Result<(), ParseErrorKind> {
        let quote = self.source.peek(0);
        self.source.move_by(1);
        loop {
            let c = self.source.peek(0);
            if c == 0 && self.source.is_eof() {
                return Err(ParseErrorKind::UnterminatedString);
            }
            if c == quote {
                self.source.move_by(1);
                return Ok(());
            }
            match c {
                b'\n' | b'\r' => return Err(ParseErrorKind::UnterminatedString),
                b'\\' => {
                    self.source.move_by(1);
                    self.consume_string_escape()?;
                }
                _ if c >= 0x80 => match self.source.peek_rune(0) {
                    Some((r, _)) if unicode::is_line_terminator(r) => {
                        return Err(ParseErrorKind::UnterminatedString)
                    }
                    Some((_, n)) => self.source.move_by(n as isize),
                    None => return Err(ParseErrorKind::UnterminatedString),
                },
                _ => self.source.move_by(1),
            }
        }
    }

    fn consume_string_escape(&mut self) -> Result<(), ParseErrorKind> {
        let c = self.source.peek(0);
        if c == 0 && self.source.is_eof() {
            return Err(ParseErrorKind::UnterminatedString);
        }
        match c {
            b'\r' => {
                // Line continuation; `\r\n` counts as one terminator.
                self.source.move_by(1);
                if self.source.peek(0) == b'\n' {
                    self.source.move_by(1);
                }
            }
            b'\n' => self.source.move_by(1),
            b'x' => {
                self.source.move_by(1);
                for _ in 0..2 {
                    if !self.source.peek(0).is_ascii_hexdigit() {
                        return Err(ParseErrorKind::InvalidEscape);
                    }
                    self.source.move_by(1);
                }
            }
            b'u' => self.consume_unicode_escape()?,
            b'0' => {
                self.source.move_by(1);
                if self.source.peek(0).is_ascii_digit() {
                    return Err(ParseErrorKind::InvalidEscape);
                }
            }
            _ if c >= 0x80 => match self.source.peek_rune(0) {
                // `\` before a line terminator is a line continuation.
                Some((_, n)) => self.source.move_by(n as isize),
                None => return Err(ParseErrorKind::UnterminatedString),
            },
            _ => self.source.move_by(1),
        }
        Ok(())
    }

    /// Scans a template part starting at `` ` `` (head) or at the `}` that
    /// resumes a suspended template (middle/tail).
    fn consume_template(&mut self, head: bool) -> Result<TokenType, ParseErrorKind> {
        self.source.move_by(1); // '`' or '}'
        loop {
            let c = self.source.peek(0);
            if c == 0 && self.source.is_eof() {
                return Err(ParseErrorKind::UnterminatedTemplate);
            }
            match c {
                b'`' => {
                    self.source.move_by(1);
                    self.templates.pop();
                    return Ok(if head {
                        TokenType::Template
                    } else {
                        TokenType::TemplateEnd
                    });
                }
                b'$' if self.source.peek(1) == b'{' => {
                    self.source.move_by(2);
                    self.level += 1;
                    return Ok(if head {
                        TokenType::TemplateStart
                    } else {
                        TokenType::TemplateMiddle
                    });
                }
                b'\\' => {
                    self.source.move_by(1);
                    match self.source.peek_rune(0) {
                        Some((_, n)) => self.source.move_by(n as isize),
                        None => return Err(ParseErrorKind::UnterminatedTemplate),
                    }
                }
                _ => self.source.move_by(1),
            }
        }
    }

    fn consume_punctuator(&mut self, c: u8) -> Option<TokenType> {
        use TokenType::*;
        let (tt, n) = match c {
            b'(' => (OpenParen, 1),
            b')' => (CloseParen, 1),
            b'[' => (OpenBracket, 1),
            b']' => (CloseBracket, 1),
            b';' => (Semicolon, 1),
            b',' => (Comma, 1),
            b':' => (Colon, 1),
            b'~' => (BitNot, 1),
            b'?' => match (self.source.peek(1), self.source.peek(2)) {
                (b'?', _) => (Nullish, 2),
                // `?.5` is a conditional with a decimal, not optional chaining.
                (b'.', d) if !d.is_ascii_digit() => (OptChain, 2),
                _ => (Question, 1),
            },
            b'=' => match (self.source.peek(1), self.source.peek(2)) {
                (b'=', b'=') => (EqEqEq, 3),
                (b'=', _) => (EqEq, 2),
                (b'>', _) => (Arrow, 2),
                _ => (Eq, 1),
            },
            b'!' => match (self.source.peek(1), self.source.peek(2)) {
                (b'=', b'=') => (NotEqEq, 3),
                (b'=', _) => (NotEq, 2),
                _ => (Not, 1),
            },
            b'<' => match (self.source.peek(1), self.source.peek(2)) {
                (b'<', b'=') => (LtLtEq, 3),
                (b'<', _) => (LtLt, 2),
                (b'=', _) => (LtEq, 2),
                _ => (Lt, 1),
            },
            b'>' => match (
                self.source.peek(1),
                self.source.peek(2),
                self.source.peek(3),
            ) {
                (b'>', b'>', b'=') => (GtGtGtEq, 4),
                (b'>', b'>', _) => (GtGtGt, 3),
                (b'>', b'=', _) => (GtGtEq, 3),
                (b'>', _, _) => (GtGt, 2),
                (b'=', _, _) => (GtEq, 2),
                _ => (Gt, 1),
            },
            b'+' => match self.source.peek(1) {
                b'+' => (Incr, 2),
                b'=' => (AddEq, 2),
                _ => (Add, 1),
            },
            b'-' => match self.source.peek(1) {
                b'-' => (Decr, 2),
                b'=' => (SubEq, 2),
                _ => (Sub, 1),
            },
            b'*' => match (self.source.peek(1), self.source.peek(2)) {
                (b'*', b'=') => (ExpEq, 3),
                (b'*', _) => (Exp, 2),
                (b'=', _) => (MulEq, 2),
                _ => (Mul, 1),
            },
            b'%' => match self.source.peek(1) {
                b'=' => (ModEq, 2),
                _ => (Mod, 1),
            },
            b'&' => match (self.source.peek(1), self.source.peek(2)) {
                (b'&', _) => (And, 2),
                (b'=', _) => (BitAndEq, 2),
                _ => (BitAnd, 1),
            },
            b'|' => match (self.source.peek(1), self.source.peek(2)) {
                (b'|', _) => (Or, 2),
                (b'=', _) => (BitOrEq, 2),
                _ => (BitOr, 1),
            },
            b'^' => match self.source.peek(1) {
                b'=' => (BitXorEq, 2),
                _ => (BitXor, 1),
            },
            _ => return None,
        };
        self.source.move_by(n);
        Some(tt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tokens(input: &str) -> Vec<(TokenType, &str)> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let (tt, data) = lexer.next();
            if tt == TokenType::Eof || tt == TokenType::Error {
                break;
            }
            out.push((tt, data));
        }
        out
    }

    fn kinds(input: &str) -> Vec<TokenType> {
        all_tokens(input).into_iter().map(|(tt, _)| tt).collect()
    }

    /// Non-whitespace, non-comment kinds.
    fn code_kinds(input: &str) -> Vec<TokenType> {
        kinds(input)
            .into_iter()
            .filter(|tt| {
                !matches!(
                    tt,
                    TokenType::Whitespace
                        | TokenType::LineTerminator
                        | TokenType::Comment
                        | TokenType::CommentLineTerminator
                )
            })
            .collect()
    }

    #[test]
    fn slices_concatenate_to_input() {
        let input = "var x = 1 + /* note */ 2;\n// done\nlet s = 'a\\'b'";
        let mut joined = String::new();
        for (_, data) in all_tokens(input) {
            joined.push_str(data);
        }
        assert_eq!(joined, input);
    }

    #[test]
    fn keywords_are_reclassified() {
        assert_eq!(
            code_kinds("var let of foo"),
            vec![
                TokenType::Var,
                TokenType::Let,
                TokenType::Of,
                TokenType::Identifier
            ]
        );
    }

    #[test]
    fn escaped_keyword_stays_identifier() {
        assert_eq!(code_kinds("\\u0076ar"), vec![TokenType::Identifier]);
    }

    #[test]
    fn numeric_forms_scan_as_single_tokens() {
        for input in ["0", "0.", ".0", "0x0", "0b0", "0o0", "1e1", "1e+1", "1e-1"] {
            let toks = all_tokens(input);
            assert_eq!(toks.len(), 1, "{:?} tokenized as {:?}", input, toks);
            assert!(toks[0].0.is_numeric(), "{:?} -> {:?}", input, toks[0].0);
            assert_eq!(toks[0].1, input);
        }
    }

    #[test]
    fn integer_vs_decimal() {
        assert_eq!(kinds("5"), vec![TokenType::Integer]);
        assert_eq!(kinds("5.0"), vec![TokenType::Decimal]);
        assert_eq!(kinds("5e3"), vec![TokenType::Decimal]);
        assert_eq!(kinds("0x1f"), vec![TokenType::Hexadecimal]);
    }

    #[test]
    fn exponent_without_digits_is_pushed_back() {
        assert_eq!(
            kinds("1e"),
            vec![TokenType::Integer, TokenType::Identifier]
        );
        let toks = all_tokens("1e");
        assert_eq!(toks[0].1, "1");
        assert_eq!(toks[1].1, "e");
    }

    #[test]
    fn hex_without_digits_is_an_error() {
        let mut lexer = Lexer::new("0x");
        let (tt, _) = lexer.next();
        assert_eq!(tt, TokenType::Error);
        assert!(lexer.err().is_some());
    }

    #[test]
    fn line_terminator_variants_coalesce() {
        for input in ["\r", "\n", "\r\n", "\u{2028}", "\u{2029}"] {
            assert_eq!(kinds(input), vec![TokenType::LineTerminator], "{:?}", input);
        }
        assert_eq!(kinds("\r\n\n\u{2028}"), vec![TokenType::LineTerminator]);
    }

    #[test]
    fn block_comment_with_newline_counts_as_line_terminator() {
        assert_eq!(kinds("/*a*/"), vec![TokenType::Comment]);
        assert_eq!(kinds("/*a\nb*/"), vec![TokenType::CommentLineTerminator]);
        assert_eq!(
            kinds("/*a\u{2028}b*/"),
            vec![TokenType::CommentLineTerminator]
        );
    }

    #[test]
    fn line_comment_closes_at_eof() {
        let mut lexer = Lexer::new("// trailing");
        let (tt, data) = lexer.next();
        assert_eq!(tt, TokenType::Comment);
        assert_eq!(data, "// trailing");
        assert_eq!(lexer.next().0, TokenType::Eof);
        assert!(lexer.err().is_none());
    }

    #[test]
    fn unterminated_string_latches() {
        let mut lexer = Lexer::new("'abc");
        assert_eq!(lexer.next().0, TokenType::Error);
        assert_eq!(lexer.next().0, TokenType::Error);
        assert!(lexer.err().is_some());
    }

    #[test]
    fn string_with_line_continuation() {
        assert_eq!(kinds("'a\\\nb'"), vec![TokenType::String]);
        let mut lexer = Lexer::new("'a\nb'");
        assert_eq!(lexer.next().0, TokenType::Error);
    }

    #[test]
    fn null_escape_followed_by_digit_is_rejected() {
        assert_eq!(kinds("'\\0'"), vec![TokenType::String]);
        let mut lexer = Lexer::new("'\\01'");
        assert_eq!(lexer.next().0, TokenType::Error);
    }

    #[test]
    fn template_without_substitution() {
        assert_eq!(kinds("`abc`"), vec![TokenType::Template]);
    }

    #[test]
    fn template_with_substitution_tracks_braces() {
        assert_eq!(
            code_kinds("`a${ {b: 1} }c`"),
            vec![
                TokenType::TemplateStart,
                TokenType::OpenBrace,
                TokenType::Identifier,
                TokenType::Colon,
                TokenType::Integer,
                TokenType::CloseBrace,
                TokenType::TemplateEnd,
            ]
        );
    }

    #[test]
    fn nested_templates() {
        assert_eq!(
            code_kinds("`a${`b${c}d`}e`"),
            vec![
                TokenType::TemplateStart,
                TokenType::TemplateStart,
                TokenType::Identifier,
                TokenType::TemplateEnd,
                TokenType::TemplateEnd,
            ]
        );
    }

    #[test]
    fn template_middle_between_substitutions() {
        assert_eq!(
            code_kinds("`a${x}b${y}c`"),
            vec![
                TokenType::TemplateStart,
                TokenType::Identifier,
                TokenType::TemplateMiddle,
                TokenType::Identifier,
                TokenType::TemplateEnd,
            ]
        );
    }

    #[test]
    fn slash_lexes_as_division_by_default() {
        assert_eq!(
            code_kinds("a / b"),
            vec![TokenType::Identifier, TokenType::Div, TokenType::Identifier]
        );
        assert_eq!(
            code_kinds("a /= b"),
            vec![
                TokenType::Identifier,
                TokenType::DivEq,
                TokenType::Identifier
            ]
        );
    }

    #[test]
    fn rescan_turns_division_into_regexp() {
        let mut lexer = Lexer::new("/[a-z/]/g");
        assert_eq!(lexer.next().0, TokenType::Div);
        let (tt, data) = lexer.rescan_as_regexp();
        assert_eq!(tt, TokenType::Regexp);
        assert_eq!(data, "/[a-z/]/g");
    }

    #[test]
    fn rescan_handles_div_eq_prefix() {
        let mut lexer = Lexer::new("/=a/ ");
        assert_eq!(lexer.next().0, TokenType::DivEq);
        let (tt, data) = lexer.rescan_as_regexp();
        assert_eq!(tt, TokenType::Regexp);
        assert_eq!(data, "/=a/");
    }

    #[test]
    fn rescan_rejects_line_terminator_in_body() {
        let mut lexer = Lexer::new("/ab\ncd/");
        assert_eq!(lexer.next().0, TokenType::Div);
        assert_eq!(lexer.rescan_as_regexp().0, TokenType::Error);
    }

    #[test]
    fn punctuator_maximal_munch() {
        assert_eq!(
            code_kinds("a >>>= b >>> c >> d >= e"),
            vec![
                TokenType::Identifier,
                TokenType::GtGtGtEq,
                TokenType::Identifier,
                TokenType::GtGtGt,
                TokenType::Identifier,
                TokenType::GtGt,
                TokenType::Identifier,
                TokenType::GtEq,
                TokenType::Identifier,
            ]
        );
    }

    #[test]
    fn optional_chain_vs_conditional_decimal() {
        assert_eq!(
            code_kinds("a?.b"),
            vec![
                TokenType::Identifier,
                TokenType::OptChain,
                TokenType::Identifier
            ]
        );
        assert_eq!(
            code_kinds("a?.5:b"),
            vec![
                TokenType::Identifier,
                TokenType::Question,
                TokenType::Decimal,
                TokenType::Colon,
                TokenType::Identifier
            ]
        );
    }

    #[test]
    fn unicode_identifier() {
        assert_eq!(kinds("héllo"), vec![TokenType::Identifier]);
        assert_eq!(all_tokens("héllo")[0].1, "héllo");
    }

    #[test]
    fn unicode_whitespace_coalesces() {
        assert_eq!(
            kinds("a\u{a0}\u{2003}b"),
            vec![
                TokenType::Identifier,
                TokenType::Whitespace,
                TokenType::Identifier
            ]
        );
    }

    #[test]
    fn empty_input_is_eof() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next().0, TokenType::Eof);
        assert!(lexer.err().is_none());
    }
}
