//! JSON re-emission for the value subset of the expression grammar.
//!
//! Accepted forms: `null`, `true`, `false`, numeric and string literals,
//! substitution-free templates, arrays of accepted forms, and object
//! literals whose properties are plain non-computed key/value pairs.
//! Numeric negation and the minified `!0`/`!1` idioms are folded. Strings
//! are normalised to double quotes with JSON escape sequences. Anything
//! else is rejected, with the offending sub-expression rendered as
//! JavaScript for diagnosis.

use std::fmt::{self, Write};

use crate::ast::expr::{Expr, Property, PropertyKey};
use crate::ast::stmt::Stmt;
use crate::ast::vars::VarTable;
use crate::ast::Ast;
use crate::printer::JsPrinter;
use crate::token::TokenType;

/// An expression outside the JSON subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonError {
    /// The offending sub-expression, rendered as JavaScript.
    pub expr: String,
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid JSON: {}", self.expr)
    }
}

impl std::error::Error for JsonError {}

impl<'s> Ast<'s> {
    /// Writes the module as JSON. The module must consist of a single
    /// expression statement whose expression is in the JSON subset.
    pub fn to_json<W: Write>(&self, w: &mut W) -> Result<(), JsonError> {
        let mut p = JsonWriter {
            w,
            vars: &self.vars,
        };
        if self.body.len() == 1 {
            match &self.body[0] {
                Stmt::Expr(e) => return p.value(e),
                // A lone string literal parses as a directive prologue but
                // is still a JSON value.
                Stmt::Directive(text) => return p.string(text),
                _ => {}
            }
        }
        Err(JsonError {
            expr: "expected a single expression statement".to_string(),
        })
    }

    pub fn to_json_string(&self) -> Result<String, JsonError> {
        let mut out = String::new();
        self.to_json(&mut out)?;
        Ok(out)
    }
}

struct JsonWriter<'a, 's, W: Write> {
    w: &'a mut W,
    vars: &'a VarTable<'s>,
}

impl<'a, 's, W: Write> JsonWriter<'a, 's, W> {
    fn reject(&self, expr: &Expr<'s>) -> JsonError {
        let mut rendered = String::new();
        let mut p = JsPrinter {
            w: &mut rendered,
            vars: self.vars,
        };
        let _ = p.expr(expr);
        JsonError { expr: rendered }
    }

    fn put(&mut self, s: &str) -> Result<(), JsonError> {
        self.w.write_str(s).map_err(|_| JsonError {
            expr: "write failed".to_string(),
        })
    }

    /// Emits a numeric mantissa in JSON form: a bare leading or trailing
    /// dot is not valid JSON, so `.5` becomes `0.5` and `5.` becomes `5`.
    fn number(&mut self, text: &str) -> Result<(), JsonError> {
        if let Some(stripped) = text.strip_prefix('.') {
            self.put("0.")?;
            self.put(stripped)
        } else if let Some(stripped) = text.strip_suffix('.') {
            self.put(stripped)
        } else {
            self.put(text)
        }
    }

    fn value(&mut self, expr: &Expr<'s>) -> Result<(), JsonError> {
        match expr {
            Expr::Group(inner) => self.value(inner),
            Expr::Literal { tt, text } => match tt {
                TokenType::Null => self.put("null"),
                TokenType::True => self.put("true"),
                TokenType::False => self.put("false"),
                TokenType::Integer | TokenType::Decimal => self.number(text),
                TokenType::String => self.string(text),
                _ => Err(self.reject(expr)),
            },
            Expr::Unary { op, operand } => match (op, operand.as_ref()) {
                (TokenType::Sub, Expr::Literal { tt, text })
                    if *tt == TokenType::Integer || *tt == TokenType::Decimal =>
                {
                    self.put("-")?;
                    self.number(text)
                }
                (TokenType::Not, Expr::Literal { tt: TokenType::Integer, text })
                    if *text == "0" =>
                {
                    self.put("true")
                }
                (TokenType::Not, Expr::Literal { tt: TokenType::Integer, text })
                    if *text == "1" =>
                {
                    self.put("false")
                }
                _ => Err(self.reject(expr)),
            },
            Expr::Template(lit) if lit.tag.is_none() && lit.parts.is_empty() => {
                self.string(lit.tail)
            }
            Expr::Array(elements) => {
                self.put("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.put(", ")?;
                    }
                    match (&element.value, element.spread) {
                        (Some(value), false) => self.value(value)?,
                        _ => return Err(self.reject(expr)),
                    }
                }
                self.put("]")
            }
            Expr::Object(props) => {
                self.put("{")?;
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        self.put(", ")?;
                    }
                    match prop {
                        Property::KeyValue { key, value } => {
                            self.key(key, expr)?;
                            self.put(": ")?;
                            self.value(value)?;
                        }
                        _ => return Err(self.reject(expr)),
                    }
                }
                self.put("}")
            }
            _ => Err(self.reject(expr)),
        }
    }

    fn key(&mut self, key: &PropertyKey<'s>, ctx: &Expr<'s>) -> Result<(), JsonError> {
        match key {
            PropertyKey::Ident(name) => {
                self.put("\"")?;
                self.put(name)?;
                self.put("\"")
            }
            PropertyKey::String(text) => self.string(text),
            PropertyKey::Number { tt, text } => match tt {
                TokenType::Integer | TokenType::Decimal => {
                    self.put("\"")?;
                    self.put(text)?;
                    self.put("\"")
                }
                _ => Err(self.reject(ctx)),
            },
            PropertyKey::Computed(_) => Err(self.reject(ctx)),
        }
    }

    /// Re-emits a string or substitution-free template literal as a JSON
    /// string: double quotes, normalised escapes.
    fn string(&mut self, raw: &str) -> Result<(), JsonError> {
        let content = &raw[1..raw.len() - 1];
        let mut out = String::with_capacity(content.len() + 2);
        out.push('"');
        let mut chars = content.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('\'') => out.push('\''),
                    Some('"') => out.push_str("\\\""),
                    Some('\\') => out.push_str("\\\\"),
                    Some('/') => out.push_str("\\/"),
                    Some('b') => out.push_str("\\b"),
                    Some('f') => out.push_str("\\f"),
                    Some('n') => out.push_str("\\n"),
                    Some('r') => out.push_str("\\r"),
                    Some('t') => out.push_str("\\t"),
                    Some('v') => out.push_str("\\u000b"),
                    Some('0') => out.push_str("\\u0000"),
                    Some('x') => {
                        let hi = chars.next().unwrap_or('0');
                        let lo = chars.next().unwrap_or('0');
                        out.push_str("\\u00");
                        out.push(hi);
                        out.push(lo);
                    }
                    Some('u') => {
                        if chars.peek() == Some(&'{') {
                            chars.next();
                            let mut value: u32 = 0;
                            while let Some(&d) = chars.peek() {
                                if let Some(v) = d.to_digit(16) {
                                    value = value * 16 + v;
                                    chars.next();
                                } else {
                                    break;
                                }
                            }
                            chars.next(); // }
                            push_code_point(&mut out, value);
                        } else {
                            out.push_str("\\u");
                            for _ in 0..4 {
                                if let Some(d) = chars.next() {
                                    out.push(d);
                                }
                            }
                        }
                    }
                    // A line continuation disappears entirely.
                    Some('\r') => {
                        if chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                    }
                    Some('\n') | Some('\u{2028}') | Some('\u{2029}') => {}
                    Some(other) => out.push(other),
                    None => {}
                },
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\u{2028}' => out.push_str("\\u2028"),
                '\u{2029}' => out.push_str("\\u2029"),
                c if (c as u32) < 0x20 => {
                    let _ = write!(out, "\\u{:04x}", c as u32);
                }
                c => out.push(c),
            }
        }
        out.push('"');
        self.put(&out)
    }
}

fn push_code_point(out: &mut String, value: u32) {
    if value <= 0xffff {
        let _ = write!(out, "\\u{:04x}", value);
    } else {
        let v = value - 0x10000;
        let hi = 0xd800 + (v >> 10);
        let lo = 0xdc00 + (v & 0x3ff);
        let _ = write!(out, "\\u{:04x}\\u{:04x}", hi, lo);
    }
}
