//! Restricted data-literal grammar for annotation payloads and `.cdef`
//! scripts.
//!
//! Payloads are declarative data, never code: a JSON superset that also
//! accepts single-quoted strings, `True`/`False`/`None`, trailing commas
//! and parenthesized sequences. Anything outside that grammar is a parse
//! error, so a header can never smuggle executable content through an
//! annotation.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Parse failure inside a data literal. The offset is a byte position in
/// the input fragment; callers attach the file path.
#[derive(Debug, Clone, Error)]
#[error("invalid literal at offset {offset}: {message}")]
pub struct LiteralError {
    pub offset: usize,
    pub message: String,
}

/// Parse a complete literal. Trailing non-whitespace input is an error.
pub fn parse_literal(input: &str) -> Result<Value, LiteralError> {
    let mut cur = Cursor::new(input);
    let value = cur.value()?;
    cur.finish()?;
    Ok(value)
}

/// Parse a named assignment `VAR [=] <literal>` and check the variable
/// name. Annotation payloads bind a well-known name (`WIZARD`,
/// `WIZARD_MODULE`, `WIZARD_LIST`); anything else is rejected.
pub fn parse_assignment(input: &str, expected: &str) -> Result<Value, LiteralError> {
    let mut cur = Cursor::new(input);
    cur.skip_ws();
    let start = cur.pos;
    let name = cur.ident()?;
    if name != expected {
        return Err(LiteralError {
            offset: start,
            message: format!("expected variable `{expected}`, found `{name}`"),
        });
    }
    cur.skip_ws();
    if cur.peek() == Some(b'=') {
        cur.pos += 1;
    }
    let value = cur.value()?;
    cur.finish()?;
    Ok(value)
}

/// Parse a `.cdef` statement line: either `KEY = <literal>` yielding the
/// binding, or `include("file")` yielding the include target.
pub(crate) fn parse_statement(line: &str) -> Result<Statement, LiteralError> {
    let mut cur = Cursor::new(line);
    cur.skip_ws();
    let name = cur.ident()?;
    cur.skip_ws();
    if name == "include" && cur.peek() == Some(b'(') {
        cur.pos += 1;
        cur.skip_ws();
        let target = cur.string()?;
        cur.skip_ws();
        cur.expect(b')')?;
        cur.finish()?;
        return Ok(Statement::Include(target));
    }
    if cur.peek() != Some(b'=') {
        return Err(LiteralError {
            offset: cur.pos,
            message: format!("expected `=` after `{name}`"),
        });
    }
    cur.pos += 1;
    let value = cur.value()?;
    cur.finish()?;
    Ok(Statement::Assign(name.to_string(), value))
}

/// One evaluated `.cdef` statement.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement {
    Assign(String, Value),
    Include(String),
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn err(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, ch: u8) -> Result<(), LiteralError> {
        if self.peek() == Some(ch) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.err(format!("expected `{}`", ch as char)))
        }
    }

    /// Whitespace, then end of input.
    fn finish(&mut self) -> Result<(), LiteralError> {
        self.skip_ws();
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(self.err("trailing characters after literal"))
        }
    }

    fn ident(&mut self) -> Result<&'a str, LiteralError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start || self.bytes[start].is_ascii_digit() {
            return Err(self.err("expected identifier"));
        }
        // Identifier bytes are ASCII, always valid UTF-8.
        Ok(std::str::from_utf8(&self.bytes[start..self.pos]).unwrap())
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        match self.peek() {
            Some(b'{') => self.object(),
            Some(b'[') => self.sequence(b'[', b']'),
            Some(b'(') => self.sequence(b'(', b')'),
            Some(b'"' | b'\'') => Ok(Value::String(self.string()?)),
            Some(c) if c == b'-' || c == b'+' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_ascii_alphabetic() => self.keyword(),
            Some(c) => Err(self.err(format!("unexpected character `{}`", c as char))),
            None => Err(self.err("unexpected end of input")),
        }
    }

    fn object(&mut self) -> Result<Value, LiteralError> {
        self.expect(b'{')?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }
            let key = self.string()?;
            self.skip_ws();
            self.expect(b':')?;
            let value = self.value()?;
            map.insert(key, value);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(map));
                }
                _ => return Err(self.err("expected `,` or `}` in mapping")),
            }
        }
    }

    fn sequence(&mut self, open: u8, close: u8) -> Result<Value, LiteralError> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.err("expected `,` or closing bracket in sequence")),
            }
        }
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(self.err("expected string")),
        };
        self.pos += 1;
        let mut out = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.err("unterminated string")),
                Some(q) if q == quote => {
                    self.pos += 1;
                    return String::from_utf8(out).map_err(|_| self.err("invalid UTF-8 in string"));
                }
                Some(b'\\') => {
                    self.pos += 1;
                    let esc = self.peek().ok_or_else(|| self.err("unterminated escape"))?;
                    let decoded = match esc {
                        b'n' => b'\n',
                        b't' => b'\t',
                        b'r' => b'\r',
                        b'0' => b'\0',
                        b'\\' | b'"' | b'\'' => esc,
                        _ => return Err(self.err(format!("unknown escape `\\{}`", esc as char))),
                    };
                    out.push(decoded);
                    self.pos += 1;
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                b'0'..=b'9' => self.pos += 1,
                b'.' | b'e' | b'E' => {
                    is_float = true;
                    self.pos += 1;
                }
                b'-' | b'+' if is_float => self.pos += 1,
                _ => break,
            }
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| self.err("invalid number"))?;
        let text = text.strip_prefix('+').unwrap_or(text);
        if !is_float
            && let Ok(n) = text.parse::<i64>()
        {
            return Ok(Value::Number(Number::from(n)));
        }
        let f: f64 = text
            .parse()
            .map_err(|_| LiteralError {
                offset: start,
                message: format!("invalid number `{text}`"),
            })?;
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| self.err("non-finite number"))
    }

    fn keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let word = self.ident()?;
        match word {
            "true" | "True" => Ok(Value::Bool(true)),
            "false" | "False" => Ok(Value::Bool(false)),
            "null" | "None" => Ok(Value::Null),
            _ => Err(LiteralError {
                offset: start,
                message: format!("unknown keyword `{word}`"),
            }),
        }
    }
}
