// src/css/prettify.rs
//
// Single forward scan over CSS bytes, no parse tree.
//
// Lexical context (exactly one gates a byte): code, block comment, or string.
// Structural flags (combine freely): inside a rule block, inside a property value, inside a
// calc() expression (with paren depth), inside an at-rule parameter group.
//
// Lookahead is one byte, plus a bounded scan from a ':' to the next '{', ';' or '}' to tell
// a selector colon (`a:hover {`) from a declaration colon (`color: red;`).

use memchr::{memchr3, memmem};

use crate::error::FormatError;

/// Reformat `text` with one declaration per line, tab-indented blocks and a trailing newline.
///
/// ## Errors
///
/// Returns [`FormatError::InvalidCss`] if the scan produces invalid UTF-8.
pub fn prettify(text: &str) -> Result<String, FormatError> {
    let mut f = Formatter::new(text.as_bytes());
    f.run();
    f.finish()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lexical {
    Code,
    BlockComment,
    Str(u8),
}

#[derive(Debug)]
struct Formatter<'a> {
    src: &'a [u8],
    i: usize,
    out: Vec<u8>,
    indent: usize,
    lexical: Lexical,
    in_rule_block: bool,
    in_property_value: bool,
    /// Open parens inside `calc(`; `None` outside calc mode.
    calc_depth: Option<usize>,
    in_at_rule_paren: bool,
}

impl<'a> Formatter<'a> {
    fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            i: 0,
            out: Vec::with_capacity(src.len() + src.len() / 4 + 16),
            indent: 0,
            lexical: Lexical::Code,
            in_rule_block: false,
            in_property_value: false,
            calc_depth: None,
            in_at_rule_paren: false,
        }
    }

    fn run(&mut self) {
        while self.i < self.src.len() {
            match self.lexical {
                Lexical::BlockComment => {
                    self.comment_body();
                    continue;
                }
                Lexical::Str(quote) => {
                    self.string_body(quote);
                    continue;
                }
                Lexical::Code => {}
            }

            let b = self.src[self.i];
            self.track_at_rule_paren(b);

            if b == b'/' && self.peek(1) == Some(b'*') {
                self.open_comment();
                continue;
            }
            match b {
                b'"' | b'\'' => self.open_string(b),
                b'{' => self.open_block(),
                b'}' => self.close_block(),
                b';' => self.semicolon(),
                b',' => self.comma(),
                b':' if !self.in_property_value => self.colon(),
                _ => self.other(b),
            }
        }
    }

    fn finish(mut self) -> Result<String, FormatError> {
        self.trim_end();
        if self.lexical == Lexical::Code && self.in_property_value && self.out.last() != Some(&b';') {
            self.out.push(b';');
        }
        let lead = self.out.iter().take_while(|b| is_ws(**b)).count();
        self.out.drain(..lead);
        self.out.push(b'\n');
        String::from_utf8(self.out).map_err(|_| FormatError::InvalidCss)
    }

    /* ----------------------------- helpers ------------------------------ */

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.src.get(self.i + ahead).copied()
    }

    fn trim_end(&mut self) {
        while self.out.last().is_some_and(|b| is_ws(*b)) {
            self.out.pop();
        }
    }

    fn skip_ws(&mut self) {
        while self.i < self.src.len() && is_ws(self.src[self.i]) {
            self.i += 1;
        }
    }

    fn at_line_start(&self) -> bool {
        self.out.last().map_or(true, |b| *b == b'\n')
    }

    fn push_indent(&mut self) {
        self.out.resize(self.out.len() + self.indent, b'\t');
    }

    /// Indent if the output sits at the start of a fresh line.
    fn indent_if_line_start(&mut self) {
        if self.out.last() == Some(&b'\n') {
            self.push_indent();
        }
    }

    /// True when the next `{`, `;` or `}` after `from` is a `{`.
    fn selector_ahead(&self, from: usize) -> bool {
        let rest = self.src.get(from..).unwrap_or_default();
        memchr3(b'{', b';', b'}', rest).is_some_and(|p| rest[p] == b'{')
    }

    /* ----------------------------- contexts ----------------------------- */

    fn track_at_rule_paren(&mut self, b: u8) {
        if b == b'(' && !self.in_rule_block && !self.in_property_value {
            self.in_at_rule_paren = true;
        } else if b == b')' {
            self.in_at_rule_paren = false;
        }
    }

    fn open_comment(&mut self) {
        self.trim_end();
        if !self.out.is_empty() {
            self.out.push(b'\n');
            self.push_indent();
        }
        self.out.extend_from_slice(b"/*");
        self.i += 2;
        self.lexical = Lexical::BlockComment;
    }

    /// Copy through the closing `*/` (or to the end of input).
    fn comment_body(&mut self) {
        let rest = &self.src[self.i..];
        match memmem::find(rest, b"*/") {
            Some(p) => {
                self.out.extend_from_slice(&rest[..p + 2]);
                self.i += p + 2;
                self.lexical = Lexical::Code;
            }
            None => {
                self.out.extend_from_slice(rest);
                self.i = self.src.len();
            }
        }
    }

    fn open_string(&mut self, quote: u8) {
        self.indent_if_line_start();
        self.out.push(quote);
        self.i += 1;
        self.lexical = Lexical::Str(quote);
    }

    /// Copy verbatim through the matching unescaped quote.
    fn string_body(&mut self, quote: u8) {
        while self.i < self.src.len() {
            let b = self.src[self.i];
            self.out.push(b);
            self.i += 1;
            if b == b'\\' {
                if let Some(escaped) = self.peek(0) {
                    self.out.push(escaped);
                    self.i += 1;
                }
            } else if b == quote {
                self.lexical = Lexical::Code;
                return;
            }
        }
    }

    /* ---------------------------- structure ----------------------------- */

    fn open_block(&mut self) {
        self.trim_end();
        self.out.extend_from_slice(b" {\n");
        self.indent += 1;
        self.in_rule_block = true;
        self.in_property_value = false;
        self.calc_depth = None;
        self.in_at_rule_paren = false;
        self.i += 1;
        self.skip_ws();
    }

    fn close_block(&mut self) {
        self.trim_end();
        if self.in_property_value && !self.out.is_empty() && self.out.last() != Some(&b';') {
            self.out.push(b';');
        }
        self.out.push(b'\n');
        self.indent = self.indent.saturating_sub(1);
        self.in_rule_block = false;
        self.in_property_value = false;
        self.calc_depth = None;
        self.push_indent();
        self.out.push(b'}');
        self.i += 1;
        self.skip_ws();
        if self.i < self.src.len() {
            self.out.push(b'\n');
        }
    }

    fn semicolon(&mut self) {
        self.trim_end();
        if self.out.last() != Some(&b';') {
            self.out.push(b';');
        }
        self.out.push(b'\n');
        self.in_property_value = false;
        self.calc_depth = None;
        self.i += 1;
        self.skip_ws();
    }

    fn comma(&mut self) {
        self.trim_end();
        self.out.extend_from_slice(b", ");
        self.i += 1;
        self.skip_ws();
    }

    /// Selector colon (`a:hover {`, `(min-width:1px)`) or declaration colon (`color: red`).
    fn colon(&mut self) {
        self.trim_end();
        self.indent_if_line_start();
        if self.in_at_rule_paren || self.selector_ahead(self.i + 1) {
            self.out.push(b':');
        } else {
            self.out.extend_from_slice(b": ");
            self.in_property_value = true;
        }
        self.i += 1;
        self.skip_ws();
    }

    /* ------------------------------ values ------------------------------ */

    fn other(&mut self, b: u8) {
        if self.in_property_value {
            if self.calc_depth.is_none() && starts_with_ignore_case(&self.src[self.i..], b"calc(") {
                self.calc_depth = Some(0);
            }
            if let Some(depth) = self.calc_depth {
                match b {
                    b'(' => self.calc_depth = Some(depth + 1),
                    b')' => self.calc_depth = depth.checked_sub(1).filter(|d| *d > 0),
                    b'+' | b'-' | b'*' | b'/' => {
                        if self.calc_operator(b) {
                            return;
                        }
                    }
                    _ => {}
                }
            }

            if is_ws(b) {
                if !matches!(self.out.last(), Some(b'(' | b' ') | None) && !self.at_line_start() {
                    self.out.push(b' ');
                }
                self.i += 1;
                return;
            }
            if b == b')' {
                self.trim_end();
            }
        } else if is_ws(b) && self.at_line_start() {
            self.i += 1;
            return;
        }

        self.indent_if_line_start();
        self.out.push(b);
        self.i += 1;
    }

    /// Space a calc() operator; returns false when `b` is a sign or part of an identifier.
    fn calc_operator(&mut self, b: u8) -> bool {
        if b == b'-' && self.peek(1) == Some(b'-') {
            self.out.extend_from_slice(b"--");
            self.i += 2;
            return true;
        }
        if b == b'+' || b == b'-' {
            let prev = self.out.iter().rev().copied().find(|c| !is_ws(*c));
            if matches!(prev, None | Some(b'(' | b',' | b'+' | b'-' | b'*' | b'/')) {
                return false;
            }
        }
        if b == b'-' {
            let before = self.i.checked_sub(1).map(|k| self.src[k]);
            let after = self.peek(1);
            if before.is_some_and(is_ident_byte)
                && after.is_some_and(|c| c.is_ascii_alphabetic() || c == b'-' || c == b'_')
            {
                return false;
            }
        }

        self.trim_end();
        self.out.extend_from_slice(&[b' ', b, b' ']);
        self.i += 1;
        self.skip_ws();
        true
    }
}

#[inline]
fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' || b == b'\x0C'
}

#[inline]
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn starts_with_ignore_case(s: &[u8], prefix: &[u8]) -> bool {
    s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}
