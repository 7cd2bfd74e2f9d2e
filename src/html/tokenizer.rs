// src/html/tokenizer.rs
//
// Splits (trimmed) HTML into opaque segments without building a tree.
//
// From the cursor, in order:
//   1. Verbatim block: `<pre>`, `<textarea>`, `<script>` or `<style>` through the first
//      literal `</name>` (case-insensitive, optional whitespace before '>'); an HTML comment `<!-- … -->`; or a marker `<![ … ]>`.
//   2. Tag: '<' through the first unquoted '>' (or the rest of the input if none).
//   3. Text: up to the next '<' (or the end of the input).

use memchr::{memchr, memmem};

use super::tags::{find_tag_end, is_name_char, is_verbatim, is_ws};

/// One segment of the input. Every variant borrows a contiguous span of the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<…>`, including end tags, declarations and unterminated tags.
    Tag(&'a str),
    /// A run of character data between tags.
    Text(&'a str),
    /// A whole `pre`/`textarea`/`script`/`style` element, tags included.
    Verbatim(&'a str),
    /// `<!-- … -->` or a `<![ … ]>` marker (conditional comment, CDATA).
    Comment(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            Self::Tag(s) | Self::Text(s) | Self::Verbatim(s) | Self::Comment(s) => s,
        }
    }
}

/// Iterator over the tokens of `src`.
pub fn tokenize(src: &str) -> Tokenizer<'_> {
    Tokenizer { src, pos: 0 }
}

#[derive(Debug)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let src = self.src;
        let s = src.as_bytes();
        let i = self.pos;
        if i >= s.len() {
            return None;
        }

        let (end, token) = if s[i] == b'<' {
            if let Some(end) = verbatim_end(s, i) {
                (end, Token::Verbatim(&src[i..end]))
            } else if let Some(end) = marker_end(s, i) {
                (end, Token::Comment(&src[i..end]))
            } else {
                let end = find_tag_end(s, i).map_or(s.len(), |j| j + 1);
                (end, Token::Tag(&src[i..end]))
            }
        } else {
            let end = memchr(b'<', &s[i..]).map_or(s.len(), |off| i + off);
            (end, Token::Text(&src[i..end]))
        };

        log::trace!(target: "prettymin::html", "token {token:?}");
        self.pos = end;
        Some(token)
    }
}

/* ============================ Verbatim blocks =========================== */

/// If a verbatim element opens at `i`, return the index just past its end tag.
///
/// The element name must be followed by a name boundary, so `<prefix>` is not `<pre>`.
/// Without a matching end tag there is no verbatim block.
fn verbatim_end(s: &[u8], i: usize) -> Option<usize> {
    let mut k = i + 1;
    while k < s.len() && is_name_char(s[k]) {
        k += 1;
    }
    let name = &s[i + 1..k];
    if name.is_empty() || !is_verbatim(name) {
        return None;
    }
    if k < s.len() && !(is_ws(s[k]) || s[k] == b'>' || s[k] == b'/') {
        return None;
    }

    // The body is opaque: only a literal `</name\s*>` ends it, quotes and other tags inside
    // are not inspected.
    let mut j = k;
    loop {
        let pos = j + memmem::find(&s[j..], b"</")?;
        let after = pos + 2 + name.len();
        if after <= s.len() && s[pos + 2..after].eq_ignore_ascii_case(name) {
            let mut m = after;
            while m < s.len() && is_ws(s[m]) {
                m += 1;
            }
            if m < s.len() && s[m] == b'>' {
                return Some(m + 1);
            }
        }
        j = pos + 2;
    }
}

/// `<!-- … -->` and `<![ … ]>`, if terminated.
fn marker_end(s: &[u8], i: usize) -> Option<usize> {
    let rest = &s[i..];
    if rest.starts_with(b"<!--") {
        memmem::find(&rest[4..], b"-->").map(|p| i + 4 + p + 3)
    } else if rest.starts_with(b"<![") {
        memmem::find(&rest[3..], b"]>").map(|p| i + 3 + p + 2)
    } else {
        None
    }
}
