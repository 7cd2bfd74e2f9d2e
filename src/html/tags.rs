// src/html/tags.rs
//
// Tag classification and tag-text helpers shared by the tokenizer and renderer.
//
// - Tag sets are matched ASCII-case-insensitively on the raw name bytes.
// - `find_tag_end` is quote-aware: a '>' inside "..." or '...' does not end a tag.
// - `normalize_tag` folds every whitespace run inside a tag to one space and decodes
//   character references in quoted attribute values (attribute mode, so quotes stay encoded).

use crate::entities;

/* =============================== Core sets =============================== */

pub fn is_void(name: &[u8]) -> bool {
    matches_ignore_ascii_case(
        name,
        &[
            b"area", b"base", b"br", b"col", b"embed", b"hr", b"img", b"input", b"link", b"meta",
            b"param", b"source", b"track", b"wbr",
        ],
    )
}

/// Tags that never force a line break of their own while collapsing a block.
pub fn is_inline(name: &[u8]) -> bool {
    matches_ignore_ascii_case(
        name,
        &[
            b"a", b"abbr", b"b", b"button", b"cite", b"code", b"del", b"dfn", b"em", b"i",
            b"ins", b"kbd", b"label", b"mark", b"q", b"samp", b"small", b"span", b"strong",
            b"sub", b"sup", b"td", b"th", b"time", b"u", b"var",
        ],
    )
}

/// Block tags whose text/inline-only content is rendered on one line.
pub fn is_collapsible(name: &[u8]) -> bool {
    matches_ignore_ascii_case(
        name,
        &[
            b"title", b"h1", b"h2", b"h3", b"h4", b"h5", b"h6", b"p", b"li", b"figcaption",
            b"dt", b"dd",
        ],
    )
}

/// Tags whose end tag may be omitted when a sibling of the same name begins.
pub fn is_auto_closing(name: &[u8]) -> bool {
    matches_ignore_ascii_case(name, &[b"p", b"li", b"dt", b"dd", b"option"])
}

/// Elements whose content passes through the prettifier untouched.
pub fn is_verbatim(name: &[u8]) -> bool {
    matches_ignore_ascii_case(name, &[b"pre", b"textarea", b"script", b"style"])
}

/* ============================ Utility predicates ========================= */

#[inline]
pub fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

#[inline]
pub fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' || b == b'\x0C'
}

fn matches_ignore_ascii_case(name: &[u8], set: &[&[u8]]) -> bool {
    set.iter().any(|&s| name.eq_ignore_ascii_case(s))
}

fn trim_spaces(buf: &mut Vec<u8>) {
    while buf.last() == Some(&b' ') {
        buf.pop();
    }
    let lead = buf.iter().take_while(|&&b| b == b' ').count();
    buf.drain(..lead);
}

/* =============================== Tag parsing ============================= */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagInfo<'a> {
    pub name: &'a [u8],
    pub is_end: bool,
    pub self_closing: bool,
}

/// Find the '>' for a tag starting at `i` (s[i] == '<'), being quote-aware.
pub fn find_tag_end(s: &[u8], mut i: usize) -> Option<usize> {
    let n = s.len();
    i += 1;
    let mut quote: u8 = 0;
    while i < n {
        let b = s[i];
        if quote != 0 {
            if b == quote {
                quote = 0;
            }
        } else if b == b'"' || b == b'\'' {
            quote = b;
        } else if b == b'>' {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Extract tag name, end/self-closing flags from raw `<...>` bytes.
///
/// Declarations (`<!doctype>`, `<?xml?>`) and malformed tags yield an empty name.
pub fn parse_tag_info(tag: &[u8]) -> TagInfo<'_> {
    let n = tag.len();
    let mut i = 1;

    let mut is_end = false;
    if i < n && tag[i] == b'/' {
        is_end = true;
        i += 1;
    }
    while i < n && is_ws(tag[i]) {
        i += 1;
    }
    let start = i;
    while i < n && is_name_char(tag[i]) {
        i += 1;
    }
    let name = &tag[start..i];

    let self_closing = tag.trim_ascii_end().ends_with(b"/>");

    TagInfo {
        name,
        is_end,
        self_closing,
    }
}

/// `<!…>` or `<?…>`: never part of the element structure.
pub fn is_declaration(tag: &[u8]) -> bool {
    tag.starts_with(b"<!") || tag.starts_with(b"<?")
}

pub fn is_doctype(tag: &[u8]) -> bool {
    tag.len() >= 9 && tag[..9].eq_ignore_ascii_case(b"<!doctype")
}

/* ======================== Inside-tag normalization ====================== */

/// Write `tag` to `out` with every whitespace run (inside quoted values too) folded to a
/// single space, and no space after '<' or before '>'. Quoted values are entity-decoded in
/// attribute mode.
///
/// An unterminated tag (no closing '>') is normalized the same way without adding one.
pub fn normalize_tag(tag: &[u8], out: &mut Vec<u8>) {
    if tag.len() < 2 || tag[0] != b'<' {
        out.extend_from_slice(tag);
        return;
    }
    let closed = tag.ends_with(b">");
    let inner = if closed { &tag[1..tag.len() - 1] } else { &tag[1..] };

    let mut buf: Vec<u8> = Vec::with_capacity(inner.len());
    let mut value: Vec<u8> = Vec::new();
    let mut quote: u8 = 0;

    let push_space_once = |buf: &mut Vec<u8>| {
        if buf.last() != Some(&b' ') {
            buf.push(b' ');
        }
    };

    for &b in inner {
        if quote != 0 {
            if b == quote {
                push_attribute_value(&value, &mut buf);
                value.clear();
                buf.push(b);
                quote = 0;
            } else if is_ws(b) {
                push_space_once(&mut value);
            } else {
                value.push(b);
            }
        } else if b == b'"' || b == b'\'' {
            quote = b;
            buf.push(b);
        } else if is_ws(b) {
            push_space_once(&mut buf);
        } else {
            buf.push(b);
        }
    }

    // Unterminated quote: keep what was collected.
    if quote != 0 {
        push_attribute_value(&value, &mut buf);
    }

    trim_spaces(&mut buf);
    // `<br />` keeps its space; `<a href="x" >` does not.
    out.push(b'<');
    out.extend_from_slice(&buf);
    if closed {
        out.push(b'>');
    }
}

fn push_attribute_value(value: &[u8], buf: &mut Vec<u8>) {
    match std::str::from_utf8(value) {
        Ok(v) => buf.extend_from_slice(entities::decode(v, true).as_bytes()),
        Err(_) => buf.extend_from_slice(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(tag: &str) -> String {
        let mut out = Vec::new();
        normalize_tag(tag.as_bytes(), &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn tag_end_ignores_quoted_gt() {
        let s = br#"<a title="x > y" href='>'>rest"#;
        assert_eq!(find_tag_end(s, 0), Some(25));
        assert_eq!(find_tag_end(b"<a title=\"open", 0), None);
    }

    #[test]
    fn parses_names_and_flags() {
        let t = parse_tag_info(b"</ DIV >");
        assert_eq!(t.name, b"DIV");
        assert!(t.is_end);

        let t = parse_tag_info(b"<br/>");
        assert_eq!(t.name, b"br");
        assert!(t.self_closing);

        let t = parse_tag_info(b"<my-widget data-x=\"1\">");
        assert_eq!(t.name, b"my-widget");
        assert!(!t.self_closing);

        assert_eq!(parse_tag_info(b"<!doctype html>").name, b"");
    }

    #[test]
    fn classifies_sets_case_insensitively() {
        assert!(is_void(b"BR"));
        assert!(is_inline(b"Span"));
        assert!(!is_inline(b"div"));
        assert!(is_collapsible(b"H3"));
        assert!(is_auto_closing(b"option"));
        assert!(is_verbatim(b"Script"));
        assert!(is_doctype(b"<!DOCTYPE html>"));
        assert!(is_declaration(b"<?xml version=\"1.0\"?>"));
    }

    #[test]
    fn normalizes_outside_quotes() {
        assert_eq!(norm("<div   class=\"a\"\n   id=\"b\" >"), "<div class=\"a\" id=\"b\">");
        assert_eq!(norm("< p >"), "<p>");
        assert_eq!(norm("<br />"), "<br />");
        assert_eq!(norm("<a href=\n\"x\">"), "<a href= \"x\">");
    }

    #[test]
    fn folds_whitespace_inside_quoted_values() {
        assert_eq!(norm("<a href=\"x\"   title=\"a   b\">"), "<a href=\"x\" title=\"a b\">");
        assert_eq!(norm("<a title=\"a\n    b\">"), "<a title=\"a b\">");
    }

    #[test]
    fn decodes_attribute_values_in_attribute_mode() {
        assert_eq!(
            norm("<a title=\"&copy; &quot;x&quot; &amp;\">"),
            "<a title=\"\u{00A9} &quot;x&quot; &amp;\">"
        );
    }

    #[test]
    fn unterminated_tag_gets_no_closer() {
        assert_eq!(norm("<div  class=\"a"), "<div class=\"a");
    }
}
