// src/html/render.rs
//
// Turns the token sequence into indented HTML, one token (or collapsed run) per line.
//
// Per token, in priority order:
//   1. `<style>` element → open tag as written, its body run through the injected style
//      formatter and indented one level deeper (nothing for an empty body), close tag as
//      written. No stack effect.
//   2. Other verbatim elements, comments and `<![…]>` markers → emitted as-is.
//   3. `<![if …]>` / `<![endif]>` → a virtual block (indent only, never on the stack).
//   4. `<!doctype …>` → column 0.
//   5. Collapsible block tags → one line if only text/inline tags precede the close tag
//      (or, for `p`/`li`/`dt`/`dd`, the tag that implicitly closes it).
//   6. Void and self-closing tags → no stack effect.
//   7. Auto-closing tags → close an open sibling of the same name first.
//   8. End tags → dedent, pop when the name is on top of the stack.
//   9. Start tags → emit, indent, push.
//  10. Text → entity-decoded, emitted at the current indent.
//
// Indentation is floored at zero: stray end tags never produce negative depth.

use memchr::memrchr;

use super::tags::{
    find_tag_end, is_auto_closing, is_collapsible, is_declaration, is_doctype, is_inline,
    is_void, is_ws, normalize_tag, parse_tag_info, TagInfo,
};
use super::tokenizer::Token;
use crate::entities;
use crate::error::FormatError;

/// Formats the body of a `<style>` element.
pub type StyleFormatter = fn(&str) -> Result<String, FormatError>;

/// Mutable per-call state: output buffer, depth and open element names (lowercase).
#[derive(Debug, Default)]
pub struct RenderState {
    pub indent: usize,
    pub open: Vec<Vec<u8>>,
    pub out: Vec<u8>,
}

impl RenderState {
    fn line(&mut self, content: &[u8]) {
        self.line_at(self.indent, content);
    }

    fn line_at(&mut self, indent: usize, content: &[u8]) {
        self.out.resize(self.out.len() + indent, b'\t');
        self.out.extend_from_slice(content);
        self.out.push(b'\n');
    }

    fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    fn top_is(&self, name: &[u8]) -> bool {
        self.open.last().is_some_and(|top| top.eq_ignore_ascii_case(name))
    }

    /// Pop the top element and emit its end tag one level up.
    fn close_top(&mut self) {
        if let Some(name) = self.open.pop() {
            self.dedent();
            let mut tag = Vec::with_capacity(name.len() + 3);
            tag.extend_from_slice(b"</");
            tag.extend_from_slice(&name);
            tag.push(b'>');
            log::trace!(
                target: "prettymin::html",
                "auto-close </{}>",
                String::from_utf8_lossy(&name)
            );
            self.line(&tag);
        }
    }
}

/// Token-to-text renderer. The CSS formatter is injected rather than looked up globally.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format_style: StyleFormatter,
}

impl Renderer {
    pub fn new(format_style: StyleFormatter) -> Self {
        Self { format_style }
    }

    /// Render `tokens`; the result is trimmed and has no trailing newline.
    ///
    /// ## Errors
    ///
    /// Fails when the style formatter fails, or if the output is not valid UTF-8.
    pub fn render(&self, tokens: &[Token<'_>]) -> Result<String, FormatError> {
        let mut state = RenderState::default();
        let mut i = 0usize;
        while i < tokens.len() {
            i = self.step(tokens, i, &mut state)?;
        }

        let trimmed = state.out.trim_ascii();
        String::from_utf8(trimmed.to_vec()).map_err(|_| FormatError::InvalidHtml)
    }

    /// Handle the token at `i`; return the index of the next unhandled token.
    fn step(
        &self,
        tokens: &[Token<'_>],
        i: usize,
        state: &mut RenderState,
    ) -> Result<usize, FormatError> {
        match tokens[i] {
            Token::Verbatim(raw) => {
                let name = parse_tag_info(raw.as_bytes()).name;
                if name.eq_ignore_ascii_case(b"style") {
                    self.style_block(raw.as_bytes(), state)?;
                } else {
                    state.line(raw.as_bytes());
                }
            }
            Token::Comment(raw) => comment(raw.as_bytes(), state),
            Token::Text(raw) => {
                let text = raw.trim_ascii();
                if !text.is_empty() {
                    state.line(entities::decode(text, false).as_bytes());
                }
            }
            Token::Tag(raw) => {
                let tag = raw.as_bytes().trim_ascii();
                let info = parse_tag_info(tag);
                if !info.is_end && is_collapsible(info.name) {
                    if let Some(next) = collapse(tokens, i, info.name, state) {
                        return Ok(next);
                    }
                }
                element(tag, state);
            }
        }
        Ok(i + 1)
    }

    /// `<style …>body</style>`: the body is reformatted and indented one level deeper.
    fn style_block(&self, raw: &[u8], state: &mut RenderState) -> Result<(), FormatError> {
        let open_end = find_tag_end(raw, 0);
        let close_start = memrchr(b'<', raw);
        let (Some(open_end), Some(close_start)) = (open_end, close_start) else {
            state.line(raw);
            return Ok(());
        };
        if close_start <= open_end {
            state.line(raw);
            return Ok(());
        }

        let body = std::str::from_utf8(&raw[open_end + 1..close_start])
            .map_err(|_| FormatError::InvalidHtml)?;
        let css = (self.format_style)(body)?;

        state.line(&raw[..=open_end]);
        for line in css.trim_end().lines() {
            if line.is_empty() {
                state.out.push(b'\n');
            } else {
                state.line_at(state.indent + 1, line.as_bytes());
            }
        }
        state.line(&raw[close_start..]);
        Ok(())
    }
}

/* ============================ Comment markers =========================== */

fn comment(raw: &[u8], state: &mut RenderState) {
    let raw = raw.trim_ascii();
    if starts_with_ignore_case(raw, b"<![endif") {
        state.dedent();
        state.line(raw);
    } else if starts_with_ignore_case(raw, b"<![if") {
        state.line(raw);
        state.indent += 1;
    } else {
        state.line(raw);
    }
}

fn starts_with_ignore_case(s: &[u8], prefix: &[u8]) -> bool {
    s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/* =============================== Elements =============================== */

fn element(tag: &[u8], state: &mut RenderState) {
    let mut normalized = Vec::with_capacity(tag.len());
    normalize_tag(tag, &mut normalized);

    if is_doctype(tag) {
        state.line_at(0, &normalized);
        return;
    }
    let info = parse_tag_info(tag);
    if is_declaration(tag) || info.name.is_empty() {
        state.line(&normalized);
        return;
    }
    let name = info.name.to_ascii_lowercase();

    if info.is_end {
        // An end tag for an element deeper in the stack closes the omitted end tags above it.
        if state.open.iter().any(|open| *open == name) {
            while !state.top_is(&name) && state.open.last().is_some_and(|t| is_auto_closing(t)) {
                state.close_top();
            }
        }
        state.dedent();
        if state.top_is(&name) {
            state.open.pop();
        }
        state.line(&normalized);
        return;
    }

    if info.self_closing || is_void(&name) {
        state.line(&normalized);
        return;
    }

    if is_auto_closing(&name) && state.top_is(&name) {
        state.close_top();
    }

    state.line(&normalized);
    state.indent += 1;
    state.open.push(name);
}

/* ========================== Collapsible blocks ========================== */

/// Try to render the block opened at `start` as one line.
///
/// Scans forward over text and inline tags, counting unmatched inline opens so that an
/// out-of-order inline end tag does not end the scan early. Succeeds when the end tag for
/// `name` is reached with no open inline elements; any other tag aborts. An auto-closing
/// block also ends, implicitly, at a sibling start tag of the same name or at the end tag
/// of an open ancestor; that terminator is left for the next step. Returns the index of
/// the next unhandled token.
fn collapse(
    tokens: &[Token<'_>],
    start: usize,
    name: &[u8],
    state: &mut RenderState,
) -> Option<usize> {
    let mut open_inline = 0isize;
    let mut end = None;
    for (j, token) in tokens.iter().enumerate().skip(start + 1) {
        match *token {
            Token::Text(_) => {}
            Token::Tag(raw) => {
                let info = parse_tag_info(raw.as_bytes().trim_ascii());
                if open_inline == 0 {
                    if info.is_end && info.name.eq_ignore_ascii_case(name) {
                        end = Some((j, true));
                        break;
                    }
                    if is_auto_closing(name) && closes_implicitly(&info, name, state) {
                        end = Some((j, false));
                        break;
                    }
                }
                if !is_inline(info.name) {
                    return None;
                }
                if info.is_end {
                    open_inline -= 1;
                } else if !info.self_closing {
                    open_inline += 1;
                }
            }
            Token::Verbatim(_) | Token::Comment(_) => return None,
        }
    }
    let (end, consumed) = end?;

    let mut inner = Vec::new();
    for token in &tokens[start + 1..end] {
        match *token {
            Token::Text(raw) => push_collapsed(entities::decode(raw, false).as_bytes(), &mut inner),
            Token::Tag(raw) => normalize_tag(raw.as_bytes().trim_ascii(), &mut inner),
            Token::Verbatim(_) | Token::Comment(_) => {}
        }
    }

    let mut line = Vec::with_capacity(inner.len() + 16);
    normalize_tag(tokens[start].as_str().as_bytes().trim_ascii(), &mut line);
    line.extend_from_slice(inner.trim_ascii());
    if consumed {
        normalize_tag(tokens[end].as_str().as_bytes().trim_ascii(), &mut line);
    } else {
        line.extend_from_slice(b"</");
        line.extend(name.iter().map(u8::to_ascii_lowercase));
        line.push(b'>');
    }

    log::trace!(
        target: "prettymin::html",
        "collapsed <{}> over {} tokens",
        String::from_utf8_lossy(name),
        end - start + 1
    );
    state.line(&line);
    Some(if consumed { end + 1 } else { end })
}

/// A same-name start tag, or the end tag of an element that is still open.
fn closes_implicitly(info: &TagInfo<'_>, name: &[u8], state: &RenderState) -> bool {
    if info.is_end {
        state.open.iter().any(|open| open.eq_ignore_ascii_case(info.name))
    } else {
        info.name.eq_ignore_ascii_case(name)
    }
}

/// Append `text` with every whitespace run folded to a single space.
fn push_collapsed(text: &[u8], out: &mut Vec<u8>) {
    let mut in_ws = false;
    for &b in text {
        if is_ws(b) {
            if !in_ws {
                out.push(b' ');
            }
            in_ws = true;
        } else {
            out.push(b);
            in_ws = false;
        }
    }
}
