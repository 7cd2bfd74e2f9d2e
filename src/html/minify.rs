// src/html/minify.rs
//
// Regex pipeline. Unlike the prettifier it does not protect `pre`, `textarea`, `script`
// or `style` content: whitespace there is collapsed like everywhere else.

use regex::Regex;
use std::sync::LazyLock;

static COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--[\s\S]*?-->").expect("invalid html comment regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

static BETWEEN_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("invalid inter-tag regex"));

/// Drop comments, fold whitespace runs to one space, and remove whitespace between tags.
pub fn minify(text: &str) -> String {
    let out = COMMENTS.replace_all(text, "");
    let out = WHITESPACE.replace_all(&out, " ");
    let out = BETWEEN_TAGS.replace_all(&out, "><");
    out.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_but_keeps_interior_space() {
        assert_eq!(minify("<p>  a  </p>\n<p>b</p>"), "<p> a </p><p>b</p>");
    }

    #[test]
    fn drops_comments() {
        assert_eq!(
            minify("<div>\n  <!-- note\n spanning -->\n  <span>x</span>\n</div>"),
            "<div><span>x</span></div>"
        );
    }

    #[test]
    fn does_not_protect_preformatted_text() {
        assert_eq!(minify("<pre>a\n    b</pre>"), "<pre>a b</pre>");
    }
}
