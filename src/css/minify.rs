// src/css/minify.rs
//
// Regex pipeline, not a scanner. It has no notion of strings or braces, so CSS with
// `;:{},` or `//` inside string literals can be altered. That is accepted: the result is
// best-effort and lossy by construction.

use regex::Regex;
use std::sync::LazyLock;

/// `/* … */` anywhere, or a `//` comment to end of line unless preceded by ':' (as in
/// `http://`). Group 1 keeps the byte before `//`.
static COMMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)/\*[\s\S]*?\*/|([^:]|^)//.*$").expect("invalid css comment regex")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([;:{},])\s*").expect("invalid css punctuation regex"));

/// Strip comments and every whitespace byte that is not needed between tokens.
pub fn minify(text: &str) -> String {
    let out = COMMENTS.replace_all(text, "${1}");
    let out = WHITESPACE.replace_all(&out, " ");
    let out = PUNCTUATION.replace_all(&out, "${1}");
    out.replace(";}", "}").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_layout() {
        assert_eq!(minify("a {\n  color: red;\n}\n"), "a{color:red}");
        assert_eq!(
            minify("h1 , h2 {\n\tmargin : 0  auto ;\n\tpadding:0;\n}\n\n b { x : y }"),
            "h1,h2{margin:0 auto;padding:0}b{x:y}"
        );
    }

    #[test]
    fn strips_comments() {
        assert_eq!(minify("/* a\n b */a{x:y} /* c */"), "a{x:y}");
        assert_eq!(minify("a{x:y} // trailing\nb{z:w}"), "a{x:y}b{z:w}");
    }

    #[test]
    fn keeps_scheme_slashes() {
        assert_eq!(
            minify("a { background: url(http://x.com/a.png); }"),
            "a{background:url(http://x.com/a.png)}"
        );
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(minify(" \n\t"), "");
    }
}
