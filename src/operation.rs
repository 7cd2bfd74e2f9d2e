// src/operation.rs
//
// The four transformations as a value, for hosts that pick one by name.

use std::fmt;
use std::str::FromStr;

use crate::error::{FormatError, ParseOperationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    CssPrettify,
    CssMinify,
    HtmlPrettify,
    HtmlMinify,
}

impl Operation {
    pub const ALL: [Self; 4] = [
        Self::CssPrettify,
        Self::CssMinify,
        Self::HtmlPrettify,
        Self::HtmlMinify,
    ];

    /// Command-line name, e.g. `css-prettify`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CssPrettify => "css-prettify",
            Self::CssMinify => "css-minify",
            Self::HtmlPrettify => "html-prettify",
            Self::HtmlMinify => "html-minify",
        }
    }

    /// Status text shown after a successful run.
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::CssPrettify => "CSS Prettified.",
            Self::CssMinify => "CSS Minified.",
            Self::HtmlPrettify => "HTML Prettified.",
            Self::HtmlMinify => "HTML Minified.",
        }
    }

    /// Transform `text`.
    ///
    /// ## Errors
    ///
    /// See the matching crate-level function.
    pub fn apply(self, text: &str) -> Result<String, FormatError> {
        match self {
            Self::CssPrettify => crate::css_prettify(text),
            Self::CssMinify => crate::css_minify(text),
            Self::HtmlPrettify => crate::html_prettify(text),
            Self::HtmlMinify => crate::html_minify(text),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseOperationError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>(), Ok(op));
        }
        assert_eq!("HTML-Minify".parse::<Operation>(), Ok(Operation::HtmlMinify));
        assert!("js-minify".parse::<Operation>().is_err());
    }

    #[test]
    fn apply_dispatches() {
        assert_eq!(Operation::CssMinify.apply("a { b: c }").unwrap(), "a{b:c}");
        assert_eq!(Operation::HtmlPrettify.success_message(), "HTML Prettified.");
    }
}
