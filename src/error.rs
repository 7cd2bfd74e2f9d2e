// src/error.rs
//
// Failures surfaced at the operation boundary. The scanners degrade gracefully on
// malformed markup, so these only fire when a scan produces something unusable;
// the Display text is the exact message shown to the user.

use thiserror::Error;

/// A transformation that could not produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Invalid CSS selected.")]
    InvalidCss,

    #[error("Invalid HTML selected.")]
    InvalidHtml,
}

/// Unknown name passed to `Operation::from_str`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation '{0}' (expected css-prettify, css-minify, html-prettify or html-minify)")]
pub struct ParseOperationError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_host_wording() {
        assert_eq!(FormatError::InvalidCss.to_string(), "Invalid CSS selected.");
        assert_eq!(FormatError::InvalidHtml.to_string(), "Invalid HTML selected.");
    }

    #[test]
    fn parse_error_names_the_input() {
        let e = ParseOperationError("js-minify".to_string());
        assert!(e.to_string().contains("'js-minify'"));
    }
}
