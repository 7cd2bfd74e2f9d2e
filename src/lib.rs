// src/lib.rs
//
// prettymin — CSS/HTML prettifier and minifier driven by character scanners
//
// - CSS prettify: single forward scan tracking comments, strings, rule blocks, property
//   values, calc() expressions and at-rule parameter groups; one declaration per line.
// - CSS minify: regex pipeline that strips comments and layout whitespace.
// - HTML prettify: tokenizer (tags, text, verbatim elements, comments) feeding a renderer
//   with an indent level and an open-element stack. `<style>` bodies go back through the
//   CSS prettifier; text and attribute values are entity-decoded.
// - HTML minify: regex pipeline that strips comments and inter-tag whitespace.
//
// Every operation is a pure `&str -> Result<String, FormatError>` function. A failure means
// "no output": callers must not apply partial results.

pub mod css;
pub mod entities;
pub mod error;
pub mod html;
pub mod operation;

pub use error::{FormatError, ParseOperationError};
pub use operation::Operation;

/// Prettify CSS.
///
/// ## Errors
///
/// [`FormatError::InvalidCss`] if the text cannot be reformatted.
pub fn css_prettify(text: &str) -> Result<String, FormatError> {
    guard("css-prettify", text, FormatError::InvalidCss, css::prettify)
}

/// Minify CSS.
///
/// ## Errors
///
/// Never fails today; the signature matches the other operations.
pub fn css_minify(text: &str) -> Result<String, FormatError> {
    guard("css-minify", text, FormatError::InvalidCss, |t| Ok(css::minify(t)))
}

/// Prettify HTML, reformatting embedded `<style>` blocks as CSS.
///
/// ## Errors
///
/// [`FormatError::InvalidHtml`] if the text (or an embedded style block) cannot be
/// reformatted.
pub fn html_prettify(text: &str) -> Result<String, FormatError> {
    guard("html-prettify", text, FormatError::InvalidHtml, |t| {
        html::prettify(t, css::prettify)
    })
}

/// Minify HTML.
///
/// ## Errors
///
/// Never fails today; the signature matches the other operations.
pub fn html_minify(text: &str) -> Result<String, FormatError> {
    guard("html-minify", text, FormatError::InvalidHtml, |t| Ok(html::minify(t)))
}

/// Run `op`, collapsing any failure into the single user-facing error for its language.
fn guard<F>(name: &str, text: &str, failure: FormatError, op: F) -> Result<String, FormatError>
where
    F: FnOnce(&str) -> Result<String, FormatError>,
{
    log::debug!("{name}: {} bytes in", text.len());
    match op(text) {
        Ok(out) => {
            log::debug!("{name}: {} bytes out", out.len());
            Ok(out)
        }
        Err(e) => {
            log::warn!("{name} failed: {e:?}");
            Err(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_failures_surface_as_html_errors() {
        let bad = |_: &str| -> Result<String, FormatError> { Err(FormatError::InvalidCss) };
        assert_eq!(
            guard("t", "x", FormatError::InvalidHtml, bad),
            Err(FormatError::InvalidHtml)
        );
    }

    #[test]
    fn entry_points_agree_with_modules() {
        let css = "a{b:c}";
        assert_eq!(css_prettify(css).unwrap(), css::prettify(css).unwrap());
        assert_eq!(css_minify("a { b: c; }").unwrap(), "a{b:c}");
        assert_eq!(html_minify("<i> x </i>\n<b></b>").unwrap(), "<i> x </i><b></b>");
        assert_eq!(html_prettify("  <p>x</p>  ").unwrap(), "<p>x</p>");
    }
}
