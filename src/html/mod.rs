// src/html/mod.rs
//
// HTML prettifier (tokenizer → renderer) and minifier (regex pipeline).

mod minify;
pub mod render;
pub mod tags;
pub mod tokenizer;

pub use minify::minify;
pub use render::{RenderState, Renderer, StyleFormatter};
pub use tokenizer::{tokenize, Token, Tokenizer};

use crate::error::FormatError;

/// Reformat `text` one element per line with tab indentation, delegating `<style>` bodies to
/// `format_style`.
///
/// ## Errors
///
/// Propagates failures of `format_style`, and fails if the output is not valid UTF-8.
pub fn prettify(text: &str, format_style: StyleFormatter) -> Result<String, FormatError> {
    let tokens: Vec<Token<'_>> = tokenize(text.trim()).collect();
    Renderer::new(format_style).render(&tokens)
}
