// src/css/mod.rs
//
// CSS prettifier (character scanner) and minifier (regex pipeline).

mod minify;
mod prettify;

pub use minify::minify;
pub use prettify::prettify;
