//! CSS token-stream parsing and rewriting for @font-face stylesheets.

pub mod font_face;
pub mod parser;
pub mod rewrite;
pub mod token;

pub use font_face::{declarations, file_name, source_url, DeclarationBlock};
pub use parser::parse_stylesheet;
pub use rewrite::{rewrite_sources, woff2_file_name};
pub use token::{serialize_stylesheet, AtRule, CssToken};
