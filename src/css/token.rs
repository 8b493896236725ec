//! Owned CSS token model
//!
//! The tokenizer in [`crate::css::parser`] converts `cssparser`'s borrowing
//! stream into this owned representation so that rules can outlive the
//! source text, be spliced by the rewriter and be serialized back out.
//!
//! Numbers and `url()` references keep their exact source spelling
//! (`repr`) so re-serialization does not mangle values whose parsed form
//! loses information (leading zeros in unicode-range fragments, unquoted
//! urls). Tokens built programmatically synthesize a representation.

use cssparser::{serialize_identifier, serialize_string};
use std::fmt;

/// A syntactic unit of CSS, owned and cloneable.
#[derive(Debug, Clone, PartialEq)]
pub enum CssToken {
  /// A whitespace run, stored verbatim.
  Whitespace(String),
  /// An identifier, e.g. `normal`.
  Ident(String),
  /// A quoted string; the value excludes the quotes.
  String(String),
  /// A numeric value. `repr` is the source spelling.
  Number {
    value: f32,
    int_value: Option<i32>,
    repr: String,
  },
  /// A `url(...)` resource reference. `repr` is the full `url(...)` text.
  Url { value: String, repr: String },
  /// Single-character punctuation: `:`, `;`, `,` and other delimiters.
  Literal(char),
  /// A function invocation with its argument tokens, e.g. `format("woff2")`.
  Function {
    name: String,
    arguments: Vec<CssToken>,
  },
  /// Any other token (dimensions, hashes, nested blocks), preserved verbatim.
  Raw(String),
}

impl CssToken {
  /// Builds an unquoted `url()` token for `value`.
  ///
  /// The caller is responsible for `value` containing no characters that
  /// would terminate an unquoted url (whitespace, quotes, parentheses);
  /// file names produced by [`crate::css::font_face::file_name`] and URL
  /// prefixes satisfy this.
  pub fn url(value: impl Into<String>) -> CssToken {
    let value = value.into();
    let repr = format!("url({value})");
    CssToken::Url { value, repr }
  }

  /// Returns true for whitespace tokens.
  pub fn is_whitespace(&self) -> bool {
    matches!(self, CssToken::Whitespace(_))
  }

  /// Serializes this token as CSS text into `out`.
  pub fn write_css<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
    match self {
      CssToken::Whitespace(ws) => out.write_str(ws),
      CssToken::Ident(name) => serialize_identifier(name, out),
      CssToken::String(value) => serialize_string(value, out),
      CssToken::Number { repr, .. } => out.write_str(repr),
      CssToken::Url { repr, .. } => out.write_str(repr),
      CssToken::Literal(c) => out.write_char(*c),
      CssToken::Function { name, arguments } => {
        serialize_identifier(name, out)?;
        out.write_char('(')?;
        for argument in arguments {
          argument.write_css(out)?;
        }
        out.write_char(')')
      }
      CssToken::Raw(text) => out.write_str(text),
    }
  }

  /// Serializes this token to a fresh string.
  pub fn to_css_string(&self) -> String {
    let mut out = String::new();
    self
      .write_css(&mut out)
      .expect("writing to a String cannot fail");
    out
  }
}

/// A CSS at-rule: keyword, prelude tokens and (optionally) a block.
///
/// In this domain the keyword is `font-face` for every rule of interest;
/// block-less rules such as `@import ...;` are carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
  /// The lowercased at-keyword without the leading `@`.
  pub keyword: String,
  /// Tokens between the keyword and the block (usually one whitespace run).
  pub prelude: Vec<CssToken>,
  /// The block's content tokens, interior whitespace preserved.
  pub content: Vec<CssToken>,
  /// Whether the rule had a `{ ... }` block (false for `@import ...;`).
  pub has_block: bool,
}

impl AtRule {
  /// Serializes this rule as CSS text into `out`.
  pub fn write_css<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
    out.write_char('@')?;
    serialize_identifier(&self.keyword, out)?;
    for token in &self.prelude {
      token.write_css(out)?;
    }
    if self.has_block {
      out.write_char('{')?;
      for token in &self.content {
        token.write_css(out)?;
      }
      out.write_char('}')
    } else {
      out.write_char(';')
    }
  }

  /// Serializes this rule to a fresh string.
  pub fn to_css_string(&self) -> String {
    let mut out = String::new();
    self
      .write_css(&mut out)
      .expect("writing to a String cannot fail");
    out
  }
}

/// Serializes a rule sequence back to stylesheet text, one rule per line.
///
/// Top-level whitespace is discarded during parsing, so the separator is
/// reintroduced here.
pub fn serialize_stylesheet(rules: &[AtRule]) -> String {
  let mut out = String::new();
  for (i, rule) in rules.iter().enumerate() {
    if i > 0 {
      out.push('\n');
    }
    rule
      .write_css(&mut out)
      .expect("writing to a String cannot fail");
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_constructor_builds_repr() {
    let token = CssToken::url("fonts/a.woff2");
    assert_eq!(token.to_css_string(), "url(fonts/a.woff2)");
  }

  #[test]
  fn function_serializes_name_and_arguments() {
    let token = CssToken::Function {
      name: "format".to_string(),
      arguments: vec![CssToken::String("woff2".to_string())],
    };
    assert_eq!(token.to_css_string(), "format(\"woff2\")");
  }

  #[test]
  fn number_serializes_source_repr() {
    let token = CssToken::Number {
      value: 25.0,
      int_value: Some(25),
      repr: "0025".to_string(),
    };
    assert_eq!(token.to_css_string(), "0025");
  }

  #[test]
  fn string_serialization_escapes_quotes() {
    let token = CssToken::String("Fira \"Code\"".to_string());
    assert_eq!(token.to_css_string(), "\"Fira \\\"Code\\\"\"");
  }

  #[test]
  fn blockless_rule_serializes_with_semicolon() {
    let rule = AtRule {
      keyword: "import".to_string(),
      prelude: vec![
        CssToken::Whitespace(" ".to_string()),
        CssToken::String("reset.css".to_string()),
      ],
      content: Vec::new(),
      has_block: false,
    };
    assert_eq!(rule.to_css_string(), "@import \"reset.css\";");
  }
}
