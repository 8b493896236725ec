//! @font-face declaration extraction and file-name derivation
//!
//! Walks one at-rule's token stream, splits it on `;` into
//! `name: value...` declarations, and derives the canonical local file
//! name for the face from its `font-family`/`font-style`/`font-weight`
//! descriptors and the trailing `format()` tag of `src`.
//!
//! Only the legacy TrueType outline format is convertible; any other
//! format tag aborts the run. This is a deliberate narrowing, not a
//! general-purpose converter.

use crate::css::token::{AtRule, CssToken};
use crate::error::{FontError, ParseError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Ordered declarations of one rule block.
///
/// Lookup returns the last declaration with a given name, matching the
/// cascade-like behavior of repeated declarations.
#[derive(Debug, Default, Clone)]
pub struct DeclarationBlock {
  entries: Vec<(String, Vec<CssToken>)>,
}

impl DeclarationBlock {
  /// Value tokens of the last declaration named `name`, if any.
  pub fn get(&self, name: &str) -> Option<&[CssToken]> {
    self
      .entries
      .iter()
      .rev()
      .find(|(key, _)| key == name)
      .map(|(_, values)| values.as_slice())
  }

  /// All declarations in source order.
  pub fn entries(&self) -> &[(String, Vec<CssToken>)] {
    &self.entries
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Extracts the key/value declarations of a `@font-face` rule.
///
/// Rules with any other keyword yield an empty block. Whitespace tokens
/// are dropped from each declaration; a declaration that does not start
/// with `ident ':'` is a fatal contract error. Pure transformation — the
/// rule is not modified.
pub fn declarations(rule: &AtRule) -> Result<DeclarationBlock> {
  let mut block = DeclarationBlock::default();
  if rule.keyword != "font-face" {
    return Ok(block);
  }

  let mut segment: Vec<CssToken> = Vec::new();
  for token in &rule.content {
    if matches!(token, CssToken::Literal(';')) {
      push_declaration(&mut block, &rule.keyword, std::mem::take(&mut segment))?;
    } else if !token.is_whitespace() {
      segment.push(token.clone());
    }
  }
  // A trailing declaration without a terminating `;` still counts.
  push_declaration(&mut block, &rule.keyword, segment)?;

  Ok(block)
}

fn push_declaration(
  block: &mut DeclarationBlock,
  keyword: &str,
  segment: Vec<CssToken>,
) -> Result<()> {
  if segment.is_empty() {
    return Ok(());
  }
  let malformed = |detail: String| ParseError::MalformedDeclaration {
    keyword: keyword.to_string(),
    detail,
  };

  let name = match segment.first() {
    Some(CssToken::Ident(name)) => name.clone(),
    Some(other) => {
      return Err(
        malformed(format!(
          "expected a declaration name, found `{}`",
          other.to_css_string()
        ))
        .into(),
      );
    }
    None => unreachable!("empty segments are skipped"),
  };
  if !matches!(segment.get(1), Some(CssToken::Literal(':'))) {
    return Err(malformed(format!("`{name}` is not followed by `:`")).into());
  }

  block.entries.push((name, segment[2..].to_vec()));
  Ok(())
}

/// Derives the canonical local file name for a face.
///
/// The name is `<family>-<style>-<weight>.<ext>`: numeric descriptor
/// values render as integers, textual ones with every run of `.` or space
/// collapsed to a single `_`. The extension comes from the trailing
/// `format()` call of `src`. Deterministic over its input.
pub fn file_name(block: &DeclarationBlock) -> Result<String> {
  let mut name = String::new();
  for key in ["font-family", "font-style", "font-weight"] {
    if !name.is_empty() {
      name.push('-');
    }
    name.push_str(&descriptor_fragment(block, key)?);
  }
  name.push('.');
  name.push_str(extension(block)?);
  Ok(name)
}

/// Renders one descriptor as a filesystem-safe name fragment.
///
/// `font-style` and `font-weight` fall back to their initial values when
/// absent; a missing `font-family` is fatal.
fn descriptor_fragment(block: &DeclarationBlock, key: &'static str) -> Result<String> {
  let first = block.get(key).and_then(|values| values.first());
  let token = match (first, key) {
    (Some(token), _) => token,
    (None, "font-style") => return Ok("normal".to_string()),
    (None, "font-weight") => return Ok("400".to_string()),
    (None, name) => return Err(FontError::MissingDeclaration { name }.into()),
  };

  match token {
    CssToken::Number {
      value, int_value, ..
    } => Ok(int_value.unwrap_or(*value as i32).to_string()),
    CssToken::Ident(text) | CssToken::String(text) => Ok(sanitize_fragment(text)),
    other => Err(
      FontError::InvalidDescriptor {
        name: key,
        token: other.to_css_string(),
      }
      .into(),
    ),
  }
}

/// Collapses every run of `.` or space to a single `_`.
fn sanitize_fragment(value: &str) -> String {
  static SEPARATORS: OnceLock<Regex> = OnceLock::new();
  let separators = SEPARATORS.get_or_init(|| Regex::new("[. ]+").expect("separator regex"));
  separators.replace_all(value, "_").into_owned()
}

/// Maps the trailing `format()` tag of `src` to a file extension.
fn extension(block: &DeclarationBlock) -> Result<&'static str> {
  let src = block
    .get("src")
    .ok_or(FontError::MissingDeclaration { name: "src" })?;
  let format = match src.last() {
    Some(CssToken::Function { name, arguments }) if name == "format" => arguments
      .iter()
      .find_map(|token| match token {
        CssToken::String(tag) | CssToken::Ident(tag) => Some(tag.as_str()),
        _ => None,
      })
      .ok_or(FontError::MissingFormat)?,
    _ => return Err(FontError::MissingFormat.into()),
  };

  if format == "truetype" {
    Ok("ttf")
  } else {
    Err(
      FontError::UnknownFormat {
        format: format.to_string(),
      }
      .into(),
    )
  }
}

/// The download URL of a face: the first `url()` entry of `src`.
pub fn source_url(block: &DeclarationBlock) -> Result<&str> {
  let src = block
    .get("src")
    .ok_or(FontError::MissingDeclaration { name: "src" })?;
  src
    .iter()
    .find_map(|token| match token {
      CssToken::Url { value, .. } => Some(value.as_str()),
      _ => None,
    })
    .ok_or_else(|| FontError::MissingSource.into())
}
