//! Resource-reference splicing
//!
//! Second pass of the pipeline: once a file name has been computed for
//! every `@font-face` rule, each `url()` token in a rule body is expanded
//! into a two-entry source list — a WOFF2 entry first, then the original
//! entry relocated to the mirror prefix:
//!
//! ```css
//! src: url(https://fonts.gstatic.com/.../a.ttf) format('truetype');
//! ```
//!
//! becomes
//!
//! ```css
//! src:
//!     url(<prefix>/Family-style-weight.woff2) format("woff2"),
//!     url(<prefix>/Family-style-weight.ttf) format('truetype');
//! ```
//!
//! The relocated entry is a newly built token; the original token's value
//! is not mutated in place.

use crate::css::token::{AtRule, CssToken};
use std::collections::VecDeque;

/// Indentation used for the spliced source entries.
const SOURCE_INDENT: &str = "\n    ";

/// Splices the computed file names into every `@font-face` rule.
///
/// `names` holds one name per `font-face` rule in rule order; they are
/// consumed front-first as `url()` tokens are encountered, so rule *i*
/// always receives name *i*. Rules with other keywords pass through
/// untouched.
///
/// # Panics
///
/// The number of `url()` tokens across all `font-face` rules must equal
/// `names.len()`; a mismatch is a logic error in the calling pass, not a
/// recoverable condition.
pub fn rewrite_sources(rules: &mut [AtRule], names: Vec<String>, url_prefix: &str) {
  let mut queue: VecDeque<String> = names.into();

  for rule in rules.iter_mut() {
    if rule.keyword != "font-face" {
      continue;
    }
    let content = std::mem::take(&mut rule.content);
    let mut patched = Vec::with_capacity(content.len());
    for token in content {
      if matches!(token, CssToken::Url { .. }) {
        let name = queue
          .pop_front()
          .expect("url() token without a computed file name");
        patched.push(CssToken::Whitespace(SOURCE_INDENT.to_string()));
        patched.push(CssToken::url(prefixed(url_prefix, &woff2_file_name(&name))));
        patched.push(CssToken::Whitespace(" ".to_string()));
        patched.push(CssToken::Function {
          name: "format".to_string(),
          arguments: vec![CssToken::String("woff2".to_string())],
        });
        patched.push(CssToken::Literal(','));
        patched.push(CssToken::Whitespace(SOURCE_INDENT.to_string()));
        patched.push(CssToken::url(prefixed(url_prefix, &name)));
      } else {
        patched.push(token);
      }
    }
    rule.content = patched;
  }

  assert!(
    queue.is_empty(),
    "{} computed file name(s) left over after rewriting",
    queue.len()
  );
}

/// The WOFF2 sibling of a computed font file name.
pub fn woff2_file_name(name: &str) -> String {
  match name.rsplit_once('.') {
    Some((stem, _)) => format!("{stem}.woff2"),
    None => format!("{name}.woff2"),
  }
}

/// Joins the mirror prefix and a file name; an empty prefix yields a bare
/// relative path.
fn prefixed(url_prefix: &str, name: &str) -> String {
  if url_prefix.is_empty() {
    name.to_string()
  } else {
    format!("{url_prefix}/{name}")
  }
}
