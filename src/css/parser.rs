//! Stylesheet parsing
//!
//! Drives the `cssparser` tokenizer over raw stylesheet text and produces
//! the ordered sequence of top-level at-rules as owned tokens. Comments are
//! discarded everywhere; whitespace is discarded at the top level but
//! preserved inside rule bodies so re-serialization is faithful.
//!
//! Web font API stylesheets consist solely of `@font-face` rules, so a
//! top-level construct that is not an at-rule is a fatal parse error.

use crate::css::token::{AtRule, CssToken};
use crate::error::{Error, ParseError};
use cssparser::{
  BasicParseErrorKind, ParseErrorKind, Parser, ParserInput, SourcePosition, ToCss, Token,
};

type TokenizeError<'i> = cssparser::ParseError<'i, ParseError>;

/// Parses stylesheet text into its top-level at-rules.
pub fn parse_stylesheet(css: &str) -> crate::error::Result<Vec<AtRule>> {
  let mut input = ParserInput::new(css);
  let mut parser = Parser::new(&mut input);
  parse_rules(&mut parser).map_err(from_tokenize_error)
}

fn from_tokenize_error(error: TokenizeError<'_>) -> Error {
  let parse_error = match error.kind {
    ParseErrorKind::Custom(parse_error) => parse_error,
    ParseErrorKind::Basic(basic) => ParseError::Tokenize {
      message: basic_message(basic),
    },
  };
  Error::Parse(parse_error)
}

fn basic_message(kind: BasicParseErrorKind<'_>) -> String {
  match kind {
    BasicParseErrorKind::UnexpectedToken(token) => {
      format!("unexpected token `{}`", token.to_css_string())
    }
    BasicParseErrorKind::EndOfInput => "unexpected end of input".to_string(),
    BasicParseErrorKind::AtRuleInvalid(name) => format!("invalid at-rule `@{name}`"),
    BasicParseErrorKind::AtRuleBodyInvalid => "invalid at-rule body".to_string(),
    BasicParseErrorKind::QualifiedRuleInvalid => "invalid qualified rule".to_string(),
  }
}

fn parse_rules<'i>(parser: &mut Parser<'i, '_>) -> Result<Vec<AtRule>, TokenizeError<'i>> {
  enum TopLevel {
    Done,
    Skip,
    Rule(String),
    Unexpected(String),
  }

  let mut rules = Vec::new();
  loop {
    let next = match parser.next_including_whitespace_and_comments() {
      Err(_) => TopLevel::Done,
      Ok(Token::WhiteSpace(_) | Token::Comment(_)) => TopLevel::Skip,
      Ok(Token::AtKeyword(name)) => TopLevel::Rule(name.to_ascii_lowercase()),
      Ok(token) => TopLevel::Unexpected(token.to_css_string()),
    };
    match next {
      TopLevel::Done => break,
      TopLevel::Skip => continue,
      TopLevel::Rule(keyword) => rules.push(parse_at_rule(parser, keyword)?),
      TopLevel::Unexpected(token) => {
        return Err(parser.new_custom_error(ParseError::UnexpectedRule { token }));
      }
    }
  }
  Ok(rules)
}

/// Consumes one at-rule after its keyword: prelude tokens, then either a
/// `{ ... }` block, a terminating `;`, or end of input.
fn parse_at_rule<'i>(
  parser: &mut Parser<'i, '_>,
  keyword: String,
) -> Result<AtRule, TokenizeError<'i>> {
  let mut prelude = Vec::new();
  loop {
    match step(parser)? {
      Step::End | Step::Semicolon => {
        return Ok(AtRule {
          keyword,
          prelude,
          content: Vec::new(),
          has_block: false,
        });
      }
      Step::BlockStart(_) => {
        let content = parser.parse_nested_block(|block| {
          let mut content = Vec::new();
          consume_block(block, &mut content)?;
          Ok(content)
        })?;
        return Ok(AtRule {
          keyword,
          prelude,
          content,
          has_block: true,
        });
      }
      Step::Token(token) => prelude.push(token),
    }
  }
}

/// Collects the content of the current nested block into `out`.
fn consume_block<'i>(
  parser: &mut Parser<'i, '_>,
  out: &mut Vec<CssToken>,
) -> Result<(), TokenizeError<'i>> {
  loop {
    match step(parser)? {
      Step::End => return Ok(()),
      Step::Semicolon => out.push(CssToken::Literal(';')),
      Step::BlockStart(start) => {
        // A curly block nested inside a rule body; keep it verbatim.
        skip_block(parser)?;
        out.push(CssToken::Raw(parser.slice_from(start).to_string()));
      }
      Step::Token(token) => out.push(token),
    }
  }
}

enum Step {
  Token(CssToken),
  /// A top-level `;` — terminator in preludes, ordinary literal in blocks.
  Semicolon,
  /// A `{` was consumed; the block itself has not been entered yet.
  BlockStart(SourcePosition),
  End,
}

/// Converts the next tokenizer token into an owned token.
///
/// Extracts an owned "shape" first so the borrow of the parser held by the
/// matched token is released before any further parser calls (source
/// slices, nested blocks).
fn step<'i>(parser: &mut Parser<'i, '_>) -> Result<Step, TokenizeError<'i>> {
  enum Shape {
    End,
    Skip,
    Ws(String),
    Ident(String),
    Str(String),
    Num { value: f32, int_value: Option<i32> },
    Url(String),
    Lit(char),
    Semi,
    Func(String),
    InnerBlock,
    CurlyBlock,
    Verbatim,
    Bad(&'static str),
  }

  loop {
    let start = parser.position();
    let shape = match parser.next_including_whitespace_and_comments() {
      Err(_) => Shape::End,
      Ok(token) => match token {
        Token::Comment(_) => Shape::Skip,
        Token::WhiteSpace(ws) => Shape::Ws(ws.to_string()),
        Token::Ident(name) => Shape::Ident(name.to_string()),
        Token::QuotedString(value) => Shape::Str(value.to_string()),
        Token::Number {
          value, int_value, ..
        } => Shape::Num {
          value: *value,
          int_value: *int_value,
        },
        Token::UnquotedUrl(value) => Shape::Url(value.to_string()),
        Token::Colon => Shape::Lit(':'),
        Token::Comma => Shape::Lit(','),
        Token::Semicolon => Shape::Semi,
        Token::Delim(c) => Shape::Lit(*c),
        Token::Function(name) => Shape::Func(name.to_string()),
        Token::ParenthesisBlock | Token::SquareBracketBlock => Shape::InnerBlock,
        Token::CurlyBracketBlock => Shape::CurlyBlock,
        Token::CloseParenthesis => Shape::Lit(')'),
        Token::CloseSquareBracket => Shape::Lit(']'),
        Token::CloseCurlyBracket => Shape::Lit('}'),
        Token::BadUrl(_) => Shape::Bad("unterminated or invalid url()"),
        Token::BadString(_) => Shape::Bad("unterminated string"),
        // Dimensions, percentages, hashes, nested at-keywords and other
        // tokens we never inspect survive via their source text.
        _ => Shape::Verbatim,
      },
    };
    return Ok(match shape {
      Shape::End => Step::End,
      Shape::Skip => continue,
      Shape::Ws(ws) => Step::Token(CssToken::Whitespace(ws)),
      Shape::Ident(name) => Step::Token(CssToken::Ident(name)),
      Shape::Str(value) => Step::Token(CssToken::String(value)),
      Shape::Num { value, int_value } => Step::Token(CssToken::Number {
        value,
        int_value,
        repr: parser.slice_from(start).to_string(),
      }),
      Shape::Url(value) => Step::Token(CssToken::Url {
        value,
        repr: parser.slice_from(start).to_string(),
      }),
      Shape::Lit(c) => Step::Token(CssToken::Literal(c)),
      Shape::Semi => Step::Semicolon,
      Shape::Func(name) => Step::Token(consume_function(parser, start, name)?),
      Shape::InnerBlock => {
        skip_block(parser)?;
        Step::Token(CssToken::Raw(parser.slice_from(start).to_string()))
      }
      Shape::CurlyBlock => Step::BlockStart(start),
      Shape::Verbatim => Step::Token(CssToken::Raw(parser.slice_from(start).to_string())),
      Shape::Bad(message) => {
        return Err(parser.new_custom_error(ParseError::Tokenize {
          message: message.to_string(),
        }));
      }
    });
  }
}

/// Consumes a function's argument block.
///
/// The quoted form `url("...")` tokenizes as a function rather than a url
/// token; it is normalized to [`CssToken::Url`] here so the rewriter sees a
/// single resource-reference shape.
fn consume_function<'i>(
  parser: &mut Parser<'i, '_>,
  start: SourcePosition,
  name: String,
) -> Result<CssToken, TokenizeError<'i>> {
  let arguments = parser.parse_nested_block(|block| {
    let mut arguments = Vec::new();
    consume_block(block, &mut arguments)?;
    Ok(arguments)
  })?;

  if name.eq_ignore_ascii_case("url") {
    let value = arguments.iter().find_map(|token| match token {
      CssToken::String(value) => Some(value.clone()),
      _ => None,
    });
    if let Some(value) = value {
      return Ok(CssToken::Url {
        value,
        repr: parser.slice_from(start).to_string(),
      });
    }
  }

  Ok(CssToken::Function { name, arguments })
}

/// Skips over the current nested block, leaving the parser after its close.
fn skip_block<'i>(parser: &mut Parser<'i, '_>) -> Result<(), TokenizeError<'i>> {
  parser.parse_nested_block(|block| {
    while block.next_including_whitespace_and_comments().is_ok() {}
    Ok(())
  })
}
