//! Error types for fontmirror
//!
//! Every failure aborts the run: the tool is an interactive, offline
//! mirroring step, not a long-lived service, so there is no local recovery
//! anywhere. Each subsystem has its own error enum and the top-level
//! [`Error`] wraps them.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fontmirror operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for fontmirror
#[derive(Error, Debug)]
pub enum Error {
  /// Stylesheet tokenization or rule/declaration shape error
  #[error("Parse error: {0}")]
  Parse(#[from] ParseError),

  /// @font-face descriptor or source-format error
  #[error("Font error: {0}")]
  Font(#[from] FontError),

  /// HTTP fetch error for the stylesheet or a font binary
  #[error("Fetch error: {0}")]
  Fetch(#[from] FetchError),

  /// External WOFF2 compressor error
  #[error("Compress error: {0}")]
  Compress(#[from] CompressError),

  /// I/O error (file writes, directory creation)
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

/// Errors produced while parsing the stylesheet into rules and declarations
#[derive(Error, Debug)]
pub enum ParseError {
  /// The input could not be tokenized as CSS (unterminated string, bad url)
  #[error("cannot tokenize stylesheet: {message}")]
  Tokenize { message: String },

  /// The stylesheet contains a top-level construct other than an at-rule
  #[error("unexpected top-level `{token}`; expected an at-rule")]
  UnexpectedRule { token: String },

  /// A declaration inside a rule block is not of the `ident: value...` shape
  #[error("malformed declaration in @{keyword}: {detail}")]
  MalformedDeclaration { keyword: String, detail: String },
}

/// Errors raised when deriving a file name from @font-face declarations
#[derive(Error, Debug)]
pub enum FontError {
  /// A required declaration is absent
  #[error("@font-face is missing a `{name}` declaration")]
  MissingDeclaration { name: &'static str },

  /// A descriptor value is not a number, identifier or string
  #[error("`{name}` value `{token}` is not a number, identifier or string")]
  InvalidDescriptor { name: &'static str, token: String },

  /// The `src` declaration does not end in a `format()` call
  #[error("src does not end in a format() call")]
  MissingFormat,

  /// The `src` declaration has no `url()` entry to download
  #[error("src has no url() source")]
  MissingSource,

  /// The source format tag is not one we can convert
  #[error("unknown font format `{format}`")]
  UnknownFormat { format: String },
}

/// Errors from HTTP fetches
#[derive(Error, Debug)]
pub enum FetchError {
  /// The server answered with a non-success status
  #[error("GET {url} returned status {status}")]
  Status { url: String, status: u16 },

  /// The request failed before a response was available
  #[error("GET {url} failed: {reason}")]
  Transport { url: String, reason: String },

  /// The response body was expected to be text but is not UTF-8
  #[error("response from {url} is not valid UTF-8")]
  InvalidUtf8 { url: String },
}

/// Errors from the external font compressor invocation
#[derive(Error, Debug)]
pub enum CompressError {
  /// The compressor binary could not be started at all
  #[error("failed to run `{command}`: {reason}")]
  Spawn { command: String, reason: String },

  /// The compressor exited with a non-zero status
  #[error("`{command}` exited with code {code:?}: {stderr}")]
  Failed {
    command: String,
    code: Option<i32>,
    stderr: String,
  },

  /// The compressor reported success but the output file is missing
  #[error("`{command}` succeeded but `{}` was not created", path.display())]
  MissingOutput { command: String, path: PathBuf },
}
