//! External WOFF2 compressor invocation
//!
//! Compression itself is an opaque external collaborator: the tool shells
//! out to Google's `woff2_compress` (or a configured replacement), which
//! takes the font path as its sole argument and writes a sibling file with
//! a `.woff2` extension. The invocation is synchronous; a non-zero exit
//! aborts the run with the tool's captured stderr.

use crate::error::{CompressError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default compressor binary, expected on PATH.
pub const DEFAULT_COMPRESS_COMMAND: &str = "woff2_compress";

/// Wrapper around the external WOFF2 compressor.
#[derive(Debug, Clone)]
pub struct Woff2Compressor {
  command: String,
}

impl Default for Woff2Compressor {
  fn default() -> Self {
    Self::new()
  }
}

impl Woff2Compressor {
  pub fn new() -> Self {
    Self {
      command: DEFAULT_COMPRESS_COMMAND.to_string(),
    }
  }

  /// Use a different compressor binary.
  pub fn with_command(command: impl Into<String>) -> Self {
    Self {
      command: command.into(),
    }
  }

  /// Compresses `font_path`, returning the path of the `.woff2` sibling.
  pub fn compress(&self, font_path: &Path) -> Result<PathBuf> {
    log::debug!("running {} {}", self.command, font_path.display());
    let output = Command::new(&self.command)
      .arg(font_path)
      .output()
      .map_err(|err| CompressError::Spawn {
        command: self.command.clone(),
        reason: err.to_string(),
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
      return Err(
        CompressError::Failed {
          command: self.command.clone(),
          code: output.status.code(),
          stderr,
        }
        .into(),
      );
    }

    let woff2_path = font_path.with_extension("woff2");
    if !woff2_path.exists() {
      return Err(
        CompressError::MissingOutput {
          command: self.command.clone(),
          path: woff2_path,
        }
        .into(),
      );
    }
    Ok(woff2_path)
  }
}
