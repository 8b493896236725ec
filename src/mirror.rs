//! Mirroring pipeline
//!
//! Fetch the stylesheet, compute a local file name per `@font-face` rule,
//! download and compress each font, then rewrite and re-serialize the
//! stylesheet. Fully sequential: every fetch, file write and compressor
//! run completes before the next begins, and rules are processed in
//! stylesheet order in both passes.
//!
//! Re-runs are cheap: a font that already exists on disk is not fetched
//! again, and an existing `.woff2` sibling skips compression.

use crate::compress::Woff2Compressor;
use crate::css::{
  declarations, file_name, parse_stylesheet, rewrite_sources, serialize_stylesheet, source_url,
};
use crate::error::Result;
use crate::resource::ResourceFetcher;
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct MirrorOptions {
  /// URL prefix under which the mirrored files will be served. A trailing
  /// `/` is stripped; empty means bare relative references.
  pub url_prefix: String,
  /// Directory receiving the font files.
  pub out_dir: PathBuf,
}

impl Default for MirrorOptions {
  fn default() -> Self {
    Self {
      url_prefix: String::new(),
      out_dir: PathBuf::from("."),
    }
  }
}

/// One mirrored `@font-face` entry.
#[derive(Debug, Clone)]
pub struct MirroredFace {
  /// Computed local file name, e.g. `Fira_Code-normal-400.ttf`.
  pub file_name: String,
  /// Where the font binary was (or would have been) downloaded from.
  pub source_url: String,
  /// False when an existing file on disk was reused.
  pub downloaded: bool,
  /// False when an existing `.woff2` sibling was reused.
  pub compressed: bool,
}

/// Outcome of a mirroring run.
#[derive(Debug, Clone)]
pub struct MirrorReport {
  /// The rewritten stylesheet text.
  pub stylesheet: String,
  /// Per-face outcomes, in rule order.
  pub faces: Vec<MirroredFace>,
}

/// Mirrors the stylesheet at `css_url`: downloads every referenced font,
/// compresses it to WOFF2 and returns the rewritten stylesheet.
pub fn mirror_stylesheet<F: ResourceFetcher>(
  css_url: &str,
  fetcher: &F,
  compressor: &Woff2Compressor,
  options: &MirrorOptions,
) -> Result<MirrorReport> {
  let url_prefix = options.url_prefix.trim_end_matches('/');
  let css = fetcher.fetch_text(css_url)?;
  let mut rules = parse_stylesheet(&css)?;

  let mut names = Vec::new();
  let mut faces = Vec::new();
  fs::create_dir_all(&options.out_dir)?;

  // First pass: name, download and compress each face.
  for rule in &rules {
    let block = declarations(rule)?;
    if block.is_empty() {
      continue;
    }
    let name = file_name(&block)?;
    let source = absolutize(css_url, source_url(&block)?);
    log::info!("{name}");

    let font_path = options.out_dir.join(&name);
    let mut downloaded = false;
    if font_path.exists() {
      log::debug!("reusing existing {}", font_path.display());
    } else {
      let bytes = fetcher.fetch(&source)?;
      fs::write(&font_path, bytes)?;
      downloaded = true;
    }

    let woff2_path = font_path.with_extension("woff2");
    let mut compressed = false;
    if woff2_path.exists() {
      log::debug!("reusing existing {}", woff2_path.display());
    } else {
      compressor.compress(&font_path)?;
      compressed = true;
    }

    names.push(name.clone());
    faces.push(MirroredFace {
      file_name: name,
      source_url: source,
      downloaded,
      compressed,
    });
  }

  // Second pass: splice the local references into the rules.
  rewrite_sources(&mut rules, names, url_prefix);

  Ok(MirrorReport {
    stylesheet: serialize_stylesheet(&rules),
    faces,
  })
}

/// Resolves a possibly-relative source reference against the stylesheet URL.
fn absolutize(css_url: &str, source: &str) -> String {
  if Url::parse(source).is_ok() {
    return source.to_string();
  }
  Url::parse(css_url)
    .ok()
    .and_then(|base| base.join(source).ok())
    .map(|resolved| resolved.to_string())
    .unwrap_or_else(|| source.to_string())
}
