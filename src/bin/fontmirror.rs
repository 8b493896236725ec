//! Mirror a web font API stylesheet and its fonts locally.

use clap::Parser;
use fontmirror::compress::{Woff2Compressor, DEFAULT_COMPRESS_COMMAND};
use fontmirror::mirror::{mirror_stylesheet, MirrorOptions};
use fontmirror::resource::{HttpFetcher, DEFAULT_USER_AGENT};
use std::path::PathBuf;
use std::time::Duration;

/// Download the fonts behind a @font-face stylesheet, re-encode them as
/// WOFF2 and write a rewritten stylesheet referencing the local copies.
#[derive(Parser, Debug)]
#[command(name = "fontmirror", version, about)]
struct Args {
  /// Stylesheet URL to mirror (e.g. a Google Fonts css2 URL)
  css_url: String,

  /// URL prefix under which the mirrored files will be served
  #[arg(long, default_value = "")]
  url_prefix: String,

  /// Directory receiving the font files and index.css
  #[arg(long, default_value = ".")]
  out_dir: PathBuf,

  /// Print the rewritten stylesheet to stdout instead of writing index.css
  #[arg(long)]
  stdout: bool,

  /// Command used to compress fonts to WOFF2
  #[arg(long, default_value = DEFAULT_COMPRESS_COMMAND)]
  compress_command: String,

  /// Override the User-Agent header
  #[arg(long, default_value = DEFAULT_USER_AGENT)]
  user_agent: String,

  /// HTTP timeout in seconds
  #[arg(long, default_value_t = 30)]
  timeout: u64,
}

fn main() {
  env_logger::init();
  let args = Args::parse();

  let fetcher = HttpFetcher::new()
    .with_timeout(Duration::from_secs(args.timeout))
    .with_user_agent(args.user_agent.clone());
  let compressor = Woff2Compressor::with_command(&args.compress_command);
  let options = MirrorOptions {
    url_prefix: args.url_prefix,
    out_dir: args.out_dir.clone(),
  };

  let report = match mirror_stylesheet(&args.css_url, &fetcher, &compressor, &options) {
    Ok(report) => report,
    Err(err) => {
      eprintln!("{err}");
      std::process::exit(1);
    }
  };

  if args.stdout {
    print!("{}", report.stylesheet);
    return;
  }

  let index_path = args.out_dir.join("index.css");
  if let Err(err) = std::fs::write(&index_path, report.stylesheet) {
    eprintln!("failed to write {}: {err}", index_path.display());
    std::process::exit(1);
  }
  println!(
    "wrote {} ({} face(s), {} downloaded, {} compressed)",
    index_path.display(),
    report.faces.len(),
    report.faces.iter().filter(|f| f.downloaded).count(),
    report.faces.iter().filter(|f| f.compressed).count(),
  );
}
