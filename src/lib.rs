pub mod compress;
pub mod css;
pub mod error;
pub mod mirror;
pub mod resource;

pub use compress::{Woff2Compressor, DEFAULT_COMPRESS_COMMAND};
pub use error::{Error, Result};
pub use mirror::{mirror_stylesheet, MirrorOptions, MirrorReport, MirroredFace};
pub use resource::{HttpFetcher, ResourceFetcher, DEFAULT_USER_AGENT};
