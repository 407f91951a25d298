//! # gramview
//!
//! Browse a personal social-media data export as a local website. Point it
//! at the exported zip (or an already-extracted folder) and it builds a
//! static site from the archive's photos, videos, and stories, then serves
//! it locally.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Resolve    --input            →  archive directory   (unzip if needed)
//! 2. Link       archive entries    →  src/_data/          (symlinks, no copies)
//! 3. Normalize  media.json records →  sorted, dated feeds
//! 4. Generate   feeds + templates  →  output directory    (then serve)
//! ```
//!
//! Data flows one way. Each stage is a function of its inputs plus the
//! filesystem's current state, so re-running the tool converges instead of
//! accumulating: resolution reuses an extracted archive, linking replaces
//! stale links, feed building recomputes from scratch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`archive`] | Stage 1 — locate the archive; stream-extract zips |
//! | [`linker`] | Stage 2 — symlink archive entries into the data directory |
//! | [`feed`] | Stage 3 — merge, date, filter, and sort the raw records |
//! | [`generate`] | Stage 4 — render the site with Maud, passthrough-copy media |
//! | [`serve`] | Preview server: axum + `ServeDir`, clean URLs |
//! | [`workspace`] | Default output dir with guaranteed-once cleanup |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Symlinks, Not Copies
//!
//! Exports run to gigabytes of media. The data directory holds symlinks
//! into the resolved archive, so building the feeds costs nothing in disk;
//! only the final output gets real copies (making the generated site
//! self-contained and publishable).
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed HTML is a build error, template variables
//! are Rust expressions, and all interpolation is escaped by default —
//! relevant when the "data" is whatever a social network put in an export.
//!
//! ## Composed Server
//!
//! The preview server is axum routing over `tower_http`'s `ServeDir` —
//! no hand-rolled HTTP. Everything before the serve step is synchronous;
//! the tokio runtime exists only while serving.

pub mod archive;
pub mod feed;
pub mod generate;
pub mod linker;
pub mod output;
pub mod serve;
pub mod workspace;

#[cfg(test)]
pub(crate) mod test_helpers;
