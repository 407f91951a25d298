//! Symbolic linking of archive content into the data directory.
//!
//! Stage 2 of the gramview pipeline. The site renderer reads everything from
//! a fixed data directory (`src/_data` in the classic layout); rather than
//! copying gigabytes of media we symlink each well-known entry of the
//! resolved archive into place:
//!
//! ```text
//! <data_dir>/profile.json  →  <archive>/profile.json
//! <data_dir>/media.json    →  <archive>/media.json
//! <data_dir>/profile       →  <archive>/profile
//! <data_dir>/stories       →  <archive>/stories
//! <data_dir>/photos        →  <archive>/photos
//! <data_dir>/videos        →  <archive>/videos
//! ```
//!
//! ## Per-Name Isolation
//!
//! Each name is processed independently: a failure for one never blocks the
//! others, and an entry absent from the archive (many exports have no
//! `stories`) is a skip, not an error. Re-linking replaces any stale link
//! first, so at most one link per name exists at any time and repeated runs
//! converge on the same state.

use std::fs;
use std::io;
use std::path::Path;

/// Where archive entries are linked to, relative to the working directory.
/// The renderer reads everything through this tree.
pub const DATA_DIR: &str = "src/_data";

/// The fixed set of archive entries the renderer expects, in display order.
pub const ARCHIVE_ENTRIES: &[&str] = &[
    "profile.json",
    "media.json",
    "profile",
    "stories",
    "photos",
    "videos",
];

/// What happened to a single entry during linking.
#[derive(Debug)]
pub enum LinkOutcome {
    /// Symlink created (any stale link at the name was replaced).
    Linked,
    /// The archive has no such entry; nothing to do.
    SkippedMissing,
    /// Removing the old link or creating the new one failed.
    Failed(io::Error),
}

/// Result of linking one entry.
#[derive(Debug)]
pub struct LinkReport {
    pub name: String,
    pub outcome: LinkOutcome,
}

impl LinkReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, LinkOutcome::Failed(_))
    }
}

/// Link each named entry of `archive_dir` into `data_dir`.
///
/// Processes every name even when earlier ones fail; the caller decides
/// how loudly to report. All links are in place when this returns — the
/// renderer can read the tree immediately.
pub fn link_entries(archive_dir: &Path, data_dir: &Path, names: &[&str]) -> Vec<LinkReport> {
    names
        .iter()
        .map(|name| LinkReport {
            name: (*name).to_string(),
            outcome: link_entry(&archive_dir.join(name), &data_dir.join(name)),
        })
        .collect()
}

fn link_entry(before: &Path, after: &Path) -> LinkOutcome {
    // Remove a stale link at the destination — the link only, never what
    // it points at. A non-link at the destination is left alone.
    match fs::symlink_metadata(after) {
        Ok(meta) if meta.file_type().is_symlink() => {
            if let Err(e) = fs::remove_file(after) {
                return LinkOutcome::Failed(e);
            }
        }
        _ => {}
    }

    if !before.exists() {
        return LinkOutcome::SkippedMissing;
    }

    match symlink(before, after) {
        Ok(()) => LinkOutcome::Linked,
        Err(e) => LinkOutcome::Failed(e),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
