//! Archive location and extraction.
//!
//! Stage 1 of the gramview pipeline. Resolves the user-supplied `--input`
//! path to a directory containing the export's contents, extracting a zip
//! archive when necessary.
//!
//! ## Resolution Rules
//!
//! | Input | Result |
//! |-------|--------|
//! | path does not exist | [`ArchiveError::InputNotFound`] |
//! | directory | accepted directly (after confirmation) |
//! | regular file, not a zip | [`ArchiveError::UnsupportedFormat`] |
//! | zip, sibling dir already extracted | reuse the directory, skip extraction |
//! | zip | extract next to the archive, return the new directory |
//!
//! "Is this a zip?" is answered by opening the archive structure, not by
//! looking at the filename — a renamed `.txt` will be rejected, a zip
//! without the extension accepted.
//!
//! ## Idempotence
//!
//! Extraction lands at the input path with its `.zip` suffix stripped.
//! A second run against the same archive finds that directory, confirms,
//! and short-circuits — the archive is never unpacked twice. Re-extracting
//! into an existing destination overwrites files in place.
//!
//! Confirmation prompts are the caller's concern: every decision point
//! calls back through a `confirm` closure, so the CLI can wire up an
//! interactive prompt and tests can answer unconditionally.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("input path does not exist: {0}")]
    InputNotFound(PathBuf),
    #[error("input is neither a directory nor a zip archive: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("failed to extract {path}: {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("declined to use {0}")]
    Declined(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Resolve the user-supplied input path to a usable archive directory.
///
/// `confirm` is invoked with a short question for every decision that the
/// operator should get a say in: using a bare directory, reusing an
/// already-extracted one, and unpacking a zip. Returning `false` aborts
/// resolution with [`ArchiveError::Declined`].
pub fn resolve(
    input: &Path,
    mut confirm: impl FnMut(&str) -> bool,
) -> Result<PathBuf, ArchiveError> {
    if !input.exists() {
        return Err(ArchiveError::InputNotFound(input.to_path_buf()));
    }

    if input.is_dir() {
        if confirm(&format!("Use folder: {}?", input.display())) {
            return Ok(input.to_path_buf());
        }
        return Err(ArchiveError::Declined(input.to_path_buf()));
    }

    if !is_zip_file(input) {
        return Err(ArchiveError::UnsupportedFormat(input.to_path_buf()));
    }

    let dest = strip_zip_suffix(input);

    // A previous run may already have unpacked this archive.
    if dest.is_dir()
        && !is_dir_empty(&dest)?
        && confirm(&format!(
            "Use existing unzipped folder: {}?",
            dest.display()
        ))
    {
        return Ok(dest);
    }

    if !confirm(&format!(
        "Unzip {} to: {}?",
        input.display(),
        dest.display()
    )) {
        return Err(ArchiveError::Declined(input.to_path_buf()));
    }

    extract(input, &dest)?;
    Ok(dest)
}

/// Check whether a file is a readable zip archive.
///
/// Opens the central directory rather than trusting the extension.
pub fn is_zip_file(path: &Path) -> bool {
    File::open(path)
        .map(|f| zip::ZipArchive::new(f).is_ok())
        .unwrap_or(false)
}

/// Stream-extract a zip archive into `dest`.
///
/// Entries are copied one at a time — the archive is never held in memory
/// wholesale. Existing files are overwritten, so re-extraction into the
/// same destination is safe. Entry names that would escape `dest` are
/// rejected.
pub fn extract(zip_path: &Path, dest: &Path) -> Result<(), ArchiveError> {
    let wrap = |source: io::Error| ArchiveError::Extraction {
        path: zip_path.to_path_buf(),
        source,
    };
    let wrap_zip = |e: zip::result::ZipError| ArchiveError::Extraction {
        path: zip_path.to_path_buf(),
        source: io::Error::other(e),
    };

    let file = File::open(zip_path).map_err(wrap)?;
    let mut archive = zip::ZipArchive::new(file).map_err(wrap_zip)?;

    fs::create_dir_all(dest).map_err(wrap)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(wrap_zip)?;

        // enclosed_name rejects absolute paths and `..` components.
        let Some(rel) = entry.enclosed_name() else {
            return Err(wrap(io::Error::other(format!(
                "entry escapes destination: {}",
                entry.name()
            ))));
        };
        let out_path = dest.join(rel);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(wrap)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }
        let mut out = File::create(&out_path).map_err(wrap)?;
        io::copy(&mut entry, &mut out).map_err(wrap)?;
    }

    Ok(())
}

/// `archive.zip` → `archive`; paths without the suffix pass through.
fn strip_zip_suffix(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("zip") => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}

fn is_dir_empty(dir: &Path) -> Result<bool, io::Error> {
    Ok(fs::read_dir(dir)?.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_zip;
    use tempfile::TempDir;

    fn yes(_: &str) -> bool {
        true
    }

    #[test]
    fn missing_input_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = resolve(&tmp.path().join("missing.zip"), yes);
        assert!(matches!(result, Err(ArchiveError::InputNotFound(_))));
    }

    #[test]
    fn directory_accepted_directly() {
        let tmp = TempDir::new().unwrap();
        let resolved = resolve(tmp.path(), yes).unwrap();
        assert_eq!(resolved, tmp.path());
    }

    #[test]
    fn directory_declined() {
        let tmp = TempDir::new().unwrap();
        let result = resolve(tmp.path(), |_| false);
        assert!(matches!(result, Err(ArchiveError::Declined(_))));
    }

    #[test]
    fn non_zip_file_is_unsupported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("export.zip");
        fs::write(&path, "not a zip at all").unwrap();

        let result = resolve(&path, yes);
        assert!(matches!(result, Err(ArchiveError::UnsupportedFormat(_))));
    }

    #[test]
    fn zip_detected_by_structure_not_name() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("export.bin");
        write_zip(&path, &[("profile.json", b"{}")]);

        assert!(is_zip_file(&path));
    }

    #[test]
    fn zip_extracts_next_to_archive() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("export.zip");
        write_zip(
            &path,
            &[("profile.json", b"{}"), ("photos/a.jpg", b"jpeg bytes")],
        );

        let resolved = resolve(&path, yes).unwrap();
        assert_eq!(resolved, tmp.path().join("export"));
        assert!(resolved.join("profile.json").is_file());
        assert!(resolved.join("photos/a.jpg").is_file());
    }

    #[test]
    fn second_resolve_reuses_extracted_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("export.zip");
        write_zip(&path, &[("profile.json", b"{}")]);

        let first = resolve(&path, yes).unwrap();

        // Drop a marker, then resolve again. If extraction re-ran the
        // marker would survive but the confirmation trace proves reuse.
        fs::write(first.join("marker"), "x").unwrap();
        let mut prompts = Vec::new();
        let second = resolve(&path, |msg| {
            prompts.push(msg.to_string());
            true
        })
        .unwrap();

        assert_eq!(first, second);
        assert!(second.join("marker").is_file());
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("existing unzipped folder"));
    }

    #[test]
    fn declined_extraction_stops_run() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("export.zip");
        write_zip(&path, &[("profile.json", b"{}")]);

        let result = resolve(&path, |_| false);
        assert!(matches!(result, Err(ArchiveError::Declined(_))));
        assert!(!tmp.path().join("export").exists());
    }

    #[test]
    fn re_extraction_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("export.zip");
        write_zip(&path, &[("profile.json", b"new")]);

        let dest = tmp.path().join("export");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("profile.json"), "old").unwrap();

        extract(&path, &dest).unwrap();
        assert_eq!(fs::read_to_string(dest.join("profile.json")).unwrap(), "new");
    }

    #[test]
    fn strip_suffix_variants() {
        assert_eq!(
            strip_zip_suffix(Path::new("/a/export.zip")),
            PathBuf::from("/a/export")
        );
        assert_eq!(
            strip_zip_suffix(Path::new("/a/export")),
            PathBuf::from("/a/export")
        );
    }
}
