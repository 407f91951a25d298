//! Shared test utilities for the gramview test suite.
//!
//! Builds synthetic archives and data directories in temp dirs so tests
//! never depend on a real export. Two flavors:
//!
//! - [`setup_data_dir`]: a ready-to-render data directory (media files on
//!   disk, `media.json` + `profile.json` written) plus the parsed
//!   [`MediaFile`] for direct feed calls.
//! - [`write_zip`]: a zip archive from (name, bytes) pairs for testing
//!   location and extraction.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

use crate::feed::{MediaFile, MediaRecord};

/// Shorthand for a raw media record.
pub fn record(path: &str, taken_at: i64) -> MediaRecord {
    MediaRecord {
        path: path.to_string(),
        taken_at,
    }
}

/// Create a data directory containing the given photos/videos/stories
/// (each a `(path, taken_at)` pair), a profile image, `profile.json`,
/// and a matching `media.json`. Returns the dir and the parsed records.
pub fn setup_data_dir(
    photos: &[(&str, i64)],
    videos: &[(&str, i64)],
    stories: &[(&str, i64)],
) -> (TempDir, MediaFile) {
    let tmp = TempDir::new().unwrap();

    let entry_json = |entries: &[(&str, i64)]| -> Vec<serde_json::Value> {
        entries
            .iter()
            .map(|(path, taken_at)| {
                write_media_file(tmp.path(), path);
                serde_json::json!({ "path": path, "taken_at": taken_at })
            })
            .collect()
    };

    let photos_json = entry_json(photos);
    let videos_json = entry_json(videos);
    let stories_json = entry_json(stories);

    write_media_file(tmp.path(), "profile/avatar.jpg");
    let media_json = serde_json::json!({
        "photos": photos_json,
        "videos": videos_json,
        "stories": stories_json,
        "profile": [{ "path": "profile/avatar.jpg", "taken_at": 1_371_240_000 }],
    });
    fs::write(
        tmp.path().join("media.json"),
        serde_json::to_string_pretty(&media_json).unwrap(),
    )
    .unwrap();

    fs::write(
        tmp.path().join("profile.json"),
        r#"{ "username": "casey", "date_joined": "2013-06-14T20:01:02+00:00" }"#,
    )
    .unwrap();

    let media: MediaFile =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("media.json")).unwrap()).unwrap();
    (tmp, media)
}

fn write_media_file(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "media bytes").unwrap();
}

/// Write a zip archive at `path` from (entry name, contents) pairs.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    for (name, bytes) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
}
