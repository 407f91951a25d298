//! Feed normalization.
//!
//! Stage 3 of the gramview pipeline. Reads the archive's raw record
//! collections through the linked data directory and produces the unified
//! feeds the renderer consumes.
//!
//! ## Input Contract
//!
//! `media.json` carries four top-level collections — `photos`, `videos`,
//! `stories`, `profile` — each an ordered list of records with at least a
//! `path` (archive-relative) and a `taken_at` (unix seconds). `profile.json`
//! carries `username` and `date_joined` (an ISO date string). Collections
//! missing from an older export parse as empty rather than failing.
//!
//! ## Normalization
//!
//! The media feed smashes videos and photos together, tags each item with
//! its kind, attaches a parsed date plus a human-readable form ("3rd August
//! 2020"), drops anything whose backing file is not actually on disk, and
//! sorts newest-first. Stories go through the same steps except the kind is
//! inferred from the path's extension (`.jpg` → photo, `.mp4` → video,
//! anything else stays untagged and is kept — the renderer decides what to
//! do with it).
//!
//! Feed building is a pure function of the JSON plus the filesystem's
//! existence state at call time: no caches, no side effects, safe to
//! recompute on every build.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("profile has no entries in media.json")]
    MissingProfileImage,
    #[error("unparseable date_joined: {0}")]
    BadJoinDate(String),
}

/// One raw record as it appears in `media.json`. Photos, videos, stories,
/// and profile images all share this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaRecord {
    /// Archive-relative path, e.g. `photos/201808/a1b2.jpg`.
    pub path: String,
    /// Unix timestamp in seconds.
    pub taken_at: i64,
}

/// The archive's `media.json`, all collections optional.
#[derive(Debug, Default, Deserialize)]
pub struct MediaFile {
    #[serde(default)]
    pub photos: Vec<MediaRecord>,
    #[serde(default)]
    pub videos: Vec<MediaRecord>,
    #[serde(default)]
    pub stories: Vec<MediaRecord>,
    #[serde(default)]
    pub profile: Vec<MediaRecord>,
}

/// The archive's `profile.json`.
#[derive(Debug, Deserialize)]
pub struct Profile {
    pub username: String,
    pub date_joined: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

/// One normalized feed entry, ready for rendering.
///
/// `kind` is always present for media-feed items; story items with an
/// unrecognized extension carry `None` (kept, not dropped).
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub path: String,
    pub kind: Option<MediaKind>,
    pub date: DateTime<Utc>,
    pub formatted_date: String,
}

/// Account header data: username, avatar path, formatted join date.
#[derive(Debug)]
pub struct Account {
    pub username: String,
    pub image: String,
    pub date_joined: String,
}

/// Parse `media.json` from the data directory.
pub fn load_media(data_dir: &Path) -> Result<MediaFile, FeedError> {
    let raw = fs::read_to_string(data_dir.join("media.json"))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Parse `profile.json` + the profile image out of `media.json` into the
/// account header.
pub fn load_account(data_dir: &Path, media: &MediaFile) -> Result<Account, FeedError> {
    let raw = fs::read_to_string(data_dir.join("profile.json"))?;
    let profile: Profile = serde_json::from_str(&raw)?;

    let image = media
        .profile
        .first()
        .map(|r| r.path.clone())
        .ok_or(FeedError::MissingProfileImage)?;

    let joined = parse_joined_date(&profile.date_joined)
        .ok_or_else(|| FeedError::BadJoinDate(profile.date_joined.clone()))?;

    Ok(Account {
        username: profile.username,
        image,
        date_joined: format_feed_date(&joined),
    })
}

/// Build the main feed: videos and photos merged, tagged, dated, filtered
/// to files that exist under `data_dir`, sorted newest-first. Ties keep
/// input order (videos before photos, each in source order).
pub fn build_media_feed(media: &MediaFile, data_dir: &Path) -> Vec<FeedItem> {
    let tagged = media
        .videos
        .iter()
        .map(|r| (r, Some(MediaKind::Video)))
        .chain(media.photos.iter().map(|r| (r, Some(MediaKind::Photo))));
    normalize(tagged, data_dir)
}

/// Build the stories feed. Kind is inferred from the extension; unknown
/// extensions pass through untagged.
pub fn build_story_feed(media: &MediaFile, data_dir: &Path) -> Vec<FeedItem> {
    let tagged = media.stories.iter().map(|r| (r, kind_from_path(&r.path)));
    normalize(tagged, data_dir)
}

fn normalize<'a>(
    records: impl Iterator<Item = (&'a MediaRecord, Option<MediaKind>)>,
    data_dir: &Path,
) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = records
        .filter(|(r, _)| data_dir.join(&r.path).exists())
        .map(|(r, kind)| {
            // Only a missing file excludes a record. A taken_at outside
            // chrono's range clamps to the epoch so the item still shows,
            // sorted to the end of the feed.
            let date = DateTime::from_timestamp(r.taken_at, 0).unwrap_or(DateTime::UNIX_EPOCH);
            FeedItem {
                path: r.path.clone(),
                kind,
                formatted_date: format_feed_date(&date.date_naive()),
                date,
            }
        })
        .collect();

    // Stable sort: equal dates keep input order.
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items
}

fn kind_from_path(path: &str) -> Option<MediaKind> {
    if path.ends_with(".jpg") {
        Some(MediaKind::Photo)
    } else if path.ends_with(".mp4") {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Format a date as "3rd August 2020" — ordinal day, full month, year.
pub fn format_feed_date(date: &NaiveDate) -> String {
    let day = date.day();
    format!("{}{} {} {}", day, ordinal_suffix(day), month_name(date.month()), date.year())
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

/// `date_joined` is an ISO date, with or without a time component.
fn parse_joined_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
