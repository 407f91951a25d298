//! Static site generation.
//!
//! Final stage of the gramview pipeline. Reads the linked data directory,
//! normalizes the feeds, and writes a self-contained static site:
//!
//! ```text
//! output/
//! ├── index.html            # Posts feed (photos + videos, newest first)
//! ├── stories/
//! │   └── index.html        # Stories feed
//! ├── photos/               # Passthrough copies of the archive media
//! ├── videos/
//! ├── stories/…             # Story media alongside the page
//! └── profile/
//! ```
//!
//! Clean URLs fall out of the directory/`index.html` layout — any static
//! file server that resolves directories to their index serves `/` and
//! `/stories/` without extensions.
//!
//! Media directories are copied (following the symlinks the linker made),
//! so the output tree stands on its own and can be moved or published
//! without the archive.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. The
//! stylesheet is embedded at compile time from `static/style.css`.
//!
//! The renderer itself prints nothing; callers report via [`crate::output`].

use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::feed::{self, Account, FeedItem, MediaKind};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("feed error: {0}")]
    Feed(#[from] feed::FeedError),
}

/// What a generation pass produced, for CLI reporting.
#[derive(Debug)]
pub struct SiteSummary {
    pub posts: usize,
    pub stories: usize,
    pub username: String,
}

/// Media directories copied verbatim into the output.
const PASSTHROUGH_DIRS: &[&str] = &["photos", "videos", "stories", "profile"];

const CSS: &str = include_str!("../static/style.css");

/// Build the site from `data_dir` into `output_dir`.
pub fn generate(data_dir: &Path, output_dir: &Path) -> Result<SiteSummary, GenerateError> {
    let media = feed::load_media(data_dir)?;
    let account = feed::load_account(data_dir, &media)?;
    let posts = feed::build_media_feed(&media, data_dir);
    let stories = feed::build_story_feed(&media, data_dir);

    fs::create_dir_all(output_dir)?;

    // Passthrough-copy media so the site is self-contained. read_dir and
    // copy both follow the linker's symlinks.
    for dir in PASSTHROUGH_DIRS {
        let src = data_dir.join(dir);
        if src.is_dir() {
            copy_dir_recursive(&src, &output_dir.join(dir))?;
        }
    }

    let index = render_feed_page(&account, "Posts", &posts);
    fs::write(output_dir.join("index.html"), index.into_string())?;

    let stories_dir = output_dir.join("stories");
    fs::create_dir_all(&stories_dir)?;
    let stories_page = render_feed_page(&account, "Stories", &stories);
    fs::write(stories_dir.join("index.html"), stories_page.into_string())?;

    Ok(SiteSummary {
        posts: posts.len(),
        stories: stories.len(),
        username: account.username,
    })
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the account header: avatar, username, join date, section nav.
fn site_header(account: &Account, current: &str) -> Markup {
    html! {
        header.site-header {
            img.avatar src={ "/" (account.image) } alt=(account.username);
            div.account {
                h1 { (account.username) }
                p.joined { "Joined " (account.date_joined) }
            }
            nav.site-nav {
                ul {
                    @for (label, href) in [("Posts", "/"), ("Stories", "/stories/")] {
                        @let is_current = label == current;
                        li class=[is_current.then_some("current")] {
                            a href=(href) { (label) }
                        }
                    }
                }
            }
        }
    }
}

/// Renders a feed page (posts or stories).
fn render_feed_page(account: &Account, title: &str, items: &[FeedItem]) -> Markup {
    let content = html! {
        (site_header(account, title))
        main.feed {
            @if items.is_empty() {
                p.feed-empty { "Nothing here." }
            }
            div.feed-grid {
                @for item in items {
                    (render_feed_item(item))
                }
            }
        }
    };
    base_document(&format!("{} — {}", account.username, title), content)
}

/// Renders one feed entry. Untagged items (stories with an extension we
/// don't recognize) get a plain link rather than being dropped.
fn render_feed_item(item: &FeedItem) -> Markup {
    let src = format!("/{}", item.path);
    html! {
        figure.feed-item {
            @match item.kind {
                Some(MediaKind::Photo) => {
                    img src=(src) alt=(item.formatted_date) loading="lazy";
                }
                Some(MediaKind::Video) => {
                    video src=(src) controls preload="metadata" {}
                }
                None => {
                    a.feed-file href=(src) { (item.path) }
                }
            }
            figcaption { (item.formatted_date) }
        }
    }
}
