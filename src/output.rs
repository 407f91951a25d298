//! CLI output formatting for the pipeline stages.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! ==> Archive: /exports/instagram
//! ==> Linking archive into src/_data
//!     linked  profile.json
//!     linked  media.json
//!     skipped stories (not in archive)
//! ==> Site for casey: 42 posts, 7 stories
//!     Output: /tmp/gramview-abc123
//! ```

use std::path::Path;

use crate::generate::SiteSummary;
use crate::linker::{LinkOutcome, LinkReport};

pub fn format_link_reports(reports: &[LinkReport]) -> Vec<String> {
    reports
        .iter()
        .map(|r| match &r.outcome {
            LinkOutcome::Linked => format!("    linked  {}", r.name),
            LinkOutcome::SkippedMissing => {
                format!("    skipped {} (not in archive)", r.name)
            }
            LinkOutcome::Failed(e) => format!("    failed  {}: {}", r.name, e),
        })
        .collect()
}

pub fn format_site_summary(summary: &SiteSummary, output_dir: &Path) -> Vec<String> {
    vec![
        format!(
            "==> Site for {}: {} posts, {} stories",
            summary.username, summary.posts, summary.stories
        ),
        format!("    Output: {}", output_dir.display()),
    ]
}

pub fn print_link_reports(reports: &[LinkReport]) {
    for line in format_link_reports(reports) {
        println!("{line}");
    }
}

pub fn print_site_summary(summary: &SiteSummary, output_dir: &Path) {
    for line in format_site_summary(summary, output_dir) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn link_report_lines() {
        let reports = vec![
            LinkReport {
                name: "media.json".to_string(),
                outcome: LinkOutcome::Linked,
            },
            LinkReport {
                name: "stories".to_string(),
                outcome: LinkOutcome::SkippedMissing,
            },
            LinkReport {
                name: "photos".to_string(),
                outcome: LinkOutcome::Failed(io::Error::other("denied")),
            },
        ];

        let lines = format_link_reports(&reports);
        assert_eq!(lines[0], "    linked  media.json");
        assert_eq!(lines[1], "    skipped stories (not in archive)");
        assert!(lines[2].starts_with("    failed  photos:"));
        assert!(lines[2].contains("denied"));
    }

    #[test]
    fn site_summary_lines() {
        let summary = SiteSummary {
            posts: 42,
            stories: 7,
            username: "casey".to_string(),
        };
        let lines = format_site_summary(&summary, Path::new("/tmp/out"));
        assert_eq!(lines[0], "==> Site for casey: 42 posts, 7 stories");
        assert_eq!(lines[1], "    Output: /tmp/out");
    }
}
