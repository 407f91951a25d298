use clap::{ArgAction, Parser};
use dialoguer::Confirm;
use std::path::PathBuf;
use std::process::ExitCode;

use gramview::workspace::Workspace;
use gramview::{archive, generate, linker, output, serve};

#[derive(Parser)]
#[command(name = "gramview", version)]
#[command(about = "Browse a social-media data export as a local website")]
#[command(long_about = "\
Browse a social-media data export as a local website

Point gramview at your exported archive (zip or folder) and it builds a
static site from your photos, videos, and stories, then serves it locally.

The archive must contain:

  export/
  ├── profile.json          # username, date_joined
  ├── media.json            # photos/videos/stories/profile record lists
  ├── profile/              # account images
  ├── photos/
  ├── videos/
  └── stories/              # optional — older exports have none

Zips are extracted next to the archive (export.zip → export/); a second
run finds the extracted folder and skips extraction. Archive entries are
symlinked into src/_data; only the generated output holds real copies.")]
struct Cli {
    /// Location of your archive, as a zip file or folder
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Where the local website is generated (default: a temporary
    /// directory removed on exit)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Serve the site after building
    #[arg(long, short = 's', default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    serve: bool,

    /// Preview server port
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Answer yes to all confirmation prompts (and skip the browser-open
    /// prompt) for non-interactive use
    #[arg(long, short = 'y')]
    yes: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Default output is a temp workspace cleaned up on every exit path.
    let mut workspace = None;
    let output_dir = match cli.output.clone() {
        Some(path) => path,
        None => {
            let ws = Workspace::new()?;
            ws.register_signal_cleanup()?;
            let path = ws.path().to_path_buf();
            workspace = Some(ws);
            path
        }
    };

    let assume_yes = cli.yes;
    let confirm = move |message: &str| -> bool {
        if assume_yes {
            return true;
        }
        Confirm::new()
            .with_prompt(message)
            .default(true)
            .interact()
            .unwrap_or(false)
    };

    let archive_dir = archive::resolve(&cli.input, confirm)?;
    println!("==> Archive: {}", archive_dir.display());

    let entries = linker::ARCHIVE_ENTRIES;
    let link_list = entries
        .iter()
        .map(|name| archive_dir.join(name).display().to_string())
        .collect::<Vec<_>>()
        .join(",\n");
    if !confirm(&format!(
        "Create a symbolic link to your input folder for the following files and folders?\n{link_list}"
    )) {
        return Err("no permission to link files from archive, stopping".into());
    }

    println!("==> Linking archive into {}", linker::DATA_DIR);
    let data_dir = PathBuf::from(linker::DATA_DIR);
    std::fs::create_dir_all(&data_dir)?;
    let reports = linker::link_entries(&archive_dir, &data_dir, entries);
    output::print_link_reports(&reports);

    let summary = generate::generate(&data_dir, &output_dir)?;
    output::print_site_summary(&summary, &output_dir);

    if !cli.serve {
        drop(workspace);
        return Ok(());
    }

    serve::serve(&output_dir, cli.port, |url| {
        println!("Running at {url}, use CTRL+C to quit.");
        if !assume_yes
            && Confirm::new()
                .with_prompt(format!("Want to open {url} in your browser?"))
                .default(true)
                .interact()
                .unwrap_or(false)
            && let Err(e) = open::that(url)
        {
            eprintln!("Could not open browser: {e}");
        }
    })?;

    drop(workspace);
    Ok(())
}
