use chrono::{Local, NaiveDate};
use clap::Args;
use dailydoro_core::export::{self, SummaryInput};
use dailydoro_core::{Config, ExportFormat, ReflectionNote, SessionLog, TaskList};
use std::path::{Path, PathBuf};

use super::open_store;

#[derive(Args)]
pub struct ExportArgs {
    /// Output format: md or print
    #[arg(long)]
    format: Option<ExportFormat>,
    /// Main activity of the day
    #[arg(long)]
    activity: Option<String>,
    /// Gratitude/reflection note (max 500 characters)
    #[arg(long)]
    reflection: Option<String>,
    /// Output directory
    #[arg(long)]
    out: Option<PathBuf>,
    /// Summary date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
    /// Do not open the print view
    #[arg(long)]
    no_open: bool,
}

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = open_store();
    let log = SessionLog::load(&store);
    let tasks = TaskList::load(&store);
    let reflection = ReflectionNote::new(args.reflection.unwrap_or_default())?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let document = export::generate(&SummaryInput {
        date,
        activity: args.activity.as_deref(),
        // No live timer here: every logged focus phase is a completed cycle.
        completed_cycles: log.focus_count(),
        sessions: log.entries(),
        tasks: &tasks,
        reflection: &reflection,
    });

    if args.stdout {
        print!("{document}");
        return Ok(());
    }

    let format = args.format.unwrap_or(config.export.format);
    let dir = args.out.unwrap_or_else(|| output_dir(&config));
    let path = deliver(format, &dir, date, &document, !args.no_open)?;
    println!("{}", path.display());
    Ok(())
}

/// Configured export directory, or the current directory.
pub(crate) fn output_dir(config: &Config) -> PathBuf {
    config
        .export
        .directory
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Write the export and, for the print view, open it in the browser.
pub(crate) fn deliver(
    format: ExportFormat,
    dir: &Path,
    date: NaiveDate,
    document: &str,
    open_print_view: bool,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = export::write_export(dir, format, date, document)?;
    if format == ExportFormat::Print && open_print_view {
        if let Err(e) = open::that(&path) {
            tracing::warn!(error = %e, path = %path.display(), "could not open print view");
        }
    }
    Ok(path)
}
