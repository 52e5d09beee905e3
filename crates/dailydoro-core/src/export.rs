//! Daily summary export.
//!
//! A single Markdown document is generated from the cycle count, session
//! history, task list and reflection note. The output formats only wrap that
//! document; they never reformat its content.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, ValidationError};
use crate::history::SessionEntry;
use crate::reflection::ReflectionNote;
use crate::tasks::TaskList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Downloadable Markdown file.
    #[default]
    #[serde(alias = "md")]
    Markdown,
    /// HTML page showing the document in a monospace block, printed on load.
    #[serde(alias = "pdf")]
    Print,
}

impl ExportFormat {
    /// Media type of the rendered file.
    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown;charset=utf-8",
            ExportFormat::Print => "text/html;charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Print => "html",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "print" | "pdf" => Ok(ExportFormat::Print),
            other => Err(ValidationError::InvalidValue {
                field: "format".to_string(),
                message: format!("unknown export format '{other}' (expected md or print)"),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Markdown => f.write_str("markdown"),
            ExportFormat::Print => f.write_str("print"),
        }
    }
}

/// Everything the summary reads, borrowed at export time.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInput<'a> {
    pub date: NaiveDate,
    pub activity: Option<&'a str>,
    pub completed_cycles: u32,
    pub sessions: &'a [SessionEntry],
    pub tasks: &'a TaskList,
    pub reflection: &'a ReflectionNote,
}

/// Compose the summary document.
pub fn generate(input: &SummaryInput<'_>) -> String {
    let mut out = String::new();
    let activity = input
        .activity
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or("-");

    // Writing into a String cannot fail.
    let _ = writeln!(out, "# Daily Summary - {}\n", input.date.format("%Y-%m-%d"));
    let _ = writeln!(out, "## Main activity\n{activity}\n");
    let _ = writeln!(out, "## Completed cycles\n{}\n", input.completed_cycles);

    out.push_str("## Pomodoro history\n");
    for (i, entry) in input.sessions.iter().enumerate() {
        let _ = writeln!(
            out,
            "- {}. {} | {} - {} | Activity: {}",
            i + 1,
            entry.phase,
            entry.start.format("%H:%M"),
            entry.end.format("%H:%M"),
            entry.activity_or_dash(),
        );
    }

    out.push_str("\n## Tasks of the day\n");
    for task in input.tasks.slots() {
        let mark = if task.completed { 'x' } else { ' ' };
        let desc = if task.is_blank() {
            "Untitled task"
        } else {
            task.description.as_str()
        };
        let _ = writeln!(out, "- [{mark}] {desc}");
    }

    let note = if input.reflection.is_empty() {
        "No content"
    } else {
        input.reflection.as_str()
    };
    let _ = writeln!(out, "\n## Gratitude and reflection\n{note}");
    out
}

/// Wrap `document` for the given output mode.
pub fn render(format: ExportFormat, document: &str) -> String {
    match format {
        ExportFormat::Markdown => document.to_string(),
        ExportFormat::Print => indoc::formatdoc! {r#"
            <!DOCTYPE html>
            <html>
            <head>
            <meta http-equiv="Content-Type" content="{content_type}">
            <title>Pomodoro summary</title>
            </head>
            <body onload="window.print()">
            <pre style="font-family:monospace;">{body}</pre>
            </body>
            </html>
            "#,
            content_type = format.media_type(),
            body = escape_html(document),
        },
    }
}

/// `Pomodoro_Summary_<date>.<ext>`
pub fn file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "Pomodoro_Summary_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Render `document` and write it into `dir`. Returns the written path.
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    date: NaiveDate,
    document: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(format, date));
    std::fs::write(&path, render(format, document))?;
    tracing::info!(
        path = %path.display(),
        %format,
        media_type = format.media_type(),
        "summary exported"
    );
    Ok(path)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
