use clap::Subcommand;
use dailydoro_core::{SessionEntry, SessionLog};

use super::open_store;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List logged sessions
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete every logged session
    Clear,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store();
    let mut log = SessionLog::load(&store);

    match action {
        HistoryAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(log.entries())?);
            } else if log.is_empty() {
                println!("No sessions logged.");
            } else {
                print!("{}", render_table(log.entries()));
            }
        }
        HistoryAction::Clear => {
            let count = log.len();
            log.clear(&store);
            println!("Cleared {count} session(s).");
        }
    }
    Ok(())
}

/// Session rows under a header, one line per entry.
pub(crate) fn render_table(entries: &[SessionEntry]) -> String {
    let mut out = format!("{:>3}  {:<5}  {:<5}  {:<11}  {}\n", "#", "Start", "End", "Phase", "Activity");
    for (i, entry) in entries.iter().enumerate() {
        let [start, end, phase, activity] = entry.row();
        out.push_str(&format!(
            "{:>3}  {start:<5}  {end:<5}  {phase:<11}  {activity}\n",
            i + 1
        ));
    }
    out
}
