use clap::Subcommand;
use dailydoro_core::{TaskList, TASK_SLOTS};

use super::open_store;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Show all task slots
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the description of a slot
    Set {
        /// Slot number (1-10)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=TASK_SLOTS as i64))]
        slot: u8,
        /// Task description
        description: String,
    },
    /// Mark a slot as completed
    Done {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=TASK_SLOTS as i64))]
        slot: u8,
    },
    /// Mark a slot as not completed
    Undo {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=TASK_SLOTS as i64))]
        slot: u8,
    },
    /// Blank every slot
    Clear,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store();
    let mut tasks = TaskList::load(&store);

    match action {
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tasks.slots())?);
            } else {
                print!("{}", render_list(&tasks));
            }
        }
        TaskAction::Set { slot, description } => {
            tasks.set_description(&store, index(slot), description)?;
            print!("{}", render_list(&tasks));
        }
        TaskAction::Done { slot } => {
            tasks.set_completed(&store, index(slot), true)?;
            print!("{}", render_list(&tasks));
        }
        TaskAction::Undo { slot } => {
            tasks.set_completed(&store, index(slot), false)?;
            print!("{}", render_list(&tasks));
        }
        TaskAction::Clear => {
            tasks.clear(&store);
            println!("Tasks cleared.");
        }
    }
    Ok(())
}

fn index(slot: u8) -> usize {
    usize::from(slot).saturating_sub(1)
}

/// Checklist rendering with `Task N` placeholders for blank slots.
pub(crate) fn render_list(tasks: &TaskList) -> String {
    let mut out = String::new();
    for (i, task) in tasks.slots().iter().enumerate() {
        let mark = if task.completed { 'x' } else { ' ' };
        let placeholder;
        let desc = if task.is_blank() {
            placeholder = format!("Task {}", i + 1);
            placeholder.as_str()
        } else {
            task.description.as_str()
        };
        out.push_str(&format!("{:>2}. [{mark}] {desc}\n", i + 1));
    }
    out.push_str(&format!("{}/{} done\n", tasks.completed_count(), TASK_SLOTS));
    out
}
