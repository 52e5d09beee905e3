//! Interactive timer.
//!
//! Hosts the 1 Hz tick source: a tokio interval that exists only while the
//! timer is running. Pausing or resetting drops it before the next tick can
//! fire. Single-letter commands are read from stdin.

use chrono::Local;
use clap::Args;
use dailydoro_core::{
    format_clock, Config, Event, ExportFormat, KvStore, NotificationGate, Pomodoro, ReflectionNote,
    TimerEngine, TASK_SLOTS,
};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Duration, Instant, Interval};

use super::{export, history, open_store, task};
use crate::notifier::TerminalNotifier;

const TICK: Duration = Duration::from_secs(1);
const BAR_WIDTH: usize = 20;

const HELP: &str = "\
commands: s start | p pause | r reset | a TEXT activity | n TEXT reflection
          x N toggle task | t tasks | h history | e [md|print] export | q quit";

#[derive(Args)]
pub struct RunArgs {
    /// Activity label attached to logged sessions
    #[arg(long)]
    activity: Option<String>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
    /// Wait for `s` instead of starting immediately
    #[arg(long)]
    no_autostart: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Start,
    Pause,
    Reset,
    Activity(String),
    Reflection(String),
    ToggleTask(usize),
    Tasks,
    History,
    Export(Option<ExportFormat>),
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };
    let input = match cmd {
        "s" | "start" => Input::Start,
        "p" | "pause" => Input::Pause,
        "r" | "reset" => Input::Reset,
        "a" | "activity" => Input::Activity(rest.to_string()),
        "n" | "note" => Input::Reflection(rest.to_string()),
        "x" | "toggle" => match rest.parse::<usize>() {
            Ok(n) if (1..=TASK_SLOTS).contains(&n) => Input::ToggleTask(n - 1),
            _ => Input::Unknown(line.to_string()),
        },
        "t" | "tasks" => Input::Tasks,
        "h" | "history" => Input::History,
        "e" | "export" if rest.is_empty() => Input::Export(None),
        "e" | "export" => match rest.parse() {
            Ok(format) => Input::Export(Some(format)),
            Err(_) => Input::Unknown(line.to_string()),
        },
        "?" | "help" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    };
    Some(input)
}

/// Renders events and the countdown line.
struct Output {
    json: bool,
}

impl Output {
    fn event(&self, event: &Event) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "failed to encode event"),
            }
            return;
        }
        let text = match event {
            Event::TimerStarted {
                phase,
                remaining_secs,
                ..
            } => format!("{phase} started, {} left", format_clock(*remaining_secs)),
            Event::TimerPaused {
                phase,
                remaining_secs,
                ..
            } => format!("{phase} paused at {}", format_clock(*remaining_secs)),
            Event::TimerReset { .. } => "Reset to Focus".to_string(),
            Event::PhaseCompleted {
                completed,
                next,
                completed_cycles,
                remaining_secs,
                ..
            } => format!(
                "{completed} complete ({completed_cycles} cycles). {next}: {}",
                format_clock(*remaining_secs)
            ),
            Event::StateSnapshot { .. } => return,
        };
        println!("\r\x1b[2K{text}");
    }

    fn status(&self, engine: &TimerEngine) {
        if self.json {
            return;
        }
        let filled = ((engine.progress() * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        print!(
            "\r\x1b[2K{:<11} {} [{}{}] cycles: {}",
            engine.phase().label(),
            format_clock(engine.remaining_secs()),
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            engine.completed_cycles(),
        );
        let _ = std::io::stdout().flush();
    }

    fn message(&self, text: &str) {
        if self.json {
            eprintln!("{text}");
        } else {
            println!("\r\x1b[2K{text}");
        }
    }
}

struct Session {
    app: Pomodoro<Box<dyn KvStore>>,
    ticker: Option<Interval>,
    reflection: ReflectionNote,
    export_dir: PathBuf,
    export_format: ExportFormat,
    out: Output,
}

impl Session {
    fn start(&mut self) {
        if let Some(event) = self.app.start(Local::now()) {
            self.ticker = Some(interval_at(Instant::now() + TICK, TICK));
            self.out.event(&event);
        }
    }

    fn stop_ticking(&mut self) {
        self.ticker = None;
    }

    fn on_tick(&mut self) {
        if let Some(transition) = self.app.tick(Local::now()) {
            self.out.event(&transition.to_event());
        }
        self.out.status(self.app.engine());
    }

    /// Returns false when the loop should end.
    fn on_input(&mut self, input: Input) -> bool {
        match input {
            Input::Start => self.start(),
            Input::Pause => {
                self.stop_ticking();
                if let Some(event) = self.app.pause(Local::now()) {
                    self.out.event(&event);
                }
            }
            Input::Reset => {
                self.stop_ticking();
                let event = self.app.reset(Local::now());
                self.out.event(&event);
                self.out.status(self.app.engine());
            }
            Input::Activity(label) => {
                self.app.set_activity(label);
                let shown = self.app.engine().activity().unwrap_or("-").to_string();
                self.out.message(&format!("Activity: {shown}"));
            }
            Input::Reflection(text) => match ReflectionNote::new(text) {
                Ok(note) => {
                    self.out.message(&format!("Reflection saved ({})", note.counter()));
                    self.reflection = note;
                }
                Err(e) => self.out.message(&e.to_string()),
            },
            Input::ToggleTask(index) => {
                let (description, completed) = match self.app.tasks().get(index) {
                    Some(t) => (t.description.clone(), !t.completed),
                    None => return true,
                };
                match self.app.update_task(index, description, completed) {
                    Ok(()) => self.out.message(&task::render_list(self.app.tasks())),
                    Err(e) => self.out.message(&e.to_string()),
                }
            }
            Input::Tasks => self.out.message(&task::render_list(self.app.tasks())),
            Input::History => {
                let text = if self.app.log().is_empty() {
                    "No sessions logged.".to_string()
                } else {
                    history::render_table(self.app.log().entries())
                };
                self.out.message(&text);
            }
            Input::Export(format) => {
                let format = format.unwrap_or(self.export_format);
                let date = Local::now().date_naive();
                let document = self.app.summary(date, &self.reflection);
                match export::deliver(format, &self.export_dir, date, &document, true) {
                    Ok(path) => self.out.message(&format!("Exported {}", path.display())),
                    Err(e) => self.out.message(&format!("export failed: {e}")),
                }
            }
            Input::Help => self.out.message(HELP),
            Input::Quit => return false,
            Input::Unknown(line) => self.out.message(&format!("unknown command: {line}")),
        }
        true
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn drive(mut session: Session, autostart: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    session.out.message(HELP);
    session.out.status(session.app.engine());
    if autostart {
        session.start();
    }

    loop {
        tokio::select! {
            _ = next_tick(&mut session.ticker) => session.on_tick(),
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => {
                    if let Some(input) = parse_input(&line) {
                        if !session.on_input(input) {
                            break;
                        }
                    }
                }
                None => stdin_open = false,
            },
        }
        // Without input nothing can restart a stopped timer.
        if !stdin_open && session.ticker.is_none() {
            break;
        }
    }

    session.out.message("Bye.");
    Ok(())
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let durations = config.durations()?;
    let notifier = NotificationGate::new(
        TerminalNotifier,
        config.notification_permission(),
        config.notifications.sound,
    );

    let mut app = Pomodoro::new(durations, open_store(), Box::new(notifier));
    if let Some(activity) = args.activity {
        app.set_activity(activity);
    }

    let session = Session {
        app,
        ticker: None,
        reflection: ReflectionNote::default(),
        export_dir: export::output_dir(&config),
        export_format: config.export.format,
        out: Output { json: args.json },
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(session, !args.no_autostart))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_commands() {
        assert_eq!(parse_input("s"), Some(Input::Start));
        assert_eq!(parse_input(" pause "), Some(Input::Pause));
        assert_eq!(parse_input("r"), Some(Input::Reset));
        assert_eq!(parse_input("q"), Some(Input::Quit));
        assert_eq!(parse_input(""), None);
    }

    #[test]
    fn parses_text_arguments() {
        assert_eq!(
            parse_input("a  Write chapter 2 "),
            Some(Input::Activity("Write chapter 2".to_string()))
        );
        assert_eq!(parse_input("a"), Some(Input::Activity(String::new())));
        assert_eq!(
            parse_input("n thankful for tea"),
            Some(Input::Reflection("thankful for tea".to_string()))
        );
    }

    #[test]
    fn task_numbers_are_one_based() {
        assert_eq!(parse_input("x 1"), Some(Input::ToggleTask(0)));
        assert_eq!(parse_input("x 10"), Some(Input::ToggleTask(9)));
        assert!(matches!(parse_input("x 0"), Some(Input::Unknown(_))));
        assert!(matches!(parse_input("x 11"), Some(Input::Unknown(_))));
    }

    #[test]
    fn export_format_is_optional() {
        assert_eq!(parse_input("e"), Some(Input::Export(None)));
        assert_eq!(
            parse_input("e print"),
            Some(Input::Export(Some(ExportFormat::Print)))
        );
        assert!(matches!(parse_input("e docx"), Some(Input::Unknown(_))));
    }
}
