//! Adapter wiring the timer engine to persistence and notifications.
//!
//! The engine stays pure; this layer consumes each [`Transition`] by
//! appending its entry to the session log and delivering the cue and
//! notification.

use chrono::{DateTime, Local, NaiveDate};

use crate::error::ValidationError;
use crate::events::Event;
use crate::export::{self, SummaryInput};
use crate::history::SessionLog;
use crate::notify::Notifier;
use crate::reflection::ReflectionNote;
use crate::storage::KvStore;
use crate::tasks::TaskList;
use crate::timer::{PhaseDurations, TimerEngine, Transition};

pub struct Pomodoro<S: KvStore> {
    engine: TimerEngine,
    log: SessionLog,
    tasks: TaskList,
    store: S,
    notifier: Box<dyn Notifier>,
}

impl<S: KvStore> Pomodoro<S> {
    /// Load the session log and task list from `store`.
    pub fn new(durations: PhaseDurations, store: S, notifier: Box<dyn Notifier>) -> Self {
        let log = SessionLog::load(&store);
        let tasks = TaskList::load(&store);
        tracing::debug!(sessions = log.len(), "loaded persisted state");
        Self {
            engine: TimerEngine::new(durations),
            log,
            tasks,
            store,
            notifier,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn set_activity(&mut self, label: impl Into<String>) {
        self.engine.set_activity(label);
    }

    pub fn start(&mut self, now: DateTime<Local>) -> Option<Event> {
        self.engine.start(now)
    }

    pub fn pause(&mut self, now: DateTime<Local>) -> Option<Event> {
        self.engine.pause(now)
    }

    pub fn reset(&mut self, now: DateTime<Local>) -> Event {
        self.engine.reset(now)
    }

    /// Advance the engine one second and apply any transition.
    pub fn tick(&mut self, now: DateTime<Local>) -> Option<Transition> {
        let transition = self.engine.tick(now)?;
        self.log.append(&self.store, transition.entry.clone());
        self.notifier.play_cue();
        self.notifier.notify(&transition.notification);
        Some(transition)
    }

    pub fn clear_history(&mut self) {
        self.log.clear(&self.store);
    }

    pub fn update_task(
        &mut self,
        index: usize,
        description: impl Into<String>,
        completed: bool,
    ) -> Result<(), ValidationError> {
        self.tasks.update(&self.store, index, description, completed)
    }

    /// Summary document from the live cycle count, history and tasks.
    pub fn summary(&self, date: NaiveDate, reflection: &ReflectionNote) -> String {
        export::generate(&SummaryInput {
            date,
            activity: self.engine.activity(),
            completed_cycles: self.engine.completed_cycles(),
            sessions: self.log.entries(),
            tasks: &self.tasks,
            reflection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationRequest;
    use crate::storage::MemoryStore;
    use crate::timer::Phase;
    use chrono::{Duration, TimeZone};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        cues: usize,
        notifications: Vec<NotificationRequest>,
    }

    struct RecordingNotifier(Rc<RefCell<Recorded>>);

    impl Notifier for RecordingNotifier {
        fn play_cue(&self) {
            self.0.borrow_mut().cues += 1;
        }
        fn notify(&self, request: &NotificationRequest) {
            self.0.borrow_mut().notifications.push(request.clone());
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn app() -> (Pomodoro<MemoryStore>, Rc<RefCell<Recorded>>) {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let app = Pomodoro::new(
            PhaseDurations::default(),
            MemoryStore::new(),
            Box::new(RecordingNotifier(recorded.clone())),
        );
        (app, recorded)
    }

    fn run(app: &mut Pomodoro<MemoryStore>, ticks: i64, from: DateTime<Local>) {
        for i in 1..=ticks {
            app.tick(from + Duration::seconds(i));
        }
    }

    #[test]
    fn transition_logs_and_notifies() {
        let (mut app, recorded) = app();
        app.set_activity("Essay");
        app.start(at(9, 0));
        run(&mut app, 1500, at(9, 0));

        assert_eq!(app.log().len(), 1);
        assert_eq!(app.log().entries()[0].phase, Phase::Focus);
        assert_eq!(recorded.borrow().cues, 1);
        assert_eq!(recorded.borrow().notifications[0].title, "Short break");
    }

    #[test]
    fn summary_uses_live_state() {
        let (mut app, _) = app();
        app.set_activity("Essay");
        app.update_task(0, "Outline", true).unwrap();
        app.start(at(9, 0));
        run(&mut app, 1500, at(9, 0));

        let note = ReflectionNote::new("Thanks").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let doc = app.summary(date, &note);
        assert!(doc.contains("## Completed cycles\n1\n"));
        assert!(doc.contains("- 1. Focus | 09:00 - 09:25 | Activity: Essay"));
        assert!(doc.contains("- [x] Outline"));
        assert_eq!(doc, app.summary(date, &note));
    }

    #[test]
    fn clear_history_empties_log() {
        let (mut app, _) = app();
        app.start(at(9, 0));
        run(&mut app, 1500, at(9, 0));
        app.clear_history();
        assert!(app.log().is_empty());
    }

    #[test]
    fn update_task_rejects_bad_index() {
        let (mut app, _) = app();
        assert!(app.update_task(10, "nope", false).is_err());
    }
}
