//! Terminal delivery of transition cues.
//!
//! User settings are applied by [`dailydoro_core::NotificationGate`]; this
//! backend always delivers what reaches it.

use std::io::Write;

use dailydoro_core::{NotificationRequest, Notifier};

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn play_cue(&self) {
        let mut out = std::io::stdout();
        // BEL
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }

    fn notify(&self, request: &NotificationRequest) {
        let shown = notify_rust::Notification::new()
            .summary(&request.title)
            .body(&request.body)
            .appname("dailydoro")
            .show();
        if let Err(e) = shown {
            tracing::debug!(error = %e, "desktop notification skipped");
        }
    }
}
