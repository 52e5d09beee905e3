//! Notification side channel.
//!
//! Every phase transition asks for an audio cue and a system notification.
//! The core only describes the request; front ends implement [`Notifier`].

use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Title and body of the notification announcing a new phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
}

impl NotificationRequest {
    pub fn for_next(next: Phase) -> Self {
        let (title, body) = match next {
            Phase::Focus => ("Time to focus!", "New cycle started."),
            Phase::ShortBreak => ("Short break", "Relax a little."),
            Phase::LongBreak => ("Long break", "Relax a little."),
        };
        Self {
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// Whether the user allowed system notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    Granted,
    Denied,
}

/// Delivers transition cues. Implementations never fail: a denied
/// permission or a missing notification daemon just skips delivery.
pub trait Notifier {
    /// Play the short audio cue.
    fn play_cue(&self);

    /// Show a system notification if permitted.
    fn notify(&self, request: &NotificationRequest);
}

/// Applies the user's notification settings in front of a delivery
/// backend: the cue only plays with sound on, notifications only show
/// with permission granted.
pub struct NotificationGate<N> {
    inner: N,
    permission: Permission,
    sound: bool,
}

impl<N: Notifier> NotificationGate<N> {
    pub fn new(inner: N, permission: Permission, sound: bool) -> Self {
        Self {
            inner,
            permission,
            sound,
        }
    }
}

impl<N: Notifier> Notifier for NotificationGate<N> {
    fn play_cue(&self) {
        if self.sound {
            self.inner.play_cue();
        }
    }

    fn notify(&self, request: &NotificationRequest) {
        if self.permission == Permission::Granted {
            self.inner.notify(request);
        } else {
            tracing::trace!(title = %request.title, "notification permission denied");
        }
    }
}
