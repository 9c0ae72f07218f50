//! services/portal/src/events.rs
//!
//! Defines the events the portal controller publishes to its front-end.
//! Most state is read back synchronously; these cover what happens on its own
//! schedule (timers, login verification, chat replies).

use serde::Serialize;
use uuid::Uuid;

/// Represents the structured events a front-end receives from the `Portal`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PortalEvent {
    /// The gate accepted the credentials; the dashboard is now reachable.
    LoginSucceeded { student_id: String },

    /// The gate rejected the credentials. `message` is ready to show under the form.
    LoginFailed { message: String },

    /// The session ended and all session-scoped state was discarded.
    LoggedOut,

    /// A notice was added to the notification board while the session was open.
    NotificationArrived { id: String, title: String, message: String },

    /// The AI helper appended its reply to the conversation.
    ChatReplied { message_id: Uuid },
}
