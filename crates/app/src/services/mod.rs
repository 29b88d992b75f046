//! Outbound collaborator traits: notification and event publication.

mod email;
mod events;

pub use email::{LoggingNotifier, Notifier, NotifyError, RecordingNotifier};
pub use events::{EventPublisher, LoggingEventBus, PublishError, RecordingEventBus};
