//! Order confirmation notification seam.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

/// A notification attempt that did not go through.
///
/// Notification is fire-and-continue: handlers log this error and keep the
/// committed result.
#[derive(Debug, Clone, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// Sends order-related messages to customers.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends an order confirmation to the given address.
    async fn send_order_confirmation(
        &self,
        email: &str,
        order_number: &str,
    ) -> Result<(), NotifyError>;
}

/// Notifier that only logs. Stands in for a real mail gateway.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send_order_confirmation(
        &self,
        email: &str,
        order_number: &str,
    ) -> Result<(), NotifyError> {
        tracing::info!(email, order_number, "sending order confirmation");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    sent: Vec<(String, String)>,
    fail_next: bool,
}

/// In-memory notifier for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    state: Arc<RwLock<RecordingState>>,
}

impl RecordingNotifier {
    /// Creates a new recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the notifier to fail the next send.
    pub fn set_fail_next(&self, fail: bool) {
        self.state.write().unwrap().fail_next = fail;
    }

    /// Returns all `(email, order_number)` pairs sent so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.state.read().unwrap().sent.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_order_confirmation(
        &self,
        email: &str,
        order_number: &str,
    ) -> Result<(), NotifyError> {
        let mut state = self.state.write().unwrap();
        if state.fail_next {
            state.fail_next = false;
            return Err(NotifyError("mail gateway unavailable".to_string()));
        }
        state
            .sent
            .push((email.to_string(), order_number.to_string()));
        Ok(())
    }
}
