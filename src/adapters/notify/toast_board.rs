//! Auto-dismissing notification board.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::domain::form::Notification;
use crate::ports::Notifier;

#[derive(Debug)]
struct Toast {
    notification: Notification,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct BoardState {
    visible: Vec<Toast>,
    history: Vec<Notification>,
}

/// Keeps each notification visible for a fixed time-to-live and remembers
/// every notification shown.
#[derive(Debug, Clone)]
pub struct ToastBoard {
    ttl: Duration,
    state: Arc<Mutex<BoardState>>,
}

impl ToastBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Arc::new(Mutex::new(BoardState::default())),
        }
    }

    /// Notifications still within their time-to-live, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        let now = Instant::now();
        let mut state = self.lock();
        state.visible.retain(|toast| toast.expires_at > now);
        state
            .visible
            .iter()
            .map(|toast| toast.notification.clone())
            .collect()
    }

    /// The most recent notification still visible.
    pub fn current(&self) -> Option<Notification> {
        self.visible().pop()
    }

    /// Every notification ever shown, oldest first.
    pub fn history(&self) -> Vec<Notification> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, notification: Notification) {
        if notification.is_error() {
            warn!(message = %notification.message, "Error notification shown");
        } else {
            info!(message = %notification.message, "Notification shown");
        }
        let mut state = self.lock();
        state.history.push(notification.clone());
        state.visible.push(Toast {
            notification,
            expires_at: Instant::now() + self.ttl,
        });
    }
}
