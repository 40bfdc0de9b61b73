//! User-visible notifications.

use crate::domain::form::Notification;

/// Shows timed notifications to the user.
///
/// Implementations own dismissal; callers fire and forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
