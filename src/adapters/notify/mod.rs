//! Notifier adapters.

mod toast_board;

pub use toast_board::ToastBoard;
