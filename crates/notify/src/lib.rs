//! `booklend-notify` — outbound notification adapters.
//!
//! Implementations of the [`booklend_borrowing::BorrowingNotifier`] port.
//! Delivery is strictly best-effort: failures are logged and dropped, never
//! surfaced to the borrow flow.

pub mod log;
pub mod telegram;

pub use log::LogNotifier;
pub use telegram::{TelegramConfig, TelegramNotifier};
