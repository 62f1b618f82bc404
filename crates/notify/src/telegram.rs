//! Telegram Bot API notifier.

use booklend_borrowing::BorrowingNotifier;
use booklend_catalog::Book;
use booklend_core::UserId;

/// Bot credentials, passed in explicitly at startup.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Sends a chat message for every borrow via the Bot API.
///
/// The send runs on a spawned task: the caller has already committed the
/// borrowing and never waits on (or hears about) delivery.
pub struct TelegramNotifier {
    http: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

impl BorrowingNotifier for TelegramNotifier {
    fn notify(&self, book: &Book, user_id: UserId) {
        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.config.bot_token
        );
        let body = serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": borrow_message(book, user_id),
        });
        let http = self.http.clone();

        tokio::spawn(async move {
            match http.post(&url).json(&body).send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(status = %response.status(), "telegram rejected borrow notification");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("failed to deliver borrow notification: {e}");
                }
            }
        });
    }
}

fn borrow_message(book: &Book, user_id: UserId) -> String {
    format!(
        "Book {} was borrowed by visitor with ID: {}",
        book.title, user_id
    )
}
