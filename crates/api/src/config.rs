//! Process configuration, read once at startup.
//!
//! Nothing below `main` touches the environment; services receive explicit
//! values (the notifier in particular gets its credentials injected).

use booklend_notify::TelegramConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    /// Bot credentials for borrow notifications; `None` disables delivery.
    pub telegram: Option<TelegramConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let telegram = match (
            std::env::var("TELEGRAM_BOT_TOKEN"),
            std::env::var("CHAT_ID"),
        ) {
            (Ok(bot_token), Ok(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        Self {
            bind_addr,
            jwt_secret,
            telegram,
        }
    }
}
