use std::sync::Arc;

use booklend_api::config::AppConfig;
use booklend_borrowing::BorrowingNotifier;
use booklend_notify::{LogNotifier, TelegramNotifier};

#[tokio::main]
async fn main() {
    booklend_observability::init();

    let config = AppConfig::from_env();

    let notifier: Arc<dyn BorrowingNotifier> = match config.telegram.clone() {
        Some(telegram) => Arc::new(TelegramNotifier::new(telegram)),
        None => {
            tracing::warn!("TELEGRAM_BOT_TOKEN/CHAT_ID not set; borrow notifications are logged only");
            Arc::new(LogNotifier)
        }
    };

    let app = booklend_api::app::build_app(config.jwt_secret.clone(), notifier);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
