//! Telegram notification transport.

use async_trait::async_trait;
use teloxide::prelude::*;
use tronwatch_monitor::{Notify, NotifyError};

/// Delivers wallet reports through the Telegram Bot API. One attempt per
/// message; the monitor logs failures and moves on.
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }
}

#[async_trait]
impl Notify for TelegramNotifier {
    async fn send(&self, destination_id: &str, text: &str) -> Result<(), NotifyError> {
        let chat_id = destination_id
            .parse::<i64>()
            .map_err(|_| NotifyError(format!("invalid chat id: {destination_id}")))?;

        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(|e| NotifyError(e.to_string()))?;
        Ok(())
    }
}
