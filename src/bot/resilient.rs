//! Reply delivery with automatic retry for Telegram API operations.
//!
//! Every send goes through [`crate::utils::retry_telegram_operation`]: a
//! dropped connection or flood wait is retried, an API rejection is not.

use crate::bot::keyboards::reply_markup;
use crate::dialogue::{Poll, Reply};
use crate::locale::Texts;
use anyhow::Result;
use bytes::Bytes;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, InputPollOption, Message, ReplyMarkup};

/// File name attached to forwarded pictures
const PHOTO_FILE_NAME: &str = "cat.png";

/// Send a text message with automatic retry on network failures.
///
/// # Errors
///
/// Returns an error on an API rejection or once all retries are exhausted.
pub async fn send_message_resilient(
    bot: &Bot,
    chat_id: ChatId,
    text: &str,
    markup: Option<ReplyMarkup>,
) -> Result<Message> {
    crate::utils::retry_telegram_operation(|| async {
        let mut req = bot.send_message(chat_id, text);
        if let Some(m) = markup.clone() {
            req = req.reply_markup(m);
        }
        req.await
    })
    .await
    .map_err(|e| anyhow::anyhow!("Telegram send error: {e}"))
}

/// Send a native poll with automatic retry on network failures.
///
/// # Errors
///
/// Returns an error on an API rejection or once all retries are exhausted.
pub async fn send_poll_resilient(
    bot: &Bot,
    chat_id: ChatId,
    poll: &Poll,
    markup: Option<ReplyMarkup>,
) -> Result<Message> {
    crate::utils::retry_telegram_operation(|| async {
        let options = poll.options.iter().map(|o| InputPollOption::new(o.clone()));
        let mut req = bot
            .send_poll(chat_id, poll.question.clone(), options)
            .is_anonymous(poll.is_anonymous);
        if let Some(m) = markup.clone() {
            req = req.reply_markup(m);
        }
        req.await
    })
    .await
    .map_err(|e| anyhow::anyhow!("Telegram poll error: {e}"))
}

/// Upload a picture from memory with automatic retry on network failures.
///
/// # Errors
///
/// Returns an error on an API rejection or once all retries are exhausted.
pub async fn send_photo_resilient(
    bot: &Bot,
    chat_id: ChatId,
    image: &Bytes,
    markup: Option<ReplyMarkup>,
) -> Result<Message> {
    crate::utils::retry_telegram_operation(|| async {
        let file = InputFile::memory(image.to_vec()).file_name(PHOTO_FILE_NAME);
        let mut req = bot.send_photo(chat_id, file);
        if let Some(m) = markup.clone() {
            req = req.reply_markup(m);
        }
        req.await
    })
    .await
    .map_err(|e| anyhow::anyhow!("Telegram photo error: {e}"))
}

/// Deliver one reply produced by the state machine.
///
/// # Errors
///
/// Returns an error if the Telegram API keeps failing.
pub async fn deliver(bot: &Bot, chat_id: ChatId, reply: &Reply, texts: &Texts) -> Result<()> {
    match reply {
        Reply::Text { text, keyboard } => {
            send_message_resilient(bot, chat_id, text, reply_markup(*keyboard, texts)).await?;
        }
        Reply::Poll { poll, keyboard } => {
            send_poll_resilient(bot, chat_id, poll, reply_markup(*keyboard, texts)).await?;
        }
        Reply::Photo { image, keyboard } => {
            send_photo_resilient(bot, chat_id, image, reply_markup(*keyboard, texts)).await?;
        }
    }
    Ok(())
}
