//! Dispatch schema and the message endpoint
//!
//! Dialogues are keyed by the sender, so members of a group chat each run
//! their own flow. [`session_distribution`] routes updates of one user to the
//! same worker, which applies that user's transitions one message at a time
//! while different users run concurrently.

use crate::bot::resilient::deliver;
use crate::dialogue::{Input, Machine, State};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use teloxide::{
    dispatching::{dialogue::InMemStorage, UpdateHandler},
    prelude::*,
    types::{Me, UserId},
};
use tracing::{error, info};

/// Dialogue handle for one user
pub type BotDialogue = Dialogue<State, InMemStorage<State>>;

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
#[must_use]
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Storage key of the sender's dialogue.
///
/// Messages without a sender (channel posts) fall back to the chat.
#[must_use]
pub fn session_key(msg: &Message) -> ChatId {
    msg.from
        .as_ref()
        .map_or(msg.chat.id, |u| ChatId(u.id.0.cast_signed()))
}

/// Dispatcher distribution key: updates of one user are handled in order
#[must_use]
pub fn session_distribution(update: &Update) -> Option<UserId> {
    update.from().map(|user| user.id)
}

/// Build the update handler tree
#[must_use]
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message().endpoint(handle_message)
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    me: Me,
    storage: Arc<InMemStorage<State>>,
    machine: Arc<Machine>,
) -> Result<(), teloxide::RequestError> {
    let dialogue = BotDialogue::new(storage, session_key(&msg));
    if let Err(e) = process_message(&bot, &msg, me.username(), &dialogue, &machine).await {
        error!("Message handler error: {}", e);
    }
    respond(())
}

/// Run one message through the state machine and send the replies.
///
/// The next state is stored before replies go out, so a failed send never
/// leaves the dialogue behind the conversation.
///
/// # Errors
///
/// Returns an error if the dialogue storage or the Telegram API fails.
pub async fn process_message(
    bot: &Bot,
    msg: &Message,
    bot_name: &str,
    dialogue: &BotDialogue,
    machine: &Machine,
) -> Result<()> {
    let user_id = get_user_id_safe(msg);
    let state = dialogue
        .get_or_default()
        .await
        .map_err(|e| anyhow!(e.to_string()))?;

    let input = Input::from_message_text(msg.text(), bot_name);
    let transition = machine.step(&state, input).await;

    if let Some(failure) = &transition.failure {
        info!(user_id, stage = state.name(), "Input not accepted: {failure}");
    }

    if transition.next != state {
        info!(
            user_id,
            from = state.name(),
            to = transition.next.name(),
            "State transition"
        );
        if transition.next.is_idle() {
            dialogue.exit().await.map_err(|e| anyhow!(e.to_string()))?;
        } else {
            dialogue
                .update(transition.next.clone())
                .await
                .map_err(|e| anyhow!(e.to_string()))?;
        }
    }

    let texts = machine.locale().texts();
    for reply in &transition.replies {
        deliver(bot, msg.chat.id, reply, texts).await?;
    }

    Ok(())
}
