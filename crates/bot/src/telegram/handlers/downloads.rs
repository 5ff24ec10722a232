//! Link message handling: the per-request fetch-and-deliver pipeline.
//!
//! One request walks Received → WorkspaceAcquired → Fetching → Delivering,
//! with a single status message edited in place along the way. Any failure
//! after the status message exists collapses into one fixed user-facing
//! notice; the raw error is logged at the schema boundary.

use std::path::{Path, PathBuf};

use teloxide::prelude::*;
use teloxide::types::{ChatAction, InputFile, Message, MessageId, ParseMode};
use teloxide::utils::html;

use tunegrab_core::{fetch_audio, workspace, AppResult};

use super::types::HandlerDeps;
use crate::telegram::Bot;

const STATUS_LOADING: &str = "🎧 <i>Loading audio…</i>";
const STATUS_DONE: &str = "🎸 <i>Audio sent!</i>";
const STATUS_FAILED: &str = "❌ <i>Download failed. Check the link or try again later.</i>";

/// Replies to /start with the welcome message.
pub async fn handle_start_command(bot: &Bot, msg: &Message) -> AppResult<()> {
    bot.send_message(
        msg.chat.id,
        "<i>Welcome to Tunegrab!</i>\nSend me a video link and I will reply with the audio 🎵",
    )
    .parse_mode(ParseMode::Html)
    .await?;
    Ok(())
}

/// Runs one link message through the full pipeline:
/// status message → workspace → fetch → deliver → release.
///
/// The workspace is released on every exit path once it was acquired; a
/// failure before acquisition has nothing to release. `send_audio` resolves
/// only after the Bot API has acknowledged the upload, so the release needs
/// no settle delay.
pub async fn handle_link_message(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> AppResult<()> {
    let chat_id = msg.chat.id;
    let url = msg.text().unwrap_or_default().trim().to_string();

    let status = bot
        .send_message(chat_id, STATUS_LOADING)
        .parse_mode(ParseMode::Html)
        .await?;

    let mut workspace_dir: Option<PathBuf> = None;
    let outcome = fetch_and_deliver(
        bot,
        chat_id,
        status.id,
        &url,
        &deps.data_root,
        &mut workspace_dir,
    )
    .await;

    if outcome.is_err() {
        let _ = bot
            .edit_message_text(chat_id, status.id, STATUS_FAILED)
            .parse_mode(ParseMode::Html)
            .await;
    }

    if let Some(dir) = workspace_dir {
        if let Err(e) = workspace::release(&dir).await {
            log::warn!("Failed to release workspace {}: {}", dir.display(), e);
        }
    }

    outcome
}

async fn fetch_and_deliver(
    bot: &Bot,
    chat_id: ChatId,
    status_id: MessageId,
    url: &str,
    data_root: &Path,
    workspace_dir: &mut Option<PathBuf>,
) -> AppResult<()> {
    let dir = workspace::acquire(data_root, chat_id.0).await?;
    *workspace_dir = Some(dir.clone());

    // The URL goes to the downloader verbatim; a bad link fails there.
    let fetched = fetch_audio(url, &dir).await?;

    bot.send_chat_action(chat_id, ChatAction::UploadVoice).await?;
    bot.edit_message_text(chat_id, status_id, sending_text(&fetched.title))
        .parse_mode(ParseMode::Html)
        .await?;

    bot.send_audio(chat_id, InputFile::file(fetched.path)).await?;

    bot.edit_message_text(chat_id, status_id, STATUS_DONE)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Status text shown while the audio uploads. Titles are untrusted input.
fn sending_text(title: &str) -> String {
    format!("😎 <i>Sending <b>{}</b></i>", html::escape(title))
}
