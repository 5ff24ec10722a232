//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::downloads::{handle_link_message, handle_start_command};
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same handler tree is used in production and can be driven from
/// integration tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        // Command handler
        .branch(command_handler())
        // Every other text message is treated as a link to fetch
        .branch(message_handler(deps))
}

/// Handler for bot commands (/start)
fn command_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        |bot: Bot, msg: Message, cmd: Command| async move {
            log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

            match cmd {
                Command::Start => {
                    if let Err(e) = handle_start_command(&bot, &msg).await {
                        log::error!("Failed to greet chat {}: {}", msg.chat.id, e);
                    }
                }
            }
            Ok(())
        },
    ))
}

/// Handler for regular messages (links)
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                if let Err(err) = handle_link_message(&bot, &msg, &deps).await {
                    // One log line with the raw detail; the user already got
                    // the fixed failure notice.
                    log::error!("Request failed for chat {}: {:?}", msg.chat.id, err);
                }
                Ok(())
            }
        })
}
