use anyhow::Result;
use dotenvy::dotenv;
use std::path::Path;
use teloxide::prelude::*;

mod telegram;

use telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use tunegrab_core::config::{self, BotConfig};
use tunegrab_core::logging::{init_logger, log_environment};

/// Main entry point for the Telegram bot.
///
/// Loads the token file, builds the handler schema and long-polls until
/// killed. Only configuration problems are fatal here; everything that can
/// go wrong per request is handled inside the pipeline.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    // Load environment variables from .env if present
    let _ = dotenv();

    // The token file is the only fatal startup dependency
    let bot_config = BotConfig::load(Path::new(&*config::CONFIG_PATH))?;

    // yt-dlp / ffmpeg absence is survivable until a conversion is attempted
    log_environment();

    let bot = create_bot(&bot_config.token)?;

    let me = bot.get_me().await?;
    log::info!(
        "🤖 Bot @{} is listening...",
        me.username.as_deref().unwrap_or("unknown")
    );

    setup_bot_commands(&bot).await?;

    let deps = HandlerDeps::new(config::DATA_ROOT.clone());
    let handler = schema(deps);

    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
