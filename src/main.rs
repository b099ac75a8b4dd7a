//! tg-spam admin bot
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use teloxide::prelude::*;
use tracing::{info, warn};

use tg_spam_admin::{
    config::Settings,
    handlers::create_handler,
    services::ModerationContext,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging, the guard flushes file logs on exit
    let _log_guard = logging::init_logging(&settings.logging).context("failed to initialize logging")?;

    info!("Starting {}...", tg_spam_admin::info());
    info!(
        primary_chat_id = settings.bot.primary_chat_id,
        admin_chat_id = settings.bot.admin_chat_id,
        super_users = settings.bot.super_users.len(),
        dry = settings.modes.dry,
        training = settings.modes.training,
        "Configuration loaded"
    );

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Initialize moderation collaborators
    let ctx = ModerationContext::from_settings(bot.clone(), &settings)
        .await
        .context("failed to load spam samples")?;
    let ctx = Arc::new(ctx);

    // Create dispatcher with dependencies registered
    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![ctx])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.kind);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    info!("Bot has been shut down.");

    Ok(())
}
