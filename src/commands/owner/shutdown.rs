use tracing::warn;

use crate::{CommandResult, Context};

/// Shut the bot down cleanly
#[poise::command(
    slash_command,
    prefix_command,
    owners_only,
    hide_in_help,
    category = "Owner"
)]
pub async fn shutdown(ctx: Context<'_>) -> CommandResult {
    warn!(user = ctx.author().id.get(), "shutdown requested");
    ctx.say("Shutting down. 👋").await?;
    ctx.framework().shard_manager().shutdown_all().await;
    Ok(())
}
