//! Gateway event hook: wires incoming messages into the moderation
//! filter, running trivia sessions, and custom-command dispatch.

use poise::serenity_prelude as serenity;
use serenity::FullEvent;
use serenity::all::Message;
use tracing::info;

use crate::commands::{custom, moderation};
use crate::{Data, Error};

pub async fn handle(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot } => {
            info!(
                guilds = data_about_bot.guilds.len(),
                "connected as {}", data_about_bot.user.name
            );
        }
        FullEvent::Message { new_message } => {
            on_message(ctx, data, new_message).await?;
        }
        _ => {}
    }
    Ok(())
}

async fn on_message(ctx: &serenity::Context, data: &Data, msg: &Message) -> Result<(), Error> {
    if msg.author.bot {
        return Ok(());
    }

    // Word filter first; a deleted message triggers nothing else.
    if let Some(guild_id) = msg.guild_id {
        if data.cogs.is_enabled(guild_id, "mod")
            && moderation::screen_message(ctx, data, msg).await?
        {
            return Ok(());
        }
    }

    // Feed running trivia sessions. Sessions only exist where the cog was
    // enabled at start time, so no extra gating here.
    if data.trivia.is_active(msg.channel_id) {
        data.trivia.submit_answer(
            msg.channel_id,
            msg.author.id,
            msg.author.display_name().to_string(),
            msg.content.clone(),
        );
    }

    // Custom commands last, so they can never preempt built-ins.
    if let Some(guild_id) = msg.guild_id {
        if data.cogs.is_enabled(guild_id, "customcom") {
            custom::dispatch(ctx, data, msg).await?;
        }
    }

    Ok(())
}
