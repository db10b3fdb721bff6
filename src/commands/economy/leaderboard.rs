use poise::CreateReply;
use poise::serenity_prelude::CreateEmbed;

use crate::commands::error_reply;
use crate::utils::format_credits;
use crate::{CommandResult, Context};

/// Show the richest members of this server
#[poise::command(slash_command, prefix_command, guild_only, category = "Economy")]
pub async fn leaderboard(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(error_reply("This command only works in a server."))
            .await?;
        return Ok(());
    };

    let top = ctx.data().db.top_balances(guild_id, 10)?;
    if top.is_empty() {
        ctx.say("Nobody has an account here yet. Be the first with `register`!")
            .await?;
        return Ok(());
    }

    let lines: Vec<String> = top
        .iter()
        .enumerate()
        .map(|(i, (user_id, balance))| {
            format!("**{}.** <@{user_id}> — {}", i + 1, format_credits(*balance))
        })
        .collect();

    ctx.send(
        CreateReply::default().embed(
            CreateEmbed::new()
                .title("💰 Leaderboard")
                .description(lines.join("\n"))
                .color(0xf1c40f),
        ),
    )
    .await?;
    Ok(())
}
