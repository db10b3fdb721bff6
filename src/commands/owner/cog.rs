use poise::CreateReply;
use poise::serenity_prelude::CreateEmbed;

use crate::cogs::PROTECTED_COG;
use crate::commands::{error_reply, ok_reply};
use crate::{CommandResult, Context};

/// Manage which cogs are available in this server
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    subcommands("list", "enable", "disable"),
    required_permissions = "MANAGE_GUILD",
    category = "Owner"
)]
pub async fn cog(_: Context<'_>) -> CommandResult {
    Ok(())
}

/// Show every cog and whether it's enabled here
#[poise::command(slash_command, prefix_command, guild_only)]
async fn list(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();
    let lines: Vec<String> = data
        .cogs
        .cogs()
        .iter()
        .map(|(name, description)| {
            let status = if data.cogs.is_enabled(guild_id, name) {
                "🟢"
            } else {
                "🔴"
            };
            format!("{status} **{name}** — {description}")
        })
        .collect();
    ctx.send(
        CreateReply::default().embed(
            CreateEmbed::new()
                .title("Cogs")
                .description(lines.join("\n"))
                .color(0x3498db),
        ),
    )
    .await?;
    Ok(())
}

/// Enable a cog in this server
#[poise::command(slash_command, prefix_command, guild_only)]
async fn enable(
    ctx: Context<'_>,
    #[description = "Cog name (see `cog list`)"] name: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();
    let Some(cog) = data.cogs.resolve(&name) else {
        ctx.send(error_reply(format!("No cog named `{name}`.")))
            .await?;
        return Ok(());
    };
    data.cogs.set_enabled(&data.db, guild_id, cog, true)?;
    ctx.send(ok_reply("Cog enabled", format!("**{cog}** is back on.")))
        .await?;
    Ok(())
}

/// Disable a cog in this server
#[poise::command(slash_command, prefix_command, guild_only)]
async fn disable(
    ctx: Context<'_>,
    #[description = "Cog name (see `cog list`)"] name: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();
    let Some(cog) = data.cogs.resolve(&name) else {
        ctx.send(error_reply(format!("No cog named `{name}`.")))
            .await?;
        return Ok(());
    };
    if cog == PROTECTED_COG {
        ctx.send(error_reply(
            "That cog can't be disabled; you'd lock yourself out.",
        ))
        .await?;
        return Ok(());
    }
    data.cogs.set_enabled(&data.db, guild_id, cog, false)?;
    ctx.send(ok_reply(
        "Cog disabled",
        format!("**{cog}** commands are off in this server."),
    ))
    .await?;
    Ok(())
}
