use crate::commands::{error_reply, ok_reply};
use crate::{CommandResult, Context};

/// Manage the word filter for this server
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    subcommands("add", "remove", "list", "clear"),
    required_permissions = "MANAGE_GUILD",
    category = "Mod"
)]
pub async fn filter(_: Context<'_>) -> CommandResult {
    Ok(())
}

/// Add one or more words to the filter
#[poise::command(slash_command, prefix_command, guild_only)]
async fn add(
    ctx: Context<'_>,
    #[description = "Words to filter, separated by spaces"]
    #[rest]
    words: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();
    let mut added = 0usize;
    for word in words.split_whitespace() {
        if data.db.add_filter_word(guild_id, word)? {
            added += 1;
        }
    }
    data.filters.invalidate(guild_id);
    if added == 0 {
        ctx.send(error_reply("Those words were already filtered."))
            .await?;
    } else {
        ctx.send(ok_reply(
            "Filter updated",
            format!("Added {added} word(s) to the filter."),
        ))
        .await?;
    }
    Ok(())
}

/// Remove one or more words from the filter
#[poise::command(slash_command, prefix_command, guild_only)]
async fn remove(
    ctx: Context<'_>,
    #[description = "Words to unfilter, separated by spaces"]
    #[rest]
    words: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();
    let mut removed = 0usize;
    for word in words.split_whitespace() {
        if data.db.remove_filter_word(guild_id, word)? {
            removed += 1;
        }
    }
    data.filters.invalidate(guild_id);
    if removed == 0 {
        ctx.send(error_reply("None of those words were filtered."))
            .await?;
    } else {
        ctx.send(ok_reply(
            "Filter updated",
            format!("Removed {removed} word(s) from the filter."),
        ))
        .await?;
    }
    Ok(())
}

/// Show the filtered words
#[poise::command(slash_command, prefix_command, guild_only)]
async fn list(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let words = ctx.data().db.filter_words(guild_id)?;
    if words.is_empty() {
        ctx.say("The filter is empty.").await?;
    } else {
        // Spoiler-wrap so the list doesn't shout the words at everyone.
        ctx.say(format!("Filtered words: ||{}||", words.join(", ")))
            .await?;
    }
    Ok(())
}

/// Remove every word from the filter
#[poise::command(slash_command, prefix_command, guild_only)]
async fn clear(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();
    let removed = data.db.clear_filter(guild_id)?;
    data.filters.invalidate(guild_id);
    ctx.send(ok_reply(
        "Filter cleared",
        format!("Removed {removed} word(s)."),
    ))
    .await?;
    Ok(())
}
