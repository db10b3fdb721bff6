//! The trivia cog.

pub mod lists;
pub mod session;

use rand::seq::SliceRandom;

use crate::commands::{error_reply, ok_reply};
use crate::{CommandResult, Context, Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![trivia()]
}

/// Play trivia
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    subcommands("start", "stop", "list"),
    category = "Trivia"
)]
pub async fn trivia(_: Context<'_>) -> CommandResult {
    Ok(())
}

/// Start a trivia session with the given question list
#[poise::command(slash_command, prefix_command, guild_only)]
async fn start(
    ctx: Context<'_>,
    #[description = "Question list name (see `trivia list`)"] name: String,
) -> CommandResult {
    let data = ctx.data();

    let mut questions = match lists::load_list(&data.config.trivia_dir, &name) {
        Ok(questions) => questions,
        Err(e @ (lists::TriviaError::UnknownList(_) | lists::TriviaError::EmptyList(_))) => {
            ctx.send(error_reply(e.to_string())).await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    {
        let mut rng = rand::rng();
        questions.shuffle(&mut rng);
    }

    let started = data.trivia.start(
        ctx.serenity_context().clone(),
        ctx.channel_id(),
        name.clone(),
        questions,
    );
    if started {
        ctx.send(ok_reply(
            "❓ Trivia time!",
            format!(
                "Starting **{name}**. First correct answer scores; {}s per question.",
                session::ANSWER_WINDOW.as_secs()
            ),
        ))
        .await?;
    } else {
        ctx.send(error_reply(lists::TriviaError::SessionRunning.to_string()))
            .await?;
    }
    Ok(())
}

/// Stop the trivia session in this channel
#[poise::command(slash_command, prefix_command, guild_only)]
async fn stop(ctx: Context<'_>) -> CommandResult {
    if ctx.data().trivia.stop(ctx.channel_id()) {
        ctx.say("Stopping trivia.").await?;
    } else {
        ctx.send(error_reply("No trivia session is running here."))
            .await?;
    }
    Ok(())
}

/// Show the available question lists
#[poise::command(slash_command, prefix_command)]
async fn list(ctx: Context<'_>) -> CommandResult {
    let names = lists::available_lists(&ctx.data().config.trivia_dir).unwrap_or_default();
    if names.is_empty() {
        ctx.say("No trivia lists are installed.").await?;
    } else {
        ctx.say(format!("Available lists: {}", names.join(", ")))
            .await?;
    }
    Ok(())
}
