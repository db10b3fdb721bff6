use std::sync::Arc;

use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crimson::cogs::{self, CogHost};
use crimson::commands::gallery::sweep;
use crimson::commands::moderation::FilterCache;
use crimson::commands::streams::poller;
use crimson::commands::streams::twitch::TwitchClient;
use crimson::commands::trivia::session::TriviaHost;
use crimson::config::Config;
use crimson::db::Database;
use crimson::{CommandResult, Context, Data, Error, events};

#[poise::command(slash_command, prefix_command, category = "Owner")]
async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> CommandResult {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration::default(),
    )
    .await
    .map_err(|e| e.into())
}

#[poise::command(prefix_command, owners_only, hide_in_help)]
async fn sync(ctx: Context<'_>) -> CommandResult {
    poise::builtins::register_application_commands_buttons(ctx)
        .await
        .map_err(|e| e.into())
}

/// Global check: refuse commands whose cog the guild has disabled.
async fn cog_check(ctx: Context<'_>) -> Result<bool, Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(true);
    };
    let root = ctx
        .parent_commands()
        .first()
        .map(|c| c.name.as_str())
        .unwrap_or(ctx.command().name.as_str());
    Ok(ctx.data().cogs.command_enabled(guild_id, root))
}

async fn on_error(err: poise::FrameworkError<'_, Data, Error>) {
    match err {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("command `{}` failed: {error}", ctx.command().name);
            let _ = ctx
                .send(crimson::commands::error_reply(format!(
                    "Something went wrong: {error}"
                )))
                .await;
        }
        poise::FrameworkError::CommandCheckFailed { ctx, .. } => {
            let _ = ctx
                .send(crimson::commands::error_reply(
                    "That command isn't available here; its cog may be disabled.",
                ))
                .await;
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("error while handling error: {e}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crimson=debug,warn")),
        )
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();
    let config = Config::from_env()?;

    let db = Arc::new(Database::open(&config.db_path)?);

    // Assemble every cog's commands and record which cog owns what.
    let mut commands = vec![sync(), help()];
    let mut cog_host = CogHost::new();
    for cog in cogs::registry() {
        let cog_commands = (cog.commands)();
        cog_host.add_cog(&cog, &cog_commands);
        commands.extend(cog_commands);
    }
    cog_host.load_disabled(&db)?;

    let twitch = config
        .twitch
        .as_ref()
        .map(|creds| Arc::new(TwitchClient::new(creds)));
    if twitch.is_none() {
        warn!("TWITCH_CLIENT_ID/TWITCH_CLIENT_SECRET not set; stream alerts disabled");
    }

    let data = Data {
        config: config.clone(),
        db: db.clone(),
        cogs: cog_host,
        filters: FilterCache::new(),
        trivia: Arc::new(TriviaHost::new()),
        twitch: twitch.clone(),
    };

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                dynamic_prefix: Some(|ctx| {
                    Box::pin(async move {
                        let Some(guild_id) = ctx.guild_id else {
                            return Ok(None);
                        };
                        Ok(ctx.data.db.guild_prefix(guild_id)?)
                    })
                }),
                ..Default::default()
            },
            command_check: Some(|ctx| Box::pin(cog_check(ctx))),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::handle(ctx, event, framework, data))
            },
            on_error: |err| Box::pin(on_error(err)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("application commands registered");
                sweep::spawn(ctx.clone(), db.clone());
                if let Some(twitch) = twitch {
                    poller::spawn(ctx.clone(), db, twitch);
                }
                Ok(data)
            })
        })
        .build();

    let token = config.token.clone();
    let client_builder = ClientBuilder::new(token, intents).framework(framework);

    build_and_start_client(client_builder).await
}

async fn build_and_start_client(client_builder: ClientBuilder) -> Result<(), Error> {
    #[cfg(feature = "music")]
    {
        use songbird::SerenityInit;

        let mut client = client_builder.register_songbird().await?;
        client.start().await.map_err(Into::into)
    }

    #[cfg(not(feature = "music"))]
    {
        let mut client = client_builder.await?;
        client.start().await.map_err(Into::into)
    }
}
