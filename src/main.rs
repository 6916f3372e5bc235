use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use std::env;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use melody::{
    commands::rtfm::{rtfm, rtfmlist},
    utils::docs::DocStore,
    Context, Data, Error, HTTP_CLIENT,
};

type CommandResult = Result<(), Error>;

#[poise::command(slash_command, category = "General")]
async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> CommandResult {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            show_context_menu_commands: true,
            ..Default::default()
        },
    )
    .await
    .map_err(|e| e.into())
}

#[poise::command(prefix_command, hide_in_help)]
async fn register(ctx: Context<'_>) -> Result<(), Error> {
    poise::builtins::register_application_commands_buttons(ctx)
        .await
        .map_err(|e| e.into())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("melody=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let token = env::var("DISCORD_TOKEN").expect("Missing DISCORD_TOKEN");

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    // Create a vector to hold our commands
    let mut commands = vec![
        // Default commands
        register(),
        help(),
        // Documentation search
        rtfm(),
        rtfmlist(),
    ];

    // Handle Music feature
    #[cfg(feature = "music")]
    {
        use melody::commands::music::{
            join::*, leave::*, now_playing::*, pause::*, play::*, queue::*, resume::*, shuffle::*,
            skip::*, stop::*, volume::*,
        };

        // Add music commands
        commands.extend(vec![
            join(),
            leave(),
            play(),
            pause(),
            resume(),
            stop(),
            skip(),
            shuffle(),
            volume(),
            nowplaying(),
            queue(),
        ]);
    }

    #[cfg(feature = "music")]
    let manager = songbird::Songbird::serenity();

    #[cfg(feature = "music")]
    let manager_for_setup = manager.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                let docs = Arc::new(DocStore::new(HTTP_CLIENT.clone()));

                #[cfg(feature = "music")]
                {
                    use melody::commands::music::utils::songbird_backend::SongbirdBackend;

                    let backend = SongbirdBackend::new(
                        manager_for_setup,
                        HTTP_CLIENT.clone(),
                        ctx.http.clone(),
                    );
                    Ok(Data {
                        backend: Arc::new(backend),
                        docs,
                    })
                }

                #[cfg(not(feature = "music"))]
                Ok(Data { docs })
            })
        })
        .build();

    let client_builder = ClientBuilder::new(token, intents).framework(framework);

    // Create and run client
    #[cfg(feature = "music")]
    {
        use songbird::SerenityInit;

        let mut client = client_builder.register_songbird_with(manager).await?;
        client.start().await.map_err(Into::into)
    }

    #[cfg(not(feature = "music"))]
    {
        let mut client = client_builder.await?;
        client.start().await.map_err(Into::into)
    }
}
