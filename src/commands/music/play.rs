use super::guild_id_of;
use super::utils::{
    self,
    backend::{AudioBackend, BackendError, TrackInfo},
    embedded_messages, is_url,
};
use crate::{CommandResult, Context};
use poise::serenity_prelude as serenity;
use serenity::model::id::{GuildId, UserId};
use tracing::{error, info};

/// Outcome of resolving and enqueueing a play query.
#[derive(Debug, PartialEq)]
pub enum PlayOutcome {
    /// Tracks were queued; carries the first track and how many were added.
    Queued { first: TrackInfo, count: usize },
    /// The query matched nothing.
    NoMatches,
    /// The backend refused the enqueue because no session exists.
    NoSession,
}

/// Resolve `query` against the backend and enqueue the results.
///
/// A URL enqueues every resolved track (e.g. a whole playlist); a search
/// phrase enqueues only the top match.
pub async fn play_query(
    backend: &dyn AudioBackend,
    guild_id: GuildId,
    requester: UserId,
    query: &str,
) -> Result<PlayOutcome, BackendError> {
    let mut tracks = backend.search(query).await?;
    if tracks.is_empty() {
        return Ok(PlayOutcome::NoMatches);
    }

    if !is_url(query) {
        tracks.truncate(1);
    }

    let first = tracks[0].clone();
    let count = tracks.len();

    for track in tracks {
        match backend.enqueue(guild_id, track, requester).await {
            Ok(()) => {}
            Err(BackendError::NoSessionPresent) => return Ok(PlayOutcome::NoSession),
            Err(err) => return Err(err),
        }
    }

    Ok(PlayOutcome::Queued { first, count })
}

/// Play a song from a URL or a search query
#[poise::command(slash_command, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[description = "URL or search query"] query: String,
) -> CommandResult {
    info!("Received play command with query: {}", query);
    let guild_id = guild_id_of(&ctx)?;

    // Resolving tracks can take a while
    ctx.defer().await?;

    let backend = ctx.data().backend.clone();

    // Implicitly join the invoker's voice channel when no session exists
    if !backend.has_session(guild_id).await {
        let channel_id =
            match utils::user_voice_channel(ctx.serenity_context(), guild_id, ctx.author().id) {
                Ok(channel_id) => channel_id,
                Err(_) => {
                    ctx.send(embedded_messages::connect_to_voice_channel())
                        .await?;
                    return Ok(());
                }
            };

        match backend.join(guild_id, channel_id).await {
            Ok(()) => {}
            Err(BackendError::ConnectionTimeout) => {
                ctx.send(embedded_messages::join_failed()).await?;
                return Ok(());
            }
            Err(err) => {
                ctx.send(embedded_messages::error(format!(
                    "Failed to join voice channel: {err}"
                )))
                .await?;
                return Ok(());
            }
        }
    }

    match play_query(backend.as_ref(), guild_id, ctx.author().id, &query).await {
        Ok(PlayOutcome::Queued { first, count }) => {
            // Route later track announcements back to this channel
            backend.bind_text_channel(guild_id, ctx.channel_id()).await;
            info!("Queued {} track(s) in guild {}", count, guild_id);
            ctx.send(embedded_messages::tracks_added(&first)).await?;
        }
        Ok(PlayOutcome::NoMatches) => {
            ctx.send(embedded_messages::no_matches()).await?;
        }
        Ok(PlayOutcome::NoSession) => {
            ctx.send(embedded_messages::use_join_first()).await?;
        }
        Err(err) => {
            error!("Play command failed: {}", err);
            ctx.send(embedded_messages::error(format!(
                "Failed to process query: {err}"
            )))
            .await?;
        }
    }

    Ok(())
}
