use super::guild_id_of;
use super::utils::{
    backend::{AudioBackend, BackendError, QueuedTrack},
    embedded_messages,
};
use crate::{CommandResult, Context};
use poise::serenity_prelude as serenity;
use serenity::model::id::GuildId;

#[derive(Debug, PartialEq)]
pub enum SkipOutcome {
    Skipped(QueuedTrack),
    NothingToSkip,
}

/// Advance the queue by one. When the advance leaves nothing queued and
/// nothing playing, playback is halted as well.
pub async fn skip_track(
    backend: &dyn AudioBackend,
    guild_id: GuildId,
) -> Result<SkipOutcome, BackendError> {
    let skipped = match backend.skip(guild_id).await? {
        Some(entry) => entry,
        None => return Ok(SkipOutcome::NothingToSkip),
    };

    // The backend may advance the queue from a track-end event after skip
    // returns, so this snapshot can still show the skipped entry. In that
    // case the stop below is skipped; the live handle is already stopped,
    // so the node just goes idle through the event handler instead.
    if let Some(node) = backend.node(guild_id).await {
        if node.queue.is_empty() && node.now_playing.is_none() {
            backend.stop(guild_id).await?;
        }
    }

    Ok(SkipOutcome::Skipped(skipped))
}

/// Skip the current song
#[poise::command(slash_command, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id_of(&ctx)?;

    match skip_track(ctx.data().backend.as_ref(), guild_id).await {
        Ok(SkipOutcome::Skipped(entry)) => {
            ctx.send(embedded_messages::skipped(&entry)).await?;
        }
        Ok(SkipOutcome::NothingToSkip) => {
            ctx.send(embedded_messages::nothing_to_skip()).await?;
        }
        Err(BackendError::NoSessionPresent) => {
            ctx.send(embedded_messages::use_join_first()).await?;
        }
        Err(err) => {
            ctx.send(embedded_messages::error(format!("Failed to skip: {err}")))
                .await?;
        }
    }

    Ok(())
}
