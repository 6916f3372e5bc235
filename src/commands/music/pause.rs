use super::guild_id_of;
use super::utils::{
    backend::{AudioBackend, BackendError, QueuedTrack},
    embedded_messages,
};
use crate::{CommandResult, Context};
use poise::serenity_prelude as serenity;
use serenity::model::id::GuildId;

#[derive(Debug, PartialEq)]
pub enum PauseOutcome {
    Paused(QueuedTrack),
    AlreadyPaused,
    NothingPlaying,
}

/// Pause the live track, refusing redundant or pointless pauses.
pub async fn pause_playback(
    backend: &dyn AudioBackend,
    guild_id: GuildId,
) -> Result<PauseOutcome, BackendError> {
    let node = match backend.node(guild_id).await {
        Some(node) => node,
        None => return Ok(PauseOutcome::NothingPlaying),
    };
    let entry = match node.now_playing {
        Some(entry) => entry,
        None => return Ok(PauseOutcome::NothingPlaying),
    };
    if node.is_paused {
        return Ok(PauseOutcome::AlreadyPaused);
    }

    backend.pause(guild_id).await?;
    Ok(PauseOutcome::Paused(entry))
}

/// Pause the current song being played
#[poise::command(slash_command, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id_of(&ctx)?;

    match pause_playback(ctx.data().backend.as_ref(), guild_id).await {
        Ok(PauseOutcome::Paused(entry)) => {
            ctx.send(embedded_messages::paused(&entry.track)).await?;
        }
        Ok(PauseOutcome::AlreadyPaused) => {
            ctx.send(embedded_messages::already_paused()).await?;
        }
        Ok(PauseOutcome::NothingPlaying) => {
            ctx.send(embedded_messages::nothing_playing()).await?;
        }
        Err(BackendError::NoSessionPresent) => {
            ctx.send(embedded_messages::use_join_first()).await?;
        }
        Err(err) => {
            ctx.send(embedded_messages::error(format!("Failed to pause: {err}")))
                .await?;
        }
    }

    Ok(())
}
