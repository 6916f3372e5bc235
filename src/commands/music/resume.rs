use super::guild_id_of;
use super::utils::{
    backend::{AudioBackend, BackendError},
    embedded_messages,
};
use crate::{CommandResult, Context};
use poise::serenity_prelude as serenity;
use serenity::model::id::GuildId;

#[derive(Debug, PartialEq)]
pub enum ResumeOutcome {
    Resumed,
    NotPaused,
    NothingPlaying,
}

/// Resume a paused track, refusing when nothing is paused.
pub async fn resume_playback(
    backend: &dyn AudioBackend,
    guild_id: GuildId,
) -> Result<ResumeOutcome, BackendError> {
    let node = match backend.node(guild_id).await {
        Some(node) => node,
        None => return Ok(ResumeOutcome::NothingPlaying),
    };
    if node.now_playing.is_none() {
        return Ok(ResumeOutcome::NothingPlaying);
    }
    if !node.is_paused {
        return Ok(ResumeOutcome::NotPaused);
    }

    backend.resume(guild_id).await?;
    Ok(ResumeOutcome::Resumed)
}

/// Resume the song that is paused
#[poise::command(slash_command, category = "Music")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id_of(&ctx)?;

    match resume_playback(ctx.data().backend.as_ref(), guild_id).await {
        Ok(ResumeOutcome::Resumed) => {
            ctx.send(embedded_messages::resumed()).await?;
        }
        Ok(ResumeOutcome::NotPaused) => {
            ctx.send(embedded_messages::already_playing()).await?;
        }
        Ok(ResumeOutcome::NothingPlaying) => {
            ctx.send(embedded_messages::nothing_playing()).await?;
        }
        Err(BackendError::NoSessionPresent) => {
            ctx.send(embedded_messages::use_join_first()).await?;
        }
        Err(err) => {
            ctx.send(embedded_messages::error(format!("Failed to resume: {err}")))
                .await?;
        }
    }

    Ok(())
}
