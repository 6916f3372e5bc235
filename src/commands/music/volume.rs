use super::guild_id_of;
use super::utils::{
    backend::{AudioBackend, BackendError},
    embedded_messages,
};
use crate::{CommandResult, Context};
use poise::serenity_prelude as serenity;
use serenity::model::id::GuildId;

#[derive(Debug, PartialEq)]
pub enum VolumeOutcome {
    Set(i64),
    OutOfRange,
    NothingPlaying,
}

/// Apply a volume change. Values outside (0, 100] are rejected before any
/// backend call is made.
pub async fn apply_volume(
    backend: &dyn AudioBackend,
    guild_id: GuildId,
    volume: i64,
) -> Result<VolumeOutcome, BackendError> {
    if !(1..=100).contains(&volume) {
        return Ok(VolumeOutcome::OutOfRange);
    }

    let playing = backend
        .node(guild_id)
        .await
        .is_some_and(|node| node.now_playing.is_some());
    if !playing {
        return Ok(VolumeOutcome::NothingPlaying);
    }

    backend.set_volume(guild_id, volume as u8).await?;
    Ok(VolumeOutcome::Set(volume))
}

/// Increase/Decrease the volume
#[poise::command(slash_command, category = "Music")]
pub async fn volume(
    ctx: Context<'_>,
    #[description = "Volume to be set (between 1 and 100)"] volume: i64,
) -> CommandResult {
    let guild_id = guild_id_of(&ctx)?;

    match apply_volume(ctx.data().backend.as_ref(), guild_id, volume).await {
        Ok(VolumeOutcome::Set(volume)) => {
            ctx.send(embedded_messages::volume_set(volume)).await?;
        }
        Ok(VolumeOutcome::OutOfRange) => {
            ctx.send(embedded_messages::volume_out_of_range()).await?;
        }
        Ok(VolumeOutcome::NothingPlaying) => {
            ctx.send(embedded_messages::nothing_playing()).await?;
        }
        Err(BackendError::NoSessionPresent) => {
            ctx.send(embedded_messages::use_join_first()).await?;
        }
        Err(err) => {
            ctx.send(embedded_messages::error(format!(
                "Failed to set volume: {err}"
            )))
            .await?;
        }
    }

    Ok(())
}
