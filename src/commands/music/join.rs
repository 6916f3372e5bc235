use super::guild_id_of;
use super::utils::{self, backend::BackendError, embedded_messages};
use crate::{CommandResult, Context};
use tracing::info;

/// Join the voice channel you are currently in
#[poise::command(slash_command, category = "Music")]
pub async fn join(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id_of(&ctx)?;

    let channel_id =
        match utils::user_voice_channel(ctx.serenity_context(), guild_id, ctx.author().id) {
            Ok(channel_id) => channel_id,
            Err(_) => {
                ctx.send(embedded_messages::connect_to_voice_channel())
                    .await?;
                return Ok(());
            }
        };

    match ctx.data().backend.join(guild_id, channel_id).await {
        Ok(()) => {
            info!("Joined {} in guild {}", channel_id, guild_id);
            ctx.send(embedded_messages::joined_channel(channel_id))
                .await?;
        }
        Err(BackendError::ConnectionTimeout) => {
            ctx.send(embedded_messages::join_failed()).await?;
        }
        Err(err) => {
            ctx.send(embedded_messages::error(format!(
                "Failed to join voice channel: {err}"
            )))
            .await?;
        }
    }

    Ok(())
}
