use super::guild_id_of;
use super::utils::embedded_messages;
use crate::{CommandResult, Context};
use tracing::info;

/// Leave the voice channel
#[poise::command(slash_command, category = "Music")]
pub async fn leave(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id_of(&ctx)?;

    // Teardown is unconditional and safe without an active session.
    ctx.data().backend.leave(guild_id).await?;
    info!("Tore down session for guild {}", guild_id);

    ctx.send(embedded_messages::left_voice_channel()).await?;
    Ok(())
}
