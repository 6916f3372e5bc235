use super::guild_id_of;
use super::utils::embedded_messages;
use crate::{CommandResult, Context};

/// Stop the playback
#[poise::command(slash_command, category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id_of(&ctx)?;

    // Halting is unconditional; a guild with no session is a no-op.
    ctx.data().backend.stop(guild_id).await?;

    ctx.send(embedded_messages::stopped()).await?;
    Ok(())
}
