use super::guild_id_of;
use super::utils::embedded_messages;
use crate::{CommandResult, Context};

/// See the currently playing song
#[poise::command(slash_command, category = "Music")]
pub async fn nowplaying(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id_of(&ctx)?;

    let entry = ctx
        .data()
        .backend
        .node(guild_id)
        .await
        .and_then(|node| node.now_playing);

    match entry {
        Some(entry) => {
            ctx.send(embedded_messages::now_playing(&entry)).await?;
        }
        None => {
            ctx.send(embedded_messages::nothing_playing()).await?;
        }
    }

    Ok(())
}
