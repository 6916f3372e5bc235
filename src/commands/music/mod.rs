pub mod join;
pub mod leave;
pub mod now_playing;
pub mod pause;
pub mod play;
pub mod queue;
pub mod resume;
pub mod shuffle;
pub mod skip;
pub mod stop;
pub mod volume;

pub mod utils;

use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use utils::backend::BackendError;

/// Extract the guild id or fail the command with a framework-visible error.
fn guild_id_of(ctx: &Context<'_>) -> Result<serenity::model::id::GuildId, Error> {
    ctx.guild_id()
        .ok_or_else(|| Box::new(BackendError::NotInGuild) as Error)
}
