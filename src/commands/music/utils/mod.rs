use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::model::id::{ChannelId, GuildId, UserId};

// Export music utilities
pub mod backend;
pub mod embedded_messages;
pub mod songbird_backend;

use backend::{BackendError, BackendResult};

/// Check if a string is an http(s) URL (as opposed to a search phrase).
///
/// The scheme check matters: a bare `Url::parse` accepts any phrase with a
/// colon in it ("re: stacks" parses with scheme `re`).
pub fn is_url(input: &str) -> bool {
    url::Url::parse(input).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// Format a duration into a human-readable string (e.g., "3:45" or "1:23:45")
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Find the voice channel the user currently occupies in this guild.
pub fn user_voice_channel(
    ctx: &serenity::Context,
    guild_id: GuildId,
    user_id: UserId,
) -> BackendResult<ChannelId> {
    let guild = ctx
        .cache
        .guild(guild_id)
        .ok_or_else(|| BackendError::Join("Guild not in cache".to_string()))?;

    guild
        .voice_states
        .get(&user_id)
        .and_then(|state| state.channel_id)
        .ok_or(BackendError::UserNotInVoiceChannel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_duration(Duration::from_secs(225)), "3:45");
        assert_eq!(format_duration(Duration::from_secs(59)), "0:59");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_duration(Duration::from_secs(5025)), "1:23:45");
    }
}
