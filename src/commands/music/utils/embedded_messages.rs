use poise::{serenity_prelude as serenity, CreateReply};
use serenity::all::CreateEmbed;
use serenity::model::id::ChannelId;

use super::backend::{QueuedTrack, TrackInfo};
use super::format_duration;

/// Create a generic red error reply.
pub fn error(description: impl Into<String>) -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("❌ Error")
                .description(description.into())
                .color(0xff0000),
        )
        .ephemeral(true)
}

/// Guidance reply for users who are not in a voice channel.
pub fn connect_to_voice_channel() -> CreateReply {
    error("Connect to a voice channel to continue!")
}

/// Guidance reply when a command needs an active session.
pub fn use_join_first() -> CreateReply {
    error("Use `/join` to run this command.")
}

pub fn join_failed() -> CreateReply {
    error("I cannot connect to your voice channel!")
}

pub fn joined_channel(channel_id: ChannelId) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .description(format!("Joined <#{channel_id}>"))
            .color(0x00ff00),
    )
}

pub fn left_voice_channel() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .description("I left the voice channel!")
            .color(0xff0000),
    )
}

pub fn stopped() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("⏹️ Playback Stopped!")
            .color(0xff0000),
    )
}

pub fn no_matches() -> CreateReply {
    error("I could not find any songs according to the query!")
}

/// Reply for a successful play command, linking the first added track.
pub fn tracks_added(first: &TrackInfo) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("Tracks Added")
            .description(format!("[{}]({})", first.title, first.uri))
            .color(0x00ff00),
    )
}

pub fn nothing_playing() -> CreateReply {
    error("There's nothing playing at the moment!")
}

/// Embed used both as a command reply and as a track-start announcement.
pub fn now_playing_embed(entry: &QueuedTrack) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("Now Playing")
        .description(format!("[{}]({})", entry.track.title, entry.track.uri))
        .color(0x00ff00)
        .field("Requested by", format!("<@{}>", entry.requester), true);

    if let Some(author) = &entry.track.author {
        embed = embed.field("Author", author.clone(), true);
    }
    if let Some(length) = entry.track.length {
        embed = embed.field("Length", format_duration(length), true);
    }
    embed
}

pub fn now_playing(entry: &QueuedTrack) -> CreateReply {
    CreateReply::default().embed(now_playing_embed(entry))
}

pub fn paused(track: &TrackInfo) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("⏸️ Playback Paused")
            .description(format!("[{}]({})", track.title, track.uri))
            .color(0xff0000),
    )
}

pub fn already_paused() -> CreateReply {
    error("Playback is already paused!")
}

pub fn resumed() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .description("🎵 Resumed the Playback!")
            .color(0x00ff00),
    )
}

pub fn already_playing() -> CreateReply {
    error("Playback is not paused!")
}

pub fn volume_set(volume: i64) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .description(format!("⏯️ Set the Volume to {volume}"))
            .color(0x00ff00),
    )
}

pub fn volume_out_of_range() -> CreateReply {
    error("Volume should be between 0 and 100")
}

pub fn skipped(entry: &QueuedTrack) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("⏭️ Skipped")
            .description(format!("[{}]({})", entry.track.title, entry.track.uri))
            .color(0x00ff00),
    )
}

pub fn nothing_to_skip() -> CreateReply {
    error("Nothing to skip")
}

pub fn shuffled() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🔀 Shuffled Queue")
            .color(0x00ff00),
    )
}

pub fn only_one_song() -> CreateReply {
    error("Only one song in the queue!")
}

pub fn queue_is_empty() -> CreateReply {
    error("There are no tracks in the queue!")
}
