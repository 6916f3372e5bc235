use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId, UserId};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by the audio backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The guild has no active playback session.
    #[error("No active session for this guild")]
    NoSessionPresent,

    #[error("Not in a guild")]
    NotInGuild,

    #[error("Timed out connecting to the voice channel")]
    ConnectionTimeout,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,

    #[error("Failed to join voice channel: {0}")]
    Join(String),

    #[error("Audio source error: {0}")]
    Source(String),

    #[error("Track error: {0}")]
    Track(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Metadata for a single resolved track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
    pub title: String,
    pub uri: String,
    pub author: Option<String>,
    pub length: Option<Duration>,
}

/// A track together with the user who requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedTrack {
    pub track: TrackInfo,
    pub requester: UserId,
}

/// Snapshot of a guild's playback state.
///
/// Position 0 of `queue` is the entry currently being played, mirroring the
/// backend's own queue model; `now_playing` is a copy of it while a track is
/// live. The snapshot is read-only, mutations go through the backend.
#[derive(Debug, Clone, Default)]
pub struct GuildNode {
    pub queue: Vec<QueuedTrack>,
    pub now_playing: Option<QueuedTrack>,
    pub is_paused: bool,
    pub text_channel: Option<ChannelId>,
}

/// Client seam for the audio-node service owning all voice/queue state.
///
/// Command handlers are written against this trait so that guard logic can
/// be exercised without a live voice connection.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Connect to a voice channel and establish a playback session.
    /// A timeout leaves no partial session behind.
    async fn join(&self, guild_id: GuildId, channel_id: ChannelId) -> BackendResult<()>;

    /// Tear down any active session for the guild. Safe without one.
    async fn leave(&self, guild_id: GuildId) -> BackendResult<()>;

    /// Whether a playback session is currently open for the guild.
    async fn has_session(&self, guild_id: GuildId) -> bool;

    /// Resolve a URL or search phrase into a list of playable tracks.
    async fn search(&self, query: &str) -> BackendResult<Vec<TrackInfo>>;

    /// Append a track to the guild's queue, starting playback if idle.
    async fn enqueue(
        &self,
        guild_id: GuildId,
        track: TrackInfo,
        requester: UserId,
    ) -> BackendResult<()>;

    async fn pause(&self, guild_id: GuildId) -> BackendResult<()>;

    async fn resume(&self, guild_id: GuildId) -> BackendResult<()>;

    /// Halt playback and drop the queue. Unconditional.
    async fn stop(&self, guild_id: GuildId) -> BackendResult<()>;

    /// Advance the queue by one, returning the entry that was skipped,
    /// or `None` when nothing was playing.
    async fn skip(&self, guild_id: GuildId) -> BackendResult<Option<QueuedTrack>>;

    /// Set playback volume; `volume` is a percentage in (0, 100].
    async fn set_volume(&self, guild_id: GuildId, volume: u8) -> BackendResult<()>;

    /// Read a snapshot of the guild's node, if one exists.
    async fn node(&self, guild_id: GuildId) -> Option<GuildNode>;

    /// Write a reordered queue back to the guild's node.
    async fn set_node(&self, guild_id: GuildId, node: GuildNode) -> BackendResult<()>;

    /// Associate a text channel with the guild node so later track
    /// announcements can be routed back to it.
    async fn bind_text_channel(&self, guild_id: GuildId, channel_id: ChannelId);
}
