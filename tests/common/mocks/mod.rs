//! Mock implementations for external dependencies.
#![cfg(feature = "music")]

use async_trait::async_trait;
use melody::commands::music::utils::backend::{
    AudioBackend, BackendResult, GuildNode, QueuedTrack, TrackInfo,
};
use mockall::mock;
use poise::serenity_prelude as serenity;
use serenity::model::id::{ChannelId, GuildId, UserId};
use std::time::Duration;

mock! {
    pub Backend {}

    #[async_trait]
    impl AudioBackend for Backend {
        async fn join(&self, guild_id: GuildId, channel_id: ChannelId) -> BackendResult<()>;
        async fn leave(&self, guild_id: GuildId) -> BackendResult<()>;
        async fn has_session(&self, guild_id: GuildId) -> bool;
        async fn search(&self, query: &str) -> BackendResult<Vec<TrackInfo>>;
        async fn enqueue(
            &self,
            guild_id: GuildId,
            track: TrackInfo,
            requester: UserId,
        ) -> BackendResult<()>;
        async fn pause(&self, guild_id: GuildId) -> BackendResult<()>;
        async fn resume(&self, guild_id: GuildId) -> BackendResult<()>;
        async fn stop(&self, guild_id: GuildId) -> BackendResult<()>;
        async fn skip(&self, guild_id: GuildId) -> BackendResult<Option<QueuedTrack>>;
        async fn set_volume(&self, guild_id: GuildId, volume: u8) -> BackendResult<()>;
        async fn node(&self, guild_id: GuildId) -> Option<GuildNode>;
        async fn set_node(&self, guild_id: GuildId, node: GuildNode) -> BackendResult<()>;
        async fn bind_text_channel(&self, guild_id: GuildId, channel_id: ChannelId);
    }
}

/// A track entry with predictable metadata for assertions.
pub fn sample_track(n: u64) -> TrackInfo {
    TrackInfo {
        title: format!("Track {n}"),
        uri: format!("https://example.com/track/{n}"),
        author: Some("Example Artist".to_string()),
        length: Some(Duration::from_secs(180 + n)),
    }
}

pub fn sample_entry(n: u64, requester: u64) -> QueuedTrack {
    QueuedTrack {
        track: sample_track(n),
        requester: UserId::new(requester),
    }
}
