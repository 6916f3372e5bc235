use async_trait::async_trait;
use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use serenity::all::{CreateMessage, Http};
use serenity::model::id::{ChannelId, GuildId, UserId};
use songbird::error::JoinError;
use songbird::input::YoutubeDl;
use songbird::tracks::TrackHandle;
use songbird::{Event, EventContext, EventHandler, Songbird, TrackEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use super::backend::{
    AudioBackend, BackendError, BackendResult, GuildNode, QueuedTrack, TrackInfo,
};
use super::embedded_messages;
use super::is_url;

/// Number of results fetched for a plain-text search query.
const SEARCH_RESULTS: usize = 5;

/// Per-guild playback bookkeeping. Position 0 of `queue` is the live track.
#[derive(Default)]
struct NodeState {
    queue: Vec<QueuedTrack>,
    paused: bool,
    text_channel: Option<ChannelId>,
    handle: Option<TrackHandle>,
}

struct Inner {
    songbird: Arc<Songbird>,
    http: reqwest::Client,
    discord_http: Arc<Http>,
    nodes: DashMap<GuildId, NodeState>,
}

/// Audio backend built on songbird, resolving tracks through yt-dlp.
pub struct SongbirdBackend {
    inner: Arc<Inner>,
}

impl SongbirdBackend {
    pub fn new(songbird: Arc<Songbird>, http: reqwest::Client, discord_http: Arc<Http>) -> Self {
        Self {
            inner: Arc::new(Inner {
                songbird,
                http,
                discord_http,
                nodes: DashMap::new(),
            }),
        }
    }
}

/// Resolve a query into track metadata with `yt-dlp -j`.
///
/// yt-dlp emits one JSON object per line; a playlist URL therefore yields
/// every contained track, a `ytsearch` query yields the top matches.
async fn resolve_tracks(query: &str) -> BackendResult<Vec<TrackInfo>> {
    let arg = if is_url(query) {
        query.to_string()
    } else {
        format!("ytsearch{SEARCH_RESULTS}:{query}")
    };

    debug!("Resolving tracks for query: {}", arg);

    let output = Command::new("yt-dlp")
        .args(["-j", &arg])
        .output()
        .await
        .map_err(|e| BackendError::Source(format!("Failed to execute yt-dlp: {e}")))?;

    if !output.status.success() {
        return Err(BackendError::Source(format!(
            "yt-dlp exited with status {}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut tracks = Vec::new();

    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        let metadata: serde_json::Value = serde_json::from_str(line)
            .map_err(|e| BackendError::Source(format!("Failed to parse track metadata: {e}")))?;

        let title = metadata["title"]
            .as_str()
            .unwrap_or("Unknown Title")
            .to_string();
        let uri = metadata["webpage_url"]
            .as_str()
            .or_else(|| metadata["url"].as_str())
            .unwrap_or(query)
            .to_string();
        let author = metadata["uploader"]
            .as_str()
            .or_else(|| metadata["channel"].as_str())
            .map(|s| s.to_string());
        let length = metadata["duration"].as_f64().map(Duration::from_secs_f64);

        tracks.push(TrackInfo {
            title,
            uri,
            author,
            length,
        });
    }

    info!("Resolved {} track(s) for query", tracks.len());
    Ok(tracks)
}

impl Inner {
    /// Start playing the track at the front of the guild's queue.
    ///
    /// Takes the queue head under the map guard, then drives songbird
    /// without holding it.
    async fn start_playback(self: &Arc<Self>, guild_id: GuildId) -> BackendResult<()> {
        let next = match self.nodes.get(&guild_id) {
            Some(state) => match state.queue.first() {
                Some(entry) => entry.clone(),
                None => return Ok(()),
            },
            None => return Err(BackendError::NoSessionPresent),
        };

        let call = self
            .songbird
            .get(guild_id)
            .ok_or(BackendError::NoSessionPresent)?;

        let input = YoutubeDl::new(self.http.clone(), next.track.uri.clone());
        let handle = {
            let mut call = call.lock().await;
            call.play_input(input.into())
        };

        handle
            .add_event(
                Event::Track(TrackEvent::End),
                TrackEndHandler {
                    inner: Arc::clone(self),
                    guild_id,
                },
            )
            .map_err(|e| BackendError::Track(e.to_string()))?;

        if let Some(mut state) = self.nodes.get_mut(&guild_id) {
            state.handle = Some(handle);
            state.paused = false;
        }

        info!("Started playback of '{}' in {}", next.track.title, guild_id);
        Ok(())
    }

    /// Announce the now-playing track in the guild's bound text channel.
    async fn announce(&self, guild_id: GuildId, entry: &QueuedTrack) {
        let channel = self
            .nodes
            .get(&guild_id)
            .and_then(|state| state.text_channel);

        if let Some(channel_id) = channel {
            let message = CreateMessage::new().embed(embedded_messages::now_playing_embed(entry));
            if let Err(e) = channel_id.send_message(&self.discord_http, message).await {
                warn!("Failed to announce track in {}: {}", channel_id, e);
            }
        }
    }
}

/// Advances the queue once a live track finishes or is stopped.
struct TrackEndHandler {
    inner: Arc<Inner>,
    guild_id: GuildId,
}

#[async_trait]
impl EventHandler for TrackEndHandler {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(_) = ctx {
            self.handle_track_end().await;
        }
        None
    }
}

impl TrackEndHandler {
    async fn handle_track_end(&self) {
        debug!("Track ended for guild {}", self.guild_id);

        let next = {
            let mut state = match self.inner.nodes.get_mut(&self.guild_id) {
                Some(state) => state,
                None => return,
            };
            if !state.queue.is_empty() {
                state.queue.remove(0);
            }
            state.handle = None;
            state.paused = false;
            state.queue.first().cloned()
        };

        if let Some(entry) = next {
            if let Err(e) = self.inner.start_playback(self.guild_id).await {
                error!("Failed to advance queue for {}: {}", self.guild_id, e);
                return;
            }
            self.inner.announce(self.guild_id, &entry).await;
        }
    }
}

#[async_trait]
impl AudioBackend for SongbirdBackend {
    async fn join(&self, guild_id: GuildId, channel_id: ChannelId) -> BackendResult<()> {
        match self.inner.songbird.join(guild_id, channel_id).await {
            Ok(_call) => {
                self.inner.nodes.entry(guild_id).or_default();
                info!("Joined voice channel {} in {}", channel_id, guild_id);
                Ok(())
            }
            Err(e) => {
                // Make sure a half-open call is not left behind.
                if let Err(remove_err) = self.inner.songbird.remove(guild_id).await {
                    debug!("No partial call to remove for {}: {}", guild_id, remove_err);
                }
                Err(match e {
                    JoinError::TimedOut => BackendError::ConnectionTimeout,
                    other => BackendError::Join(other.to_string()),
                })
            }
        }
    }

    async fn leave(&self, guild_id: GuildId) -> BackendResult<()> {
        if let Some((_, state)) = self.inner.nodes.remove(&guild_id) {
            if let Some(handle) = state.handle {
                let _ = handle.stop();
            }
        }
        if let Err(e) = self.inner.songbird.remove(guild_id).await {
            debug!("Leave with no active call for {}: {}", guild_id, e);
        }
        info!("Left voice channel in {}", guild_id);
        Ok(())
    }

    async fn has_session(&self, guild_id: GuildId) -> bool {
        self.inner.songbird.get(guild_id).is_some() && self.inner.nodes.contains_key(&guild_id)
    }

    async fn search(&self, query: &str) -> BackendResult<Vec<TrackInfo>> {
        resolve_tracks(query).await
    }

    async fn enqueue(
        &self,
        guild_id: GuildId,
        track: TrackInfo,
        requester: UserId,
    ) -> BackendResult<()> {
        if self.inner.songbird.get(guild_id).is_none() {
            return Err(BackendError::NoSessionPresent);
        }

        let start_now = {
            let mut state = self
                .inner
                .nodes
                .get_mut(&guild_id)
                .ok_or(BackendError::NoSessionPresent)?;
            state.queue.push(QueuedTrack { track, requester });
            state.handle.is_none() && state.queue.len() == 1
        };

        if start_now {
            self.inner.start_playback(guild_id).await?;
        }
        Ok(())
    }

    async fn pause(&self, guild_id: GuildId) -> BackendResult<()> {
        let mut state = self
            .inner
            .nodes
            .get_mut(&guild_id)
            .ok_or(BackendError::NoSessionPresent)?;
        if let Some(handle) = &state.handle {
            handle
                .pause()
                .map_err(|e| BackendError::Track(e.to_string()))?;
            state.paused = true;
        }
        Ok(())
    }

    async fn resume(&self, guild_id: GuildId) -> BackendResult<()> {
        let mut state = self
            .inner
            .nodes
            .get_mut(&guild_id)
            .ok_or(BackendError::NoSessionPresent)?;
        if let Some(handle) = &state.handle {
            handle
                .play()
                .map_err(|e| BackendError::Track(e.to_string()))?;
            state.paused = false;
        }
        Ok(())
    }

    async fn stop(&self, guild_id: GuildId) -> BackendResult<()> {
        if let Some(mut state) = self.inner.nodes.get_mut(&guild_id) {
            state.queue.clear();
            state.paused = false;
            if let Some(handle) = state.handle.take() {
                let _ = handle.stop();
            }
        }
        Ok(())
    }

    async fn skip(&self, guild_id: GuildId) -> BackendResult<Option<QueuedTrack>> {
        let (skipped, handle) = {
            let mut state = self
                .inner
                .nodes
                .get_mut(&guild_id)
                .ok_or(BackendError::NoSessionPresent)?;
            match state.handle.take() {
                Some(handle) => (state.queue.first().cloned(), Some(handle)),
                None => (None, None),
            }
        };

        if let Some(handle) = handle {
            // Stopping fires the track-end event, which advances the queue.
            handle
                .stop()
                .map_err(|e| BackendError::Track(e.to_string()))?;
        }
        Ok(skipped)
    }

    async fn set_volume(&self, guild_id: GuildId, volume: u8) -> BackendResult<()> {
        let state = self
            .inner
            .nodes
            .get(&guild_id)
            .ok_or(BackendError::NoSessionPresent)?;
        if let Some(handle) = &state.handle {
            handle
                .set_volume(f32::from(volume) / 100.0)
                .map_err(|e| BackendError::Track(e.to_string()))?;
        }
        Ok(())
    }

    async fn node(&self, guild_id: GuildId) -> Option<GuildNode> {
        self.inner.nodes.get(&guild_id).map(|state| GuildNode {
            queue: state.queue.clone(),
            now_playing: if state.handle.is_some() {
                state.queue.first().cloned()
            } else {
                None
            },
            is_paused: state.paused,
            text_channel: state.text_channel,
        })
    }

    async fn set_node(&self, guild_id: GuildId, node: GuildNode) -> BackendResult<()> {
        let mut state = self
            .inner
            .nodes
            .get_mut(&guild_id)
            .ok_or(BackendError::NoSessionPresent)?;
        state.queue = node.queue;
        state.text_channel = node.text_channel;
        Ok(())
    }

    async fn bind_text_channel(&self, guild_id: GuildId, channel_id: ChannelId) {
        if let Some(mut state) = self.inner.nodes.get_mut(&guild_id) {
            state.text_channel = Some(channel_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_detected() {
        assert!(is_url("https://example.com/track"));
        assert!(is_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
    }

    #[test]
    fn search_phrases_are_not_urls() {
        assert!(!is_url("tears in heaven"));
        assert!(!is_url("bohemian rhapsody live"));
    }

    #[test]
    fn colon_phrases_are_not_urls() {
        assert!(!is_url("re: stacks bon iver"));
        assert!(!is_url("lofi:chill beats"));
        assert!(!is_url("file:///etc/passwd"));
    }
}
