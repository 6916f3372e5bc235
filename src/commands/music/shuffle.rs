use super::guild_id_of;
use super::utils::{
    backend::{AudioBackend, BackendError, QueuedTrack},
    embedded_messages,
};
use crate::{CommandResult, Context};
use poise::serenity_prelude as serenity;
use rand::seq::SliceRandom;
use rand::Rng;
use serenity::model::id::GuildId;

#[derive(Debug, PartialEq)]
pub enum ShuffleOutcome {
    Shuffled,
    OnlyOneSong,
}

/// Randomize the queue in place, keeping the playing entry at position 0.
pub fn shuffle_tail<R: Rng>(queue: &mut [QueuedTrack], rng: &mut R) {
    if queue.len() > 1 {
        queue[1..].shuffle(rng);
    }
}

/// Shuffle the pending part of the queue and write it back to the backend.
pub async fn shuffle_queue(
    backend: &dyn AudioBackend,
    guild_id: GuildId,
) -> Result<ShuffleOutcome, BackendError> {
    let mut node = match backend.node(guild_id).await {
        Some(node) => node,
        None => return Ok(ShuffleOutcome::OnlyOneSong),
    };
    if node.queue.len() <= 1 {
        return Ok(ShuffleOutcome::OnlyOneSong);
    }

    shuffle_tail(&mut node.queue, &mut rand::thread_rng());
    backend.set_node(guild_id, node).await?;
    Ok(ShuffleOutcome::Shuffled)
}

/// Shuffle the current queue
#[poise::command(slash_command, category = "Music")]
pub async fn shuffle(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id_of(&ctx)?;

    match shuffle_queue(ctx.data().backend.as_ref(), guild_id).await {
        Ok(ShuffleOutcome::Shuffled) => {
            ctx.send(embedded_messages::shuffled()).await?;
        }
        Ok(ShuffleOutcome::OnlyOneSong) => {
            ctx.send(embedded_messages::only_one_song()).await?;
        }
        Err(BackendError::NoSessionPresent) => {
            ctx.send(embedded_messages::use_join_first()).await?;
        }
        Err(err) => {
            ctx.send(embedded_messages::error(format!("Failed to shuffle: {err}")))
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ::serenity::model::id::UserId;
    use std::collections::HashSet;

    fn entry(n: u64) -> QueuedTrack {
        QueuedTrack {
            track: super::super::utils::backend::TrackInfo {
                title: format!("track {n}"),
                uri: format!("https://example.com/{n}"),
                author: None,
                length: None,
            },
            requester: UserId::new(n + 1),
        }
    }

    #[test]
    fn single_entry_queue_is_untouched() {
        let mut queue = vec![entry(0)];
        let before = queue.clone();
        shuffle_tail(&mut queue, &mut StdRng::seed_from_u64(7));
        assert_eq!(queue, before);
    }

    #[test]
    fn head_stays_fixed_and_tail_is_a_permutation() {
        let mut queue: Vec<_> = (0..12).map(entry).collect();
        let before = queue.clone();

        shuffle_tail(&mut queue, &mut StdRng::seed_from_u64(42));

        assert_eq!(queue[0], before[0]);
        let tail_before: HashSet<_> = before[1..].iter().map(|e| e.track.uri.clone()).collect();
        let tail_after: HashSet<_> = queue[1..].iter().map(|e| e.track.uri.clone()).collect();
        assert_eq!(tail_before, tail_after);
        assert_eq!(queue.len(), before.len());
    }
}
