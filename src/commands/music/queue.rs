use super::guild_id_of;
use super::utils::{
    backend::{GuildNode, QueuedTrack},
    embedded_messages,
};
use crate::{CommandResult, Context};
use poise::serenity_prelude as serenity;
use poise::CreateReply;
use serenity::all::{
    ComponentInteractionCollector, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponse, CreateInteractionResponseMessage,
};

/// Tracks shown per page.
const PAGE_SIZE: usize = 10;
/// Idle period after which the pagination buttons stop responding.
const PAGINATION_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

fn format_entry(entry: &QueuedTrack) -> String {
    format!(
        "[{}]({}) [<@{}>]",
        entry.track.title, entry.track.uri, entry.requester
    )
}

/// Split queue entries into page-sized description blocks.
pub fn queue_pages(entries: &[QueuedTrack], page_size: usize) -> Vec<String> {
    entries
        .chunks(page_size)
        .map(|chunk| {
            chunk
                .iter()
                .map(format_entry)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

fn queue_embed(guild_name: &str, node: &GuildNode, pages: &[String], page: usize) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("Queue for {guild_name}"))
        .description(pages[page].clone())
        .color(0x00ff00)
        .footer(CreateEmbedFooter::new(format!(
            "Page {}/{}",
            page + 1,
            pages.len()
        )));

    if let Some(entry) = &node.now_playing {
        embed = embed.field("Now Playing", format_entry(entry), false);
    }
    embed
}

/// Show the music queue
#[poise::command(slash_command, category = "Music")]
pub async fn queue(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id_of(&ctx)?;

    let node = match ctx.data().backend.node(guild_id).await {
        Some(node) => node,
        None => {
            ctx.send(embedded_messages::queue_is_empty()).await?;
            return Ok(());
        }
    };
    if node.queue.is_empty() {
        ctx.send(embedded_messages::queue_is_empty()).await?;
        return Ok(());
    }

    let guild_name = ctx
        .guild()
        .map(|guild| guild.name.clone())
        .unwrap_or_else(|| "this server".to_string());
    let pages = queue_pages(&node.queue, PAGE_SIZE);

    let ctx_id = ctx.id();
    let prev_button_id = format!("{ctx_id}prev");
    let next_button_id = format!("{ctx_id}next");

    let mut current_page = 0;
    let components = vec![CreateActionRow::Buttons(vec![
        CreateButton::new(&prev_button_id).emoji('◀'),
        CreateButton::new(&next_button_id).emoji('▶'),
    ])];

    let msg = ctx
        .send(
            CreateReply::default()
                .embed(queue_embed(&guild_name, &node, &pages, current_page))
                .components(components),
        )
        .await?;

    // Only the invoking user may page; interaction expires after the timeout.
    while let Some(press) = ComponentInteractionCollector::new(ctx)
        .author_id(ctx.author().id)
        .filter(move |press| press.data.custom_id.starts_with(&ctx_id.to_string()))
        .timeout(PAGINATION_TIMEOUT)
        .await
    {
        if press.data.custom_id == next_button_id {
            current_page = (current_page + 1) % pages.len();
        } else if press.data.custom_id == prev_button_id {
            current_page = current_page.checked_sub(1).unwrap_or(pages.len() - 1);
        } else {
            continue;
        }

        press
            .create_response(
                ctx.serenity_context(),
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::default()
                        .embed(queue_embed(&guild_name, &node, &pages, current_page)),
                ),
            )
            .await?;
    }

    // Strip the buttons once the collector has expired
    msg.edit(
        ctx,
        CreateReply::default()
            .embed(queue_embed(&guild_name, &node, &pages, current_page))
            .components(vec![]),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::music::utils::backend::TrackInfo;
    use ::serenity::model::id::UserId;

    fn entry(n: u64) -> QueuedTrack {
        QueuedTrack {
            track: TrackInfo {
                title: format!("track {n}"),
                uri: format!("https://example.com/{n}"),
                author: None,
                length: None,
            },
            requester: UserId::new(n + 1),
        }
    }

    #[test]
    fn pages_hold_at_most_ten_entries() {
        let entries: Vec<_> = (0..23).map(entry).collect();
        let pages = queue_pages(&entries, PAGE_SIZE);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].lines().count(), 10);
        assert_eq!(pages[2].lines().count(), 3);
    }

    #[test]
    fn single_page_for_short_queues() {
        let entries: Vec<_> = (0..4).map(entry).collect();
        let pages = queue_pages(&entries, PAGE_SIZE);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("track 0"));
        assert!(pages[0].contains("<@1>"));
    }
}
