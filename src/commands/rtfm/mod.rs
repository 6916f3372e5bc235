//! Documentation-search commands backed by Sphinx object inventories.

use crate::utils::{docs, fuzzy};
use crate::{CommandResult, Context};
use poise::serenity_prelude as serenity;
use poise::CreateReply;
use serenity::all::{CreateActionRow, CreateButton, CreateEmbed};
use tracing::error;

/// Maximum number of matches shown per search.
const RESULT_LIMIT: usize = 10;
const EMBED_COLOR: u32 = 0xf1c40f;

async fn autocomplete_doc(_ctx: Context<'_>, partial: &str) -> impl Iterator<Item = String> {
    let folded = partial.to_lowercase();
    docs::TARGETS
        .iter()
        .flat_map(|target| std::iter::once(target.key).chain(target.aliases.iter().copied()))
        .filter(move |spelling| spelling.starts_with(&folded))
        .map(str::to_string)
        .take(25)
        .collect::<Vec<_>>()
        .into_iter()
}

/// Search through the docs of a library
#[poise::command(slash_command, category = "Documentation")]
pub async fn rtfm(
    ctx: Context<'_>,
    #[description = "Documentation of a library"]
    #[autocomplete = "autocomplete_doc"]
    doc: String,
    #[description = "Term to search for"] term: String,
) -> CommandResult {
    let target = match docs::resolve_alias(&doc) {
        Some(target) => target,
        None => {
            ctx.send(
                CreateReply::default()
                    .content(format!(
                        "I don't know `{doc}`. See `/rtfmlist` for the available targets."
                    ))
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }
    };

    // Building an index on a cache miss downloads the whole inventory
    ctx.defer().await?;

    let index = match ctx.data().docs.resolve(target).await {
        Ok(index) => index,
        Err(err) => {
            error!("Failed to build rtfm cache for {}: {}", target.key, err);
            ctx.send(
                CreateReply::default()
                    .content(format!("Failed to build the documentation cache: {err}"))
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }
    };

    let results = fuzzy::finder(&term, &index, RESULT_LIMIT);
    if results.is_empty() {
        ctx.send(CreateReply::default().content("Couldn't find any results"))
            .await?;
        return Ok(());
    }

    let description = results
        .iter()
        .map(|(symbol, url)| format!("[`{symbol}`]({url})"))
        .collect::<Vec<_>>()
        .join("\n");

    let button = CreateButton::new_link(target.base_url).label("Open the docs");
    ctx.send(
        CreateReply::default()
            .embed(
                CreateEmbed::new()
                    .title(format!("Searched in {}", target.key))
                    .description(description)
                    .color(EMBED_COLOR),
            )
            .components(vec![CreateActionRow::Buttons(vec![button])]),
    )
    .await?;

    Ok(())
}

/// List all available documentation search targets
#[poise::command(slash_command, category = "Documentation")]
pub async fn rtfmlist(ctx: Context<'_>) -> CommandResult {
    let description = docs::TARGETS
        .iter()
        .map(|target| {
            let aliases = target
                .aliases
                .iter()
                .map(|alias| format!("`{alias}`"))
                .collect::<Vec<_>>()
                .join(" ");
            format!("[{}]({}): {}", target.key, target.base_url, aliases)
        })
        .collect::<Vec<_>>()
        .join("\n");

    ctx.send(
        CreateReply::default().embed(
            CreateEmbed::new()
                .title("Available documentation targets")
                .description(description)
                .color(EMBED_COLOR),
        ),
    )
    .await?;

    Ok(())
}
