//! A Discord bot pairing music playback (delegated to an audio backend)
//! with documentation search over Sphinx object inventories.

use std::sync::{Arc, LazyLock};

pub mod commands;
pub mod utils;

#[cfg(feature = "music")]
use commands::music::utils::backend::AudioBackend;
use utils::docs::DocStore;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// Shared HTTP client, reused for audio inputs and inventory fetches.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// User data, stored and accessible in all command invocations.
pub struct Data {
    /// Audio-node client every playback command delegates to.
    #[cfg(feature = "music")]
    pub backend: Arc<dyn AudioBackend>,
    /// Documentation index store backing the rtfm commands.
    pub docs: Arc<DocStore>,
}
