//! Documentation target registry and the process-lifetime inventory cache.

use dashmap::DashMap;
use reqwest::StatusCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::sphinx::{self, InventoryError};

/// Errors raised while building a documentation index.
#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Failed to fetch inventory: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The inventory endpoint answered with a non-success status.
    #[error("Inventory request returned status {0}")]
    Status(StatusCode),

    #[error("Failed to parse inventory: {0}")]
    Inventory(#[from] InventoryError),
}

/// One searchable documentation target.
pub struct DocTarget {
    /// Canonical key, also the slash-command spelling.
    pub key: &'static str,
    /// Base URL of the hosted documentation.
    pub base_url: &'static str,
    /// Override for targets whose inventory lives somewhere unconventional.
    pub inventory_url: Option<&'static str>,
    /// Accepted alternate spellings. The canonical key always resolves too.
    pub aliases: &'static [&'static str],
}

impl DocTarget {
    fn inventory_url(&self) -> String {
        match self.inventory_url {
            Some(url) => url.to_string(),
            None => format!("{}/objects.inv", self.base_url.trim_end_matches('/')),
        }
    }
}

/// Static target table, loaded once at startup. No alias may appear in two
/// entries; that invariant is covered by a test rather than runtime checks.
pub static TARGETS: &[DocTarget] = &[
    DocTarget {
        key: "python",
        base_url: "https://docs.python.org/3",
        inventory_url: None,
        aliases: &["py", "py3", "python3"],
    },
    DocTarget {
        key: "numpy",
        base_url: "https://numpy.org/doc/stable",
        inventory_url: None,
        aliases: &["np", "num"],
    },
    DocTarget {
        key: "pandas",
        base_url: "https://pandas.pydata.org/docs",
        inventory_url: None,
        aliases: &["pd", "panda"],
    },
    DocTarget {
        key: "pillow",
        base_url: "https://pillow.readthedocs.io/en/stable",
        inventory_url: None,
        aliases: &["pil"],
    },
    DocTarget {
        key: "requests",
        base_url: "https://requests.readthedocs.io/en/latest",
        inventory_url: None,
        aliases: &["req"],
    },
    DocTarget {
        key: "aiohttp",
        base_url: "https://docs.aiohttp.org/en/stable",
        inventory_url: None,
        aliases: &["http"],
    },
    DocTarget {
        key: "django",
        base_url: "https://django.readthedocs.io/en/stable",
        inventory_url: None,
        aliases: &["dj"],
    },
    DocTarget {
        key: "flask",
        base_url: "https://flask.palletsprojects.com/en/latest",
        inventory_url: None,
        aliases: &["fl"],
    },
    DocTarget {
        key: "sqlalchemy",
        base_url: "https://docs.sqlalchemy.org/en/20",
        inventory_url: None,
        aliases: &["sql", "alchemy"],
    },
    DocTarget {
        key: "tensorflow",
        base_url: "https://www.tensorflow.org/api_docs/python",
        inventory_url: Some(
            "https://github.com/mr-ubik/tensorflow-intersphinx/raw/master/tf2_py_objects.inv",
        ),
        aliases: &["tf"],
    },
    DocTarget {
        key: "matplotlib",
        base_url: "https://matplotlib.org/stable",
        inventory_url: None,
        aliases: &["mpl", "plt"],
    },
    DocTarget {
        key: "pygame",
        base_url: "https://www.pygame.org/docs",
        inventory_url: None,
        aliases: &["pyg", "game"],
    },
    DocTarget {
        key: "simplejson",
        base_url: "https://simplejson.readthedocs.io/en/latest",
        inventory_url: None,
        aliases: &["sjson", "json"],
    },
    DocTarget {
        key: "wikipedia",
        base_url: "https://wikipedia.readthedocs.io/en/latest",
        inventory_url: None,
        aliases: &["wiki"],
    },
    DocTarget {
        key: "praw",
        base_url: "https://praw.readthedocs.io/en/stable",
        inventory_url: None,
        aliases: &["reddit"],
    },
    DocTarget {
        key: "apraw",
        base_url: "https://apraw.readthedocs.io/en/latest",
        inventory_url: None,
        aliases: &[],
    },
    DocTarget {
        key: "asyncpg",
        base_url: "https://magicstack.github.io/asyncpg/current",
        inventory_url: None,
        aliases: &["apg", "postgres"],
    },
    DocTarget {
        key: "aiosqlite",
        base_url: "https://aiosqlite.omnilib.dev/en/stable",
        inventory_url: None,
        aliases: &["asqlite"],
    },
    DocTarget {
        key: "seaborn",
        base_url: "https://seaborn.pydata.org",
        inventory_url: None,
        aliases: &["sns"],
    },
    DocTarget {
        key: "imageio",
        base_url: "https://imageio.readthedocs.io/en/stable",
        inventory_url: None,
        aliases: &["iio"],
    },
];

/// Ordered symbol → absolute URL pairs for one target.
pub type DocIndex = Vec<(String, String)>;

/// Resolve a user-supplied spelling to its canonical target, if any.
///
/// Case-folds and linear-scans the table; the table is small enough that a
/// reverse index would not buy anything.
pub fn resolve_alias(input: &str) -> Option<&'static DocTarget> {
    let folded = input.to_lowercase();
    TARGETS
        .iter()
        .find(|target| target.key == folded || target.aliases.contains(&folded.as_str()))
}

/// In-memory store of built documentation indexes, keyed by target.
///
/// Indexes are built lazily on first lookup and kept for the process
/// lifetime; there is no TTL and no invalidation short of a restart.
pub struct DocStore {
    http: reqwest::Client,
    cache: DashMap<&'static str, Arc<DocIndex>>,
    // Per-key guards so concurrent misses trigger a single fetch.
    build_locks: DashMap<&'static str, Arc<Mutex<()>>>,
    /// Base URL substituted for every target, for tests.
    base_override: Option<String>,
}

impl DocStore {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            cache: DashMap::new(),
            build_locks: DashMap::new(),
            base_override: None,
        }
    }

    /// Store whose fetches are redirected at `base_url` (mock servers).
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            base_override: Some(base_url.into()),
            ..Self::new(http)
        }
    }

    fn urls_for(&self, target: &DocTarget) -> (String, String) {
        match &self.base_override {
            Some(base) => {
                let base = format!("{}/{}", base.trim_end_matches('/'), target.key);
                (format!("{base}/objects.inv"), base)
            }
            None => (target.inventory_url(), target.base_url.to_string()),
        }
    }

    /// Fetch-or-return the built index for `target`.
    ///
    /// Concurrent calls for the same uncached key are serialized on a
    /// per-key mutex so the inventory is only downloaded once.
    pub async fn resolve(&self, target: &'static DocTarget) -> Result<Arc<DocIndex>, DocsError> {
        if let Some(index) = self.cache.get(target.key) {
            debug!("Documentation cache hit for {}", target.key);
            return Ok(Arc::clone(&index));
        }

        let lock = Arc::clone(
            &self
                .build_locks
                .entry(target.key)
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        );
        let _guard = lock.lock().await;

        // Another task may have finished the build while we waited.
        if let Some(index) = self.cache.get(target.key) {
            return Ok(Arc::clone(&index));
        }

        let (inventory_url, base_url) = self.urls_for(target);
        info!("Building documentation cache for {}", target.key);

        let response = self.http.get(&inventory_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                "Received status {} building documentation cache for {} through {}",
                status, target.key, inventory_url
            );
            return Err(DocsError::Status(status));
        }

        let body = response.bytes().await?;
        let inventory = sphinx::parse_object_inv(&body, &base_url)?;
        info!(
            "Built documentation cache for {}: {} symbols",
            target.key,
            inventory.entries.len()
        );

        let index = Arc::new(inventory.entries);
        self.cache.insert(target.key, Arc::clone(&index));
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn canonical_keys_resolve_to_themselves() {
        for target in TARGETS {
            let resolved = resolve_alias(target.key).expect("key must resolve");
            assert_eq!(resolved.key, target.key);
        }
    }

    #[test]
    fn aliases_resolve_to_their_target() {
        assert_eq!(resolve_alias("py").unwrap().key, "python");
        assert_eq!(resolve_alias("np").unwrap().key, "numpy");
        assert_eq!(resolve_alias("json").unwrap().key, "simplejson");
        assert_eq!(resolve_alias("tf").unwrap().key, "tensorflow");
        assert_eq!(resolve_alias("reddit").unwrap().key, "praw");
        assert_eq!(resolve_alias("sns").unwrap().key, "seaborn");
    }

    #[test]
    fn resolution_is_case_folded() {
        assert_eq!(resolve_alias("PY3").unwrap().key, "python");
        assert_eq!(resolve_alias("Pandas").unwrap().key, "pandas");
    }

    #[test]
    fn unknown_spellings_do_not_resolve() {
        assert!(resolve_alias("rust").is_none());
        assert!(resolve_alias("").is_none());
    }

    #[test]
    fn no_alias_is_shared_between_targets() {
        let mut seen = HashSet::new();
        for target in TARGETS {
            assert!(seen.insert(target.key), "duplicate spelling {}", target.key);
            for alias in target.aliases {
                assert!(seen.insert(*alias), "duplicate spelling {alias}");
            }
        }
    }

    #[test]
    fn override_wins_over_conventional_path() {
        let tensorflow = resolve_alias("tensorflow").unwrap();
        assert!(tensorflow.inventory_url().ends_with("tf2_py_objects.inv"));

        let python = resolve_alias("python").unwrap();
        assert_eq!(
            python.inventory_url(),
            "https://docs.python.org/3/objects.inv"
        );
    }
}
