use anyhow::{Context, Result};
use routing::{AgentRouter, ProfileCatalog, RouterConfig, TaskOutcome};
use serde::Deserialize;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the profile catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

impl CatalogSource {
    /// `--catalog` wins, then `ROUTER_CATALOG_PATH`, then the built-in table.
    pub fn resolve(flag: Option<PathBuf>) -> Self {
        flag.or_else(|| std::env::var("ROUTER_CATALOG_PATH").ok().map(PathBuf::from))
            .map(Self::File)
            .unwrap_or(Self::Builtin)
    }

    pub fn load(&self) -> Result<ProfileCatalog> {
        match self {
            Self::Builtin => ProfileCatalog::builtin().context("Built-in profile table is invalid"),
            Self::File(path) => ProfileCatalog::from_file(path)
                .with_context(|| format!("Failed to load catalog {}", path.display())),
        }
    }
}

/// Build the router from catalog source, env config and CLI overrides.
pub fn build_router(source: &CatalogSource, default_profile: Option<String>) -> Result<AgentRouter> {
    let catalog = source.load()?;
    let mut config = RouterConfig::from_env();
    if let Some(id) = default_profile {
        config = config.with_default_profile(id);
    }
    AgentRouter::new(catalog, config).context("Failed to initialize router")
}

/// One line of an outcomes file.
#[derive(Debug, Deserialize)]
pub struct OutcomeEntry {
    pub profile_id: String,
    #[serde(flatten)]
    pub outcome: TaskOutcome,
}

/// Read JSON-lines outcomes. Blank lines are skipped.
pub fn read_outcomes(path: &Path) -> Result<Vec<OutcomeEntry>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open outcomes file {}", path.display()))?;
    let mut entries = Vec::new();
    for (n, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: OutcomeEntry = serde_json::from_str(&line)
            .with_context(|| format!("Invalid outcome on line {}", n + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Replay recorded outcomes into the router's history.
pub fn replay_outcomes(router: &AgentRouter, path: &Path) -> Result<usize> {
    let entries = read_outcomes(path)?;
    for entry in &entries {
        router.record_outcome(&entry.profile_id, &entry.outcome);
    }
    info!(count = entries.len(), path = %path.display(), "Replayed outcomes");
    Ok(entries.len())
}
