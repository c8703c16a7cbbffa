//! Profile catalog — the fixed set of routing targets.
//!
//! Populated once at startup, from the built-in table or a TOML file, and
//! read-only afterwards. Iteration follows registration order, which is
//! also the tie-break order when two candidates score the same.

mod builtin;

pub use builtin::{builtin_profiles, GENERAL_ASSISTANT_ID};

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{RoutingError, RoutingResult};
use crate::profile::{AgentProfile, Domain};

/// On-disk catalog layout: a `[[profiles]]` array.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    profiles: Vec<AgentProfile>,
}

/// Ordered, id-indexed set of agent profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    profiles: Vec<Arc<AgentProfile>>,
    index: HashMap<String, usize>,
}

impl ProfileCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the built-in profile table.
    pub fn builtin() -> RoutingResult<Self> {
        Self::from_profiles(builtin_profiles())
    }

    /// Build a catalog from profiles in registration order.
    pub fn from_profiles(profiles: impl IntoIterator<Item = AgentProfile>) -> RoutingResult<Self> {
        let mut catalog = Self::new();
        for profile in profiles {
            catalog.register(profile)?;
        }
        Ok(catalog)
    }

    /// Parse a TOML catalog (`[[profiles]]` entries).
    pub fn from_toml_str(content: &str) -> RoutingResult<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_profiles(file.profiles)
    }

    /// Load a TOML catalog from disk.
    pub fn from_file(path: &Path) -> RoutingResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RoutingError::CatalogRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        debug!(
            path = %path.display(),
            profiles = catalog.len(),
            "Loaded profile catalog"
        );
        Ok(catalog)
    }

    /// Register a profile. Ids must be unique.
    pub fn register(&mut self, mut profile: AgentProfile) -> RoutingResult<()> {
        profile.normalize();
        profile.validate()?;
        if self.index.contains_key(&profile.id) {
            return Err(RoutingError::DuplicateProfile(profile.id));
        }
        self.index.insert(profile.id.clone(), self.profiles.len());
        self.profiles.push(Arc::new(profile));
        Ok(())
    }

    /// Profile by id.
    pub fn get(&self, id: &str) -> Option<&Arc<AgentProfile>> {
        self.index.get(id).map(|&i| &self.profiles[i])
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All profiles in registration order.
    pub fn all(&self) -> &[Arc<AgentProfile>] {
        &self.profiles
    }

    /// Profiles listing `capability`, in registration order.
    pub fn by_capability(&self, capability: &str) -> Vec<&Arc<AgentProfile>> {
        self.profiles
            .iter()
            .filter(|p| p.has_capability(capability))
            .collect()
    }

    /// Profiles covering `domain`, in registration order.
    pub fn by_domain(&self, domain: Domain) -> Vec<&Arc<AgentProfile>> {
        self.profiles
            .iter()
            .filter(|p| p.covers_domain(domain))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
