//! Aggregate registry statistics for observability.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::ProfileCatalog;
use crate::error::RoutingResult;
use crate::performance::{PerformanceSummary, PerformanceTracker};
use crate::profile::{ComplexityLevel, Domain};

/// Performance summary tagged with its profile id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePerformance {
    pub profile_id: String,
    #[serde(flatten)]
    pub summary: PerformanceSummary,
}

/// Counts over the catalog plus per-profile performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_profiles: usize,
    pub by_complexity: BTreeMap<ComplexityLevel, usize>,
    pub by_domain: BTreeMap<Domain, usize>,
    /// Capability name → number of profiles listing it.
    pub capabilities: BTreeMap<String, usize>,
    /// Catalog order first, then ids seen only through outcomes.
    pub performance: Vec<ProfilePerformance>,
}

impl RegistryStats {
    pub fn collect(
        catalog: &ProfileCatalog,
        tracker: &PerformanceTracker,
    ) -> RoutingResult<Self> {
        let mut by_complexity = BTreeMap::new();
        let mut by_domain = BTreeMap::new();
        let mut capabilities = BTreeMap::new();

        for profile in catalog.all() {
            *by_complexity.entry(profile.complexity).or_insert(0) += 1;
            for domain in &profile.domains {
                *by_domain.entry(*domain).or_insert(0) += 1;
            }
            for capability in &profile.capabilities {
                *capabilities.entry(capability.clone()).or_insert(0) += 1;
            }
        }

        let mut performance = Vec::new();
        for profile in catalog.all() {
            if let Some(summary) = tracker.summary(&profile.id)? {
                performance.push(ProfilePerformance {
                    profile_id: profile.id.clone(),
                    summary,
                });
            }
        }
        for id in tracker.tracked_ids()? {
            if catalog.contains(&id) {
                continue;
            }
            if let Some(summary) = tracker.summary(&id)? {
                performance.push(ProfilePerformance {
                    profile_id: id,
                    summary,
                });
            }
        }

        Ok(Self {
            total_profiles: catalog.len(),
            by_complexity,
            by_domain,
            capabilities,
            performance,
        })
    }
}
