//! Candidate selection — two-stage shortlist of eligible profiles.
//!
//! 1. Keyword pass: any routing keyword appears in the task.
//! 2. Inference fallback (only when pass 1 is empty): the inferred domain
//!    is covered, or the inferred capabilities intersect the profile's.
//!
//! An empty result means "use the default profile".

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::ProfileCatalog;
use crate::classifier::TaskAnalysis;
use crate::context::TaskContext;
use crate::profile::AgentProfile;

/// Which pass produced the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePass {
    KeywordMatch,
    InferenceFallback,
    /// Neither pass matched.
    Empty,
}

impl std::fmt::Display for CandidatePass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeywordMatch => write!(f, "keyword_match"),
            Self::InferenceFallback => write!(f, "inference_fallback"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Shortlisted profiles in catalog registration order.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    pub pass: CandidatePass,
    pub profiles: Vec<&'a Arc<AgentProfile>>,
}

impl Candidates<'_> {
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }
}

/// Filters the catalog down to profiles eligible for a task.
pub struct CandidateSelector<'a> {
    catalog: &'a ProfileCatalog,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self { catalog }
    }

    /// Shortlist for `task`, classifying it only if the keyword pass is empty.
    pub fn candidates(&self, task: &str, context: &TaskContext) -> Candidates<'a> {
        let task_lower = task.to_lowercase();
        let keyword_hits = self.keyword_pass(&task_lower);
        if !keyword_hits.is_empty() {
            return Candidates {
                pass: CandidatePass::KeywordMatch,
                profiles: keyword_hits,
            };
        }
        let analysis = TaskAnalysis::classify(task, context);
        self.fallback_pass(&analysis)
    }

    /// Shortlist using an already computed classification.
    ///
    /// `task_lower` must already be lower-cased.
    pub fn candidates_analyzed(&self, task_lower: &str, analysis: &TaskAnalysis) -> Candidates<'a> {
        let keyword_hits = self.keyword_pass(task_lower);
        if !keyword_hits.is_empty() {
            return Candidates {
                pass: CandidatePass::KeywordMatch,
                profiles: keyword_hits,
            };
        }
        self.fallback_pass(analysis)
    }

    fn keyword_pass(&self, task_lower: &str) -> Vec<&'a Arc<AgentProfile>> {
        self.catalog
            .all()
            .iter()
            .filter(|p| p.matches_any_keyword(task_lower))
            .collect()
    }

    fn fallback_pass(&self, analysis: &TaskAnalysis) -> Candidates<'a> {
        let profiles: Vec<&'a Arc<AgentProfile>> = self
            .catalog
            .all()
            .iter()
            .filter(|p| {
                p.covers_domain(analysis.domain)
                    || analysis.capabilities.iter().any(|c| p.has_capability(c))
            })
            .collect();
        let pass = if profiles.is_empty() {
            CandidatePass::Empty
        } else {
            CandidatePass::InferenceFallback
        };
        Candidates { pass, profiles }
    }
}
