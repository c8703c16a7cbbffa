//! Scoring engine — composite relevance score for one candidate.
//!
//! ```text
//! Component            | Weight | Basis
//! ---------------------|--------|------------------------------------------
//! keyword_relevance    | 0.30   | matched / total routing keywords
//! domain_relevance     | 0.25   | inferred domain in profile domains
//! capability_relevance | 0.25   | |inferred ∩ profile| / |inferred|
//! performance          | 0.10   | rolling tracker score
//! complexity           | 0.10   | ordinal distance match
//! ```
//!
//! The total is the sum capped at 1.0.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::classifier::TaskAnalysis;
use crate::context::TaskContext;
use crate::error::{RoutingError, RoutingResult};
use crate::performance::PerformanceTracker;
use crate::profile::{AgentProfile, ComplexityLevel};

pub const KEYWORD_WEIGHT: f64 = 0.30;
pub const DOMAIN_WEIGHT: f64 = 0.25;
pub const CAPABILITY_WEIGHT: f64 = 0.25;
pub const PERFORMANCE_WEIGHT: f64 = 0.10;
pub const COMPLEXITY_WEIGHT: f64 = 0.10;

/// Match factor between a profile's tier and a task's tier.
///
/// Exact match 1.0, one step apart 0.7, anything further 0.3.
pub fn complexity_match(agent: ComplexityLevel, task: ComplexityLevel) -> f64 {
    match agent.distance(task) {
        0 => 1.0,
        1 => 0.7,
        _ => 0.3,
    }
}

/// Weighted score components for one profile/task pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_relevance: f64,
    pub domain_relevance: f64,
    pub capability_relevance: f64,
    pub performance: f64,
    pub complexity: f64,
    /// Sum of the components, capped at 1.0.
    pub total: f64,
}

impl ScoreBreakdown {
    fn from_components(
        keyword_relevance: f64,
        domain_relevance: f64,
        capability_relevance: f64,
        performance: f64,
        complexity: f64,
    ) -> Self {
        let sum =
            keyword_relevance + domain_relevance + capability_relevance + performance + complexity;
        Self {
            keyword_relevance,
            domain_relevance,
            capability_relevance,
            performance,
            complexity,
            total: sum.min(1.0),
        }
    }
}

/// A candidate profile with its computed score.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub profile: &'a Arc<AgentProfile>,
    pub breakdown: ScoreBreakdown,
}

impl ScoredCandidate<'_> {
    pub fn score(&self) -> f64 {
        self.breakdown.total
    }
}

/// Scores candidates against a task using the performance tracker.
pub struct ScoringEngine<'a> {
    tracker: &'a PerformanceTracker,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(tracker: &'a PerformanceTracker) -> Self {
        Self { tracker }
    }

    /// Classify `task` and score `profile` against it.
    pub fn score(
        &self,
        profile: &AgentProfile,
        task: &str,
        context: &TaskContext,
    ) -> RoutingResult<ScoreBreakdown> {
        let analysis = TaskAnalysis::classify(task, context);
        self.score_analyzed(profile, &task.to_lowercase(), &analysis)
    }

    /// Score against a pre-computed classification.
    ///
    /// `task_lower` must already be lower-cased.
    pub fn score_analyzed(
        &self,
        profile: &AgentProfile,
        task_lower: &str,
        analysis: &TaskAnalysis,
    ) -> RoutingResult<ScoreBreakdown> {
        let keyword_relevance = if profile.routing_keywords.is_empty() {
            0.0
        } else {
            let hits = profile.matched_keywords(task_lower).count();
            hits as f64 / profile.routing_keywords.len() as f64 * KEYWORD_WEIGHT
        };

        let domain_relevance = if profile.covers_domain(analysis.domain) {
            DOMAIN_WEIGHT
        } else {
            0.0
        };

        let capability_relevance = if analysis.capabilities.is_empty() {
            0.0
        } else {
            let shared = analysis
                .capabilities
                .iter()
                .filter(|c| profile.has_capability(c))
                .count();
            shared as f64 / analysis.capabilities.len() as f64 * CAPABILITY_WEIGHT
        };

        let performance = self.tracker.score(&profile.id)? * PERFORMANCE_WEIGHT;
        let complexity =
            complexity_match(profile.complexity, analysis.complexity) * COMPLEXITY_WEIGHT;

        let breakdown = ScoreBreakdown::from_components(
            keyword_relevance,
            domain_relevance,
            capability_relevance,
            performance,
            complexity,
        );
        if !breakdown.total.is_finite() {
            return Err(RoutingError::NonFiniteScore(profile.id.clone()));
        }
        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProfileCatalog;
    use crate::performance::TaskOutcome;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_complexity_match_table() {
        use ComplexityLevel::*;
        assert_eq!(complexity_match(Medium, High), 0.7);
        assert_eq!(complexity_match(Medium, Low), 0.7);
        assert_eq!(complexity_match(Medium, Expert), 0.3);
        assert_eq!(complexity_match(High, High), 1.0);
        assert_eq!(complexity_match(Low, Expert), 0.3);
    }

    #[test]
    fn test_data_analyst_breakdown() {
        let catalog = ProfileCatalog::builtin().unwrap();
        let tracker = PerformanceTracker::new();
        let engine = ScoringEngine::new(&tracker);
        let analyst = catalog.get("data_analyst").unwrap();

        let b = engine
            .score(
                analyst,
                "analyze the statistical trends in this dataset",
                &TaskContext::new(),
            )
            .unwrap();

        // analyze, statistical, trends, dataset, data: 5 of 10 keywords.
        assert!((b.keyword_relevance - 0.15).abs() < EPS);
        assert!((b.domain_relevance - 0.25).abs() < EPS);
        assert!((b.capability_relevance - 0.25).abs() < EPS);
        assert!((b.performance - 0.05).abs() < EPS);
        assert!((b.complexity - 0.10).abs() < EPS);
        assert!((b.total - 0.80).abs() < EPS);
    }

    #[test]
    fn test_creative_writer_scores_lower_on_data_task() {
        let catalog = ProfileCatalog::builtin().unwrap();
        let tracker = PerformanceTracker::new();
        let engine = ScoringEngine::new(&tracker);
        let task = "analyze the statistical trends in this dataset";

        let writer = engine
            .score(catalog.get("creative_writer").unwrap(), task, &TaskContext::new())
            .unwrap();
        assert_eq!(writer.keyword_relevance, 0.0);
        assert_eq!(writer.domain_relevance, 0.0);

        let analyst = engine
            .score(catalog.get("data_analyst").unwrap(), task, &TaskContext::new())
            .unwrap();
        assert!(analyst.total > writer.total);
    }

    #[test]
    fn test_empty_inferred_capabilities_contribute_zero() {
        let catalog = ProfileCatalog::builtin().unwrap();
        let tracker = PerformanceTracker::new();
        let engine = ScoringEngine::new(&tracker);
        let b = engine
            .score(
                catalog.get("general_assistant").unwrap(),
                "hello there",
                &TaskContext::new(),
            )
            .unwrap();
        assert_eq!(b.capability_relevance, 0.0);
        assert_eq!(b.domain_relevance, 0.0);
    }

    #[test]
    fn test_performance_component_follows_tracker() {
        let catalog = ProfileCatalog::builtin().unwrap();
        let tracker = PerformanceTracker::new();
        tracker
            .record("data_analyst", &TaskOutcome::failure())
            .unwrap();
        let engine = ScoringEngine::new(&tracker);
        let b = engine
            .score(
                catalog.get("data_analyst").unwrap(),
                "csv",
                &TaskContext::new(),
            )
            .unwrap();
        assert!((b.performance - 0.02).abs() < EPS);
    }

    #[test]
    fn test_total_is_capped() {
        let b = ScoreBreakdown::from_components(0.3, 0.25, 0.25, 0.1, 0.3);
        assert_eq!(b.total, 1.0);
    }
}
