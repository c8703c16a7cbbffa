//! Router facade — picks one profile per task and learns from outcomes.
//!
//! # Selection
//!
//! ```text
//! task + context
//!   → classify (domain, capabilities, complexity)
//!   → candidates (keyword pass, else inference fallback)
//!   → score every candidate, stable sort descending
//!   → top pick + up to two alternatives
//! ```
//!
//! Ties keep catalog registration order. With no candidates the configured
//! default profile is returned. `select_agent` and `record_outcome` never
//! fail: internal errors are logged and absorbed.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::candidates::{CandidatePass, CandidateSelector};
use crate::catalog::ProfileCatalog;
use crate::classifier::TaskAnalysis;
use crate::config::RouterConfig;
use crate::context::TaskContext;
use crate::error::{RoutingError, RoutingResult};
use crate::performance::{PerformanceRecord, PerformanceTracker, TaskOutcome};
use crate::profile::{AgentProfile, Domain};
use crate::scoring::{ScoreBreakdown, ScoredCandidate, ScoringEngine};
use crate::stats::RegistryStats;

/// Number of runner-up candidates kept for observability.
const MAX_ALTERNATIVES: usize = 2;
/// Characters of task text included in fallback logs.
const TASK_EXCERPT_CHARS: usize = 80;

/// Router shared across call sites.
pub type SharedRouter = Arc<AgentRouter>;

/// How the selected profile was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// Top-scored candidate from the keyword pass.
    KeywordMatch,
    /// Top-scored candidate from the inference fallback.
    InferenceFallback,
    /// No candidates; default profile.
    Default,
    /// Internal error during routing; default profile.
    Recovered,
}

impl std::fmt::Display for SelectionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeywordMatch => write!(f, "keyword_match"),
            Self::InferenceFallback => write!(f, "inference_fallback"),
            Self::Default => write!(f, "default"),
            Self::Recovered => write!(f, "recovered"),
        }
    }
}

/// A runner-up candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub profile_id: String,
    pub score: f64,
}

/// Result of one routing call.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingDecision {
    pub profile: Arc<AgentProfile>,
    /// Score of the selected profile; `None` on the default paths.
    pub score: Option<ScoreBreakdown>,
    pub alternatives: Vec<Alternative>,
    pub source: SelectionSource,
    pub analysis: TaskAnalysis,
    /// Whether the top score reached the profile's confidence threshold.
    /// Informational only.
    pub meets_confidence_threshold: bool,
}

impl RoutingDecision {
    pub fn profile_id(&self) -> &str {
        &self.profile.id
    }

    /// Total score, or 0.0 on the default paths.
    pub fn total_score(&self) -> f64 {
        self.score.map(|s| s.total).unwrap_or(0.0)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(
            self.source,
            SelectionSource::Default | SelectionSource::Recovered
        )
    }
}

fn excerpt(task: &str) -> String {
    let mut out: String = task.chars().take(TASK_EXCERPT_CHARS).collect();
    if task.chars().count() > TASK_EXCERPT_CHARS {
        out.push('…');
    }
    out
}

/// Routing engine: catalog, performance history and configuration.
///
/// Construct once at startup and share by reference (or [`SharedRouter`]).
#[derive(Debug)]
pub struct AgentRouter {
    catalog: ProfileCatalog,
    tracker: PerformanceTracker,
    config: RouterConfig,
    default_profile: Arc<AgentProfile>,
}

impl AgentRouter {
    /// Build a router. The default profile must exist in `catalog`.
    pub fn new(catalog: ProfileCatalog, config: RouterConfig) -> RoutingResult<Self> {
        let default_profile = catalog
            .get(&config.default_profile_id)
            .cloned()
            .ok_or_else(|| RoutingError::UnknownDefaultProfile(config.default_profile_id.clone()))?;
        let tracker = PerformanceTracker::with_limits(config.history_capacity, config.score_window);

        info!(
            profiles = catalog.len(),
            default_profile = %default_profile.id,
            history_capacity = tracker.capacity(),
            score_window = tracker.window(),
            "Agent router initialized"
        );

        Ok(Self {
            catalog,
            tracker,
            config,
            default_profile,
        })
    }

    /// Router over the built-in catalog with default configuration.
    pub fn with_builtin_catalog() -> RoutingResult<Self> {
        Self::new(ProfileCatalog::builtin()?, RouterConfig::default())
    }

    pub fn shared(self) -> SharedRouter {
        Arc::new(self)
    }

    /// Pick the best profile for `task`. Never fails.
    pub fn select_agent(&self, task: &str, context: &TaskContext) -> RoutingDecision {
        let analysis = TaskAnalysis::classify(task, context);
        match self.try_select(task, context, &analysis) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(
                    task = %excerpt(task),
                    task_id = context.task_id().unwrap_or("-"),
                    error = %e,
                    default_profile = %self.default_profile.id,
                    "Routing failed; falling back to default profile"
                );
                self.default_decision(analysis, SelectionSource::Recovered)
            }
        }
    }

    fn try_select(
        &self,
        task: &str,
        context: &TaskContext,
        analysis: &TaskAnalysis,
    ) -> RoutingResult<RoutingDecision> {
        let task_lower = task.to_lowercase();
        let candidates =
            CandidateSelector::new(&self.catalog).candidates_analyzed(&task_lower, analysis);

        let source = match candidates.pass {
            CandidatePass::KeywordMatch => SelectionSource::KeywordMatch,
            CandidatePass::InferenceFallback => SelectionSource::InferenceFallback,
            CandidatePass::Empty => {
                debug!(
                    task = %excerpt(task),
                    domain = %analysis.domain,
                    default_profile = %self.default_profile.id,
                    "No candidates; using default profile"
                );
                return Ok(self.default_decision(analysis.clone(), SelectionSource::Default));
            }
        };

        let engine = ScoringEngine::new(&self.tracker);
        let mut scored = candidates
            .profiles
            .into_iter()
            .map(|profile| {
                engine
                    .score_analyzed(profile, &task_lower, analysis)
                    .map(|breakdown| ScoredCandidate { profile, breakdown })
            })
            .collect::<RoutingResult<Vec<_>>>()?;

        // Stable: equal scores keep registration order.
        scored.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));

        let mut ranked = scored.into_iter();
        let Some(top) = ranked.next() else {
            return Ok(self.default_decision(analysis.clone(), SelectionSource::Default));
        };
        let alternatives: Vec<Alternative> = ranked
            .take(MAX_ALTERNATIVES)
            .map(|c| Alternative {
                profile_id: c.profile.id.clone(),
                score: c.score(),
            })
            .collect();

        let b = top.breakdown;
        info!(
            profile_id = %top.profile.id,
            task_id = context.task_id().unwrap_or("-"),
            source = %source,
            score = b.total,
            keyword = b.keyword_relevance,
            domain = b.domain_relevance,
            capability = b.capability_relevance,
            performance = b.performance,
            complexity = b.complexity,
            alternatives = ?alternatives.iter().map(|a| a.profile_id.as_str()).collect::<Vec<_>>(),
            "Selected agent"
        );

        Ok(RoutingDecision {
            meets_confidence_threshold: b.total >= top.profile.confidence_threshold,
            profile: top.profile.clone(),
            score: Some(b),
            alternatives,
            source,
            analysis: analysis.clone(),
        })
    }

    fn default_decision(&self, analysis: TaskAnalysis, source: SelectionSource) -> RoutingDecision {
        RoutingDecision {
            profile: self.default_profile.clone(),
            score: None,
            alternatives: Vec::new(),
            source,
            analysis,
            meets_confidence_threshold: false,
        }
    }

    /// Feed back an observed outcome. Never fails; errors are logged.
    pub fn record_outcome(&self, profile_id: &str, outcome: &TaskOutcome) {
        if let Err(e) = self.tracker.record(profile_id, outcome) {
            warn!(profile_id, error = %e, "Dropped outcome sample");
        }
    }

    /// Like [`record_outcome`](Self::record_outcome) but returns the stored record.
    pub fn try_record_outcome(
        &self,
        profile_id: &str,
        outcome: &TaskOutcome,
    ) -> RoutingResult<PerformanceRecord> {
        self.tracker.record(profile_id, outcome)
    }

    pub fn get_agent(&self, id: &str) -> Option<Arc<AgentProfile>> {
        self.catalog.get(id).cloned()
    }

    pub fn all_agents(&self) -> &[Arc<AgentProfile>] {
        self.catalog.all()
    }

    pub fn agents_by_capability(&self, capability: &str) -> Vec<Arc<AgentProfile>> {
        self.catalog
            .by_capability(capability)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn agents_by_domain(&self, domain: Domain) -> Vec<Arc<AgentProfile>> {
        self.catalog.by_domain(domain).into_iter().cloned().collect()
    }

    pub fn registry_stats(&self) -> RoutingResult<RegistryStats> {
        RegistryStats::collect(&self.catalog, &self.tracker)
    }

    /// Live performance score for `profile_id` (0.5 without history).
    pub fn performance_score(&self, profile_id: &str) -> RoutingResult<f64> {
        self.tracker.score(profile_id)
    }

    /// Score breakdown of an arbitrary profile for `task`, for diagnostics.
    pub fn explain(
        &self,
        profile_id: &str,
        task: &str,
        context: &TaskContext,
    ) -> RoutingResult<Option<ScoreBreakdown>> {
        let Some(profile) = self.catalog.get(profile_id) else {
            return Ok(None);
        };
        ScoringEngine::new(&self.tracker)
            .score(profile, task, context)
            .map(Some)
    }

    pub fn default_profile(&self) -> &Arc<AgentProfile> {
        &self.default_profile
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &PerformanceTracker {
        &self.tracker
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ComplexityLevel;

    fn router() -> AgentRouter {
        AgentRouter::with_builtin_catalog().unwrap()
    }

    fn profile(id: &str, keywords: &[&str]) -> AgentProfile {
        AgentProfile {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            capabilities: Default::default(),
            tools: vec![],
            search_priority: "standard".into(),
            complexity: ComplexityLevel::Medium,
            max_iterations: 5,
            domains: Default::default(),
            routing_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            confidence_threshold: 0.5,
            metrics: Default::default(),
        }
    }

    #[test]
    fn test_unknown_default_profile_rejected() {
        let err = AgentRouter::new(
            ProfileCatalog::builtin().unwrap(),
            RouterConfig::default().with_default_profile("missing"),
        )
        .unwrap_err();
        assert!(matches!(err, RoutingError::UnknownDefaultProfile(id) if id == "missing"));
    }

    #[test]
    fn test_selects_data_analyst() {
        let decision = router().select_agent(
            "analyze the statistical trends in this dataset",
            &TaskContext::new(),
        );
        assert_eq!(decision.profile_id(), "data_analyst");
        assert_eq!(decision.source, SelectionSource::KeywordMatch);
        assert_eq!(decision.analysis.domain, Domain::Data);
        assert!(decision.meets_confidence_threshold);
    }

    #[test]
    fn test_default_on_no_candidates() {
        let r = router();
        let decision = r.select_agent("hello there", &TaskContext::new());
        assert_eq!(decision.profile_id(), "general_assistant");
        assert_eq!(decision.source, SelectionSource::Default);
        assert!(decision.score.is_none());
        assert!(decision.alternatives.is_empty());
        assert!(decision.is_fallback());
    }

    #[test]
    fn test_configured_default_profile() {
        let r = AgentRouter::new(
            ProfileCatalog::builtin().unwrap(),
            RouterConfig::default().with_default_profile("research_specialist"),
        )
        .unwrap();
        let decision = r.select_agent("", &TaskContext::new());
        assert_eq!(decision.profile_id(), "research_specialist");
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let catalog =
            ProfileCatalog::from_profiles(vec![profile("first", &["zeta"]), profile("second", &["zeta"])])
                .unwrap();
        let r = AgentRouter::new(catalog, RouterConfig::default().with_default_profile("second"))
            .unwrap();
        let decision = r.select_agent("zeta", &TaskContext::new());
        assert_eq!(decision.profile_id(), "first");
        assert_eq!(decision.alternatives.len(), 1);
        assert_eq!(decision.alternatives[0].profile_id, "second");
        assert_eq!(decision.alternatives[0].score, decision.total_score());
    }

    #[test]
    fn test_alternatives_capped_at_two() {
        let catalog = ProfileCatalog::from_profiles(vec![
            profile("a", &["omega"]),
            profile("b", &["omega"]),
            profile("c", &["omega"]),
            profile("d", &["omega"]),
        ])
        .unwrap();
        let r = AgentRouter::new(catalog, RouterConfig::default().with_default_profile("a")).unwrap();
        let decision = r.select_agent("omega", &TaskContext::new());
        assert_eq!(decision.alternatives.len(), 2);
    }

    #[test]
    fn test_feedback_changes_ranking() {
        let catalog =
            ProfileCatalog::from_profiles(vec![profile("first", &["zeta"]), profile("second", &["zeta"])])
                .unwrap();
        let r = AgentRouter::new(catalog, RouterConfig::default().with_default_profile("first"))
            .unwrap();
        r.record_outcome("first", &TaskOutcome::failure());
        r.record_outcome(
            "second",
            &TaskOutcome::success()
                .with_confidence(0.95)
                .with_execution_time_ms(200),
        );
        let decision = r.select_agent("zeta", &TaskContext::new());
        assert_eq!(decision.profile_id(), "second");
    }

    #[test]
    fn test_explain_unknown_profile() {
        let r = router();
        assert!(r.explain("nobody", "task", &TaskContext::new()).unwrap().is_none());
        let b = r
            .explain("creative_writer", "write a poem", &TaskContext::new())
            .unwrap()
            .unwrap();
        assert!(b.keyword_relevance > 0.0);
    }

    #[test]
    fn test_query_surface() {
        let r = router();
        assert!(r.get_agent("security_auditor").is_some());
        assert!(r.get_agent("nope").is_none());
        assert_eq!(r.all_agents().len(), r.catalog().len());
        assert_eq!(r.agents_by_domain(Domain::Creative).len(), 1);
        assert!(!r.agents_by_capability("coding").is_empty());
        assert_eq!(r.performance_score("data_analyst").unwrap(), 0.5);
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "a".repeat(200);
        let e = excerpt(&long);
        assert_eq!(e.chars().count(), TASK_EXCERPT_CHARS + 1);
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_decision_serializes() {
        let decision = router().select_agent("write a poem", &TaskContext::new());
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["profile"]["id"], "creative_writer");
        assert_eq!(json["source"], "keyword_match");
    }

    #[test]
    fn test_recovers_to_default_on_internal_error() {
        let r = router();
        r.tracker().poison_bucket("data_analyst");

        let decision = r.select_agent(
            "analyze the statistical trends in this dataset",
            &TaskContext::new(),
        );
        assert_eq!(decision.profile_id(), "general_assistant");
        assert_eq!(decision.source, SelectionSource::Recovered);
        assert!(decision.is_fallback());
        assert!(decision.score.is_none());
        assert_eq!(decision.analysis.domain, Domain::Data);

        // Dropped with a log line, never a panic.
        r.record_outcome("data_analyst", &TaskOutcome::success());
        assert!(r.try_record_outcome("data_analyst", &TaskOutcome::success()).is_err());

        // Unaffected profiles still route normally.
        let decision = r.select_agent("write a poem", &TaskContext::new());
        assert_eq!(decision.profile_id(), "creative_writer");
        assert_eq!(decision.source, SelectionSource::KeywordMatch);
    }

    #[test]
    fn test_huge_history_capacity_records_without_panicking() {
        let config = RouterConfig::from_lookup(|key| {
            (key == "ROUTER_HISTORY_CAPACITY").then(|| usize::MAX.to_string())
        });
        let r = AgentRouter::new(ProfileCatalog::builtin().unwrap(), config).unwrap();
        r.record_outcome("data_analyst", &TaskOutcome::success());
        assert_eq!(r.tracker().history("data_analyst").unwrap().len(), 1);
        assert_eq!(r.performance_score("data_analyst").unwrap(), 0.7);
    }
}
