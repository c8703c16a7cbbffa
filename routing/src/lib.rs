//! Agent Routing Library
//!
//! Routes a natural-language task to the best-suited worker profile from a
//! fixed catalog, and biases future routing with observed outcomes.
//!
//! # Components
//!
//! - [`ProfileCatalog`]: immutable set of profiles (built-in table or TOML)
//! - [`classifier`]: domain, capability and complexity inference
//! - [`CandidateSelector`]: keyword pass, then inference fallback
//! - [`ScoringEngine`]: five-component weighted score in [0, 1]
//! - [`PerformanceTracker`]: bounded rolling outcome history per profile
//! - [`AgentRouter`]: facade; `select_agent` / `record_outcome` never fail
//!
//! # Usage
//!
//! ```rust,no_run
//! use routing::{AgentRouter, TaskContext, TaskOutcome};
//!
//! let router = AgentRouter::with_builtin_catalog()?;
//! let decision = router.select_agent("summarize the sales trends", &TaskContext::new());
//! // ... run the selected worker ...
//! router.record_outcome(decision.profile_id(), &TaskOutcome::success());
//! # Ok::<(), routing::RoutingError>(())
//! ```

pub mod candidates;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod context;
pub mod error;
pub mod performance;
pub mod profile;
pub mod router;
pub mod scoring;
pub mod stats;

pub use candidates::{CandidatePass, CandidateSelector, Candidates};
pub use catalog::{ProfileCatalog, GENERAL_ASSISTANT_ID};
pub use classifier::{infer_capabilities, infer_complexity, infer_domain, TaskAnalysis};
pub use config::RouterConfig;
pub use context::TaskContext;
pub use error::{RoutingError, RoutingResult};
pub use performance::{
    PerformanceHistory, PerformanceRecord, PerformanceSummary, PerformanceTracker, TaskOutcome,
};
pub use profile::{AgentProfile, BaselineMetrics, ComplexityLevel, Domain};
pub use router::{AgentRouter, Alternative, RoutingDecision, SelectionSource, SharedRouter};
pub use scoring::{complexity_match, ScoreBreakdown, ScoredCandidate, ScoringEngine};
pub use stats::{ProfilePerformance, RegistryStats};
