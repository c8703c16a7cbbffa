//! Score property tests — randomized validation of routing invariants.
//!
//! Tests verify:
//! - Every score component and total stays within [0, 1]
//! - Domain inference is pure
//! - `select_agent` always returns a registered profile
//! - Outcome scores stay within [0, 1]

use proptest::prelude::*;
use routing::{
    infer_domain, AgentRouter, PerformanceTracker, ProfileCatalog, ScoringEngine, TaskContext,
    TaskOutcome,
};

fn task_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        ".{0,300}",
        "[a-z ]{0,120}",
        prop::sample::select(vec![
            "analyze", "poem", "security", "latency", "neural", "market", "research", "docs",
            "complex", "simple", "data", "code",
        ])
        .prop_map(|s| s.to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_score_within_unit_interval(task in task_strategy(), failures in 0usize..5) {
        let catalog = ProfileCatalog::builtin().unwrap();
        let tracker = PerformanceTracker::new();
        for profile in catalog.all().iter().take(failures) {
            tracker.record(&profile.id, &TaskOutcome::failure()).unwrap();
        }
        let engine = ScoringEngine::new(&tracker);
        for profile in catalog.all() {
            let b = engine.score(profile, &task, &TaskContext::new()).unwrap();
            for v in [
                b.keyword_relevance,
                b.domain_relevance,
                b.capability_relevance,
                b.performance,
                b.complexity,
                b.total,
            ] {
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn prop_infer_domain_is_pure(task in task_strategy()) {
        let router = AgentRouter::with_builtin_catalog().unwrap();
        let before = infer_domain(&task);
        router.record_outcome("data_analyst", &TaskOutcome::success());
        let _ = router.select_agent(&task, &TaskContext::new());
        prop_assert_eq!(before, infer_domain(&task));
    }

    #[test]
    fn prop_select_agent_is_total(task in task_strategy(), key in "[a-z_]{1,10}", value in any::<i64>()) {
        let router = AgentRouter::with_builtin_catalog().unwrap();
        let ctx = TaskContext::new().with(key, value);
        let decision = router.select_agent(&task, &ctx);
        prop_assert!(router.get_agent(decision.profile_id()).is_some());
        prop_assert!(decision.alternatives.len() <= 2);
        prop_assert!((0.0..=1.0).contains(&decision.total_score()));
    }

    #[test]
    fn prop_outcome_score_bounded(
        success in any::<bool>(),
        confidence in prop::option::of(-1.0f64..2.0),
        time in prop::option::of(0u64..20_000),
    ) {
        let outcome = TaskOutcome {
            success,
            confidence,
            execution_time_ms: time,
            ..TaskOutcome::default()
        };
        let s = outcome.score();
        prop_assert!((0.0..=1.0).contains(&s));
    }
}
