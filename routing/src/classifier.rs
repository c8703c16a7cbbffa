//! Task classification — domain, capability and complexity inference.
//!
//! Pure substring heuristics over the lower-cased task text. There is no
//! tokenization: a keyword matches anywhere, including inside a longer
//! word.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::context::TaskContext;
use crate::profile::{ComplexityLevel, Domain};

/// Domain keyword table. Order is significant: first domain with a hit wins.
const DOMAIN_KEYWORDS: &[(Domain, &[&str])] = &[
    (
        Domain::Ai,
        &[
            "artificial intelligence",
            "machine learning",
            "neural",
            "deep learning",
            "llm",
            "model training",
            "nlp",
            "computer vision",
        ],
    ),
    (
        Domain::Software,
        &[
            "software",
            "code",
            "programming",
            "api",
            "bug",
            "debug",
            "refactor",
            "deploy",
            "compile",
            "function",
        ],
    ),
    (
        Domain::Security,
        &[
            "security",
            "vulnerab",
            "exploit",
            "malware",
            "encrypt",
            "authentication",
            "threat",
            "firewall",
        ],
    ),
    (
        Domain::Performance,
        &[
            "performance",
            "optimiz",
            "latency",
            "throughput",
            "bottleneck",
            "slow",
            "benchmark",
            "scalab",
        ],
    ),
    (
        Domain::Data,
        &[
            "data",
            "statistic",
            "analytics",
            "trend",
            "sql",
            "database",
            "csv",
            "visualiz",
        ],
    ),
    (
        Domain::Business,
        &[
            "business", "market", "revenue", "strategy", "sales", "customer", "pricing", "profit",
        ],
    ),
    (
        Domain::Research,
        &[
            "research",
            "study",
            "literature",
            "paper",
            "investigate",
            "survey",
            "hypothesis",
        ],
    ),
    (
        Domain::Creative,
        &[
            "story",
            "poem",
            "creative",
            "fiction",
            "design a logo",
            "slogan",
            "lyrics",
            "narrative",
        ],
    ),
];

/// Capability keyword table.
const CAPABILITY_KEYWORDS: &[(&str, &[&str])] = &[
    ("coding", &["code", "implement", "program", "function", "script"]),
    ("debugging", &["debug", "bug", "error", "crash", "fix"]),
    ("testing", &["unit test", "test case", "coverage", "regression"]),
    (
        "data_analysis",
        &["analy", "statistic", "trend", "dataset", "correlation"],
    ),
    (
        "visualization",
        &["chart", "graph", "plot", "visualiz", "dashboard"],
    ),
    (
        "machine_learning",
        &[
            "machine learning",
            "neural",
            "train a model",
            "classifier",
            "embedding",
        ],
    ),
    (
        "security_audit",
        &["security", "vulnerab", "audit", "penetration", "threat"],
    ),
    (
        "optimization",
        &["optimiz", "performance", "latency", "speed up", "bottleneck"],
    ),
    (
        "research",
        &["research", "investigate", "literature", "sources", "survey"],
    ),
    ("fact_checking", &["fact-check", "verify", "accuracy of"]),
    (
        "writing",
        &["write", "draft", "essay", "article", "blog", "story"],
    ),
    (
        "documentation",
        &["documentation", "readme", "tutorial", "docs"],
    ),
    (
        "strategy",
        &["strategy", "market", "roadmap", "business plan", "pricing"],
    ),
    ("ideation", &["brainstorm", "ideas", "creative"]),
    ("general_assistance", &["help me", "assist"]),
];

/// Complexity indicator tables, checked high → medium → low.
const COMPLEXITY_INDICATORS: &[(ComplexityLevel, &[&str])] = &[
    (
        ComplexityLevel::High,
        &[
            "complex",
            "comprehensive",
            "in-depth",
            "architecture",
            "distributed",
            "enterprise",
            "multi-step",
            "advanced",
            "end-to-end",
        ],
    ),
    (
        ComplexityLevel::Medium,
        &[
            "analyze",
            "analysis",
            "compare",
            "design",
            "implement",
            "evaluate",
            "investigate",
            "moderate",
        ],
    ),
    (
        ComplexityLevel::Low,
        &[
            "simple",
            "quick",
            "basic",
            "brief",
            "list",
            "summarize",
            "what is",
            "easy",
        ],
    ),
];

/// Length (in characters) above which an unmarked task counts as high.
const HIGH_LENGTH_THRESHOLD: usize = 200;
/// Length (in characters) above which an unmarked task counts as medium.
const MEDIUM_LENGTH_THRESHOLD: usize = 100;

fn any_hit(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text_lower.contains(k))
}

/// First domain in table order with a keyword hit, else `General`.
///
/// Reads only the task text. Callers holding a [`TaskContext`] go through
/// [`TaskAnalysis::classify`], which accepts it but does not consult it.
pub fn infer_domain(text: &str) -> Domain {
    let lower = text.to_lowercase();
    DOMAIN_KEYWORDS
        .iter()
        .find(|(_, keywords)| any_hit(&lower, keywords))
        .map(|(domain, _)| *domain)
        .unwrap_or(Domain::General)
}

/// Every capability with at least one keyword hit. May be empty.
pub fn infer_capabilities(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    CAPABILITY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| any_hit(&lower, keywords))
        .map(|(capability, _)| capability.to_string())
        .collect()
}

/// Indicator words first (high, medium, low), then length thresholds.
pub fn infer_complexity(text: &str) -> ComplexityLevel {
    let lower = text.to_lowercase();
    if let Some((level, _)) = COMPLEXITY_INDICATORS
        .iter()
        .find(|(_, words)| any_hit(&lower, words))
    {
        return *level;
    }

    let len = text.chars().count();
    if len > HIGH_LENGTH_THRESHOLD {
        ComplexityLevel::High
    } else if len > MEDIUM_LENGTH_THRESHOLD {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::Low
    }
}

/// Classification of one task, computed once per routing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAnalysis {
    pub domain: Domain,
    pub capabilities: BTreeSet<String>,
    pub complexity: ComplexityLevel,
}

impl TaskAnalysis {
    /// Classify `text`. The context carries no classification signal;
    /// it is accepted so callers can pass the request through unchanged.
    pub fn classify(text: &str, context: &TaskContext) -> Self {
        let analysis = Self {
            domain: infer_domain(text),
            capabilities: infer_capabilities(text),
            complexity: infer_complexity(text),
        };
        tracing::trace!(
            task_id = context.task_id().unwrap_or("-"),
            domain = %analysis.domain,
            complexity = %analysis.complexity,
            capabilities = analysis.capabilities.len(),
            "Classified task"
        );
        analysis
    }
}
