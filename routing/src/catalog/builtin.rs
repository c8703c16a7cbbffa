//! Built-in profile table loaded when no catalog file is configured.

use crate::profile::{AgentProfile, BaselineMetrics, ComplexityLevel, Domain};

/// Id of the built-in catch-all profile.
pub const GENERAL_ASSISTANT_ID: &str = "general_assistant";

/// Static description of one built-in profile.
struct ProfileSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    capabilities: &'static [&'static str],
    tools: &'static [&'static str],
    search_priority: &'static str,
    complexity: ComplexityLevel,
    max_iterations: u32,
    domains: &'static [Domain],
    keywords: &'static [&'static str],
    confidence_threshold: f64,
    metrics: (f64, f64, f64),
}

impl From<&ProfileSeed> for AgentProfile {
    fn from(seed: &ProfileSeed) -> Self {
        let (accuracy, speed, thoroughness) = seed.metrics;
        Self {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            capabilities: seed.capabilities.iter().map(|c| c.to_string()).collect(),
            tools: seed.tools.iter().map(|t| t.to_string()).collect(),
            search_priority: seed.search_priority.to_string(),
            complexity: seed.complexity,
            max_iterations: seed.max_iterations,
            domains: seed.domains.iter().copied().collect(),
            routing_keywords: seed.keywords.iter().map(|k| k.to_string()).collect(),
            confidence_threshold: seed.confidence_threshold,
            metrics: BaselineMetrics {
                accuracy,
                speed,
                thoroughness,
            },
        }
    }
}

// Registration order matters: it breaks score ties.
const PROFILES: &[ProfileSeed] = &[
    ProfileSeed {
        id: GENERAL_ASSISTANT_ID,
        name: "General Assistant",
        description: "Handles broad requests that fit no specialist",
        capabilities: &["general_assistance", "writing", "research"],
        tools: &["web_search", "knowledge_lookup"],
        search_priority: "standard",
        complexity: ComplexityLevel::Medium,
        max_iterations: 8,
        domains: &[],
        keywords: &["help me", "assist", "general question"],
        confidence_threshold: 0.5,
        metrics: (0.75, 0.85, 0.7),
    },
    ProfileSeed {
        id: "data_analyst",
        name: "Data Analyst",
        description: "Statistical analysis, trend detection and reporting over datasets",
        capabilities: &["data_analysis", "visualization", "research"],
        tools: &["sql_query", "dataframe", "chart_render"],
        search_priority: "internal",
        complexity: ComplexityLevel::Medium,
        max_iterations: 12,
        domains: &[Domain::Data, Domain::Business],
        keywords: &[
            "analyze",
            "analysis",
            "statistics",
            "statistical",
            "trends",
            "dataset",
            "data",
            "metrics",
            "correlation",
            "visualize",
        ],
        confidence_threshold: 0.6,
        metrics: (0.88, 0.75, 0.85),
    },
    ProfileSeed {
        id: "software_engineer",
        name: "Software Engineer",
        description: "Implements, debugs and refactors application code",
        capabilities: &["coding", "debugging", "testing"],
        tools: &["code_search", "file_edit", "test_runner"],
        search_priority: "docs",
        complexity: ComplexityLevel::High,
        max_iterations: 20,
        domains: &[Domain::Software],
        keywords: &[
            "code",
            "implement",
            "bug",
            "refactor",
            "function",
            "api",
            "compile",
            "debug",
            "unit test",
        ],
        confidence_threshold: 0.65,
        metrics: (0.85, 0.7, 0.8),
    },
    ProfileSeed {
        id: "security_auditor",
        name: "Security Auditor",
        description: "Threat modelling, vulnerability review and hardening advice",
        capabilities: &["security_audit", "code_review", "research"],
        tools: &["static_analyzer", "cve_lookup", "code_search"],
        search_priority: "advisories",
        complexity: ComplexityLevel::Expert,
        max_iterations: 25,
        domains: &[Domain::Security, Domain::Software],
        keywords: &[
            "security",
            "vulnerability",
            "exploit",
            "penetration",
            "threat",
            "encryption",
            "authentication",
            "cve",
        ],
        confidence_threshold: 0.75,
        metrics: (0.92, 0.6, 0.95),
    },
    ProfileSeed {
        id: "performance_engineer",
        name: "Performance Engineer",
        description: "Profiles systems and removes latency and throughput bottlenecks",
        capabilities: &["optimization", "profiling", "coding"],
        tools: &["profiler", "benchmark_runner", "code_search"],
        search_priority: "docs",
        complexity: ComplexityLevel::High,
        max_iterations: 18,
        domains: &[Domain::Performance, Domain::Software],
        keywords: &[
            "performance",
            "optimize",
            "latency",
            "bottleneck",
            "throughput",
            "profiling",
            "benchmark",
            "slow",
        ],
        confidence_threshold: 0.65,
        metrics: (0.86, 0.72, 0.84),
    },
    ProfileSeed {
        id: "ml_engineer",
        name: "ML Engineer",
        description: "Model design, training and evaluation",
        capabilities: &["machine_learning", "data_analysis", "coding"],
        tools: &["notebook", "dataframe", "gpu_jobs"],
        search_priority: "papers",
        complexity: ComplexityLevel::Expert,
        max_iterations: 25,
        domains: &[Domain::Ai, Domain::Data],
        keywords: &[
            "machine learning",
            "neural",
            "model training",
            "llm",
            "deep learning",
            "embedding",
            "fine-tune",
            "classifier",
        ],
        confidence_threshold: 0.7,
        metrics: (0.87, 0.6, 0.9),
    },
    ProfileSeed {
        id: "business_strategist",
        name: "Business Strategist",
        description: "Market analysis, pricing and strategic planning",
        capabilities: &["strategy", "research", "writing"],
        tools: &["web_search", "spreadsheet"],
        search_priority: "market",
        complexity: ComplexityLevel::Medium,
        max_iterations: 10,
        domains: &[Domain::Business],
        keywords: &[
            "strategy",
            "market",
            "revenue",
            "business plan",
            "competitor",
            "pricing",
            "roi",
            "stakeholder",
        ],
        confidence_threshold: 0.6,
        metrics: (0.8, 0.8, 0.75),
    },
    ProfileSeed {
        id: "research_specialist",
        name: "Research Specialist",
        description: "Literature review, source gathering and fact checking",
        capabilities: &["research", "fact_checking", "writing"],
        tools: &["web_search", "paper_search", "citation_manager"],
        search_priority: "academic",
        complexity: ComplexityLevel::High,
        max_iterations: 15,
        domains: &[Domain::Research],
        keywords: &[
            "research",
            "investigate",
            "literature",
            "sources",
            "citation",
            "survey",
            "fact-check",
        ],
        confidence_threshold: 0.65,
        metrics: (0.9, 0.65, 0.92),
    },
    ProfileSeed {
        id: "creative_writer",
        name: "Creative Writer",
        description: "Stories, copy and other imaginative writing",
        capabilities: &["writing", "ideation"],
        tools: &["thesaurus"],
        search_priority: "none",
        complexity: ComplexityLevel::Medium,
        max_iterations: 6,
        domains: &[Domain::Creative],
        keywords: &[
            "story",
            "poem",
            "creative",
            "fiction",
            "narrative",
            "slogan",
            "brainstorm",
            "lyrics",
        ],
        confidence_threshold: 0.5,
        metrics: (0.7, 0.9, 0.65),
    },
    ProfileSeed {
        id: "technical_writer",
        name: "Technical Writer",
        description: "Documentation, tutorials and explanations of technical material",
        capabilities: &["writing", "documentation"],
        tools: &["code_search", "markdown_render"],
        search_priority: "docs",
        complexity: ComplexityLevel::Low,
        max_iterations: 8,
        domains: &[Domain::Software, Domain::Research],
        keywords: &[
            "documentation",
            "docs",
            "tutorial",
            "readme",
            "guide",
            "write up",
            "explain",
        ],
        confidence_threshold: 0.55,
        metrics: (0.82, 0.8, 0.78),
    },
];

/// Built-in profiles in registration order.
pub fn builtin_profiles() -> Vec<AgentProfile> {
    PROFILES.iter().map(AgentProfile::from).collect()
}
