//! Agent profile model — the routing targets.
//!
//! A profile describes one worker specialization: what it can do
//! (capabilities, tools), where it applies (domains, routing keywords)
//! and which difficulty tier it is meant for.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{RoutingError, RoutingResult};

/// Task domain.
///
/// Declaration order is the fixed inference order used by the classifier
/// (first keyword hit wins), with `General` as the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    Ai,
    Software,
    Security,
    Performance,
    Data,
    Business,
    Research,
    Creative,
    General,
}

impl Domain {
    /// All domains in inference order.
    pub fn all() -> &'static [Domain] {
        &[
            Self::Ai,
            Self::Software,
            Self::Security,
            Self::Performance,
            Self::Data,
            Self::Business,
            Self::Research,
            Self::Creative,
            Self::General,
        ]
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ai => write!(f, "AI"),
            Self::Software => write!(f, "SOFTWARE"),
            Self::Security => write!(f, "SECURITY"),
            Self::Performance => write!(f, "PERFORMANCE"),
            Self::Data => write!(f, "DATA"),
            Self::Business => write!(f, "BUSINESS"),
            Self::Research => write!(f, "RESEARCH"),
            Self::Creative => write!(f, "CREATIVE"),
            Self::General => write!(f, "GENERAL"),
        }
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|d| d.to_string() == wanted)
            .ok_or_else(|| format!("unknown domain: {}", s))
    }
}

/// Ordinal difficulty tier shared by tasks and profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    Expert,
}

impl ComplexityLevel {
    /// All levels, lowest first.
    pub fn all() -> &'static [ComplexityLevel] {
        &[Self::Low, Self::Medium, Self::High, Self::Expert]
    }

    /// Position on the ordinal scale (low = 0).
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Expert => 3,
        }
    }

    /// Ordinal distance between two levels.
    pub fn distance(self, other: ComplexityLevel) -> u8 {
        self.rank().abs_diff(other.rank())
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Expert => write!(f, "expert"),
        }
    }
}

/// Baseline quality figures advertised by a profile, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineMetrics {
    pub accuracy: f64,
    pub speed: f64,
    pub thoroughness: f64,
}

impl Default for BaselineMetrics {
    fn default() -> Self {
        Self {
            accuracy: 0.8,
            speed: 0.8,
            thoroughness: 0.8,
        }
    }
}

fn default_search_priority() -> String {
    "standard".to_string()
}

fn default_max_iterations() -> u32 {
    10
}

fn default_confidence_threshold() -> f64 {
    0.7
}

/// A registered worker profile. Read-only once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Unique, stable key.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    /// Tool names the worker is allowed to use.
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default = "default_search_priority")]
    pub search_priority: String,
    pub complexity: ComplexityLevel,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default)]
    pub domains: BTreeSet<Domain>,
    /// Ordered substring triggers for the keyword pass.
    #[serde(default)]
    pub routing_keywords: Vec<String>,
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    #[serde(default)]
    pub metrics: BaselineMetrics,
}

impl AgentProfile {
    /// Whether the profile lists `capability`.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// Whether the profile covers `domain`.
    pub fn covers_domain(&self, domain: Domain) -> bool {
        self.domains.contains(&domain)
    }

    /// Routing keywords found as substrings of an already lower-cased task.
    pub fn matched_keywords<'a>(
        &'a self,
        task_lower: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.routing_keywords
            .iter()
            .map(String::as_str)
            .filter(move |k| task_lower.contains(*k))
    }

    /// Whether any routing keyword is a substring of the lower-cased task.
    pub fn matches_any_keyword(&self, task_lower: &str) -> bool {
        self.routing_keywords
            .iter()
            .any(|k| task_lower.contains(k.as_str()))
    }

    /// Lower-case keywords and drop empty ones.
    ///
    /// An empty keyword is a substring of every task and would make the
    /// profile match unconditionally.
    pub(crate) fn normalize(&mut self) {
        self.routing_keywords = self
            .routing_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self.id = self.id.trim().to_string();
    }

    /// Reject profiles whose fields would break scoring.
    pub(crate) fn validate(&self) -> RoutingResult<()> {
        let invalid = |reason: &str| RoutingError::InvalidProfile {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.is_empty() {
            return Err(invalid("empty id"));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(invalid("confidence threshold must be within [0, 1]"));
        }
        if self.max_iterations == 0 {
            return Err(invalid("max iterations must be positive"));
        }
        let m = &self.metrics;
        if [m.accuracy, m.speed, m.thoroughness]
            .iter()
            .any(|v| !(0.0..=1.0).contains(v))
        {
            return Err(invalid("baseline metrics must be within [0, 1]"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AgentProfile {
        AgentProfile {
            id: "sample".into(),
            name: "Sample".into(),
            description: String::new(),
            capabilities: ["data_analysis".to_string()].into_iter().collect(),
            tools: vec![],
            search_priority: default_search_priority(),
            complexity: ComplexityLevel::Medium,
            max_iterations: 5,
            domains: [Domain::Data].into_iter().collect(),
            routing_keywords: vec!["  Analyze ".into(), "".into(), "trend".into()],
            confidence_threshold: 0.6,
            metrics: BaselineMetrics::default(),
        }
    }

    #[test]
    fn test_complexity_distance() {
        assert_eq!(ComplexityLevel::Low.distance(ComplexityLevel::Expert), 3);
        assert_eq!(ComplexityLevel::High.distance(ComplexityLevel::Medium), 1);
        assert_eq!(ComplexityLevel::High.distance(ComplexityLevel::High), 0);
    }

    #[test]
    fn test_normalize_lowercases_and_drops_empty() {
        let mut p = sample();
        p.normalize();
        assert_eq!(p.routing_keywords, vec!["analyze", "trend"]);
    }

    #[test]
    fn test_keyword_matching() {
        let mut p = sample();
        p.normalize();
        assert!(p.matches_any_keyword("please analyze this"));
        assert!(!p.matches_any_keyword("write a poem"));
        let hits: Vec<&str> = p.matched_keywords("analyze the trends").collect();
        assert_eq!(hits, vec!["analyze", "trend"]);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut p = sample();
        p.confidence_threshold = 1.5;
        assert!(matches!(
            p.validate(),
            Err(RoutingError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let mut p = sample();
        p.max_iterations = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_domain_serde_uppercase() {
        let json = serde_json::to_string(&Domain::Data).unwrap();
        assert_eq!(json, "\"DATA\"");
        let parsed: Domain = serde_json::from_str("\"AI\"").unwrap();
        assert_eq!(parsed, Domain::Ai);
        assert_eq!(Domain::Creative.to_string(), "CREATIVE");
    }

    #[test]
    fn test_domain_from_str() {
        assert_eq!("data".parse::<Domain>(), Ok(Domain::Data));
        assert_eq!(" Ai ".parse::<Domain>(), Ok(Domain::Ai));
        assert!("cooking".parse::<Domain>().is_err());
    }
}
