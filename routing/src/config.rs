//! Router configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `ROUTER_DEFAULT_PROFILE` | `general_assistant` | Profile returned when nothing matches |
//! | `ROUTER_HISTORY_CAPACITY` | `50` | Outcome records kept per profile |
//! | `ROUTER_SCORE_WINDOW` | `10` | Newest records averaged into the live score |
//!
//! Unparsable or zero numeric values are ignored and the default kept.

use serde::{Deserialize, Serialize};

use crate::catalog::GENERAL_ASSISTANT_ID;
use crate::performance::{DEFAULT_HISTORY_CAPACITY, DEFAULT_SCORE_WINDOW};

/// Tunables for [`crate::AgentRouter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Profile returned when no candidate qualifies or routing fails.
    pub default_profile_id: String,
    pub history_capacity: usize,
    pub score_window: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_profile_id: GENERAL_ASSISTANT_ID.to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            score_window: DEFAULT_SCORE_WINDOW,
        }
    }
}

impl RouterConfig {
    /// Defaults overridden by `ROUTER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(id) = lookup("ROUTER_DEFAULT_PROFILE") {
            let id = id.trim();
            if !id.is_empty() {
                config.default_profile_id = id.to_string();
            }
        }
        if let Some(n) = lookup("ROUTER_HISTORY_CAPACITY").and_then(|v| parse_positive(&v)) {
            config.history_capacity = n;
        }
        if let Some(n) = lookup("ROUTER_SCORE_WINDOW").and_then(|v| parse_positive(&v)) {
            config.score_window = n;
        }

        config
    }

    pub fn with_default_profile(mut self, id: impl Into<String>) -> Self {
        self.default_profile_id = id.into();
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_score_window(mut self, window: usize) -> Self {
        self.score_window = window;
        self
    }
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.default_profile_id, "general_assistant");
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.score_window, 10);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = RouterConfig::from_lookup(lookup_from(&[
            ("ROUTER_DEFAULT_PROFILE", " research_specialist "),
            ("ROUTER_HISTORY_CAPACITY", "20"),
            ("ROUTER_SCORE_WINDOW", "5"),
        ]));
        assert_eq!(config.default_profile_id, "research_specialist");
        assert_eq!(config.history_capacity, 20);
        assert_eq!(config.score_window, 5);
    }

    #[test]
    fn test_bad_values_ignored() {
        let config = RouterConfig::from_lookup(lookup_from(&[
            ("ROUTER_DEFAULT_PROFILE", "   "),
            ("ROUTER_HISTORY_CAPACITY", "lots"),
            ("ROUTER_SCORE_WINDOW", "0"),
        ]));
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn test_builders() {
        let config = RouterConfig::default()
            .with_default_profile("x")
            .with_history_capacity(3)
            .with_score_window(2);
        assert_eq!(config.default_profile_id, "x");
        assert_eq!(config.history_capacity, 3);
        assert_eq!(config.score_window, 2);
    }
}
