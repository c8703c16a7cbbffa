//! Structured error types for the routing engine.
//!
//! Construction paths (catalog loading, router setup) surface these to the
//! caller. The routing facade itself never returns them: `select_agent`
//! converts any of them into a default-profile fallback.

use std::path::PathBuf;

/// Errors from catalog construction, history access and scoring.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// A profile id was registered twice.
    #[error("Duplicate profile id: {0}")]
    DuplicateProfile(String),

    /// The configured default profile is not in the catalog.
    #[error("Default profile '{0}' is not registered in the catalog")]
    UnknownDefaultProfile(String),

    /// A profile failed validation at registration time.
    #[error("Invalid profile '{id}': {reason}")]
    InvalidProfile { id: String, reason: String },

    /// A history lock was poisoned by a panicking writer.
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    /// Scoring produced NaN or infinity.
    #[error("Non-finite score for profile '{0}'")]
    NonFiniteScore(String),

    /// Failed to read a catalog file from disk.
    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a TOML catalog.
    #[error("Failed to parse catalog TOML: {0}")]
    CatalogParse(#[from] toml::de::Error),
}

/// Result type alias for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;
