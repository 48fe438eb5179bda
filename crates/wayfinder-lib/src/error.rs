use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the wayfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Lookups that may legitimately find nothing (missing links, missing
/// coordinates, empty search results) return `Option` or empty collections
/// instead of one of these variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location name could not be found in the map.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two locations.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a random destination is requested from a map without locations.
    #[error("map contains no locations")]
    EmptyMap,

    /// Raised when the finder radius bounds are unusable.
    #[error("invalid search radius bounds: min {min} km, max {max} km")]
    InvalidRadius { min: f64, max: f64 },

    /// Raised when a finder configuration value is out of range.
    #[error("invalid finder configuration: {message}")]
    InvalidConfig { message: String },

    /// Raised when a query is started with a blank pattern.
    #[error("search pattern must not be empty")]
    EmptyPattern,

    /// Raised when a way filter cannot be constructed.
    #[error("invalid way filter: {message}")]
    InvalidFilter { message: String },

    /// Raised when `find_more` is called before any query was started.
    #[error("no active query; start one with a find_* call first")]
    NoActiveQuery,

    /// Raised when a map or entity file has unusable content.
    #[error("failed to load map data from {}: {message}", .path.display())]
    MapLoad { path: PathBuf, message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for configuration")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
