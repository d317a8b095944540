//! Error types for grid commands and the import/export codec
//!
//! Validation failures are itemized: the caller shows the message verbatim
//! and the in-memory grid is left untouched. "Not found" is deliberately
//! absent, commands on unknown ids are no-ops.

use thiserror::Error;

/// Top-level error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Input is not well-formed JSON
    #[error("Invalid JSON: {0}")]
    Parse(String),

    /// Document is JSON but fails the schema checks
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// A command or setter was given a value outside its accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing the export document failed
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Which validation phase rejected the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPhase {
    /// One or more required top-level keys are absent
    MissingKeys,
    /// Keys are present but attributes have the wrong type or range
    InvalidFields,
}

impl ValidationPhase {
    fn label(self) -> &'static str {
        match self {
            ValidationPhase::MissingKeys => "Missing required keys",
            ValidationPhase::InvalidFields => "Invalid or missing attributes",
        }
    }
}

/// Every offending attribute path found in one validation run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .phase.label(), .paths.join(", "))]
pub struct ValidationErrors {
    pub phase: ValidationPhase,
    pub paths: Vec<String>,
}

impl ValidationErrors {
    pub fn missing_keys(paths: Vec<String>) -> Self {
        Self {
            phase: ValidationPhase::MissingKeys,
            paths,
        }
    }

    pub fn invalid_fields(paths: Vec<String>) -> Self {
        Self {
            phase: ValidationPhase::InvalidFields,
            paths,
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
