//! Unified error types for the engine.
//!
//! Every fallible operation in this crate returns [`Result`]. Uniqueness
//! violations on unlock records and goal history rows are deliberately not
//! represented here: the evaluators absorb them at the call site, since the
//! database constraint is what guarantees at-most-once semantics.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No profile row exists for the given user
    #[error("Profile not found for user '{user_id}'")]
    ProfileNotFound {
        /// The user whose profile is missing
        user_id: String,
    },

    /// The profile references a goal template that does not exist
    #[error("Goal template {template_id} not found")]
    GoalTemplateNotFound {
        /// Primary key of the missing template
        template_id: i64,
    },

    /// Catalog row carries a goal category the engine does not know
    #[error("Unknown goal category '{category}'")]
    UnknownGoalCategory {
        /// The unrecognized category string
        category: String,
    },

    /// A tracker counter was negative or otherwise out of range
    #[error("Invalid value {value} for {field}")]
    InvalidCount {
        /// Which counter was rejected
        field: &'static str,
        /// The rejected value
        value: i32,
    },

    /// I/O error (config file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
