// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the Cypher statement builder

use thiserror::Error;

use crate::clause::ClauseKind;

/// Result type alias for builder and collaborator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for statement construction and execution
#[derive(Error, Debug)]
pub enum Error {
    /// A node or edge would be appended directly after a clause of the same kind
    #[error("Invalid match query when linking! Cannot append {attempted} after {previous}")]
    InvalidChain {
        previous: ClauseKind,
        attempted: ClauseKind,
    },

    /// No node or edge in the statement binds a variable
    #[error("No variables have been matched in the query")]
    NoVariablesMatched,

    /// A value could not be converted into a Cypher literal
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Connection errors raised by the execution collaborator
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors raised by the execution collaborator
    #[error("Execution error: {0}")]
    Execution(String),

    /// Invalid connection settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON conversion errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
