// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Execution collaborator interface
//!
//! The builder never talks to a database directly. It hands rendered
//! statement text to a `Connection`, either streaming rows back or
//! executing fire-and-forget.

pub mod recording;

use std::sync::Arc;

use crate::config::ConnectionSettings;
use crate::error::Result;
use crate::value::Row;

pub use recording::RecordingConnection;

/// Lazy, single-pass stream of result rows
pub type RowStream<'a> = Box<dyn Iterator<Item = Result<Row>> + 'a>;

/// Runs rendered statement text against a backend
pub trait Connection: Send + Sync {
    /// Execute a statement and stream its result rows
    fn execute_and_fetch(&self, query: &str) -> Result<RowStream<'_>>;

    /// Execute a statement without fetching results
    fn execute(&self, query: &str) -> Result<()>;
}

/// Creates connections from settings
///
/// Used when the caller asks for a default-configured connection instead of
/// supplying one.
pub trait ConnectionProvider {
    fn connect(&self, settings: &ConnectionSettings) -> Result<Arc<dyn Connection>>;
}

/// Outcome of executing a statement
pub enum Execution<'a> {
    /// The statement returns rows; pull them from the stream
    Rows(RowStream<'a>),
    /// The statement was executed without fetching results
    Completed,
}

impl<'a> Execution<'a> {
    pub fn is_rows(&self) -> bool {
        matches!(self, Execution::Rows(_))
    }

    /// The row stream, if the statement fetched results
    pub fn into_rows(self) -> Option<RowStream<'a>> {
        match self {
            Execution::Rows(rows) => Some(rows),
            Execution::Completed => None,
        }
    }
}

impl std::fmt::Debug for Execution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Execution::Rows(_) => f.write_str("Execution::Rows(..)"),
            Execution::Completed => f.write_str("Execution::Completed"),
        }
    }
}
