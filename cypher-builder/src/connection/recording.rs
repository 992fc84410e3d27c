// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory connection that records statements and replays queued responses
//!
//! Useful for dry runs and for testing code that builds statements without a
//! running database.

use parking_lot::Mutex;
use std::collections::VecDeque;

use super::{Connection, RowStream};
use crate::error::{Error, Result};
use crate::value::Row;

/// How a statement was handed to the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Fetch,
    Execute,
}

/// A statement received by the connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStatement {
    pub query: String,
    pub mode: ExecutionMode,
}

#[derive(Debug)]
enum Response {
    Rows(Vec<Row>),
    Failure(String),
}

#[derive(Debug, Default)]
struct State {
    statements: Vec<RecordedStatement>,
    responses: VecDeque<Response>,
    rows_pulled: usize,
}

/// Connection double backed by memory
///
/// Each call consumes the next queued response; with nothing queued, fetches
/// yield no rows and executes succeed.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    state: Mutex<State>,
}

impl RecordingConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows returned by the next call
    pub fn push_rows(&self, rows: Vec<Row>) {
        self.state.lock().responses.push_back(Response::Rows(rows));
    }

    /// Queue an execution failure for the next call
    pub fn push_failure(&self, message: impl Into<String>) {
        self.state
            .lock()
            .responses
            .push_back(Response::Failure(message.into()));
    }

    /// All statements received so far, oldest first
    pub fn statements(&self) -> Vec<RecordedStatement> {
        self.state.lock().statements.clone()
    }

    pub fn last_statement(&self) -> Option<RecordedStatement> {
        self.state.lock().statements.last().cloned()
    }

    /// Number of rows consumers have pulled from fetch streams
    pub fn rows_pulled(&self) -> usize {
        self.state.lock().rows_pulled
    }

    fn record(&self, query: &str, mode: ExecutionMode) -> Option<Response> {
        let mut state = self.state.lock();
        state.statements.push(RecordedStatement {
            query: query.to_string(),
            mode,
        });
        state.responses.pop_front()
    }
}

impl Connection for RecordingConnection {
    fn execute_and_fetch(&self, query: &str) -> Result<RowStream<'_>> {
        log::trace!("Recording fetch: {}", query);

        match self.record(query, ExecutionMode::Fetch) {
            Some(Response::Failure(message)) => Err(Error::Execution(message)),
            Some(Response::Rows(rows)) => Ok(Box::new(rows.into_iter().map(move |row| {
                self.state.lock().rows_pulled += 1;
                Ok(row)
            }))),
            None => Ok(Box::new(std::iter::empty())),
        }
    }

    fn execute(&self, query: &str) -> Result<()> {
        log::trace!("Recording execute: {}", query);

        match self.record(query, ExecutionMode::Execute) {
            Some(Response::Failure(message)) => Err(Error::Execution(message)),
            _ => Ok(()),
        }
    }
}
