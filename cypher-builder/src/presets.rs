// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Builders pre-seeded with a starting clause
//!
//! ```ignore
//! let mut query = presets::create(connection);
//! query.node("X", Some("a"), props! {})?.to("REL", true, None, props! {})?;
//! ```

use std::sync::Arc;

use crate::builder::QueryBuilder;
use crate::clause::{Clause, Projection};
use crate::connection::Connection;

fn seeded(connection: Arc<dyn Connection>, clause: Clause) -> QueryBuilder {
    let mut builder = QueryBuilder::new(connection);
    builder.push(clause);
    builder
}

/// Builder starting with `MATCH` (or `OPTIONAL MATCH`)
pub fn match_(connection: Arc<dyn Connection>, optional: bool) -> QueryBuilder {
    seeded(connection, Clause::Match { optional })
}

/// Builder starting with `MERGE`
pub fn merge(connection: Arc<dyn Connection>) -> QueryBuilder {
    seeded(connection, Clause::Merge)
}

/// Builder starting with `CREATE`
pub fn create(connection: Arc<dyn Connection>) -> QueryBuilder {
    seeded(connection, Clause::Create)
}

/// Builder starting with `CALL procedure(arguments)`
pub fn call(
    connection: Arc<dyn Connection>,
    procedure: impl Into<String>,
    arguments: Option<&str>,
) -> QueryBuilder {
    seeded(
        connection,
        Clause::Call {
            procedure: procedure.into(),
            arguments: arguments.map(str::to_string),
        },
    )
}

/// Builder starting with `UNWIND list_expression AS variable`
pub fn unwind(
    connection: Arc<dyn Connection>,
    list_expression: impl Into<String>,
    variable: impl Into<String>,
) -> QueryBuilder {
    seeded(
        connection,
        Clause::Unwind {
            list_expression: list_expression.into(),
            variable: variable.into(),
        },
    )
}

/// Builder starting with `WITH`
pub fn with(connection: Arc<dyn Connection>, results: impl Into<Projection>) -> QueryBuilder {
    seeded(connection, Clause::With(results.into()))
}
