// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Cypher statement builder
//!
//! A fluent builder that assembles a Cypher statement from an ordered
//! sequence of typed clause segments, catches malformed graph patterns before
//! anything is sent, and hands the finished text to a connection.
//!
//! # Quick Start
//!
//! ```ignore
//! use cypher_builder::{presets, props, RecordingConnection};
//! use std::sync::Arc;
//!
//! let connection = Arc::new(RecordingConnection::new());
//! let mut query = presets::match_(connection, false);
//! query
//!     .node("Person", Some("n"), props! {})?
//!     .where_("n.age", ">", 30)?
//!     .return_([("n.name", "")]);
//!
//! assert_eq!(query.render().trim(), "MATCH (n:Person) WHERE n.age > 30 RETURN n.name");
//! ```
//!
//! # Module Organization
//!
//! - [`clause`] - Clause segments, rendering and pattern linking rules
//! - [`builder`] - The statement assembler and execution entry points
//! - [`presets`] - Builders pre-seeded with a starting clause
//! - [`connection`] - Execution collaborator interface
//! - [`literal`] - Value, label and property serialization
//! - [`model`] - Domain nodes and relationships
//! - [`config`] - Connection settings
//! - [`error`] - Error types

pub mod builder;
pub mod clause;
pub mod config;
pub mod connection;
pub mod error;
pub mod literal;
pub mod model;
pub mod presets;
pub mod value;

pub use builder::QueryBuilder;
pub use clause::{Clause, ClauseKind, Projection, WhereConnector};
pub use config::ConnectionSettings;
pub use connection::{Connection, ConnectionProvider, Execution, RecordingConnection, RowStream};
pub use error::{Error, Result};
pub use literal::Labels;
pub use model::{Node, NodeModel, Relationship, RelationshipModel};
pub use value::{Properties, Row, Value};
