// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement assembler
//!
//! `QueryBuilder` accumulates clause segments through chained calls, renders
//! them into one normalized statement and hands it to its connection.
//!
//! ```ignore
//! let mut query = QueryBuilder::new(connection);
//! query
//!     .match_()
//!     .node("Person", Some("n"), props! {})?
//!     .where_("n.age", ">", 30)?
//!     .return_([("n.name", "")]);
//! let rows = query.execute()?;
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::clause::{
    is_linking_valid, Clause, ClauseKind, EdgePattern, NodePattern, Projection, WhereConnector,
};
use crate::config::ConnectionSettings;
use crate::connection::{Connection, ConnectionProvider, Execution};
use crate::error::{Error, Result};
use crate::literal::{labels_to_text, properties_to_text, value_to_text, Labels};
use crate::model::{NodeModel, RelationshipModel};
use crate::value::{Properties, Value};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s\s+").expect("whitespace pattern is valid"));

/// Marker that makes a raw fragment fetch results
const RETURN_MARKER: &str = " RETURN ";

/// Fluent builder for one Cypher statement
pub struct QueryBuilder {
    clauses: Vec<Clause>,
    connection: Arc<dyn Connection>,
    fetch_results: bool,
}

impl QueryBuilder {
    /// Create an empty builder bound to `connection`
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            clauses: Vec::new(),
            connection,
            fetch_results: false,
        }
    }

    /// Create an empty builder on a connection configured from the environment
    pub fn with_default_connection(provider: &dyn ConnectionProvider) -> Result<Self> {
        let settings = ConnectionSettings::from_env()?;
        Self::with_settings(provider, &settings)
    }

    /// Create an empty builder on a connection opened with `settings`
    pub fn with_settings(
        provider: &dyn ConnectionProvider,
        settings: &ConnectionSettings,
    ) -> Result<Self> {
        let connection = provider.connect(settings)?;
        Ok(Self::new(connection))
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// Clauses appended so far, in order
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether execution streams rows back
    pub fn fetches_results(&self) -> bool {
        self.fetch_results
    }

    pub(crate) fn push(&mut self, clause: Clause) -> &mut Self {
        log::trace!("Appending {} clause: {:?}", clause.kind(), clause.render());
        if clause.kind() == ClauseKind::Return {
            self.fetch_results = true;
        }
        self.clauses.push(clause);
        self
    }

    fn check_linking(&self, kind: ClauseKind) -> Result<()> {
        if is_linking_valid(&self.clauses, kind) {
            return Ok(());
        }
        // is_linking_valid only fails on a non-empty history
        let previous = self.clauses.last().map(Clause::kind).unwrap_or(kind);
        log::warn!("Rejected {} directly after {}", kind, previous);
        Err(Error::InvalidChain {
            previous,
            attempted: kind,
        })
    }

    // ==============================================================================
    // Reading and updating clauses
    // ==============================================================================

    /// `MATCH`
    pub fn match_(&mut self) -> &mut Self {
        self.push(Clause::Match { optional: false })
    }

    /// `OPTIONAL MATCH`
    pub fn optional_match(&mut self) -> &mut Self {
        self.push(Clause::Match { optional: true })
    }

    pub fn merge(&mut self) -> &mut Self {
        self.push(Clause::Merge)
    }

    pub fn create(&mut self) -> &mut Self {
        self.push(Clause::Create)
    }

    /// `CALL procedure(arguments)`; `arguments` is inserted verbatim
    pub fn call(&mut self, procedure: impl Into<String>, arguments: Option<&str>) -> &mut Self {
        self.push(Clause::Call {
            procedure: procedure.into(),
            arguments: arguments.map(str::to_string),
        })
    }

    /// `LOAD CSV FROM 'path' WITH|NO HEADER AS row`
    pub fn load_csv(&mut self, path: impl Into<String>, header: bool, row: impl Into<String>) -> &mut Self {
        self.push(Clause::LoadCsv {
            path: path.into(),
            header,
            row: row.into(),
        })
    }

    /// `UNWIND list_expression AS variable`
    pub fn unwind(&mut self, list_expression: impl Into<String>, variable: impl Into<String>) -> &mut Self {
        self.push(Clause::Unwind {
            list_expression: list_expression.into(),
            variable: variable.into(),
        })
    }

    /// `DELETE` (or `DETACH DELETE`) of the given expressions
    pub fn delete<I, S>(&mut self, variable_expressions: I, detach: bool) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Clause::Delete {
            variable_expressions: variable_expressions.into_iter().map(Into::into).collect(),
            detach,
        })
    }

    /// `REMOVE` of labels or properties
    pub fn remove<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Clause::Remove {
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    // ==============================================================================
    // Pattern elements
    // ==============================================================================

    /// Node pattern from labels and properties
    ///
    /// Fails with `InvalidChain` if the previous clause is also a node.
    pub fn node(
        &mut self,
        labels: impl Into<Labels>,
        variable: Option<&str>,
        properties: Properties,
    ) -> Result<&mut Self> {
        self.check_linking(ClauseKind::Node)?;
        let labels = labels_to_text(&labels.into());
        let properties = properties_to_text(&properties)?;
        Ok(self.push(Clause::Node(NodePattern::new(
            variable.map(str::to_string),
            labels,
            properties,
        ))))
    }

    /// Node pattern seeded from a stored node's labels and properties
    pub fn node_from(&mut self, node: &impl NodeModel, variable: Option<&str>) -> Result<&mut Self> {
        self.node(node.labels(), variable, node.properties())
    }

    /// Outgoing (or undirected) edge `-[...]->`
    pub fn to(
        &mut self,
        edge_label: impl Into<Labels>,
        directed: bool,
        variable: Option<&str>,
        properties: Properties,
    ) -> Result<&mut Self> {
        self.edge(edge_label.into(), directed, false, variable, &properties)
    }

    /// Outgoing edge seeded from a stored relationship
    pub fn to_relationship(
        &mut self,
        relationship: &impl RelationshipModel,
        directed: bool,
        variable: Option<&str>,
    ) -> Result<&mut Self> {
        self.edge(
            relationship.relationship_type(),
            directed,
            false,
            variable,
            &relationship.properties(),
        )
    }

    /// Incoming (or undirected) edge `<-[...]-`
    pub fn from(
        &mut self,
        edge_label: impl Into<Labels>,
        directed: bool,
        variable: Option<&str>,
        properties: Properties,
    ) -> Result<&mut Self> {
        self.edge(edge_label.into(), directed, true, variable, &properties)
    }

    /// Incoming edge seeded from a stored relationship
    pub fn from_relationship(
        &mut self,
        relationship: &impl RelationshipModel,
        directed: bool,
        variable: Option<&str>,
    ) -> Result<&mut Self> {
        self.edge(
            relationship.relationship_type(),
            directed,
            true,
            variable,
            &relationship.properties(),
        )
    }

    fn edge(
        &mut self,
        edge_type: Labels,
        directed: bool,
        points_from: bool,
        variable: Option<&str>,
        properties: &Properties,
    ) -> Result<&mut Self> {
        self.check_linking(ClauseKind::Edge)?;
        let labels = labels_to_text(&edge_type);
        let properties = properties_to_text(properties)?;
        Ok(self.push(Clause::Edge(EdgePattern {
            variable: variable.map(str::to_string),
            labels: Some(labels),
            properties: Some(properties),
            directed,
            points_from,
        })))
    }

    // ==============================================================================
    // Conditions
    // ==============================================================================

    /// `WHERE item operator value`
    pub fn where_(&mut self, item: &str, operator: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.comparison(WhereConnector::Where, item, operator, value.into())
    }

    /// `AND item operator value`
    pub fn and_where(&mut self, item: &str, operator: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.comparison(WhereConnector::And, item, operator, value.into())
    }

    /// `OR item operator value`
    pub fn or_where(&mut self, item: &str, operator: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.comparison(WhereConnector::Or, item, operator, value.into())
    }

    /// `XOR item operator value`
    pub fn xor_where(&mut self, item: &str, operator: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.comparison(WhereConnector::Xor, item, operator, value.into())
    }

    /// `WHERE predicate` with the predicate inserted verbatim
    pub fn where_raw(&mut self, predicate: impl Into<String>) -> &mut Self {
        self.condition(WhereConnector::Where, predicate)
    }

    /// Condition with any connector and a verbatim predicate
    pub fn condition(&mut self, connector: WhereConnector, predicate: impl Into<String>) -> &mut Self {
        self.push(Clause::Where {
            connector,
            predicate: predicate.into(),
        })
    }

    fn comparison(
        &mut self,
        connector: WhereConnector,
        item: &str,
        operator: &str,
        value: Value,
    ) -> Result<&mut Self> {
        // Label checks such as `n:Person` take no spaces
        let separator = if operator == ":" { "" } else { " " };
        let value_text = value_to_text(&value)?;
        let predicate = [item, operator, value_text.as_str()].join(separator);
        Ok(self.condition(connector, predicate))
    }

    // ==============================================================================
    // Projections and modifiers
    // ==============================================================================

    /// `WITH`; an empty projection renders `WITH *`
    pub fn with(&mut self, results: impl Into<Projection>) -> &mut Self {
        self.push(Clause::With(results.into()))
    }

    /// `YIELD`; an empty projection renders `YIELD *`
    pub fn yield_(&mut self, results: impl Into<Projection>) -> &mut Self {
        self.push(Clause::Yield(results.into()))
    }

    /// `RETURN`; switches execution to fetching rows
    pub fn return_(&mut self, results: impl Into<Projection>) -> &mut Self {
        self.push(Clause::Return(results.into()))
    }

    /// `UNION` or `UNION ALL`
    pub fn union(&mut self, include_duplicates: bool) -> &mut Self {
        self.push(Clause::Union { include_duplicates })
    }

    pub fn order_by(&mut self, properties: impl Into<String>) -> &mut Self {
        self.push(Clause::OrderBy(properties.into()))
    }

    pub fn limit(&mut self, integer_expression: impl ToString) -> &mut Self {
        self.push(Clause::Limit(integer_expression.to_string()))
    }

    pub fn skip(&mut self, integer_expression: impl ToString) -> &mut Self {
        self.push(Clause::Skip(integer_expression.to_string()))
    }

    /// Append statement text verbatim
    ///
    /// Text containing ` RETURN ` switches execution to fetching rows.
    pub fn add_custom_cypher(&mut self, custom_cypher: impl Into<String>) -> &mut Self {
        let custom_cypher = custom_cypher.into();
        if custom_cypher.contains(RETURN_MARKER) {
            self.fetch_results = true;
        }
        self.push(Clause::Raw(custom_cypher))
    }

    // ==============================================================================
    // Rendering and execution
    // ==============================================================================

    /// Render all clauses into one statement, collapsing whitespace runs
    pub fn render(&self) -> String {
        let joined = self
            .clauses
            .iter()
            .fold(String::new(), |mut query, clause| {
                query.push_str(&clause.render());
                query
            });
        WHITESPACE_RUN.replace_all(&joined, " ").into_owned()
    }

    /// True if any node or edge binds a non-empty variable
    pub fn any_variables_matched(&self) -> bool {
        self.clauses.iter().any(|clause| clause.variable().is_some())
    }

    /// Fails with `NoVariablesMatched` unless a node or edge binds a variable
    ///
    /// Not applied by `render` or `execute`; callers opt in.
    pub fn ensure_variables_matched(&self) -> Result<()> {
        if self.any_variables_matched() {
            Ok(())
        } else {
            Err(Error::NoVariablesMatched)
        }
    }

    /// Run the statement
    ///
    /// Statements with a RETURN stream their rows back; everything else is
    /// executed without fetching.
    pub fn execute(&self) -> Result<Execution<'_>> {
        let query = self.render();
        if self.fetch_results {
            log::debug!("Executing and fetching: {}", query);
            Ok(Execution::Rows(self.connection.execute_and_fetch(&query)?))
        } else {
            log::debug!("Executing: {}", query);
            self.connection.execute(&query)?;
            Ok(Execution::Completed)
        }
    }

    /// Value of `field` in the first result row
    ///
    /// Returns `None` when the statement produced no rows or the first row has
    /// no such field. Remaining rows are never pulled.
    pub fn get_single(&self, field: &str) -> Result<Option<Value>> {
        let query = self.render();
        log::debug!("Fetching single '{}': {}", field, query);

        let mut rows = self.connection.execute_and_fetch(&query)?;
        match rows.next() {
            Some(row) => Ok(row?.remove(field)),
            None => Ok(None),
        }
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("clauses", &self.clauses)
            .field("fetch_results", &self.fetch_results)
            .finish_non_exhaustive()
    }
}
