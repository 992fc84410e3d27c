// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Clause segments
//!
//! A statement is an ordered sequence of `Clause` values. Each variant renders
//! its own keyword text together with the surrounding whitespace its grammar
//! needs; the assembler concatenates them and collapses whitespace runs.
//!
//! Features supported:
//! - Reading clauses: MATCH, OPTIONAL MATCH, CALL, LOAD CSV, UNWIND
//! - Updating clauses: CREATE, MERGE, DELETE, REMOVE
//! - Pattern elements: nodes and edges
//! - Projections: WITH, RETURN, YIELD, UNION, ORDER BY, LIMIT, SKIP
//! - WHERE / AND / OR / XOR conditions and raw fragments

pub mod linking;
pub mod pattern;
pub mod projection;

use std::fmt;

pub use linking::is_linking_valid;
pub use pattern::{EdgePattern, NodePattern};
pub use projection::Projection;

/// Discriminant of a clause segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Match,
    Merge,
    Create,
    Call,
    LoadCsv,
    Node,
    Edge,
    Unwind,
    With,
    Return,
    Yield,
    Union,
    Delete,
    Remove,
    OrderBy,
    Limit,
    Skip,
    Where,
    Raw,
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClauseKind::Match => "MATCH",
            ClauseKind::Merge => "MERGE",
            ClauseKind::Create => "CREATE",
            ClauseKind::Call => "CALL",
            ClauseKind::LoadCsv => "LOAD_CSV",
            ClauseKind::Node => "NODE",
            ClauseKind::Edge => "EDGE",
            ClauseKind::Unwind => "UNWIND",
            ClauseKind::With => "WITH",
            ClauseKind::Return => "RETURN",
            ClauseKind::Yield => "YIELD",
            ClauseKind::Union => "UNION",
            ClauseKind::Delete => "DELETE",
            ClauseKind::Remove => "REMOVE",
            ClauseKind::OrderBy => "ORDER_BY",
            ClauseKind::Limit => "LIMIT",
            ClauseKind::Skip => "SKIP",
            ClauseKind::Where => "WHERE",
            ClauseKind::Raw => "RAW",
        };
        write!(f, "{}", name)
    }
}

/// Keyword joining a condition to the statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhereConnector {
    Where,
    And,
    Or,
    Xor,
}

impl WhereConnector {
    pub fn keyword(self) -> &'static str {
        match self {
            WhereConnector::Where => "WHERE",
            WhereConnector::And => "AND",
            WhereConnector::Or => "OR",
            WhereConnector::Xor => "XOR",
        }
    }
}

/// One unit of statement text
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Match {
        optional: bool,
    },
    Merge,
    Create,
    Call {
        procedure: String,
        arguments: Option<String>,
    },
    LoadCsv {
        path: String,
        header: bool,
        row: String,
    },
    Node(NodePattern),
    Edge(EdgePattern),
    Unwind {
        list_expression: String,
        variable: String,
    },
    With(Projection),
    Return(Projection),
    Yield(Projection),
    Union {
        include_duplicates: bool,
    },
    Delete {
        variable_expressions: Vec<String>,
        detach: bool,
    },
    Remove {
        items: Vec<String>,
    },
    OrderBy(String),
    Limit(String),
    Skip(String),
    Where {
        connector: WhereConnector,
        predicate: String,
    },
    /// Statement text passed through unmodified
    Raw(String),
}

impl Clause {
    pub fn kind(&self) -> ClauseKind {
        match self {
            Clause::Match { .. } => ClauseKind::Match,
            Clause::Merge => ClauseKind::Merge,
            Clause::Create => ClauseKind::Create,
            Clause::Call { .. } => ClauseKind::Call,
            Clause::LoadCsv { .. } => ClauseKind::LoadCsv,
            Clause::Node(_) => ClauseKind::Node,
            Clause::Edge(_) => ClauseKind::Edge,
            Clause::Unwind { .. } => ClauseKind::Unwind,
            Clause::With(_) => ClauseKind::With,
            Clause::Return(_) => ClauseKind::Return,
            Clause::Yield(_) => ClauseKind::Yield,
            Clause::Union { .. } => ClauseKind::Union,
            Clause::Delete { .. } => ClauseKind::Delete,
            Clause::Remove { .. } => ClauseKind::Remove,
            Clause::OrderBy(_) => ClauseKind::OrderBy,
            Clause::Limit(_) => ClauseKind::Limit,
            Clause::Skip(_) => ClauseKind::Skip,
            Clause::Where { .. } => ClauseKind::Where,
            Clause::Raw(_) => ClauseKind::Raw,
        }
    }

    /// Variable bound by a node or edge clause, if any
    pub fn variable(&self) -> Option<&str> {
        let variable = match self {
            Clause::Node(node) => node.variable.as_deref(),
            Clause::Edge(edge) => edge.variable.as_deref(),
            _ => None,
        };
        variable.filter(|v| !v.is_empty())
    }

    /// Render this clause's text contribution
    pub fn render(&self) -> String {
        match self {
            Clause::Match { optional: true } => " OPTIONAL MATCH ".to_string(),
            Clause::Match { optional: false } => " MATCH ".to_string(),
            Clause::Merge => " MERGE ".to_string(),
            Clause::Create => " CREATE ".to_string(),
            Clause::Call {
                procedure,
                arguments,
            } => format!(
                " CALL {}({}) ",
                procedure,
                arguments.as_deref().unwrap_or("")
            ),
            Clause::LoadCsv { path, header, row } => format!(
                " LOAD CSV FROM '{}' {} HEADER AS {} ",
                path,
                if *header { "WITH" } else { "NO" },
                row
            ),
            Clause::Node(node) => node.render(),
            Clause::Edge(edge) => edge.render(),
            Clause::Unwind {
                list_expression,
                variable,
            } => format!(" UNWIND {} AS {} ", list_expression, variable),
            Clause::With(projection) => projection.render("WITH"),
            Clause::Return(projection) => projection.render("RETURN"),
            Clause::Yield(projection) => projection.render("YIELD"),
            Clause::Union {
                include_duplicates: true,
            } => " UNION ALL ".to_string(),
            Clause::Union {
                include_duplicates: false,
            } => " UNION ".to_string(),
            Clause::Delete {
                variable_expressions,
                detach,
            } => format!(
                " {} DELETE {} ",
                if *detach { "DETACH" } else { "" },
                variable_expressions.join(", ")
            ),
            Clause::Remove { items } => format!(" REMOVE {} ", items.join(", ")),
            Clause::OrderBy(properties) => format!(" ORDER BY {} ", properties),
            Clause::Limit(expression) => format!(" LIMIT {} ", expression),
            Clause::Skip(expression) => format!(" SKIP {} ", expression),
            Clause::Where {
                connector,
                predicate,
            } => format!(" {} {} ", connector.keyword(), predicate),
            Clause::Raw(text) => text.clone(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_clauses() {
        assert_eq!(Clause::Match { optional: false }.render(), " MATCH ");
        assert_eq!(Clause::Match { optional: true }.render(), " OPTIONAL MATCH ");
        assert_eq!(Clause::Merge.render(), " MERGE ");
        assert_eq!(Clause::Create.render(), " CREATE ");
        assert_eq!(
            Clause::Union {
                include_duplicates: false
            }
            .render(),
            " UNION "
        );
        assert_eq!(
            Clause::Union {
                include_duplicates: true
            }
            .render(),
            " UNION ALL "
        );
    }

    #[test]
    fn test_call_with_and_without_arguments() {
        let bare = Clause::Call {
            procedure: "pagerank.get".to_string(),
            arguments: None,
        };
        assert_eq!(bare.render(), " CALL pagerank.get() ");

        let with_args = Clause::Call {
            procedure: "json_util.load_from_url".to_string(),
            arguments: Some("'https://example.com/data.json'".to_string()),
        };
        assert_eq!(
            with_args.render(),
            " CALL json_util.load_from_url('https://example.com/data.json') "
        );
    }

    #[test]
    fn test_load_csv_header_keyword() {
        let with_header = Clause::LoadCsv {
            path: "/data/people.csv".to_string(),
            header: true,
            row: "row".to_string(),
        };
        assert_eq!(
            with_header.render(),
            " LOAD CSV FROM '/data/people.csv' WITH HEADER AS row "
        );

        let no_header = Clause::LoadCsv {
            path: "/data/people.csv".to_string(),
            header: false,
            row: "line".to_string(),
        };
        assert_eq!(
            no_header.render(),
            " LOAD CSV FROM '/data/people.csv' NO HEADER AS line "
        );
    }

    #[test]
    fn test_delete_detach_token() {
        let plain = Clause::Delete {
            variable_expressions: vec!["n".to_string(), "m".to_string()],
            detach: false,
        };
        assert!(!plain.render().contains("DETACH"));
        assert_eq!(plain.render(), "  DELETE n, m ");

        let detach = Clause::Delete {
            variable_expressions: vec!["n".to_string()],
            detach: true,
        };
        assert_eq!(detach.render(), " DETACH DELETE n ");
    }

    #[test]
    fn test_simple_wrapped_clauses() {
        assert_eq!(
            Clause::Remove {
                items: vec!["n.name".to_string(), "n:Person".to_string()]
            }
            .render(),
            " REMOVE n.name, n:Person "
        );
        assert_eq!(Clause::OrderBy("n.age DESC".to_string()).render(), " ORDER BY n.age DESC ");
        assert_eq!(Clause::Limit("10".to_string()).render(), " LIMIT 10 ");
        assert_eq!(Clause::Skip("5".to_string()).render(), " SKIP 5 ");
        assert_eq!(
            Clause::Unwind {
                list_expression: "[1, 2, 3]".to_string(),
                variable: "x".to_string()
            }
            .render(),
            " UNWIND [1, 2, 3] AS x "
        );
    }

    #[test]
    fn test_where_connectors() {
        let cases = [
            (WhereConnector::Where, " WHERE n.age > 3 "),
            (WhereConnector::And, " AND n.age > 3 "),
            (WhereConnector::Or, " OR n.age > 3 "),
            (WhereConnector::Xor, " XOR n.age > 3 "),
        ];
        for (connector, expected) in cases {
            let clause = Clause::Where {
                connector,
                predicate: "n.age > 3".to_string(),
            };
            assert_eq!(clause.render(), expected);
            assert_eq!(clause.kind(), ClauseKind::Where);
        }
    }

    #[test]
    fn test_raw_passthrough_and_display() {
        let clause = Clause::Raw("  MATCH (n)  ".to_string());
        assert_eq!(clause.render(), "  MATCH (n)  ");
        assert_eq!(clause.to_string(), clause.render());
    }

    #[test]
    fn test_variable_ignores_empty_names() {
        let named = Clause::Node(NodePattern::new(Some("n".to_string()), String::new(), String::new()));
        let unnamed = Clause::Node(NodePattern::new(Some(String::new()), String::new(), String::new()));
        assert_eq!(named.variable(), Some("n"));
        assert_eq!(unnamed.variable(), None);
        assert_eq!(Clause::Create.variable(), None);
    }
}
