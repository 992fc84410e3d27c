// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Projection lists for WITH, RETURN and YIELD

use indexmap::IndexMap;

/// Ordered mapping of expression -> alias
///
/// An empty alias, or one equal to its expression, renders without `AS`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    results: IndexMap<String, String>,
}

impl Projection {
    /// `*` projection
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.results.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `expr AS alias, ...` in insertion order
    pub fn alias_statement(&self) -> String {
        self.results
            .iter()
            .map(|(expression, alias)| {
                if alias.is_empty() || alias == expression {
                    expression.clone()
                } else {
                    format!("{} AS {}", expression, alias)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn render(&self, keyword: &str) -> String {
        if self.results.is_empty() {
            format!(" {} * ", keyword)
        } else {
            format!(" {} {} ", keyword, self.alias_statement())
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Projection
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            results: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Projection
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for Projection
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<IndexMap<String, String>> for Projection {
    fn from(results: IndexMap<String, String>) -> Self {
        Self { results }
    }
}
