// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Node and edge pattern elements

/// A node pattern element, `(var:Labels {props})`
///
/// Labels and properties are stored pre-rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodePattern {
    pub variable: Option<String>,
    pub labels: String,
    pub properties: String,
}

impl NodePattern {
    pub fn new(variable: Option<String>, labels: String, properties: String) -> Self {
        Self {
            variable,
            labels,
            properties,
        }
    }

    pub fn render(&self) -> String {
        let variable = self.variable.as_deref().unwrap_or("");
        if self.properties.is_empty() {
            format!("({}{})", variable, self.labels)
        } else {
            format!("({}{} {})", variable, self.labels, self.properties)
        }
    }
}

/// An edge pattern element, `-[var:TYPE {props}]->`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgePattern {
    pub variable: Option<String>,
    pub labels: Option<String>,
    pub properties: Option<String>,
    pub directed: bool,
    /// Arrow points back at the previous node (`<-[...]-`)
    pub points_from: bool,
}

impl EdgePattern {
    pub fn render(&self) -> String {
        let inner = format!(
            "{}{}{}",
            self.variable.as_deref().unwrap_or(""),
            self.labels.as_deref().unwrap_or(""),
            self.properties.as_deref().unwrap_or("")
        );

        match (self.directed, self.points_from) {
            (false, _) => format!("-[{}]-", inner),
            (true, true) => format!("<-[{}]-", inner),
            (true, false) => format!("-[{}]->", inner),
        }
    }
}
