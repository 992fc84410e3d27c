// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Domain objects that can seed a node or edge clause

use serde::{Deserialize, Serialize};

use crate::literal::Labels;
use crate::value::{Properties, Value};

/// A graph node whose stored labels and properties can seed a node clause
pub trait NodeModel {
    fn labels(&self) -> Labels;
    fn properties(&self) -> Properties;
}

/// A graph relationship whose stored type and properties can seed an edge clause
pub trait RelationshipModel {
    fn relationship_type(&self) -> Labels;
    fn properties(&self) -> Properties;
}

/// Plain node record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Properties,
}

impl Node {
    pub fn new<L: Into<String>>(labels: impl IntoIterator<Item = L>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            properties: Properties::new(),
        }
    }

    /// Set a property, keeping insertion order
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl NodeModel for Node {
    fn labels(&self) -> Labels {
        self.labels.clone().into()
    }

    fn properties(&self) -> Properties {
        self.properties.clone()
    }
}

/// Plain relationship record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub relationship_type: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Relationship {
    pub fn new(relationship_type: impl Into<String>) -> Self {
        Self {
            relationship_type: relationship_type.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl RelationshipModel for Relationship {
    fn relationship_type(&self) -> Labels {
        self.relationship_type.clone().into()
    }

    fn properties(&self) -> Properties {
        self.properties.clone()
    }
}
