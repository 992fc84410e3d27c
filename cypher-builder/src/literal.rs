// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Literal serialization
//!
//! Pure functions converting values, label sets and property mappings into
//! clause-safe Cypher text. Clauses store the output of these functions and
//! never escape anything themselves.

use crate::error::{Error, Result};
use crate::value::{Properties, Value};

/// An ordered set of node labels (or a relationship type)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels(Vec<String>);

impl Labels {
    /// No labels
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for Labels {
    fn from(label: &str) -> Self {
        label.to_string().into()
    }
}

impl From<String> for Labels {
    fn from(label: String) -> Self {
        if label.is_empty() {
            Self::none()
        } else {
            Self(vec![label])
        }
    }
}

impl From<&String> for Labels {
    fn from(label: &String) -> Self {
        label.clone().into()
    }
}

impl From<Vec<String>> for Labels {
    fn from(labels: Vec<String>) -> Self {
        Self(labels.into_iter().filter(|l| !l.is_empty()).collect())
    }
}

impl From<Vec<&str>> for Labels {
    fn from(labels: Vec<&str>) -> Self {
        labels
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<&[&str]> for Labels {
    fn from(labels: &[&str]) -> Self {
        labels.to_vec().into()
    }
}

impl<const N: usize> From<[&str; N]> for Labels {
    fn from(labels: [&str; N]) -> Self {
        labels.to_vec().into()
    }
}

impl<T: Into<Labels>> From<Option<T>> for Labels {
    fn from(labels: Option<T>) -> Self {
        labels.map(Into::into).unwrap_or_default()
    }
}

/// Quote a label, type or property key with backticks unless it is a plain identifier
pub fn escape_name(name: &str) -> String {
    let mut chars = name.chars();
    let plain = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        None => false,
    };

    if plain {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Render labels as `:A:B`; no labels render as an empty string
pub fn labels_to_text(labels: &Labels) -> String {
    labels
        .iter()
        .map(|label| format!(":{}", escape_name(label)))
        .collect()
}

/// Render a property mapping as `{k1: v1, k2: v2}`; an empty mapping renders as an empty string
pub fn properties_to_text(properties: &Properties) -> Result<String> {
    if properties.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("{{{}}}", entries_to_text(properties)?))
}

/// Render a single value as a Cypher literal
pub fn value_to_text(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => float_to_text(*f),
        Value::String(s) => Ok(format!("'{}'", escape_string(s))),
        Value::List(items) => {
            let rendered = items
                .iter()
                .map(value_to_text)
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", rendered.join(", ")))
        }
        Value::Map(fields) => Ok(format!("{{{}}}", entries_to_text(fields)?)),
        Value::Expression(text) => Ok(text.clone()),
    }
}

fn entries_to_text(fields: &Properties) -> Result<String> {
    let rendered = fields
        .iter()
        .map(|(key, value)| -> Result<String> {
            Ok(format!("{}: {}", escape_name(key), value_to_text(value)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(", "))
}

fn float_to_text(f: f64) -> Result<String> {
    if !f.is_finite() {
        return Err(Error::Serialization(format!(
            "Cannot represent {} as a Cypher literal",
            f
        )));
    }
    // Keep a fractional part so the literal stays a float
    if f.fract() == 0.0 {
        Ok(format!("{:.1}", f))
    } else {
        Ok(f.to_string())
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;

    #[test]
    fn test_labels_to_text() {
        assert_eq!(labels_to_text(&Labels::none()), "");
        assert_eq!(labels_to_text(&"".into()), "");
        assert_eq!(labels_to_text(&"Person".into()), ":Person");
        assert_eq!(labels_to_text(&["Person", "Employee"].into()), ":Person:Employee");
        assert_eq!(labels_to_text(&Labels::from(None::<&str>)), "");
    }

    #[test]
    fn test_labels_with_spaces_are_backticked() {
        assert_eq!(labels_to_text(&"Big City".into()), ":`Big City`");
    }

    #[test]
    fn test_properties_to_text() {
        assert_eq!(properties_to_text(&Properties::new()).unwrap(), "");

        let properties = props! { "name" => "Alice", "age" => 30, "active" => true };
        assert_eq!(
            properties_to_text(&properties).unwrap(),
            "{name: 'Alice', age: 30, active: true}"
        );
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&Value::Null).unwrap(), "null");
        assert_eq!(value_to_text(&Value::from(false)).unwrap(), "false");
        assert_eq!(value_to_text(&Value::from(-7)).unwrap(), "-7");
        assert_eq!(value_to_text(&Value::from(30.0)).unwrap(), "30.0");
        assert_eq!(value_to_text(&Value::from(2.5)).unwrap(), "2.5");
        assert_eq!(value_to_text(&Value::from("it's")).unwrap(), "'it\\'s'");
        assert_eq!(value_to_text(&Value::expression("m.age")).unwrap(), "m.age");
        assert_eq!(
            value_to_text(&Value::from(vec![1, 2, 3])).unwrap(),
            "[1, 2, 3]"
        );
        assert_eq!(
            value_to_text(&Value::Map(props! { "k" => "v" })).unwrap(),
            "{k: 'v'}"
        );
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let err = value_to_text(&Value::Float(f64::NAN)).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
