/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Typed values: defaults and configuration instances.
//!
//! A [`Value`] is only ever produced for a known type, so it carries no type
//! name of its own.  Records keep their fields in declaration order, which is
//! also the order they are serialised in.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::Dtype;

// ── Value ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Str(String),
    Record(Vec<(String, Value)>),
}

impl Value {
    /// Short description of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Record(_) => "record",
        }
    }

    /// Walk nested records along a dotted path (`"package.num_renamemes"`).
    ///
    /// The empty path returns `self`.
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        if dotted.is_empty() {
            return Some(self);
        }
        dotted.split('.').try_fold(self, |v, key| match v {
            Value::Record(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        })
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(v),
            Value::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Untyped JSON form.  Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Int(v) => Json::from(*v),
            Value::UInt(v) => Json::from(*v),
            Value::Float(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Bool(v) => Json::Bool(*v),
            Value::Str(v) => Json::String(v.clone()),
            Value::Record(fields) => Json::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::UInt(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

// ── ValueError ────────────────────────────────────────────────────────────────

/// Why a value does not fit a type.
///
/// Carried inside [`SchemaError::DefaultMismatch`](crate::SchemaError) and
/// returned directly from [`Hierarchy::instantiate`](crate::Hierarchy).
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// The value is of the wrong kind altogether (string for a number, …).
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A number does not fit the storage kind.
    OutOfRange { dtype: Dtype, value: String },

    /// A string that is not one of the enum's symbols.
    NotASymbol { value: String, symbols: Vec<String> },

    /// A record value names a field the record does not declare.
    UnknownField { field: String },

    /// The error happened inside a record field.
    InField {
        field: String,
        source: Box<ValueError>,
    },

    /// The type to check against is not in the hierarchy.
    UnresolvedType(String),
}

impl ValueError {
    pub(crate) fn in_field(field: &str, source: ValueError) -> Self {
        ValueError::InField {
            field: field.to_string(),
            source: Box::new(source),
        }
    }

    /// Dotted location of the innermost failure, empty at top level.
    pub fn location(&self) -> String {
        let mut parts = Vec::new();
        let mut cur = self;
        while let ValueError::InField { field, source } = cur {
            parts.push(field.as_str());
            cur = &**source;
        }
        parts.join(".")
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::TypeMismatch { expected, found } => {
                write!(f, "expected {} but found {}", expected, found)
            }

            ValueError::OutOfRange { dtype, value } => {
                write!(f, "value {} does not fit in {} ({} bytes)", value, dtype, dtype.width_bytes())
            }

            ValueError::NotASymbol { value, symbols } => write!(
                f,
                "'{}' is not one of [{}]",
                value,
                symbols.join(", ")
            ),

            ValueError::UnknownField { field } => write!(f, "unknown field '{}'", field),

            ValueError::InField { field, source } => write!(f, "{}: {}", field, source),

            ValueError::UnresolvedType(name) => write!(f, "type '{}' is not declared", name),
        }
    }
}

impl std::error::Error for ValueError {}

// ── Tests ─────────────────────────────────────────────────────────────────────
