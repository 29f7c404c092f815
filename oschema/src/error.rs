/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for schema construction and validation.
//!
//! Every variant names the offending type (and field, where there is one) so
//! a caller can report the exact declaration to fix.  Value-level detail is
//! delegated to [`ValueError`].

use thiserror::Error;

use crate::value::ValueError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A namespace path is empty or has a segment that is not an identifier.
    #[error("invalid schema path '{0}'")]
    InvalidPath(String),

    /// A type name is not an identifier.
    #[error("invalid type name '{0}'")]
    InvalidName(String),

    /// Two declarations share one fully-qualified name.
    #[error("type '{0}' is declared more than once")]
    DuplicateType(String),

    /// A record declares the same field name twice.
    #[error("record '{record}' declares field '{field}' more than once")]
    DuplicateField { record: String, field: String },

    /// An enum without symbols, or whose default is not one of them.
    #[error("enum '{name}' is invalid: {reason}")]
    InvalidEnum { name: String, reason: String },

    /// A record field references a type that is neither declared locally nor
    /// part of the merged base schema.
    #[error("field '{field}' of record '{record}' references undeclared type '{target}'")]
    MissingReference {
        record: String,
        field: String,
        target: String,
    },

    /// The depends-on relation has a cycle.  The path starts and ends with the
    /// same type.
    #[error("dependency cycle: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// An explicit default does not fit the field's declared type.
    #[error("default of field '{field}' in record '{record}' does not fit type '{item}': {reason}")]
    DefaultMismatch {
        record: String,
        field: String,
        item: String,
        reason: ValueError,
    },

    /// A default instance could not be formed from the stored defaults.
    #[error("cannot build default instance of '{ty}': {reason}")]
    InvalidDefault { ty: String, reason: ValueError },

    /// Lookup of a type that is not in the hierarchy.
    #[error("type '{0}' is not declared")]
    UnknownType(String),
}
