/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Type descriptors: the static data every schema is made of.
//!
//! ```text
//! Namespace ──(declare)──►  TypeDef { name, path, doc, schema }
//!                                          │
//!                 ┌───────────┬──────────┬─┴────────┬─────────────┐
//!               Number      String    Boolean      Enum         Record
//!              { dtype }                       { symbols }   { fields → TypeRef }
//! ```
//!
//! Records are the only descriptors that point at other types, so they are
//! the only source of edges in the depends-on graph.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::SchemaError;
use crate::value::Value;

// ── Dtype ─────────────────────────────────────────────────────────────────────

/// Storage kind of a numeric type.
///
/// The short names (`"i4"`, `"f8"`, …) are the ones carried in emitted schema
/// documents and understood by downstream code generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dtype {
    #[serde(rename = "i2")]
    I2,
    #[serde(rename = "i4")]
    I4,
    #[serde(rename = "i8")]
    I8,
    #[serde(rename = "u2")]
    U2,
    #[serde(rename = "u4")]
    U4,
    #[serde(rename = "u8")]
    U8,
    #[serde(rename = "f4")]
    F4,
    #[serde(rename = "f8")]
    F8,
}

impl Dtype {
    /// Storage width in bytes.
    pub fn width_bytes(self) -> usize {
        match self {
            Dtype::I2 | Dtype::U2 => 2,
            Dtype::I4 | Dtype::U4 | Dtype::F4 => 4,
            Dtype::I8 | Dtype::U8 | Dtype::F8 => 8,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Dtype::I2 | Dtype::I4 | Dtype::I8)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Dtype::F4 | Dtype::F8)
    }

    /// Short name as used in schema documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Dtype::I2 => "i2",
            Dtype::I4 => "i4",
            Dtype::I8 => "i8",
            Dtype::U2 => "u2",
            Dtype::U4 => "u4",
            Dtype::U8 => "u8",
            Dtype::F4 => "f4",
            Dtype::F8 => "f8",
        }
    }

    /// Parse a short name.  Returns `None` for anything not in the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "i2" => Some(Dtype::I2),
            "i4" => Some(Dtype::I4),
            "i8" => Some(Dtype::I8),
            "u2" => Some(Dtype::U2),
            "u4" => Some(Dtype::U4),
            "u8" => Some(Dtype::U8),
            "f4" => Some(Dtype::F4),
            "f8" => Some(Dtype::F8),
            _ => None,
        }
    }

    /// Inclusive signed range for signed integer kinds.
    pub(crate) fn signed_range(self) -> Option<(i64, i64)> {
        match self {
            Dtype::I2 => Some((i16::MIN as i64, i16::MAX as i64)),
            Dtype::I4 => Some((i32::MIN as i64, i32::MAX as i64)),
            Dtype::I8 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Inclusive upper bound for unsigned integer kinds.
    pub(crate) fn unsigned_max(self) -> Option<u64> {
        match self {
            Dtype::U2 => Some(u16::MAX as u64),
            Dtype::U4 => Some(u32::MAX as u64),
            Dtype::U8 => Some(u64::MAX),
            _ => None,
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// A dotted namespace such as `dunedaq.package.confgen`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Path(Vec<String>);

impl Path {
    /// Parse dotted text.  Every segment must be a plain identifier.
    ///
    /// # Errors
    /// [`SchemaError::InvalidPath`] on an empty path, an empty segment, or a
    /// segment that is not an identifier.
    pub fn parse(dotted: &str) -> Result<Self, SchemaError> {
        let segments: Vec<String> = dotted.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| !is_identifier(s)) {
            return Err(SchemaError::InvalidPath(dotted.to_string()));
        }
        Ok(Path(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Fully-qualified name of `name` inside this path.
    pub fn join(&self, name: &str) -> TypeRef {
        TypeRef(format!("{self}.{name}"))
    }

    /// `true` when `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// ASCII identifier: letters, digits and `_`, not starting with a digit.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ── TypeRef ───────────────────────────────────────────────────────────────────

/// Fully-qualified name of a declared type, e.g. `dunedaq.daqconf.boot.boot`.
///
/// Returned by every [`Namespace`](crate::Namespace) declaration so that
/// record fields can point at types without holding on to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef(String);

impl TypeRef {
    /// Wrap an already-qualified name.  No resolution happens here; dangling
    /// names are reported when the hierarchy is built.
    pub fn new(full_name: impl Into<String>) -> Self {
        TypeRef(full_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// ── Field ─────────────────────────────────────────────────────────────────────

/// One named, typed member of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,

    /// Type of the field's value.
    pub item: TypeRef,

    /// Explicit default.  `None` means "the default instance of `item`".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    pub doc: String,
}

impl Field {
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Build a field referencing `item`.
pub fn field(name: impl Into<String>, item: &TypeRef, doc: impl Into<String>) -> Field {
    Field {
        name: name.into(),
        item: item.clone(),
        default: None,
        doc: doc.into(),
    }
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Shape of a declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "schema", rename_all = "lowercase")]
pub enum Schema {
    Number {
        dtype: Dtype,
    },
    String,
    Boolean,
    Enum {
        symbols: Vec<String>,
        default: String,
    },
    Record {
        fields: Vec<Field>,
    },
}

impl Schema {
    /// Name of the schema class, as emitted under the `"schema"` key.
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Number { .. } => "number",
            Schema::String => "string",
            Schema::Boolean => "boolean",
            Schema::Enum { .. } => "enum",
            Schema::Record { .. } => "record",
        }
    }
}

// ── TypeDef ───────────────────────────────────────────────────────────────────

/// A named type declared inside a namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDef {
    pub name: String,
    pub path: Path,
    #[serde(flatten)]
    pub schema: Schema,
    pub doc: String,
}

impl TypeDef {
    pub fn full_name(&self) -> TypeRef {
        self.path.join(&self.name)
    }

    /// Types this one refers to, in field order.  Repeats are kept.
    pub fn dependencies(&self) -> impl Iterator<Item = &TypeRef> {
        let fields: &[Field] = match &self.schema {
            Schema::Record { fields } => fields,
            _ => &[],
        };
        fields.iter().map(|f| &f.item)
    }

    /// Look up a record field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        match &self.schema {
            Schema::Record { fields } => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
