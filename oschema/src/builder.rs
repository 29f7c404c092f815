/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Declaration builder.
//!
//! A [`Namespace`] collects type declarations under one dotted path and hands
//! out a [`TypeRef`] for each, so later declarations (record fields) can name
//! earlier ones:
//!
//! ```rust,ignore
//! let mut ns = Namespace::new("dunedaq.package.confgen")?;
//! let int4 = ns.number("int4", Dtype::I4, "A signed integer of 4 bytes");
//! let pkg = ns.record("package", vec![
//!     field("some_configured_value", &int4, "This is a configured value").with_default(31415),
//! ], "");
//! let types = ns.into_types();
//! ```
//!
//! Nothing is checked beyond the namespace path here: malformed names,
//! dangling references and bad defaults all surface when the types are
//! handed to [`Hierarchy::build`](crate::Hierarchy::build).

use crate::error::SchemaError;
use crate::types::{Dtype, Field, Path, Schema, TypeDef, TypeRef};

#[derive(Debug, Clone)]
pub struct Namespace {
    path: Path,
    types: Vec<TypeDef>,
}

impl Namespace {
    /// Open an empty namespace at `path`.
    ///
    /// # Errors
    /// [`SchemaError::InvalidPath`] if `path` is not a dotted identifier list.
    pub fn new(path: &str) -> Result<Self, SchemaError> {
        Ok(Self {
            path: Path::parse(path)?,
            types: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn number(&mut self, name: &str, dtype: Dtype, doc: &str) -> TypeRef {
        self.declare(name, Schema::Number { dtype }, doc)
    }

    pub fn string(&mut self, name: &str, doc: &str) -> TypeRef {
        self.declare(name, Schema::String, doc)
    }

    pub fn boolean(&mut self, name: &str, doc: &str) -> TypeRef {
        self.declare(name, Schema::Boolean, doc)
    }

    /// Declare a closed set of string symbols.  Without an explicit default
    /// the first symbol is the default.
    pub fn enumeration(
        &mut self,
        name: &str,
        symbols: &[&str],
        default: Option<&str>,
        doc: &str,
    ) -> TypeRef {
        let default = default
            .or_else(|| symbols.first().copied())
            .unwrap_or_default()
            .to_string();
        let symbols = symbols.iter().map(|s| s.to_string()).collect();
        self.declare(name, Schema::Enum { symbols, default }, doc)
    }

    pub fn record(&mut self, name: &str, fields: Vec<Field>, doc: &str) -> TypeRef {
        self.declare(name, Schema::Record { fields }, doc)
    }

    /// Declarations made so far, in declaration order.
    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    pub fn into_types(self) -> Vec<TypeDef> {
        self.types
    }

    fn declare(&mut self, name: &str, schema: Schema, doc: &str) -> TypeRef {
        let def = TypeDef {
            name: name.to_string(),
            path: self.path.clone(),
            schema,
            doc: doc.to_string(),
        };
        let full = def.full_name();
        self.types.push(def);
        full
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
