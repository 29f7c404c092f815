/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schema documents: the artefact handed to code generators.
//!
//! The JSON layout follows the object-schema convention used by the DAQ
//! code generators, one object per type, listed under the namespace label:
//!
//! ```json
//! { "namespace": "dunedaq.package.confgen",
//!   "types": [
//!     { "name": "int4", "path": ["dunedaq", "package", "confgen"],
//!       "schema": "number", "dtype": "i4", "doc": "A signed integer of 4 bytes" },
//!     ...
//!   ] }
//! ```

use serde::{Serialize, Serializer};

use crate::error::SchemaError;
use crate::hier::Hierarchy;
use crate::types::{Path, TypeDef};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    /// Namespace the document is published under, emitted as dotted text.
    #[serde(serialize_with = "dotted")]
    pub namespace: Path,

    /// Types in dependency order.
    pub types: Vec<TypeDef>,
}

impl SchemaDocument {
    /// Every type of `hier`, labelled with `namespace`.
    pub fn from_hierarchy(namespace: Path, hier: &Hierarchy) -> Self {
        Self {
            namespace,
            types: hier.sorted().to_vec(),
        }
    }

    /// Only the types under `prefix` and their dependencies.
    pub fn selected(namespace: Path, hier: &Hierarchy, prefix: &Path) -> Self {
        Self {
            namespace,
            types: hier.select(prefix).into_iter().cloned().collect(),
        }
    }

    /// Fully-qualified names in document order.
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.full_name().to_string()).collect()
    }

    /// The whole document as pretty-printed JSON.
    ///
    /// # Errors
    /// Whatever `serde_json` reports while serialising.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Rebuild a hierarchy from the document, re-running every check.
    ///
    /// # Errors
    /// Whatever [`Hierarchy::build`] reports.
    pub fn to_hierarchy(&self) -> Result<Hierarchy, SchemaError> {
        Hierarchy::build(self.types.clone())
    }
}

fn dotted<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
