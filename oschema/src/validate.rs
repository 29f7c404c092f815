/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Declaration checks run by [`Hierarchy::build`](crate::Hierarchy::build).
//!
//! The phases run in a fixed order and stop at the first failure:
//!
//! 1. [`check_declarations`] – names, duplicates, enum well-formedness.
//! 2. [`check_references`]   – every field item resolves.
//! 3. cycle detection        – see [`crate::sort`].
//! 4. [`check_defaults`]     – explicit defaults fit their field types.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::SchemaError;
use crate::hier::Hierarchy;
use crate::types::{is_identifier, Schema, TypeDef};

/// Phase 1.  Returns the name → position index on success.
pub(crate) fn check_declarations(types: &[TypeDef]) -> Result<HashMap<String, usize>, SchemaError> {
    let mut index = HashMap::with_capacity(types.len());

    for (pos, def) in types.iter().enumerate() {
        if !is_identifier(&def.name) {
            return Err(SchemaError::InvalidName(def.name.clone()));
        }

        let full = def.full_name().to_string();
        if index.insert(full.clone(), pos).is_some() {
            return Err(SchemaError::DuplicateType(full));
        }

        match &def.schema {
            Schema::Enum { symbols, default } => {
                if symbols.is_empty() {
                    return Err(SchemaError::InvalidEnum {
                        name: full,
                        reason: "no symbols declared".to_string(),
                    });
                }
                if !symbols.contains(default) {
                    return Err(SchemaError::InvalidEnum {
                        name: full,
                        reason: format!("default '{}' is not a symbol", default),
                    });
                }
            }
            Schema::Record { fields } => {
                let mut seen = HashSet::new();
                for f in fields {
                    if !is_identifier(&f.name) {
                        return Err(SchemaError::InvalidName(format!("{}.{}", full, f.name)));
                    }
                    if !seen.insert(f.name.as_str()) {
                        return Err(SchemaError::DuplicateField {
                            record: full,
                            field: f.name.clone(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    Ok(index)
}

/// Phase 2.
pub(crate) fn check_references(
    types: &[TypeDef],
    index: &HashMap<String, usize>,
) -> Result<(), SchemaError> {
    for def in types {
        if let Schema::Record { fields } = &def.schema {
            for f in fields {
                if !index.contains_key(f.item.as_str()) {
                    return Err(SchemaError::MissingReference {
                        record: def.full_name().to_string(),
                        field: f.name.clone(),
                        target: f.item.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Phase 4.  Runs in topological order, so a record's field types have
/// already passed by the time the record itself is checked.
pub(crate) fn check_defaults(hier: &Hierarchy) -> Result<(), SchemaError> {
    for def in hier.sorted() {
        let Schema::Record { fields } = &def.schema else {
            continue;
        };
        for f in fields {
            let Some(default) = &f.default else {
                continue;
            };
            hier.instantiate(&f.item, &default.to_json())
                .map_err(|reason| SchemaError::DefaultMismatch {
                    record: def.full_name().to_string(),
                    field: f.name.clone(),
                    item: f.item.to_string(),
                    reason,
                })?;
            debug!(record = %def.full_name(), field = %f.name, "default accepted");
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
