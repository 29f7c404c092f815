/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Validated, dependency-ordered type hierarchy.
//!
//! [`Hierarchy::build`] is the single entry point: it takes the merged
//! declarations of every namespace involved (an imported base schema plus the
//! local one), validates them and stores them in dependency order.  A built
//! hierarchy is immutable; all lookups, default instances and config coercion
//! go through it.

use std::collections::{HashMap, HashSet};

use serde_json::Value as Json;
use tracing::{debug, info};

use crate::error::SchemaError;
use crate::sort::topological_order;
use crate::types::{Dtype, Field, Path, Schema, TypeDef, TypeRef};
use crate::validate::{check_declarations, check_defaults, check_references};
use crate::value::{Value, ValueError};

#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    /// Dependency order: every type comes after the types it references.
    types: Vec<TypeDef>,

    /// Full name → position in `types`.
    index: HashMap<String, usize>,
}

impl Hierarchy {
    /// Validate `types` and arrange them in dependency order.
    ///
    /// # Errors
    /// The first [`SchemaError`] found, in this order of checks: names and
    /// duplicates, enum well-formedness, dangling references, cycles,
    /// defaults.
    pub fn build(types: Vec<TypeDef>) -> Result<Self, SchemaError> {
        let index = check_declarations(&types)?;
        check_references(&types, &index)?;
        let order = topological_order(&types, &index)?;

        let mut slots: Vec<Option<TypeDef>> = types.into_iter().map(Some).collect();
        let sorted: Vec<TypeDef> = order.into_iter().filter_map(|p| slots[p].take()).collect();
        let index = sorted
            .iter()
            .enumerate()
            .map(|(p, t)| (t.full_name().to_string(), p))
            .collect();

        let hier = Self {
            types: sorted,
            index,
        };
        check_defaults(&hier)?;

        for def in &hier.types {
            debug!(
                "  Type: {} | schema: {} | deps: {}",
                def.full_name(),
                def.schema.kind(),
                def.dependencies().count(),
            );
        }
        info!(type_count = hier.types.len(), "Schema hierarchy built");

        Ok(hier)
    }

    /// Look up a type by fully-qualified name.
    pub fn get(&self, full_name: &str) -> Option<&TypeDef> {
        self.index.get(full_name).map(|&p| &self.types[p])
    }

    /// All types, dependencies first.
    pub fn sorted(&self) -> &[TypeDef] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types declared under `prefix` plus everything they depend on, still in
    /// dependency order.
    pub fn select(&self, prefix: &Path) -> Vec<&TypeDef> {
        let mut keep = HashSet::new();
        let mut pending: Vec<usize> = (0..self.types.len())
            .filter(|&p| self.types[p].path.starts_with(prefix))
            .collect();

        while let Some(p) = pending.pop() {
            if !keep.insert(p) {
                continue;
            }
            pending.extend(
                self.types[p]
                    .dependencies()
                    .filter_map(|d| self.index.get(d.as_str()).copied()),
            );
        }

        self.types
            .iter()
            .enumerate()
            .filter(|(p, _)| keep.contains(p))
            .map(|(_, t)| t)
            .collect()
    }

    /// Default instance of `ty`.
    ///
    /// Scalars default to zero / empty / `false`, enums to their declared
    /// default symbol, and records to the per-field defaults in declaration
    /// order.  A field without an explicit default takes the default
    /// instance of its item type.
    ///
    /// # Errors
    /// [`SchemaError::UnknownType`] if `ty` is not in this hierarchy, and
    /// [`SchemaError::InvalidDefault`] if a stored default does not fit its
    /// field.
    pub fn default_value(&self, ty: &TypeRef) -> Result<Value, SchemaError> {
        self.default_of(ty).map_err(|e| match e {
            ValueError::UnresolvedType(name) => SchemaError::UnknownType(name),
            reason => SchemaError::InvalidDefault {
                ty: ty.to_string(),
                reason,
            },
        })
    }

    /// Coerce untyped input to a value of type `ty`.
    ///
    /// Record fields missing from `json` take their defaults; fields `json`
    /// has but the record does not declare are rejected.
    ///
    /// # Errors
    /// A [`ValueError`] describing the first mismatch, wrapped in
    /// [`ValueError::InField`] once per record level.
    pub fn instantiate(&self, ty: &TypeRef, json: &Json) -> Result<Value, ValueError> {
        let def = self
            .get(ty.as_str())
            .ok_or_else(|| ValueError::UnresolvedType(ty.to_string()))?;

        match &def.schema {
            Schema::Number { dtype } => coerce_number(*dtype, json),

            Schema::String => json
                .as_str()
                .map(Value::from)
                .ok_or_else(|| mismatch("string", json)),

            Schema::Boolean => json
                .as_bool()
                .map(Value::Bool)
                .ok_or_else(|| mismatch("boolean", json)),

            Schema::Enum { symbols, .. } => {
                let s = json.as_str().ok_or_else(|| mismatch("string", json))?;
                if symbols.iter().any(|sym| sym == s) {
                    Ok(Value::from(s))
                } else {
                    Err(ValueError::NotASymbol {
                        value: s.to_string(),
                        symbols: symbols.clone(),
                    })
                }
            }

            Schema::Record { fields } => {
                let obj = json.as_object().ok_or_else(|| mismatch("record", json))?;

                if let Some(unknown) = obj.keys().find(|k| !fields.iter().any(|f| &f.name == *k)) {
                    return Err(ValueError::UnknownField {
                        field: unknown.clone(),
                    });
                }

                let mut out = Vec::with_capacity(fields.len());
                for f in fields {
                    let v = match obj.get(&f.name) {
                        Some(given) => self.instantiate(&f.item, given),
                        None => self.field_default(f),
                    }
                    .map_err(|e| ValueError::in_field(&f.name, e))?;
                    out.push((f.name.clone(), v));
                }
                Ok(Value::Record(out))
            }
        }
    }

    fn default_of(&self, ty: &TypeRef) -> Result<Value, ValueError> {
        let def = self
            .get(ty.as_str())
            .ok_or_else(|| ValueError::UnresolvedType(ty.to_string()))?;

        Ok(match &def.schema {
            Schema::Number { dtype } if dtype.is_float() => Value::Float(0.0),
            Schema::Number { dtype } if dtype.is_signed() => Value::Int(0),
            Schema::Number { .. } => Value::UInt(0),
            Schema::String => Value::Str(String::new()),
            Schema::Boolean => Value::Bool(false),
            Schema::Enum { default, .. } => Value::Str(default.clone()),
            Schema::Record { fields } => {
                let mut out = Vec::with_capacity(fields.len());
                for f in fields {
                    let v = self
                        .field_default(f)
                        .map_err(|e| ValueError::in_field(&f.name, e))?;
                    out.push((f.name.clone(), v));
                }
                Value::Record(out)
            }
        })
    }

    /// Explicit defaults are routed through [`instantiate`](Self::instantiate)
    /// so they come back normalised (e.g. `3333_i32` for a `u4` field becomes
    /// `UInt(3333)`) and partial record defaults are completed.
    fn field_default(&self, f: &Field) -> Result<Value, ValueError> {
        match &f.default {
            Some(explicit) => self.instantiate(&f.item, &explicit.to_json()),
            None => self.default_of(&f.item),
        }
    }
}

// ── Coercion helpers ──────────────────────────────────────────────────────────

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(n) if n.is_f64() => "float",
        Json::Number(_) => "integer",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "record",
    }
}

fn mismatch(expected: &'static str, json: &Json) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        found: json_kind(json),
    }
}

fn out_of_range(dtype: Dtype, json: &Json) -> ValueError {
    ValueError::OutOfRange {
        dtype,
        value: json.to_string(),
    }
}

fn coerce_number(dtype: Dtype, json: &Json) -> Result<Value, ValueError> {
    if dtype.is_float() {
        let v = json.as_f64().ok_or_else(|| mismatch("number", json))?;
        if dtype == Dtype::F4 && v.abs() > f64::from(f32::MAX) {
            return Err(out_of_range(dtype, json));
        }
        return Ok(Value::Float(v));
    }

    if let Some((lo, hi)) = dtype.signed_range() {
        return match json.as_i64() {
            Some(v) if (lo..=hi).contains(&v) => Ok(Value::Int(v)),
            Some(_) => Err(out_of_range(dtype, json)),
            // Positive but beyond i64
            None if json.is_u64() => Err(out_of_range(dtype, json)),
            None => Err(mismatch("integer", json)),
        };
    }

    let max = dtype.unsigned_max().unwrap_or(u64::MAX);
    match json.as_u64() {
        Some(v) if v <= max => Ok(Value::UInt(v)),
        Some(_) => Err(out_of_range(dtype, json)),
        // Negative
        None if json.is_i64() => Err(out_of_range(dtype, json)),
        None => Err(mismatch("integer", json)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Namespace;
    use crate::types::field;
    use serde_json::json;

    struct Fixture {
        hier: Hierarchy,
        int4: TypeRef,
        uint4: TypeRef,
        float4: TypeRef,
        dest: TypeRef,
        inner: TypeRef,
        outer: TypeRef,
    }

    fn fixture() -> Fixture {
        let mut ns = Namespace::new("t.ns").unwrap();
        let int4 = ns.number("int4", Dtype::I4, "");
        let uint4 = ns.number("uint4", Dtype::U4, "");
        let float4 = ns.number("float4", Dtype::F4, "");
        let flag = ns.boolean("Flag", "");
        let text = ns.string("Text", "");
        let dest = ns.enumeration("Dest", &["local", "cern", "pocket"], None, "");
        let inner = ns.record(
            "inner",
            vec![
                field("count", &uint4, "").with_default(3333),
                field("dest", &dest, ""),
                field("on", &flag, ""),
            ],
            "",
        );
        let outer = ns.record(
            "outer",
            vec![
                field("inner", &inner, ""),
                field("label", &text, "").with_default("x"),
                field("n", &int4, "").with_default(-5),
            ],
            "",
        );
        Fixture {
            hier: Hierarchy::build(ns.into_types()).unwrap(),
            int4,
            uint4,
            float4,
            dest,
            inner,
            outer,
        }
    }

    #[test]
    fn get_finds_by_full_name() {
        let fx = fixture();
        assert_eq!(fx.hier.get("t.ns.int4").unwrap().name, "int4");
        assert!(fx.hier.get("int4").is_none());
        assert_eq!(fx.hier.len(), 8);
    }

    #[test]
    fn default_instance_nests_record_defaults() {
        let fx = fixture();
        let v = fx.hier.default_value(&fx.outer).unwrap();
        assert_eq!(
            v,
            Value::Record(vec![
                (
                    "inner".into(),
                    Value::Record(vec![
                        ("count".into(), Value::UInt(3333)),
                        ("dest".into(), Value::Str("local".into())),
                        ("on".into(), Value::Bool(false)),
                    ])
                ),
                ("label".into(), Value::Str("x".into())),
                ("n".into(), Value::Int(-5)),
            ])
        );
    }

    #[test]
    fn default_of_unknown_type_is_an_error() {
        let fx = fixture();
        assert_eq!(
            fx.hier.default_value(&TypeRef::new("t.ns.nope")),
            Err(SchemaError::UnknownType("t.ns.nope".into()))
        );
    }

    #[test]
    fn default_that_bypassed_build_is_reported_as_invalid() {
        let mut ns = Namespace::new("x").unwrap();
        let n = ns.number("n", Dtype::I4, "");
        let r = ns.record("r", vec![field("a", &n, "").with_default(3_000_000_000_u64)], "");
        let types = ns.into_types();
        let index = types
            .iter()
            .enumerate()
            .map(|(p, t)| (t.full_name().to_string(), p))
            .collect();
        let hier = Hierarchy { types, index };

        match hier.default_value(&r) {
            Err(SchemaError::InvalidDefault { ty, reason }) => {
                assert_eq!(ty, "x.r");
                assert_eq!(reason.location(), "a");
                assert!(reason.to_string().contains("does not fit in i4"), "{reason}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn partial_record_default_is_completed() {
        let mut ns = Namespace::new("p").unwrap();
        let n = ns.number("n", Dtype::I8, "");
        let r = ns.record(
            "r",
            vec![field("a", &n, "").with_default(1), field("b", &n, "").with_default(2)],
            "",
        );
        let partial = Value::Record(vec![("b".into(), Value::Int(20))]);
        let top = ns.record("top", vec![field("r", &r, "").with_default(partial)], "");
        let hier = Hierarchy::build(ns.into_types()).unwrap();

        let v = hier.default_value(&top).unwrap();
        assert_eq!(v.get("r.a"), Some(&Value::Int(1)));
        assert_eq!(v.get("r.b"), Some(&Value::Int(20)));
    }

    #[test]
    fn instantiate_fills_missing_fields() {
        let fx = fixture();
        let v = fx
            .hier
            .instantiate(&fx.outer, &json!({ "inner": { "dest": "cern" }, "n": 7 }))
            .unwrap();
        assert_eq!(v.get("inner.dest"), Some(&Value::Str("cern".into())));
        assert_eq!(v.get("inner.count"), Some(&Value::UInt(3333)));
        assert_eq!(v.get("label"), Some(&Value::Str("x".into())));
        assert_eq!(v.get("n"), Some(&Value::Int(7)));
    }

    #[test]
    fn instantiate_rejects_unknown_fields() {
        let fx = fixture();
        let err = fx
            .hier
            .instantiate(&fx.outer, &json!({ "inner": { "bogus": 1 } }))
            .unwrap_err();
        assert_eq!(err.location(), "inner");
        assert!(err.to_string().contains("unknown field 'bogus'"));
    }

    #[test]
    fn enum_accepts_exactly_its_symbols() {
        let fx = fixture();
        for ok in ["local", "cern", "pocket"] {
            assert_eq!(fx.hier.instantiate(&fx.dest, &json!(ok)), Ok(Value::from(ok)));
        }
        for bad in ["LOCAL", "", "elsewhere"] {
            assert!(matches!(
                fx.hier.instantiate(&fx.dest, &json!(bad)),
                Err(ValueError::NotASymbol { .. })
            ));
        }
        assert!(matches!(
            fx.hier.instantiate(&fx.dest, &json!(1)),
            Err(ValueError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn integer_ranges_follow_dtype_width() {
        let fx = fixture();
        assert_eq!(
            fx.hier.instantiate(&fx.int4, &json!(i32::MIN)),
            Ok(Value::Int(i64::from(i32::MIN)))
        );
        assert!(matches!(
            fx.hier.instantiate(&fx.int4, &json!(i64::from(i32::MAX) + 1)),
            Err(ValueError::OutOfRange { .. })
        ));
        assert!(matches!(
            fx.hier.instantiate(&fx.int4, &json!(u64::MAX)),
            Err(ValueError::OutOfRange { .. })
        ));
        assert!(matches!(
            fx.hier.instantiate(&fx.uint4, &json!(-1)),
            Err(ValueError::OutOfRange { .. })
        ));
        assert_eq!(
            fx.hier.instantiate(&fx.uint4, &json!(u32::MAX)),
            Ok(Value::UInt(u64::from(u32::MAX)))
        );
        assert_eq!(
            fx.hier.instantiate(&fx.int4, &json!(1.5)),
            Err(ValueError::TypeMismatch {
                expected: "integer",
                found: "float"
            })
        );
    }

    #[test]
    fn floats_accept_integers_and_check_f4_range() {
        let fx = fixture();
        assert_eq!(fx.hier.instantiate(&fx.float4, &json!(2)), Ok(Value::Float(2.0)));
        assert!(matches!(
            fx.hier.instantiate(&fx.float4, &json!(1e300)),
            Err(ValueError::OutOfRange { dtype: Dtype::F4, .. })
        ));
    }

    #[test]
    fn record_requires_an_object() {
        let fx = fixture();
        assert_eq!(
            fx.hier.instantiate(&fx.inner, &json!([1, 2])),
            Err(ValueError::TypeMismatch {
                expected: "record",
                found: "array"
            })
        );
    }

    #[test]
    fn building_twice_gives_equal_hierarchies() {
        assert_eq!(fixture().hier, fixture().hier);
    }
}
