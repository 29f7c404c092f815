/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The `package_gen` configuration schema.
//!
//! ```text
//! package_gen
//! ├── boot     → dunedaq.daqconf.boot.boot   (imported, opaque)
//! └── package  → package
//!               ├── some_configured_value : int4 = 31415
//!               └── num_renamemes         : int4 = 1
//! ```
//!
//! The local aliases are declared whether or not a record uses them, so that
//! code generated from the document has the full primitive set available.

use oschema::{field, Dtype, Hierarchy, Namespace, Path, SchemaDocument, SchemaError, TypeDef, TypeRef};
use tracing::{debug, info};

use crate::boot;
use crate::naming::Names;

/// Local declarations for `names`, in declaration order.
///
/// # Errors
/// Only if the namespace derived from the package name were malformed,
/// which [`PackageName`](crate::naming::PackageName) already rules out.
pub fn local_types(names: &Names) -> Result<Vec<TypeDef>, SchemaError> {
    let mut ns = Namespace::new(&names.package.confgen_namespace())?;

    let int4 = ns.number("int4", Dtype::I4, "A signed integer of 4 bytes");
    ns.number("uint4", Dtype::U4, "An unsigned integer of 4 bytes");
    ns.number("int8", Dtype::I8, "A signed integer of 8 bytes");
    ns.number("uint8", Dtype::U8, "An unsigned integer of 8 bytes");
    ns.number("float4", Dtype::F4, "A float of 4 bytes");
    ns.number("double8", Dtype::F8, "A double of 8 bytes");
    ns.boolean("Boolean", "A boolean");
    ns.string("String", "A string");
    ns.enumeration(
        "MonitoringDest",
        &["local", "cern", "pocket"],
        None,
        "Where operational monitoring is sent",
    );

    let package = ns.record(
        "package",
        vec![
            field("some_configured_value", &int4, "This is a configured value").with_default(31415),
            field(
                names.module.count_field(),
                &int4,
                format!("Number of {} modules", names.module),
            )
            .with_default(1),
        ],
        "",
    );

    ns.record(
        "package_gen",
        vec![
            field("boot", &boot::boot(), "Boot parameters"),
            field("package", &package, "package parameters"),
        ],
        "",
    );

    Ok(ns.into_types())
}

/// Fully-qualified name of the root `package_gen` record.
pub fn root_type(names: &Names) -> TypeRef {
    TypeRef::new(format!("{}.package_gen", names.package.confgen_namespace()))
}

/// Boot types merged with the local ones, validated and ordered.
///
/// # Errors
/// Any [`SchemaError`] from validation.
pub fn hierarchy(names: &Names) -> Result<Hierarchy, SchemaError> {
    let mut types = boot::types()?;
    let base_count = types.len();
    types.extend(local_types(names)?);

    debug!(
        base = base_count,
        local = types.len() - base_count,
        "Merging base and local declarations"
    );

    Hierarchy::build(types)
}

/// The published schema document for `names`.
///
/// With `select`, only the types under that path (and their dependencies)
/// are included; otherwise every base and local type is.
///
/// # Errors
/// Any [`SchemaError`] from validation, or a malformed `select` path.
pub fn schema(names: &Names, select: Option<&str>) -> Result<SchemaDocument, SchemaError> {
    let namespace = Path::parse(&names.package.confgen_namespace())?;
    let hier = hierarchy(names)?;

    let doc = match select {
        Some(prefix) => SchemaDocument::selected(namespace, &hier, &Path::parse(prefix)?),
        None => SchemaDocument::from_hierarchy(namespace, &hier),
    };

    info!(
        namespace = %doc.namespace,
        type_count = doc.types.len(),
        "Schema document ready"
    );
    Ok(doc)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{ModuleName, PackageName};
    use oschema::{Schema, Value};

    fn default_hier() -> Hierarchy {
        hierarchy(&Names::default()).unwrap()
    }

    fn package_ref() -> TypeRef {
        TypeRef::new("dunedaq.package.confgen.package")
    }

    #[test]
    fn declares_the_nine_aliases_and_two_records() {
        let types = local_types(&Names::default()).unwrap();
        let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "int4",
                "uint4",
                "int8",
                "uint8",
                "float4",
                "double8",
                "Boolean",
                "String",
                "MonitoringDest",
                "package",
                "package_gen"
            ]
        );
        assert!(types
            .iter()
            .all(|t| t.path.to_string() == "dunedaq.package.confgen"));
    }

    #[test]
    fn alias_widths() {
        let hier = default_hier();
        let dtype = |name: &str| match &hier
            .get(&format!("dunedaq.package.confgen.{name}"))
            .unwrap()
            .schema
        {
            Schema::Number { dtype } => *dtype,
            other => panic!("{name} is not a number: {other:?}"),
        };
        assert_eq!(dtype("int4"), Dtype::I4);
        assert_eq!(dtype("uint4"), Dtype::U4);
        assert_eq!(dtype("int8"), Dtype::I8);
        assert_eq!(dtype("uint8"), Dtype::U8);
        assert_eq!(dtype("float4"), Dtype::F4);
        assert_eq!(dtype("double8"), Dtype::F8);
    }

    #[test]
    fn package_default_instance() {
        let v = default_hier().default_value(&package_ref()).unwrap();
        assert_eq!(
            v,
            Value::Record(vec![
                ("some_configured_value".into(), Value::Int(31415)),
                ("num_renamemes".into(), Value::Int(1)),
            ])
        );
    }

    #[test]
    fn package_gen_nests_unchanged_defaults() {
        let hier = default_hier();
        let v = hier.default_value(&root_type(&Names::default())).unwrap();

        let boot_default = hier.default_value(&boot::boot()).unwrap();
        let package_default = hier.default_value(&package_ref()).unwrap();
        assert_eq!(
            v,
            Value::Record(vec![
                ("boot".into(), boot_default),
                ("package".into(), package_default),
            ])
        );
    }

    #[test]
    fn monitoring_dest_accepts_exactly_three_symbols() {
        let hier = default_hier();
        let dest = TypeRef::new("dunedaq.package.confgen.MonitoringDest");
        for ok in ["local", "cern", "pocket"] {
            assert!(hier.instantiate(&dest, &serde_json::json!(ok)).is_ok());
        }
        for bad in ["remote", "Local", ""] {
            assert!(hier.instantiate(&dest, &serde_json::json!(bad)).is_err());
        }
    }

    #[test]
    fn every_field_default_fits_its_type() {
        let hier = default_hier();
        for def in hier.sorted() {
            if let Schema::Record { fields } = &def.schema {
                for f in fields {
                    if let Some(d) = &f.default {
                        assert!(
                            hier.instantiate(&f.item, &d.to_json()).is_ok(),
                            "{}.{} default does not fit {}",
                            def.full_name(),
                            f.name,
                            f.item
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn document_is_topologically_ordered() {
        let doc = schema(&Names::default(), None).unwrap();
        let order = doc.type_names();
        for (pos, def) in doc.types.iter().enumerate() {
            for dep in def.dependencies() {
                let dep_pos = order.iter().position(|n| n == dep.as_str()).unwrap();
                assert!(
                    dep_pos < pos,
                    "{} must come before {}",
                    dep,
                    def.full_name()
                );
            }
        }
    }

    #[test]
    fn document_merges_base_and_local_types() {
        let doc = schema(&Names::default(), None).unwrap();
        assert_eq!(doc.namespace.to_string(), "dunedaq.package.confgen");
        let names = doc.type_names();
        assert!(names.contains(&"dunedaq.daqconf.boot.boot".to_string()));
        assert!(names.contains(&"dunedaq.daqconf.boot.PMChoice".to_string()));
        assert_eq!(names.last().unwrap(), "dunedaq.package.confgen.package_gen");
        assert_eq!(names.len(), boot::types().unwrap().len() + 11);
    }

    #[test]
    fn emitted_json_is_labelled_with_the_namespace() {
        let json = schema(&Names::default(), None).unwrap().to_json_pretty().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["namespace"], "dunedaq.package.confgen");
        assert_eq!(
            parsed["types"].as_array().unwrap().len(),
            boot::types().unwrap().len() + 11
        );
    }

    #[test]
    fn select_drops_unreferenced_base_types() {
        let doc = schema(&Names::default(), Some("dunedaq.package")).unwrap();
        let names = doc.type_names();
        assert!(names.contains(&"dunedaq.daqconf.boot.boot".to_string()));
        assert!(!names.contains(&"dunedaq.daqconf.boot.PMChoice".to_string()));
        assert!(names.contains(&"dunedaq.package.confgen.double8".to_string()));
    }

    #[test]
    fn select_rejects_malformed_prefix() {
        assert!(matches!(
            schema(&Names::default(), Some("not..a.path")),
            Err(SchemaError::InvalidPath(_))
        ));
    }

    #[test]
    fn declaration_is_idempotent() {
        let first = schema(&Names::default(), None).unwrap();
        let second = schema(&Names::default(), None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
    }

    #[test]
    fn names_flow_into_namespace_and_count_field() {
        let names = Names {
            package: PackageName::parse("readout").unwrap(),
            module: ModuleName::parse("DataLinkHandler").unwrap(),
        };
        let hier = hierarchy(&names).unwrap();
        let v = hier.default_value(&root_type(&names)).unwrap();
        assert_eq!(v.get("package.num_datalinkhandlers"), Some(&Value::Int(1)));
        assert!(hier.get("dunedaq.readout.confgen.package").is_some());
    }
}
