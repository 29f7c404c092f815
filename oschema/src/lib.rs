/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! oschema – object schema declarations for configuration generation
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── types/      – Dtype, Path, TypeRef, Field, Schema, TypeDef
//! ├── value/      – typed values and ValueError
//! ├── builder/    – Namespace: declare types under a dotted path
//! ├── validate/   – declaration, reference and default checks
//! ├── sort/       – dependency ordering and sort_select
//! ├── hier/       – Hierarchy: validated, ordered, queryable type set
//! └── emit/       – SchemaDocument JSON emission
//! ```

pub mod builder;
pub mod emit;
pub mod error;
pub mod hier;
pub mod sort;
pub mod types;
pub mod value;

mod validate;

pub use builder::Namespace;
pub use emit::SchemaDocument;
pub use error::SchemaError;
pub use hier::Hierarchy;
pub use sort::sort_select;
pub use types::{field, Dtype, Field, Path, Schema, TypeDef, TypeRef};
pub use value::{Value, ValueError};
