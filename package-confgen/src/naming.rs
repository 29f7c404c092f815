/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Package and DAQ module naming rules.
//!
//! A freshly scaffolded package carries its name in the schema namespace
//! (`dunedaq.<package>.confgen`) and its first DAQ module's name in the
//! `num_<module>s` count field.  The scaffold's placeholder module is
//! `RenameMe`, which is where the default field name `num_renamemes` comes
//! from.

use std::fmt;

use thiserror::Error;

/// Package used when none is given.
pub const DEFAULT_PACKAGE: &str = "package";

/// Placeholder module name used by the package scaffold.
pub const DEFAULT_MODULE: &str = "RenameMe";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("package name '{0}' must be lowercase: a letter followed by letters, digits or '_'")]
    Package(String),

    #[error("requested module name '{0}' needs to be in PascalCase")]
    Module(String),
}

// ── PackageName ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName(String);

impl PackageName {
    /// # Errors
    /// [`NamingError::Package`] unless `name` matches `[a-z][a-z0-9_]*`.
    pub fn parse(name: &str) -> Result<Self, NamingError> {
        let mut chars = name.chars();
        let ok = matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if ok {
            Ok(PackageName(name.to_string()))
        } else {
            Err(NamingError::Package(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Schema namespace of the package's confgen types.
    pub fn confgen_namespace(&self) -> String {
        format!("dunedaq.{}.confgen", self.0)
    }
}

impl Default for PackageName {
    fn default() -> Self {
        PackageName(DEFAULT_PACKAGE.to_string())
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── ModuleName ────────────────────────────────────────────────────────────────

/// A DAQ module name such as `RenameMe` or `DataGenerator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleName(String);

impl ModuleName {
    /// # Errors
    /// [`NamingError::Module`] unless `name` starts with an uppercase ASCII
    /// letter, has at least two characters and is alphanumeric throughout.
    pub fn parse(name: &str) -> Result<Self, NamingError> {
        let starts_upper = name.chars().next().is_some_and(|c| c.is_ascii_uppercase());
        let ok = starts_upper
            && name.len() >= 2
            && name.chars().all(|c| c.is_ascii_alphanumeric());
        if ok {
            Ok(ModuleName(name.to_string()))
        } else {
            Err(NamingError::Module(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used in schema file and field names.
    pub fn lower(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Name of the per-module instance count field, e.g. `num_renamemes`.
    pub fn count_field(&self) -> String {
        format!("num_{}s", self.lower())
    }
}

impl Default for ModuleName {
    fn default() -> Self {
        ModuleName(DEFAULT_MODULE.to_string())
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Names ─────────────────────────────────────────────────────────────────────

/// Package and module a schema is generated for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Names {
    pub package: PackageName,
    pub module: ModuleName,
}

impl Names {
    /// Parse both names, falling back to the scaffold defaults for `None`.
    ///
    /// # Errors
    /// The first [`NamingError`] encountered.
    pub fn parse(package: Option<&str>, module: Option<&str>) -> Result<Self, NamingError> {
        Ok(Self {
            package: package.map(PackageName::parse).transpose()?.unwrap_or_default(),
            module: module.map(ModuleName::parse).transpose()?.unwrap_or_default(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_reproduce_the_scaffold() {
        let names = Names::default();
        assert_eq!(names.package.confgen_namespace(), "dunedaq.package.confgen");
        assert_eq!(names.module.count_field(), "num_renamemes");
    }

    #[test]
    fn package_names_must_be_lowercase_identifiers() {
        assert!(PackageName::parse("daqconf").is_ok());
        assert!(PackageName::parse("dfmodules2").is_ok());
        assert!(PackageName::parse("trigger_tools").is_ok());

        for bad in ["", "DaqConf", "2fast", "daq-conf", "daq.conf", "_x"] {
            assert_eq!(
                PackageName::parse(bad),
                Err(NamingError::Package(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn module_names_must_be_pascal_case() {
        assert!(ModuleName::parse("DataGenerator").is_ok());
        assert!(ModuleName::parse("Ab").is_ok());

        for bad in ["", "A", "dataGenerator", "Data_Generator", "Data Generator"] {
            assert!(ModuleName::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn module_count_field_uses_lowercased_name() {
        let m = ModuleName::parse("DataGenerator").unwrap();
        assert_eq!(m.lower(), "datagenerator");
        assert_eq!(m.count_field(), "num_datagenerators");
    }

    #[test]
    fn names_parse_falls_back_per_name() {
        let names = Names::parse(Some("readout"), None).unwrap();
        assert_eq!(names.package.as_str(), "readout");
        assert_eq!(names.module, ModuleName::default());

        let err = Names::parse(None, Some("bad_name")).unwrap_err();
        assert_eq!(err.to_string(), "requested module name 'bad_name' needs to be in PascalCase");
    }
}
