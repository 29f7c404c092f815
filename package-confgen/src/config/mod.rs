//! User configuration loading and management.
//!
//! A configuration file overrides any subset of the root record's defaults.
//! Everything it leaves out keeps the schema default, so the smallest valid
//! file is an empty one.
//!
//! The expected YAML structure for `package_gen` is:
//! ```yaml
//! boot:
//!   ers_impl: cern
//!   base_command_port: 4444
//! package:
//!   some_configured_value: 42
//!   num_renamemes: 2
//! ```
//!
//! JSON files are accepted too: they are parsed as YAML.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use oschema::{Hierarchy, TypeRef, Value};
use tracing::{debug, info, warn};

// ── ConfigManager ─────────────────────────────────────────────────────────────

/// Loads a user configuration for one root type and validates it against the
/// schema.
#[derive(Debug)]
pub struct ConfigManager {
    hier: Arc<Hierarchy>,

    /// Type every loaded document is checked against.
    root: TypeRef,

    /// Default instance of `root`, computed once.
    defaults: Value,

    /// Last successfully loaded configuration.
    value: Option<Value>,
}

impl ConfigManager {
    /// Creates a manager for `root`, holding only its default instance.
    ///
    /// # Errors
    /// Returns an error if `root` is not declared in `hier`.
    pub fn new(hier: Arc<Hierarchy>, root: TypeRef) -> Result<Self> {
        let defaults = hier
            .default_value(&root)
            .with_context(|| format!("Cannot build default configuration for {}", root))?;
        Ok(Self {
            hier,
            root,
            defaults,
            value: None,
        })
    }

    /// Reads `path` and replaces the current configuration with it.
    ///
    /// * An empty document yields the default instance.
    /// * Calling this method a second time replaces the previous configuration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid YAML/JSON, or
    /// does not match the schema.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading configuration from: {}", path.display());

        // Reset state before (re-)loading
        self.value = None;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        self.load_document(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))
    }

    /// Same as [`load_from_file`](Self::load_from_file) for in-memory text.
    ///
    /// # Errors
    /// Returns an error if `content` is not valid YAML/JSON or does not match
    /// the schema.
    pub fn load_from_str(&mut self, content: &str) -> Result<()> {
        self.value = None;
        self.load_document(content)
    }

    fn load_document(&mut self, content: &str) -> Result<()> {
        let document: serde_json::Value = if content.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_yaml::from_str(content).context("Failed to parse YAML/JSON")?
        };

        let value = if document.is_null() {
            warn!("Configuration document is empty, using default configuration");
            self.defaults.clone()
        } else {
            self.hier.instantiate(&self.root, &document).map_err(|e| {
                let at = e.location();
                let err = anyhow!(e);
                if at.is_empty() {
                    err.context(format!("Configuration does not match {}", self.root))
                } else {
                    err.context(format!("Configuration does not match {} at '{}'", self.root, at))
                }
            })?
        };

        if let Value::Record(fields) = &value {
            for (name, v) in fields {
                debug!("  {} = {}", name, serde_json::to_string(v).unwrap_or_default());
            }
        }

        self.value = Some(value);
        info!(root = %self.root, "Configuration loaded");
        Ok(())
    }

    /// Returns the loaded configuration, or the default instance when nothing
    /// has been loaded.
    pub fn value(&self) -> &Value {
        self.value.as_ref().unwrap_or(&self.defaults)
    }

    /// Returns the value at a dotted path (`"package.some_configured_value"`),
    /// or `None` if no such field exists.
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        self.value().get(dotted)
    }

    /// Returns `true` after a successful load.
    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    pub fn root(&self) -> &TypeRef {
        &self.root
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
