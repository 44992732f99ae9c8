//! Configuration stores and layered lookup.
//!
//! Settings reach the engine through the read-only [`SettingsStore`]
//! boundary. [`LayeredSettings`] stacks a project store over a workspace
//! store; the project layer only participates when that store itself
//! opts in via [`USE_PROJECT_SETTINGS`]. Compiled-in defaults are not a
//! store: they live in the policy resolver, which never fails.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key a project store must answer `true` for its values to be used.
pub const USE_PROJECT_SETTINGS: &str = "use_project_settings";

/// Read-only key/value provider.
///
/// Implementations answer `None` for keys they do not carry; they never
/// fail and never fall back on each other.
pub trait SettingsStore {
    /// String value for `key`, if present.
    fn string(&self, key: &str) -> Option<String>;

    /// Boolean value for `key`, if present and well-formed.
    fn boolean(&self, key: &str) -> Option<bool>;
}

/// In-memory store, used in tests and by callers that assemble settings
/// programmatically.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder style.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    /// Adds or replaces a value.
    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl SettingsStore for MemoryStore {
    fn string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        let value = self.values.get(key)?;
        if value.eq_ignore_ascii_case("true") {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

/// Errors from loading a settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings file: {path}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file was not valid TOML.
    #[error("failed to parse settings file: {message}")]
    Parse {
        /// Parser message.
        message: String,
    },
}

/// File-backed store over a TOML document.
///
/// Nested tables flatten into dotted keys, so
///
/// ```toml
/// [start]
/// level = "debug"
/// enabled = true
/// ```
///
/// answers `start.level` and `start.enabled`.
#[derive(Debug, Clone, Default)]
pub struct TomlStore {
    values: HashMap<String, toml::Value>,
}

impl TomlStore {
    /// Loads a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the file cannot be read and
    /// [`SettingsError::Parse`] when it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses a TOML document into a store.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for invalid TOML.
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let table: toml::Table = toml::from_str(content).map_err(|e| SettingsError::Parse {
            message: e.to_string(),
        })?;
        let mut values = HashMap::new();
        flatten("", &table, &mut values);
        Ok(Self { values })
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut HashMap<String, toml::Value>) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(nested) => flatten(&full, nested, out),
            other => {
                out.insert(full, other.clone());
            }
        }
    }
}

impl SettingsStore for TomlStore {
    fn string(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            toml::Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            toml::Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Ordered lookup over a project store and a workspace store.
///
/// The first store carrying a value wins. The project store is consulted
/// only when it answers `true` for [`USE_PROJECT_SETTINGS`]; the gate is
/// re-read on every lookup, keeping this a pure function of the stores.
#[derive(Clone, Copy, Default)]
pub struct LayeredSettings<'a> {
    project: Option<&'a dyn SettingsStore>,
    workspace: Option<&'a dyn SettingsStore>,
}

impl<'a> LayeredSettings<'a> {
    /// Creates an empty stack; every lookup answers `None`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the project-scope store.
    #[must_use]
    pub fn with_project(mut self, store: &'a dyn SettingsStore) -> Self {
        self.project = Some(store);
        self
    }

    /// Attaches the workspace-scope store.
    #[must_use]
    pub fn with_workspace(mut self, store: &'a dyn SettingsStore) -> Self {
        self.workspace = Some(store);
        self
    }

    fn sources(&self) -> Vec<&'a dyn SettingsStore> {
        let mut out = Vec::new();
        if let Some(project) = self.project {
            if project.boolean(USE_PROJECT_SETTINGS).unwrap_or(false) {
                out.push(project);
            }
        }
        if let Some(workspace) = self.workspace {
            out.push(workspace);
        }
        out
    }
}

impl SettingsStore for LayeredSettings<'_> {
    fn string(&self, key: &str) -> Option<String> {
        self.sources().into_iter().find_map(|s| s.string(key))
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        self.sources().into_iter().find_map(|s| s.boolean(key))
    }
}
