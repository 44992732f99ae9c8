//! Logging-framework templates, the built-in registry, and profiles.
//!
//! A [`LoggerTemplate`] describes how one framework spells its logger
//! declaration and statements, as raw template strings with `${name}`
//! placeholders. The registry stores them raw; substitution happens in
//! the synthesizer. A [`Profile`] overlays individual template fields,
//! with built-in profiles rejecting writes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The closed set of supported logging frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Framework {
    /// SLF4J facade, the default.
    Slf4j,
    /// Log4j 2.
    Log4j2,
    /// `java.util.logging`.
    Jul,
}

impl Framework {
    /// Parses a framework id, case-insensitively. Unknown ids are `None`.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_ascii_uppercase().as_str() {
            "SLF4J" => Some(Self::Slf4j),
            "LOG4J2" => Some(Self::Log4j2),
            "JUL" => Some(Self::Jul),
            _ => None,
        }
    }

    /// Canonical id of this framework.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Slf4j => "SLF4J",
            Self::Log4j2 => "LOG4J2",
            Self::Jul => "JUL",
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Log level, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Finest detail.
    Trace,
    /// Diagnostic detail, the default for entry/exit statements.
    Debug,
    /// Operational messages.
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures, the default for catch statements.
    Error,
}

impl Level {
    /// Parses a level name, case-insensitively. Unknown names are `None`.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Lowercase name as used in configuration keys and values.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Logger method invoked for this level under `framework`.
    #[must_use]
    pub fn method_name(self, framework: Framework) -> &'static str {
        match framework {
            Framework::Slf4j | Framework::Log4j2 => self.as_str(),
            Framework::Jul => match self {
                Self::Trace => "finer",
                Self::Debug => "fine",
                Self::Info => "info",
                Self::Warn => "warning",
                Self::Error => "severe",
            },
        }
    }

    /// `java.util.logging.Level` constant for this level.
    #[must_use]
    pub fn jul_constant(self) -> &'static str {
        match self {
            Self::Trace => "FINER",
            Self::Debug => "FINE",
            Self::Info => "INFO",
            Self::Warn => "WARNING",
            Self::Error => "SEVERE",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw template bundle for one framework.
///
/// Template strings carry `${name}` placeholders and are never
/// substituted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerTemplate {
    /// Owning framework.
    pub framework: Framework,
    /// Simple name of the logger type.
    pub logger_type: String,
    /// Class whose factory method produces a logger.
    pub factory_class: String,
    /// Factory method name.
    pub factory_method: String,
    /// Field-declaration template.
    pub declaration: String,
    /// Plain statement template.
    pub statement: String,
    /// Statement template carrying a throwable argument.
    pub statement_with_throwable: String,
    /// Argument placeholder token inside message literals.
    pub placeholder: String,
    /// Fully qualified imports the rendered code needs.
    pub imports: Vec<String>,
}

fn slf4j_template() -> LoggerTemplate {
    LoggerTemplate {
        framework: Framework::Slf4j,
        logger_type: "Logger".to_string(),
        factory_class: "LoggerFactory".to_string(),
        factory_method: "getLogger".to_string(),
        declaration:
            "private static final ${type} ${logger} = ${factory}.${factoryMethod}(${class}.class);"
                .to_string(),
        statement: "${logger}.${level}(${message});".to_string(),
        statement_with_throwable: "${logger}.${level}(${message}, ${throwable});".to_string(),
        placeholder: "{}".to_string(),
        imports: vec![
            "org.slf4j.Logger".to_string(),
            "org.slf4j.LoggerFactory".to_string(),
        ],
    }
}

fn log4j2_template() -> LoggerTemplate {
    LoggerTemplate {
        framework: Framework::Log4j2,
        logger_type: "Logger".to_string(),
        factory_class: "LogManager".to_string(),
        factory_method: "getLogger".to_string(),
        declaration:
            "private static final ${type} ${logger} = ${factory}.${factoryMethod}(${class}.class);"
                .to_string(),
        statement: "${logger}.${level}(${message});".to_string(),
        statement_with_throwable: "${logger}.${level}(${message}, ${throwable});".to_string(),
        placeholder: "{}".to_string(),
        imports: vec![
            "org.apache.logging.log4j.LogManager".to_string(),
            "org.apache.logging.log4j.Logger".to_string(),
        ],
    }
}

fn jul_template() -> LoggerTemplate {
    LoggerTemplate {
        framework: Framework::Jul,
        logger_type: "Logger".to_string(),
        factory_class: "Logger".to_string(),
        factory_method: "getLogger".to_string(),
        declaration:
            "private static final ${type} ${logger} = ${factory}.${factoryMethod}(${class}.class.getName());"
                .to_string(),
        statement: "${logger}.${level}(${message});".to_string(),
        statement_with_throwable:
            "${logger}.log(Level.${constant}, ${message}, ${throwable});".to_string(),
        placeholder: "{0}".to_string(),
        imports: vec![
            "java.util.logging.Level".to_string(),
            "java.util.logging.Logger".to_string(),
        ],
    }
}

/// The built-in templates, one per framework.
///
/// Lookups are total and deterministic: the same framework always yields
/// identical content.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    slf4j: LoggerTemplate,
    log4j2: LoggerTemplate,
    jul: LoggerTemplate,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self {
            slf4j: slf4j_template(),
            log4j2: log4j2_template(),
            jul: jul_template(),
        }
    }
}

impl TemplateRegistry {
    /// Creates the registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The template for `framework`.
    #[must_use]
    pub fn get(&self, framework: Framework) -> &LoggerTemplate {
        match framework {
            Framework::Slf4j => &self.slf4j,
            Framework::Log4j2 => &self.log4j2,
            Framework::Jul => &self.jul,
        }
    }

    /// String-keyed lookup; `None` for an unrecognized id.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&LoggerTemplate> {
        Framework::from_id(id).map(|framework| self.get(framework))
    }

    /// The recognized framework ids, in stable order.
    #[must_use]
    pub fn framework_ids() -> [&'static str; 3] {
        [
            Framework::Slf4j.id(),
            Framework::Log4j2.id(),
            Framework::Jul.id(),
        ]
    }

    /// The built-in profile for `framework`: a read-only snapshot of the
    /// template's overridable fields.
    #[must_use]
    pub fn builtin_profile(&self, framework: Framework) -> Profile {
        let template = self.get(framework);
        let mut profile = Profile {
            name: framework.id().to_ascii_lowercase(),
            builtin: true,
            entries: Vec::new(),
        };
        profile.insert_raw("logger_type", &template.logger_type);
        profile.insert_raw("factory_class", &template.factory_class);
        profile.insert_raw("factory_method", &template.factory_method);
        profile.insert_raw("declaration", &template.declaration);
        profile.insert_raw("statement", &template.statement);
        profile.insert_raw("statement_with_throwable", &template.statement_with_throwable);
        profile.insert_raw("placeholder", &template.placeholder);
        profile
    }
}

/// Errors from profile mutation and file handling.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// A write addressed a built-in profile.
    #[error("profile '{name}' is built-in and read-only")]
    BuiltinReadOnly {
        /// Name of the rejected profile.
        name: String,
    },

    /// A profile file could not be read or written.
    #[error("failed to access profile file: {path}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A profile file was not valid TOML.
    #[error("failed to parse profile file: {message}")]
    Parse {
        /// Parser message.
        message: String,
    },
}

/// On-disk shape of a user profile.
#[derive(Debug, Serialize, Deserialize)]
struct ProfileFile {
    name: String,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// A named key→value overlay for template fields.
///
/// Entries keep insertion order; setting an existing key updates it in
/// place. Built-in profiles reject every write and keep their stored
/// values unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    builtin: bool,
    entries: Vec<(String, String)>,
}

impl Profile {
    /// Creates an empty, writable user profile.
    #[must_use]
    pub fn user(name: &str) -> Self {
        Self {
            name: name.to_string(),
            builtin: false,
            entries: Vec::new(),
        }
    }

    /// The profile name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true for a read-only built-in profile.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// Looks up an override value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an override value.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::BuiltinReadOnly`] on a built-in profile;
    /// the stored value is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ProfileError> {
        if self.builtin {
            return Err(ProfileError::BuiltinReadOnly {
                name: self.name.clone(),
            });
        }
        self.insert_raw(key, value);
        Ok(())
    }

    fn insert_raw(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }

    /// Iterates `(key, value)` entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Loads a user profile from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Io`] when the file cannot be read and
    /// [`ProfileError::Parse`] when it is not a valid profile document.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ProfileFile = toml::from_str(&content).map_err(|e| ProfileError::Parse {
            message: e.to_string(),
        })?;
        let mut profile = Self::user(&file.name);
        for (key, value) in &file.values {
            profile.insert_raw(key, value);
        }
        Ok(profile)
    }

    /// Writes the profile to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Io`] when the file cannot be written and
    /// [`ProfileError::Parse`] when serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        let file = ProfileFile {
            name: self.name.clone(),
            values: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        let content = toml::to_string_pretty(&file).map_err(|e| ProfileError::Parse {
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A template with profile overrides applied.
///
/// Every field falls back to the built-in value when the profile has no
/// entry for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    /// Owning framework.
    pub framework: Framework,
    /// Simple name of the logger type.
    pub logger_type: String,
    /// Class whose factory method produces a logger.
    pub factory_class: String,
    /// Factory method name.
    pub factory_method: String,
    /// Field-declaration template.
    pub declaration: String,
    /// Plain statement template.
    pub statement: String,
    /// Statement template carrying a throwable argument.
    pub statement_with_throwable: String,
    /// Argument placeholder token inside message literals.
    pub placeholder: String,
    /// Fully qualified imports the rendered code needs.
    pub imports: Vec<String>,
}

impl ResolvedTemplate {
    /// Overlays `profile` (when given) on the built-in `template`.
    #[must_use]
    pub fn overlay(template: &LoggerTemplate, profile: Option<&Profile>) -> Self {
        let field = |key: &str, fallback: &str| -> String {
            profile
                .and_then(|p| p.get(key))
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            framework: template.framework,
            logger_type: field("logger_type", &template.logger_type),
            factory_class: field("factory_class", &template.factory_class),
            factory_method: field("factory_method", &template.factory_method),
            declaration: field("declaration", &template.declaration),
            statement: field("statement", &template.statement),
            statement_with_throwable: field(
                "statement_with_throwable",
                &template.statement_with_throwable,
            ),
            placeholder: field("placeholder", &template.placeholder),
            imports: template.imports.clone(),
        }
    }
}
