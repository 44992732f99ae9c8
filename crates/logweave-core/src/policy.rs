//! Per-position logging policies and their resolution from settings.
//!
//! A [`PositionPolicy`] bundles everything the synthesizer needs to know
//! about one logical position: whether it is enabled, at which level it
//! logs, the event message, which method shapes to skip, and what extra
//! content to include. [`resolve`] is total: any key the stores do not
//! answer falls back to the compiled-in defaults, so policy resolution
//! never fails and never logs.

use serde::{Deserialize, Serialize};

use crate::settings::SettingsStore;
use crate::template::{Framework, Level};
use crate::tree::{self, NodeId, SyntaxTree};

/// The logical positions a statement can be synthesized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// First statement of a method body.
    Start,
    /// Last statement of a method body.
    End,
    /// Inside a catch handler.
    Catch,
    /// Before a return statement.
    Return,
    /// Anywhere else, and the fallback for unknown position ids.
    Other,
}

impl Position {
    /// All positions, in defaults-table order.
    pub const ALL: [Self; 5] = [Self::Start, Self::End, Self::Catch, Self::Return, Self::Other];

    /// Parses a position id, falling back to [`Position::Other`] for
    /// anything unrecognized.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "end" => Self::End,
            "catch" => Self::Catch,
            "return" => Self::Return,
            _ => Self::Other,
        }
    }

    /// Lowercase settings-key prefix for this position.
    #[must_use]
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Catch => "catch",
            Self::Return => "return",
            Self::Other => "other",
        }
    }

    fn key(self, attribute: &str) -> String {
        format!("{}.{attribute}", self.key_prefix())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key_prefix())
    }
}

/// Method shapes a position declines to instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkipRules {
    /// Skip `getX()`/`isX()` accessors.
    pub getters: bool,
    /// Skip `setX(v)` mutators.
    pub setters: bool,
    /// Skip constructors.
    pub constructors: bool,
    /// Skip `toString()` overrides.
    pub to_string: bool,
    /// Skip methods with an empty or missing body.
    pub empty_methods: bool,
}

/// Extra content folded into a synthesized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IncludeFlags {
    /// Append the method signature to entry messages.
    pub signature: bool,
    /// Append parameter names to entry messages.
    pub parameter_names: bool,
    /// Bind parameter values as statement arguments.
    pub parameter_values: bool,
    /// Bind the returned value on exit messages.
    pub return_value: bool,
    /// Bind the caught exception variable on catch statements.
    pub exception: bool,
}

/// Resolved logging policy for one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionPolicy {
    /// The position this policy governs.
    pub position: Position,
    /// Whether statements are synthesized for this position at all.
    pub enabled: bool,
    /// Level the synthesized statement logs at.
    pub level: Level,
    /// Event word or message text.
    pub message: String,
    /// Method shapes to decline.
    pub skip: SkipRules,
    /// Extra content to include.
    pub include: IncludeFlags,
}

impl PositionPolicy {
    /// The compiled-in policy for `position`.
    #[must_use]
    pub fn default_for(position: Position) -> Self {
        let (enabled, level, message) = match position {
            Position::Start => (true, Level::Debug, "start"),
            Position::End => (true, Level::Debug, "end"),
            Position::Catch => (true, Level::Error, "exception"),
            Position::Return => (false, Level::Debug, "return"),
            Position::Other => (false, Level::Debug, ""),
        };
        Self {
            position,
            enabled,
            level,
            message: message.to_string(),
            skip: SkipRules::default(),
            include: IncludeFlags {
                exception: position == Position::Catch,
                ..IncludeFlags::default()
            },
        }
    }
}

/// Resolves the policy for `position` from `settings`.
///
/// Every attribute the stores do not answer keeps its compiled-in
/// default; an unparseable level string also falls back.
#[must_use]
pub fn resolve(position: Position, settings: &dyn SettingsStore) -> PositionPolicy {
    let defaults = PositionPolicy::default_for(position);
    let flag = |attribute: &str, fallback: bool| -> bool {
        settings
            .boolean(&position.key(attribute))
            .unwrap_or(fallback)
    };

    PositionPolicy {
        position,
        enabled: flag("enabled", defaults.enabled),
        level: settings
            .string(&position.key("level"))
            .and_then(|id| Level::from_id(&id))
            .unwrap_or(defaults.level),
        message: settings
            .string(&position.key("message"))
            .unwrap_or(defaults.message),
        skip: SkipRules {
            getters: flag("skip.getters", false),
            setters: flag("skip.setters", false),
            constructors: flag("skip.constructors", false),
            to_string: flag("skip.tostring", false),
            empty_methods: flag("skip.empty", false),
        },
        include: IncludeFlags {
            signature: flag("include.signature", false),
            parameter_names: flag("include.parameter_names", false),
            parameter_values: flag("include.parameter_values", false),
            return_value: flag("include.return_value", false),
            exception: flag("include.exception", defaults.include.exception),
        },
    }
}

/// Configured logger field name; defaults to `logger`.
#[must_use]
pub fn logger_name(settings: &dyn SettingsStore) -> String {
    settings
        .string("logger.name")
        .unwrap_or_else(|| "logger".to_string())
}

/// Configured framework; an absent or unrecognized id falls back to
/// SLF4J rather than failing the operation.
#[must_use]
pub fn framework(settings: &dyn SettingsStore) -> Framework {
    settings
        .string("framework")
        .and_then(|id| Framework::from_id(&id))
        .unwrap_or(Framework::Slf4j)
}

/// Configured profile name, if any.
#[must_use]
pub fn profile_name(settings: &dyn SettingsStore) -> Option<String> {
    settings.string("profile")
}

/// Whether `method` should receive a statement under `policy`.
///
/// A disabled policy is never eligible; an enabled one declines methods
/// matched by any selected skip rule.
#[must_use]
pub fn eligible(policy: &PositionPolicy, syntax: &SyntaxTree, method: NodeId) -> bool {
    if !policy.enabled {
        return false;
    }
    let skip = &policy.skip;
    let skipped = (skip.getters && tree::is_getter(syntax, method))
        || (skip.setters && tree::is_setter(syntax, method))
        || (skip.constructors && tree::is_constructor(syntax, method))
        || (skip.to_string && tree::is_to_string(syntax, method))
        || (skip.empty_methods && tree::is_empty_method(syntax, method));
    !skipped
}
