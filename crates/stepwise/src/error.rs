//! Error types for wizard construction and navigation.

use std::fmt;
use std::path::PathBuf;

/// Result type alias for wizard construction and configuration.
pub type Result<T> = std::result::Result<T, WizardError>;

/// Errors raised while building a wizard or loading its configuration.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// A wizard needs at least one step.
    #[error("A wizard requires at least one step")]
    EmptyRegistry,

    /// Two steps share a name.
    #[error("Duplicate step name '{0}'")]
    DuplicateStep(String),

    /// No submit function was supplied to the builder.
    #[error("A wizard requires a submit function")]
    MissingSubmit,

    /// Wizard configuration could not be parsed.
    #[error("Invalid wizard configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Wizard configuration could not be serialized.
    #[error("Failed to serialize wizard configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration file I/O error.
    #[error("Failed to read wizard configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WizardError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Direction of a relative navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the first step.
    Previous,
    /// Towards the last step.
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Previous => f.write_str("previous"),
            Self::Next => f.write_str("next"),
        }
    }
}

/// Why a navigation request left the wizard where it was.
///
/// Every variant is a refusal, never a failure of the wizard itself: no
/// state changed and no notification fired.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// No step has the requested name.
    #[error("Unknown step '{0}'")]
    UnknownStep(String),

    /// An earlier step is not valid yet.
    #[error("Step '{target}' is not reachable: step '{blocked_by}' is incomplete")]
    NotReachable { target: String, blocked_by: String },

    /// There is no visible step in the requested direction.
    #[error("No visible {0} step")]
    NoVisibleStep(Direction),
}
