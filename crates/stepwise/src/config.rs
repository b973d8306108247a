//! Wizard construction options.
//!
//! Options can be built in code or loaded from TOML:
//!
//! ```toml
//! name = "EVENTS.EVENTS.NEW.CAPTION"
//! action = "create"
//! final_button_translation = "WIZARD.CREATE_EVENT"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use stepwise_core::targets;

use crate::error::{Result, WizardError};

/// Label of the final button when no override is configured.
pub const DEFAULT_FINAL_BUTTON: &str = "WIZARD.CREATE";

/// Whether the wizard creates a new resource or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardAction {
    /// Creating a new resource.
    #[default]
    Create,
    /// Editing an existing resource.
    Edit,
}

/// Options recognized when a wizard is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Display label of the wizard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Create or edit mode. Informational only.
    pub action: WizardAction,
    /// Override for the final button's label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_button_translation: Option<String>,
}

impl WizardConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display label using builder pattern.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the mode using builder pattern.
    pub fn with_action(mut self, action: WizardAction) -> Self {
        self.action = action;
        self
    }

    /// Set the final button label using builder pattern.
    pub fn with_final_button_translation(mut self, label: impl Into<String>) -> Self {
        self.final_button_translation = Some(label.into());
        self
    }

    /// The final button's label, falling back to [`DEFAULT_FINAL_BUTTON`].
    pub fn final_button_label(&self) -> &str {
        self.final_button_translation
            .as_deref()
            .unwrap_or(DEFAULT_FINAL_BUTTON)
    }

    /// Whether the wizard edits an existing resource.
    pub fn is_edit(&self) -> bool {
        self.action == WizardAction::Edit
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| WizardError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            action = ?config.action,
            "wizard configuration loaded"
        );
        Ok(config)
    }

    /// Serialize the configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
