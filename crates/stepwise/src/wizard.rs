//! The wizard facade.
//!
//! [`Wizard`] is the single object the surrounding view holds for one open
//! wizard dialog. It owns the navigation engine and, through it, the steps,
//! delegates per-field saves to the active step, and hands the final
//! submission to the caller-supplied submit function.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stepwise::{StepController, Wizard, WizardConfig};
//!
//! struct Metadata;
//! impl StepController for Metadata {
//!     fn is_valid(&self) -> bool { true }
//! }
//!
//! struct Summary;
//! impl StepController for Summary {
//!     fn is_valid(&self) -> bool { true }
//! }
//!
//! let wizard = Wizard::builder()
//!     .with_config(WizardConfig::new().with_name("New event"))
//!     .with_step("metadata", Arc::new(Metadata))
//!     .with_step("summary", Arc::new(Summary))
//!     .with_submit(|wizard| println!("submitting {:?}", wizard.user_entries()))
//!     .build()
//!     .unwrap();
//!
//! wizard.tab_changing().connect(|change| {
//!     println!("{} -> {}", change.old, change.new);
//! });
//!
//! wizard.to_tab("next").unwrap();
//! assert!(wizard.is_last());
//! wizard.submit();
//! ```
//!
//! # Signals
//!
//! - `tab_changing(TabChange)`: emitted before a transition is committed
//! - `tab_changed(String)`: emitted after a transition or restart
//! - `submitted(())`: emitted after the submit function returns

use std::fmt;
use std::sync::{Arc, Weak};

use stepwise_core::{targets, PerfSpan, Signal};

use crate::config::WizardConfig;
use crate::error::{NavigationError, Result, WizardError};
use crate::navigation::{NavigationEngine, TabChange, TabRequest};
use crate::registry::StepRegistry;
use crate::shared::SharedData;
use crate::step::{StepController, StepDescriptor, StepState};
use crate::view::HostView;

/// The caller-supplied function run by [`Wizard::submit`].
pub type SubmitFn = Box<dyn Fn(&Wizard) + Send + Sync>;

/// A multi-step wizard.
///
/// Built with [`Wizard::builder`]. A wizard is meant to live exactly as long
/// as its dialog: build a fresh one each time the dialog opens, or call
/// [`restart`](Self::restart) to reuse one.
pub struct Wizard {
    engine: Arc<NavigationEngine>,
    config: WizardConfig,
    submit: SubmitFn,
    shared_data: Arc<SharedData>,
    /// Signal emitted after the submit function returns.
    pub submitted: Signal<()>,
}

impl Wizard {
    /// Start building a wizard.
    pub fn builder() -> WizardBuilder {
        WizardBuilder::new()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The options the wizard was created with.
    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// The display label, if one was configured.
    pub fn name(&self) -> Option<&str> {
        self.config.name.as_deref()
    }

    /// The final button's label.
    pub fn final_button_label(&self) -> &str {
        self.config.final_button_label()
    }

    // =========================================================================
    // Current State
    // =========================================================================

    /// The active step.
    pub fn current_state(&self) -> &StepDescriptor {
        self.engine.current_step()
    }

    /// The active step's controller.
    pub fn current_state_controller(&self) -> &Arc<dyn StepController> {
        self.current_state().controller()
    }

    /// The active step's name.
    pub fn current_state_name(&self) -> &str {
        self.current_state().name()
    }

    /// The active step's registry index.
    pub fn current_index(&self) -> usize {
        self.engine.current_index()
    }

    /// Look up a step's controller by name.
    pub fn state_controller_by_name(&self, name: &str) -> Option<&Arc<dyn StepController>> {
        self.engine.registry().by_name(name).map(StepDescriptor::controller)
    }

    /// The ordered steps.
    pub fn steps(&self) -> &StepRegistry {
        self.engine.registry()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move to `"previous"`, `"next"`, or a step by name.
    ///
    /// A refused request leaves the wizard untouched and reports why.
    pub fn to_tab(
        &self,
        request: impl Into<TabRequest>,
    ) -> std::result::Result<TabChange, NavigationError> {
        self.engine.to_tab(request.into())
    }

    /// Whether every step before `name` is valid.
    pub fn is_reachable(&self, name: &str) -> bool {
        self.engine.is_reachable(name)
    }

    /// Whether step `name` is valid on its own.
    pub fn is_completed(&self, name: &str) -> bool {
        self.engine.is_completed(name)
    }

    /// Whether every step is valid, hidden ones included.
    ///
    /// Agrees with reachability: when this holds, the last step is reachable
    /// and complete.
    pub fn is_all_completed(&self) -> bool {
        self.engine.registry().iter().all(StepDescriptor::is_valid)
    }

    /// Whether the active step is the last step.
    pub fn is_last(&self) -> bool {
        self.engine.is_last()
    }

    /// Whether the active step is not the first step.
    pub fn has_previous(&self) -> bool {
        self.engine.has_previous()
    }

    /// Show or hide a step in relative navigation.
    pub fn set_step_visible(&self, name: &str, visible: bool) -> bool {
        self.engine.registry().set_visible(name, visible)
    }

    /// Per-step state for rendering tab affordances.
    pub fn step_states(&self) -> Vec<StepState> {
        self.engine.step_states()
    }

    /// Signal emitted before a transition is committed.
    pub fn tab_changing(&self) -> &Signal<TabChange> {
        &self.engine.tab_changing
    }

    /// Signal emitted after a transition is committed or the wizard restarts.
    pub fn tab_changed(&self) -> &Signal<String> {
        &self.engine.tab_changed
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Persist a single field of the active step.
    pub fn save<F>(&self, id: &str, done: F)
    where
        F: FnOnce() + Send + 'static,
    {
        tracing::debug!(
            target: targets::WIZARD,
            step = self.current_state_name(),
            field = id,
            "saving field"
        );
        self.current_state_controller().save(id, Box::new(done));
    }

    /// Run the submit function.
    ///
    /// The wizard never submits on its own; the view calls this once it has
    /// decided every step is complete.
    pub fn submit(&self) {
        tracing::debug!(target: targets::WIZARD, name = ?self.config.name, "submitting wizard");
        (self.submit)(self);
        self.submitted.emit(());
    }

    /// The wizard-scoped shared data bag.
    pub fn shared_data(&self) -> &Arc<SharedData> {
        &self.shared_data
    }

    /// Entries of every visible step that provides some, keyed by step name.
    pub fn user_entries(&self) -> serde_json::Map<String, serde_json::Value> {
        self.engine
            .registry()
            .iter()
            .filter(|step| step.is_visible())
            .filter_map(|step| {
                step.controller()
                    .user_entries()
                    .map(|entries| (step.name().to_string(), entries))
            })
            .collect()
    }

    /// Reset every step and return to the first one.
    ///
    /// Used when a dialog is reopened with the same wizard. Shared data is
    /// cleared; signal connections are kept.
    pub fn restart(&self) {
        let _span = PerfSpan::new("wizard.restart");
        for step in self.engine.registry().iter() {
            step.controller().reset();
        }
        self.shared_data.clear();
        self.engine.rewind();
        tracing::debug!(target: targets::WIZARD, name = ?self.config.name, "wizard restarted");
    }

    /// A read-only handle for step controllers.
    pub fn query(&self) -> WizardQuery {
        WizardQuery {
            engine: Arc::downgrade(&self.engine),
        }
    }
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("config", &self.config)
            .field("steps", self.engine.registry())
            .field("current", &self.current_state_name())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// WizardQuery
// ============================================================================

/// A narrow, read-only view of a wizard, handed to every step controller
/// through [`StepController::attach`].
///
/// The handle does not keep the wizard alive. Once the wizard is dropped,
/// every query reports "nothing" (`None` or `false`).
#[derive(Clone)]
pub struct WizardQuery {
    engine: Weak<NavigationEngine>,
}

impl WizardQuery {
    /// Name of the active step.
    pub fn current_step_name(&self) -> Option<String> {
        let engine = self.engine.upgrade()?;
        Some(engine.current_step().name().to_string())
    }

    /// Whether every step before `name` is valid.
    pub fn is_reachable(&self, name: &str) -> bool {
        self.engine
            .upgrade()
            .is_some_and(|engine| engine.is_reachable(name))
    }

    /// Whether step `name` is valid on its own.
    pub fn is_completed(&self, name: &str) -> bool {
        self.engine
            .upgrade()
            .is_some_and(|engine| engine.is_completed(name))
    }
}

impl fmt::Debug for WizardQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardQuery")
            .field("alive", &(self.engine.strong_count() > 0))
            .finish()
    }
}

// ============================================================================
// WizardBuilder
// ============================================================================

/// Builder for [`Wizard`].
#[derive(Default)]
pub struct WizardBuilder {
    config: WizardConfig,
    steps: Vec<StepDescriptor>,
    submit: Option<SubmitFn>,
    view: Option<Arc<dyn HostView>>,
}

impl WizardBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wizard options.
    pub fn with_config(mut self, config: WizardConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a step.
    pub fn with_step<C>(mut self, name: impl Into<String>, controller: Arc<C>) -> Self
    where
        C: StepController + 'static,
    {
        self.steps.push(StepDescriptor::new(name, controller));
        self
    }

    /// Append steps whose controllers are already type-erased.
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = (S, Arc<dyn StepController>)>,
        S: Into<String>,
    {
        self.steps.extend(
            steps
                .into_iter()
                .map(|(name, controller)| StepDescriptor::new(name, controller)),
        );
        self
    }

    /// Set the submit function.
    pub fn with_submit<F>(mut self, submit: F) -> Self
    where
        F: Fn(&Wizard) + Send + Sync + 'static,
    {
        self.submit = Some(Box::new(submit));
        self
    }

    /// Set the view notified after every transition.
    pub fn with_view<V>(mut self, view: Arc<V>) -> Self
    where
        V: HostView + 'static,
    {
        self.view = Some(view as Arc<dyn HostView>);
        self
    }

    /// Build the wizard and attach every step controller to it.
    pub fn build(self) -> Result<Wizard> {
        let submit = self.submit.ok_or(WizardError::MissingSubmit)?;
        let registry = StepRegistry::new(self.steps)?;

        let wizard = Wizard {
            engine: Arc::new(NavigationEngine::new(registry, self.view)),
            config: self.config,
            submit,
            shared_data: Arc::new(SharedData::new()),
            submitted: Signal::new(),
        };

        let query = wizard.query();
        for step in wizard.engine.registry().iter() {
            step.controller().attach(query.clone());
            step.controller()
                .attach_shared_data(Arc::clone(&wizard.shared_data));
        }

        tracing::debug!(
            target: targets::WIZARD,
            name = ?wizard.config.name,
            action = ?wizard.config.action,
            first = wizard.current_state_name(),
            "wizard built"
        );
        Ok(wizard)
    }
}

static_assertions::assert_impl_all!(Wizard: Send, Sync);
static_assertions::assert_impl_all!(WizardQuery: Send, Sync);
