//! Step descriptors and the step controller capability set.
//!
//! A wizard is an ordered list of named steps. Each step wraps a
//! [`StepController`] that is owned by the surrounding view: it knows whether
//! its own form data is valid, how to persist a single edited field, and
//! whether it wants to be shown at all. The wizard never constructs
//! controllers; it only calls into them.

use std::fmt;
use std::sync::Arc;

use stepwise_core::Property;

use crate::shared::SharedData;
use crate::wizard::WizardQuery;

/// Completion callback handed to [`StepController::save`].
pub type SaveCallback = Box<dyn FnOnce() + Send + 'static>;

/// The capability set every wizard step provides.
///
/// Only [`is_valid`](Self::is_valid) is required. The remaining methods have
/// defaults so that simple steps stay small.
///
/// Methods take `&self`: controllers keep their form state behind their own
/// interior mutability (typically [`Property`] fields), which lets a
/// controller query the wizard from inside any of these callbacks.
pub trait StepController: Send + Sync {
    /// Whether the data entered on this step is complete.
    ///
    /// Called on every navigation attempt and every reachability query, so
    /// it should be a cheap predicate over already-loaded data.
    fn is_valid(&self) -> bool;

    /// Persist a single edited field identified by `id`, then call `done`.
    ///
    /// The default implementation has nothing to persist and completes
    /// immediately.
    fn save(&self, id: &str, done: SaveCallback) {
        let _ = id;
        done();
    }

    /// The initial visibility requested by the controller.
    ///
    /// `None` means "unset" and is normalized to visible when the step is
    /// registered.
    fn visible(&self) -> Option<bool> {
        None
    }

    /// Called on the active step right before the wizard leaves it.
    fn on_exit_step(&self) {}

    /// Receives the read-only wizard handle once, when the wizard is built.
    fn attach(&self, wizard: WizardQuery) {
        let _ = wizard;
    }

    /// Receives the wizard-scoped shared data bag once, when the wizard is
    /// built. Only steps that keep non-serializable UI state (selected files
    /// and the like) need to override this.
    fn attach_shared_data(&self, data: Arc<SharedData>) {
        let _ = data;
    }

    /// Return the step to its pristine state for a fresh run of the wizard.
    fn reset(&self) {}

    /// The values this step contributes to the summary and the final
    /// submission payload.
    fn user_entries(&self) -> Option<serde_json::Value> {
        None
    }
}

/// A named, ordered unit of a wizard.
pub struct StepDescriptor {
    name: String,
    controller: Arc<dyn StepController>,
    visible: Property<bool>,
}

impl StepDescriptor {
    /// Wrap a controller under a name.
    ///
    /// The visibility flag is taken from [`StepController::visible`], and
    /// defaults to `true` when the controller leaves it unset.
    pub fn new(name: impl Into<String>, controller: Arc<dyn StepController>) -> Self {
        let visible = controller.visible().unwrap_or(true);
        Self {
            name: name.into(),
            controller,
            visible: Property::new(visible),
        }
    }

    /// The step's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The step's controller.
    pub fn controller(&self) -> &Arc<dyn StepController> {
        &self.controller
    }

    /// Whether relative navigation stops on this step.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Show or hide the step. Returns `true` if the flag changed.
    pub fn set_visible(&self, visible: bool) -> bool {
        self.visible.set(visible)
    }

    /// Shorthand for the controller's own validity.
    pub fn is_valid(&self) -> bool {
        self.controller.is_valid()
    }
}

impl fmt::Debug for StepDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("name", &self.name)
            .field("visible", &self.is_visible())
            .finish_non_exhaustive()
    }
}

/// A snapshot of one step, for rendering tab affordances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepState {
    /// The step name.
    pub name: String,
    /// Whether the step is shown in relative navigation.
    pub visible: bool,
    /// Whether this is the active step.
    pub current: bool,
    /// Whether every earlier step is valid.
    pub reachable: bool,
    /// Whether the step itself is valid.
    pub completed: bool,
}
