//! Multi-step wizard navigation.
//!
//! stepwise drives a modal, multi-step form through an ordered sequence of
//! named steps and keeps the user from jumping ahead of steps whose data is
//! incomplete.
//!
//! - [`StepController`]: the capability set each step implements
//! - [`StepRegistry`]: the ordered, uniquely named steps of one wizard
//! - [`NavigationEngine`]: resolution, reachability and transitions
//! - [`Wizard`]: the facade the surrounding view holds
//! - [`WizardQuery`]: the read-only handle every step receives
//! - [`WizardConfig`]: construction options, loadable from TOML
//!
//! Navigation requests never panic and never partially apply: a request is
//! either committed with all of its side effects, or refused with a
//! [`NavigationError`] that says why.

mod config;
mod error;
pub mod navigation;
mod registry;
mod shared;
mod step;
mod view;
mod wizard;

pub use config::{WizardAction, WizardConfig, DEFAULT_FINAL_BUTTON};
pub use error::{Direction, NavigationError, Result, WizardError};
pub use navigation::{NavigationEngine, TabChange, TabRequest};
pub use registry::StepRegistry;
pub use shared::SharedData;
pub use step::{SaveCallback, StepController, StepDescriptor, StepState};
pub use view::HostView;
pub use wizard::{SubmitFn, Wizard, WizardBuilder, WizardQuery};

pub use stepwise_core::{ConnectionId, Signal};
