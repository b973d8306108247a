//! Step resolution, reachability and transitions.
//!
//! The [`NavigationEngine`] answers three questions for a wizard: where am I,
//! where may I go, and move me there. A step is *reachable* when every step
//! before it (by registry order) reports itself valid. Reachability is
//! recomputed on every query, so it always reflects the latest user input.
//!
//! The engine owns its [`StepRegistry`], so the current index always refers
//! to a step of that registry.
//!
//! # Transitions
//!
//! [`NavigationEngine::to_tab`] accepts a [`TabRequest`]: the previous or
//! next visible step, or a step by name. A committed transition runs these
//! side effects, in order:
//!
//! 1. `tab_changing` is emitted with the old and new step
//! 2. the old step's [`on_exit_step`](crate::StepController::on_exit_step) runs
//! 3. the current step is updated
//! 4. the host view activates the new tab and focuses its first input
//! 5. `tab_changed` is emitted with the new step's name
//!
//! A refused request returns a [`NavigationError`] before any of these run.

use std::fmt;
use std::sync::Arc;

use stepwise_core::{targets, Property, Signal};

use crate::error::{Direction, NavigationError};
use crate::registry::StepRegistry;
use crate::step::{StepDescriptor, StepState};
use crate::view::HostView;

/// Literal token for the previous visible step.
pub const PREVIOUS: &str = "previous";

/// Literal token for the next visible step.
pub const NEXT: &str = "next";

/// The target of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabRequest {
    /// The nearest visible step before the current one.
    Previous,
    /// The nearest visible step after the current one.
    Next,
    /// A step by exact name, visible or not.
    Named(String),
}

impl From<&str> for TabRequest {
    fn from(value: &str) -> Self {
        match value {
            PREVIOUS => Self::Previous,
            NEXT => Self::Next,
            name => Self::Named(name.to_string()),
        }
    }
}

impl From<String> for TabRequest {
    fn from(value: String) -> Self {
        match value.as_str() {
            PREVIOUS => Self::Previous,
            NEXT => Self::Next,
            _ => Self::Named(value),
        }
    }
}

impl fmt::Display for TabRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Previous => f.write_str(PREVIOUS),
            Self::Next => f.write_str(NEXT),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// A committed transition between two steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabChange {
    /// Name of the step that was active.
    pub old: String,
    /// Registry index of the step that was active.
    pub old_index: usize,
    /// Name of the step that is now active.
    pub new: String,
    /// Registry index of the step that is now active.
    pub new_index: usize,
}

/// Tracks the active step and moves between steps.
pub struct NavigationEngine {
    registry: StepRegistry,
    current: Property<usize>,
    view: Option<Arc<dyn HostView>>,
    /// Emitted before a transition is committed.
    pub tab_changing: Signal<TabChange>,
    /// Emitted after a transition is committed, with the new step's name.
    pub tab_changed: Signal<String>,
}

impl NavigationEngine {
    /// Create an engine over `registry`, positioned on the first step.
    pub fn new(registry: StepRegistry, view: Option<Arc<dyn HostView>>) -> Self {
        Self {
            registry,
            current: Property::new(0),
            view,
            tab_changing: Signal::new(),
            tab_changed: Signal::new(),
        }
    }

    /// The steps this engine navigates.
    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Index of the active step.
    pub fn current_index(&self) -> usize {
        self.current.get()
    }

    /// The active step.
    pub fn current_step(&self) -> &StepDescriptor {
        self.registry.step(self.current_index())
    }

    /// Whether the active step is the last one in the registry.
    ///
    /// Hidden trailing steps still count.
    pub fn is_last(&self) -> bool {
        self.current_index() == self.registry.last_index()
    }

    /// Whether the active step is not the first one.
    pub fn has_previous(&self) -> bool {
        self.current_index() > 0
    }

    /// Whether the step `name` exists and every step before it is valid.
    pub fn is_reachable(&self, name: &str) -> bool {
        self.registry
            .index_of(name)
            .is_some_and(|index| first_invalid_before(&self.registry, index).is_none())
    }

    /// Whether the step `name` exists and is valid on its own.
    pub fn is_completed(&self, name: &str) -> bool {
        self.registry.by_name(name).is_some_and(|step| step.is_valid())
    }

    /// Resolve a request to a registry index without moving.
    pub fn resolve(&self, request: &TabRequest) -> Result<usize, NavigationError> {
        let registry = &self.registry;
        let current = self.current_index();
        match request {
            TabRequest::Previous => (0..current)
                .rev()
                .find(|&index| registry.step(index).is_visible())
                .ok_or(NavigationError::NoVisibleStep(Direction::Previous)),
            TabRequest::Next => (current + 1..registry.len())
                .find(|&index| registry.step(index).is_visible())
                .ok_or(NavigationError::NoVisibleStep(Direction::Next)),
            TabRequest::Named(name) => registry
                .index_of(name)
                .ok_or_else(|| NavigationError::UnknownStep(name.clone())),
        }
    }

    /// Move to the requested step if it is reachable.
    #[tracing::instrument(
        skip(self, request),
        target = "stepwise::navigation",
        level = "debug",
        fields(request = %request)
    )]
    pub fn to_tab(&self, request: TabRequest) -> Result<TabChange, NavigationError> {
        let registry = &self.registry;
        let target = self.resolve(&request).inspect_err(|err| {
            tracing::debug!(target: targets::NAVIGATION, %err, "navigation request refused");
        })?;
        let target_step = registry.step(target);

        if let Some(blocked_by) = first_invalid_before(registry, target) {
            let err = NavigationError::NotReachable {
                target: target_step.name().to_string(),
                blocked_by: blocked_by.to_string(),
            };
            tracing::debug!(target: targets::NAVIGATION, %err, "navigation request refused");
            return Err(err);
        }

        let old_index = self.current_index();
        let old_step = registry.step(old_index);
        let change = TabChange {
            old: old_step.name().to_string(),
            old_index,
            new: target_step.name().to_string(),
            new_index: target,
        };

        self.tab_changing.emit(change.clone());
        old_step.controller().on_exit_step();
        self.current.set_silent(target);

        if let Some(view) = &self.view {
            view.activate_tab(&change.new);
            view.focus_first_input(&change.new);
        }
        self.tab_changed.emit(change.new.clone());

        tracing::debug!(
            target: targets::NAVIGATION,
            from = %change.old,
            to = %change.new,
            "step changed"
        );
        Ok(change)
    }

    /// Return to the first step without running transition side effects
    /// other than the view activation and `tab_changed`.
    pub(crate) fn rewind(&self) {
        self.current.set_silent(0);
        let first = self.registry.step(0).name();
        if let Some(view) = &self.view {
            view.activate_tab(first);
        }
        self.tab_changed.emit(first.to_string());
    }

    /// Per-step state for rendering tab affordances.
    pub fn step_states(&self) -> Vec<StepState> {
        let current = self.current_index();
        let mut all_valid_so_far = true;
        self.registry
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let completed = step.is_valid();
                let state = StepState {
                    name: step.name().to_string(),
                    visible: step.is_visible(),
                    current: index == current,
                    reachable: all_valid_so_far,
                    completed,
                };
                all_valid_so_far &= completed;
                state
            })
            .collect()
    }
}

impl fmt::Debug for NavigationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationEngine")
            .field("steps", &self.registry)
            .field("current", &self.current_index())
            .field("has_view", &self.view.is_some())
            .finish_non_exhaustive()
    }
}

/// The first step before `index` that is not valid, scanning in order.
fn first_invalid_before(registry: &StepRegistry, index: usize) -> Option<&str> {
    registry
        .iter()
        .take(index)
        .find(|step| !step.is_valid())
        .map(|step| step.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepController;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct TestStep {
        valid: AtomicBool,
        visible: Option<bool>,
        exits: AtomicUsize,
    }

    impl TestStep {
        fn new(valid: bool) -> Arc<Self> {
            Arc::new(Self {
                valid: AtomicBool::new(valid),
                visible: None,
                exits: AtomicUsize::new(0),
            })
        }

        fn hidden() -> Arc<Self> {
            Arc::new(Self {
                valid: AtomicBool::new(true),
                visible: Some(false),
                exits: AtomicUsize::new(0),
            })
        }
    }

    impl StepController for TestStep {
        fn is_valid(&self) -> bool {
            self.valid.load(Ordering::SeqCst)
        }

        fn visible(&self) -> Option<bool> {
            self.visible
        }

        fn on_exit_step(&self) {
            self.exits.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct RecordingView {
        calls: Mutex<Vec<String>>,
    }

    impl HostView for RecordingView {
        fn activate_tab(&self, name: &str) {
            self.calls.lock().push(format!("activate:{name}"));
        }

        fn focus_first_input(&self, name: &str) {
            self.calls.lock().push(format!("focus:{name}"));
        }
    }

    fn engine_over(
        steps: Vec<(&str, Arc<TestStep>)>,
        view: Option<Arc<RecordingView>>,
    ) -> NavigationEngine {
        let registry = StepRegistry::new(
            steps
                .into_iter()
                .map(|(name, step)| StepDescriptor::new(name, step))
                .collect(),
        )
        .unwrap();
        NavigationEngine::new(registry, view.map(|v| v as Arc<dyn HostView>))
    }

    #[test]
    fn test_tab_request_parsing() {
        assert_eq!(TabRequest::from("previous"), TabRequest::Previous);
        assert_eq!(TabRequest::from("next"), TabRequest::Next);
        assert_eq!(
            TabRequest::from("metadata"),
            TabRequest::Named("metadata".into())
        );
        assert_eq!(TabRequest::from(String::from("next")), TabRequest::Next);
        assert_eq!(TabRequest::Named("access".into()).to_string(), "access");
    }

    #[test]
    fn test_initial_position() {
        let engine = engine_over(
            vec![("a", TestStep::new(true)), ("b", TestStep::new(true))],
            None,
        );
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.current_step().name(), "a");
        assert!(!engine.has_previous());
        assert!(!engine.is_last());
    }

    #[test]
    fn test_next_and_previous() {
        let engine = engine_over(
            vec![
                ("a", TestStep::new(true)),
                ("b", TestStep::new(true)),
                ("c", TestStep::new(true)),
            ],
            None,
        );

        let change = engine.to_tab(TabRequest::Next).unwrap();
        assert_eq!((change.old.as_str(), change.new.as_str()), ("a", "b"));
        assert_eq!((change.old_index, change.new_index), (0, 1));

        engine.to_tab(TabRequest::Next).unwrap();
        assert!(engine.is_last());
        assert_eq!(
            engine.to_tab(TabRequest::Next),
            Err(NavigationError::NoVisibleStep(Direction::Next))
        );

        engine.to_tab(TabRequest::Previous).unwrap();
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn test_current_index_stays_within_own_steps() {
        let engine = engine_over(
            vec![
                ("a", TestStep::new(true)),
                ("b", TestStep::new(true)),
                ("c", TestStep::new(true)),
            ],
            None,
        );

        engine.to_tab(TabRequest::from("c")).unwrap();
        assert_eq!(engine.registry().len(), 3);
        assert_eq!(engine.current_step().name(), "c");
        assert!(engine.is_last());

        let change = engine.to_tab(TabRequest::Previous).unwrap();
        assert_eq!(change.new, "b");
        assert_eq!(engine.step_states().len(), 3);
        assert!(engine.step_states()[1].current);
    }

    #[test]
    fn test_relative_resolution_is_bounded() {
        let engine = engine_over(
            vec![
                ("a", TestStep::new(true)),
                ("b", TestStep::hidden()),
                ("c", TestStep::hidden()),
            ],
            None,
        );

        assert_eq!(
            engine.resolve(&TabRequest::Previous),
            Err(NavigationError::NoVisibleStep(Direction::Previous))
        );
        assert_eq!(
            engine.resolve(&TabRequest::Next),
            Err(NavigationError::NoVisibleStep(Direction::Next))
        );
    }

    #[test]
    fn test_previous_skips_hidden_steps() {
        let engine = engine_over(
            vec![
                ("a", TestStep::new(true)),
                ("b", TestStep::hidden()),
                ("c", TestStep::new(true)),
            ],
            None,
        );

        engine.to_tab(TabRequest::from("c")).unwrap();
        let change = engine.to_tab(TabRequest::Previous).unwrap();
        assert_eq!(change.new, "a");
    }

    #[test]
    fn test_named_target_may_be_hidden() {
        let engine = engine_over(
            vec![("a", TestStep::new(true)), ("b", TestStep::hidden())],
            None,
        );
        assert_eq!(engine.to_tab(TabRequest::from("b")).unwrap().new, "b");
    }

    #[test]
    fn test_reachability_reports_first_blocker() {
        let engine = engine_over(
            vec![
                ("a", TestStep::new(true)),
                ("b", TestStep::new(false)),
                ("c", TestStep::new(false)),
                ("d", TestStep::new(true)),
            ],
            None,
        );

        assert!(engine.is_reachable("a"));
        assert!(engine.is_reachable("b"));
        assert!(!engine.is_reachable("c"));
        assert!(!engine.is_reachable("missing"));
        assert_eq!(
            engine.to_tab(TabRequest::from("d")),
            Err(NavigationError::NotReachable {
                target: "d".into(),
                blocked_by: "b".into()
            })
        );
    }

    #[test]
    fn test_is_completed_ignores_reachability() {
        let engine = engine_over(
            vec![("a", TestStep::new(false)), ("b", TestStep::new(true))],
            None,
        );
        assert!(engine.is_completed("b"));
        assert!(!engine.is_reachable("b"));
        assert!(!engine.is_completed("a"));
        assert!(!engine.is_completed("missing"));
    }

    #[test]
    fn test_side_effect_order() {
        let first = TestStep::new(true);
        let view = Arc::new(RecordingView::default());
        let engine = engine_over(
            vec![("a", first.clone()), ("b", TestStep::new(true))],
            Some(view.clone()),
        );
        let log = Arc::new(Mutex::new(Vec::new()));

        let log_clone = log.clone();
        let first_clone = first.clone();
        engine.tab_changing.connect(move |change| {
            // on_exit_step has not run yet.
            assert_eq!(first_clone.exits.load(Ordering::SeqCst), 0);
            log_clone.lock().push(format!("changing:{}->{}", change.old, change.new));
        });
        let log_clone = log.clone();
        engine.tab_changed.connect(move |name| {
            log_clone.lock().push(format!("changed:{name}"));
        });

        engine.to_tab(TabRequest::from("b")).unwrap();

        assert_eq!(first.exits.load(Ordering::SeqCst), 1);
        assert_eq!(*log.lock(), vec!["changing:a->b", "changed:b"]);
        assert_eq!(*view.calls.lock(), vec!["activate:b", "focus:b"]);
    }

    #[test]
    fn test_refusal_has_no_side_effects() {
        let first = TestStep::new(false);
        let view = Arc::new(RecordingView::default());
        let engine = engine_over(
            vec![("a", first.clone()), ("b", TestStep::new(true))],
            Some(view.clone()),
        );
        let emitted = Arc::new(AtomicUsize::new(0));

        let emitted_clone = emitted.clone();
        engine.tab_changing.connect(move |_| {
            emitted_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(engine.to_tab(TabRequest::from("b")).is_err());
        assert!(engine.to_tab(TabRequest::from("zzz")).is_err());
        assert!(engine.to_tab(TabRequest::Previous).is_err());

        assert_eq!(engine.current_index(), 0);
        assert_eq!(emitted.load(Ordering::SeqCst), 0);
        assert_eq!(first.exits.load(Ordering::SeqCst), 0);
        assert!(view.calls.lock().is_empty());
    }

    #[test]
    fn test_step_states() {
        let engine = engine_over(
            vec![
                ("a", TestStep::new(true)),
                ("b", TestStep::new(false)),
                ("c", TestStep::hidden()),
            ],
            None,
        );
        let states = engine.step_states();

        assert_eq!(
            states
                .iter()
                .map(|s| (s.name.as_str(), s.current, s.reachable, s.completed, s.visible))
                .collect::<Vec<_>>(),
            vec![
                ("a", true, true, true, true),
                ("b", false, true, false, true),
                ("c", false, false, true, false),
            ]
        );
    }

    #[test]
    fn test_rewind() {
        let view = Arc::new(RecordingView::default());
        let engine = engine_over(
            vec![("a", TestStep::new(true)), ("b", TestStep::new(true))],
            Some(view.clone()),
        );

        engine.to_tab(TabRequest::Next).unwrap();
        engine.rewind();

        assert_eq!(engine.current_index(), 0);
        assert_eq!(view.calls.lock().last().map(String::as_str), Some("activate:a"));
    }
}
