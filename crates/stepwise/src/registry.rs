//! The ordered collection of steps for one wizard.

use std::collections::HashSet;

use stepwise_core::targets;

use crate::error::{Result, WizardError};
use crate::step::StepDescriptor;

/// An ordered, non-empty sequence of uniquely named steps.
///
/// The order is fixed once the registry is built; only the per-step
/// visibility flags may change afterwards.
#[derive(Debug)]
pub struct StepRegistry {
    steps: Vec<StepDescriptor>,
}

impl StepRegistry {
    /// Build a registry, rejecting empty input and duplicate names.
    pub fn new(steps: Vec<StepDescriptor>) -> Result<Self> {
        if steps.is_empty() {
            return Err(WizardError::EmptyRegistry);
        }

        let mut seen = HashSet::with_capacity(steps.len());
        for step in &steps {
            if !seen.insert(step.name()) {
                return Err(WizardError::DuplicateStep(step.name().to_string()));
            }
        }

        tracing::debug!(
            target: targets::WIZARD,
            step_count = steps.len(),
            hidden = steps.iter().filter(|s| !s.is_visible()).count(),
            "step registry built"
        );
        Ok(Self { steps })
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; a registry holds at least one step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The index of the last step.
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// The step at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&StepDescriptor> {
        self.steps.get(index)
    }

    /// The step at an index known to be in range.
    pub(crate) fn step(&self, index: usize) -> &StepDescriptor {
        &self.steps[index]
    }

    /// Find a step by exact name.
    pub fn by_name(&self, name: &str) -> Option<&StepDescriptor> {
        self.steps.iter().find(|s| s.name() == name)
    }

    /// The index of a step by exact name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name() == name)
    }

    /// Step names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(StepDescriptor::name)
    }

    /// Iterate steps in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &StepDescriptor> {
        self.steps.iter()
    }

    /// Show or hide a step by name.
    ///
    /// Returns `true` if the step exists and its flag changed.
    pub fn set_visible(&self, name: &str, visible: bool) -> bool {
        let changed = self
            .by_name(name)
            .is_some_and(|step| step.set_visible(visible));
        if changed {
            tracing::debug!(target: targets::WIZARD, step = name, visible, "step visibility changed");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepController;
    use std::sync::Arc;

    struct Always;

    impl StepController for Always {
        fn is_valid(&self) -> bool {
            true
        }
    }

    fn step(name: &str) -> StepDescriptor {
        StepDescriptor::new(name, Arc::new(Always))
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(matches!(StepRegistry::new(Vec::new()), Err(WizardError::EmptyRegistry)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = StepRegistry::new(vec![step("metadata"), step("access"), step("metadata")]);
        match result {
            Err(WizardError::DuplicateStep(name)) => assert_eq!(name, "metadata"),
            other => panic!("expected duplicate step error, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup() {
        let registry =
            StepRegistry::new(vec![step("metadata"), step("source"), step("summary")]).unwrap();

        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert_eq!(registry.last_index(), 2);
        assert_eq!(registry.index_of("source"), Some(1));
        assert_eq!(registry.index_of("missing"), None);
        assert_eq!(registry.get(2).map(StepDescriptor::name), Some("summary"));
        assert!(registry.get(3).is_none());
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["metadata", "source", "summary"]
        );
    }

    #[test]
    fn test_set_visible() {
        let registry = StepRegistry::new(vec![step("metadata"), step("processing")]).unwrap();

        assert!(registry.set_visible("processing", false));
        assert!(!registry.set_visible("processing", false));
        assert!(!registry.set_visible("missing", false));
        assert!(!registry.by_name("processing").unwrap().is_visible());
    }
}
