//! Wizard-scoped storage for UI state that cannot round-trip through plain
//! form data.
//!
//! Some inputs (file pickers being the usual case) hold state that cannot be
//! reset or rebuilt programmatically. Steps that need to keep such state
//! across tab changes receive a [`SharedData`] handle through
//! [`StepController::attach_shared_data`](crate::StepController::attach_shared_data)
//! and store values keyed by their type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;

/// A typed bag of values, one per type, scoped to one wizard run.
///
/// Cleared by [`Wizard::restart`](crate::Wizard::restart).
#[derive(Default)]
pub struct SharedData {
    values: Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl SharedData {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the previous value of the same type.
    pub fn insert<T: Any + Send + Sync>(&self, value: T) -> Option<T> {
        self.values
            .lock()
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// A clone of the stored value of type `T`.
    pub fn get<T: Any + Send + Sync + Clone>(&self) -> Option<T> {
        self.with(T::clone)
    }

    /// Read the stored value of type `T` through a closure.
    ///
    /// The bag is locked while `f` runs; `f` must not access the bag again.
    pub fn with<T: Any + Send + Sync, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let values = self.values.lock();
        values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
            .map(f)
    }

    /// Modify the stored value of type `T` through a closure.
    ///
    /// The bag is locked while `f` runs; `f` must not access the bag again.
    pub fn with_mut<T: Any + Send + Sync, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut values = self.values.lock();
        values
            .get_mut(&TypeId::of::<T>())
            .and_then(|value| value.downcast_mut::<T>())
            .map(f)
    }

    /// Remove and return the stored value of type `T`.
    pub fn remove<T: Any + Send + Sync>(&self) -> Option<T> {
        self.values
            .lock()
            .remove(&TypeId::of::<T>())
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| *value)
    }

    /// Whether a value of type `T` is stored.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.values.lock().contains_key(&TypeId::of::<T>())
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    /// Drop every stored value.
    pub fn clear(&self) {
        self.values.lock().clear();
    }
}

impl fmt::Debug for SharedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedData")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct SelectedFiles(Vec<String>);

    #[test]
    fn test_insert_get_remove() {
        let data = SharedData::new();
        assert!(data.is_empty());

        assert_eq!(data.insert(SelectedFiles(vec!["talk.mp4".into()])), None);
        assert!(data.contains::<SelectedFiles>());
        assert_eq!(
            data.get::<SelectedFiles>(),
            Some(SelectedFiles(vec!["talk.mp4".into()]))
        );

        let previous = data.insert(SelectedFiles(vec![]));
        assert_eq!(previous, Some(SelectedFiles(vec!["talk.mp4".into()])));

        assert_eq!(data.remove::<SelectedFiles>(), Some(SelectedFiles(vec![])));
        assert!(!data.contains::<SelectedFiles>());
    }

    #[test]
    fn test_values_are_keyed_by_type() {
        let data = SharedData::new();
        data.insert(7u32);
        data.insert(String::from("slides.pdf"));

        assert_eq!(data.len(), 2);
        assert_eq!(data.get::<u32>(), Some(7));
        assert_eq!(data.with(|s: &String| s.len()), Some(10));
        assert_eq!(data.get::<u64>(), None);
    }

    #[test]
    fn test_with_mut_and_clear() {
        let data = SharedData::new();
        data.insert(SelectedFiles(vec![]));

        data.with_mut(|files: &mut SelectedFiles| files.0.push("intro.mov".into()));
        assert_eq!(data.with(|files: &SelectedFiles| files.0.len()), Some(1));

        data.clear();
        assert!(data.is_empty());
        assert_eq!(data.with_mut(|files: &mut SelectedFiles| files.0.len()), None);
    }
}
