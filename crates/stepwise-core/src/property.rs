//! Reactive properties with change detection.
//!
//! A [`Property<T>`] wraps a value behind a lock and reports whether a write
//! actually changed it, so callers only emit change notifications when
//! something changed.
//!
//! # Example
//!
//! ```
//! use stepwise_core::{Property, Signal};
//!
//! struct StepFlag {
//!     visible: Property<bool>,
//!     visible_changed: Signal<bool>,
//! }
//!
//! let flag = StepFlag {
//!     visible: Property::new(true),
//!     visible_changed: Signal::new(),
//! };
//!
//! if flag.visible.set(false) {
//!     flag.visible_changed.emit(false);
//! }
//! assert!(!flag.visible.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
