//! Core primitives for stepwise.
//!
//! - **Signal/Slot System**: type-safe notifications between the wizard, its
//!   step controllers and the surrounding view
//! - **Property System**: lock-protected values with change detection
//! - **Logging**: `tracing` targets used across the workspace
//!
//! # Example
//!
//! ```
//! use stepwise_core::Signal;
//!
//! let tab_changed = Signal::<String>::new();
//! let conn_id = tab_changed.connect(|name| println!("active tab: {name}"));
//! tab_changed.emit("metadata".to_string());
//! tab_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::{targets, PerfSpan};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
