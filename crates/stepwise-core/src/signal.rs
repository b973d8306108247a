//! Signal/slot notifications for stepwise.
//!
//! A [`Signal<Args>`] keeps a list of connected slots (closures) and invokes
//! every one of them, in connection order, when the signal is emitted. The
//! wizard uses signals to tell the surrounding view and cooperating step
//! controllers that the active step is about to change or has changed.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The notification source
//! - [`ConnectionId`] - Returned when connecting a slot, used to disconnect
//!
//! # Re-entrancy
//!
//! Slots run synchronously on the emitting thread. The connection table is
//! released before any slot runs, so a slot may connect or disconnect slots
//! on the signal that is currently emitting. Such changes take effect from
//! the next emission.
//!
//! # Example
//!
//! ```
//! use stepwise_core::Signal;
//!
//! let step_changed = Signal::<String>::new();
//!
//! let conn_id = step_changed.connect(|name| {
//!     println!("now on step {name}");
//! });
//!
//! step_changed.emit("metadata".to_string());
//! step_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID stays valid until the connection is disconnected or the signal
    /// is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Internal storage for a single connection.
struct Connection<Args> {
    slot: Slot<Args>,
    /// Monotonic connection sequence; slotmap reuses freed slots, so
    /// iteration order alone does not reflect connection order.
    seq: u64,
}

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a struct/tuple for richer payloads.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync`. Slots are always invoked directly on the
/// thread that calls [`emit`](Self::emit).
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    next_seq: AtomicU64,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
            seq,
        })
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Emit the signal, invoking all connected slots in connection order.
    #[tracing::instrument(skip_all, target = "stepwise_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = {
            let connections = self.connections.lock();
            let mut ordered: Vec<(u64, Slot<Args>)> = connections
                .values()
                .map(|conn| (conn.seq, Arc::clone(&conn.slot)))
                .collect();
            ordered.sort_unstable_by_key(|(seq, _)| *seq);
            ordered.into_iter().map(|(_, slot)| slot).collect()
        };

        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");
        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
