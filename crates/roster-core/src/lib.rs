//! Core systems for roster.
//!
//! This crate provides the foundational components shared by the roster
//! adapter layer:
//!
//! - **Signal/Slot System**: Type-safe, synchronous listener fan-out with
//!   stable connection identifiers
//! - **Logging Targets**: Per-subsystem `tracing` target names
//!
//! # Signal/Slot Example
//!
//! ```
//! use roster_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
