//! Reverb Core - single-reaction observable with debounced delivery
//!
//! This crate provides the core types for a minimal notifier primitive:
//! - `Observable` / `Handle` - single-slot reaction registry with a
//!   capability-restricted consumer view
//! - `Debouncer` - leading/trailing coalescing of call bursts
//! - `Timers` - cooperative single-threaded timer queue
//! - `EventLog` - shared, caller-owned ordered event history
//! - `Registry` - id-tracked construction entry point
//!
//! ## Cooperative time
//!
//! Nothing runs in the background. Deferred work (debounce windows) sits
//! on a shared [`Timers`] queue and fires when the host calls
//! [`Timers::advance`], in deadline order. This keeps delivery timing
//! deterministic and fully testable without sleeping.
//!
//! ## Delivery contract
//!
//! An observable holds at most one reaction; registration is
//! first-write-wins and delivery with no listener is a silent no-op.
//! Consumers only ever see the restricted [`Handle`] returned by
//! [`Observable::expose`]; the delivery entry points stay on the
//! observable itself.

mod config;
pub mod debounce;
mod diag;
mod error;
mod event;
mod identity;
pub mod observable;
mod registry;
pub mod time;

pub use config::{DebounceConfig, Edge, Settings};
pub use debounce::Debouncer;
pub use diag::{Diagnostics, LogLevel, MemoryDiagnostics, NullDiagnostics};
pub use error::{Error, Result};
pub use event::{EventFactory, EventLog};
pub use identity::ObservableId;
pub use observable::{Handle, Observable};
pub use registry::Registry;
pub use time::{TimerId, Timers};
