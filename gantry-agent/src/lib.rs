//! Gantry Agent
//!
//! The lifecycle manager at the heart of Gantry: submits jobs to a remote
//! executor, folds executor-native statuses into a canonical phase state
//! machine, and releases remote resources on teardown.
//!
//! Architecture:
//! - Manager: submit/poll/release over an injected executor client
//! - Store: durable handle persistence for restart recovery
//!
//! The manager holds no timers and runs no background tasks; an external
//! scheduler decides when each handle is polled.

mod manager;
mod store;

// Re-export the host-facing interface
pub use manager::{JobAgent, LifecycleManager};
pub use store::HandleStore;
