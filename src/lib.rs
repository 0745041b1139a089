//! Incremental-game progression engine.
//!
//! Producers bought with a spendable resource generate more of it every
//! tick; upgrades permanently modify their output. The crate holds the
//! state model, the transitions over it, save/load through a pluggable
//! backend, and the static game definitions. Rendering is left to the host.

pub mod engine;
pub mod games;
pub mod session;
pub mod storage;
pub mod time;

pub use engine::{Intent, ProgressionState, Snapshot};
pub use session::Session;
pub use storage::{MemoryStorage, SaveSystem, StorageBackend, StorageError};
