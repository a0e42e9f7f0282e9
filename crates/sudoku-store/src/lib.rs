//! Persistence collaborator for the Sudoku engine.
//!
//! The engine core performs no I/O; this crate is the side of the
//! boundary that does. It owns the storage key schema, a key-value
//! [`Storage`] abstraction with file-backed and in-memory backends, a
//! poll-based debouncer that coalesces rapid state changes into single
//! writes, and the one-time migrator that lifts legacy storage keys into
//! the modern namespace.

pub mod debounce;
pub mod keys;
pub mod migrate;
pub mod snapshot;
pub mod store;

pub use debounce::{Debouncer, WriteBatch};
pub use migrate::{run_storage_migration, MigrationReport};
pub use snapshot::{load_saved_game, write_batch};
pub use store::{FileStorage, MemoryStorage, Storage, StoreError};
