//! Storage ports driven by the progress engine.
//!
//! Two backends mirror the in-memory snapshot: a local key-value store that
//! holds the whole record, and an optional per-user remote row store that
//! holds the shared subset.

pub mod local;
pub mod remote;

pub use local::{FileStore, LocalStore, MemoryStore, PROGRESS_KEY};
pub use remote::{MemoryRemoteStore, RemoteRecord, RemoteStore, RestRemoteStore};
