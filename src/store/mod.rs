//! Versioned snapshot stores.
//!
//! A store is a named collection of request → response snapshots keyed
//! by absolute URL. The manager opens exactly one store per deployed
//! build and deletes the others on activation. Two backends ship with
//! the crate: an in-memory one for tests and ephemeral hosts, and a
//! SQLite one for durable installations.

mod memory;
mod sqlite;
mod traits;

pub use memory::{MemoryStore, MemoryStores};
pub use sqlite::{SqliteStore, SqliteStores};
pub use traits::{Store, StoredResponse, Stores};
