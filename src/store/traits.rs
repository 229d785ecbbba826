//! Store traits and the stored-snapshot type.

use chrono::{DateTime, Utc};
use color_eyre::Result;

use crate::http::Response;

/// A response snapshot as it sits in a store.
#[derive(Debug, Clone)]
pub struct StoredResponse {
  /// The captured response
  pub response: Response,
  /// When the snapshot was written
  pub cached_at: DateTime<Utc>,
}

/// One named, versioned store of request → response snapshots.
///
/// Entries are keyed by absolute request URL. A `put` replaces any
/// prior entry for the same URL and is atomic at the entry level, so
/// concurrent writers of the same URL resolve to last-write-wins.
pub trait Store: Send + Sync {
  /// Look up a snapshot by absolute request URL.
  fn lookup(&self, url: &str) -> Result<Option<StoredResponse>>;

  /// Write a snapshot, replacing any existing entry for `url`.
  fn put(&self, url: &str, response: &Response) -> Result<()>;

  /// Number of entries currently held.
  fn entry_count(&self) -> Result<usize>;
}

/// The named-store collection a host environment provides.
pub trait Stores: Send + Sync {
  type Store: Store;

  /// Open the named store, creating it if absent.
  fn open(&self, name: &str) -> Result<Self::Store>;

  /// Names of all existing stores.
  fn names(&self) -> Result<Vec<String>>;

  /// Delete the named store and its entries. Returns whether it existed.
  fn delete(&self, name: &str) -> Result<bool>;
}
