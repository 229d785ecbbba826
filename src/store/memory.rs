//! Process-local store backend.

use chrono::Utc;
use color_eyre::{eyre::eyre, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{Store, StoredResponse, Stores};
use crate::http::Response;

type Shared = Arc<Mutex<HashMap<String, HashMap<String, StoredResponse>>>>;

/// In-memory store collection for tests and ephemeral hosts.
///
/// Clones share the same underlying stores, so a collection can be
/// handed to the manager and still inspected from the outside.
#[derive(Debug, Default, Clone)]
pub struct MemoryStores {
  stores: Shared,
}

impl MemoryStores {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Stores for MemoryStores {
  type Store = MemoryStore;

  fn open(&self, name: &str) -> Result<MemoryStore> {
    let mut stores = self
      .stores
      .lock()
      .map_err(|e| eyre!("store lock poisoned: {}", e))?;
    stores.entry(name.to_string()).or_default();

    Ok(MemoryStore {
      name: name.to_string(),
      stores: Arc::clone(&self.stores),
    })
  }

  fn names(&self) -> Result<Vec<String>> {
    let stores = self
      .stores
      .lock()
      .map_err(|e| eyre!("store lock poisoned: {}", e))?;
    Ok(stores.keys().cloned().collect())
  }

  fn delete(&self, name: &str) -> Result<bool> {
    let mut stores = self
      .stores
      .lock()
      .map_err(|e| eyre!("store lock poisoned: {}", e))?;
    Ok(stores.remove(name).is_some())
  }
}

/// Handle to one named in-memory store.
#[derive(Debug)]
pub struct MemoryStore {
  name: String,
  stores: Shared,
}

impl Store for MemoryStore {
  fn lookup(&self, url: &str) -> Result<Option<StoredResponse>> {
    let stores = self
      .stores
      .lock()
      .map_err(|e| eyre!("store lock poisoned: {}", e))?;
    Ok(
      stores
        .get(&self.name)
        .and_then(|entries| entries.get(url))
        .cloned(),
    )
  }

  fn put(&self, url: &str, response: &Response) -> Result<()> {
    let mut stores = self
      .stores
      .lock()
      .map_err(|e| eyre!("store lock poisoned: {}", e))?;
    let entries = stores.entry(self.name.clone()).or_default();
    entries.insert(
      url.to_string(),
      StoredResponse {
        response: response.clone(),
        cached_at: Utc::now(),
      },
    );
    Ok(())
  }

  fn entry_count(&self) -> Result<usize> {
    let stores = self
      .stores
      .lock()
      .map_err(|e| eyre!("store lock poisoned: {}", e))?;
    Ok(stores.get(&self.name).map_or(0, HashMap::len))
  }
}
