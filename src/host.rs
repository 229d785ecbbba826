//! Capabilities the hosting runtime provides to the cache manager.
//!
//! The manager owns policy only; actual network access and lifecycle
//! signalling stay on the host side behind these traits, so the core
//! can be exercised without a real runtime.

use async_trait::async_trait;
use color_eyre::Result;

use crate::http::{Request, Response};

/// Network access as the host exposes it to the manager.
#[async_trait]
pub trait Network: Send + Sync {
  /// Perform the request against the real network.
  ///
  /// An `Err` means the network was unreachable (offline, DNS, reset).
  /// Responses with non-success status codes are `Ok`; the status is
  /// the caller's problem.
  async fn fetch(&self, request: &Request) -> Result<Response>;
}

/// Lifecycle control signals of the hosting runtime.
///
/// `skip_waiting` promotes a freshly installed instance without the
/// usual handover delay; `claim_clients` takes control of already-open
/// clients instead of waiting for them to reload.
pub trait LifecycleControl: Send + Sync {
  fn skip_waiting(&self);
  fn claim_clients(&self);
}

/// Control implementation for hosts with no client bookkeeping.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopControl;

impl LifecycleControl for NoopControl {
  fn skip_waiting(&self) {}
  fn claim_clients(&self) {}
}

#[cfg(test)]
pub(crate) mod mock {
  //! Scripted host capabilities for tests.

  use super::*;
  use color_eyre::eyre::eyre;
  use std::collections::{BTreeMap, HashMap};
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;

  enum Outcome {
    Reply { status: u16, body: Vec<u8> },
    Unreachable,
  }

  /// Network stub replaying scripted outcomes per absolute URL.
  ///
  /// Unscripted URLs behave as unreachable. Every fetch attempt is
  /// recorded so tests can assert on network traffic.
  #[derive(Default)]
  pub struct ScriptedNetwork {
    routes: Mutex<HashMap<String, Outcome>>,
    calls: Mutex<Vec<String>>,
  }

  impl ScriptedNetwork {
    pub fn new() -> Self {
      Self::default()
    }

    pub fn reply(&self, url: &str, status: u16, body: &str) {
      self.routes.lock().unwrap().insert(
        url.to_string(),
        Outcome::Reply {
          status,
          body: body.as_bytes().to_vec(),
        },
      );
    }

    pub fn unreachable(&self, url: &str) {
      self
        .routes
        .lock()
        .unwrap()
        .insert(url.to_string(), Outcome::Unreachable);
    }

    pub fn calls(&self) -> Vec<String> {
      self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
      self.calls.lock().unwrap().len()
    }
  }

  #[async_trait]
  impl Network for ScriptedNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response> {
      self
        .calls
        .lock()
        .unwrap()
        .push(request.url.as_str().to_string());

      let routes = self.routes.lock().unwrap();
      match routes.get(request.url.as_str()) {
        Some(Outcome::Reply { status, body }) => {
          let mut headers = BTreeMap::new();
          headers.insert("content-type".to_string(), "text/plain".to_string());
          Ok(Response::new(*status, headers, body.clone()))
        }
        Some(Outcome::Unreachable) | None => {
          Err(eyre!("network unreachable: {}", request.url))
        }
      }
    }
  }

  /// Control stub counting the signals it receives.
  #[derive(Default)]
  pub struct RecordingControl {
    skip_waiting: AtomicUsize,
    claim_clients: AtomicUsize,
  }

  impl RecordingControl {
    pub fn new() -> Self {
      Self::default()
    }

    pub fn skip_waiting_count(&self) -> usize {
      self.skip_waiting.load(Ordering::SeqCst)
    }

    pub fn claim_clients_count(&self) -> usize {
      self.claim_clients.load(Ordering::SeqCst)
    }
  }

  impl LifecycleControl for RecordingControl {
    fn skip_waiting(&self) {
      self.skip_waiting.fetch_add(1, Ordering::SeqCst);
    }

    fn claim_clients(&self) {
      self.claim_clients.fetch_add(1, Ordering::SeqCst);
    }
  }
}
