//! Cache lifecycle manager: manifest precache on install, store
//! migration on activation, and per-request strategy routing.

use color_eyre::{eyre::eyre, Result};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::host::{LifecycleControl, Network};
use crate::http::{Method, Request, Response};
use crate::store::{Store, Stores};

/// Strategy selected for an intercepted GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
  /// Serve from the store, fall back to the network on a miss.
  CacheFirst,
  /// Go to the network, fall back to the store (and the shell document
  /// for navigations) when it is unreachable.
  NetworkFirst,
}

/// Where a served response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeSource {
  /// Fresh from the network
  Network,
  /// Store hit on the cache-first path
  Cache,
  /// Store fallback after a network failure
  Offline,
  /// App-shell document served for a failed navigation
  Shell,
}

/// A response resolved by the manager, tagged with its source.
#[derive(Debug, Clone)]
pub struct Served {
  pub response: Response,
  pub source: ServeSource,
}

/// Outcome of request interception.
#[derive(Debug, Clone)]
pub enum Intercept {
  /// Not ours to handle; the host lets the request through untouched.
  Bypass,
  /// Response resolved by the manager.
  Serve(Served),
}

/// The cache lifecycle manager.
///
/// Owns the policy side of the offline layer: which store is current,
/// what gets precached, and how each intercepted request is resolved.
/// Storage, network access, and lifecycle signalling are capabilities
/// passed in at construction, so the policy runs against any host.
pub struct CacheManager<S: Stores> {
  config: ShellConfig,
  stores: Arc<S>,
  /// Handle to this build's store, opened once at construction
  store: S::Store,
  network: Arc<dyn Network>,
  control: Arc<dyn LifecycleControl>,
}

impl<S: Stores> CacheManager<S> {
  /// Build a manager for one deployed build.
  ///
  /// Opens (creating if absent) the build's store; the handle is
  /// reused by install and by every intercepted fetch.
  pub fn new(
    config: ShellConfig,
    stores: S,
    network: Arc<dyn Network>,
    control: Arc<dyn LifecycleControl>,
  ) -> Result<Self> {
    let store = stores.open(&config.store_name())?;
    Ok(Self {
      config,
      stores: Arc::new(stores),
      store,
      network,
      control,
    })
  }

  pub fn config(&self) -> &ShellConfig {
    &self.config
  }

  /// Install: precache the manifest into this build's store.
  ///
  /// Every manifest response is fetched before anything is written, so
  /// a partial failure leaves the store untouched and install can be
  /// retried. Readiness is signalled either way; the error is the
  /// dispatcher's to log away.
  pub async fn install(&self) -> Result<()> {
    let result = self.precache().await;
    self.control.skip_waiting();

    match result {
      Ok(count) => {
        info!("precached {} app shell assets into {}", count, self.config.store_name());
        Ok(())
      }
      Err(error) => {
        warn!("install failed to cache assets: {}", error);
        Err(error)
      }
    }
  }

  async fn precache(&self) -> Result<usize> {
    let fetches = self.config.manifest().map(|path| {
      let resolved = self.config.resolve(path);
      async move {
        let url = resolved?;
        let response = self.network.fetch(&Request::get(url.clone())).await?;
        if !response.is_ok() {
          return Err(eyre!("asset {} responded with status {}", url, response.status));
        }
        Ok((url, response))
      }
    });

    let snapshots = try_join_all(fetches).await?;
    for (url, response) in &snapshots {
      self.store.put(url.as_str(), response)?;
    }

    Ok(snapshots.len())
  }

  /// Activate: delete orphaned stores and take control of open clients.
  pub async fn activate(&self) -> Result<()> {
    let mut deleted = 0usize;
    for name in self.stores.names()? {
      if self.config.is_orphan(&name) {
        self.stores.delete(&name)?;
        deleted += 1;
      }
    }
    self.control.claim_clients();
    info!("activated {}, deleted {} orphaned stores", self.config.store_name(), deleted);
    Ok(())
  }

  /// Decide the strategy for a GET the manager will handle.
  ///
  /// Navigations always go network-first regardless of manifest
  /// membership; precached assets go cache-first; everything else goes
  /// network-first.
  pub fn route(&self, request: &Request) -> Strategy {
    if request.is_navigation() {
      return Strategy::NetworkFirst;
    }
    if self.config.is_core_asset(&request.relative_path()) {
      return Strategy::CacheFirst;
    }
    Strategy::NetworkFirst
  }

  /// Resolve one intercepted request.
  ///
  /// Non-GET and cross-origin requests are bypassed. Each call is
  /// independent and stateless against the current store; any number
  /// may be in flight at once.
  pub async fn handle_fetch(&self, request: &Request) -> Result<Intercept> {
    if request.method != Method::Get {
      return Ok(Intercept::Bypass);
    }
    if !request.same_origin_as(self.config.origin()) {
      return Ok(Intercept::Bypass);
    }

    let served = match self.route(request) {
      Strategy::CacheFirst => self.cache_first(request).await?,
      Strategy::NetworkFirst => self.network_first(request).await?,
    };

    Ok(Intercept::Serve(served))
  }

  async fn cache_first(&self, request: &Request) -> Result<Served> {
    if let Some(hit) = self.store.lookup(request.url.as_str())? {
      return Ok(Served {
        response: hit.response,
        source: ServeSource::Cache,
      });
    }

    let response = self.network.fetch(request).await?;
    if response.is_ok() {
      self.store.put(request.url.as_str(), &response)?;
    }
    Ok(Served {
      response,
      source: ServeSource::Network,
    })
  }

  async fn network_first(&self, request: &Request) -> Result<Served> {
    match self.network.fetch(request).await {
      Ok(response) => {
        if response.is_ok() {
          self.store.put(request.url.as_str(), &response)?;
        }
        Ok(Served {
          response,
          source: ServeSource::Network,
        })
      }
      Err(network_error) => {
        if let Some(hit) = self.store.lookup(request.url.as_str())? {
          return Ok(Served {
            response: hit.response,
            source: ServeSource::Offline,
          });
        }

        if request.is_navigation() {
          let shell_url = self.config.resolve(self.config.shell())?;
          if let Some(shell) = self.store.lookup(shell_url.as_str())? {
            debug!("serving app shell for failed navigation to {}", request.url);
            return Ok(Served {
              response: shell.response,
              source: ServeSource::Shell,
            });
          }
        }

        Err(network_error)
      }
    }
  }
}
