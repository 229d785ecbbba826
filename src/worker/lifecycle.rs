//! Lifecycle dispatcher: drives the manager through its phases and
//! keeps fetch handling behind activation.

use color_eyre::{eyre::eyre, Result};

use super::manager::{CacheManager, Intercept};
use crate::http::Request;
use crate::store::Stores;

/// Phase of the managed lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Uninstalled,
  Installing,
  /// Installed but not yet in control of clients
  Installed,
  Activating,
  Active,
}

/// Drives install → activate → fetch ordering for one manager.
///
/// Install and activate each settle fully before the next phase may
/// begin; once active, any number of fetches may be in flight
/// concurrently, each handled independently against the current store.
pub struct Lifecycle<S: Stores> {
  manager: CacheManager<S>,
  phase: Phase,
}

impl<S: Stores> Lifecycle<S> {
  pub fn new(manager: CacheManager<S>) -> Self {
    Self {
      manager,
      phase: Phase::Uninstalled,
    }
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn manager(&self) -> &CacheManager<S> {
    &self.manager
  }

  /// Run the install phase.
  ///
  /// A failed install leaves the lifecycle uninstalled so the host can
  /// dispatch it again; the partial work is already logged by the
  /// manager.
  pub async fn install(&mut self) -> Result<()> {
    if self.phase != Phase::Uninstalled {
      return Err(eyre!("install dispatched in phase {:?}", self.phase));
    }
    self.phase = Phase::Installing;

    match self.manager.install().await {
      Ok(()) => {
        self.phase = Phase::Installed;
        Ok(())
      }
      Err(error) => {
        self.phase = Phase::Uninstalled;
        Err(error)
      }
    }
  }

  /// Run the activation phase. Only legal once installed.
  pub async fn activate(&mut self) -> Result<()> {
    if self.phase != Phase::Installed {
      return Err(eyre!("activate dispatched in phase {:?}", self.phase));
    }
    self.phase = Phase::Activating;

    match self.manager.activate().await {
      Ok(()) => {
        self.phase = Phase::Active;
        Ok(())
      }
      Err(error) => {
        self.phase = Phase::Installed;
        Err(error)
      }
    }
  }

  /// Handle one intercepted request. Only legal once active.
  pub async fn fetch(&self, request: &Request) -> Result<Intercept> {
    if self.phase != Phase::Active {
      return Err(eyre!("fetch dispatched in phase {:?}", self.phase));
    }
    self.manager.handle_fetch(request).await
  }
}
