//! Offline app-shell caching for installable web apps.
//!
//! One versioned store per deployed build: the asset manifest is
//! precached at install time, orphaned stores from earlier builds are
//! deleted at activation, and every intercepted same-origin GET is
//! routed to a cache-first or network-first strategy, with the app
//! shell document as the last-resort fallback for offline navigations.
//!
//! The hosting runtime supplies storage ([`Stores`]), network access
//! ([`Network`]) and lifecycle signals ([`LifecycleControl`]); the
//! crate supplies the policy ([`CacheManager`]) and the phase ordering
//! ([`Lifecycle`]).
//!
//! ```no_run
//! use shellcache::{CacheManager, HttpNetwork, Lifecycle, NoopControl, ShellConfig, SqliteStores};
//! use std::sync::Arc;
//! use url::Url;
//!
//! # async fn run() -> color_eyre::Result<()> {
//! let config = ShellConfig::new(
//!   "podlog-",
//!   "v1.0.0",
//!   Url::parse("https://app.example/")?,
//!   &["./", "./index.html", "./styles.css"],
//!   "./index.html",
//! )?;
//!
//! let manager = CacheManager::new(
//!   config,
//!   SqliteStores::open()?,
//!   Arc::new(HttpNetwork::new()),
//!   Arc::new(NoopControl),
//! )?;
//!
//! let mut lifecycle = Lifecycle::new(manager);
//! lifecycle.install().await?;
//! lifecycle.activate().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod host;
pub mod http;
pub mod net;
pub mod store;
pub mod worker;

pub use config::ShellConfig;
pub use host::{LifecycleControl, Network, NoopControl};
pub use http::{Method, Request, RequestMode, Response};
pub use net::HttpNetwork;
pub use store::{MemoryStores, SqliteStores, Store, StoredResponse, Stores};
pub use worker::{CacheManager, Intercept, Lifecycle, Phase, ServeSource, Served, Strategy};
