//! Compiled-in configuration for one deployed build.

use color_eyre::{eyre::eyre, Result};
use std::collections::BTreeSet;
use url::Url;

/// Immutable configuration the manager is constructed with.
///
/// The current store identifier is derived from `prefix` + `version`;
/// bumping the version tag is what triggers the install/activate
/// migration for existing installations. The manifest is the fixed set
/// of root-relative paths precached at install time.
#[derive(Debug, Clone)]
pub struct ShellConfig {
  prefix: String,
  version: String,
  origin: Url,
  manifest: BTreeSet<String>,
  shell: String,
}

impl ShellConfig {
  /// Build a validated configuration.
  ///
  /// Manifest entries and `shell` use root-relative notation (`./`,
  /// `./index.html`). `shell` must be a manifest member: it is the
  /// document served as a last resort for failed navigations, so it
  /// has to be precached to be of any use offline.
  pub fn new(
    prefix: &str,
    version: &str,
    origin: Url,
    manifest: &[&str],
    shell: &str,
  ) -> Result<Self> {
    if prefix.is_empty() {
      return Err(eyre!("store prefix must not be empty"));
    }
    if version.is_empty() {
      return Err(eyre!("version tag must not be empty"));
    }
    if origin.cannot_be_a_base() {
      return Err(eyre!("origin {} cannot serve as a base URL", origin));
    }
    if manifest.is_empty() {
      return Err(eyre!("asset manifest must not be empty"));
    }
    let manifest: BTreeSet<String> = manifest.iter().map(|p| p.to_string()).collect();
    if !manifest.contains(shell) {
      return Err(eyre!("shell document {} is not in the asset manifest", shell));
    }

    Ok(Self {
      prefix: prefix.to_string(),
      version: version.to_string(),
      origin,
      manifest,
      shell: shell.to_string(),
    })
  }

  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  pub fn version(&self) -> &str {
    &self.version
  }

  pub fn origin(&self) -> &Url {
    &self.origin
  }

  /// Root-relative path of the app-shell document.
  pub fn shell(&self) -> &str {
    &self.shell
  }

  /// Manifest paths, in set order.
  pub fn manifest(&self) -> impl Iterator<Item = &str> {
    self.manifest.iter().map(String::as_str)
  }

  /// Identifier of the store belonging to this build.
  pub fn store_name(&self) -> String {
    format!("{}{}", self.prefix, self.version)
  }

  /// Whether `name` belongs to this manager but a different build.
  pub fn is_orphan(&self, name: &str) -> bool {
    name.starts_with(&self.prefix) && name != self.store_name()
  }

  /// Whether the relative path is a precached manifest asset.
  pub fn is_core_asset(&self, relative: &str) -> bool {
    self.manifest.contains(relative)
  }

  /// Absolute URL for a manifest-style relative path.
  pub fn resolve(&self, relative: &str) -> Result<Url> {
    let path = relative.strip_prefix("./").unwrap_or(relative);
    self
      .origin
      .join(path)
      .map_err(|e| eyre!("cannot resolve {} against {}: {}", relative, self.origin, e))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config() -> ShellConfig {
    ShellConfig::new(
      "podlog-",
      "v1.0.0",
      Url::parse("https://app.example/").unwrap(),
      &["./", "./index.html", "./styles.css"],
      "./index.html",
    )
    .unwrap()
  }

  #[test]
  fn test_store_name_embeds_version() {
    assert_eq!(config().store_name(), "podlog-v1.0.0");
  }

  #[test]
  fn test_orphan_detection() {
    let config = config();
    assert!(config.is_orphan("podlog-v0.9.0"));
    assert!(!config.is_orphan("podlog-v1.0.0"));
    // Foreign stores are none of our business
    assert!(!config.is_orphan("other-app-v1.0.0"));
  }

  #[test]
  fn test_core_asset_membership_is_exact() {
    let config = config();
    assert!(config.is_core_asset("./index.html"));
    assert!(config.is_core_asset("./"));
    assert!(!config.is_core_asset("./missing.js"));
    assert!(!config.is_core_asset("index.html"));
  }

  #[test]
  fn test_resolve_root_and_nested() {
    let config = config();
    assert_eq!(config.resolve("./").unwrap().as_str(), "https://app.example/");
    assert_eq!(
      config.resolve("./styles.css").unwrap().as_str(),
      "https://app.example/styles.css"
    );
  }

  #[test]
  fn test_shell_must_be_in_manifest() {
    let result = ShellConfig::new(
      "podlog-",
      "v1.0.0",
      Url::parse("https://app.example/").unwrap(),
      &["./", "./styles.css"],
      "./index.html",
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_rejects_empty_fields() {
    let origin = Url::parse("https://app.example/").unwrap();
    assert!(ShellConfig::new("", "v1", origin.clone(), &["./"], "./").is_err());
    assert!(ShellConfig::new("podlog-", "", origin.clone(), &["./"], "./").is_err());
    assert!(ShellConfig::new("podlog-", "v1", origin, &[], "./").is_err());
  }
}
