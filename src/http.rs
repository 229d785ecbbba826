//! Request and response value types shared by the stores and the manager.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// HTTP method of an intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
  Get,
  Head,
  Post,
  Put,
  Delete,
  Patch,
  Options,
}

/// How a request was issued by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
  /// Full-page navigation (address bar, link click, reload)
  Navigate,
  /// Subresource load (stylesheet, script, image, API call)
  Subresource,
}

/// An outgoing request as the hosting runtime hands it to the manager.
#[derive(Debug, Clone)]
pub struct Request {
  pub method: Method,
  pub url: Url,
  pub mode: RequestMode,
}

impl Request {
  /// A subresource GET for the given URL.
  pub fn get(url: Url) -> Self {
    Self {
      method: Method::Get,
      url,
      mode: RequestMode::Subresource,
    }
  }

  /// A full-page navigation GET.
  pub fn navigate(url: Url) -> Self {
    Self {
      method: Method::Get,
      url,
      mode: RequestMode::Navigate,
    }
  }

  pub fn is_navigation(&self) -> bool {
    self.mode == RequestMode::Navigate
  }

  /// Whether this request targets the given origin.
  pub fn same_origin_as(&self, origin: &Url) -> bool {
    self.url.origin() == origin.origin()
  }

  /// Root-relative path of the request in manifest notation:
  /// `/` maps to `./`, everything else gets a `.` prefix.
  pub fn relative_path(&self) -> String {
    relative_path(&self.url)
  }
}

pub(crate) fn relative_path(url: &Url) -> String {
  let path = url.path();
  if path == "/" {
    "./".to_string()
  } else {
    format!(".{}", path)
  }
}

/// Snapshot of a response: status, headers, and the full body bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
  pub status: u16,
  pub headers: BTreeMap<String, String>,
  pub body: Vec<u8>,
}

impl Response {
  pub fn new(status: u16, headers: BTreeMap<String, String>, body: Vec<u8>) -> Self {
    Self {
      status,
      headers,
      body,
    }
  }

  /// Whether the status indicates success (2xx).
  pub fn is_ok(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
  }

  #[test]
  fn test_relative_path_root() {
    assert_eq!(relative_path(&url("https://app.example/")), "./");
  }

  #[test]
  fn test_relative_path_nested() {
    assert_eq!(
      relative_path(&url("https://app.example/styles/tokens.css")),
      "./styles/tokens.css"
    );
  }

  #[test]
  fn test_relative_path_ignores_query() {
    assert_eq!(
      relative_path(&url("https://app.example/decks?sort=name")),
      "./decks"
    );
  }

  #[test]
  fn test_same_origin() {
    let origin = url("https://app.example/");
    assert!(Request::get(url("https://app.example/index.html")).same_origin_as(&origin));
    assert!(!Request::get(url("https://cdn.example/lib.js")).same_origin_as(&origin));
    assert!(!Request::get(url("http://app.example/index.html")).same_origin_as(&origin));
  }

  #[test]
  fn test_response_is_ok_bounds() {
    let resp = |status| Response::new(status, BTreeMap::new(), Vec::new());
    assert!(!resp(199).is_ok());
    assert!(resp(200).is_ok());
    assert!(resp(299).is_ok());
    assert!(!resp(300).is_ok());
    assert!(!resp(404).is_ok());
  }

  #[test]
  fn test_navigation_mode() {
    assert!(Request::navigate(url("https://app.example/decks")).is_navigation());
    assert!(!Request::get(url("https://app.example/decks")).is_navigation());
  }
}
