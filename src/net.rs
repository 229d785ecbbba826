//! HTTP-backed network capability.

use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use std::collections::BTreeMap;

use crate::host::Network;
use crate::http::{Method, Request, Response};

/// `Network` implementation over a shared reqwest client.
///
/// Captures the full response into a snapshot; redirects and TLS are
/// the client's business. Transport failures surface as errors, any
/// received status (success or not) surfaces as a response.
#[derive(Debug, Default, Clone)]
pub struct HttpNetwork {
  client: reqwest::Client,
}

impl HttpNetwork {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_client(client: reqwest::Client) -> Self {
    Self { client }
  }
}

#[async_trait]
impl Network for HttpNetwork {
  async fn fetch(&self, request: &Request) -> Result<Response> {
    let method = match request.method {
      Method::Get => reqwest::Method::GET,
      Method::Head => reqwest::Method::HEAD,
      Method::Post => reqwest::Method::POST,
      Method::Put => reqwest::Method::PUT,
      Method::Delete => reqwest::Method::DELETE,
      Method::Patch => reqwest::Method::PATCH,
      Method::Options => reqwest::Method::OPTIONS,
    };

    let response = self
      .client
      .request(method, request.url.clone())
      .send()
      .await
      .map_err(|e| eyre!("request to {} failed: {}", request.url, e))?;

    let status = response.status().as_u16();
    let mut headers = BTreeMap::new();
    for (name, value) in response.headers() {
      if let Ok(value) = value.to_str() {
        headers.insert(name.as_str().to_string(), value.to_string());
      }
    }

    let body = response
      .bytes()
      .await
      .map_err(|e| eyre!("reading body from {} failed: {}", request.url, e))?;

    Ok(Response::new(status, headers, body.to_vec()))
  }
}
