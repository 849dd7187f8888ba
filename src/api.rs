//! HTTP client wrapper for the countries API.
//!
//! `CountriesApi` owns a configured [`reqwest::Client`] and exposes the three
//! request shapes the suite needs: a HEAD availability probe, a full-list GET,
//! and an alpha-code lookup. Responses are captured eagerly into
//! [`ApiResponse`] so steps can assert on status and body after the request
//! future has completed.

use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Result};

/// A completed HTTP exchange, captured for later assertion steps.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// URL the request was sent to.
    pub url: String,
    /// Response status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl ApiResponse {
    /// Parse the captured body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJson`] naming the request URL when the body is
    /// not well-formed JSON.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|source| Error::InvalidJson {
            url: self.url.clone(),
            source,
        })
    }
}

/// Client for the REST Countries service.
#[derive(Clone, Debug)]
pub struct CountriesApi {
    client: reqwest::Client,
}

impl CountriesApi {
    /// Build a client applying `timeout` to every request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] when the underlying client cannot be
    /// constructed.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }

    /// Probe `url` with a HEAD request and return the status code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on transport failure and
    /// [`Error::UnexpectedStatus`] when the endpoint answers with a
    /// non-success code.
    pub async fn probe(&self, url: &str) -> Result<u16> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_owned(),
                source,
            })?;
        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(Error::UnexpectedStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            })
        }
    }

    /// GET `url` and capture the status and body.
    ///
    /// The status code is captured, not checked: asserting on it is a
    /// separate step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] when the request or body read fails.
    pub async fn get(&self, url: &str) -> Result<ApiResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_owned(),
                source,
            })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|source| Error::Http {
            url: url.to_owned(),
            source,
        })?;
        Ok(ApiResponse {
            url: url.to_owned(),
            status,
            body,
        })
    }
}

/// Derive the alpha-code lookup endpoint from the all-countries endpoint.
///
/// Substitutes the first `all` path segment, so the default endpoint maps to
/// `https://restcountries.com/v3.1/alpha/ZAF` for code `ZAF`.
#[must_use]
pub fn alpha_endpoint(endpoint: &str, code: &str) -> String {
    endpoint.replacen("all", &format!("alpha/{code}"), 1)
}
