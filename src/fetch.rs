// src/fetch.rs
use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Classified outcome of a failed retrieval.
///
/// `Http` is not a transport failure: the request completed and the server
/// answered with a non-success status. Everything else never produced a
/// usable response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("domain could not be resolved")]
    Resolution,

    #[error("connection refused")]
    ConnectionRefused,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {code}: {text}")]
    Http { code: u16, text: String },
}

/// Retrieval seam used by the monitor runner, kept as a trait so checks can
/// be driven against canned bodies in tests.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher with a fixed user agent and a bounded per-request timeout.
///
/// The timeout must stay under any outer invocation limit, since a
/// monitoring run issues many of these sequentially. No retries here:
/// a failed target is simply retried on the next run.
pub struct Fetcher {
    client: Client,
    user_agent: String,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[async_trait]
impl ContentFetcher for Fetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                code: status.as_u16(),
                text: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        response.text().await.map_err(classify)
    }
}

/// Map a transport error onto the fetch taxonomy by walking its source
/// chain. reqwest does not expose DNS or refusal failures directly, so we
/// look for the underlying io error and resolver message.
fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout;
    }

    let mut source = err.source();
    while let Some(inner) = source {
        if let Some(io_err) = inner.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::ConnectionRefused {
                return FetchError::ConnectionRefused;
            }
        }

        let message = inner.to_string();
        if message.contains("dns error") || message.contains("failed to lookup") {
            return FetchError::Resolution;
        }

        source = inner.source();
    }

    FetchError::Network(err.to_string())
}
