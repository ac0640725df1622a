//! Context construction and shared configuration.

use crate::endpoint::EndpointBuilder;
use crate::error::{Error, Result};
use crate::resource::ApiResource;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Process-wide client configuration, read-only after the context is
/// built.
#[derive(Debug, Clone)]
pub struct ContextOptions {
    pub base_url: String,
    pub bearer_token: Option<String>,
    pub timeout: Duration,
    /// Disable TLS certificate validation. Local/test environments only.
    pub danger_accept_invalid_certs: bool,
}

impl ContextOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
            timeout: DEFAULT_TIMEOUT,
            danger_accept_invalid_certs: false,
        }
    }

    /// Bearer token attached to every request for the context lifetime.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Default per-request timeout; endpoints may override it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.danger_accept_invalid_certs = accept;
        self
    }
}

/// Owner of the shared transport and registration point for typed
/// collections.
///
/// One `reqwest::Client` (with its connection pool) backs every
/// collection registered here. Sets and queries hold shared handles to
/// it; the pool is released once the context and everything derived
/// from it have been dropped.
pub struct ApiContext {
    client: reqwest::Client,
    options: ContextOptions,
}

impl ApiContext {
    /// Build the shared transport from the options.
    pub fn new(options: ContextOptions) -> Result<Self> {
        if options.base_url.is_empty() {
            return Err(Error::Configuration("base_url must not be empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(options.danger_accept_invalid_certs)
            .build()?;
        Ok(Self { client, options })
    }

    /// Start registering a typed collection endpoint.
    pub fn endpoint<T: ApiResource>(&self) -> EndpointBuilder<T> {
        EndpointBuilder::new(
            self.client.clone(),
            self.options.base_url.clone(),
            self.options.bearer_token.clone(),
            self.options.timeout,
        )
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }
}
