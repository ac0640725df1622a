//! Endpoint resolution and per-collection configuration.
//!
//! `resolve_endpoint` is the deterministic rule set that computes a
//! collection's absolute URL from base URL, path, and optional version.
//! `EndpointBuilder` is the fluent registration surface handed out by
//! the context; it produces an immutable [`EndpointSpec`] and from it a
//! typed [`ApiSet`].

use crate::error::{Error, Result};
use crate::http::Channel;
use crate::resource::ApiResource;
use crate::set::ApiSet;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Compute the absolute URL for a collection.
///
/// Rules, in priority order:
/// 1. A path that already begins with `/api/` is fully qualified: it is
///    appended to the base verbatim and any version argument is ignored
///    (the caller owns versioning).
/// 2. Without a version, base and path are concatenated with exactly one
///    `/` between them.
/// 3. With a version, `/{version}` is inserted after a base that already
///    ends in `/api`, otherwise `/api/{version}` is inserted before the
///    path.
pub fn resolve_endpoint(base_url: &str, path: &str, version: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if path.starts_with("/api/") {
        return format!("{base}{path}");
    }

    match version {
        None => format!("{base}{path}"),
        Some(version) => {
            if base.to_ascii_lowercase().ends_with("/api") {
                format!("{base}/{version}{path}")
            } else {
                format!("{base}/api/{version}{path}")
            }
        }
    }
}

/// Per-collection configuration, built once at registration and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    pub path: String,
    pub version: Option<String>,
    /// Extra headers attached to every request against this collection
    pub headers: Vec<(String, String)>,
    /// Overrides the context-wide request timeout when set
    pub timeout: Option<Duration>,
}

/// Fluent registration builder for one typed collection.
///
/// Obtained from [`crate::ApiContext::endpoint`]; finish with
/// [`EndpointBuilder::build`].
pub struct EndpointBuilder<T: ApiResource> {
    client: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
    default_timeout: Duration,
    path: Option<String>,
    version: Option<String>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ApiResource> EndpointBuilder<T> {
    pub(crate) fn new(
        client: reqwest::Client,
        base_url: String,
        bearer: Option<String>,
        default_timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url,
            bearer,
            default_timeout,
            path: None,
            version: None,
            headers: Vec::new(),
            timeout: None,
            _marker: PhantomData,
        }
    }

    /// Explicit endpoint path, e.g. `"/campaigns"`.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// API version segment, e.g. `"v1"`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add a header sent with every request against this collection.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Override the context-wide timeout for this collection.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Derive the path from the resource name: lower-cased and suffixed
    /// with `s` (naive pluralization, no irregular-plural handling),
    /// under `/api` and the version segment when one was set.
    pub fn by_convention(mut self) -> Self {
        let name = T::RESOURCE.to_lowercase();
        self.path = Some(match &self.version {
            Some(version) => format!("/api/{version}/{name}s"),
            None => format!("/api/{name}s"),
        });
        self
    }

    /// Build the typed collection.
    ///
    /// Fails with [`Error::Configuration`] when no path was given, before
    /// any network work can happen.
    pub fn build(self) -> Result<ApiSet<T>> {
        let path = self.path.ok_or_else(|| {
            Error::Configuration(format!(
                "no endpoint path configured for resource '{}'",
                T::RESOURCE
            ))
        })?;
        let spec = EndpointSpec {
            path,
            version: self.version,
            headers: self.headers,
            timeout: self.timeout,
        };

        let collection_url = resolve_endpoint(&self.base_url, &spec.path, spec.version.as_deref());
        debug!(resource = T::RESOURCE, url = %collection_url, "registered endpoint");

        Ok(ApiSet::new(Arc::new(Channel {
            client: self.client,
            collection_url,
            bearer: self.bearer,
            headers: spec.headers,
            timeout: spec.timeout.unwrap_or(self.default_timeout),
        })))
    }
}
