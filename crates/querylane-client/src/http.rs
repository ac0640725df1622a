//! Shared request plumbing.
//!
//! A `Channel` is the immutable per-collection slice of transport state:
//! the shared client handle, the resolved collection URL, and the
//! headers/timeout every request against that collection carries.
//! Queries and collection verbs both go through it, so bearer auth and
//! endpoint overrides are applied uniformly.

use crate::error::{Error, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Immutable transport state for one collection. Shared by `Arc` between
/// the set façade and every query branched off it; safe to use
/// concurrently because nothing here is mutated after construction.
#[derive(Debug, Clone)]
pub(crate) struct Channel {
    pub client: reqwest::Client,
    pub collection_url: String,
    pub bearer: Option<String>,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl Channel {
    /// URL for a single entity.
    pub fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    /// Start a request with auth, custom headers, and timeout applied.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.client.request(method, url).timeout(self.timeout);
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }
}

/// Wire-level response wrapper: `{ "data": T }` or a bare `T`.
///
/// The expected shape is declared statically here; detection is just
/// untagged deserialization, no runtime type interrogation. `Enveloped`
/// is tried first so an entity that itself has a `data` field cannot
/// shadow a real envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Payload<T> {
    Enveloped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    pub fn into_inner(self) -> T {
        match self {
            Payload::Enveloped { data } => data,
            Payload::Bare(value) => value,
        }
    }
}

/// Check the status and read the body of a response.
///
/// Non-2xx becomes [`Error::Status`]; callers that treat 404 specially
/// (find/get) inspect the status before calling this.
pub(crate) async fn read_success(response: Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(%status, "request rejected by server");
        return Err(Error::Status { status, body });
    }
    Ok(response.text().await?)
}

/// Decode a body into `T`, unwrapping an envelope if one is present.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let payload: Payload<T> = serde_json::from_str(body)?;
    Ok(payload.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_unwraps_envelope() {
        let body = r#"{ "data": [1, 2, 3] }"#;
        let values: Vec<i64> = decode(body).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_accepts_bare_payload() {
        let body = r#"[1, 2, 3]"#;
        let values: Vec<i64> = decode(body).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_shape_mismatch_is_decode_error() {
        let body = r#"{ "data": "not an array" }"#;
        let result: Result<Vec<i64>> = decode(body);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_item_url_joins_id() {
        let channel = Channel {
            client: reqwest::Client::new(),
            collection_url: "https://h/api/campaigns".to_string(),
            bearer: None,
            headers: Vec::new(),
            timeout: Duration::from_secs(30),
        };
        assert_eq!(channel.item_url("c-1"), "https://h/api/campaigns/c-1");
    }
}
