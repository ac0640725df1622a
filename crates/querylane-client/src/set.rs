//! Typed collection façade.
//!
//! `ApiSet` layers create/read/update/delete verbs over the deferred
//! query engine. Every verb is exactly one HTTP round trip with defined
//! pre/post-conditions; nothing is cached or retried.

use crate::error::{Error, Result};
use crate::http::{decode, read_success, Channel};
use crate::query::Query;
use crate::resource::ApiResource;
use reqwest::{Method, StatusCode};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// A typed remote collection.
///
/// Cheap to clone; all state is shared and immutable.
pub struct ApiSet<T: ApiResource> {
    channel: Arc<Channel>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ApiResource> Clone for ApiSet<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ApiResource> ApiSet<T> {
    pub(crate) fn new(channel: Arc<Channel>) -> Self {
        Self {
            channel,
            _marker: PhantomData,
        }
    }

    /// The resolved collection URL.
    pub fn url(&self) -> &str {
        &self.channel.collection_url
    }

    /// Start a fresh deferred query against this collection.
    pub fn query(&self) -> Query<T> {
        Query::new(self.channel.clone())
    }

    /// POST the entity and return the server-materialized echo,
    /// including any server-assigned identifier.
    pub async fn add(&self, entity: &T) -> Result<T> {
        debug!(resource = T::RESOURCE, "creating entity");
        let response = self
            .channel
            .request(Method::POST, &self.channel.collection_url)
            .json(entity)
            .send()
            .await?;
        let body = read_success(response).await?;
        decode(&body)
    }

    /// PUT the entity to `{collection}/{id}`.
    ///
    /// Requires a non-empty id; fails with [`Error::Validation`] before
    /// any network attempt otherwise.
    pub async fn update(&self, entity: &T) -> Result<T> {
        let id = entity.id();
        if id.is_empty() {
            return Err(Error::Validation(format!(
                "{} id must be set before update",
                T::RESOURCE
            )));
        }
        debug!(resource = T::RESOURCE, id, "updating entity");
        let response = self
            .channel
            .request(Method::PUT, &self.channel.item_url(id))
            .json(entity)
            .send()
            .await?;
        let body = read_success(response).await?;
        decode(&body)
    }

    /// DELETE `{collection}/{id}`. The response body is ignored.
    /// Idempotency for repeated deletes of a missing id is up to the
    /// backend.
    pub async fn delete(&self, id: &str) -> Result<()> {
        debug!(resource = T::RESOURCE, id, "deleting entity");
        let response = self
            .channel
            .request(Method::DELETE, &self.channel.item_url(id))
            .send()
            .await?;
        read_success(response).await?;
        Ok(())
    }

    /// GET `{collection}/{id}`; a 404 is an explicit absence, not a
    /// failure.
    pub async fn find(&self, id: &str) -> Result<Option<T>> {
        let response = self
            .channel
            .request(Method::GET, &self.channel.item_url(id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = read_success(response).await?;
        decode(&body).map(Some)
    }

    /// GET `{collection}/{id}`; a 404 becomes [`Error::NotFound`], every
    /// other failure propagates unchanged.
    pub async fn get(&self, id: &str) -> Result<T> {
        let response = self
            .channel
            .request(Method::GET, &self.channel.item_url(id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                resource: T::RESOURCE,
                id: id.to_string(),
            });
        }
        let body = read_success(response).await?;
        decode(&body)
    }
}
