//! Deferred query builder and provider.
//!
//! A [`Query`] accumulates operations into an immutable chain without
//! touching the network. Materialization happens exactly once, when a
//! terminal (`fetch`, `first`) consumes the query: the chain's style
//! picks a translator, the translated parameters join the collection
//! URL, one GET is issued, and the decoded body (envelope-aware) comes
//! back as the typed result.

use crate::error::Result;
use crate::http::{decode, read_success, Channel};
use querylane_query::expr::{Predicate, QueryNode, QueryStyle, SortDirection};
use querylane_query::render::translator_for;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// A lazy, composable query against one remote collection.
///
/// Chaining calls are pure: each returns a new `Query` wrapping the
/// prior chain, so branching several queries off one base is safe and
/// allocation-light. Terminals take `self` by value — one consumption
/// per query object. To run a query twice, `clone()` it first (cheap:
/// the chain is reference-counted); a consumption that failed cannot be
/// retried through the moved-out query.
pub struct Query<T> {
    chain: Arc<QueryNode>,
    channel: Arc<Channel>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            channel: self.channel.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Query<T> {
    pub(crate) fn new(channel: Arc<Channel>) -> Self {
        Self {
            chain: QueryNode::source(QueryStyle::default()),
            channel,
            _marker: PhantomData,
        }
    }

    fn wrap(self, node: QueryNode) -> Self {
        Self {
            chain: Arc::new(node),
            channel: self.channel,
            _marker: PhantomData,
        }
    }

    /// Add a filter predicate. Multiple filters combine conjunctively.
    pub fn filter(self, predicate: Predicate) -> Self {
        let prev = self.chain.clone();
        self.wrap(QueryNode::Filter { predicate, prev })
    }

    /// Primary ascending sort key.
    pub fn order_by(self, field: impl Into<String>) -> Self {
        self.order(field.into(), SortDirection::Asc)
    }

    /// Primary descending sort key.
    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.order(field.into(), SortDirection::Desc)
    }

    /// Additional ascending sort key; earlier keys take precedence.
    pub fn then_by(self, field: impl Into<String>) -> Self {
        self.order(field.into(), SortDirection::Asc)
    }

    /// Additional descending sort key; earlier keys take precedence.
    pub fn then_by_desc(self, field: impl Into<String>) -> Self {
        self.order(field.into(), SortDirection::Desc)
    }

    fn order(self, field: String, direction: SortDirection) -> Self {
        let prev = self.chain.clone();
        self.wrap(QueryNode::OrderBy {
            field,
            direction,
            prev,
        })
    }

    /// Skip the first `count` results. A later `skip` on the same chain
    /// replaces an earlier one.
    pub fn skip(self, count: u64) -> Self {
        let prev = self.chain.clone();
        self.wrap(QueryNode::Skip { count, prev })
    }

    /// Limit to `count` results. A later `take` on the same chain
    /// replaces an earlier one.
    pub fn take(self, count: u64) -> Self {
        let prev = self.chain.clone();
        self.wrap(QueryNode::Take { count, prev })
    }

    /// Switch the wire style. The whole chain is rebuilt onto a fresh
    /// root, so style stays a property of the query as a whole.
    pub fn with_style(self, style: QueryStyle) -> Self {
        Self {
            chain: self.chain.with_style(style),
            channel: self.channel,
            _marker: PhantomData,
        }
    }

    /// The style the chain currently targets.
    pub fn style(&self) -> QueryStyle {
        self.chain.style()
    }

    /// Materialize the query: translate, issue one GET, decode.
    ///
    /// Translation problems surface here, not at the builder calls that
    /// introduced them.
    pub async fn fetch(self) -> Result<Vec<T>> {
        let translator = translator_for(self.chain.style());
        let rendered = translator.translate(&self.chain)?;

        let url = if rendered.is_empty() {
            self.channel.collection_url.clone()
        } else {
            format!("{}?{}", self.channel.collection_url, rendered.query_string())
        };
        debug!(translator = translator.name(), %url, "materializing query");

        let response = self.channel.request(Method::GET, &url).send().await?;
        let body = read_success(response).await?;
        let items: Vec<T> = decode(&body)?;
        debug!(count = items.len(), "query materialized");
        Ok(items)
    }

    /// Materialize and return the first result, if any.
    pub async fn first(self) -> Result<Option<T>> {
        let items = self.fetch().await?;
        Ok(items.into_iter().next())
    }
}
