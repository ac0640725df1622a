//! # querylane-client
//!
//! Deferred query execution and typed CRUD collections over REST/OData
//! HTTP APIs.
//!
//! Build an [`ApiContext`] from [`ContextOptions`], register typed
//! collections through its [`EndpointBuilder`], then compose queries
//! fluently and consume them with `fetch`/`first`. Translation to wire
//! parameters is lazy: no network work happens until a terminal call,
//! and each query object performs exactly one request.
//!
//! ```no_run
//! use querylane_client::{ApiContext, ApiResource, ContextOptions};
//! use querylane_query::expr::{field, QueryStyle};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Campaign {
//!     id: String,
//!     name: String,
//!     status: String,
//! }
//!
//! impl ApiResource for Campaign {
//!     const RESOURCE: &'static str = "campaign";
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! # async fn run() -> querylane_client::Result<()> {
//! let context = ApiContext::new(
//!     ContextOptions::new("https://h/api").bearer_token("token"),
//! )?;
//! let campaigns = context.endpoint::<Campaign>().path("/campaigns").build()?;
//!
//! let active = campaigns
//!     .query()
//!     .with_style(QueryStyle::OData)
//!     .filter(field("status").eq("Active"))
//!     .order_by_desc("budget")
//!     .take(10)
//!     .fetch()
//!     .await?;
//! # let _ = active;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod endpoint;
pub mod error;
mod http;
pub mod query;
pub mod resource;
pub mod set;

pub use context::{ApiContext, ContextOptions};
pub use endpoint::{resolve_endpoint, EndpointBuilder, EndpointSpec};
pub use error::{Error, Result};
pub use query::Query;
pub use resource::ApiResource;
pub use set::ApiSet;

// Re-export the expression surface so callers need only one crate
pub use querylane_query::expr::{field, Predicate, QueryStyle};
