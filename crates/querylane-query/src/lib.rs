//! # querylane-query
//!
//! Query expression model and wire-format translators for querylane.
//!
//! This crate is pure data and pure functions: an immutable, persistent
//! query chain (filter / order / skip / take rooted at a styled
//! `Source`), and two interchangeable translators that lower a chain to
//! the query-string parameters of an HTTP GET:
//!
//! - [`render::RestTranslator`] — `search`, `<field>=<value>`, `sort`,
//!   `pageIndex`, `pageSize`
//! - [`render::ODataTranslator`] — `$filter`, `$orderby`, `$skip`, `$top`
//!
//! No I/O happens here; the deferred execution engine lives in
//! `querylane-client`.
//!
//! ## Example
//!
//! ```
//! use querylane_query::expr::{field, QueryNode, QueryStyle};
//! use querylane_query::render::translator_for;
//! use std::sync::Arc;
//!
//! let chain = Arc::new(QueryNode::Filter {
//!     predicate: field("status").eq("Active"),
//!     prev: QueryNode::source(QueryStyle::OData),
//! });
//!
//! let rendered = translator_for(chain.style()).translate(&chain).unwrap();
//! assert_eq!(rendered.get("$filter"), Some("status eq 'Active'"));
//! ```

pub mod error;
pub mod expr;
pub mod render;

pub use error::TranslateError;
pub use expr::{field, CompareOp, Predicate, QueryNode, QueryStyle, SortDirection, StringOp, Value};
pub use render::{translator_for, ODataTranslator, QueryTranslator, RenderedQuery, RestTranslator};
