//! Wire-format translators.
//!
//! Translators lower an immutable query chain into the query-string
//! parameters of an HTTP GET, applying convention-specific naming,
//! operators, and encoding. Each translator is a pure function of the
//! whole chain; style never changes mid-walk.

mod odata;
mod rest;

pub use odata::ODataTranslator;
pub use rest::RestTranslator;

use crate::error::TranslateError;
use crate::expr::{Predicate, QueryNode, QueryStyle, SortDirection};

/// Output from translation: ordered wire parameters.
///
/// Values are kept raw here so callers (and tests) can inspect them;
/// [`RenderedQuery::query_string`] applies percent-encoding when the
/// parameters are joined for the request URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedQuery {
    /// `(name, value)` pairs in emission order.
    pub params: Vec<(String, String)>,
}

impl RenderedQuery {
    /// Encode and join the parameters into an `a=b&c=d` query string.
    ///
    /// Empty when the chain carried no operations; callers then omit the
    /// `?` entirely.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Look up a parameter by name (first match).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Trait for lowering a query chain to wire parameters.
pub trait QueryTranslator: Send + Sync {
    /// Unique name for this translator
    fn name(&self) -> &'static str;

    /// Translate the chain into wire query parameters
    fn translate(&self, chain: &QueryNode) -> Result<RenderedQuery, TranslateError>;
}

/// Select the translator for a chain's style.
pub fn translator_for(style: QueryStyle) -> &'static dyn QueryTranslator {
    match style {
        QueryStyle::Rest => &RestTranslator,
        QueryStyle::OData => &ODataTranslator,
    }
}

/// One ordering key, flattened out of the chain.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OrderKey {
    pub field: String,
    pub direction: SortDirection,
}

/// A query chain flattened into declaration order.
///
/// Both translators start from this shape: filters and ordering keys in
/// the order they were chained, and the surviving skip/take bounds
/// (last write on the chain wins).
#[derive(Debug, Clone, Default)]
pub(crate) struct QueryPlan {
    pub filters: Vec<Predicate>,
    pub order: Vec<OrderKey>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

impl QueryPlan {
    /// Flatten a chain. Walks leaf-to-root, then reverses the accumulated
    /// operations so the result reads in declaration order.
    pub fn from_chain(chain: &QueryNode) -> QueryPlan {
        let mut plan = QueryPlan::default();
        let mut node = chain;
        loop {
            match node {
                QueryNode::Source { .. } => break,
                QueryNode::Filter { predicate, prev } => {
                    plan.filters.push(predicate.clone());
                    node = prev;
                }
                QueryNode::OrderBy {
                    field,
                    direction,
                    prev,
                } => {
                    plan.order.push(OrderKey {
                        field: field.clone(),
                        direction: *direction,
                    });
                    node = prev;
                }
                QueryNode::Skip { count, prev } => {
                    // Nearest the leaf is the most recent call, so the
                    // first one seen on the walk shadows the rest.
                    if plan.skip.is_none() {
                        plan.skip = Some(*count);
                    }
                    node = prev;
                }
                QueryNode::Take { count, prev } => {
                    if plan.take.is_none() {
                        plan.take = Some(*count);
                    }
                    node = prev;
                }
            }
        }
        plan.filters.reverse();
        plan.order.reverse();
        plan
    }
}
