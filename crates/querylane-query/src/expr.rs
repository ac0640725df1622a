//! Query expression model.
//!
//! Pure data describing a declarative query: a predicate tree, ordering
//! keys, skip/take bounds, and the wire style the query targets. Builder
//! calls wrap an existing chain in a new node; nothing here performs I/O
//! or validates semantics. Only translation (see [`crate::render`]) can
//! reject a chain.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Literal value on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Null,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

/// Comparison operators supported by both wire styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

/// String-matching operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringOp {
    Contains,
    StartsWith,
    EndsWith,
}

/// Filter predicate tree.
///
/// Leaves compare a property path against a literal; `And`/`Or` combine
/// sub-predicates. Construction is total: unsupported shapes are only
/// rejected by the active translator, at materialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },
    StringMatch {
        field: String,
        op: StringOp,
        value: String,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    /// Combine with another predicate using logical AND.
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    /// Combine with another predicate using logical OR.
    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Or(Box::new(self), Box::new(other))
    }
}

/// Start a predicate on a named property.
///
/// ```
/// use querylane_query::expr::field;
///
/// let p = field("status").eq("Active").and(field("budget").gt(1000));
/// ```
pub fn field(name: impl Into<String>) -> Field {
    Field(name.into())
}

/// Intermediate handle returned by [`field`]; finish it with a comparison.
pub struct Field(String);

impl Field {
    pub fn eq(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Eq, value)
    }

    pub fn ne(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Ne, value)
    }

    pub fn gt(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Gt, value)
    }

    pub fn ge(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Ge, value)
    }

    pub fn lt(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Lt, value)
    }

    pub fn le(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Le, value)
    }

    pub fn contains(self, value: impl Into<String>) -> Predicate {
        self.string_match(StringOp::Contains, value)
    }

    pub fn starts_with(self, value: impl Into<String>) -> Predicate {
        self.string_match(StringOp::StartsWith, value)
    }

    pub fn ends_with(self, value: impl Into<String>) -> Predicate {
        self.string_match(StringOp::EndsWith, value)
    }

    fn compare(self, op: CompareOp, value: impl Into<Value>) -> Predicate {
        Predicate::Compare {
            field: self.0,
            op,
            value: value.into(),
        }
    }

    fn string_match(self, op: StringOp, value: impl Into<String>) -> Predicate {
        Predicate::StringMatch {
            field: self.0,
            op,
            value: value.into(),
        }
    }
}

/// Sort direction for an ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Wire convention the query is translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryStyle {
    /// Ad-hoc REST parameters: `search`, `<field>=<value>`, `sort`,
    /// `pageIndex`, `pageSize`.
    #[default]
    Rest,
    /// OData parameters: `$filter`, `$orderby`, `$skip`, `$top`.
    OData,
}

/// One node of an immutable query chain.
///
/// A chain is a strictly linear list from leaf to [`QueryNode::Source`].
/// Every builder call wraps the prior chain in a new node; shared tails
/// are reference-counted, so branching two queries off one base chain is
/// safe and cheap. Translators walk root-to-leaf to preserve declaration
/// order.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// Chain root, carrying the translation style for the whole chain.
    Source { style: QueryStyle },
    Filter {
        predicate: Predicate,
        prev: Arc<QueryNode>,
    },
    /// An ordering key. Additional `OrderBy` nodes act as then-by keys;
    /// the first declared key is the primary sort.
    OrderBy {
        field: String,
        direction: SortDirection,
        prev: Arc<QueryNode>,
    },
    /// Last `Skip` on a chain wins; earlier ones are shadowed.
    Skip { count: u64, prev: Arc<QueryNode> },
    /// Last `Take` on a chain wins; earlier ones are shadowed.
    Take { count: u64, prev: Arc<QueryNode> },
}

impl QueryNode {
    /// New chain root with the given style.
    pub fn source(style: QueryStyle) -> Arc<QueryNode> {
        Arc::new(QueryNode::Source { style })
    }

    /// The previous node, or `None` at the root.
    pub fn prev(&self) -> Option<&Arc<QueryNode>> {
        match self {
            QueryNode::Source { .. } => None,
            QueryNode::Filter { prev, .. }
            | QueryNode::OrderBy { prev, .. }
            | QueryNode::Skip { prev, .. }
            | QueryNode::Take { prev, .. } => Some(prev),
        }
    }

    /// The style carried by the chain's root.
    pub fn style(&self) -> QueryStyle {
        let mut node = self;
        loop {
            match node {
                QueryNode::Source { style } => return *style,
                _ => node = node.prev().expect("non-source node has a prev"),
            }
        }
    }

    /// Rebuild the whole chain onto a fresh root with a different style.
    ///
    /// Style is a root-level property of the query, not of the collection:
    /// switching it re-wraps every prior operation around a new `Source`
    /// so translators stay pure functions of one chain.
    pub fn with_style(&self, style: QueryStyle) -> Arc<QueryNode> {
        match self {
            QueryNode::Source { .. } => QueryNode::source(style),
            QueryNode::Filter { predicate, prev } => Arc::new(QueryNode::Filter {
                predicate: predicate.clone(),
                prev: prev.with_style(style),
            }),
            QueryNode::OrderBy {
                field,
                direction,
                prev,
            } => Arc::new(QueryNode::OrderBy {
                field: field.clone(),
                direction: *direction,
                prev: prev.with_style(style),
            }),
            QueryNode::Skip { count, prev } => Arc::new(QueryNode::Skip {
                count: *count,
                prev: prev.with_style(style),
            }),
            QueryNode::Take { count, prev } => Arc::new(QueryNode::Take {
                count: *count,
                prev: prev.with_style(style),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_builder_shapes() {
        let p = field("status").eq("Active").and(field("budget").gt(1000));

        match p {
            Predicate::And(left, right) => {
                assert_eq!(
                    *left,
                    Predicate::Compare {
                        field: "status".to_string(),
                        op: CompareOp::Eq,
                        value: Value::String("Active".to_string()),
                    }
                );
                assert_eq!(
                    *right,
                    Predicate::Compare {
                        field: "budget".to_string(),
                        op: CompareOp::Gt,
                        value: Value::Int(1000),
                    }
                );
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_is_persistent() {
        let source = QueryNode::source(QueryStyle::Rest);
        let filtered = Arc::new(QueryNode::Filter {
            predicate: field("name").contains("Sale"),
            prev: source.clone(),
        });

        // Branching off the shared source does not disturb the first chain
        let skipped = Arc::new(QueryNode::Skip {
            count: 10,
            prev: source.clone(),
        });

        assert_eq!(filtered.prev().unwrap().as_ref(), source.as_ref());
        assert_eq!(skipped.prev().unwrap().as_ref(), source.as_ref());
        assert_eq!(filtered.style(), QueryStyle::Rest);
    }

    #[test]
    fn test_with_style_rewraps_operations() {
        let chain = Arc::new(QueryNode::Take {
            count: 5,
            prev: Arc::new(QueryNode::Filter {
                predicate: field("status").eq("Active"),
                prev: QueryNode::source(QueryStyle::Rest),
            }),
        });

        let switched = chain.with_style(QueryStyle::OData);

        assert_eq!(switched.style(), QueryStyle::OData);
        // Operations survive the rewrap in order
        match switched.as_ref() {
            QueryNode::Take { count: 5, prev } => {
                assert!(matches!(prev.as_ref(), QueryNode::Filter { .. }));
            }
            other => panic!("expected Take at leaf, got {other:?}"),
        }
        // Original chain is untouched
        assert_eq!(chain.style(), QueryStyle::Rest);
    }
}
