//! REST query translator.
//!
//! Lowers a chain to ad-hoc REST parameters: `search` for the first
//! string-contains clause, `<field>=<value>` for the first equality
//! clause, `sort=<field>_<asc|desc>`, and `pageIndex`/`pageSize` paging.
//!
//! REST has no general boolean algebra on the wire. Compound `and`/`or`
//! predicates are scanned left-to-right and only the first recognized
//! clause of each kind is honored; the remainder is dropped. This is a
//! known protocol limitation, preserved on purpose. A filter in which no
//! clause is recognized at all fails translation instead.

use crate::error::TranslateError;
use crate::expr::{CompareOp, Predicate, QueryNode, SortDirection, StringOp, Value};
use crate::render::{QueryPlan, QueryTranslator, RenderedQuery};

/// Translator for REST-convention backends.
pub struct RestTranslator;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Clauses the REST convention can carry.
#[derive(Default)]
struct RecognizedClauses {
    /// `search=<literal>` from the first string-contains clause
    search: Option<String>,
    /// `<field>=<value>` from the first equality clause
    equality: Option<(String, String)>,
}

impl RecognizedClauses {
    /// Scan a predicate depth-first, left branch before right, keeping
    /// the first clause of each kind.
    fn scan(&mut self, predicate: &Predicate) {
        match predicate {
            Predicate::Compare {
                field,
                op: CompareOp::Eq,
                value,
            } => {
                if self.equality.is_none() {
                    self.equality = Some((field.to_lowercase(), plain(value)));
                }
            }
            Predicate::StringMatch {
                field: _,
                op: StringOp::Contains,
                value,
            } => {
                if self.search.is_none() {
                    self.search = Some(value.clone());
                }
            }
            Predicate::And(left, right) | Predicate::Or(left, right) => {
                self.scan(left);
                self.scan(right);
            }
            // Ordering comparisons and prefix/suffix matches have no
            // REST encoding
            Predicate::Compare { .. } | Predicate::StringMatch { .. } => {}
        }
    }

    fn is_empty(&self) -> bool {
        self.search.is_none() && self.equality.is_none()
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::DateTime(dt) => dt.format(DATE_FORMAT).to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

impl QueryTranslator for RestTranslator {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn translate(&self, chain: &QueryNode) -> Result<RenderedQuery, TranslateError> {
        let plan = QueryPlan::from_chain(chain);
        let mut rendered = RenderedQuery::default();

        if !plan.filters.is_empty() {
            let mut clauses = RecognizedClauses::default();
            for predicate in &plan.filters {
                clauses.scan(predicate);
            }
            if clauses.is_empty() {
                return Err(TranslateError::UnsupportedPredicate {
                    style: "rest",
                    message: "no equality or contains clause; REST carries no \
                              ordering comparisons or prefix/suffix matches"
                        .to_string(),
                });
            }
            if let Some(term) = clauses.search {
                rendered.params.push(("search".to_string(), term));
            }
            if let Some((field, value)) = clauses.equality {
                rendered.params.push((field, value));
            }
        }

        if !plan.order.is_empty() {
            let sort = plan
                .order
                .iter()
                .map(|key| {
                    let direction = match key.direction {
                        SortDirection::Asc => "asc",
                        SortDirection::Desc => "desc",
                    };
                    format!("{}_{}", key.field.to_lowercase(), direction)
                })
                .collect::<Vec<_>>()
                .join(",");
            rendered.params.push(("sort".to_string(), sort));
        }

        // Paging only exists once a page size is known; pageIndex is the
        // skip expressed in whole pages.
        if let Some(take) = plan.take {
            let page_index = if take > 0 {
                plan.skip.unwrap_or(0) / take
            } else {
                0
            };
            rendered
                .params
                .push(("pageIndex".to_string(), page_index.to_string()));
            rendered
                .params
                .push(("pageSize".to_string(), take.to_string()));
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{field, QueryStyle};
    use std::sync::Arc;
    use test_case::test_case;

    fn filtered(predicate: Predicate) -> Arc<QueryNode> {
        Arc::new(QueryNode::Filter {
            predicate,
            prev: QueryNode::source(QueryStyle::Rest),
        })
    }

    #[test]
    fn test_equality_becomes_field_param() {
        let chain = filtered(field("Status").eq("Active"));

        let rendered = RestTranslator.translate(&chain).unwrap();

        assert_eq!(rendered.get("status"), Some("Active"));
    }

    #[test]
    fn test_contains_becomes_search_param() {
        let chain = filtered(field("name").contains("Summer"));

        let rendered = RestTranslator.translate(&chain).unwrap();

        assert_eq!(rendered.get("search"), Some("Summer"));
    }

    #[test]
    fn test_compound_keeps_first_clause_of_each_kind() {
        // Protocol limitation: everything past the first recognized
        // equality / contains clause is dropped
        let chain = filtered(
            field("status")
                .eq("Active")
                .and(field("status").eq("Paused"))
                .and(field("name").contains("Sale")),
        );

        let rendered = RestTranslator.translate(&chain).unwrap();

        assert_eq!(rendered.get("status"), Some("Active"));
        assert_eq!(rendered.get("search"), Some("Sale"));
        assert_eq!(
            rendered.params.iter().filter(|(n, _)| n == "status").count(),
            1
        );
    }

    #[test]
    fn test_unrecognized_filter_fails_translation() {
        let chain = filtered(field("budget").gt(1000));

        let result = RestTranslator.translate(&chain);

        assert!(matches!(
            result,
            Err(TranslateError::UnsupportedPredicate { style: "rest", .. })
        ));
    }

    #[test]
    fn test_sort_joins_direction_suffixed_fields() {
        let chain = Arc::new(QueryNode::OrderBy {
            field: "Budget".to_string(),
            direction: SortDirection::Desc,
            prev: Arc::new(QueryNode::OrderBy {
                field: "Name".to_string(),
                direction: SortDirection::Asc,
                prev: QueryNode::source(QueryStyle::Rest),
            }),
        });

        let rendered = RestTranslator.translate(&chain).unwrap();

        assert_eq!(rendered.get("sort"), Some("name_asc,budget_desc"));
    }

    #[test_case(0, 10, "0"; "first page")]
    #[test_case(10, 10, "1"; "second page")]
    #[test_case(45, 10, "4"; "floor of partial page")]
    #[test_case(9, 10, "0"; "skip below one page")]
    fn test_page_index_is_skip_over_take(skip: u64, take: u64, expected: &str) {
        let chain = Arc::new(QueryNode::Take {
            count: take,
            prev: Arc::new(QueryNode::Skip {
                count: skip,
                prev: filtered(field("status").eq("Active")),
            }),
        });

        let rendered = RestTranslator.translate(&chain).unwrap();

        assert_eq!(rendered.get("pageIndex"), Some(expected));
        assert_eq!(rendered.get("pageSize"), Some(take.to_string().as_str()));
    }

    #[test]
    fn test_zero_take_defaults_page_index() {
        let chain = Arc::new(QueryNode::Take {
            count: 0,
            prev: Arc::new(QueryNode::Skip {
                count: 30,
                prev: QueryNode::source(QueryStyle::Rest),
            }),
        });

        let rendered = RestTranslator.translate(&chain).unwrap();

        assert_eq!(rendered.get("pageIndex"), Some("0"));
        assert_eq!(rendered.get("pageSize"), Some("0"));
    }

    #[test]
    fn test_skip_without_take_emits_no_paging() {
        let chain = Arc::new(QueryNode::Skip {
            count: 30,
            prev: QueryNode::source(QueryStyle::Rest),
        });

        let rendered = RestTranslator.translate(&chain).unwrap();

        assert!(rendered.is_empty());
    }

    #[test]
    fn test_query_string_assembly() {
        let chain = Arc::new(QueryNode::Take {
            count: 20,
            prev: Arc::new(QueryNode::Skip {
                count: 40,
                prev: Arc::new(QueryNode::OrderBy {
                    field: "name".to_string(),
                    direction: SortDirection::Asc,
                    prev: filtered(field("status").eq("Active")),
                }),
            }),
        });

        let rendered = RestTranslator.translate(&chain).unwrap();

        assert_eq!(
            rendered.query_string(),
            "status=Active&sort=name_asc&pageIndex=2&pageSize=20"
        );
    }
}
