//! OData query translator.
//!
//! Lowers a chain to `$filter` / `$orderby` / `$skip` / `$top`
//! parameters. Property names are lower-cased; string and date literals
//! are single-quoted, dates in `yyyy-MM-ddTHH:mm:ss` form.

use crate::error::TranslateError;
use crate::expr::{CompareOp, Predicate, QueryNode, SortDirection, StringOp, Value};
use crate::render::{QueryPlan, QueryTranslator, RenderedQuery};

/// Translator for OData-convention backends.
pub struct ODataTranslator;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl ODataTranslator {
    fn render_predicate(&self, predicate: &Predicate, out: &mut String) {
        match predicate {
            Predicate::Compare { field, op, value } => {
                out.push_str(&field.to_lowercase());
                out.push(' ');
                out.push_str(compare_op(*op));
                out.push(' ');
                out.push_str(&literal(value));
            }
            Predicate::StringMatch { field, op, value } => {
                let function = match op {
                    StringOp::Contains => "contains",
                    StringOp::StartsWith => "startswith",
                    StringOp::EndsWith => "endswith",
                };
                out.push_str(&format!(
                    "{}({},'{}')",
                    function,
                    field.to_lowercase(),
                    value
                ));
            }
            Predicate::And(left, right) => {
                self.render_predicate(left, out);
                out.push_str(" and ");
                self.render_predicate(right, out);
            }
            // Parenthesize only `or` groups so precedence survives
            Predicate::Or(left, right) => {
                out.push('(');
                self.render_predicate(left, out);
                out.push_str(" or ");
                self.render_predicate(right, out);
                out.push(')');
            }
        }
    }
}

fn compare_op(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "eq",
        CompareOp::Ne => "ne",
        CompareOp::Gt => "gt",
        CompareOp::Ge => "ge",
        CompareOp::Lt => "lt",
        CompareOp::Le => "le",
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        Value::DateTime(dt) => format!("'{}'", dt.format(DATE_FORMAT)),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

impl QueryTranslator for ODataTranslator {
    fn name(&self) -> &'static str {
        "odata"
    }

    fn translate(&self, chain: &QueryNode) -> Result<RenderedQuery, TranslateError> {
        let plan = QueryPlan::from_chain(chain);
        let mut rendered = RenderedQuery::default();

        if !plan.filters.is_empty() {
            let mut filter = String::new();
            for (i, predicate) in plan.filters.iter().enumerate() {
                if i > 0 {
                    filter.push_str(" and ");
                }
                self.render_predicate(predicate, &mut filter);
            }
            rendered.params.push(("$filter".to_string(), filter));
        }

        if !plan.order.is_empty() {
            let order = plan
                .order
                .iter()
                .map(|key| match key.direction {
                    SortDirection::Asc => key.field.to_lowercase(),
                    SortDirection::Desc => format!("{} desc", key.field.to_lowercase()),
                })
                .collect::<Vec<_>>()
                .join(", ");
            rendered.params.push(("$orderby".to_string(), order));
        }

        if let Some(skip) = plan.skip {
            if skip > 0 {
                rendered.params.push(("$skip".to_string(), skip.to_string()));
            }
        }

        // $top only when a Take was explicitly chained
        if let Some(take) = plan.take {
            rendered.params.push(("$top".to_string(), take.to_string()));
        }

        Ok(rendered)
    }
}
