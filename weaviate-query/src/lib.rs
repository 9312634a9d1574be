//! Weaviate where-clause generation for [`store_filter`] expressions.
//!
//! Weaviate has no negation operator, so NOT nodes are rewritten through the
//! inversion transform before emission. Membership tests expand into
//! per-value equality clauses, and scalar values are emitted under a typed
//! key (`valueDate`, `valueString`, `valueInt`, `valueNumber`,
//! `valueBoolean`) with date-shaped strings normalized to RFC 3339.

pub mod rfc3339;

use serde_json::{json, Value};
use store_filter::{
    CompareOp, Comparison, FilterError, FilterExpr, Logical, LogicalOp, Operand, Scalar,
};

/// Parse a raw filter document and emit the equivalent where-clause.
pub fn translate(term: &Value) -> Result<Value, FilterError> {
    FilterExpr::parse(term).map(|expr| to_where(&expr))
}

/// Emit the Weaviate where-clause document for an already-parsed expression.
pub fn to_where(expr: &FilterExpr) -> Value {
    match expr {
        FilterExpr::Logical(node) => match node.op() {
            LogicalOp::And => combinator_clause("And", node.operands()),
            LogicalOp::Or => combinator_clause("Or", node.operands()),
            LogicalOp::Not => not_clause(node),
        },
        FilterExpr::Compare(comparison) => comparison_clause(comparison),
    }
}

fn combinator_clause(operator: &str, operands: &[FilterExpr]) -> Value {
    let operands: Vec<Value> = operands.iter().map(to_where).collect();
    json!({ "operator": operator, "operands": operands })
}

/// NOT has no Weaviate counterpart. A NOT over siblings behaves as the
/// implicit AND of those siblings, so emit the inversion of that AND; a NOT
/// around a single condition then needs no wrapper at all.
fn not_clause(node: &Logical) -> Value {
    let inverted = node.invert();
    if inverted.operands().len() == 1 {
        to_where(&inverted.operands()[0])
    } else {
        combinator_clause("Or", inverted.operands())
    }
}

fn comparison_clause(comparison: &Comparison) -> Value {
    let field = comparison.field();
    match (comparison.op(), comparison.value()) {
        (CompareOp::Eq, Operand::Scalar(value)) => leaf_clause(field, "Equal", value),
        (CompareOp::Ne, Operand::Scalar(value)) => leaf_clause(field, "NotEqual", value),
        (CompareOp::Gt, Operand::Scalar(value)) => leaf_clause(field, "GreaterThan", value),
        (CompareOp::Gte, Operand::Scalar(value)) => leaf_clause(field, "GreaterThanEqual", value),
        (CompareOp::Lt, Operand::Scalar(value)) => leaf_clause(field, "LessThan", value),
        (CompareOp::Lte, Operand::Scalar(value)) => leaf_clause(field, "LessThanEqual", value),
        // no native membership primitive: expand per value, OR of equalities
        // for In, AND of inequalities for NotIn
        (CompareOp::In, Operand::List(values)) => expansion_clause("Or", "Equal", field, values),
        (CompareOp::NotIn, Operand::List(values)) => {
            expansion_clause("And", "NotEqual", field, values)
        }
        // Comparison construction enforces operand arity
        _ => unreachable!("comparison operand does not match its operator"),
    }
}

fn expansion_clause(combinator: &str, operator: &str, field: &str, values: &[Scalar]) -> Value {
    let operands: Vec<Value> = values
        .iter()
        .map(|value| leaf_clause(field, operator, value))
        .collect();
    json!({ "operator": combinator, "operands": operands })
}

/// Single `path`/`operator`/typed-value clause.
fn leaf_clause(field: &str, operator: &str, value: &Scalar) -> Value {
    let (value_key, json_value) = typed_value(value);
    json!({ "path": [field], "operator": operator, value_key: json_value })
}

/// Typed value key and payload for a leaf clause. Strings try date
/// normalization first; only on failure do they stay plain strings.
fn typed_value(value: &Scalar) -> (&'static str, Value) {
    match value {
        Scalar::String(s) => match rfc3339::to_rfc3339(s) {
            Ok(date) => ("valueDate", Value::String(date)),
            Err(_) => ("valueString", value.to_json()),
        },
        Scalar::Int(_) => ("valueInt", value.to_json()),
        Scalar::Float(_) => ("valueNumber", value.to_json()),
        Scalar::Bool(_) => ("valueBoolean", value.to_json()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_value_keys() {
        assert_eq!(
            typed_value(&Scalar::from("nytimes")),
            ("valueString", json!("nytimes"))
        );
        assert_eq!(
            typed_value(&Scalar::from("2015-01-01")),
            ("valueDate", json!("2015-01-01T00:00:00Z"))
        );
        assert_eq!(typed_value(&Scalar::from(3)), ("valueInt", json!(3)));
        assert_eq!(typed_value(&Scalar::from(2.5)), ("valueNumber", json!(2.5)));
        assert_eq!(typed_value(&Scalar::from(true)), ("valueBoolean", json!(true)));
    }

    #[test]
    fn test_leaf_clause_shape() {
        assert_eq!(
            leaf_clause("publisher", "Equal", &Scalar::from("nytimes")),
            json!({"path": ["publisher"], "operator": "Equal", "valueString": "nytimes"})
        );
    }
}
