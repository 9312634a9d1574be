//! Elasticsearch query generation for [`store_filter`] expressions: logical
//! nodes become `bool` queries, comparisons become `term`/`terms`/`range`
//! clauses, and sibling range clauses on the same field are merged.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use store_filter::{
    CompareOp, Comparison, FilterError, FilterExpr, Logical, LogicalOp, Operand, Scalar,
};

/// Parse a raw filter document and emit the equivalent Elasticsearch query.
pub fn translate(term: &Value) -> Result<Value, FilterError> {
    FilterExpr::parse(term).map(|expr| to_query(&expr))
}

/// Emit the Elasticsearch query document for an already-parsed expression.
pub fn to_query(expr: &FilterExpr) -> Value {
    match expr {
        FilterExpr::Logical(node) => logical_query(node),
        FilterExpr::Compare(comparison) => comparison_query(comparison),
    }
}

fn logical_query(node: &Logical) -> Value {
    let clauses = merge_range_clauses(node.operands().iter().map(to_query).collect());
    let bucket = match node.op() {
        LogicalOp::And => "must",
        LogicalOp::Or => "should",
        LogicalOp::Not => "must_not",
    };
    json!({ "bool": { bucket: clauses } })
}

fn comparison_query(comparison: &Comparison) -> Value {
    let field = comparison.field();
    match (comparison.op(), comparison.value()) {
        (CompareOp::Eq, Operand::Scalar(value)) => json!({ "term": { field: value.to_json() } }),
        (CompareOp::Ne, Operand::Scalar(value)) => {
            json!({ "bool": { "must_not": { "term": { field: value.to_json() } } } })
        }
        (CompareOp::In, Operand::List(values)) => {
            json!({ "terms": { field: json_values(values) } })
        }
        (CompareOp::NotIn, Operand::List(values)) => {
            json!({ "bool": { "must_not": { "terms": { field: json_values(values) } } } })
        }
        (
            CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte,
            Operand::Scalar(value),
        ) => {
            json!({ "range": { field: { range_key(comparison.op()): value.to_json() } } })
        }
        // Comparison construction enforces operand arity
        _ => unreachable!("comparison operand does not match its operator"),
    }
}

fn json_values(values: &[Scalar]) -> Vec<Value> {
    values.iter().map(Scalar::to_json).collect()
}

/// Key used inside a `range` object for an order comparison.
fn range_key(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Gt => "gt",
        CompareOp::Gte => "gte",
        CompareOp::Lt => "lt",
        CompareOp::Lte => "lte",
        _ => unreachable!("not a range operator"),
    }
}

/// Merge sibling `range` clauses that target the same field into one clause.
///
/// `{"range": {"date": {"gte": A}}}` next to `{"range": {"date": {"lt": B}}}`
/// collapses into `{"range": {"date": {"gte": A, "lt": B}}}`, placed where
/// the last of the original clauses stood. The merge only sees one clause
/// list at a time, so ranges under different bool buckets never combine.
fn merge_range_clauses(clauses: Vec<Value>) -> Vec<Value> {
    // first pass: collect operator/value pairs and the last position of every
    // range-targeted field
    let mut merged: IndexMap<String, Map<String, Value>> = IndexMap::new();
    let mut last_position: IndexMap<String, usize> = IndexMap::new();
    for (position, clause) in clauses.iter().enumerate() {
        if let Some((field, operators)) = range_clause_parts(clause) {
            merged
                .entry(field.to_string())
                .or_default()
                .extend(operators.iter().map(|(k, v)| (k.clone(), v.clone())));
            last_position.insert(field.to_string(), position);
        }
    }

    // second pass: rebuild the list, substituting the merged object at each
    // field's last position and dropping the earlier duplicates
    let mut result = Vec::with_capacity(clauses.len());
    for (position, clause) in clauses.into_iter().enumerate() {
        match range_clause_parts(&clause) {
            Some((field, _)) => {
                if last_position.get(field) == Some(&position) {
                    if let Some(operators) = merged.shift_remove(field) {
                        result.push(json!({ "range": { field: operators } }));
                    }
                }
            }
            None => result.push(clause),
        }
    }
    result
}

/// Field name and operator map of a `{"range": {field: {...}}}` clause.
fn range_clause_parts(clause: &Value) -> Option<(&str, &Map<String, Value>)> {
    let range = clause.as_object()?.get("range")?.as_object()?;
    let (field, operators) = range.iter().next()?;
    Some((field.as_str(), operators.as_object()?))
}
