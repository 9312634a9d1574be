use serde_json::json;
use store_filter::FilterError;

#[test]
fn test_equality_leaf_clause() {
    assert_eq!(
        weaviate_query::translate(&json!({"publisher": "nytimes"})).unwrap(),
        json!({"path": ["publisher"], "operator": "Equal", "valueString": "nytimes"})
    );
}

#[test]
fn test_not_around_a_single_condition_needs_no_wrapper() {
    assert_eq!(
        weaviate_query::translate(&json!({"$not": {"type": "article"}})).unwrap(),
        json!({"path": ["type"], "operator": "NotEqual", "valueString": "article"})
    );
}

#[test]
fn test_not_over_and_becomes_or_of_inverted_conditions() {
    assert_eq!(
        weaviate_query::translate(&json!({"$not": {"$and": {"a": 1, "b": 2}}})).unwrap(),
        json!({"operator": "Or", "operands": [
            {"path": ["a"], "operator": "NotEqual", "valueInt": 1},
            {"path": ["b"], "operator": "NotEqual", "valueInt": 2}
        ]})
    );
}

#[test]
fn test_not_over_bare_siblings_matches_not_over_and() {
    let explicit = weaviate_query::translate(&json!({"$not": {"$and": {"a": 1, "b": 2}}})).unwrap();
    let implicit = weaviate_query::translate(&json!({"$not": {"a": 1, "b": 2}})).unwrap();
    assert_eq!(implicit, explicit);
}

#[test]
fn test_double_not_follows_the_inversion_table() {
    assert_eq!(
        weaviate_query::translate(&json!({"$not": {"$not": {"type": "article"}}})).unwrap(),
        json!({"operator": "Or", "operands": [
            {"path": ["type"], "operator": "NotEqual", "valueString": "article"}
        ]})
    );
}

#[test]
fn test_membership_expands_to_or_of_equalities() {
    assert_eq!(
        weaviate_query::translate(&json!({"genre": {"$in": ["economy", "politics"]}})).unwrap(),
        json!({"operator": "Or", "operands": [
            {"path": ["genre"], "operator": "Equal", "valueString": "economy"},
            {"path": ["genre"], "operator": "Equal", "valueString": "politics"}
        ]})
    );
}

#[test]
fn test_non_membership_expands_to_and_of_inequalities() {
    assert_eq!(
        weaviate_query::translate(&json!({"genre": {"$nin": ["economy", "politics"]}})).unwrap(),
        json!({"operator": "And", "operands": [
            {"path": ["genre"], "operator": "NotEqual", "valueString": "economy"},
            {"path": ["genre"], "operator": "NotEqual", "valueString": "politics"}
        ]})
    );
}

#[test]
fn test_order_comparison_operators() {
    assert_eq!(
        weaviate_query::translate(&json!({"rating": {"$gt": 3}})).unwrap(),
        json!({"path": ["rating"], "operator": "GreaterThan", "valueInt": 3})
    );
    assert_eq!(
        weaviate_query::translate(&json!({"rating": {"$lte": 4}})).unwrap(),
        json!({"path": ["rating"], "operator": "LessThanEqual", "valueInt": 4})
    );
}

#[test]
fn test_date_shaped_strings_emit_value_date() {
    assert_eq!(
        weaviate_query::translate(&json!({"date": {"$gte": "2015-01-01"}})).unwrap(),
        json!({"path": ["date"], "operator": "GreaterThanEqual", "valueDate": "2015-01-01T00:00:00Z"})
    );
}

#[test]
fn test_plain_strings_emit_value_string() {
    assert_eq!(
        weaviate_query::translate(&json!({"publisher": {"$ne": "nytimes"}})).unwrap(),
        json!({"path": ["publisher"], "operator": "NotEqual", "valueString": "nytimes"})
    );
}

#[test]
fn test_numeric_and_boolean_value_keys() {
    assert_eq!(
        weaviate_query::translate(&json!({"score": {"$gt": 1.5}})).unwrap(),
        json!({"path": ["score"], "operator": "GreaterThan", "valueNumber": 1.5})
    );
    assert_eq!(
        weaviate_query::translate(&json!({"published": true})).unwrap(),
        json!({"path": ["published"], "operator": "Equal", "valueBoolean": true})
    );
}

#[test]
fn test_singleton_and_keeps_its_wrapper() {
    // only the NOT-elimination path unwraps single operands
    assert_eq!(
        weaviate_query::translate(&json!({"$and": {"type": "article"}})).unwrap(),
        json!({"operator": "And", "operands": [
            {"path": ["type"], "operator": "Equal", "valueString": "article"}
        ]})
    );
}

#[test]
fn test_nested_filter_document() {
    let filter = json!({
        "$and": {
            "type": {"$eq": "article"},
            "date": {"$gte": "2015-01-01", "$lt": "2021-01-01"},
            "rating": {"$gte": 3},
            "$or": {
                "genre": {"$in": ["economy", "politics"]},
                "publisher": {"$eq": "nytimes"}
            }
        }
    });
    assert_eq!(
        weaviate_query::translate(&filter).unwrap(),
        json!({"operator": "And", "operands": [
            {"path": ["type"], "operator": "Equal", "valueString": "article"},
            {"path": ["date"], "operator": "GreaterThanEqual", "valueDate": "2015-01-01T00:00:00Z"},
            {"path": ["date"], "operator": "LessThan", "valueDate": "2021-01-01T00:00:00Z"},
            {"path": ["rating"], "operator": "GreaterThanEqual", "valueInt": 3},
            {"operator": "Or", "operands": [
                {"operator": "Or", "operands": [
                    {"path": ["genre"], "operator": "Equal", "valueString": "economy"},
                    {"path": ["genre"], "operator": "Equal", "valueString": "politics"}
                ]},
                {"path": ["publisher"], "operator": "Equal", "valueString": "nytimes"}
            ]}
        ]})
    );
}

#[test]
fn test_inverted_membership_inside_not() {
    // NOT over a membership test inverts it to its non-membership expansion
    assert_eq!(
        weaviate_query::translate(&json!({"$not": {"genre": {"$in": ["economy"]}}})).unwrap(),
        json!({"operator": "And", "operands": [
            {"path": ["genre"], "operator": "NotEqual", "valueString": "economy"}
        ]})
    );
}

#[test]
fn test_translate_rejects_malformed_filters() {
    assert!(matches!(
        weaviate_query::translate(&json!(5)),
        Err(FilterError::MalformedFilter(_))
    ));
}
