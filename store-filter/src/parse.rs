use crate::error::FilterError;
use crate::expr::{CompareOp, Comparison, FilterExpr, Logical, LogicalOp};
use crate::value::{Operand, Scalar};
use serde_json::{Map, Value};
use std::str::FromStr;

impl FilterExpr {
    /// Parse a filter document into an expression tree.
    ///
    /// The input is a mapping or a sequence of mappings; sibling conditions
    /// are implicitly AND-ed, and a single condition is returned unwrapped.
    /// Unrecognized comparison-operator keys are an error; use
    /// [`FilterExpr::parse_lenient`] to skip them instead.
    pub fn parse(term: &Value) -> Result<FilterExpr, FilterError> {
        Parser { lenient: false }.parse(term)
    }

    /// Like [`FilterExpr::parse`], but unrecognized comparison-operator keys
    /// are skipped with a warning instead of failing, matching the tolerant
    /// behavior of older filter consumers.
    pub fn parse_lenient(term: &Value) -> Result<FilterExpr, FilterError> {
        Parser { lenient: true }.parse(term)
    }

    /// Parse a filter document from JSON text.
    pub fn from_json_str(input: &str) -> Result<FilterExpr, FilterError> {
        let term: Value = serde_json::from_str(input)?;
        FilterExpr::parse(&term)
    }

    /// Parse a filter document from YAML text.
    pub fn from_yaml_str(input: &str) -> Result<FilterExpr, FilterError> {
        let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
        FilterExpr::parse(&serde_json::to_value(yaml)?)
    }
}

struct Parser {
    lenient: bool,
}

impl Parser {
    fn parse(&self, term: &Value) -> Result<FilterExpr, FilterError> {
        let mut conditions = self.conditions(term)?;
        // implicit AND at the unguarded top level; a single condition stays
        // unwrapped
        match conditions.len() {
            0 => Err(FilterError::MalformedFilter(
                "filter contains no conditions".to_string(),
            )),
            1 => Ok(conditions.remove(0)),
            _ => FilterExpr::and(conditions),
        }
    }

    /// Flatten a mapping or sequence of mappings into its sibling conditions,
    /// preserving mapping iteration order.
    fn conditions(&self, term: &Value) -> Result<Vec<FilterExpr>, FilterError> {
        let mappings: Vec<&Map<String, Value>> = match term {
            Value::Object(mapping) => vec![mapping],
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_object().ok_or_else(|| {
                        FilterError::MalformedFilter(format!(
                            "expected a mapping, got {}",
                            json_kind(item)
                        ))
                    })
                })
                .collect::<Result<_, _>>()?,
            other => {
                return Err(FilterError::MalformedFilter(format!(
                    "expected a mapping or a sequence of mappings, got {}",
                    json_kind(other)
                )))
            }
        };

        let mut conditions = Vec::new();
        for mapping in mappings {
            for (key, value) in mapping {
                match key.as_str() {
                    "$and" => conditions.push(self.logical(LogicalOp::And, value)?),
                    "$or" => conditions.push(self.logical(LogicalOp::Or, value)?),
                    "$not" => conditions.push(self.logical(LogicalOp::Not, value)?),
                    field => self.field_clause(field, value, &mut conditions)?,
                }
            }
        }
        Ok(conditions)
    }

    fn logical(&self, op: LogicalOp, value: &Value) -> Result<FilterExpr, FilterError> {
        Logical::new(op, self.conditions(value)?).map(FilterExpr::Logical)
    }

    fn field_clause(
        &self,
        field: &str,
        clause: &Value,
        out: &mut Vec<FilterExpr>,
    ) -> Result<(), FilterError> {
        match clause {
            Value::Object(operators) => {
                for (key, value) in operators {
                    match CompareOp::from_str(key) {
                        Ok(op) => out.push(comparison(field, op, value)?.into()),
                        Err(()) if self.lenient => {
                            log::warn!(
                                "ignoring unrecognized comparison operator `{}` on field `{}`",
                                key,
                                field
                            );
                        }
                        Err(()) => {
                            return Err(FilterError::MalformedFilter(format!(
                                "unrecognized comparison operator `{}` on field `{}`",
                                key, field
                            )))
                        }
                    }
                }
                Ok(())
            }
            // a bare list is shorthand for `$in`, a bare scalar for `$eq`
            Value::Array(_) => {
                out.push(comparison(field, CompareOp::In, clause)?.into());
                Ok(())
            }
            _ => {
                out.push(comparison(field, CompareOp::Eq, clause)?.into());
                Ok(())
            }
        }
    }
}

fn comparison(field: &str, op: CompareOp, value: &Value) -> Result<Comparison, FilterError> {
    let operand = if op.takes_list() {
        let items = value.as_array().ok_or_else(|| FilterError::InvalidOperandType {
            field: field.to_string(),
            op,
        })?;
        let values = items
            .iter()
            .map(|item| scalar_value(field, op, item))
            .collect::<Result<Vec<_>, _>>()?;
        Operand::List(values)
    } else if value.is_array() {
        return Err(FilterError::InvalidOperandType {
            field: field.to_string(),
            op,
        });
    } else {
        Operand::Scalar(scalar_value(field, op, value)?)
    };
    Comparison::new(field, op, operand)
}

fn scalar_value(field: &str, op: CompareOp, value: &Value) -> Result<Scalar, FilterError> {
    Scalar::from_json(value).ok_or_else(|| FilterError::UnsupportedValueType {
        field: field.to_string(),
        op,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
