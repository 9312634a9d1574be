use crate::expr::CompareOp;

/// Error types for filter parsing and expression construction
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    MalformedFilter(String),
    InvalidOperandType { field: String, op: CompareOp },
    UnsupportedValueType { field: String, op: CompareOp },
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::MalformedFilter(format!("invalid JSON: {}", err))
    }
}

impl From<serde_yaml_ng::Error> for FilterError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        FilterError::MalformedFilter(format!("invalid YAML: {}", err))
    }
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::MalformedFilter(msg) => write!(f, "Malformed filter: {}", msg),
            FilterError::InvalidOperandType { field, op } => {
                if op.takes_list() {
                    write!(f, "Operator `{}` on field `{}` requires a list of values", op, field)
                } else {
                    write!(
                        f,
                        "Operator `{}` on field `{}` requires a single value, not a list",
                        op, field
                    )
                }
            }
            FilterError::UnsupportedValueType { field, op } => {
                write!(
                    f,
                    "Unsupported value type for `{}` on field `{}`: expected a string, integer, float or boolean",
                    op, field
                )
            }
        }
    }
}

impl std::error::Error for FilterError {}
