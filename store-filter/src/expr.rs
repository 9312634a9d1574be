use crate::error::FilterError;
use crate::value::{Operand, Scalar};
use std::str::FromStr;

/// Logical combinators over sibling filter conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

impl LogicalOp {
    /// De Morgan complement. `Not` inverts to the OR of its inverted
    /// operands: a NOT over siblings behaves as an implicit AND of them.
    pub fn inverse(&self) -> LogicalOp {
        match self {
            LogicalOp::And => LogicalOp::Or,
            LogicalOp::Or => LogicalOp::And,
            LogicalOp::Not => LogicalOp::Or,
        }
    }
}

/// Comparison operators a field clause can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    In,
    NotIn,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FromStr for CompareOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$eq" => Ok(CompareOp::Eq),
            "$ne" => Ok(CompareOp::Ne),
            "$in" => Ok(CompareOp::In),
            "$nin" => Ok(CompareOp::NotIn),
            "$gt" => Ok(CompareOp::Gt),
            "$gte" => Ok(CompareOp::Gte),
            "$lt" => Ok(CompareOp::Lt),
            "$lte" => Ok(CompareOp::Lte),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = match self {
            CompareOp::Eq => "$eq",
            CompareOp::Ne => "$ne",
            CompareOp::In => "$in",
            CompareOp::NotIn => "$nin",
            CompareOp::Gt => "$gt",
            CompareOp::Gte => "$gte",
            CompareOp::Lt => "$lt",
            CompareOp::Lte => "$lte",
        };
        write!(f, "{}", key)
    }
}

impl CompareOp {
    /// Membership operators take a list operand, every other operator a scalar.
    pub fn takes_list(&self) -> bool {
        matches!(self, CompareOp::In | CompareOp::NotIn)
    }

    /// Operator complementation used by the inversion transform.
    pub fn inverse(&self) -> CompareOp {
        match self {
            CompareOp::Eq => CompareOp::Ne,
            CompareOp::Ne => CompareOp::Eq,
            CompareOp::In => CompareOp::NotIn,
            CompareOp::NotIn => CompareOp::In,
            CompareOp::Gt => CompareOp::Lte,
            CompareOp::Gte => CompareOp::Lt,
            CompareOp::Lt => CompareOp::Gte,
            CompareOp::Lte => CompareOp::Gt,
        }
    }
}

/// Single field/operator/value predicate.
///
/// Operand arity is checked at construction: membership operators require a
/// list, all others a single scalar. Emitters can therefore rely on the
/// stored operand matching the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    field: String,
    op: CompareOp,
    value: Operand,
}

impl Comparison {
    pub fn new(
        field: impl Into<String>,
        op: CompareOp,
        value: impl Into<Operand>,
    ) -> Result<Self, FilterError> {
        let field = field.into();
        let value = value.into();
        if op.takes_list() != value.is_list() {
            return Err(FilterError::InvalidOperandType { field, op });
        }
        Ok(Comparison { field, op, value })
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(field, CompareOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(field, CompareOp::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(field, CompareOp::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(field, CompareOp::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(field, CompareOp::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::scalar(field, CompareOp::Lte, value)
    }

    pub fn is_in(field: impl Into<String>, values: Vec<Scalar>) -> Self {
        Comparison {
            field: field.into(),
            op: CompareOp::In,
            value: Operand::List(values),
        }
    }

    pub fn not_in(field: impl Into<String>, values: Vec<Scalar>) -> Self {
        Comparison {
            field: field.into(),
            op: CompareOp::NotIn,
            value: Operand::List(values),
        }
    }

    fn scalar(field: impl Into<String>, op: CompareOp, value: impl Into<Scalar>) -> Self {
        Comparison {
            field: field.into(),
            op,
            value: Operand::Scalar(value.into()),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn op(&self) -> CompareOp {
        self.op
    }

    pub fn value(&self) -> &Operand {
        &self.value
    }

    /// Complemented predicate over the same field and value.
    pub fn invert(&self) -> Comparison {
        Comparison {
            field: self.field.clone(),
            op: self.op.inverse(),
            value: self.value.clone(),
        }
    }
}

/// Logical combinator node; always carries at least one operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    op: LogicalOp,
    operands: Vec<FilterExpr>,
}

impl Logical {
    pub fn new(op: LogicalOp, operands: Vec<FilterExpr>) -> Result<Self, FilterError> {
        if operands.is_empty() {
            return Err(FilterError::MalformedFilter(
                "logical operator requires at least one operand".to_string(),
            ));
        }
        Ok(Logical { op, operands })
    }

    pub fn op(&self) -> LogicalOp {
        self.op
    }

    pub fn operands(&self) -> &[FilterExpr] {
        &self.operands
    }

    /// De Morgan rewrite: complemented combinator over inverted operands.
    pub fn invert(&self) -> Logical {
        Logical {
            op: self.op.inverse(),
            operands: self.operands.iter().map(FilterExpr::invert).collect(),
        }
    }
}

/// A parsed filter expression: logical combinators over field comparisons.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Logical(Logical),
    Compare(Comparison),
}

impl FilterExpr {
    pub fn and(operands: Vec<FilterExpr>) -> Result<FilterExpr, FilterError> {
        Logical::new(LogicalOp::And, operands).map(FilterExpr::Logical)
    }

    pub fn or(operands: Vec<FilterExpr>) -> Result<FilterExpr, FilterError> {
        Logical::new(LogicalOp::Or, operands).map(FilterExpr::Logical)
    }

    pub fn not(operands: Vec<FilterExpr>) -> Result<FilterExpr, FilterError> {
        Logical::new(LogicalOp::Not, operands).map(FilterExpr::Logical)
    }

    /// Logically negated rendition of the whole tree.
    ///
    /// Comparisons flip to their complement operator, AND and OR swap with
    /// every operand inverted, and NOT becomes the OR of its inverted
    /// operands. The result never contains a NOT node; the receiver is left
    /// untouched.
    pub fn invert(&self) -> FilterExpr {
        match self {
            FilterExpr::Logical(node) => FilterExpr::Logical(node.invert()),
            FilterExpr::Compare(comparison) => FilterExpr::Compare(comparison.invert()),
        }
    }
}

impl From<Comparison> for FilterExpr {
    fn from(comparison: Comparison) -> Self {
        FilterExpr::Compare(comparison)
    }
}

impl From<Logical> for FilterExpr {
    fn from(node: Logical) -> Self {
        FilterExpr::Logical(node)
    }
}
