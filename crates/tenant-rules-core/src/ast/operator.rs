//! Operators for condition trees

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators usable in a leaf condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// Strict equality (==)
    #[serde(rename = "==")]
    Eq,
    /// Strict inequality (!=)
    #[serde(rename = "!=")]
    Ne,
    /// Greater than (>)
    #[serde(rename = ">")]
    Gt,
    /// Less than (<)
    #[serde(rename = "<")]
    Lt,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    Ge,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    Le,
    /// Field value is a member of the literal array
    #[serde(rename = "in")]
    In,
    /// Field value is not a member of the literal array
    #[serde(rename = "not_in")]
    NotIn,
    /// Array membership or substring
    #[serde(rename = "contains")]
    Contains,
    /// Negated `contains`
    #[serde(rename = "not_contains")]
    NotContains,
    /// String prefix
    #[serde(rename = "starts_with")]
    StartsWith,
    /// String suffix
    #[serde(rename = "ends_with")]
    EndsWith,
    /// null, missing, empty string or empty array
    #[serde(rename = "is_empty")]
    IsEmpty,
    /// Negated `is_empty`
    #[serde(rename = "is_not_empty")]
    IsNotEmpty,
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 14] = [
        ComparisonOperator::Eq,
        ComparisonOperator::Ne,
        ComparisonOperator::Gt,
        ComparisonOperator::Lt,
        ComparisonOperator::Ge,
        ComparisonOperator::Le,
        ComparisonOperator::In,
        ComparisonOperator::NotIn,
        ComparisonOperator::Contains,
        ComparisonOperator::NotContains,
        ComparisonOperator::StartsWith,
        ComparisonOperator::EndsWith,
        ComparisonOperator::IsEmpty,
        ComparisonOperator::IsNotEmpty,
    ];

    /// Wire name of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "==",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Ge => ">=",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::In => "in",
            ComparisonOperator::NotIn => "not_in",
            ComparisonOperator::Contains => "contains",
            ComparisonOperator::NotContains => "not_contains",
            ComparisonOperator::StartsWith => "starts_with",
            ComparisonOperator::EndsWith => "ends_with",
            ComparisonOperator::IsEmpty => "is_empty",
            ComparisonOperator::IsNotEmpty => "is_not_empty",
        }
    }

    /// Returns true for the numeric ordering operators
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ComparisonOperator::Gt
                | ComparisonOperator::Lt
                | ComparisonOperator::Ge
                | ComparisonOperator::Le
        )
    }

    /// Returns true if the operator ignores the literal value
    pub fn is_unary(&self) -> bool {
        matches!(self, ComparisonOperator::IsEmpty | ComparisonOperator::IsNotEmpty)
    }
}

impl FromStr for ComparisonOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComparisonOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CoreError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical combinators joining child conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    /// Every child must hold
    And,
    /// At least one child must hold
    Or,
    /// Negates the first child
    Not,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
            LogicalOperator::Not => "not",
        }
    }
}

impl FromStr for LogicalOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(LogicalOperator::And),
            "or" => Ok(LogicalOperator::Or),
            "not" => Ok(LogicalOperator::Not),
            other => Err(CoreError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_round_trips_through_wire_name() {
        for op in ComparisonOperator::ALL {
            assert_eq!(op.as_str().parse::<ComparisonOperator>(), Ok(op));
        }
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(
            "between".parse::<ComparisonOperator>(),
            Err(CoreError::UnknownOperator("between".to_string()))
        );
        assert!("and".parse::<ComparisonOperator>().is_err());
    }

    #[test]
    fn test_operator_is_numeric() {
        assert!(ComparisonOperator::Gt.is_numeric());
        assert!(ComparisonOperator::Le.is_numeric());
        assert!(!ComparisonOperator::Eq.is_numeric());
        assert!(!ComparisonOperator::Contains.is_numeric());
    }

    #[test]
    fn test_operator_serde_uses_wire_name() {
        let json = serde_json::to_string(&ComparisonOperator::NotIn).unwrap();
        assert_eq!(json, "\"not_in\"");

        let op: ComparisonOperator = serde_json::from_str("\">=\"").unwrap();
        assert_eq!(op, ComparisonOperator::Ge);
    }

    #[test]
    fn test_logical_operator_parse() {
        assert_eq!("or".parse::<LogicalOperator>(), Ok(LogicalOperator::Or));
        assert!("xor".parse::<LogicalOperator>().is_err());
    }
}
