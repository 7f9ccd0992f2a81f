//! Error types

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::types::{TypeCode, ValueType};

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DialectError>;

/// Failures raised by a dialect.
///
/// Every variant is a hard failure raised at the offending call. Format
/// tokens and temporal units without a vendor equivalent are never reported
/// here: they pass through untranslated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DialectError {
    /// The chosen strategy cannot express the requested operation
    #[error("{operation} is not supported by the {dialect} dialect ({strategy})")]
    #[diagnostic(
        code(sqlvendor::unsupported_operation),
        help("check the dialect capabilities before generating this construct")
    )]
    UnsupportedOperation {
        dialect: String,
        operation: String,
        strategy: String,
    },

    /// No column type name is registered for the type code
    #[error("no column type registered for {type_code}{}", length_suffix(.length))]
    #[diagnostic(
        code(sqlvendor::type_not_registered),
        help("register a column type for this code in the dialect definition")
    )]
    TypeNotRegistered {
        type_code: TypeCode,
        length: Option<u64>,
    },

    /// No value descriptor is registered for the type code
    #[error("no value descriptor registered for {type_code}")]
    #[diagnostic(code(sqlvendor::descriptor_not_registered))]
    DescriptorNotRegistered { type_code: TypeCode },

    /// The type configuration has no preferred value type for the code
    #[error("no recommended value type mapping for {type_code}")]
    #[diagnostic(
        code(sqlvendor::no_recommended_mapping),
        help("pass an explicit value type or extend the type configuration")
    )]
    NoRecommendedMapping { type_code: TypeCode },

    /// A value could not be converted between its engine and wire forms
    #[error("cannot convert {value_type} value for {type_code}: {reason}")]
    #[diagnostic(code(sqlvendor::value_conversion))]
    ValueConversion {
        type_code: TypeCode,
        value_type: ValueType,
        reason: String,
    },

    /// The statement handed to a rewriter does not have the expected shape
    #[error("{message}")]
    #[diagnostic(code(sqlvendor::invalid_statement))]
    InvalidStatement {
        message: String,
        #[source_code]
        sql: String,
        #[label("here")]
        span: SourceSpan,
    },

    /// Date-format substitution rules could not be compiled
    #[error("invalid date format rules: {0}")]
    #[diagnostic(code(sqlvendor::invalid_format_rules))]
    InvalidFormatRules(String),

    /// A dialect definition could not be loaded or applied
    #[error("invalid dialect configuration: {0}")]
    #[diagnostic(code(sqlvendor::config))]
    Config(String),
}

impl DialectError {
    pub fn unsupported(
        dialect: impl Into<String>,
        operation: impl Into<String>,
        strategy: impl Into<String>,
    ) -> Self {
        Self::UnsupportedOperation {
            dialect: dialect.into(),
            operation: operation.into(),
            strategy: strategy.into(),
        }
    }

    pub fn conversion(
        type_code: TypeCode,
        value_type: ValueType,
        reason: impl Into<String>,
    ) -> Self {
        Self::ValueConversion {
            type_code,
            value_type,
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind (e.g., "unsupported-operation")
    pub fn kind(&self) -> &'static str {
        match self {
            DialectError::UnsupportedOperation { .. } => "unsupported-operation",
            DialectError::TypeNotRegistered { .. } => "type-not-registered",
            DialectError::DescriptorNotRegistered { .. } => "descriptor-not-registered",
            DialectError::NoRecommendedMapping { .. } => "no-recommended-mapping",
            DialectError::ValueConversion { .. } => "value-conversion",
            DialectError::InvalidStatement { .. } => "invalid-statement",
            DialectError::InvalidFormatRules(_) => "invalid-format-rules",
            DialectError::Config(_) => "config",
        }
    }
}

fn length_suffix(length: &Option<u64>) -> String {
    match length {
        Some(l) => format!(" with length {l}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_not_registered_message() {
        let err = DialectError::TypeNotRegistered {
            type_code: TypeCode::Other,
            length: Some(10),
        };
        assert_eq!(
            err.to_string(),
            "no column type registered for other with length 10"
        );
        assert_eq!(err.kind(), "type-not-registered");
    }

    #[test]
    fn test_unsupported_message() {
        let err = DialectError::unsupported("sqlserver", "offset 5", "top-only");
        assert_eq!(
            err.to_string(),
            "offset 5 is not supported by the sqlserver dialect (top-only)"
        );
    }
}
