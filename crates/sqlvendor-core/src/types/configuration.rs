//! Type code to preferred value type lookup

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};
use crate::types::{TypeCode, ValueType};

/// Lookup table used when a caller does not name a value type explicitly.
///
/// Supplied by the session layer; the dialect only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConfiguration {
    recommended: IndexMap<TypeCode, ValueType>,
}

impl TypeConfiguration {
    /// An empty table: every lookup fails
    pub fn empty() -> Self {
        Self {
            recommended: IndexMap::new(),
        }
    }

    /// Override or add the preferred value type for a code
    pub fn with(mut self, type_code: TypeCode, value_type: ValueType) -> Self {
        self.recommended.insert(type_code, value_type);
        self
    }

    /// Remove the mapping for a code
    pub fn without(mut self, type_code: TypeCode) -> Self {
        self.recommended.shift_remove(&type_code);
        self
    }

    pub fn recommended_value_type(&self, type_code: TypeCode) -> Result<ValueType> {
        self.recommended
            .get(&type_code)
            .copied()
            .ok_or(DialectError::NoRecommendedMapping { type_code })
    }
}

impl Default for TypeConfiguration {
    fn default() -> Self {
        use TypeCode::*;

        let mut recommended = IndexMap::new();
        for (code, value_type) in [
            (Bit, ValueType::Boolean),
            (Boolean, ValueType::Boolean),
            (TinyInt, ValueType::Byte),
            (SmallInt, ValueType::Short),
            (Integer, ValueType::Integer),
            (BigInt, ValueType::Long),
            (Real, ValueType::Float),
            (Float, ValueType::Double),
            (Double, ValueType::Double),
            (Numeric, ValueType::Decimal),
            (Decimal, ValueType::Decimal),
            (Char, ValueType::String),
            (Varchar, ValueType::String),
            (LongVarchar, ValueType::String),
            (NChar, ValueType::String),
            (NVarchar, ValueType::String),
            (LongNVarchar, ValueType::String),
            (Clob, ValueType::String),
            (NClob, ValueType::String),
            (Binary, ValueType::Bytes),
            (Varbinary, ValueType::Bytes),
            (LongVarbinary, ValueType::Bytes),
            (Blob, ValueType::Bytes),
            (Date, ValueType::Date),
            (Time, ValueType::Time),
            (Timestamp, ValueType::DateTime),
            (TimestampWithTimezone, ValueType::Instant),
        ] {
            recommended.insert(code, value_type);
        }
        Self { recommended }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mappings() {
        let config = TypeConfiguration::default();
        assert_eq!(
            config.recommended_value_type(TypeCode::Varchar),
            Ok(ValueType::String)
        );
        assert_eq!(
            config.recommended_value_type(TypeCode::Timestamp),
            Ok(ValueType::DateTime)
        );
    }

    #[test]
    fn test_missing_mapping() {
        let config = TypeConfiguration::default();
        assert_eq!(
            config.recommended_value_type(TypeCode::Other),
            Err(DialectError::NoRecommendedMapping {
                type_code: TypeCode::Other
            })
        );

        let config = TypeConfiguration::default().without(TypeCode::Date);
        assert!(config.recommended_value_type(TypeCode::Date).is_err());
    }
}
