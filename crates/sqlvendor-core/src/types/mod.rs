//! Abstract type codes and engine-level value types

mod configuration;
mod names;

pub use configuration::TypeConfiguration;
pub use names::{ColumnSize, ColumnTypeRule, TypeNameRegistry};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Abstract database type code, modelled on the JDBC type constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeCode {
    // Numeric types
    Bit,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Real,
    Double,
    Numeric,
    Decimal,

    // Character types
    Char,
    Varchar,
    LongVarchar,
    NChar,
    NVarchar,
    LongNVarchar,
    Clob,
    NClob,

    // Date/Time types
    Date,
    Time,
    Timestamp,
    TimestampWithTimezone,

    // Binary types
    Binary,
    Varbinary,
    LongVarbinary,
    Blob,

    Boolean,

    // Anything the engine cannot describe further
    Other,
}

impl TypeCode {
    pub const ALL: [TypeCode; 28] = [
        TypeCode::Bit,
        TypeCode::TinyInt,
        TypeCode::SmallInt,
        TypeCode::Integer,
        TypeCode::BigInt,
        TypeCode::Float,
        TypeCode::Real,
        TypeCode::Double,
        TypeCode::Numeric,
        TypeCode::Decimal,
        TypeCode::Char,
        TypeCode::Varchar,
        TypeCode::LongVarchar,
        TypeCode::NChar,
        TypeCode::NVarchar,
        TypeCode::LongNVarchar,
        TypeCode::Clob,
        TypeCode::NClob,
        TypeCode::Date,
        TypeCode::Time,
        TypeCode::Timestamp,
        TypeCode::TimestampWithTimezone,
        TypeCode::Binary,
        TypeCode::Varbinary,
        TypeCode::LongVarbinary,
        TypeCode::Blob,
        TypeCode::Boolean,
        TypeCode::Other,
    ];

    /// Lowercase name used in configuration files and messages
    pub fn name(&self) -> &'static str {
        match self {
            TypeCode::Bit => "bit",
            TypeCode::TinyInt => "tinyint",
            TypeCode::SmallInt => "smallint",
            TypeCode::Integer => "integer",
            TypeCode::BigInt => "bigint",
            TypeCode::Float => "float",
            TypeCode::Real => "real",
            TypeCode::Double => "double",
            TypeCode::Numeric => "numeric",
            TypeCode::Decimal => "decimal",
            TypeCode::Char => "char",
            TypeCode::Varchar => "varchar",
            TypeCode::LongVarchar => "longvarchar",
            TypeCode::NChar => "nchar",
            TypeCode::NVarchar => "nvarchar",
            TypeCode::LongNVarchar => "longnvarchar",
            TypeCode::Clob => "clob",
            TypeCode::NClob => "nclob",
            TypeCode::Date => "date",
            TypeCode::Time => "time",
            TypeCode::Timestamp => "timestamp",
            TypeCode::TimestampWithTimezone => "timestamp_with_timezone",
            TypeCode::Binary => "binary",
            TypeCode::Varbinary => "varbinary",
            TypeCode::LongVarbinary => "longvarbinary",
            TypeCode::Blob => "blob",
            TypeCode::Boolean => "boolean",
            TypeCode::Other => "other",
        }
    }

    /// The `java.sql.Types` constant, for interop with JDBC-based tooling
    pub fn jdbc_code(&self) -> i32 {
        match self {
            TypeCode::Bit => -7,
            TypeCode::TinyInt => -6,
            TypeCode::SmallInt => 5,
            TypeCode::Integer => 4,
            TypeCode::BigInt => -5,
            TypeCode::Float => 6,
            TypeCode::Real => 7,
            TypeCode::Double => 8,
            TypeCode::Numeric => 2,
            TypeCode::Decimal => 3,
            TypeCode::Char => 1,
            TypeCode::Varchar => 12,
            TypeCode::LongVarchar => -1,
            TypeCode::NChar => -15,
            TypeCode::NVarchar => -9,
            TypeCode::LongNVarchar => -16,
            TypeCode::Clob => 2005,
            TypeCode::NClob => 2011,
            TypeCode::Date => 91,
            TypeCode::Time => 92,
            TypeCode::Timestamp => 93,
            TypeCode::TimestampWithTimezone => 2014,
            TypeCode::Binary => -2,
            TypeCode::Varbinary => -3,
            TypeCode::LongVarbinary => -4,
            TypeCode::Blob => 2004,
            TypeCode::Boolean => 16,
            TypeCode::Other => 1111,
        }
    }

    pub fn is_character(&self) -> bool {
        matches!(
            self,
            TypeCode::Char
                | TypeCode::Varchar
                | TypeCode::LongVarchar
                | TypeCode::NChar
                | TypeCode::NVarchar
                | TypeCode::LongNVarchar
                | TypeCode::Clob
                | TypeCode::NClob
        )
    }

    pub fn is_nationalized(&self) -> bool {
        matches!(
            self,
            TypeCode::NChar | TypeCode::NVarchar | TypeCode::LongNVarchar | TypeCode::NClob
        )
    }

    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            TypeCode::Binary | TypeCode::Varbinary | TypeCode::LongVarbinary | TypeCode::Blob
        )
    }

    /// Temporal precision carried by this code, if it is a date/time code
    pub fn temporal_precision(&self) -> Option<TemporalPrecision> {
        match self {
            TypeCode::Date => Some(TemporalPrecision::Date),
            TypeCode::Time => Some(TemporalPrecision::Time),
            TypeCode::Timestamp | TypeCode::TimestampWithTimezone => {
                Some(TemporalPrecision::Timestamp)
            }
            _ => None,
        }
    }
}

impl FromStr for TypeCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .collect::<String>()
            .to_lowercase();
        let normalized = match normalized.as_str() {
            "int" => "integer",
            "bool" => "boolean",
            "timestamptz" => "timestampwithtimezone",
            other => other,
        };
        TypeCode::ALL
            .iter()
            .find(|code| code.name().replace('_', "") == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown type code: '{}'", s))
    }
}

impl TryFrom<String> for TypeCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeCode> for String {
    fn from(code: TypeCode) -> Self {
        code.name().to_string()
    }
}

impl std::fmt::Display for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Engine-level value type a binder accepts or an extractor produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    String,
    Bytes,
    Date,
    Time,
    DateTime,
    Instant,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Byte => "byte",
            ValueType::Short => "short",
            ValueType::Integer => "integer",
            ValueType::Long => "long",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::Decimal => "decimal",
            ValueType::String => "string",
            ValueType::Bytes => "bytes",
            ValueType::Date => "date",
            ValueType::Time => "time",
            ValueType::DateTime => "datetime",
            ValueType::Instant => "instant",
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            ValueType::Byte | ValueType::Short | ValueType::Integer | ValueType::Long
        )
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "boolean" | "bool" => Ok(ValueType::Boolean),
            "byte" | "i8" => Ok(ValueType::Byte),
            "short" | "i16" => Ok(ValueType::Short),
            "integer" | "int" | "i32" => Ok(ValueType::Integer),
            "long" | "i64" => Ok(ValueType::Long),
            "float" | "f32" => Ok(ValueType::Float),
            "double" | "f64" => Ok(ValueType::Double),
            "decimal" => Ok(ValueType::Decimal),
            "string" | "text" => Ok(ValueType::String),
            "bytes" => Ok(ValueType::Bytes),
            "date" => Ok(ValueType::Date),
            "time" => Ok(ValueType::Time),
            "datetime" => Ok(ValueType::DateTime),
            "instant" => Ok(ValueType::Instant),
            _ => Err(format!("Unknown value type: '{}'", s)),
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Precision used when rendering a temporal literal.
///
/// Not to be confused with [`crate::sql::TemporalUnit`], which names a field
/// for date-part extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalPrecision {
    Date,
    Time,
    Timestamp,
}

impl std::fmt::Display for TemporalPrecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemporalPrecision::Date => write!(f, "date"),
            TemporalPrecision::Time => write!(f, "time"),
            TemporalPrecision::Timestamp => write!(f, "timestamp"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_code_parse() {
        assert_eq!("VARCHAR".parse::<TypeCode>(), Ok(TypeCode::Varchar));
        assert_eq!("long_varbinary".parse::<TypeCode>(), Ok(TypeCode::LongVarbinary));
        assert_eq!("int".parse::<TypeCode>(), Ok(TypeCode::Integer));
        assert_eq!(
            "timestamp with timezone".parse::<TypeCode>(),
            Ok(TypeCode::TimestampWithTimezone)
        );
        assert!("money".parse::<TypeCode>().is_err());
    }

    #[test]
    fn test_type_code_names_round_trip() {
        for code in TypeCode::ALL {
            assert_eq!(code.name().parse::<TypeCode>(), Ok(code));
        }
    }

    #[test]
    fn test_temporal_precision() {
        assert_eq!(
            TypeCode::Date.temporal_precision(),
            Some(TemporalPrecision::Date)
        );
        assert_eq!(
            TypeCode::TimestampWithTimezone.temporal_precision(),
            Some(TemporalPrecision::Timestamp)
        );
        assert_eq!(TypeCode::Varchar.temporal_precision(), None);
    }
}
