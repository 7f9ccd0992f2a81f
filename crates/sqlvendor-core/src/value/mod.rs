//! Engine-level values, protocol-level values and the conversions between them

mod binding;

pub(crate) use binding::is_decimal_literal;
pub use binding::{supported_value_types, Binder, Extractor};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ValueType;

/// A typed value as the persistence engine sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Exact numeric, kept as text to preserve precision
    Decimal(String),
    String(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Instant(DateTime<Utc>),
}

impl Value {
    /// The value type, or `None` for NULL
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(ValueType::Boolean),
            Value::Byte(_) => Some(ValueType::Byte),
            Value::Short(_) => Some(ValueType::Short),
            Value::Integer(_) => Some(ValueType::Integer),
            Value::Long(_) => Some(ValueType::Long),
            Value::Float(_) => Some(ValueType::Float),
            Value::Double(_) => Some(ValueType::Double),
            Value::Decimal(_) => Some(ValueType::Decimal),
            Value::String(_) => Some(ValueType::String),
            Value::Bytes(_) => Some(ValueType::Bytes),
            Value::Date(_) => Some(ValueType::Date),
            Value::Time(_) => Some(ValueType::Time),
            Value::DateTime(_) => Some(ValueType::DateTime),
            Value::Instant(_) => Some(ValueType::Instant),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Widen any integral value to i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(i64::from(*v)),
            Value::Short(v) => Some(i64::from(*v)),
            Value::Integer(v) => Some(i64::from(*v)),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Read a value of the given type from its textual form
    pub fn parse(text: &str, value_type: ValueType) -> Result<Self, String> {
        let invalid = |e: &dyn std::fmt::Display| format!("invalid {value_type} '{text}': {e}");
        let value = match value_type {
            ValueType::Boolean => match text.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Value::Boolean(true),
                "false" | "0" | "no" => Value::Boolean(false),
                _ => return Err(invalid(&"expected true or false")),
            },
            ValueType::Byte => Value::Byte(text.parse().map_err(|e| invalid(&e))?),
            ValueType::Short => Value::Short(text.parse().map_err(|e| invalid(&e))?),
            ValueType::Integer => Value::Integer(text.parse().map_err(|e| invalid(&e))?),
            ValueType::Long => Value::Long(text.parse().map_err(|e| invalid(&e))?),
            ValueType::Float => Value::Float(text.parse().map_err(|e| invalid(&e))?),
            ValueType::Double => Value::Double(text.parse().map_err(|e| invalid(&e))?),
            ValueType::Decimal => Value::Decimal(text.to_string()),
            ValueType::String => Value::String(text.to_string()),
            ValueType::Bytes => {
                Value::Bytes(parse_hex(text).ok_or_else(|| invalid(&"expected hex digits"))?)
            }
            ValueType::Date => {
                Value::Date(NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| invalid(&e))?)
            }
            ValueType::Time => {
                Value::Time(NaiveTime::parse_from_str(text, "%H:%M:%S%.f").map_err(|e| invalid(&e))?)
            }
            ValueType::DateTime => Value::DateTime(
                NaiveDateTime::parse_from_str(&text.replacen('T', " ", 1), "%Y-%m-%d %H:%M:%S%.f")
                    .map_err(|e| invalid(&e))?,
            ),
            ValueType::Instant => Value::Instant(
                DateTime::parse_from_rfc3339(text)
                    .map_err(|e| invalid(&e))?
                    .with_timezone(&Utc),
            ),
        };
        Ok(value)
    }

    /// View this value as a temporal value without converting it
    pub fn as_temporal(&self) -> Option<TemporalValue> {
        match self {
            Value::Date(d) => Some(TemporalValue::Date(*d)),
            Value::Time(t) => Some(TemporalValue::Time(*t)),
            Value::DateTime(dt) => Some(TemporalValue::DateTime(*dt)),
            Value::Instant(i) => Some(TemporalValue::Instant(*i)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bytes(v) => {
                for byte in v {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Value::Date(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v),
            Value::Instant(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

fn parse_hex(text: &str) -> Option<Vec<u8>> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.len() % 2 != 0 || !digits.is_ascii() {
        return None;
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
        .collect()
}

/// Closed set of temporal representations a dialect formats directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalValue {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Instant(DateTime<Utc>),
}

impl From<TemporalValue> for Value {
    fn from(value: TemporalValue) -> Self {
        match value {
            TemporalValue::Date(d) => Value::Date(d),
            TemporalValue::Time(t) => Value::Time(t),
            TemporalValue::DateTime(dt) => Value::DateTime(dt),
            TemporalValue::Instant(i) => Value::Instant(i),
        }
    }
}

/// A parameter or result value as the database protocol sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WireValue {
    Null,
    Bit(bool),
    TinyInt(i8),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Real(f32),
    Double(f64),
    Numeric(String),
    Text(String),
    Binary(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
}

impl WireValue {
    /// Protocol-level kind name, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            WireValue::Null => "null",
            WireValue::Bit(_) => "bit",
            WireValue::TinyInt(_) => "tinyint",
            WireValue::SmallInt(_) => "smallint",
            WireValue::Int(_) => "int",
            WireValue::BigInt(_) => "bigint",
            WireValue::Real(_) => "real",
            WireValue::Double(_) => "double",
            WireValue::Numeric(_) => "numeric",
            WireValue::Text(_) => "text",
            WireValue::Binary(_) => "binary",
            WireValue::Date(_) => "date",
            WireValue::Time(_) => "time",
            WireValue::Timestamp(_) => "timestamp",
            WireValue::TimestampTz(_) => "timestamptz",
        }
    }
}

/// Per-execution state handed in by the session layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Zone used when an instant or epoch value must become a local date/time
    pub time_zone: FixedOffset,
}

impl ExecutionContext {
    pub fn utc() -> Self {
        Self {
            time_zone: Utc.fix(),
        }
    }

    pub fn with_time_zone(time_zone: FixedOffset) -> Self {
        Self { time_zone }
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type() {
        assert_eq!(Value::Null.value_type(), None);
        assert_eq!(Value::Short(1).value_type(), Some(ValueType::Short));
        assert_eq!(
            Value::Decimal("1.5".into()).value_type(),
            Some(ValueType::Decimal)
        );
    }

    #[test]
    fn test_display_is_vendor_neutral() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2024-03-09");
        assert_eq!(Value::Bytes(vec![0xca, 0xfe]).to_string(), "cafe");
        assert_eq!(Value::String("it's".into()).to_string(), "it's");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Value::parse("1", ValueType::Boolean), Ok(Value::Boolean(true)));
        assert_eq!(Value::parse("-7", ValueType::Short), Ok(Value::Short(-7)));
        assert_eq!(
            Value::parse("0xCAFE", ValueType::Bytes),
            Ok(Value::Bytes(vec![0xca, 0xfe]))
        );
        assert_eq!(
            Value::parse("2024-01-02T03:04:05", ValueType::DateTime),
            Ok(Value::DateTime(
                NaiveDate::from_ymd_opt(2024, 1, 2)
                    .unwrap()
                    .and_hms_opt(3, 4, 5)
                    .unwrap()
            ))
        );
        assert!(Value::parse("300", ValueType::Byte).is_err());
        assert!(Value::parse("abc", ValueType::Bytes).is_err());
        assert!(Value::parse("maybe", ValueType::Boolean).is_err());
    }

    #[test]
    fn test_as_temporal() {
        let time = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
        assert_eq!(
            Value::Time(time).as_temporal(),
            Some(TemporalValue::Time(time))
        );
        assert_eq!(Value::Long(5).as_temporal(), None);
    }
}
