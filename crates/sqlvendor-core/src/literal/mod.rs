//! Rendering values as SQL literals

mod temporal;

pub use temporal::TemporalLiteralFormatter;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::{DialectError, Result};
use crate::types::{TemporalPrecision, TypeCode, ValueType};
use crate::value::{is_decimal_literal, ExecutionContext, TemporalValue, Value};

/// Renders a value as literal SQL text for one dialect
pub trait LiteralFormatter: std::fmt::Debug + Send + Sync {
    fn to_literal(&self, value: &Value, dialect: &Dialect, ctx: &ExecutionContext)
        -> Result<String>;
}

/// How a dialect spells boolean literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BooleanLiteralStyle {
    /// `1` and `0`
    Numeric,
    /// `true` and `false`
    #[default]
    Keyword,
}

impl BooleanLiteralStyle {
    pub fn render(&self, value: bool) -> &'static str {
        match (self, value) {
            (BooleanLiteralStyle::Numeric, true) => "1",
            (BooleanLiteralStyle::Numeric, false) => "0",
            (BooleanLiteralStyle::Keyword, true) => "true",
            (BooleanLiteralStyle::Keyword, false) => "false",
        }
    }
}

/// How a dialect spells binary literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinaryLiteralStyle {
    /// `X'cafe'`
    #[default]
    Hex,
    /// `0xcafe`
    PrefixedHex,
    /// `'\xcafe'::bytea`
    Bytea,
}

impl BinaryLiteralStyle {
    pub fn render(&self, bytes: &[u8]) -> String {
        let mut hex = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            hex.push_str(&format!("{:02x}", byte));
        }
        match self {
            BinaryLiteralStyle::Hex => format!("X'{hex}'"),
            BinaryLiteralStyle::PrefixedHex => format!("0x{hex}"),
            BinaryLiteralStyle::Bytea => format!("'\\x{hex}'::bytea"),
        }
    }
}

/// How a dialect spells date, time and timestamp literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateTimeLiteralStyle {
    /// JDBC escapes: `{d '..'}`, `{t '..'}`, `{ts '..'}`
    #[default]
    JdbcEscape,
    /// Typed literals: `date '..'`, `time '..'`, `timestamp '..'`
    Ansi,
}

impl DateTimeLiteralStyle {
    /// Render `value` at `precision`, truncating or widening the value as
    /// the precision requires
    pub fn render(&self, value: TemporalValue, precision: TemporalPrecision) -> Result<String> {
        let text = match (precision, value) {
            (TemporalPrecision::Date, TemporalValue::Date(d)) => d.format("%Y-%m-%d").to_string(),
            (TemporalPrecision::Date, TemporalValue::DateTime(dt)) => {
                dt.format("%Y-%m-%d").to_string()
            }
            (TemporalPrecision::Date, TemporalValue::Instant(i)) => {
                i.format("%Y-%m-%d").to_string()
            }
            (TemporalPrecision::Time, TemporalValue::Time(t)) => t.format("%H:%M:%S").to_string(),
            (TemporalPrecision::Time, TemporalValue::DateTime(dt)) => {
                dt.format("%H:%M:%S").to_string()
            }
            (TemporalPrecision::Time, TemporalValue::Instant(i)) => {
                i.format("%H:%M:%S").to_string()
            }
            (TemporalPrecision::Timestamp, TemporalValue::DateTime(dt)) => {
                dt.format("%Y-%m-%d %H:%M:%S%.9f").to_string()
            }
            (TemporalPrecision::Timestamp, TemporalValue::Date(d)) => {
                d.and_time(chrono::NaiveTime::default())
                    .format("%Y-%m-%d %H:%M:%S%.9f")
                    .to_string()
            }
            (TemporalPrecision::Timestamp, TemporalValue::Instant(i)) => {
                i.format("%Y-%m-%d %H:%M:%S%.9f%:z").to_string()
            }
            (precision, value) => {
                let value_type = Value::from(value).value_type().unwrap_or(ValueType::String);
                return Err(DialectError::conversion(
                    precision_type_code(precision),
                    value_type,
                    format!("a {value_type} value has no {precision} part"),
                ));
            }
        };

        Ok(match (self, precision) {
            (DateTimeLiteralStyle::JdbcEscape, TemporalPrecision::Date) => format!("{{d '{text}'}}"),
            (DateTimeLiteralStyle::JdbcEscape, TemporalPrecision::Time) => format!("{{t '{text}'}}"),
            (DateTimeLiteralStyle::JdbcEscape, TemporalPrecision::Timestamp) => {
                format!("{{ts '{text}'}}")
            }
            (DateTimeLiteralStyle::Ansi, TemporalPrecision::Date) => format!("date '{text}'"),
            (DateTimeLiteralStyle::Ansi, TemporalPrecision::Time) => format!("time '{text}'"),
            (DateTimeLiteralStyle::Ansi, TemporalPrecision::Timestamp) => {
                format!("timestamp '{text}'")
            }
        })
    }
}

pub(crate) fn precision_type_code(precision: TemporalPrecision) -> TypeCode {
    match precision {
        TemporalPrecision::Date => TypeCode::Date,
        TemporalPrecision::Time => TypeCode::Time,
        TemporalPrecision::Timestamp => TypeCode::Timestamp,
    }
}

/// Numbers and decimals, written with their plain textual form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicLiteralFormatter {
    type_code: TypeCode,
}

impl BasicLiteralFormatter {
    pub fn new(type_code: TypeCode) -> Self {
        Self { type_code }
    }
}

impl LiteralFormatter for BasicLiteralFormatter {
    fn to_literal(&self, value: &Value, dialect: &Dialect, _ctx: &ExecutionContext) -> Result<String> {
        match value {
            Value::Null => Ok("null".to_string()),
            Value::Byte(_) | Value::Short(_) | Value::Integer(_) | Value::Long(_) => {
                Ok(value.to_string())
            }
            Value::Float(f) if f.is_finite() => Ok(value.to_string()),
            Value::Double(d) if d.is_finite() => Ok(value.to_string()),
            Value::Decimal(s) if is_decimal_literal(s) => Ok(s.clone()),
            Value::Boolean(b) => Ok(dialect.boolean_literal(*b).to_string()),
            Value::Bytes(bytes) => Ok(dialect.binary_literal(bytes)),
            other => Err(no_literal_form(self.type_code, other)),
        }
    }
}

/// Quoted character data, with `N` prefixed for nationalized codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterLiteralFormatter {
    type_code: TypeCode,
}

impl CharacterLiteralFormatter {
    pub fn new(type_code: TypeCode) -> Self {
        Self { type_code }
    }
}

impl LiteralFormatter for CharacterLiteralFormatter {
    fn to_literal(&self, value: &Value, _dialect: &Dialect, _ctx: &ExecutionContext) -> Result<String> {
        let text = match value {
            Value::Null => return Ok("null".to_string()),
            Value::String(s) => s,
            other => return Err(no_literal_form(self.type_code, other)),
        };
        let prefix = if self.type_code.is_nationalized() { "N" } else { "" };
        Ok(format!("{prefix}'{}'", text.replace('\'', "''")))
    }
}

/// Boolean values, spelled the way the dialect wants them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanLiteralFormatter {
    type_code: TypeCode,
}

impl BooleanLiteralFormatter {
    pub fn new(type_code: TypeCode) -> Self {
        Self { type_code }
    }
}

impl LiteralFormatter for BooleanLiteralFormatter {
    fn to_literal(&self, value: &Value, dialect: &Dialect, _ctx: &ExecutionContext) -> Result<String> {
        match value {
            Value::Null => Ok("null".to_string()),
            Value::Boolean(b) => Ok(dialect.boolean_literal(*b).to_string()),
            other => Err(no_literal_form(self.type_code, other)),
        }
    }
}

fn no_literal_form(type_code: TypeCode, value: &Value) -> DialectError {
    let value_type = value.value_type().unwrap_or(ValueType::String);
    DialectError::conversion(
        type_code,
        value_type,
        format!("no {type_code} literal form for this value"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Product;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_datetime_styles() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_nano_opt(14, 5, 7, 120_000_000)
            .unwrap();
        let value = TemporalValue::DateTime(dt);
        assert_eq!(
            DateTimeLiteralStyle::JdbcEscape
                .render(value, TemporalPrecision::Timestamp)
                .unwrap(),
            "{ts '2024-03-09 14:05:07.120000000'}"
        );
        assert_eq!(
            DateTimeLiteralStyle::JdbcEscape
                .render(value, TemporalPrecision::Date)
                .unwrap(),
            "{d '2024-03-09'}"
        );
        assert_eq!(
            DateTimeLiteralStyle::Ansi
                .render(value, TemporalPrecision::Time)
                .unwrap(),
            "time '14:05:07'"
        );
    }

    #[test]
    fn test_instant_keeps_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            DateTimeLiteralStyle::Ansi
                .render(TemporalValue::Instant(instant), TemporalPrecision::Timestamp)
                .unwrap(),
            "timestamp '2024-01-02 03:04:05.000000000+00:00'"
        );
    }

    #[test]
    fn test_time_has_no_date_part() {
        let time = NaiveTime::from_hms_opt(1, 2, 3).unwrap();
        let err = DateTimeLiteralStyle::JdbcEscape
            .render(TemporalValue::Time(time), TemporalPrecision::Date)
            .unwrap_err();
        assert_eq!(err.kind(), "value-conversion");
    }

    #[test]
    fn test_character_literals() {
        let dialect = Product::SqlServer.dialect().unwrap();
        let ctx = ExecutionContext::utc();
        let plain = CharacterLiteralFormatter::new(TypeCode::Varchar);
        assert_eq!(
            plain
                .to_literal(&Value::String("it's".into()), &dialect, &ctx)
                .unwrap(),
            "'it''s'"
        );
        let national = CharacterLiteralFormatter::new(TypeCode::NVarchar);
        assert_eq!(
            national
                .to_literal(&Value::String("héllo".into()), &dialect, &ctx)
                .unwrap(),
            "N'héllo'"
        );
        assert!(plain.to_literal(&Value::Long(1), &dialect, &ctx).is_err());
    }

    #[test]
    fn test_boolean_literals() {
        let ctx = ExecutionContext::utc();
        let formatter = BooleanLiteralFormatter::new(TypeCode::Boolean);
        let sqlserver = Product::SqlServer.dialect().unwrap();
        let postgres = Product::PostgreSQL.dialect().unwrap();
        assert_eq!(
            formatter
                .to_literal(&Value::Boolean(true), &sqlserver, &ctx)
                .unwrap(),
            "1"
        );
        assert_eq!(
            formatter
                .to_literal(&Value::Boolean(false), &postgres, &ctx)
                .unwrap(),
            "false"
        );
    }

    #[test]
    fn test_basic_literals() {
        let dialect = Product::SqlServer.dialect().unwrap();
        let ctx = ExecutionContext::utc();
        let formatter = BasicLiteralFormatter::new(TypeCode::Numeric);
        assert_eq!(
            formatter
                .to_literal(&Value::Decimal("-12.50".into()), &dialect, &ctx)
                .unwrap(),
            "-12.50"
        );
        assert_eq!(
            formatter.to_literal(&Value::Null, &dialect, &ctx).unwrap(),
            "null"
        );
        assert!(formatter
            .to_literal(&Value::Decimal("1; drop table t".into()), &dialect, &ctx)
            .is_err());
        assert!(formatter
            .to_literal(&Value::Double(f64::NAN), &dialect, &ctx)
            .is_err());
    }

    #[test]
    fn test_binary_styles() {
        let bytes = [0xca, 0xfe];
        assert_eq!(BinaryLiteralStyle::Hex.render(&bytes), "X'cafe'");
        assert_eq!(BinaryLiteralStyle::PrefixedHex.render(&bytes), "0xcafe");
        assert_eq!(BinaryLiteralStyle::Bytea.render(&bytes), "'\\xcafe'::bytea");
    }
}
