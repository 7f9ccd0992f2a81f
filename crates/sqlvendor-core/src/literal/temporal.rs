use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tracing::trace;

use crate::dialect::Dialect;
use crate::error::{DialectError, Result};
use crate::literal::{precision_type_code, LiteralFormatter};
use crate::types::{TemporalPrecision, ValueType};
use crate::value::{ExecutionContext, TemporalValue, Value};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Date, time and timestamp literals.
///
/// Values that are already temporal are handed to the dialect as they are.
/// Text and epoch milliseconds are first converted into a local date/time in
/// the execution context's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalLiteralFormatter {
    precision: TemporalPrecision,
}

impl TemporalLiteralFormatter {
    pub fn new(precision: TemporalPrecision) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> TemporalPrecision {
        self.precision
    }

    fn coerce(&self, value: &Value, ctx: &ExecutionContext) -> Result<TemporalValue> {
        match value {
            Value::String(text) => self.parse(text.trim(), ctx).ok_or_else(|| {
                self.error(
                    ValueType::String,
                    format!("'{text}' is not a valid {} value", self.precision),
                )
            }),
            Value::Long(millis) => {
                let instant = Utc
                    .timestamp_millis_opt(*millis)
                    .single()
                    .ok_or_else(|| self.error(ValueType::Long, "epoch millis out of range"))?;
                Ok(TemporalValue::DateTime(
                    instant.with_timezone(&ctx.time_zone).naive_local(),
                ))
            }
            other => {
                let value_type = other.value_type().unwrap_or(ValueType::String);
                Err(self.error(value_type, "value cannot be read as a date or time"))
            }
        }
    }

    fn parse(&self, text: &str, ctx: &ExecutionContext) -> Option<TemporalValue> {
        let parsed = match self.precision {
            TemporalPrecision::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(TemporalValue::Date),
            TemporalPrecision::Time => TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
                .map(TemporalValue::Time),
            TemporalPrecision::Timestamp => TIMESTAMP_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(TemporalValue::DateTime),
        };

        parsed.or_else(|| {
            // Zoned text is shifted into the session zone first
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| TemporalValue::DateTime(dt.with_timezone(&ctx.time_zone).naive_local()))
        })
    }

    fn error(&self, value_type: ValueType, reason: impl Into<String>) -> DialectError {
        DialectError::conversion(precision_type_code(self.precision), value_type, reason)
    }
}

impl LiteralFormatter for TemporalLiteralFormatter {
    fn to_literal(&self, value: &Value, dialect: &Dialect, ctx: &ExecutionContext) -> Result<String> {
        if value.is_null() {
            return Ok("null".to_string());
        }
        let temporal = match value.as_temporal() {
            // Only a timestamp keeps the offset; a date or time part is read
            // in the session zone
            Some(TemporalValue::Instant(instant))
                if self.precision != TemporalPrecision::Timestamp =>
            {
                TemporalValue::DateTime(instant.with_timezone(&ctx.time_zone).naive_local())
            }
            Some(temporal) => temporal,
            None => {
                let converted = self.coerce(value, ctx)?;
                trace!(precision = %self.precision, "Converted value for temporal literal");
                converted
            }
        };
        dialect.format_datetime_literal(temporal, self.precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Product;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    fn sqlserver() -> Dialect {
        Product::SqlServer.dialect().unwrap()
    }

    #[test]
    fn test_temporal_values_skip_conversion() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let formatter = TemporalLiteralFormatter::new(TemporalPrecision::Date);
        assert_eq!(
            formatter
                .to_literal(&Value::Date(date), &sqlserver(), &ExecutionContext::utc())
                .unwrap(),
            "{d '2023-12-31'}"
        );
    }

    #[test]
    fn test_text_is_parsed_per_precision() {
        let ctx = ExecutionContext::utc();
        let dialect = sqlserver();
        let time = TemporalLiteralFormatter::new(TemporalPrecision::Time);
        assert_eq!(
            time.to_literal(&Value::String("08:15".into()), &dialect, &ctx)
                .unwrap(),
            "{t '08:15:00'}"
        );
        let ts = TemporalLiteralFormatter::new(TemporalPrecision::Timestamp);
        assert_eq!(
            ts.to_literal(&Value::String("2024-02-29T23:59:59".into()), &dialect, &ctx)
                .unwrap(),
            "{ts '2024-02-29 23:59:59.000000000'}"
        );
    }

    #[test]
    fn test_zoned_text_uses_session_zone() {
        let ctx = ExecutionContext::with_time_zone(FixedOffset::east_opt(2 * 3600).unwrap());
        let formatter = TemporalLiteralFormatter::new(TemporalPrecision::Date);
        assert_eq!(
            formatter
                .to_literal(
                    &Value::String("2024-05-31T23:30:00Z".into()),
                    &sqlserver(),
                    &ctx
                )
                .unwrap(),
            "{d '2024-06-01'}"
        );
    }

    #[test]
    fn test_instant_date_part_uses_session_zone() {
        let ctx = ExecutionContext::with_time_zone(FixedOffset::east_opt(2 * 3600).unwrap());
        let instant = Utc.with_ymd_and_hms(2024, 5, 31, 23, 30, 0).unwrap();
        let date = TemporalLiteralFormatter::new(TemporalPrecision::Date);
        let from_instant = date
            .to_literal(&Value::Instant(instant), &sqlserver(), &ctx)
            .unwrap();
        let from_text = date
            .to_literal(&Value::String("2024-05-31T23:30:00Z".into()), &sqlserver(), &ctx)
            .unwrap();
        assert_eq!(from_instant, "{d '2024-06-01'}");
        assert_eq!(from_instant, from_text);

        let time = TemporalLiteralFormatter::new(TemporalPrecision::Time);
        assert_eq!(
            time.to_literal(&Value::Instant(instant), &sqlserver(), &ctx)
                .unwrap(),
            "{t '01:30:00'}"
        );
    }

    #[test]
    fn test_epoch_millis() {
        let ctx = ExecutionContext::utc();
        let formatter = TemporalLiteralFormatter::new(TemporalPrecision::Timestamp);
        assert_eq!(
            formatter
                .to_literal(&Value::Long(86_400_000), &sqlserver(), &ctx)
                .unwrap(),
            "{ts '1970-01-02 00:00:00.000000000'}"
        );
    }

    #[test]
    fn test_unconvertible_values() {
        let ctx = ExecutionContext::utc();
        let formatter = TemporalLiteralFormatter::new(TemporalPrecision::Date);
        let err = formatter
            .to_literal(&Value::String("yesterday".into()), &sqlserver(), &ctx)
            .unwrap_err();
        assert_eq!(err.kind(), "value-conversion");
        assert!(formatter
            .to_literal(&Value::Boolean(true), &sqlserver(), &ctx)
            .is_err());
        assert_eq!(
            formatter
                .to_literal(&Value::Null, &sqlserver(), &ctx)
                .unwrap(),
            "null"
        );
    }
}
