//! Binders and extractors
//!
//! A [`Binder`] turns an engine [`Value`] into the [`WireValue`] sent for a
//! parameter of a given type code; an [`Extractor`] turns a result
//! [`WireValue`] back into a [`Value`] of the requested type. Both are plain
//! data, so they can be shared and called from any number of threads.

use crate::error::{DialectError, Result};
use crate::types::{TypeCode, ValueType};
use crate::value::{Value, WireValue};

/// Value types a descriptor for `type_code` binds and extracts
pub fn supported_value_types(type_code: TypeCode) -> &'static [ValueType] {
    use ValueType::*;

    match type_code {
        TypeCode::Bit | TypeCode::Boolean => &[Boolean],
        TypeCode::TinyInt | TypeCode::SmallInt | TypeCode::Integer | TypeCode::BigInt => {
            &[Byte, Short, Integer, Long]
        }
        TypeCode::Real => &[Float],
        TypeCode::Float | TypeCode::Double => &[Float, Double],
        TypeCode::Numeric | TypeCode::Decimal => &[Decimal, Integer, Long, Double],
        TypeCode::Date => &[Date],
        TypeCode::Time => &[Time],
        TypeCode::Timestamp | TypeCode::TimestampWithTimezone => &[DateTime, Instant],
        code if code.is_character() => &[String],
        code if code.is_binary() => &[Bytes],
        _ => &[],
    }
}

fn check_supported(type_code: TypeCode, value_type: ValueType) -> Result<()> {
    if supported_value_types(type_code).contains(&value_type) {
        Ok(())
    } else {
        Err(DialectError::conversion(
            type_code,
            value_type,
            "value type is not supported by this descriptor",
        ))
    }
}

/// Converts engine values into protocol parameter values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binder {
    type_code: TypeCode,
    value_type: ValueType,
}

impl Binder {
    pub fn new(type_code: TypeCode, value_type: ValueType) -> Result<Self> {
        check_supported(type_code, value_type)?;
        Ok(Self {
            type_code,
            value_type,
        })
    }

    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn bind(&self, value: &Value) -> Result<WireValue> {
        let Some(actual) = value.value_type() else {
            return Ok(WireValue::Null);
        };
        if actual != self.value_type {
            return Err(self.error(format!(
                "binder expects {} but was given {}",
                self.value_type, actual
            )));
        }

        let wire = match self.type_code {
            TypeCode::Bit | TypeCode::Boolean => match value {
                Value::Boolean(b) => WireValue::Bit(*b),
                _ => return Err(self.mismatch()),
            },
            TypeCode::TinyInt => {
                let v = self.integral(value)?;
                WireValue::TinyInt(i8::try_from(v).map_err(|_| self.out_of_range(v))?)
            }
            TypeCode::SmallInt => {
                let v = self.integral(value)?;
                WireValue::SmallInt(i16::try_from(v).map_err(|_| self.out_of_range(v))?)
            }
            TypeCode::Integer => {
                let v = self.integral(value)?;
                WireValue::Int(i32::try_from(v).map_err(|_| self.out_of_range(v))?)
            }
            TypeCode::BigInt => WireValue::BigInt(self.integral(value)?),
            TypeCode::Real => match value {
                Value::Float(f) => WireValue::Real(*f),
                _ => return Err(self.mismatch()),
            },
            TypeCode::Float | TypeCode::Double => match value {
                Value::Float(f) => WireValue::Double(f64::from(*f)),
                Value::Double(d) => WireValue::Double(*d),
                _ => return Err(self.mismatch()),
            },
            TypeCode::Numeric | TypeCode::Decimal => match value {
                Value::Decimal(s) if is_decimal_literal(s) => WireValue::Numeric(s.clone()),
                Value::Decimal(s) => {
                    return Err(self.error(format!("'{}' is not a decimal number", s)))
                }
                Value::Double(d) if d.is_finite() => WireValue::Numeric(d.to_string()),
                Value::Double(d) => {
                    return Err(self.error(format!("{} has no numeric representation", d)))
                }
                other => WireValue::Numeric(self.integral(other)?.to_string()),
            },
            TypeCode::Date => match value {
                Value::Date(d) => WireValue::Date(*d),
                _ => return Err(self.mismatch()),
            },
            TypeCode::Time => match value {
                Value::Time(t) => WireValue::Time(*t),
                _ => return Err(self.mismatch()),
            },
            TypeCode::Timestamp => match value {
                Value::DateTime(dt) => WireValue::Timestamp(*dt),
                Value::Instant(i) => WireValue::Timestamp(i.naive_utc()),
                _ => return Err(self.mismatch()),
            },
            TypeCode::TimestampWithTimezone => match value {
                Value::Instant(i) => WireValue::TimestampTz(*i),
                Value::DateTime(dt) => WireValue::TimestampTz(dt.and_utc()),
                _ => return Err(self.mismatch()),
            },
            code if code.is_character() => match value {
                Value::String(s) => WireValue::Text(s.clone()),
                _ => return Err(self.mismatch()),
            },
            code if code.is_binary() => match value {
                Value::Bytes(b) => WireValue::Binary(b.clone()),
                _ => return Err(self.mismatch()),
            },
            _ => return Err(self.mismatch()),
        };

        tracing::trace!(type_code = %self.type_code, kind = wire.kind(), "bound parameter");
        Ok(wire)
    }

    fn integral(&self, value: &Value) -> Result<i64> {
        value.as_i64().ok_or_else(|| self.mismatch())
    }

    fn out_of_range(&self, v: i64) -> DialectError {
        self.error(format!("{} is out of range", v))
    }

    fn mismatch(&self) -> DialectError {
        self.error("value type is not supported by this descriptor")
    }

    fn error(&self, reason: impl Into<String>) -> DialectError {
        DialectError::conversion(self.type_code, self.value_type, reason)
    }
}

/// Converts protocol result values into engine values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extractor {
    type_code: TypeCode,
    value_type: ValueType,
}

impl Extractor {
    pub fn new(type_code: TypeCode, value_type: ValueType) -> Result<Self> {
        check_supported(type_code, value_type)?;
        Ok(Self {
            type_code,
            value_type,
        })
    }

    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn extract(&self, wire: &WireValue) -> Result<Value> {
        let value = match (wire, self.value_type) {
            (WireValue::Null, _) => Value::Null,

            (WireValue::Bit(b), ValueType::Boolean) => Value::Boolean(*b),

            (WireValue::TinyInt(v), vt) if vt.is_integral() => self.narrow(i64::from(*v))?,
            (WireValue::SmallInt(v), vt) if vt.is_integral() => self.narrow(i64::from(*v))?,
            (WireValue::Int(v), vt) if vt.is_integral() => self.narrow(i64::from(*v))?,
            (WireValue::BigInt(v), vt) if vt.is_integral() => self.narrow(*v)?,

            (WireValue::Real(f), ValueType::Float) => Value::Float(*f),
            (WireValue::Double(d), ValueType::Double) => Value::Double(*d),
            // Only produced by binding an f32, so the narrowing is exact
            (WireValue::Double(d), ValueType::Float) => Value::Float(*d as f32),

            (WireValue::Numeric(s), ValueType::Decimal) => Value::Decimal(s.clone()),
            (WireValue::Numeric(s), ValueType::Double) => Value::Double(
                s.parse()
                    .map_err(|_| self.error(format!("'{}' is not a number", s)))?,
            ),
            (WireValue::Numeric(s), vt) if vt.is_integral() => {
                let v: i64 = s
                    .parse()
                    .map_err(|_| self.error(format!("'{}' is not an integer", s)))?;
                self.narrow(v)?
            }

            (WireValue::Text(s), ValueType::String) => Value::String(s.clone()),
            (WireValue::Binary(b), ValueType::Bytes) => Value::Bytes(b.clone()),

            (WireValue::Date(d), ValueType::Date) => Value::Date(*d),
            (WireValue::Time(t), ValueType::Time) => Value::Time(*t),
            (WireValue::Timestamp(dt), ValueType::DateTime) => Value::DateTime(*dt),
            (WireValue::Timestamp(dt), ValueType::Instant) => Value::Instant(dt.and_utc()),
            (WireValue::TimestampTz(i), ValueType::Instant) => Value::Instant(*i),
            (WireValue::TimestampTz(i), ValueType::DateTime) => Value::DateTime(i.naive_utc()),

            (other, _) => {
                return Err(self.error(format!("cannot extract from a {} value", other.kind())))
            }
        };
        Ok(value)
    }

    fn narrow(&self, v: i64) -> Result<Value> {
        let out_of_range = || self.error(format!("{} is out of range", v));
        Ok(match self.value_type {
            ValueType::Byte => Value::Byte(i8::try_from(v).map_err(|_| out_of_range())?),
            ValueType::Short => Value::Short(i16::try_from(v).map_err(|_| out_of_range())?),
            ValueType::Integer => Value::Integer(i32::try_from(v).map_err(|_| out_of_range())?),
            _ => Value::Long(v),
        })
    }

    fn error(&self, reason: impl Into<String>) -> DialectError {
        DialectError::conversion(self.type_code, self.value_type, reason)
    }
}

pub(crate) fn is_decimal_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");
    !(whole.is_empty() && fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    fn round_trip(type_code: TypeCode, value: Value) {
        let value_type = value.value_type().unwrap();
        let binder = Binder::new(type_code, value_type).unwrap();
        let extractor = Extractor::new(type_code, value_type).unwrap();
        let wire = binder.bind(&value).unwrap();
        assert_eq!(
            extractor.extract(&wire).unwrap(),
            value,
            "round trip through {type_code} via {wire:?}"
        );
    }

    #[test]
    fn test_integral_round_trips() {
        for code in [
            TypeCode::TinyInt,
            TypeCode::SmallInt,
            TypeCode::Integer,
            TypeCode::BigInt,
        ] {
            round_trip(code, Value::Byte(i8::MIN));
            round_trip(code, Value::Byte(127));
            round_trip(code, Value::Short(-100));
            round_trip(code, Value::Integer(42));
            round_trip(code, Value::Long(127));
        }
        round_trip(TypeCode::SmallInt, Value::Short(200));
        round_trip(TypeCode::SmallInt, Value::Long(255));
        round_trip(TypeCode::BigInt, Value::Long(i64::MIN));
        round_trip(TypeCode::Integer, Value::Integer(i32::MIN));
    }

    #[test]
    fn test_numeric_round_trips() {
        round_trip(TypeCode::Numeric, Value::Decimal("-1234.5600".into()));
        round_trip(TypeCode::Decimal, Value::Long(9_007_199_254_740_993));
        round_trip(TypeCode::Numeric, Value::Double(0.1));
        round_trip(TypeCode::Double, Value::Float(1.25));
        round_trip(TypeCode::Float, Value::Double(-3.5e300));
        round_trip(TypeCode::Real, Value::Float(f32::MAX));
    }

    #[test]
    fn test_other_round_trips() {
        round_trip(TypeCode::Bit, Value::Boolean(true));
        round_trip(TypeCode::Boolean, Value::Boolean(false));
        round_trip(TypeCode::NVarchar, Value::String("żółw".into()));
        round_trip(TypeCode::Varbinary, Value::Bytes(vec![0, 1, 255]));
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        let time = NaiveTime::from_hms_nano_opt(23, 59, 59, 123_000_000).unwrap();
        round_trip(TypeCode::Date, Value::Date(date));
        round_trip(TypeCode::Time, Value::Time(time));
        round_trip(TypeCode::Timestamp, Value::DateTime(date.and_time(time)));
        let instant = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        round_trip(TypeCode::Timestamp, Value::Instant(instant));
        round_trip(TypeCode::TimestampWithTimezone, Value::Instant(instant));
    }

    #[test]
    fn test_null_binds_to_null() {
        let binder = Binder::new(TypeCode::Integer, ValueType::Integer).unwrap();
        assert_eq!(binder.bind(&Value::Null).unwrap(), WireValue::Null);
        let extractor = Extractor::new(TypeCode::Integer, ValueType::Integer).unwrap();
        assert_eq!(extractor.extract(&WireValue::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_tinyint_is_signed() {
        let binder = Binder::new(TypeCode::TinyInt, ValueType::Byte).unwrap();
        assert_eq!(binder.bind(&Value::Byte(-1)).unwrap(), WireValue::TinyInt(-1));

        let binder = Binder::new(TypeCode::TinyInt, ValueType::Short).unwrap();
        let err = binder.bind(&Value::Short(200)).unwrap_err();
        assert_eq!(err.kind(), "value-conversion");
    }

    #[test]
    fn test_unsupported_value_type() {
        assert!(Binder::new(TypeCode::Date, ValueType::String).is_err());
        assert!(Extractor::new(TypeCode::Other, ValueType::String).is_err());
    }

    #[test]
    fn test_binder_rejects_other_value_types() {
        let binder = Binder::new(TypeCode::BigInt, ValueType::Long).unwrap();
        assert!(binder.bind(&Value::Integer(1)).is_err());
    }

    #[test]
    fn test_extractor_narrowing() {
        let extractor = Extractor::new(TypeCode::BigInt, ValueType::Short).unwrap();
        assert_eq!(
            extractor.extract(&WireValue::BigInt(12)).unwrap(),
            Value::Short(12)
        );
        assert!(extractor.extract(&WireValue::BigInt(70_000)).is_err());
        assert!(extractor.extract(&WireValue::Text("12".into())).is_err());
    }

    #[test]
    fn test_decimal_literal_validation() {
        assert!(is_decimal_literal("12"));
        assert!(is_decimal_literal("-0.50"));
        assert!(is_decimal_literal(".5"));
        assert!(!is_decimal_literal("."));
        assert!(!is_decimal_literal("1e5"));
        assert!(!is_decimal_literal("abc"));
    }
}
