//! PostgreSQL delta

use indexmap::IndexMap;

use crate::dialect::capabilities::CapabilityOverrides;
use crate::dialect::profile::DialectDelta;
use crate::identity::IdentityColumnStrategy;
use crate::literal::{BinaryLiteralStyle, BooleanLiteralStyle, DateTimeLiteralStyle};
use crate::sql::{DateFormatRules, LockHintStyle, PaginationStrategy, TemporalUnit};
use crate::types::{ColumnTypeRule, TypeCode};

pub fn delta() -> DialectDelta {
    use TypeCode::*;

    let column_types = vec![
        ColumnTypeRule::new(Bit, "bool"),
        ColumnTypeRule::new(TinyInt, "int2"),
        ColumnTypeRule::new(SmallInt, "int2"),
        ColumnTypeRule::new(Integer, "int4"),
        ColumnTypeRule::new(BigInt, "int8"),
        ColumnTypeRule::new(Float, "float4"),
        ColumnTypeRule::new(Double, "float8"),
        ColumnTypeRule::new(Char, "char(1)"),
        ColumnTypeRule::new(LongVarchar, "text"),
        ColumnTypeRule::new(Clob, "text"),
        ColumnTypeRule::new(Binary, "bytea"),
        ColumnTypeRule::new(Varbinary, "bytea"),
        ColumnTypeRule::new(LongVarbinary, "bytea"),
        ColumnTypeRule::new(Blob, "oid"),
        ColumnTypeRule::new(TimestampWithTimezone, "timestamptz"),
    ];

    let extract_fields = IndexMap::from([
        (TemporalUnit::DayOfMonth, "day".to_string()),
        (TemporalUnit::DayOfYear, "doy".to_string()),
        (TemporalUnit::DayOfWeek, "dow".to_string()),
        (TemporalUnit::Nanosecond, "microseconds".to_string()),
        (TemporalUnit::Offset, "timezone".to_string()),
    ]);

    let date_format = DateFormatRules::new([
        ("G", "AD"),
        ("yyyy", "YYYY"),
        ("yyy", "YYYY"),
        ("yy", "YY"),
        ("y", "Y"),
        ("MMMM", "FMMonth"),
        ("MMM", "Mon"),
        ("MM", "MM"),
        ("M", "FMMM"),
        ("ww", "IW"),
        ("w", "FMIW"),
        ("EEEE", "FMDay"),
        ("EEE", "Dy"),
        ("dd", "DD"),
        ("d", "FMDD"),
        ("a", "AM"),
        ("HH", "HH24"),
        ("H", "FMHH24"),
        ("hh", "HH12"),
        ("h", "FMHH12"),
        ("mm", "MI"),
        ("m", "FMMI"),
        ("ss", "SS"),
        ("s", "FMSS"),
        ("SSSSSS", "US"),
        ("SSS", "MS"),
        ("zzz", "TZ"),
        ("z", "TZ"),
    ])
    .with_output_quote("\"");

    DialectDelta {
        name: Some("postgresql".to_string()),
        keywords: vec![
            "limit".to_string(),
            "offset".to_string(),
            "returning".to_string(),
        ],
        capabilities: CapabilityOverrides {
            supports_limit: Some(true),
            supports_limit_offset: Some(true),
            supports_variable_limit: Some(true),
            ..Default::default()
        },
        column_types,
        pagination: Some(PaginationStrategy::LimitOffset),
        lock_hints: Some(LockHintStyle::ForUpdate),
        identity: Some(IdentityColumnStrategy::GeneratedByDefault),
        datetime_literals: Some(DateTimeLiteralStyle::Ansi),
        boolean_literals: Some(BooleanLiteralStyle::Keyword),
        binary_literals: Some(BinaryLiteralStyle::Bytea),
        extract_fields,
        date_format: Some(date_format),
        no_columns_insert: Some("default values".to_string()),
        current_schema_command: Some("select current_schema()".to_string()),
        current_timestamp_select: Some("select now()".to_string()),
        in_expression_count_limit: Some(32767),
        ..Default::default()
    }
}
