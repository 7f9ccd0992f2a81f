//! SQL Server delta, applied on top of the Transact-SQL family

use indexmap::IndexMap;

use crate::dialect::capabilities::CapabilityOverrides;
use crate::dialect::profile::{DialectDelta, QuotePair};
use crate::identity::IdentityColumnStrategy;
use crate::sql::{DateFormatRules, PaginationStrategy, TemporalUnit};
use crate::types::{ColumnTypeRule, TypeCode};

/// Largest parameter count SQL Server accepts in one statement
pub const PARAM_LIST_SIZE_LIMIT: usize = 2100;

/// Largest length of a bounded `varbinary`
pub const MAX_LENGTH: u64 = 8000;

pub fn delta() -> DialectDelta {
    let column_types = vec![
        ColumnTypeRule::new(TypeCode::Varbinary, "image"),
        ColumnTypeRule::sized(TypeCode::Varbinary, MAX_LENGTH, "varbinary($l)"),
        ColumnTypeRule::new(TypeCode::LongVarbinary, "image"),
        ColumnTypeRule::new(TypeCode::LongVarchar, "text"),
        ColumnTypeRule::new(TypeCode::Boolean, "bit"),
    ];

    // No single-byte signed integer on the wire
    let descriptor_overrides = IndexMap::from([(TypeCode::TinyInt, TypeCode::SmallInt)]);

    let extract_fields = IndexMap::from([
        (TemporalUnit::Week, "isowk".to_string()),
        (TemporalUnit::Offset, "tz".to_string()),
    ]);

    let date_format = DateFormatRules::new([
        ("G", "g"),
        ("EEEE", "dddd"),
        ("EEE", "ddd"),
        ("aa", "tt"),
        ("a", "tt"),
        ("S", "F"),
        ("XXX", "K"),
        ("xxx", "zzz"),
        ("x", "zz"),
    ])
    .with_output_quote("\"");

    DialectDelta {
        name: Some("sqlserver".to_string()),
        quotes: Some(QuotePair::new('[', ']')),
        keywords: vec!["top".to_string(), "key".to_string()],
        capabilities: CapabilityOverrides {
            supports_limit: Some(true),
            supports_limit_offset: Some(false),
            supports_variable_limit: Some(false),
            use_max_for_limit: Some(true),
            case_insensitive_string_comparisons: Some(true),
            read_committed_blocks_writers: Some(false),
            repeatable_read_blocks_writers: Some(false),
            supports_circular_cascade_delete: Some(false),
            supports_lob_value_change_propagation: Some(false),
            supports_forward_only_cursor_positioning: Some(false),
        },
        column_types,
        descriptor_overrides,
        pagination: Some(PaginationStrategy::TopOnly),
        identity: Some(IdentityColumnStrategy::SqlServer),
        extract_fields,
        date_format: Some(date_format),
        current_schema_command: Some("SELECT SCHEMA_NAME()".to_string()),
        current_timestamp_select: Some("select current_timestamp".to_string()),
        in_expression_count_limit: Some(PARAM_LIST_SIZE_LIMIT),
        ..Default::default()
    }
}
