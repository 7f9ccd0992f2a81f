//! Transact-SQL family delta, shared by SQL Server and its relatives

use indexmap::IndexMap;

use crate::dialect::capabilities::CapabilityOverrides;
use crate::dialect::profile::DialectDelta;
use crate::identity::IdentityColumnStrategy;
use crate::literal::{BinaryLiteralStyle, BooleanLiteralStyle};
use crate::sql::{LockHintStyle, TemporalUnit};
use crate::types::{ColumnTypeRule, TypeCode};

pub fn delta() -> DialectDelta {
    use TypeCode::*;

    let column_types = vec![
        ColumnTypeRule::new(Binary, "binary($l)"),
        ColumnTypeRule::new(Bit, "tinyint"),
        ColumnTypeRule::new(BigInt, "numeric(19,0)"),
        ColumnTypeRule::new(SmallInt, "smallint"),
        ColumnTypeRule::new(TinyInt, "tinyint"),
        ColumnTypeRule::new(Integer, "int"),
        ColumnTypeRule::new(Char, "char(1)"),
        ColumnTypeRule::new(Varchar, "varchar($l)"),
        ColumnTypeRule::new(Float, "float"),
        ColumnTypeRule::new(Double, "double precision"),
        ColumnTypeRule::new(Date, "datetime"),
        ColumnTypeRule::new(Time, "datetime"),
        ColumnTypeRule::new(Timestamp, "datetime"),
        ColumnTypeRule::new(Varbinary, "varbinary($l)"),
        ColumnTypeRule::new(Numeric, "numeric($p,$s)"),
        ColumnTypeRule::new(Blob, "image"),
        ColumnTypeRule::new(Clob, "text"),
    ];

    let extract_fields = IndexMap::from([
        (TemporalUnit::DayOfMonth, "dd".to_string()),
        (TemporalUnit::DayOfYear, "dy".to_string()),
        (TemporalUnit::DayOfWeek, "dw".to_string()),
        (TemporalUnit::Week, "wk".to_string()),
    ]);

    DialectDelta {
        name: Some("transact-sql".to_string()),
        capabilities: CapabilityOverrides {
            case_insensitive_string_comparisons: Some(true),
            read_committed_blocks_writers: Some(true),
            repeatable_read_blocks_writers: Some(true),
            ..Default::default()
        },
        column_types,
        lock_hints: Some(LockHintStyle::TableHints),
        identity: Some(IdentityColumnStrategy::TransactSql),
        boolean_literals: Some(BooleanLiteralStyle::Numeric),
        binary_literals: Some(BinaryLiteralStyle::PrefixedHex),
        extract_fields,
        no_columns_insert: Some("default values".to_string()),
        current_timestamp_select: Some("select getdate()".to_string()),
        ..Default::default()
    }
}
