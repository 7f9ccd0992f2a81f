//! Base profile shared by every product

use indexmap::IndexMap;

use crate::dialect::capabilities::Capabilities;
use crate::dialect::profile::{DialectProfile, QuotePair};
use crate::identity::IdentityColumnStrategy;
use crate::literal::{BinaryLiteralStyle, BooleanLiteralStyle, DateTimeLiteralStyle};
use crate::sql::{DateFormatRules, LockHintStyle, PaginationStrategy};
use crate::types::{ColumnTypeRule, TypeCode};

/// SQL:2016 reserved words that commonly collide with column names
const RESERVED_KEYWORDS: &[&str] = &[
    "all", "and", "any", "as", "between", "by", "case", "check", "column", "constraint", "create",
    "cross", "current", "default", "delete", "distinct", "drop", "else", "end", "exists", "false",
    "for", "foreign", "from", "full", "grant", "group", "having", "in", "inner", "insert",
    "intersect", "into", "is", "join", "left", "like", "not", "null", "of", "on", "or", "order",
    "outer", "primary", "references", "right", "select", "set", "table", "then", "to", "true",
    "union", "unique", "update", "user", "using", "values", "when", "where", "with",
];

pub fn profile() -> DialectProfile {
    use TypeCode::*;

    let column_types = vec![
        ColumnTypeRule::new(Bit, "bit"),
        ColumnTypeRule::new(Boolean, "boolean"),
        ColumnTypeRule::new(TinyInt, "tinyint"),
        ColumnTypeRule::new(SmallInt, "smallint"),
        ColumnTypeRule::new(Integer, "integer"),
        ColumnTypeRule::new(BigInt, "bigint"),
        ColumnTypeRule::new(Float, "float($p)"),
        ColumnTypeRule::new(Real, "real"),
        ColumnTypeRule::new(Double, "double precision"),
        ColumnTypeRule::new(Numeric, "numeric($p,$s)"),
        ColumnTypeRule::new(Decimal, "decimal($p,$s)"),
        ColumnTypeRule::new(Char, "char($l)"),
        ColumnTypeRule::new(Varchar, "varchar($l)"),
        ColumnTypeRule::new(LongVarchar, "varchar($l)"),
        ColumnTypeRule::new(NChar, "nchar($l)"),
        ColumnTypeRule::new(NVarchar, "nvarchar($l)"),
        ColumnTypeRule::new(LongNVarchar, "nvarchar($l)"),
        ColumnTypeRule::new(Clob, "clob"),
        ColumnTypeRule::new(NClob, "nclob"),
        ColumnTypeRule::new(Date, "date"),
        ColumnTypeRule::new(Time, "time"),
        ColumnTypeRule::new(Timestamp, "timestamp"),
        ColumnTypeRule::new(TimestampWithTimezone, "timestamp with time zone"),
        ColumnTypeRule::new(Binary, "binary($l)"),
        ColumnTypeRule::new(Varbinary, "varbinary($l)"),
        ColumnTypeRule::new(LongVarbinary, "varbinary($l)"),
        ColumnTypeRule::new(Blob, "blob"),
    ];

    DialectProfile {
        name: "generic".to_string(),
        quotes: QuotePair::new('"', '"'),
        keywords: RESERVED_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        capabilities: Capabilities::default(),
        column_types,
        descriptor_overrides: IndexMap::new(),
        pagination: PaginationStrategy::NoOp,
        lock_hints: LockHintStyle::ForUpdate,
        identity: IdentityColumnStrategy::None,
        datetime_literals: DateTimeLiteralStyle::JdbcEscape,
        boolean_literals: BooleanLiteralStyle::Keyword,
        binary_literals: BinaryLiteralStyle::Hex,
        extract_fields: IndexMap::new(),
        date_format: DateFormatRules::default(),
        no_columns_insert: "values ( )".to_string(),
        current_schema_command: None,
        current_timestamp_select: None,
        in_expression_count_limit: None,
    }
}
