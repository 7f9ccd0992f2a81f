//! Database dialects
//!
//! A [`Dialect`] is built once from a [`DialectProfile`] (the generic base
//! plus family and vendor deltas) and is read-only afterwards. Every
//! operation on it is a pure function of its arguments and the dialect.

mod capabilities;
pub(crate) mod generic;
mod postgres;
mod profile;
mod sql_server;
mod transact_sql;

pub use capabilities::{Capabilities, CapabilityOverrides};
pub use profile::{DialectBuilder, DialectDelta, DialectProfile, QuotePair};
pub use sql_server::PARAM_LIST_SIZE_LIMIT;

use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::descriptor::{DescriptorRegistry, SqlTypeDescriptor};
use crate::error::Result;
use crate::identity::IdentityColumnStrategy;
use crate::literal::LiteralFormatter;
use crate::sql::{DateFormatTranslator, LockHint, LockMode, PaginationStrategy, TemporalUnit};
use crate::types::{ColumnSize, TemporalPrecision, TypeCode, TypeConfiguration, TypeNameRegistry, ValueType};
use crate::value::{Binder, ExecutionContext, Extractor, TemporalValue, Value};

/// Built-in database products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Product {
    #[default]
    Generic,
    PostgreSQL,
    SqlServer,
}

impl Product {
    pub const ALL: [Product; 3] = [Product::Generic, Product::PostgreSQL, Product::SqlServer];

    /// Builder preloaded with the product's profile, ready for further deltas
    pub fn builder(&self) -> DialectBuilder {
        let builder = DialectBuilder::new(*self, generic::profile());
        match self {
            Product::Generic => builder,
            Product::PostgreSQL => builder.apply(postgres::delta()),
            Product::SqlServer => builder
                .apply(transact_sql::delta())
                .apply(sql_server::delta()),
        }
    }

    pub fn dialect(&self) -> Result<Dialect> {
        self.builder().build()
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generic" | "ansi" => Ok(Product::Generic),
            "postgresql" | "postgres" | "pg" => Ok(Product::PostgreSQL),
            "sqlserver" | "sql-server" | "mssql" | "tsql" => Ok(Product::SqlServer),
            "sybase" => Err(
                "Sybase is not yet supported. Supported dialects: generic, postgresql, sqlserver."
                    .to_string(),
            ),
            _ => Err(format!(
                "Unknown dialect: '{}'. Supported dialects: generic, postgresql, sqlserver.",
                s
            )),
        }
    }
}

impl TryFrom<String> for Product {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Product> for String {
    fn from(product: Product) -> Self {
        product.to_string()
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Product::Generic => write!(f, "generic"),
            Product::PostgreSQL => write!(f, "postgresql"),
            Product::SqlServer => write!(f, "sqlserver"),
        }
    }
}

/// Immutable per-product configuration and SQL generation rules
#[derive(Debug, Clone)]
pub struct Dialect {
    pub(crate) product: Product,
    pub(crate) profile: DialectProfile,
    pub(crate) column_types: TypeNameRegistry,
    pub(crate) descriptors: DescriptorRegistry,
    pub(crate) date_format: DateFormatTranslator,
    pub(crate) keywords: IndexSet<String>,
}

impl Dialect {
    pub fn product(&self) -> Product {
        self.product
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// The profile this dialect was compiled from
    pub fn profile(&self) -> &DialectProfile {
        &self.profile
    }

    // Capabilities

    pub fn capabilities(&self) -> &Capabilities {
        &self.profile.capabilities
    }

    pub fn supports_limit(&self) -> bool {
        self.profile.capabilities.supports_limit
    }

    pub fn supports_limit_offset(&self) -> bool {
        self.profile.capabilities.supports_limit_offset
    }

    pub fn supports_variable_limit(&self) -> bool {
        self.profile.capabilities.supports_variable_limit
    }

    pub fn use_max_for_limit(&self) -> bool {
        self.profile.capabilities.use_max_for_limit
    }

    pub fn are_string_comparisons_case_insensitive(&self) -> bool {
        self.profile.capabilities.case_insensitive_string_comparisons
    }

    pub fn read_committed_blocks_writers(&self) -> bool {
        self.profile.capabilities.read_committed_blocks_writers
    }

    pub fn repeatable_read_blocks_writers(&self) -> bool {
        self.profile.capabilities.repeatable_read_blocks_writers
    }

    pub fn no_columns_insert_string(&self) -> &str {
        &self.profile.no_columns_insert
    }

    pub fn current_schema_command(&self) -> Option<&str> {
        self.profile.current_schema_command.as_deref()
    }

    pub fn current_timestamp_select_string(&self) -> Option<&str> {
        self.profile.current_timestamp_select.as_deref()
    }

    /// Maximum number of elements in an `in` list, if bounded
    pub fn in_expression_count_limit(&self) -> Option<usize> {
        self.profile.in_expression_count_limit
    }

    // Identifiers

    pub fn open_quote(&self) -> char {
        self.profile.quotes.open
    }

    pub fn close_quote(&self) -> char {
        self.profile.quotes.close
    }

    /// Wrap an identifier in the dialect's quotes. Close quotes inside the
    /// identifier are doubled.
    pub fn quote_identifier(&self, identifier: &str) -> String {
        let QuotePair { open, close } = self.profile.quotes;
        let mut quoted = String::with_capacity(identifier.len() + 2);
        quoted.push(open);
        for c in identifier.chars() {
            if c == close {
                quoted.push(close);
            }
            quoted.push(c);
        }
        quoted.push(close);
        quoted
    }

    /// Inverse of [`Dialect::quote_identifier`]; text that is not quoted
    /// with this dialect's characters is returned as is.
    pub fn unquote_identifier(&self, text: &str) -> String {
        let QuotePair { open, close } = self.profile.quotes;
        let inner = text
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close));
        match inner {
            Some(inner) => {
                let doubled: String = [close, close].iter().collect();
                inner.replace(&doubled, &close.to_string())
            }
            None => text.to_string(),
        }
    }

    /// Names written as `` `name` `` are re-quoted with the dialect's
    /// characters; any other name is returned unchanged.
    pub fn quote(&self, name: &str) -> String {
        match name
            .strip_prefix('`')
            .map(|rest| rest.strip_suffix('`').unwrap_or(rest))
        {
            Some(inner) => {
                let QuotePair { open, close } = self.profile.quotes;
                format!("{open}{inner}{close}")
            }
            None => name.to_string(),
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(&word.to_ascii_lowercase())
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    // Types

    /// Column type name for a code; see [`TypeNameRegistry::resolve`]
    pub fn column_type_name(&self, type_code: TypeCode, length: Option<u64>) -> Result<String> {
        self.column_types.resolve(type_code, length)
    }

    pub fn column_type_name_sized(&self, type_code: TypeCode, size: ColumnSize) -> Result<String> {
        self.column_types.resolve_sized(type_code, size)
    }

    pub fn column_types(&self) -> &TypeNameRegistry {
        &self.column_types
    }

    /// The descriptor used for a code, after applying the dialect's remaps
    pub fn resolve_type_descriptor(&self, type_code: TypeCode) -> Result<Arc<dyn SqlTypeDescriptor>> {
        let descriptor = self.descriptors.get(type_code)?;
        if !descriptor.can_be_remapped() {
            return Ok(descriptor);
        }
        match self.profile.descriptor_overrides.get(&type_code) {
            Some(target) => {
                trace!(dialect = %self.profile.name, from = %type_code, to = %target, "Remapped descriptor");
                self.descriptors.get(*target)
            }
            None => Ok(descriptor),
        }
    }

    pub fn binder(&self, type_code: TypeCode, value_type: ValueType) -> Result<Binder> {
        self.resolve_type_descriptor(type_code)?.binder(value_type)
    }

    pub fn extractor(&self, type_code: TypeCode, value_type: ValueType) -> Result<Extractor> {
        self.resolve_type_descriptor(type_code)?.extractor(value_type)
    }

    pub fn recommended_value_type(
        &self,
        type_code: TypeCode,
        config: &TypeConfiguration,
    ) -> Result<ValueType> {
        self.resolve_type_descriptor(type_code)?
            .recommended_value_type(config)
    }

    pub fn literal_formatter(
        &self,
        type_code: TypeCode,
        value_type: ValueType,
    ) -> Result<Box<dyn LiteralFormatter>> {
        Ok(self
            .resolve_type_descriptor(type_code)?
            .literal_formatter(value_type))
    }

    /// Render a value of a code as inline SQL
    pub fn format_literal(
        &self,
        type_code: TypeCode,
        value: &Value,
        ctx: &ExecutionContext,
    ) -> Result<String> {
        let Some(value_type) = value.value_type() else {
            return Ok("null".to_string());
        };
        self.literal_formatter(type_code, value_type)?
            .to_literal(value, self, ctx)
    }

    // Literals

    pub fn boolean_literal(&self, value: bool) -> &'static str {
        self.profile.boolean_literals.render(value)
    }

    pub fn binary_literal(&self, bytes: &[u8]) -> String {
        self.profile.binary_literals.render(bytes)
    }

    pub fn format_datetime_literal(
        &self,
        value: TemporalValue,
        precision: TemporalPrecision,
    ) -> Result<String> {
        self.profile.datetime_literals.render(value, precision)
    }

    // Rewriters

    pub fn pagination_strategy(&self) -> PaginationStrategy {
        self.profile.pagination
    }

    /// Add the row-limiting clause to a complete select statement
    pub fn inject_pagination(&self, sql: &str, offset: u64, limit: u64) -> Result<String> {
        let paginated = self
            .profile
            .pagination
            .apply(&self.profile.name, sql, offset, limit)?;
        trace!(dialect = %self.profile.name, offset, limit, "Injected pagination");
        Ok(paginated)
    }

    pub fn lock_hint(&self, mode: LockMode) -> LockHint {
        self.profile.lock_hints.hint(mode)
    }

    pub fn append_lock_hint(&self, mode: LockMode, table: &str) -> String {
        self.profile.lock_hints.append(mode, table)
    }

    pub fn for_update_clause(&self, mode: LockMode) -> &'static str {
        self.profile.lock_hints.for_update_clause(mode)
    }

    pub fn translate_date_format(&self, pattern: &str) -> String {
        self.date_format.translate(pattern)
    }

    /// Field keyword for date-part extraction; units without a vendor
    /// keyword use their canonical name
    pub fn translate_temporal_field(&self, unit: TemporalUnit) -> &str {
        self.profile
            .extract_fields
            .get(&unit)
            .map(String::as_str)
            .unwrap_or(unit.name())
    }

    // Identity columns

    pub fn identity_strategy(&self) -> IdentityColumnStrategy {
        self.profile.identity
    }

    pub fn identity_column_string(&self) -> Result<&'static str> {
        self.profile.identity.identity_column_string(&self.profile.name)
    }

    pub fn identity_select_string(&self, table: &str, column: &str) -> Result<String> {
        self.profile
            .identity
            .identity_select_string(&self.profile.name, table, column)
    }

    pub fn append_identity_select_to_insert(&self, insert: &str) -> Option<String> {
        self.profile.identity.append_identity_select_to_insert(insert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn sqlserver() -> Dialect {
        Product::SqlServer.dialect().unwrap()
    }

    #[test]
    fn test_product_parse() {
        assert_eq!("mssql".parse(), Ok(Product::SqlServer));
        assert_eq!("PG".parse(), Ok(Product::PostgreSQL));
        assert!("sybase".parse::<Product>().is_err());
        assert!("oracle".parse::<Product>().is_err());
        for product in Product::ALL {
            assert_eq!(product.to_string().parse(), Ok(product));
        }
    }

    #[test]
    fn test_every_product_builds() {
        for product in Product::ALL {
            let dialect = product.dialect().unwrap();
            assert_eq!(dialect.product(), product);
            assert_eq!(dialect.name(), product.to_string());
        }
    }

    #[test]
    fn test_dialect_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dialect>();
    }

    #[test]
    fn test_quote_identifier_round_trip() {
        let dialect = sqlserver();
        for identifier in ["users", "order", "a]b", "]", "", "[x]", "weird ]] name"] {
            let quoted = dialect.quote_identifier(identifier);
            assert!(quoted.starts_with('['));
            assert!(quoted.ends_with(']'));
            assert_eq!(dialect.unquote_identifier(&quoted), identifier);
        }
        assert_eq!(dialect.quote_identifier("a]b"), "[a]]b]");
    }

    #[test]
    fn test_backtick_quote() {
        let dialect = sqlserver();
        assert_eq!(dialect.quote("`user`"), "[user]");
        assert_eq!(dialect.quote("user"), "user");
        let postgres = Product::PostgreSQL.dialect().unwrap();
        assert_eq!(postgres.quote("`user`"), "\"user\"");
    }

    #[test]
    fn test_keywords() {
        let dialect = sqlserver();
        assert!(dialect.is_keyword("TOP"));
        assert!(dialect.is_keyword("key"));
        assert!(dialect.is_keyword("select"));
        assert!(!dialect.is_keyword("customer"));
        assert!(!Product::Generic.dialect().unwrap().is_keyword("top"));
    }

    #[test]
    fn test_tinyint_descriptor_is_remapped() {
        let dialect = sqlserver();
        let descriptor = dialect.resolve_type_descriptor(TypeCode::TinyInt).unwrap();
        assert_eq!(descriptor.sql_type(), TypeCode::SmallInt);

        let generic = Product::Generic.dialect().unwrap();
        let descriptor = generic.resolve_type_descriptor(TypeCode::TinyInt).unwrap();
        assert_eq!(descriptor.sql_type(), TypeCode::TinyInt);
    }

    #[test]
    fn test_negative_tinyint_binds_after_remap() {
        let dialect = sqlserver();
        let binder = dialect.binder(TypeCode::TinyInt, ValueType::Byte).unwrap();
        assert!(binder.bind(&Value::Byte(-5)).is_ok());
    }

    #[test]
    fn test_temporal_descriptors_are_not_remapped() {
        let dialect = Product::Generic
            .builder()
            .apply(DialectDelta {
                descriptor_overrides: IndexMap::from([(TypeCode::Date, TypeCode::Timestamp)]),
                ..Default::default()
            })
            .build()
            .unwrap();
        let descriptor = dialect.resolve_type_descriptor(TypeCode::Date).unwrap();
        assert_eq!(descriptor.sql_type(), TypeCode::Date);
    }

    #[test]
    fn test_temporal_field_fallback() {
        let dialect = sqlserver();
        assert_eq!(dialect.translate_temporal_field(TemporalUnit::Week), "isowk");
        assert_eq!(dialect.translate_temporal_field(TemporalUnit::DayOfWeek), "dw");
        assert_eq!(dialect.translate_temporal_field(TemporalUnit::Offset), "tz");
        assert_eq!(dialect.translate_temporal_field(TemporalUnit::Year), "year");

        let generic = Product::Generic.dialect().unwrap();
        assert_eq!(generic.translate_temporal_field(TemporalUnit::Week), "week");
    }

    #[test]
    fn test_format_literal_dispatch() {
        let dialect = sqlserver();
        let ctx = ExecutionContext::utc();
        assert_eq!(
            dialect
                .format_literal(TypeCode::NVarchar, &Value::String("x".into()), &ctx)
                .unwrap(),
            "N'x'"
        );
        assert_eq!(
            dialect
                .format_literal(TypeCode::Bit, &Value::Boolean(true), &ctx)
                .unwrap(),
            "1"
        );
        assert_eq!(
            dialect
                .format_literal(TypeCode::Varbinary, &Value::Bytes(vec![1, 255]), &ctx)
                .unwrap(),
            "0x01ff"
        );
        assert_eq!(
            dialect
                .format_literal(TypeCode::Integer, &Value::Null, &ctx)
                .unwrap(),
            "null"
        );
    }
}
