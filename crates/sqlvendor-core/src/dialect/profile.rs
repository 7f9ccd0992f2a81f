//! Dialect definitions as plain data, and the builder that compiles them

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::DescriptorRegistry;
use crate::dialect::capabilities::{Capabilities, CapabilityOverrides};
use crate::dialect::{Dialect, Product};
use crate::error::{DialectError, Result};
use crate::identity::IdentityColumnStrategy;
use crate::literal::{BinaryLiteralStyle, BooleanLiteralStyle, DateTimeLiteralStyle};
use crate::sql::{DateFormatRules, DateFormatTranslator, LockHintStyle, PaginationStrategy, TemporalUnit};
use crate::types::{ColumnTypeRule, TypeCode, TypeNameRegistry};

/// Identifier quote characters, always used together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotePair {
    pub open: char,
    pub close: char,
}

impl QuotePair {
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }
}

impl Default for QuotePair {
    fn default() -> Self {
        Self::new('"', '"')
    }
}

/// Everything that distinguishes one dialect from another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectProfile {
    pub name: String,
    pub quotes: QuotePair,
    pub keywords: Vec<String>,
    pub capabilities: Capabilities,
    /// Applied in order; a later rule for the same code and capacity wins
    pub column_types: Vec<ColumnTypeRule>,
    /// Type code -> code whose descriptor is used instead
    pub descriptor_overrides: IndexMap<TypeCode, TypeCode>,
    pub pagination: PaginationStrategy,
    pub lock_hints: LockHintStyle,
    pub identity: IdentityColumnStrategy,
    pub datetime_literals: DateTimeLiteralStyle,
    pub boolean_literals: BooleanLiteralStyle,
    pub binary_literals: BinaryLiteralStyle,
    /// Field names that differ from [`TemporalUnit::name`]
    pub extract_fields: IndexMap<TemporalUnit, String>,
    pub date_format: DateFormatRules,
    pub no_columns_insert: String,
    pub current_schema_command: Option<String>,
    pub current_timestamp_select: Option<String>,
    pub in_expression_count_limit: Option<usize>,
}

impl DialectProfile {
    /// Fold a delta into this profile
    pub fn apply(&mut self, delta: DialectDelta) {
        let DialectDelta {
            name,
            quotes,
            keywords,
            capabilities,
            column_types,
            descriptor_overrides,
            pagination,
            lock_hints,
            identity,
            datetime_literals,
            boolean_literals,
            binary_literals,
            extract_fields,
            date_format,
            no_columns_insert,
            current_schema_command,
            current_timestamp_select,
            in_expression_count_limit,
        } = delta;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(quotes) = quotes {
            self.quotes = quotes;
        }
        for keyword in keywords {
            if !self.keywords.iter().any(|k| k.eq_ignore_ascii_case(&keyword)) {
                self.keywords.push(keyword);
            }
        }
        capabilities.apply_to(&mut self.capabilities);
        self.column_types.extend(column_types);
        self.descriptor_overrides.extend(descriptor_overrides);
        self.pagination = pagination.unwrap_or(self.pagination);
        self.lock_hints = lock_hints.unwrap_or(self.lock_hints);
        self.identity = identity.unwrap_or(self.identity);
        self.datetime_literals = datetime_literals.unwrap_or(self.datetime_literals);
        self.boolean_literals = boolean_literals.unwrap_or(self.boolean_literals);
        self.binary_literals = binary_literals.unwrap_or(self.binary_literals);
        self.extract_fields.extend(extract_fields);
        if let Some(date_format) = date_format {
            self.date_format = date_format;
        }
        if let Some(insert) = no_columns_insert {
            self.no_columns_insert = insert;
        }
        if current_schema_command.is_some() {
            self.current_schema_command = current_schema_command;
        }
        if current_timestamp_select.is_some() {
            self.current_timestamp_select = current_timestamp_select;
        }
        if in_expression_count_limit.is_some() {
            self.in_expression_count_limit = in_expression_count_limit;
        }
    }
}

/// Overrides layered on top of a [`DialectProfile`].
///
/// Absent fields keep the inherited value; list and map fields add to the
/// inherited entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectDelta {
    pub name: Option<String>,
    pub quotes: Option<QuotePair>,
    pub keywords: Vec<String>,
    pub capabilities: CapabilityOverrides,
    pub column_types: Vec<ColumnTypeRule>,
    pub descriptor_overrides: IndexMap<TypeCode, TypeCode>,
    pub pagination: Option<PaginationStrategy>,
    pub lock_hints: Option<LockHintStyle>,
    pub identity: Option<IdentityColumnStrategy>,
    pub datetime_literals: Option<DateTimeLiteralStyle>,
    pub boolean_literals: Option<BooleanLiteralStyle>,
    pub binary_literals: Option<BinaryLiteralStyle>,
    pub extract_fields: IndexMap<TemporalUnit, String>,
    pub date_format: Option<DateFormatRules>,
    pub no_columns_insert: Option<String>,
    pub current_schema_command: Option<String>,
    pub current_timestamp_select: Option<String>,
    pub in_expression_count_limit: Option<usize>,
}

impl DialectDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Builds an immutable [`Dialect`] from a base profile and any number of
/// deltas
#[derive(Debug, Clone)]
pub struct DialectBuilder {
    product: Product,
    profile: DialectProfile,
}

impl DialectBuilder {
    pub fn new(product: Product, profile: DialectProfile) -> Self {
        Self { product, profile }
    }

    pub fn apply(mut self, delta: DialectDelta) -> Self {
        self.profile.apply(delta);
        self
    }

    pub fn register_column_type(mut self, rule: ColumnTypeRule) -> Self {
        self.profile.column_types.push(rule);
        self
    }

    pub fn profile(&self) -> &DialectProfile {
        &self.profile
    }

    /// Validate the profile and compile it
    pub fn build(self) -> Result<Dialect> {
        let DialectBuilder {
            product,
            mut profile,
        } = self;

        validate_quotes(&profile.quotes)?;
        align_limit_capabilities(&mut profile);

        let mut column_types = TypeNameRegistry::new();
        column_types.extend(profile.column_types.iter().cloned());

        let descriptors = DescriptorRegistry::standard();
        for (from, to) in &profile.descriptor_overrides {
            if !descriptors.contains(*to) {
                return Err(DialectError::Config(format!(
                    "descriptor override {from} -> {to} names a code without a descriptor"
                )));
            }
        }

        let date_format = DateFormatTranslator::new(profile.date_format.clone())?;

        let keywords: IndexSet<String> = profile
            .keywords
            .iter()
            .map(|k| k.to_ascii_lowercase())
            .collect();

        debug!(
            dialect = %profile.name,
            product = %product,
            pagination = %profile.pagination,
            identity = %profile.identity,
            column_types = profile.column_types.len(),
            keywords = keywords.len(),
            "Built dialect"
        );

        Ok(Dialect {
            product,
            profile,
            column_types,
            descriptors,
            date_format,
            keywords,
        })
    }
}

/// The limit flags always describe what the pagination strategy can do
fn align_limit_capabilities(profile: &mut DialectProfile) {
    let capabilities = &mut profile.capabilities;
    let limit = profile.pagination.supports_limit();
    let offset = profile.pagination.supports_offset();
    if capabilities.supports_limit != limit || capabilities.supports_limit_offset != offset {
        debug!(
            dialect = %profile.name,
            pagination = %profile.pagination,
            supports_limit = limit,
            supports_limit_offset = offset,
            "Limit capabilities follow the pagination strategy"
        );
    }
    capabilities.supports_limit = limit;
    capabilities.supports_limit_offset = offset;
}

fn validate_quotes(quotes: &QuotePair) -> Result<()> {
    for c in [quotes.open, quotes.close] {
        if c.is_alphanumeric() || c.is_whitespace() || c == '_' {
            return Err(DialectError::Config(format!(
                "'{c}' cannot be used as an identifier quote"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::generic;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delta_keeps_unset_fields() {
        let mut profile = generic::profile();
        let before = profile.clone();
        profile.apply(DialectDelta::default());
        assert_eq!(profile, before);
    }

    #[test]
    fn test_delta_overrides_and_extends() {
        let mut profile = generic::profile();
        let keyword_count = profile.keywords.len();
        profile.apply(DialectDelta {
            name: Some("custom".into()),
            quotes: Some(QuotePair::new('[', ']')),
            keywords: vec!["TOP".into(), "select".into()],
            pagination: Some(PaginationStrategy::TopOnly),
            ..Default::default()
        });
        assert_eq!(profile.name, "custom");
        assert_eq!(profile.quotes, QuotePair::new('[', ']'));
        assert_eq!(profile.pagination, PaginationStrategy::TopOnly);
        // "select" is already reserved
        assert_eq!(profile.keywords.len(), keyword_count + 1);
    }

    #[test]
    fn test_rejects_letter_quotes() {
        let err = DialectBuilder::new(Product::Generic, generic::profile())
            .apply(DialectDelta {
                quotes: Some(QuotePair::new('q', 'q')),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_rejects_override_to_unknown_descriptor() {
        let mut overrides = IndexMap::new();
        overrides.insert(TypeCode::TinyInt, TypeCode::Other);
        let err = DialectBuilder::new(Product::Generic, generic::profile())
            .apply(DialectDelta {
                descriptor_overrides: overrides,
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_delta_from_toml() {
        let delta: DialectDelta = toml::from_str(
            r#"
            name = "legacy"
            pagination = "top-only"
            keywords = ["rowcount"]

            [quotes]
            open = "["
            close = "]"

            [capabilities]
            supports_limit = true

            [[column_types]]
            type_code = "varchar"
            max_length = 4000
            pattern = "nvarchar($l)"

            [extract_fields]
            week = "isowk"
            "#,
        )
        .unwrap();
        assert_eq!(delta.name.as_deref(), Some("legacy"));
        assert_eq!(delta.pagination, Some(PaginationStrategy::TopOnly));
        assert_eq!(delta.quotes, Some(QuotePair::new('[', ']')));
        assert_eq!(delta.capabilities.supports_limit, Some(true));
        assert_eq!(
            delta.column_types,
            vec![ColumnTypeRule::sized(TypeCode::Varchar, 4000, "nvarchar($l)")]
        );
        assert_eq!(
            delta.extract_fields.get(&TemporalUnit::Week).map(String::as_str),
            Some("isowk")
        );
    }

    #[test]
    fn test_limit_capabilities_follow_pagination() {
        let dialect = DialectBuilder::new(Product::PostgreSQL, generic::profile())
            .apply(DialectDelta {
                capabilities: CapabilityOverrides {
                    supports_limit: Some(true),
                    supports_limit_offset: Some(true),
                    ..Default::default()
                },
                pagination: Some(PaginationStrategy::TopOnly),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert!(dialect.supports_limit());
        assert!(!dialect.supports_limit_offset());
        assert_eq!(
            dialect.inject_pagination("select 1", 5, 1).unwrap_err().kind(),
            "unsupported-operation"
        );

        let dialect = DialectBuilder::new(Product::Generic, generic::profile())
            .apply(DialectDelta {
                pagination: Some(PaginationStrategy::TopOnly),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert!(dialect.supports_limit());
        assert_eq!(
            dialect.inject_pagination("select 1", 0, 1).unwrap(),
            "select top 1 1"
        );

        let dialect = DialectBuilder::new(Product::Generic, generic::profile())
            .apply(DialectDelta {
                capabilities: CapabilityOverrides {
                    supports_limit: Some(true),
                    ..Default::default()
                },
                ..Default::default()
            })
            .build()
            .unwrap();
        assert!(!dialect.supports_limit());
    }

    #[test]
    fn test_misspelled_capability_is_rejected() {
        let result: std::result::Result<DialectDelta, _> =
            toml::from_str("[capabilities]\nsuports_limit = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_nested_fields_are_rejected() {
        for document in [
            "[quotes]\nopen = \"[\"\nclose = \"]\"\nescape = \"]\"",
            "[[column_types]]\ntype_code = \"varchar\"\npattern = \"text\"\nmax_len = 10",
        ] {
            let result: std::result::Result<DialectDelta, _> = toml::from_str(document);
            assert!(result.is_err(), "{document}");
        }
    }

    #[test]
    fn test_unknown_delta_field_is_rejected() {
        let result: std::result::Result<DialectDelta, _> = toml::from_str("paging = \"top\"");
        assert!(result.is_err());
    }
}
