//! Column type name templates, keyed by type code and capacity

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};
use crate::types::TypeCode;

/// Size information substituted into a template.
///
/// `$l` is replaced by the length, `$p` by the precision and `$s` by the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSize {
    pub length: u64,
    pub precision: u32,
    pub scale: u32,
}

impl ColumnSize {
    pub const DEFAULT_LENGTH: u64 = 255;
    pub const DEFAULT_PRECISION: u32 = 19;
    pub const DEFAULT_SCALE: u32 = 2;

    pub fn with_length(length: u64) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }
}

impl Default for ColumnSize {
    fn default() -> Self {
        Self {
            length: Self::DEFAULT_LENGTH,
            precision: Self::DEFAULT_PRECISION,
            scale: Self::DEFAULT_SCALE,
        }
    }
}

/// One registration: `pattern` is used for lengths up to `max_length`, or for
/// any length when `max_length` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnTypeRule {
    pub type_code: TypeCode,
    #[serde(default)]
    pub max_length: Option<u64>,
    pub pattern: String,
}

impl ColumnTypeRule {
    pub fn new(type_code: TypeCode, pattern: impl Into<String>) -> Self {
        Self {
            type_code,
            max_length: None,
            pattern: pattern.into(),
        }
    }

    pub fn sized(type_code: TypeCode, max_length: u64, pattern: impl Into<String>) -> Self {
        Self {
            type_code,
            max_length: Some(max_length),
            pattern: pattern.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Templates {
    /// capacity -> pattern
    sized: BTreeMap<u64, String>,
    unbounded: Option<String>,
}

/// Registry of column type name templates.
///
/// Populated only while a dialect is being built; a built dialect hands out
/// shared references only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNameRegistry {
    templates: IndexMap<TypeCode, Templates>,
}

impl TypeNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. A later registration for the same code and
    /// capacity replaces the earlier one.
    pub(crate) fn register(&mut self, rule: ColumnTypeRule) {
        let entry = self.templates.entry(rule.type_code).or_default();
        match rule.max_length {
            Some(capacity) => {
                entry.sized.insert(capacity, rule.pattern);
            }
            None => entry.unbounded = Some(rule.pattern),
        }
    }

    pub(crate) fn extend(&mut self, rules: impl IntoIterator<Item = ColumnTypeRule>) {
        for rule in rules {
            self.register(rule);
        }
    }

    /// Check whether any template is registered for the code
    pub fn contains(&self, type_code: TypeCode) -> bool {
        self.templates.contains_key(&type_code)
    }

    /// Resolve the column type name for a code and an optional length.
    ///
    /// Without a length the unbounded template is used with default sizes.
    pub fn resolve(&self, type_code: TypeCode, length: Option<u64>) -> Result<String> {
        let size = match length {
            Some(l) => ColumnSize::with_length(l),
            None => ColumnSize::default(),
        };
        self.lookup(type_code, length, size)
    }

    /// Resolve with explicit length, precision and scale
    pub fn resolve_sized(&self, type_code: TypeCode, size: ColumnSize) -> Result<String> {
        self.lookup(type_code, Some(size.length), size)
    }

    fn lookup(&self, type_code: TypeCode, length: Option<u64>, size: ColumnSize) -> Result<String> {
        let not_registered = || DialectError::TypeNotRegistered { type_code, length };
        let templates = self.templates.get(&type_code).ok_or_else(not_registered)?;

        // Smallest capacity that still covers the requested length
        let pattern = match length {
            Some(l) => templates
                .sized
                .range(l..)
                .next()
                .map(|(_, pattern)| pattern)
                .or(templates.unbounded.as_ref()),
            // Sized templates only apply to a known length
            None => templates.unbounded.as_ref(),
        }
        .ok_or_else(not_registered)?;

        Ok(substitute(pattern, size))
    }

    /// All registrations, in registration order of their type codes
    pub fn rules(&self) -> Vec<ColumnTypeRule> {
        let mut rules = Vec::new();
        for (code, templates) in &self.templates {
            for (capacity, pattern) in &templates.sized {
                rules.push(ColumnTypeRule::sized(*code, *capacity, pattern.clone()));
            }
            if let Some(pattern) = &templates.unbounded {
                rules.push(ColumnTypeRule::new(*code, pattern.clone()));
            }
        }
        rules
    }
}

fn substitute(pattern: &str, size: ColumnSize) -> String {
    pattern
        .replace("$l", &size.length.to_string())
        .replace("$p", &size.precision.to_string())
        .replace("$s", &size.scale.to_string())
}
