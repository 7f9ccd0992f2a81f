//! Row-limiting clause injection

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{DialectError, Result};

/// How a dialect expresses a row limit and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationStrategy {
    /// Leave the statement untouched; limits are applied by the caller
    #[default]
    NoOp,
    /// Pagination cannot be expressed at all
    Unsupported,
    /// Trailing `limit n offset m`
    LimitOffset,
    /// `top n` after `select`; offsets cannot be expressed
    TopOnly,
}

impl PaginationStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            PaginationStrategy::NoOp => "no-op",
            PaginationStrategy::Unsupported => "unsupported",
            PaginationStrategy::LimitOffset => "limit-offset",
            PaginationStrategy::TopOnly => "top-only",
        }
    }

    pub fn supports_limit(&self) -> bool {
        matches!(
            self,
            PaginationStrategy::LimitOffset | PaginationStrategy::TopOnly
        )
    }

    pub fn supports_offset(&self) -> bool {
        matches!(self, PaginationStrategy::LimitOffset)
    }

    /// Rewrite `sql` so that it returns at most `limit` rows after skipping
    /// `offset` rows.
    pub fn apply(&self, dialect: &str, sql: &str, offset: u64, limit: u64) -> Result<String> {
        match self {
            PaginationStrategy::NoOp => Ok(sql.to_string()),
            PaginationStrategy::Unsupported => Err(DialectError::unsupported(
                dialect,
                "query result pagination",
                self.name(),
            )),
            PaginationStrategy::LimitOffset => {
                let mut out = String::with_capacity(sql.len() + 32);
                out.push_str(sql);
                out.push_str(" limit ");
                out.push_str(&limit.to_string());
                if offset > 0 {
                    out.push_str(" offset ");
                    out.push_str(&offset.to_string());
                }
                Ok(out)
            }
            PaginationStrategy::TopOnly => {
                if offset > 0 {
                    return Err(DialectError::unsupported(
                        dialect,
                        format!("query result offset ({offset})"),
                        self.name(),
                    ));
                }
                let point = after_select_insert_point(sql).ok_or_else(|| {
                    DialectError::InvalidStatement {
                        message: "statement has no select keyword to attach a row limit to"
                            .to_string(),
                        sql: sql.to_string(),
                        span: (0, sql.len()).into(),
                    }
                })?;
                let mut out = String::with_capacity(sql.len() + 8);
                out.push_str(&sql[..point]);
                out.push_str(" top ");
                out.push_str(&limit.to_string());
                out.push_str(&sql[point..]);
                Ok(out)
            }
        }
    }
}

impl FromStr for PaginationStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no-op" | "noop" | "none" => Ok(PaginationStrategy::NoOp),
            "unsupported" => Ok(PaginationStrategy::Unsupported),
            "limit-offset" | "offset" => Ok(PaginationStrategy::LimitOffset),
            "top-only" | "top" | "max-rows" => Ok(PaginationStrategy::TopOnly),
            _ => Err(format!("Unknown pagination strategy: '{}'", s)),
        }
    }
}

impl std::fmt::Display for PaginationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Byte index right after the first `select` (or `select distinct`) keyword.
///
/// This is a plain case-insensitive text search: a `select` inside an
/// identifier or string literal that precedes the real keyword is matched
/// too.
pub fn after_select_insert_point(sql: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets aligned with the original text
    let lowered = sql.to_ascii_lowercase();
    let select_index = lowered.find("select")?;
    if lowered[select_index..].starts_with("select distinct") {
        Some(select_index + 15)
    } else {
        Some(select_index + 6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_point() {
        assert_eq!(after_select_insert_point("select foo"), Some(6));
        assert_eq!(after_select_insert_point("select distinct foo"), Some(15));
        assert_eq!(after_select_insert_point("SELECT DISTINCT foo"), Some(15));
        assert_eq!(after_select_insert_point("  Select foo"), Some(8));
        assert_eq!(after_select_insert_point("update t set a = 1"), None);
    }

    #[test]
    fn test_insert_point_matches_inside_identifiers() {
        // Known limitation of the text search
        assert_eq!(
            after_select_insert_point("with preselected as (select 1) select * from preselected"),
            Some(14)
        );
    }

    #[test]
    fn test_top_only() {
        let strategy = PaginationStrategy::TopOnly;
        assert_eq!(
            strategy.apply("sqlserver", "select * from t", 0, 10).unwrap(),
            "select top 10 * from t"
        );
        assert_eq!(
            strategy
                .apply("sqlserver", "select distinct name from [users]", 0, 5)
                .unwrap(),
            "select distinct top 5 name from [users]"
        );
    }

    #[test]
    fn test_top_only_rejects_every_positive_offset() {
        let strategy = PaginationStrategy::TopOnly;
        for offset in [1, 2, 10, 1_000, u64::MAX] {
            let err = strategy
                .apply("sqlserver", "select * from t", offset, 10)
                .unwrap_err();
            assert_eq!(err.kind(), "unsupported-operation");
        }
    }

    #[test]
    fn test_top_only_without_select() {
        let err = PaginationStrategy::TopOnly
            .apply("sqlserver", "delete from t", 0, 1)
            .unwrap_err();
        assert_eq!(err.kind(), "invalid-statement");
    }

    #[test]
    fn test_limit_offset() {
        let strategy = PaginationStrategy::LimitOffset;
        assert_eq!(
            strategy.apply("postgresql", "select * from t", 0, 10).unwrap(),
            "select * from t limit 10"
        );
        assert_eq!(
            strategy.apply("postgresql", "select * from t", 20, 10).unwrap(),
            "select * from t limit 10 offset 20"
        );
    }

    #[test]
    fn test_no_op_and_unsupported() {
        assert_eq!(
            PaginationStrategy::NoOp
                .apply("generic", "select 1", 5, 10)
                .unwrap(),
            "select 1"
        );
        assert!(PaginationStrategy::Unsupported
            .apply("generic", "select 1", 0, 10)
            .is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!("top".parse(), Ok(PaginationStrategy::TopOnly));
        assert_eq!("LIMIT-OFFSET".parse(), Ok(PaginationStrategy::LimitOffset));
        assert!("fetch-first".parse::<PaginationStrategy>().is_err());
    }
}
