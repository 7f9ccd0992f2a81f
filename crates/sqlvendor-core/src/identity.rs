//! Identity (auto-increment) column support

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};

/// How a dialect declares identity columns and reads back generated keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityColumnStrategy {
    /// Identity columns are not supported
    #[default]
    None,
    /// `identity` columns read back through `@@identity`
    TransactSql,
    /// Like `TransactSql`, and the insert itself can return the key through
    /// `scope_identity()`
    SqlServer,
    /// Standard `generated by default as identity` columns
    GeneratedByDefault,
}

impl IdentityColumnStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            IdentityColumnStrategy::None => "none",
            IdentityColumnStrategy::TransactSql => "transact-sql",
            IdentityColumnStrategy::SqlServer => "sql-server",
            IdentityColumnStrategy::GeneratedByDefault => "generated-by-default",
        }
    }

    pub fn supports_identity_columns(&self) -> bool {
        !matches!(self, IdentityColumnStrategy::None)
    }

    /// Whether the generated key can be selected in the same statement as
    /// the insert
    pub fn supports_insert_select_identity(&self) -> bool {
        matches!(self, IdentityColumnStrategy::SqlServer)
    }

    /// Column definition fragment declaring the identity
    pub fn identity_column_string(&self, dialect: &str) -> Result<&'static str> {
        match self {
            IdentityColumnStrategy::TransactSql | IdentityColumnStrategy::SqlServer => {
                Ok("identity not null")
            }
            IdentityColumnStrategy::GeneratedByDefault => {
                Ok("generated by default as identity")
            }
            IdentityColumnStrategy::None => Err(self.unsupported(dialect, "identity columns")),
        }
    }

    /// Query returning the last generated key for `table.column`
    pub fn identity_select_string(&self, dialect: &str, table: &str, column: &str) -> Result<String> {
        match self {
            IdentityColumnStrategy::TransactSql | IdentityColumnStrategy::SqlServer => {
                Ok("select @@identity".to_string())
            }
            IdentityColumnStrategy::GeneratedByDefault => Ok(format!(
                "select currval(pg_get_serial_sequence('{table}','{column}'))"
            )),
            IdentityColumnStrategy::None => {
                Err(self.unsupported(dialect, "identity key retrieval"))
            }
        }
    }

    /// Extend an insert so that it also returns the generated key; `None`
    /// when the strategy cannot do it in one statement
    pub fn append_identity_select_to_insert(&self, insert: &str) -> Option<String> {
        self.supports_insert_select_identity()
            .then(|| format!("{insert} select scope_identity()"))
    }

    fn unsupported(&self, dialect: &str, operation: &str) -> DialectError {
        DialectError::unsupported(dialect, operation, self.name())
    }
}

impl std::fmt::Display for IdentityColumnStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sql_server_identity() {
        let strategy = IdentityColumnStrategy::SqlServer;
        assert_eq!(
            strategy.identity_column_string("sqlserver").unwrap(),
            "identity not null"
        );
        assert_eq!(
            strategy
                .identity_select_string("sqlserver", "users", "id")
                .unwrap(),
            "select @@identity"
        );
        assert_eq!(
            strategy
                .append_identity_select_to_insert("insert into users (name) values (?)")
                .as_deref(),
            Some("insert into users (name) values (?) select scope_identity()")
        );
    }

    #[test]
    fn test_transact_sql_has_no_insert_select() {
        assert_eq!(
            IdentityColumnStrategy::TransactSql.append_identity_select_to_insert("insert"),
            None
        );
    }

    #[test]
    fn test_generated_by_default() {
        let strategy = IdentityColumnStrategy::GeneratedByDefault;
        assert_eq!(
            strategy
                .identity_select_string("postgresql", "users", "id")
                .unwrap(),
            "select currval(pg_get_serial_sequence('users','id'))"
        );
    }

    #[test]
    fn test_none() {
        let err = IdentityColumnStrategy::None
            .identity_column_string("generic")
            .unwrap_err();
        assert_eq!(err.kind(), "unsupported-operation");
        assert!(!IdentityColumnStrategy::None.supports_identity_columns());
    }
}
