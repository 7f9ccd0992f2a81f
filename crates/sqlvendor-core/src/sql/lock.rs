//! Lock modes and how a dialect expresses them

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Requested row-locking behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockMode {
    None,
    Read,
    Optimistic,
    OptimisticForceIncrement,
    Write,
    Upgrade,
    UpgradeNoWait,
    UpgradeSkipLocked,
    PessimisticRead,
    PessimisticWrite,
    PessimisticForceIncrement,
}

impl LockMode {
    pub const ALL: [LockMode; 11] = [
        LockMode::None,
        LockMode::Read,
        LockMode::Optimistic,
        LockMode::OptimisticForceIncrement,
        LockMode::Write,
        LockMode::Upgrade,
        LockMode::UpgradeNoWait,
        LockMode::UpgradeSkipLocked,
        LockMode::PessimisticRead,
        LockMode::PessimisticWrite,
        LockMode::PessimisticForceIncrement,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LockMode::None => "none",
            LockMode::Read => "read",
            LockMode::Optimistic => "optimistic",
            LockMode::OptimisticForceIncrement => "optimistic-force-increment",
            LockMode::Write => "write",
            LockMode::Upgrade => "upgrade",
            LockMode::UpgradeNoWait => "upgrade-nowait",
            LockMode::UpgradeSkipLocked => "upgrade-skiplocked",
            LockMode::PessimisticRead => "pessimistic-read",
            LockMode::PessimisticWrite => "pessimistic-write",
            LockMode::PessimisticForceIncrement => "pessimistic-force-increment",
        }
    }

    /// Whether the mode takes a database lock when rows are read
    pub fn is_pessimistic(&self) -> bool {
        matches!(
            self,
            LockMode::Write
                | LockMode::Upgrade
                | LockMode::UpgradeNoWait
                | LockMode::UpgradeSkipLocked
                | LockMode::PessimisticRead
                | LockMode::PessimisticWrite
                | LockMode::PessimisticForceIncrement
        )
    }
}

impl FromStr for LockMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "none" => Ok(LockMode::None),
            "read" => Ok(LockMode::Read),
            "optimistic" => Ok(LockMode::Optimistic),
            "optimistic-force-increment" => Ok(LockMode::OptimisticForceIncrement),
            "write" => Ok(LockMode::Write),
            "upgrade" => Ok(LockMode::Upgrade),
            "upgrade-nowait" | "upgrade-no-wait" => Ok(LockMode::UpgradeNoWait),
            "upgrade-skiplocked" | "upgrade-skip-locked" => Ok(LockMode::UpgradeSkipLocked),
            "pessimistic-read" => Ok(LockMode::PessimisticRead),
            "pessimistic-write" => Ok(LockMode::PessimisticWrite),
            "pessimistic-force-increment" => Ok(LockMode::PessimisticForceIncrement),
            _ => Err(format!("Unknown lock mode: '{}'", s)),
        }
    }
}

impl std::fmt::Display for LockMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The table-level hint a dialect chose for a lock mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockHint {
    /// Append this hint after the table reference
    Hint(&'static str),
    /// The mode needs no locking hint
    NotRequired,
    /// The dialect has no hint for this mode; the table is left unchanged
    Unsupported,
}

/// Where a dialect puts its row-locking syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockHintStyle {
    /// Table hints such as `with (updlock, rowlock)` after each table reference
    TableHints,
    /// A trailing `for update` clause on the statement
    #[default]
    ForUpdate,
}

impl LockHintStyle {
    pub fn name(&self) -> &'static str {
        match self {
            LockHintStyle::TableHints => "table-hints",
            LockHintStyle::ForUpdate => "for-update",
        }
    }

    pub fn hint(&self, mode: LockMode) -> LockHint {
        match self {
            LockHintStyle::TableHints => match mode {
                LockMode::Upgrade
                | LockMode::UpgradeNoWait
                | LockMode::PessimisticWrite
                | LockMode::Write => LockHint::Hint("with (updlock, rowlock)"),
                LockMode::PessimisticRead => LockHint::Hint("with (holdlock, rowlock)"),
                LockMode::UpgradeSkipLocked => LockHint::Hint("with (updlock, rowlock, readpast)"),
                LockMode::PessimisticForceIncrement => LockHint::Unsupported,
                LockMode::None
                | LockMode::Read
                | LockMode::Optimistic
                | LockMode::OptimisticForceIncrement => LockHint::NotRequired,
            },
            LockHintStyle::ForUpdate => LockHint::NotRequired,
        }
    }

    /// Append the lock hint for `mode` to a table reference
    pub fn append(&self, mode: LockMode, table: &str) -> String {
        match self.hint(mode) {
            LockHint::Hint(hint) => format!("{table} {hint}"),
            LockHint::NotRequired => table.to_string(),
            LockHint::Unsupported => {
                debug!(lock_mode = %mode, style = self.name(), "No table hint for lock mode");
                table.to_string()
            }
        }
    }

    /// The statement-level clause requesting `mode`; empty when the style
    /// locks through table hints or the mode takes no lock.
    pub fn for_update_clause(&self, mode: LockMode) -> &'static str {
        match self {
            LockHintStyle::TableHints => "",
            LockHintStyle::ForUpdate => match mode {
                LockMode::Write
                | LockMode::Upgrade
                | LockMode::PessimisticWrite
                | LockMode::PessimisticForceIncrement => " for update",
                LockMode::UpgradeNoWait => " for update nowait",
                LockMode::UpgradeSkipLocked => " for update skip locked",
                LockMode::PessimisticRead => " for share",
                LockMode::None
                | LockMode::Read
                | LockMode::Optimistic
                | LockMode::OptimisticForceIncrement => "",
            },
        }
    }
}
