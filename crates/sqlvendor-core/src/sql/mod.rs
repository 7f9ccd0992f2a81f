//! Vendor-specific SQL text rewriting

mod format;
mod lock;
mod pagination;
mod temporal;

pub use format::{DateFormatRules, DateFormatTranslator, FormatRule};
pub use lock::{LockHint, LockHintStyle, LockMode};
pub use pagination::{after_select_insert_point, PaginationStrategy};
pub use temporal::TemporalUnit;
