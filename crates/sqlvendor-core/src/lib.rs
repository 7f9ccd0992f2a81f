//! sqlvendor-core: vendor dialect layer for SQL generation
//!
//! This library answers the database-specific questions a query engine asks
//! while generating SQL: column type names, value binding and literals,
//! pagination, lock hints, date formats and identity columns.

pub mod config;
pub mod descriptor;
pub mod dialect;
pub mod error;
pub mod identity;
pub mod literal;
pub mod sql;
pub mod types;
pub mod value;

pub use config::DialectConfig;
pub use descriptor::{DescriptorRegistry, SqlTypeDescriptor};
pub use dialect::{Dialect, DialectBuilder, DialectDelta, Product};
pub use error::{DialectError, Result};
pub use identity::IdentityColumnStrategy;
pub use literal::LiteralFormatter;
pub use sql::{LockMode, PaginationStrategy, TemporalUnit};
pub use types::{TypeCode, TypeConfiguration, ValueType};
pub use value::{ExecutionContext, Value, WireValue};
