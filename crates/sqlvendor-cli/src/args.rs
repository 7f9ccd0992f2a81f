//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sqlvendor")]
#[command(author, version, about = "Inspect and exercise SQL vendor dialects")]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Database product (generic, postgresql, sqlserver)
    #[arg(short, long, global = true, env = "SQLVENDOR_DIALECT")]
    pub dialect: Option<String>,

    /// Dialect configuration file [default: sqlvendor.toml in the current or a parent directory]
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the dialect's capabilities, quotes and strategies
    Info,

    /// Add the dialect's row-limiting clause to select statements
    Paginate {
        /// Statement to paginate
        sql: Option<String>,

        /// Files holding one statement each (supports glob patterns)
        #[arg(long = "file", value_name = "GLOB")]
        files: Vec<String>,

        /// Maximum number of rows
        #[arg(long)]
        limit: u64,

        /// Number of rows to skip
        #[arg(long, default_value = "0")]
        offset: u64,
    },

    /// Append the lock hint for a lock mode to a table reference
    LockHint {
        /// Table reference, e.g. "orders o"
        table: String,

        /// Lock mode (e.g. upgrade, pessimistic-read, upgrade-skiplocked)
        #[arg(short, long)]
        mode: String,
    },

    /// Resolve the column type name for a type code
    TypeName {
        /// Type code (e.g. varchar, varbinary, numeric)
        type_code: String,

        #[arg(long)]
        length: Option<u64>,

        #[arg(long)]
        precision: Option<u32>,

        #[arg(long)]
        scale: Option<u32>,
    },

    /// Translate a date format pattern into the dialect's tokens
    FormatDate {
        /// Pattern such as "EEEE, yyyy-MM-dd 'at' hh:mm a"
        pattern: String,
    },

    /// Show the field keyword used to extract a temporal unit
    ExtractField {
        /// Temporal unit (e.g. week, day_of_week)
        unit: String,
    },

    /// Render a value as an inline SQL literal
    Literal {
        /// Value in its textual form
        value: String,

        /// Type code of the target column
        #[arg(short = 't', long = "type")]
        type_code: String,

        /// Value type to read the value as [default: the type code's recommended type]
        #[arg(long)]
        value_type: Option<String>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown output format: '{}'. Supported formats: human, json.",
                s
            )),
        }
    }
}
