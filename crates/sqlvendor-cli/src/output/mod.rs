//! Output formatting

use sqlvendor_core::{Dialect, DialectError};

use crate::args::OutputFormat;

/// Output formatter for command results and dialect errors
pub struct OutputFormatter {
    format: OutputFormat,
    dialect_name: String,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, dialect: &Dialect) -> Self {
        Self {
            format,
            dialect_name: dialect.name().to_string(),
        }
    }

    /// Print the answer to a single dialect question
    pub fn print_answer(&self, command: &str, input: &str, output: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", output),
            OutputFormat::Json => print_json(&serde_json::json!({
                "dialect": self.dialect_name,
                "command": command,
                "input": input,
                "output": output,
            })),
        }
    }

    /// Print a rewritten statement, labelled with where it came from
    pub fn print_statement(&self, source: &str, sql: &str) {
        match self.format {
            OutputFormat::Human => {
                if source != "<arg>" {
                    println!("-- {}", source);
                }
                println!("{}", sql);
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "dialect": self.dialect_name,
                "file": source,
                "sql": sql,
            })),
        }
    }

    pub fn print_error(&self, source: &str, error: &DialectError) {
        match self.format {
            OutputFormat::Human => {
                eprintln!("\x1b[31merror\x1b[0m[{}]: {}", error.kind(), source);
                eprintln!("{:?}", miette::Report::new(error.clone()));
            }
            OutputFormat::Json => {
                let mut payload = serde_json::json!({
                    "dialect": self.dialect_name,
                    "file": source,
                    "error": {
                        "kind": error.kind(),
                        "message": error.to_string(),
                    }
                });
                if let DialectError::InvalidStatement { sql, span, .. } = error {
                    let (line, column) = offset_to_line_col(sql, span.offset());
                    payload["error"]["line"] = line.into();
                    payload["error"]["column"] = column.into();
                }
                print_json(&payload);
            }
        }
    }

    /// Print capabilities, quoting and strategies
    pub fn print_info(&self, dialect: &Dialect) {
        let profile = dialect.profile();
        match self.format {
            OutputFormat::Human => {
                println!("Dialect: {} ({})", dialect.name(), dialect.product());
                println!("==================");
                println!(
                    "  quotes:      {}{}",
                    dialect.open_quote(),
                    dialect.close_quote()
                );
                println!("  pagination:  {}", profile.pagination);
                println!("  lock hints:  {}", profile.lock_hints.name());
                println!("  identity:    {}", profile.identity.name());
                if let Some(limit) = dialect.in_expression_count_limit() {
                    println!("  in-list max: {}", limit);
                }
                println!(
                    "  keywords:    {}",
                    dialect.keywords().collect::<Vec<_>>().join(", ")
                );
                println!("\nCapabilities:");
                for (name, enabled) in dialect.capabilities().entries() {
                    println!("  - {} {}", name, enabled);
                }
                println!("\nColumn types:");
                for rule in dialect.column_types().rules() {
                    match rule.max_length {
                        Some(max) => {
                            println!("  - {} (<= {}) {}", rule.type_code, max, rule.pattern)
                        }
                        None => println!("  - {} {}", rule.type_code, rule.pattern),
                    }
                }
            }
            OutputFormat::Json => {
                let capabilities: serde_json::Map<String, serde_json::Value> = dialect
                    .capabilities()
                    .entries()
                    .into_iter()
                    .map(|(name, enabled)| (name.to_string(), enabled.into()))
                    .collect();
                print_json(&serde_json::json!({
                    "dialect": dialect.name(),
                    "product": dialect.product(),
                    "quotes": [dialect.open_quote(), dialect.close_quote()],
                    "pagination": profile.pagination,
                    "lock_hints": profile.lock_hints,
                    "identity": profile.identity,
                    "in_expression_count_limit": dialect.in_expression_count_limit(),
                    "capabilities": capabilities,
                    "column_types": dialect.column_types().rules(),
                    "keywords": dialect.keywords().collect::<Vec<_>>(),
                }));
            }
        }
    }
}

fn print_json(value: &serde_json::Value) {
    println!("{:#}", value);
}

/// Convert byte offset to line and column (1-indexed)
fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}
