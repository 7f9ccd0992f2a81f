//! sqlvendor CLI - inspect and exercise SQL vendor dialects

mod args;
mod config;
mod output;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use sqlparser::ast::Statement;
use sqlparser::dialect::{GenericDialect, MsSqlDialect, PostgreSqlDialect};
use sqlvendor_core::sql::LockHint;
use sqlvendor_core::types::ColumnSize;
use sqlvendor_core::{
    Dialect, ExecutionContext, LockMode, Product, TemporalUnit, TypeCode, TypeConfiguration,
    Value, ValueType,
};

use crate::args::{Args, Command};
use crate::config::Config;
use crate::output::OutputFormatter;

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.quiet {
        tracing::Level::ERROR
    } else {
        match args.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(args) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    let config = if let Some(path) = &args.config {
        Config::from_file(path)?
    } else {
        Config::find_and_load()?.unwrap_or_default()
    };

    // CLI takes precedence over the config file
    let config = config.merge_with_args(&args.dialect, &args.format)?;
    let dialect = config.dialect.build().map_err(miette::Report::new)?;
    let formatter = OutputFormatter::new(config.output_format()?, &dialect);

    match args.command {
        Command::Info => {
            formatter.print_info(&dialect);
            Ok(false)
        }

        Command::Paginate {
            sql,
            files,
            limit,
            offset,
        } => {
            let mut statements: Vec<(String, String)> = Vec::new();
            if let Some(sql) = sql {
                statements.push(("<arg>".to_string(), sql));
            }
            for path in expand_files(&files)? {
                let content = fs::read_to_string(&path).into_diagnostic()?;
                statements.push((path.display().to_string(), content));
            }

            if statements.is_empty() {
                miette::bail!("No statement given. Pass SQL as an argument or use --file");
            }

            let mut has_errors = false;
            for (source, sql) in &statements {
                let sql = sql.trim().trim_end_matches(';').trim_end();
                if let Err(message) = check_query(dialect.product(), sql) {
                    eprintln!("\x1b[31merror\x1b[0m: {}: {}", source, message);
                    has_errors = true;
                    continue;
                }
                match dialect.inject_pagination(sql, offset, limit) {
                    Ok(paginated) => formatter.print_statement(source, &paginated),
                    Err(e) => {
                        formatter.print_error(source, &e);
                        has_errors = true;
                    }
                }
            }

            Ok(has_errors)
        }

        Command::LockHint { table, mode } => {
            let mode: LockMode = mode.parse().map_err(|e: String| miette::miette!(e))?;
            if dialect.lock_hint(mode) == LockHint::Unsupported {
                tracing::warn!(
                    dialect = dialect.name(),
                    mode = mode.name(),
                    "No table hint for this lock mode, table left unchanged"
                );
            }
            formatter.print_answer("lock-hint", &table, &dialect.append_lock_hint(mode, &table));
            let clause = dialect.for_update_clause(mode);
            if !clause.is_empty() {
                formatter.print_answer("for-update", mode.name(), clause.trim_start());
            }
            Ok(false)
        }

        Command::TypeName {
            type_code,
            length,
            precision,
            scale,
        } => {
            let code: TypeCode = type_code.parse().map_err(|e: String| miette::miette!(e))?;
            let resolved = if precision.is_some() || scale.is_some() {
                let defaults = ColumnSize::default();
                dialect.column_type_name_sized(
                    code,
                    ColumnSize {
                        length: length.unwrap_or(defaults.length),
                        precision: precision.unwrap_or(defaults.precision),
                        scale: scale.unwrap_or(defaults.scale),
                    },
                )
            } else {
                dialect.column_type_name(code, length)
            };
            match resolved {
                Ok(name) => {
                    formatter.print_answer("type-name", code.name(), &name);
                    Ok(false)
                }
                Err(e) => {
                    formatter.print_error(code.name(), &e);
                    Ok(true)
                }
            }
        }

        Command::FormatDate { pattern } => {
            formatter.print_answer(
                "format-date",
                &pattern,
                &dialect.translate_date_format(&pattern),
            );
            Ok(false)
        }

        Command::ExtractField { unit } => {
            let unit: TemporalUnit = unit.parse().map_err(|e: String| miette::miette!(e))?;
            formatter.print_answer(
                "extract-field",
                unit.name(),
                dialect.translate_temporal_field(unit),
            );
            Ok(false)
        }

        Command::Literal {
            value,
            type_code,
            value_type,
        } => {
            let code: TypeCode = type_code.parse().map_err(|e: String| miette::miette!(e))?;
            match render_literal(&dialect, code, &value, value_type.as_deref())? {
                Ok(literal) => {
                    formatter.print_answer("literal", &value, &literal);
                    Ok(false)
                }
                Err(e) => {
                    formatter.print_error(&value, &e);
                    Ok(true)
                }
            }
        }
    }
}

/// Outer error: bad input. Inner error: the dialect refused the value.
fn render_literal(
    dialect: &Dialect,
    code: TypeCode,
    text: &str,
    value_type: Option<&str>,
) -> Result<sqlvendor_core::Result<String>> {
    let value_type: ValueType = match value_type {
        Some(name) => name.parse().map_err(|e: String| miette::miette!(e))?,
        None => match dialect.recommended_value_type(code, &TypeConfiguration::default()) {
            Ok(value_type) => value_type,
            Err(e) => return Ok(Err(e)),
        },
    };

    let value = if text.eq_ignore_ascii_case("null") {
        Value::Null
    } else {
        Value::parse(text, value_type).map_err(|e| miette::miette!(e))?
    };
    tracing::debug!(type_code = %code, value_type = %value_type, "Rendering literal");

    Ok(dialect.format_literal(code, &value, &ExecutionContext::default()))
}

fn expand_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') {
            for path in glob::glob(pattern).into_diagnostic()?.flatten() {
                paths.push(path);
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }
    Ok(paths)
}

fn parser_dialect(product: Product) -> Box<dyn sqlparser::dialect::Dialect> {
    match product {
        Product::Generic => Box::new(GenericDialect {}),
        Product::PostgreSQL => Box::new(PostgreSqlDialect {}),
        Product::SqlServer => Box::new(MsSqlDialect {}),
    }
}

/// Reject statements that parse as something other than a query.
///
/// Statements the parser cannot read are passed through as text.
fn check_query(product: Product, sql: &str) -> std::result::Result<(), String> {
    let dialect = parser_dialect(product);
    match sqlparser::parser::Parser::parse_sql(dialect.as_ref(), sql) {
        Ok(statements) => {
            if statements.len() != 1 {
                return Err(format!(
                    "expected a single statement, found {}",
                    statements.len()
                ));
            }
            match &statements[0] {
                Statement::Query(_) => Ok(()),
                other => Err(format!(
                    "only queries can be paginated, found: {}",
                    first_words(&other.to_string())
                )),
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not parse statement, paginating as text");
            Ok(())
        }
    }
}

fn first_words(sql: &str) -> String {
    sql.split_whitespace().take(3).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_query() {
        assert!(check_query(Product::SqlServer, "select * from orders").is_ok());
        assert!(check_query(Product::PostgreSQL, "delete from orders").is_err());
        assert!(check_query(Product::Generic, "select 1; select 2").is_err());
    }

    #[test]
    fn test_unparsable_statement_is_passed_through() {
        assert!(check_query(Product::Generic, "selec * frm orders").is_ok());
    }

    #[test]
    fn test_render_literal_uses_recommended_type() {
        let dialect = Product::SqlServer.dialect().unwrap();
        let literal = render_literal(&dialect, TypeCode::Varchar, "it's", None)
            .unwrap()
            .unwrap();
        assert_eq!(literal, "'it''s'");

        let literal = render_literal(&dialect, TypeCode::Boolean, "true", None)
            .unwrap()
            .unwrap();
        assert_eq!(literal, "1");
    }

    #[test]
    fn test_render_literal_bad_input() {
        let dialect = Product::Generic.dialect().unwrap();
        assert!(render_literal(&dialect, TypeCode::Integer, "ten", None).is_err());
    }
}
