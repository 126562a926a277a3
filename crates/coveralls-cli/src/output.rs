use anyhow::Result;
use colored::Colorize;
use coveralls_core::ManagedResourceRecord;
use coveralls_provider::{Diagnostic, Severity};
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;

const MASK: &str = "********";

pub fn print_record(record: &ManagedResourceRecord, format: OutputFormat) -> Result<()> {
    println!("{}", render_record(record, format)?);
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Errors go to stderr, warnings to stdout next to the command's output.
pub fn print_diagnostic(diagnostic: &Diagnostic) {
    match diagnostic.severity {
        Severity::Error => {
            eprintln!("{} {}", "✗".red(), diagnostic.summary.red().bold());
            eprintln!("  {}", diagnostic.detail);
        }
        Severity::Warning => {
            println!("{} {}", "!".yellow(), diagnostic.summary.yellow().bold());
            println!("  {}", diagnostic.detail);
        }
    }
}

fn render_record(record: &ManagedResourceRecord, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(record)?,
        OutputFormat::Yaml => serde_yaml::to_string(record)?,
        OutputFormat::Table => render_table(&serde_json::to_value(record)?),
    })
}

fn render_table(value: &Value) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    if let Some(fields) = value.as_object() {
        for (key, field) in fields {
            let shown = match (key.as_str(), field) {
                ("token", Value::String(_)) => MASK.to_string(),
                (_, Value::Null) => "-".to_string(),
                (_, Value::String(s)) => s.clone(),
                (_, other) => other.to_string(),
            };
            builder.push_record([key.clone(), shown]);
        }
    }
    builder.build().with(Style::rounded()).to_string()
}
