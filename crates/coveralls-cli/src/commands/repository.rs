use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use colored::Colorize;
use coveralls_core::ManagedResourceRecord;
use coveralls_provider::{Diagnostic, RESOURCE_TYPE_NAME, ReadOutcome, RepositoryResource};
use tokio_util::sync::CancellationToken;

use crate::cli::OutputFormat;
use crate::output::{print_diagnostic, print_record, print_success};

fn read_plan(file: &Option<String>) -> Result<ManagedResourceRecord> {
    let content = match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    parse_plan(&content)
}

fn parse_plan(content: &str) -> Result<ManagedResourceRecord> {
    serde_json::from_str(content).context("Invalid JSON plan")
}

pub async fn create(
    resource: &RepositoryResource,
    file: &Option<String>,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let plan = read_plan(file)?;
    let record = resource.create(&plan, cancel).await?;
    print_success(&format!("Created {RESOURCE_TYPE_NAME} {}", record_id(&record).cyan()));
    print_record(&record, format)
}

pub async fn read(
    resource: &RepositoryResource,
    id: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let state = ManagedResourceRecord::from_id(id);
    match resource.read(&state, cancel).await? {
        ReadOutcome::Found(record) => print_record(&record, format),
        ReadOutcome::Absent { id, message } => {
            print_diagnostic(&Diagnostic::warning(
                "Repository no longer exists",
                format!("{id} would be removed from state: {message}"),
            ));
            Ok(())
        }
    }
}

pub async fn update(
    resource: &RepositoryResource,
    id: &str,
    file: &Option<String>,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let plan = with_id(read_plan(file)?, id);
    let record = resource.update(&plan, cancel).await?;
    print_success(&format!("Updated {RESOURCE_TYPE_NAME} {}", record_id(&record).cyan()));
    print_record(&record, format)
}

pub fn delete(resource: &RepositoryResource, id: &str) {
    print_diagnostic(&resource.delete(&ManagedResourceRecord::from_id(id)));
}

pub async fn import(
    resource: &RepositoryResource,
    id: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let record = resource.import(id, cancel).await?;
    print_success(&format!("Imported {RESOURCE_TYPE_NAME} {}", record_id(&record).cyan()));
    print_record(&record, format)
}

/// The `--id` flag always wins over an `id` carried in the plan.
fn with_id(plan: ManagedResourceRecord, id: &str) -> ManagedResourceRecord {
    ManagedResourceRecord {
        id: Some(id.to_string()),
        ..plan
    }
}

fn record_id(record: &ManagedResourceRecord) -> &str {
    record.id.as_deref().unwrap_or("?")
}
