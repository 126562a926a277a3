use anyhow::Result;
use coveralls_provider::RepositoryDataSource;
use tokio_util::sync::CancellationToken;

use crate::cli::OutputFormat;
use crate::output::print_record;

pub async fn lookup(
    data_source: &RepositoryDataSource,
    service: &str,
    name: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let record = data_source.read(service, name, cancel).await?;
    print_record(&record, format)
}
