mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use coveralls_provider::config::loader::load_config;
use coveralls_provider::observability::{apply_logging_level, init_tracing};
use coveralls_provider::{
    ConfigError, Diagnostic, PROVIDER_TYPE_NAME, PROVIDER_VERSION, Provider, ProviderConfig,
    ReconcileError,
};
use tokio_util::sync::CancellationToken;

use cli::{Cli, Commands};
use output::{print_diagnostic, print_error};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound) {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    init_tracing();

    if let Err(e) = run(Cli::parse()).await {
        std::process::exit(report(&e));
    }
}

/// Print a failure and pick the exit status for it.
fn report(err: &anyhow::Error) -> i32 {
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        print_diagnostic(&Diagnostic::from(config_err));
        2
    } else if let Some(reconcile_err) = err.downcast_ref::<ReconcileError>() {
        print_diagnostic(&Diagnostic::from(reconcile_err));
        1
    } else {
        print_error(&format!("{err:#}"));
        1
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    apply_logging_level(&config.logging.level);

    let provider = Provider::configure(&config)?;
    tracing::debug!(
        provider = PROVIDER_TYPE_NAME,
        version = PROVIDER_VERSION,
        endpoint = %config.endpoint(),
        "Provider ready"
    );
    let format = cli.format.unwrap_or_default();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted; cancelling in-flight request");
            on_interrupt.cancel();
        }
    });

    let resource = provider.repository_resource();
    match &cli.command {
        Commands::Create(args) => {
            commands::repository::create(&resource, &args.file, format, &cancel).await?;
        }
        Commands::Read(args) => {
            commands::repository::read(&resource, &args.id, format, &cancel).await?;
        }
        Commands::Update(args) => {
            commands::repository::update(&resource, &args.id, &args.file, format, &cancel).await?;
        }
        Commands::Delete(args) => {
            commands::repository::delete(&resource, &args.id);
        }
        Commands::Import(args) => {
            commands::repository::import(&resource, &args.id, format, &cancel).await?;
        }
        Commands::Lookup(args) => {
            let data_source = provider.repository_data_source();
            commands::lookup::lookup(&data_source, &args.service, &args.name, format, &cancel)
                .await?;
        }
    }

    Ok(())
}

/// Config file and `COVERALLS__*` variables first, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<ProviderConfig, ConfigError> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(token) = &cli.token {
        config.token = Some(token.clone());
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;

    tracing::debug!(config = ?config, "Configuration resolved");
    Ok(config)
}
