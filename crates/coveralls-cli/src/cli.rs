use clap::{Parser, Subcommand, ValueEnum};
use coveralls_provider::PROVIDER_VERSION;

#[derive(Parser)]
#[command(name = "coveralls")]
#[command(about = "Manage Coveralls repositories as infrastructure")]
#[command(version = PROVIDER_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Coveralls base URL (overrides config and COVERALLS_ENDPOINT env var)
    #[arg(short, long, global = true, env = "COVERALLS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// API token (takes precedence over COVERALLS_API_TOKEN)
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Path to a TOML config file (defaults to ./coveralls.toml if present)
    #[arg(short, long, global = true, env = "COVERALLS_CONFIG")]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a repository from a desired record
    Create(CreateArgs),
    /// Refresh a managed repository by id
    Read(IdArgs),
    /// Apply settings to a managed repository
    Update(UpdateArgs),
    /// Drop a repository from state (Coveralls has no delete endpoint)
    Delete(IdArgs),
    /// Adopt an existing repository by id (e.g. github:org/app)
    Import(ImportArgs),
    /// Look up an existing repository by service and name
    Lookup(LookupArgs),
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Path to JSON plan (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct IdArgs {
    /// Repository id in the form service:name
    #[arg(long)]
    pub id: String,
}

#[derive(clap::Args)]
pub struct UpdateArgs {
    /// Repository id in the form service:name
    #[arg(long)]
    pub id: String,
    /// Path to JSON plan (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct ImportArgs {
    /// Repository id in the form service:name
    pub id: String,
}

#[derive(clap::Args)]
pub struct LookupArgs {
    /// Hosting service, e.g. github
    #[arg(long)]
    pub service: String,
    /// Repository name, e.g. org/app
    #[arg(long)]
    pub name: String,
}
