use clap::Parser;
use std::path::PathBuf;

/// Arguments for the health command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                   Check with built-in extension lists:\n    preflight health\n\n\
                   Override extension lists:\n    preflight health --require pdo,pdo_pgsql --optional redis\n\n\
                   Also check the database:\n    preflight health --db-host mysql --db-port 3306\n\n\
                   Docker HEALTHCHECK:\n    HEALTHCHECK CMD preflight health || exit 1")]
pub struct HealthArgs {
    /// Extensions that must be loaded (comma-separated or repeated; replaces the configured list)
    #[arg(
        long = "require",
        value_name = "EXT",
        value_delimiter = ',',
        env = "PREFLIGHT_REQUIRED_EXTENSIONS"
    )]
    pub required: Vec<String>,

    /// Extensions whose absence is only a warning (comma-separated or repeated)
    #[arg(
        long = "optional",
        value_name = "EXT",
        value_delimiter = ',',
        env = "PREFLIGHT_OPTIONAL_EXTENSIONS"
    )]
    pub optional: Vec<String>,

    /// PHP command-line binary used to probe the runtime
    #[arg(long, value_name = "PATH", env = "PHP_BINARY")]
    pub php_binary: Option<PathBuf>,

    /// Kill each php CLI invocation after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub php_timeout_ms: Option<u64>,

    /// Database host to check for TCP reachability
    #[arg(long, value_name = "HOST", env = "DB_HOST")]
    pub db_host: Option<String>,

    /// Database port
    #[arg(long, value_name = "PORT", env = "DB_PORT")]
    pub db_port: Option<u16>,

    /// Database connect timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub db_timeout_ms: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
