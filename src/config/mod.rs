#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "model-comparison")]
#[command(about = "Decode, check and re-encode model comparison records")]
pub struct CliConfig {
    /// JSON file to read, or `-` for stdin
    #[arg(long, short, default_value = "-")]
    pub input: String,

    #[arg(long, value_enum, default_value_t = cli::RecordKind::Params)]
    pub kind: cli::RecordKind,

    /// TOML file with a [validation] table
    #[arg(long, short)]
    pub config: Option<String>,

    #[arg(long, help = "Skip reference validation")]
    pub no_validate: bool,

    #[arg(long, help = "Pretty-print the output")]
    pub pretty: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Write logs as JSON lines")]
    pub log_json: bool,
}
