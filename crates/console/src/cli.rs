use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "scamguard-console",
    version,
    about = "ScamGuard scam-risk analysis console"
)]
pub(crate) struct Args {
    /// TOML config; built-in defaults apply when omitted.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Overrides `listen_addr` from the config file.
    #[arg(long)]
    pub(crate) listen_addr: Option<String>,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Analyse one input in-process and print the outcome.
    Check {
        #[arg(long, default_value = "")]
        text: String,
        /// Screenshot to attach; may be repeated.
        #[arg(long = "image")]
        images: Vec<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Poster,
}
