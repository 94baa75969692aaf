use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "yfs",
    about = "Drive the yfs filesystem client over an in-memory extent store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with client settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Execute a command script against a fresh store
    Run(RunArgs),
    /// Read commands from standard input
    Shell(ShellArgs),
}

#[derive(Args)]
pub struct RunArgs {
    pub script: PathBuf,
    /// Keep going after a failed command
    #[arg(short, long)]
    pub keep_going: bool,
}

#[derive(Args)]
pub struct ShellArgs {}
