use crate::commands;
use camino::Utf8PathBuf;

/// CLI Options
#[derive(Debug, argh::FromArgs)]
#[argh(description = "Tic-Tac-Toe against a minimax agent")]
pub struct CliOptions {
    #[argh(
        option,
        description = "the path to the config",
        default = "Utf8PathBuf::from(\"./config.toml\")"
    )]
    pub config: Utf8PathBuf,

    #[argh(subcommand)]
    pub subcommand: SubCommand,
}

#[derive(Debug, Clone, Copy, argh::FromArgs)]
#[argh(subcommand)]
pub enum SubCommand {
    Play(commands::play::Options),
    Simulate(commands::simulate::Options),
}
