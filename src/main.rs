#![deny(
    unused_import_braces,
    unused_lifetimes,
    unreachable_pub,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_copy_implementations,
    deprecated_in_future,
    meta_variable_misuse,
    non_ascii_idents,
    rust_2018_compatibility,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style,
    clippy::all
)]
#![warn(variant_size_differences, let_underscore_drop)]

//! # ttt

pub mod cli_options;
pub mod commands;
pub mod config;
pub mod logger;
pub mod setup;
pub mod util;

use crate::{
    cli_options::{
        CliOptions,
        SubCommand,
    },
    setup::LoadedConfig,
};
use anyhow::Context;
use tracing::{
    info,
    warn,
};

fn main() -> anyhow::Result<()> {
    // This line MUST run first.
    // It is needed to exit early if the options are invalid,
    // and this will NOT run destructors if it does so.
    let cli_options: CliOptions = argh::from_env();

    let LoadedConfig { config, warnings } =
        setup::load_config(&cli_options.config).context("failed to load config")?;
    let worker_guard = logger::setup(config.log_dir()).context("failed to initialize logger")?;

    info!("loaded config from `{}`", cli_options.config);
    for warning in warnings {
        warn!("config: {warning}");
    }

    let ret = match cli_options.subcommand {
        SubCommand::Play(options) => commands::play::exec(&config, options),
        SubCommand::Simulate(options) => commands::simulate::exec(&config, options),
    };

    // Logging no longer reliable past this point
    drop(worker_guard);

    ret
}
