use anyhow::Context;
use camino::Utf8Path;
use tracing_appender::non_blocking::{
    NonBlocking,
    WorkerGuard,
};
use tracing_subscriber::{
    filter::{
        EnvFilter,
        LevelFilter,
    },
    layer::SubscriberExt,
};

const LOG_FILE_NAME: &str = "ttt.log";

/// Open the log file in `log_dir`, creating the dir if needed.
///
/// Lines are appended by a background worker until the guard is dropped.
fn open_log_file(log_dir: &Utf8Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log dir `{log_dir}`"))?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    Ok(tracing_appender::non_blocking(file_appender))
}

/// Log to stderr and to a file in `log_dir`.
///
/// The returned guard must be held until the app exits, or buffered lines may be lost.
pub fn setup(log_dir: &Utf8Path) -> anyhow::Result<WorkerGuard> {
    let (file_writer, guard) = open_log_file(log_dir)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let stderr_formatting_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let file_formatting_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer);

    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(file_formatting_layer)
        .with(stderr_formatting_layer);

    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")?;

    Ok(guard)
}
