use anyhow::Context;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

const LOG_FILE_PREFIX: &str = "console.log";

/// Where tracing output goes for one run of the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogSink<'a> {
    /// Human-readable lines on stderr only; used by one-shot commands.
    Stderr,
    /// Daily-rolling JSON files under `dir`, optionally mirrored to stderr.
    Rolling { dir: &'a Path, echo_stderr: bool },
}

impl<'a> LogSink<'a> {
    pub(crate) fn for_args(args: &'a Args) -> Self {
        match args.command {
            Some(Command::Check { .. }) => LogSink::Stderr,
            None => LogSink::Rolling {
                dir: &args.log_dir,
                echo_stderr: args.log_to_stderr,
            },
        }
    }
}

/// Installs the global subscriber. The returned guard flushes the file writer
/// on drop and must outlive the server.
pub(crate) fn init_tracing(sink: LogSink<'_>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match sink {
        LogSink::Stderr => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
        LogSink::Rolling { dir, echo_stderr } => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log dir {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .json();
            let stderr_layer = echo_stderr.then(|| {
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false)
            });
            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(stderr_layer)
                .try_init()?;
            Ok(Some(guard))
        }
    }
}
