// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

use crate::cfg::config::LogLevel;

/// Initializes the global `tracing` subscriber to write compact, non-ANSI
/// lines to `log_file` at `level` and above.
///
/// Returns the `WorkerGuard` for the non-blocking file writer; the caller
/// must keep it alive for the lifetime of the process (dropping it flushes
/// and stops the background writer thread).
pub fn init_logger(log_file: &str, level: LogLevel) -> Result<WorkerGuard> {
    let path = PathBuf::from(log_file);
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let file_name = path.file_name().context("log_file has no file name")?;

    let appender = match dir {
        Some(dir) => tracing_appender::rolling::never(dir, file_name),
        None => tracing_appender::rolling::never(Path::new("."), file_name),
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_new(level.as_tracing_level().to_string())
        .or_else(|_| EnvFilter::try_from_default_env())
        .context("failed to build log filter from configured log_level")?;

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let subscriber = Registry::default().with(env_filter).with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install global tracing subscriber")?;

    Ok(guard)
}
