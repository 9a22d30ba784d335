// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use pgw_emulator::{
    cfg::{cli::resolve_config_path, config::Config, logger::init_logger},
    server,
};
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        },
    }
}

async fn run() -> Result<()> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "pgw-server".to_string());
    let config_path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => bail!("Usage: {program} <config-path>"),
    };

    let resolved = resolve_config_path(&config_path)
        .with_context(|| format!("cannot resolve config path {config_path}"))?;
    let config = Config::load_from_file(&resolved).context("invalid server configuration")?;

    let _logger_guard = init_logger(&config.log_file, config.log_level)?;
    info!("Сервер запущен");

    server::run(config).await
}
