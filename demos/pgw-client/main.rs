// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Companion single-shot client demo: encodes an IMSI to BCD, sends it to
//! the server, and waits up to 5s for a reply. Mirrors
//! `examples/original_source/src/Client/pgw_client.cpp` — out of scope for
//! the core server per `SPEC_FULL.md` §1, kept here as a demo binary rather
//! than a tested library surface.

use std::{fs, net::Ipv4Addr, process::ExitCode, time::Duration};

use anyhow::{Context, Result, bail, ensure};
use pgw_emulator::{bcd::encode_bcd, cfg::config::LogLevel};
use serde::Deserialize;
use tokio::{net::UdpSocket, time::timeout};
use tracing::{error, info};

#[derive(Debug, Deserialize)]
struct ClientConfig {
    server_ip: String,
    server_port: u16,
    log_file: String,
    log_level: LogLevel,
}

impl ClientConfig {
    fn load(path: &str) -> Result<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("failed to read client config {path}"))?;
        let cfg: ClientConfig =
            serde_json::from_str(&s).context("failed to parse client config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.server_ip.parse::<Ipv4Addr>().is_ok(),
            "invalid server_ip: {}",
            self.server_ip
        );
        ensure!(self.server_port != 0, "server_port must be in 1..=65535");
        Ok(())
    }
}

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
    let program = args.next().unwrap_or_else(|| "pgw-client".to_string());
    let (config_path, imsi) = match (args.next(), args.next(), args.next()) {
        (Some(config_path), Some(imsi), None) => (config_path, imsi),
        _ => bail!("Usage: {program} <config.json> <IMSI>"),
    };

    let config = ClientConfig::load(&config_path)?;
    let _logger_guard = pgw_emulator::cfg::logger::init_logger(&config.log_file, config.log_level)?;
    info!("Клиент запущен с IMSI: {imsi}");

    let bcd_imsi = encode_bcd(&imsi);
    info!("IMSI закодирован в BCD, длина: {}", bcd_imsi.len());

    let socket = UdpSocket::bind("0.0.0.0:0")
        .await
        .context("ошибка создания сокета")?;
    let server_addr = format!("{}:{}", config.server_ip, config.server_port);

    info!("Отправка BCD-IMSI на {server_addr}");
    socket
        .send_to(&bcd_imsi, &server_addr)
        .await
        .context("ошибка отправки пакета")?;

    let mut buf = [0u8; 1024];
    match timeout(Duration::from_secs(5), socket.recv_from(&mut buf)).await {
        Ok(Ok((n, _))) => {
            let reply = String::from_utf8_lossy(&buf[..n]);
            info!("Получен ответ: {reply}");
            println!("Ответ от сервера: {reply}");
            Ok(())
        },
        Ok(Err(e)) => {
            error!(error = %e, "ошибка получения ответа");
            bail!("ошибка получения ответа: {e}")
        },
        Err(_elapsed) => {
            error!("таймаут получения ответа");
            bail!("таймаут получения ответа")
        },
    }
}
