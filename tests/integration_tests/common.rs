// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{collections::HashSet, fs, time::Duration};

use pgw_emulator::{
    bcd::encode_bcd,
    cfg::config::{Config, LogLevel},
    server,
};
use tempfile::NamedTempFile;
use tokio::{net::UdpSocket, time::timeout};

/// Builds a config with unique, caller-chosen ports and CDR/log files backed
/// by real tempfiles, spawns the full server pipeline on it, and waits
/// briefly for the sockets to come up.
pub async fn spawn_server(
    udp_port: u16,
    http_port: u16,
    session_timeout_sec: u64,
    graceful_shutdown_rate: u32,
    blacklist: HashSet<String>,
) -> Config {
    let cdr_file = NamedTempFile::new()
        .expect("create cdr tempfile")
        .path()
        .to_string_lossy()
        .into_owned();
    let log_file = NamedTempFile::new()
        .expect("create log tempfile")
        .path()
        .to_string_lossy()
        .into_owned();

    let config = Config {
        udp_ip: "127.0.0.1".to_string(),
        udp_port,
        session_timeout_sec,
        cdr_file,
        http_port,
        graceful_shutdown_rate,
        log_file,
        log_level: LogLevel::Info,
        blacklist,
    };

    let spawned = config.clone();
    tokio::spawn(async move {
        let _ = server::run(spawned).await;
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    config
}

pub fn cdr_lines(config: &Config) -> Vec<String> {
    fs::read_to_string(&config.cdr_file)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Sends a BCD-encoded IMSI to the server's UDP port and returns the ASCII
/// response payload.
pub async fn send_imsi(udp_port: u16, imsi: &str) -> String {
    let socket = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("client socket should bind");
    let payload = encode_bcd(imsi);
    socket
        .send_to(&payload, format!("127.0.0.1:{udp_port}"))
        .await
        .expect("send_to should succeed");

    let mut buf = [0u8; 64];
    let (n, _) = timeout(Duration::from_secs(2), socket.recv_from(&mut buf))
        .await
        .expect("server should reply within 2s")
        .expect("recv_from should succeed");
    String::from_utf8_lossy(&buf[..n]).to_string()
}
