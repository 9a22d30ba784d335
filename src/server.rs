// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Top-level orchestration: builds the [`ServerContext`], binds the UDP and
//! HTTP listeners, spawns every task class, and joins them all on shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::UdpSocket, sync::{Mutex, mpsc}};
use tracing::info;

use crate::{
    cfg::config::Config,
    context::ServerContext,
    net::{self, Packet, WORKER_COUNT},
    shutdown, sweeper,
};

/// Bounded ingress queue capacity. Generous relative to `WORKER_COUNT` so a
/// short burst of datagrams does not back-pressure the listener under
/// normal load.
const QUEUE_CAPACITY: usize = 1024;

pub async fn run(config: Config) -> Result<()> {
    let bind_addr = format!("{}:{}", config.udp_ip, config.udp_port);
    let socket = UdpSocket::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind UDP socket on {bind_addr}"))?;
    let socket = Arc::new(socket);
    info!("UDP-сервер запущен на {bind_addr}...");

    let http_port = config.http_port;
    let ctx = Arc::new(ServerContext::new(config));

    let (tx, rx) = mpsc::channel::<Packet>(QUEUE_CAPACITY);
    let rx = Arc::new(Mutex::new(rx));

    let ingress_handle = tokio::spawn(net::ingress::run(
        socket.clone(),
        tx,
        ctx.shutdown.clone(),
    ));

    let worker_handles: Vec<_> = (0..WORKER_COUNT)
        .map(|_| tokio::spawn(net::worker::run(rx.clone(), socket.clone(), ctx.clone())))
        .collect();

    let sweeper_handle = tokio::spawn(sweeper::run(ctx.clone()));
    let drain_handle = tokio::spawn(shutdown::run(ctx.clone()));

    // Runs until the shutdown signal fires, then returns once in-flight
    // HTTP requests finish. This is the task that is "external" to the
    // pipeline but is what the spec's CLI/exit-code contract waits on: the
    // control plane is how `/stop` reaches the rest of the system.
    crate::http::run(ctx.clone(), http_port).await?;

    info!("Основной цикл завершён, ожидание завершения потоков");
    ingress_handle.await.context("ingress task panicked")?;
    for handle in worker_handles {
        handle.await.context("worker task panicked")?;
    }
    sweeper_handle.await.context("sweeper task panicked")?;
    drain_handle.await.context("shutdown drain task panicked")?;

    info!("Сервер завершил работу");
    Ok(())
}
