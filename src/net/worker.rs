// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use tokio::{net::UdpSocket, sync::Mutex};
use tracing::{error, info, warn};

use crate::{
    bcd::decode_bcd,
    cdr::CdrReason,
    context::ServerContext,
    net::Packet,
    session::CreateOutcome,
};

/// One worker's share of the fixed pool. Pops packets off the shared queue
/// until it is closed and drained (i.e. the ingress listener has stopped
/// and no packet remains), which is exactly the `queue_nonempty ∨ shutdown`
/// wake predicate: `recv()` resolves immediately while items remain and
/// only returns `None` once the channel is both closed and empty.
pub async fn run(
    rx: Arc<Mutex<tokio::sync::mpsc::Receiver<Packet>>>,
    socket: Arc<UdpSocket>,
    ctx: Arc<ServerContext>,
) {
    loop {
        let packet = { rx.lock().await.recv().await };
        let Some(packet) = packet else {
            break;
        };
        handle_packet(packet, &socket, &ctx).await;
    }
}

async fn handle_packet(packet: Packet, socket: &UdpSocket, ctx: &ServerContext) {
    let imsi = decode_bcd(&packet.payload);
    info!("Получен IMSI: {imsi} от {}", packet.source);

    let blacklisted = ctx.denylist.contains(&imsi);
    let response: &'static str = if blacklisted {
        warn!("IMSI {imsi} в черном списке");
        ctx.cdr.emit(&imsi, CdrReason::Rejected).await;
        "rejected"
    } else {
        if ctx.sessions.try_create(&imsi).await == CreateOutcome::Created {
            info!("Сессия создана для IMSI: {imsi}");
            ctx.cdr.emit(&imsi, CdrReason::Created).await;
        }
        "created"
    };

    if let Err(e) = socket.send_to(response.as_bytes(), packet.source).await {
        error!(error = %e, source = %packet.source, "failed to send reply datagram");
    }
}
