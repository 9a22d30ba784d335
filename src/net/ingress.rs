// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{sync::Arc, time::Duration};

use tokio::{net::UdpSocket, sync::mpsc, time::timeout};
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::net::{MAX_PACKET_BYTES, Packet};

/// Receive timeout so the loop re-checks the shutdown signal between
/// datagrams even when nothing arrives.
const RECV_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the UDP socket. Reads one datagram at a time, enqueues it, and loops
/// until `shutdown` is cancelled. Never exits before the shutdown signal
/// fires; once it has, this stops enqueuing and returns, dropping its
/// `Sender` half so workers drain the remaining queue and exit cleanly.
pub async fn run(socket: Arc<UdpSocket>, tx: mpsc::Sender<Packet>, shutdown: CancellationToken) {
    let mut buf = [0u8; MAX_PACKET_BYTES];

    loop {
        tokio::select! {
            biased;
            () = shutdown.cancelled() => break,
            res = timeout(RECV_POLL_INTERVAL, socket.recv_from(&mut buf)) => {
                match res {
                    // Timed out waiting for a datagram: not an error, just
                    // recheck the shutdown flag on the next loop iteration.
                    Err(_elapsed) => continue,
                    Ok(Ok((n, source))) => {
                        let packet = Packet { payload: buf[..n].to_vec(), source };
                        if tx.send(packet).await.is_err() {
                            // No worker can receive anymore; nothing further to do.
                            break;
                        }
                    },
                    Ok(Err(e)) => {
                        error!(error = %e, "error receiving UDP datagram");
                    },
                }
            }
        }
    }
}
