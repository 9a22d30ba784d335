// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The UDP datagram pipeline: a single ingress listener feeding a fixed
//! worker pool through a bounded queue.

/// Single reader on the UDP socket; enqueues raw packets.
pub mod ingress;
/// Fixed consumer pool: decode, admission-check, session mutation, reply.
pub mod worker;

use std::net::SocketAddr;

/// One inbound datagram, captured with its source address so the worker
/// that eventually handles it knows where to send the reply.
#[derive(Debug, Clone)]
pub struct Packet {
    pub payload: Vec<u8>,
    pub source: SocketAddr,
}

/// Maximum UDP payload this server will read into a single buffer.
pub const MAX_PACKET_BYTES: usize = 1024;

/// Default worker pool size.
pub const WORKER_COUNT: usize = 4;
