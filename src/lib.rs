// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Core library for the PGW control-plane emulator: the BCD wire codec, the
//! session table, the CDR writer, the UDP ingress/worker pipeline, the
//! timeout sweeper, the HTTP control plane, and the shutdown coordinator.
//! See `SPEC_FULL.md` for the full component contract.

/// Packed-BCD codec for the IMSI wire payload.
pub mod bcd;
/// Append-only CDR line writer.
pub mod cdr;
/// Configuration, CLI path resolution, and logging.
pub mod cfg;
/// The process-wide server context threaded through every task.
pub mod context;
/// HTTP control/inspection plane (`/check_subscriber`, `/stop`).
pub mod http;
/// UDP ingress listener and worker pool.
pub mod net;
/// Top-level task orchestration.
pub mod server;
/// Graceful-drain shutdown coordinator.
pub mod shutdown;
/// In-memory session table.
pub mod session;
/// Periodic TTL expiry sweeper.
pub mod sweeper;
