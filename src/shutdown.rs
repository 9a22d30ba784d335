// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Graceful-drain protocol, run as its own task once the shutdown signal
//! fires. Kept out of the HTTP `/stop` handler on purpose (see
//! `SPEC_FULL.md` §9): the handler only flips the cancellation token and
//! returns its response immediately, so `/stop` never blocks on the drain.

use std::{sync::Arc, time::Duration};

use tokio::time::Instant;
use tracing::info;

use crate::{cdr::CdrReason, context::ServerContext};

/// Hard wall-clock cap on the whole drain; any residual sessions past this
/// point are discarded without a further CDR line.
const DRAIN_CAP: Duration = Duration::from_secs(30);
const DRAIN_TICK: Duration = Duration::from_secs(1);

/// Waits for the shutdown signal, then rate-limits the removal of every
/// outstanding session, emitting one `shutdown` CDR per removed IMSI, until
/// either the table is empty or the 30s cap is reached.
pub async fn run(ctx: Arc<ServerContext>) {
    ctx.shutdown.cancelled().await;
    drain(&ctx).await;
}

async fn drain(ctx: &ServerContext) {
    let start = Instant::now();
    let rate = ctx.config.graceful_shutdown_rate as usize;

    while ctx.sessions.size().await > 0 && start.elapsed() < DRAIN_CAP {
        let batch = ctx.sessions.drain_batch(rate).await;
        for imsi in &batch {
            info!("Сессия для IMSI {imsi} удалена при завершении");
            ctx.cdr.emit(imsi, CdrReason::Shutdown).await;
        }
        tokio::time::sleep(DRAIN_TICK).await;
    }

    // Discard any residual without emitting further CDR lines, per the
    // hard cap invariant.
    ctx.sessions.clear().await;
    info!("Завершение работы: сессии очищены");
}
