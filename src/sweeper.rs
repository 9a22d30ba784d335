// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Periodic TTL expiry. Runs once per second until shutdown, removing any
//! session whose age exceeds `session_timeout_sec` and emitting a `timeout`
//! CDR line for each.

use std::{sync::Arc, time::Duration};

use tokio::time::Instant;
use tracing::info;

use crate::{cdr::CdrReason, context::ServerContext};

const SWEEP_PERIOD: Duration = Duration::from_secs(1);

pub async fn run(ctx: Arc<ServerContext>) {
    let ttl = Duration::from_secs(ctx.config.session_timeout_sec);
    let mut interval = tokio::time::interval(SWEEP_PERIOD);

    loop {
        tokio::select! {
            biased;
            () = ctx.shutdown.cancelled() => break,
            _ = interval.tick() => {
                let expired = ctx.sessions.expire_due(Instant::now(), ttl).await;
                for imsi in expired {
                    info!("Сессия для IMSI {imsi} удалена по тайм-ауту");
                    ctx.cdr.emit(&imsi, CdrReason::Timeout).await;
                }
            }
        }
    }
}
