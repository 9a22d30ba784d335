// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The process-wide server context.
//!
//! Per the design notes: the session table, ingress queue, shutdown signal
//! and CDR writer are all process-wide, but rather than module-level
//! singletons they are bundled into one value constructed at startup and
//! handed to every task (`Arc<ServerContext>`), mirroring how the teacher
//! threads `Arc<Config>` / `Arc<Pool>` through its tasks.

use std::{collections::HashSet, sync::Arc};

use tokio_util::sync::CancellationToken;

use crate::{cdr::CdrWriter, cfg::config::Config, session::SessionTable};

pub struct ServerContext {
    pub config: Config,
    pub sessions: Arc<SessionTable>,
    pub cdr: Arc<CdrWriter>,
    pub denylist: Arc<HashSet<String>>,
    /// The sole cancellation signal. Set once by the HTTP `/stop` handler;
    /// every other task polls it at its natural suspension point.
    pub shutdown: CancellationToken,
}

impl ServerContext {
    pub fn new(config: Config) -> Self {
        let denylist = Arc::new(config.blacklist.clone());
        let cdr = Arc::new(CdrWriter::new(config.cdr_file.clone()));
        Self {
            config,
            sessions: Arc::new(SessionTable::new()),
            cdr,
            denylist,
            shutdown: CancellationToken::new(),
        }
    }
}
