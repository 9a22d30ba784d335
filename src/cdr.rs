// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Append-only CDR (Call Detail Record) line writer.
//!
//! Grounded on `cfg::logger::perform_save_to_file`'s use of `tokio::fs` +
//! `AsyncWriteExt`, adapted here to append-and-flush a single line per call
//! instead of writing a whole file. A dedicated `Mutex` serializes writers so
//! concurrent `emit` calls interleave at line granularity only.

use std::fmt;

use tokio::{
    fs::OpenOptions,
    io::AsyncWriteExt,
    sync::Mutex,
};
use tracing::error;

/// The terminal or non-terminal reason recorded on a CDR line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CdrReason {
    Created,
    Rejected,
    Timeout,
    Shutdown,
}

impl fmt::Display for CdrReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CdrReason::Created => "created",
            CdrReason::Rejected => "rejected",
            CdrReason::Timeout => "timeout",
            CdrReason::Shutdown => "shutdown",
        })
    }
}

/// Append-only CDR writer. Open failures are logged and treated as
/// non-fatal: the server keeps serving traffic even if the CDR file became
/// unwritable after startup (e.g. the disk filled up or the file was
/// removed out from under the process).
pub struct CdrWriter {
    path: String,
    lock: Mutex<()>,
}

impl CdrWriter {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Appends exactly one complete, flushed line: `"<imsi>, <reason>\n"`.
    pub async fn emit(&self, imsi: &str, reason: CdrReason) {
        let _guard = self.lock.lock().await;
        let line = format!("{imsi}, {reason}\n");

        let file = OpenOptions::new().create(true).append(true).open(&self.path).await;
        let mut file = match file {
            Ok(f) => f,
            Err(e) => {
                error!(cdr_file = %self.path, error = %e, "failed to open CDR file");
                return;
            },
        };

        if let Err(e) = file.write_all(line.as_bytes()).await {
            error!(cdr_file = %self.path, error = %e, "failed to write CDR line");
            return;
        }
        if let Err(e) = file.flush().await {
            error!(cdr_file = %self.path, error = %e, "failed to flush CDR file");
        }
    }
}
