// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! In-memory session table: IMSI → session record.
//!
//! All operations serialize on a single lock and are O(1) except
//! [`SessionTable::expire_due`] and [`SessionTable::drain_batch`], which scan
//! the table. Critical sections never perform I/O — callers emit CDR lines
//! and socket replies using the IMSIs returned by these methods, after the
//! lock has been released.

use std::{collections::HashMap, time::Duration};

use tokio::{sync::Mutex, time::Instant};

/// A single admitted subscriber session.
#[derive(Debug, Clone)]
pub struct Session {
    pub start_time: Instant,
    pub active: bool,
}

impl Session {
    fn new(now: Instant) -> Self {
        Self {
            start_time: now,
            active: true,
        }
    }
}

/// Outcome of [`SessionTable::try_create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// No entry existed for the IMSI; one was inserted.
    Created,
    /// An entry already existed; `start_time` was left untouched.
    AlreadyPresent,
}

/// Concurrency-safe IMSI → [`Session`] mapping.
#[derive(Debug, Default)]
pub struct SessionTable {
    inner: Mutex<HashMap<String, Session>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Inserts a new session for `imsi` if one is not already present.
    /// Idempotent: an existing entry's `start_time` is never reset.
    pub async fn try_create(&self, imsi: &str) -> CreateOutcome {
        let mut table = self.inner.lock().await;
        if table.contains_key(imsi) {
            CreateOutcome::AlreadyPresent
        } else {
            table.insert(imsi.to_string(), Session::new(Instant::now()));
            CreateOutcome::Created
        }
    }

    /// True iff an entry for `imsi` is present.
    pub async fn is_active(&self, imsi: &str) -> bool {
        self.inner.lock().await.contains_key(imsi)
    }

    /// Removes and returns every IMSI whose session has exceeded `ttl`,
    /// measured against `now`. The caller is responsible for emitting a
    /// `timeout` CDR for each returned IMSI.
    pub async fn expire_due(&self, now: Instant, ttl: Duration) -> Vec<String> {
        let mut table = self.inner.lock().await;
        let expired: Vec<String> = table
            .iter()
            .filter(|(_, sess)| now.saturating_duration_since(sess.start_time) > ttl)
            .map(|(imsi, _)| imsi.clone())
            .collect();
        for imsi in &expired {
            table.remove(imsi);
        }
        expired
    }

    /// Removes up to `n` arbitrary entries and returns their IMSIs. Used only
    /// during the graceful-shutdown drain.
    pub async fn drain_batch(&self, n: usize) -> Vec<String> {
        let mut table = self.inner.lock().await;
        let batch: Vec<String> = table.keys().take(n).cloned().collect();
        for imsi in &batch {
            table.remove(imsi);
        }
        batch
    }

    /// Current number of live sessions.
    pub async fn size(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Unconditionally empties the table. Used to force-discard any
    /// residuals once the shutdown drain's wall-clock cap is hit.
    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }
}
