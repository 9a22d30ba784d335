// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::collections::HashSet;

use crate::integration_tests::common::{cdr_lines, send_imsi, spawn_server};

#[tokio::test]
async fn admitting_a_new_imsi_replies_created_and_writes_a_cdr_line() {
    let config = spawn_server(19001, 18001, 30, 10, HashSet::new()).await;

    let reply = send_imsi(config.udp_port, "111111111111111").await;
    assert_eq!(reply, "created");

    let lines = cdr_lines(&config);
    assert!(
        lines
            .iter()
            .any(|l| l.contains("111111111111111") && l.contains("created")),
        "expected a created CDR line, got: {lines:?}"
    );
}

#[tokio::test]
async fn admitting_the_same_imsi_twice_only_emits_created_once() {
    let config = spawn_server(19002, 18002, 30, 10, HashSet::new()).await;

    let first = send_imsi(config.udp_port, "222222222222222").await;
    let second = send_imsi(config.udp_port, "222222222222222").await;
    assert_eq!(first, "created");
    assert_eq!(second, "created");

    let lines = cdr_lines(&config);
    let created_count = lines
        .iter()
        .filter(|l| l.contains("222222222222222") && l.contains("created"))
        .count();
    assert_eq!(created_count, 1, "expected exactly one created CDR line, got: {lines:?}");
}
