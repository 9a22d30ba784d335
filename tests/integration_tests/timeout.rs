// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{collections::HashSet, time::Duration};

use crate::integration_tests::common::{cdr_lines, send_imsi, spawn_server};

#[tokio::test]
async fn a_session_past_its_ttl_is_swept_and_reported_not_active() {
    let config = spawn_server(19021, 18021, 1, 10, HashSet::new()).await;

    let reply = send_imsi(config.udp_port, "444444444444444").await;
    assert_eq!(reply, "created");

    let active = reqwest::get(format!(
        "http://127.0.0.1:{}/check_subscriber?imsi=444444444444444",
        config.http_port
    ))
    .await
    .expect("http request should succeed")
    .text()
    .await
    .expect("body");
    assert_eq!(active, "active");

    tokio::time::sleep(Duration::from_millis(2500)).await;

    let after = reqwest::get(format!(
        "http://127.0.0.1:{}/check_subscriber?imsi=444444444444444",
        config.http_port
    ))
    .await
    .expect("http request should succeed")
    .text()
    .await
    .expect("body");
    assert_eq!(after, "not active");

    let lines = cdr_lines(&config);
    assert!(
        lines
            .iter()
            .any(|l| l.contains("444444444444444") && l.contains("timeout")),
        "expected a timeout CDR line, got: {lines:?}"
    );
}
