// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{collections::HashSet, time::Duration};

use crate::integration_tests::common::{cdr_lines, send_imsi, spawn_server};

#[tokio::test]
async fn stop_drains_every_admitted_session_in_rate_limited_waves() {
    let config = spawn_server(19031, 18031, 300, 10, HashSet::new()).await;

    for i in 0..25u32 {
        let imsi = format!("5{i:014}");
        let reply = send_imsi(config.udp_port, &imsi).await;
        assert_eq!(reply, "created");
    }

    let resp = reqwest::get(format!("http://127.0.0.1:{}/stop", config.http_port))
        .await
        .expect("stop request should succeed");
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.expect("body"), "Shutting down...");

    tokio::time::sleep(Duration::from_millis(3200)).await;

    let lines = cdr_lines(&config);
    let shutdown_count = lines.iter().filter(|l| l.contains("shutdown")).count();
    assert_eq!(
        shutdown_count, 25,
        "expected all 25 sessions drained on shutdown, got: {lines:?}"
    );
}
