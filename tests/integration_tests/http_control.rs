// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::collections::HashSet;

use crate::integration_tests::common::{send_imsi, spawn_server};

#[tokio::test]
async fn check_subscriber_without_imsi_param_is_a_bad_request() {
    let config = spawn_server(19041, 18041, 30, 10, HashSet::new()).await;

    let resp = reqwest::get(format!(
        "http://127.0.0.1:{}/check_subscriber",
        config.http_port
    ))
    .await
    .expect("http request should succeed");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn check_subscriber_reflects_live_session_state_over_the_wire() {
    let config = spawn_server(19042, 18042, 30, 10, HashSet::new()).await;

    let before = reqwest::get(format!(
        "http://127.0.0.1:{}/check_subscriber?imsi=666666666666666",
        config.http_port
    ))
    .await
    .expect("http request should succeed")
    .text()
    .await
    .expect("body");
    assert_eq!(before, "not active");

    let reply = send_imsi(config.udp_port, "666666666666666").await;
    assert_eq!(reply, "created");

    let after = reqwest::get(format!(
        "http://127.0.0.1:{}/check_subscriber?imsi=666666666666666",
        config.http_port
    ))
    .await
    .expect("http request should succeed")
    .text()
    .await
    .expect("body");
    assert_eq!(after, "active");
}
