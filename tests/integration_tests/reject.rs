// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::collections::HashSet;

use crate::integration_tests::common::{cdr_lines, send_imsi, spawn_server};

#[tokio::test]
async fn blacklisted_imsi_is_rejected_and_never_reaches_the_session_table() {
    let mut blacklist = HashSet::new();
    blacklist.insert("333333333333333".to_string());
    let config = spawn_server(19011, 18011, 30, 10, blacklist).await;

    let reply = send_imsi(config.udp_port, "333333333333333").await;
    assert_eq!(reply, "rejected");

    let lines = cdr_lines(&config);
    assert!(
        lines
            .iter()
            .any(|l| l.contains("333333333333333") && l.contains("rejected")),
        "expected a rejected CDR line, got: {lines:?}"
    );
    assert!(
        !lines.iter().any(|l| l.contains("created")),
        "blacklisted IMSI must never be admitted, got: {lines:?}"
    );

    let status = reqwest::get(format!(
        "http://127.0.0.1:{}/check_subscriber?imsi=333333333333333",
        config.http_port
    ))
    .await
    .expect("http request should succeed");
    assert_eq!(status.status(), 200);
    assert_eq!(status.text().await.expect("body"), "not active");
}
