/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod support;

use mq2rest::{
    Bridge, CorrelationRecord, InboundMessage, MessageMetadata, Method, RouteRecords,
    SubscribeRecord,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use support::{init_logging, RecordingBroker, ScriptedRest};
use tokio::sync::mpsc;

fn gain_bridge() -> Bridge {
    let records = RouteRecords {
        subscribe: vec![SubscribeRecord {
            mqtt_topic: "cmd/set".to_string(),
            rest_endpoint: "devices/<CMD>/value".to_string(),
            rest_method: Some("PUT".to_string()),
            body: Some(json!({ "Value": "<VALUE>" })),
            ..Default::default()
        }],
        correlation: vec![CorrelationRecord {
            message_id: "GainCommand".to_string(),
            command: "gain".to_string(),
        }],
        ..Default::default()
    };
    Bridge::from_records("subscribe-test", &records).expect("records should be valid")
}

#[tokio::test(start_paused = true)]
async fn correlated_message_reaches_command_endpoint() {
    init_logging();

    let rest = Arc::new(ScriptedRest::answering("{}"));
    let broker = Arc::new(RecordingBroker::new());
    let (tx, rx) = mpsc::channel(8);
    let handle = gain_bridge()
        .start(broker.clone(), rest.clone(), rx)
        .await
        .expect("bridge should start");
    assert_eq!(broker.subscribed(), vec!["cmd/set".to_string()]);

    tx.send(InboundMessage::new(
        "cmd/set",
        r#"{"value": "12.5"}"#,
        MessageMetadata::with_message_id("GainCommand"),
    ))
    .await
    .expect("dispatcher should be listening");
    tokio::time::sleep(Duration::from_secs(1)).await;

    let requests = rest.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].endpoint, "devices/gain/value");
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].body.as_deref(), Some(r#"{"Value":12.5}"#));

    handle.shutdown().await;
}

#[tokio::test]
async fn unresolved_message_id_makes_no_rest_call() {
    init_logging();

    let rest = Arc::new(ScriptedRest::answering("{}"));
    let (tx, rx) = mpsc::channel(8);

    tx.send(InboundMessage::new(
        "cmd/set",
        r#"{"value": "1"}"#,
        MessageMetadata::with_message_id("Unknown"),
    ))
    .await
    .expect("queue should accept message");
    tx.send(InboundMessage::new(
        "unknown/topic",
        r#"{"value": "1"}"#,
        MessageMetadata::with_message_id("GainCommand"),
    ))
    .await
    .expect("queue should accept message");
    drop(tx);

    gain_bridge().dispatcher(rest.clone()).run(rx).await;

    assert!(rest.requests().is_empty());
}

#[tokio::test]
async fn rest_failure_does_not_stop_later_messages() {
    init_logging();

    let rest = Arc::new(ScriptedRest::answering("{}").failing_once("devices/gain/value"));
    let (tx, rx) = mpsc::channel(8);

    for value in ["1", "2"] {
        tx.send(InboundMessage::new(
            "cmd/set",
            format!(r#"{{"value": "{value}"}}"#),
            MessageMetadata::with_message_id("GainCommand"),
        ))
        .await
        .expect("queue should accept message");
    }
    drop(tx);

    gain_bridge().dispatcher(rest.clone()).run(rx).await;

    let bodies: Vec<Option<String>> = rest
        .requests()
        .into_iter()
        .map(|request| request.body)
        .collect();
    assert_eq!(
        bodies,
        vec![
            Some(r#"{"Value":1}"#.to_string()),
            Some(r#"{"Value":2}"#.to_string()),
        ]
    );
}
