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

//! MQTT v5 broker capability on top of `rumqttc`.

use crate::config::MqttConfig;
use async_trait::async_trait;
use mq2rest::observability::events;
use mq2rest::{Broker, InboundMessage, MessageMetadata, TransportError};
use rumqttc::v5::mqttbytes::v5::{Packet, Publish};
use rumqttc::v5::mqttbytes::QoS;
use rumqttc::v5::{AsyncClient, Event, EventLoop, MqttOptions};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const COMPONENT: &str = "mqtt_broker";
const CLIENT_REQUEST_CAPACITY: usize = 64;
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct MqttBroker {
    client: AsyncClient,
    connected: Arc<watch::Sender<bool>>,
    topics: Arc<Mutex<Vec<String>>>,
}

impl MqttBroker {
    /// Creates the client and spawns the task driving its event loop.
    ///
    /// Inbound publishes are forwarded to `inbound` in arrival order. The task
    /// reconnects on connection loss and restores every subscription.
    pub fn connect(config: &MqttConfig, inbound: Sender<InboundMessage>) -> (Self, JoinHandle<()>) {
        let (broker, event_loop) = Self::new(config);
        let handle = tokio::spawn(drive_event_loop(event_loop, broker.clone(), inbound));
        (broker, handle)
    }

    fn new(config: &MqttConfig) -> (Self, EventLoop) {
        let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
        if let Some(username) = &config.username {
            options.set_credentials(username, config.password.as_deref().unwrap_or_default());
        }

        let (client, event_loop) = AsyncClient::new(options, CLIENT_REQUEST_CAPACITY);
        let broker = Self {
            client,
            connected: Arc::new(watch::channel(false).0),
            topics: Arc::new(Mutex::new(Vec::new())),
        };
        (broker, event_loop)
    }

    /// Waits up to `timeout` for the broker to acknowledge the connection.
    pub async fn wait_connected(&self, timeout: Duration) -> bool {
        let mut connected = self.connected.subscribe();
        let up = match tokio::time::timeout(timeout, connected.wait_for(|up| *up)).await {
            Ok(result) => result.is_ok(),
            Err(_) => false,
        };
        up
    }

    fn on_connected(&self, reconnect: bool) {
        self.connected.send_replace(true);
        info!(
            event = events::BROKER_CONNECT_OK,
            component = COMPONENT,
            reconnect,
            "connected to MQTT broker"
        );
        if !reconnect {
            return;
        }

        let topics = match self.topics.lock() {
            Ok(topics) => topics.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        for topic in topics {
            match self.client.try_subscribe(topic.as_str(), QoS::AtLeastOnce) {
                Ok(()) => debug!(
                    event = events::BROKER_RESUBSCRIBE,
                    component = COMPONENT,
                    topic = topic.as_str(),
                    "restored subscription"
                ),
                Err(e) => warn!(
                    event = events::BROKER_RESUBSCRIBE,
                    component = COMPONENT,
                    topic = topic.as_str(),
                    err = %e,
                    "unable to restore subscription"
                ),
            }
        }
    }
}

fn to_inbound(publish: Publish) -> InboundMessage {
    let user_properties = publish
        .properties
        .map(|properties| properties.user_properties)
        .unwrap_or_default();
    inbound_message(&publish.topic, &publish.payload, user_properties)
}

/// Queues `message` for the dispatcher without stalling the event loop.
///
/// A full queue drops the message so polling and keep-alives carry on.
/// Returns `false` once the dispatcher side has gone away.
fn forward(inbound: &Sender<InboundMessage>, message: InboundMessage) -> bool {
    match inbound.try_send(message) {
        Ok(()) => true,
        Err(TrySendError::Full(message)) => {
            warn!(
                event = events::BROKER_INBOUND_DROPPED,
                component = COMPONENT,
                topic = message.topic.as_str(),
                "inbound queue full; dropping message"
            );
            true
        }
        Err(TrySendError::Closed(_)) => {
            info!(
                event = events::BROKER_INBOUND_CLOSED,
                component = COMPONENT,
                "inbound channel closed; stopping MQTT event loop"
            );
            false
        }
    }
}

fn inbound_message(
    topic: &[u8],
    payload: &[u8],
    user_properties: Vec<(String, String)>,
) -> InboundMessage {
    InboundMessage::new(
        &String::from_utf8_lossy(topic),
        payload.to_vec(),
        MessageMetadata { user_properties },
    )
}

async fn drive_event_loop(
    mut event_loop: EventLoop,
    broker: MqttBroker,
    inbound: Sender<InboundMessage>,
) {
    let mut connected_once = false;

    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                broker.on_connected(connected_once);
                connected_once = true;
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                if !forward(&inbound, to_inbound(publish)) {
                    return;
                }
            }
            Ok(_) => {}
            Err(e) => {
                if broker.connected.send_replace(false) || !connected_once {
                    warn!(
                        event = events::BROKER_CONNECTION_LOST,
                        component = COMPONENT,
                        err = %e,
                        "MQTT connection error; retrying"
                    );
                }
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

#[async_trait]
impl Broker for MqttBroker {
    async fn subscribe(&self, topic: &str) -> Result<(), TransportError> {
        self.client
            .subscribe(topic, QoS::AtLeastOnce)
            .await
            .map_err(|e| TransportError::Broker {
                topic: topic.to_string(),
                detail: e.to_string(),
            })?;

        match self.topics.lock() {
            Ok(mut topics) => topics.push(topic.to_string()),
            Err(poisoned) => poisoned.into_inner().push(topic.to_string()),
        }
        Ok(())
    }

    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), TransportError> {
        self.client
            .publish(topic, QoS::AtLeastOnce, false, payload)
            .await
            .map_err(|e| TransportError::Broker {
                topic: topic.to_string(),
                detail: e.to_string(),
            })
    }

    fn is_connected(&self) -> bool {
        *self.connected.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::{forward, inbound_message, MqttBroker};
    use crate::config::MqttConfig;
    use mq2rest::Broker;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn local_config() -> MqttConfig {
        MqttConfig {
            host: "localhost".to_string(),
            port: 1883,
            client_id: "mq2rest-test".to_string(),
            username: None,
            password: None,
            keep_alive_secs: 60,
            connect_timeout_secs: 10,
        }
    }

    #[test]
    fn inbound_message_carries_user_properties() {
        let message = inbound_message(
            b"cmd/set",
            br#"{"value": "10"}"#,
            vec![("MessageId".to_string(), "GainCommand".to_string())],
        );

        assert_eq!(message.topic, "cmd/set");
        assert_eq!(message.payload, br#"{"value": "10"}"#.to_vec());
        assert_eq!(message.metadata.message_id(), Some("GainCommand"));
    }

    #[test]
    fn non_utf8_topic_is_decoded_lossily() {
        let message = inbound_message(b"cmd/\xffset", b"{}", Vec::new());

        assert_eq!(message.topic, "cmd/\u{fffd}set");
        assert_eq!(message.metadata.message_id(), None);
    }

    #[test]
    fn full_queue_drops_without_stopping() {
        let (tx, mut rx) = mpsc::channel(1);

        assert!(forward(&tx, inbound_message(b"cmd/a", b"{}", Vec::new())));
        assert!(forward(&tx, inbound_message(b"cmd/b", b"{}", Vec::new())));

        assert_eq!(rx.try_recv().expect("first message").topic, "cmd/a");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_queue_stops_forwarding() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        assert!(!forward(&tx, inbound_message(b"cmd/a", b"{}", Vec::new())));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_connected_times_out_before_connack() {
        let (broker, _event_loop) = MqttBroker::new(&local_config());

        assert!(!broker.wait_connected(Duration::from_secs(5)).await);
        assert!(!broker.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_connected_returns_once_acknowledged() {
        let (broker, _event_loop) = MqttBroker::new(&local_config());
        let waiter = broker.clone();
        let wait = tokio::spawn(async move { waiter.wait_connected(Duration::from_secs(5)).await });

        broker.on_connected(false);

        assert!(wait.await.expect("wait task"));
        assert!(broker.is_connected());
    }
}
