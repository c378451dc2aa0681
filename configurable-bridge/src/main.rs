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

mod config;
mod mqtt_broker;
mod rest_client;

use crate::config::Config;
use crate::mqtt_broker::MqttBroker;
use crate::rest_client::HttpRestClient;
use clap::Parser;
use mq2rest::observability::events;
use mq2rest::{Bridge, Broker, RestClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command()]
struct BridgeArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    info!("Started configurable-bridge");

    let args = BridgeArgs::parse();
    let config = Config::load(&args.config)?;

    // Route errors abort startup before any connection is made.
    let bridge = Bridge::from_records(&config.bridge.name, &config.route_records())?;

    let rest: Arc<dyn RestClient> = Arc::new(HttpRestClient::new(&config.rest)?);
    let (inbound_tx, inbound_rx) = mpsc::channel(config.bridge.inbound_queue_size.max(1));
    let (mqtt, event_loop) = MqttBroker::connect(&config.mqtt, inbound_tx);

    // Give the first publish cycles a connected broker to emit on.
    let connect_timeout = Duration::from_secs(config.mqtt.connect_timeout_secs);
    if !mqtt.wait_connected(connect_timeout).await {
        warn!(
            event = events::BROKER_CONNECT_TIMEOUT,
            timeout_secs = config.mqtt.connect_timeout_secs,
            "MQTT broker not connected yet; starting bridge anyway"
        );
    }
    let broker: Arc<dyn Broker> = Arc::new(mqtt);

    let handle = bridge.start(broker, rest, inbound_rx).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutting down configurable-bridge");

    event_loop.abort();
    handle.shutdown().await;

    Ok(())
}
