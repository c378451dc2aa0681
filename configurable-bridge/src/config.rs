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

use mq2rest::{CorrelationRecord, PublishRecord, RouteRecords, SubscribeRecord};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub(crate) bridge: BridgeConfig,
    pub(crate) mqtt: MqttConfig,
    pub(crate) rest: RestConfig,
    #[serde(default)]
    pub(crate) publish: Vec<PublishRecord>,
    #[serde(default)]
    pub(crate) subscribe: Vec<SubscribeRecord>,
    #[serde(default)]
    pub(crate) correlation: Vec<CorrelationRecord>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    #[serde(default = "default_bridge_name")]
    pub(crate) name: String,
    #[serde(default = "default_inbound_queue_size")]
    pub(crate) inbound_queue_size: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            name: default_bridge_name(),
            inbound_queue_size: default_inbound_queue_size(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct MqttConfig {
    pub(crate) host: String,
    #[serde(default = "default_mqtt_port")]
    pub(crate) port: u16,
    #[serde(default = "default_client_id")]
    pub(crate) client_id: String,
    #[serde(default)]
    pub(crate) username: Option<String>,
    #[serde(default)]
    pub(crate) password: Option<String>,
    #[serde(default = "default_keep_alive_secs")]
    pub(crate) keep_alive_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub(crate) connect_timeout_secs: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RestConfig {
    pub(crate) base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub(crate) request_timeout_secs: u64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Unable to read config file {path}: {e}"))?;
        let config = json5::from_str(&contents)
            .map_err(|e| format!("Unable to parse config file {path}: {e}"))?;
        Ok(config)
    }

    pub fn route_records(&self) -> RouteRecords {
        RouteRecords {
            publish: self.publish.clone(),
            subscribe: self.subscribe.clone(),
            correlation: self.correlation.clone(),
        }
    }
}

fn default_bridge_name() -> String {
    "mq2rest".to_string()
}

fn default_inbound_queue_size() -> usize {
    64
}

fn default_mqtt_port() -> u16 {
    1883
}

fn default_client_id() -> String {
    "mq2rest".to_string()
}

fn default_keep_alive_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn sample_config_parses_with_defaults() {
        let config: Config = json5::from_str(include_str!("../config/bridge.json5"))
            .expect("sample config should parse");

        assert_eq!(config.bridge.name, "mq2rest");
        assert_eq!(config.mqtt.port, 1883);
        assert_eq!(config.rest.request_timeout_secs, 10);

        let (registry, correlations) = config
            .route_records()
            .build()
            .expect("sample routes should be valid");
        assert_eq!(registry.len(), 3);
        assert_eq!(correlations.resolve("GainCommand"), Some("gain"));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = json5::from_str(
            r#"{ mqtt: { host: "broker" }, rest: { base_url: "http://api" } }"#,
        )
        .expect("minimal config should parse");

        assert_eq!(config.bridge.inbound_queue_size, 64);
        assert_eq!(config.mqtt.client_id, "mq2rest");
        assert_eq!(config.mqtt.keep_alive_secs, 60);
        assert_eq!(config.mqtt.connect_timeout_secs, 10);
        assert!(config.route_records().build().is_ok());
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let parsed = json5::from_str::<Config>(
            r#"{ mqtt: { host: "broker" }, rest: { base_url: "http://api" }, zenoh: {} }"#,
        );

        assert!(parsed.is_err());
    }
}
