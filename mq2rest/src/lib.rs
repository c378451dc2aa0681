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

//! # mq2rest
//!
//! `mq2rest` bridges an MQTT broker and a REST API in both directions:
//!
//! - **publish routes** poll a REST endpoint on a fixed interval, reshape the
//!   response with a template and publish it on a broker topic;
//! - **subscribe routes** take inbound broker messages, resolve a command from
//!   the message's `MessageId` user property where the endpoint needs one, and
//!   forward a reshaped body to the REST endpoint.
//!
//! The crate owns routing, correlation and translation only. Connections are
//! supplied by the caller through the [`Broker`] and [`RestClient`] traits, and
//! inbound broker messages are delivered over a `tokio::sync::mpsc` channel.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use mq2rest::{
//!     Bridge, Broker, PublishRecord, RestClient, RestRequest, RestResponse, RouteRecords,
//!     TransportError,
//! };
//! use serde_json::json;
//!
//! # struct NullBroker;
//! #
//! # #[async_trait]
//! # impl Broker for NullBroker {
//! #     async fn subscribe(&self, _topic: &str) -> Result<(), TransportError> { Ok(()) }
//! #     async fn publish(&self, _topic: &str, _payload: Vec<u8>) -> Result<(), TransportError> {
//! #         Ok(())
//! #     }
//! #     fn is_connected(&self) -> bool { true }
//! # }
//! #
//! # struct NullRest;
//! #
//! # #[async_trait]
//! # impl RestClient for NullRest {
//! #     async fn invoke(&self, _request: RestRequest) -> Result<RestResponse, TransportError> {
//! #         Ok(RestResponse { status: 200, body: br#"{"value": "7"}"#.to_vec() })
//! #     }
//! # }
//! #
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let records = RouteRecords {
//!     publish: vec![PublishRecord {
//!         rest_endpoint: "users".to_string(),
//!         mqtt_topic: "api/users".to_string(),
//!         polling_interval: Some(10.0),
//!         body: Some(json!({ "Value": "<VALUE>" })),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//! let bridge = Bridge::from_records("quick-start", &records).unwrap();
//!
//! let (_inbound_tx, inbound_rx) = tokio::sync::mpsc::channel(16);
//! let handle = bridge
//!     .start(Arc::new(NullBroker), Arc::new(NullRest), inbound_rx)
//!     .await
//!     .unwrap();
//! assert_eq!(handle.publish_workers().worker_count(), 1);
//! handle.shutdown().await;
//! # });
//! ```
//!
//! ## Layout
//!
//! - `control_plane`: [`RouteRegistry`] and [`CorrelationTable`], built once
//!   from [`RouteRecords`] and shared read-only afterwards.
//! - `translation`: [`Template`] and the pure [`translate`] function.
//! - `data_plane`: [`PublishScheduler`] workers and the
//!   [`SubscribeDispatcher`].
//! - [`observability`]: `tracing` event names and field helpers. The library
//!   never installs a subscriber.

mod bridge;
mod capability;
mod config;
mod control_plane;
mod data_plane;
mod error;
pub mod observability;
mod route;
mod translation;

pub use bridge::{Bridge, BridgeHandle};
pub use capability::{
    Broker, InboundMessage, MessageMetadata, RestClient, RestRequest, RestResponse,
    MESSAGE_ID_PROPERTY,
};
pub use config::{CorrelationRecord, PublishRecord, RouteRecords, SubscribeRecord};
pub use control_plane::correlation_table::{CorrelationEntry, CorrelationTable};
pub use control_plane::route_registry::RouteRegistry;
pub use data_plane::publish_worker::{run_cycle, CycleOutcome, PublishScheduler};
pub use data_plane::subscribe_dispatcher::{DispatchOutcome, SubscribeDispatcher};
pub use error::{BridgeError, ConfigError, RoutingError, TranslationError, TransportError};
pub use route::{Direction, Method, Route, COMMAND_PLACEHOLDER, DEFAULT_POLLING_INTERVAL};
pub use translation::{
    translate, ShapeKind, Source, Template, TemplateSpec, DEFAULT_READINGS_FIELD,
    DEFAULT_VALUE_FIELD, VALUE_PLACEHOLDER,
};
