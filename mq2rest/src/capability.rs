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

//! Capability interfaces the bridge consumes.
//!
//! Concrete broker and HTTP clients live outside this crate. Both traits must
//! be safe to call concurrently since every publish worker shares them.

use crate::error::TransportError;
use crate::route::Method;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// MQTT v5 user property carrying the correlation id of an inbound message.
pub const MESSAGE_ID_PROPERTY: &str = "MessageId";

/// Protocol metadata attached to an inbound broker message.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MessageMetadata {
    pub user_properties: Vec<(String, String)>,
}

impl MessageMetadata {
    pub fn with_message_id(message_id: &str) -> Self {
        Self {
            user_properties: vec![(MESSAGE_ID_PROPERTY.to_string(), message_id.to_string())],
        }
    }

    /// First value of the named user property.
    pub fn user_property(&self, name: &str) -> Option<&str> {
        self.user_properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn message_id(&self) -> Option<&str> {
        self.user_property(MESSAGE_ID_PROPERTY)
    }
}

/// One message delivered by the broker to the subscribe dispatcher.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub metadata: MessageMetadata,
}

impl InboundMessage {
    pub fn new(topic: &str, payload: impl Into<Vec<u8>>, metadata: MessageMetadata) -> Self {
        Self {
            topic: topic.to_string(),
            payload: payload.into(),
            metadata,
        }
    }
}

/// A single REST invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RestRequest {
    /// Endpoint relative to the REST capability's base URL.
    pub endpoint: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded body, if any.
    pub body: Option<String>,
}

/// A successful (2xx) REST response.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RestResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Broker side of the bridge.
///
/// Inbound messages are not delivered through this trait: adapters push them
/// into the `mpsc` channel consumed by the subscribe dispatcher.
#[async_trait]
pub trait Broker: Send + Sync {
    async fn subscribe(&self, topic: &str) -> Result<(), TransportError>;

    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), TransportError>;

    fn is_connected(&self) -> bool;
}

/// REST side of the bridge. Non-2xx responses are reported as
/// [`TransportError::Status`].
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn invoke(&self, request: RestRequest) -> Result<RestResponse, TransportError>;
}
