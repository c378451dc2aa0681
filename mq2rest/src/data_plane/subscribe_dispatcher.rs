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

//! Subscribe dispatcher: relays inbound broker messages to REST endpoints.

use crate::capability::{InboundMessage, RestClient, RestRequest};
use crate::control_plane::correlation_table::CorrelationTable;
use crate::control_plane::route_registry::RouteRegistry;
use crate::error::{BridgeError, RoutingError};
use crate::observability::{events, fields};
use crate::route::{Direction, Method};
use crate::translation::translate;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info, warn, Level};

const COMPONENT: &str = "subscribe_dispatcher";

/// Where a relayed message ended up.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DispatchOutcome {
    pub endpoint: String,
    pub method: Method,
    pub status: u16,
    pub response: Vec<u8>,
}

/// Per-message relay from broker to REST.
///
/// Holds only shared read-only state, so [`SubscribeDispatcher::dispatch`] may
/// run concurrently from any number of tasks.
#[derive(Clone)]
pub struct SubscribeDispatcher {
    registry: Arc<RouteRegistry>,
    correlations: Arc<CorrelationTable>,
    rest: Arc<dyn RestClient>,
}

impl SubscribeDispatcher {
    pub fn new(
        registry: Arc<RouteRegistry>,
        correlations: Arc<CorrelationTable>,
        rest: Arc<dyn RestClient>,
    ) -> Self {
        Self {
            registry,
            correlations,
            rest,
        }
    }

    /// Resolves, translates and relays one message.
    ///
    /// Unknown topics, unresolved correlations and translation failures return
    /// before the REST capability is touched.
    pub async fn dispatch(&self, message: &InboundMessage) -> Result<DispatchOutcome, BridgeError> {
        let route = self
            .registry
            .lookup_subscribe(&message.topic)
            .ok_or_else(|| RoutingError::UnknownTopic(message.topic.clone()))?;

        let endpoint = if route.requires_command() {
            let message_id = message.metadata.message_id();
            let command = message_id
                .and_then(|id| self.correlations.resolve(id))
                .ok_or_else(|| RoutingError::UnresolvedCorrelation {
                    topic: message.topic.clone(),
                    message_id: message_id.map(str::to_string),
                })?;
            route.endpoint_for_command(command)
        } else {
            route.endpoint.clone()
        };

        let body = translate(&message.payload, &route.template, Direction::Subscribe)?;

        let response = self
            .rest
            .invoke(RestRequest {
                endpoint: endpoint.clone(),
                method: route.method,
                headers: route.headers.clone(),
                body: Some(body),
            })
            .await?;

        Ok(DispatchOutcome {
            endpoint,
            method: route.method,
            status: response.status,
            response: response.body,
        })
    }

    /// Dispatches one message and logs its fate; errors never escape.
    pub async fn handle(&self, message: InboundMessage) -> Option<DispatchOutcome> {
        let topic = message.topic.as_str();
        let message_id = fields::format_optional(message.metadata.message_id());

        if tracing::enabled!(Level::DEBUG) {
            debug!(
                event = events::SUBSCRIBE_RECEIVE,
                component = COMPONENT,
                topic,
                message_id,
                payload = fields::payload_preview(&message.payload).as_str(),
                "received broker message"
            );
        }

        match self.dispatch(&message).await {
            Ok(outcome) => {
                info!(
                    event = events::SUBSCRIBE_INVOKE_OK,
                    component = COMPONENT,
                    topic,
                    endpoint = outcome.endpoint.as_str(),
                    method = outcome.method.as_str(),
                    status = outcome.status,
                    response = fields::payload_preview(&outcome.response).as_str(),
                    "relayed message to REST endpoint"
                );
                Some(outcome)
            }
            Err(BridgeError::Routing(err @ RoutingError::UnknownTopic(_))) => {
                warn!(
                    event = events::SUBSCRIBE_DROP_UNKNOWN_TOPIC,
                    component = COMPONENT,
                    topic,
                    err = %err,
                    "dropping message for unknown topic"
                );
                None
            }
            Err(BridgeError::Routing(err)) => {
                warn!(
                    event = events::SUBSCRIBE_DROP_UNRESOLVED_CORRELATION,
                    component = COMPONENT,
                    topic,
                    message_id,
                    err = %err,
                    "dropping message without a correlated command"
                );
                None
            }
            Err(BridgeError::Translation(err)) => {
                warn!(
                    event = events::SUBSCRIBE_DROP_TRANSLATE_FAILED,
                    component = COMPONENT,
                    topic,
                    message_id,
                    err = %err,
                    "dropping message that failed translation"
                );
                None
            }
            Err(err) => {
                warn!(
                    event = events::SUBSCRIBE_INVOKE_FAILED,
                    component = COMPONENT,
                    topic,
                    message_id,
                    err = %err,
                    "REST invocation failed"
                );
                None
            }
        }
    }

    /// Consumes inbound messages in delivery order until the channel closes.
    pub async fn run(self, mut inbound: Receiver<InboundMessage>) {
        while let Some(message) = inbound.recv().await {
            self.handle(message).await;
        }

        info!(
            event = events::SUBSCRIBE_CHANNEL_CLOSED,
            component = COMPONENT,
            reason = fields::REASON_CHANNEL_CLOSED,
            "inbound channel closed; stopping dispatcher"
        );
    }
}
