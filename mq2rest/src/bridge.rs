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

use crate::capability::{Broker, InboundMessage, RestClient};
use crate::config::RouteRecords;
use crate::control_plane::correlation_table::CorrelationTable;
use crate::control_plane::route_registry::RouteRegistry;
use crate::data_plane::publish_worker::PublishScheduler;
use crate::data_plane::subscribe_dispatcher::SubscribeDispatcher;
use crate::error::{BridgeError, ConfigError};
use crate::observability::events;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const COMPONENT: &str = "bridge";

///
/// [`Bridge`] ties the routing state to a broker and a REST capability.
///
/// The registry and correlation table are frozen when the bridge is built;
/// [`Bridge::start`] hands out shared read-only views to every worker.
#[derive(Clone)]
pub struct Bridge {
    name: String,
    registry: Arc<RouteRegistry>,
    correlations: Arc<CorrelationTable>,
}

impl Bridge {
    pub fn new(name: &str, registry: RouteRegistry, correlations: CorrelationTable) -> Self {
        Self {
            name: name.to_string(),
            registry: Arc::new(registry),
            correlations: Arc::new(correlations),
        }
    }

    /// Validates configuration records and builds a bridge from them.
    pub fn from_records(name: &str, records: &RouteRecords) -> Result<Self, ConfigError> {
        let (registry, correlations) = records.build()?;
        Ok(Self::new(name, registry, correlations))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    pub fn correlations(&self) -> &CorrelationTable {
        &self.correlations
    }

    /// Dispatcher over this bridge's routing state, for callers that drive
    /// delivery themselves instead of through [`Bridge::start`].
    pub fn dispatcher(&self, rest: Arc<dyn RestClient>) -> SubscribeDispatcher {
        SubscribeDispatcher::new(self.registry.clone(), self.correlations.clone(), rest)
    }

    /// Subscribes every subscribe topic, then starts the publish workers and
    /// the subscribe dispatcher.
    ///
    /// A failed subscription aborts startup before any task is spawned.
    /// `inbound` is the receiving half of the channel the broker adapter
    /// delivers messages into.
    pub async fn start(
        &self,
        broker: Arc<dyn Broker>,
        rest: Arc<dyn RestClient>,
        inbound: Receiver<InboundMessage>,
    ) -> Result<BridgeHandle, BridgeError> {
        for topic in self.registry.subscribe_topics() {
            if let Err(err) = broker.subscribe(topic).await {
                warn!(
                    event = events::BROKER_SUBSCRIBE_FAILED,
                    component = COMPONENT,
                    bridge = self.name.as_str(),
                    topic,
                    err = %err,
                    "unable to subscribe topic"
                );
                return Err(err.into());
            }
            info!(
                event = events::BROKER_SUBSCRIBE_OK,
                component = COMPONENT,
                bridge = self.name.as_str(),
                topic,
                "subscribed topic"
            );
        }

        let scheduler = PublishScheduler::start(&self.registry, rest.clone(), broker);
        let dispatcher = tokio::spawn(self.dispatcher(rest).run(inbound));

        info!(
            event = events::BRIDGE_START,
            component = COMPONENT,
            bridge = self.name.as_str(),
            publish_routes = scheduler.worker_count(),
            subscribe_routes = self.registry.subscribe_topics().count(),
            correlations = self.correlations.len(),
            "bridge started"
        );

        Ok(BridgeHandle {
            name: self.name.clone(),
            scheduler,
            dispatcher,
        })
    }
}

/// Running bridge. Dropping it stops the publish workers; the dispatcher stops
/// once the inbound channel closes.
pub struct BridgeHandle {
    name: String,
    scheduler: PublishScheduler,
    dispatcher: JoinHandle<()>,
}

impl BridgeHandle {
    pub fn publish_workers(&self) -> &PublishScheduler {
        &self.scheduler
    }

    /// Stops every publish worker and the dispatcher.
    pub async fn shutdown(self) {
        self.scheduler.shutdown().await;
        self.dispatcher.abort();
        let _ = self.dispatcher.await;

        info!(
            event = events::BRIDGE_SHUTDOWN,
            component = COMPONENT,
            bridge = self.name.as_str(),
            "bridge stopped"
        );
    }
}
