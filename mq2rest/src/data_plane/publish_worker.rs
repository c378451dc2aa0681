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

//! Publish workers: one polling loop per REST → broker route.

use crate::capability::{Broker, RestClient, RestRequest};
use crate::control_plane::route_registry::RouteRegistry;
use crate::error::{BridgeError, TransportError};
use crate::observability::{
    events,
    fields::{self, WorkerContext},
};
use crate::route::{Direction, Method, Route, DEFAULT_POLLING_INTERVAL};
use crate::translation::translate;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn, Level};
use uuid::Uuid;

const COMPONENT: &str = "publish_worker";

/// Result of one successful poll → translate → emit cycle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CycleOutcome {
    pub topic: String,
    pub payload: String,
}

/// Runs a single publish cycle for `route`: invoke the REST endpoint, translate
/// the response with the route's template, and emit it on the route's topic.
///
/// The route's request body is only sent with POST and PUT polls. The emit is
/// attempted once; a disconnected broker fails the cycle with
/// [`TransportError::Disconnected`] without publishing.
pub async fn run_cycle(
    route: &Route,
    rest: &dyn RestClient,
    broker: &dyn Broker,
) -> Result<CycleOutcome, BridgeError> {
    let request = RestRequest {
        endpoint: route.endpoint.clone(),
        method: route.method,
        headers: route.headers.clone(),
        body: match route.method {
            Method::Post | Method::Put => route.request_body.as_ref().map(|body| body.to_string()),
            Method::Get | Method::Delete => None,
        },
    };
    let response = rest.invoke(request).await?;

    let payload = translate(&response.body, &route.template, Direction::Publish)?;

    if !broker.is_connected() {
        return Err(TransportError::Disconnected.into());
    }
    broker
        .publish(&route.topic, payload.clone().into_bytes())
        .await?;

    Ok(CycleOutcome {
        topic: route.topic.clone(),
        payload,
    })
}

fn report_cycle(
    worker_context: &WorkerContext,
    route: &Route,
    result: &Result<CycleOutcome, BridgeError>,
) {
    let topic = route.topic.as_str();
    let endpoint = route.endpoint.as_str();

    match result {
        Ok(outcome) => {
            if tracing::enabled!(Level::INFO) {
                info!(
                    event = events::PUBLISH_EMIT_OK,
                    component = COMPONENT,
                    worker_id = worker_context.worker_id.as_str(),
                    topic,
                    payload = fields::payload_preview(outcome.payload.as_bytes()).as_str(),
                    "published polled document"
                );
            }
        }
        Err(BridgeError::Translation(err)) => {
            warn!(
                event = events::PUBLISH_TRANSLATE_FAILED,
                component = COMPONENT,
                worker_id = worker_context.worker_id.as_str(),
                topic,
                endpoint,
                err = %err,
                "unable to translate REST response"
            );
        }
        Err(BridgeError::Transport(TransportError::Disconnected)) => {
            warn!(
                event = events::PUBLISH_EMIT_FAILED,
                component = COMPONENT,
                worker_id = worker_context.worker_id.as_str(),
                topic,
                reason = fields::REASON_BROKER_DISCONNECTED,
                "broker not connected; skipping emit"
            );
        }
        Err(BridgeError::Transport(err @ TransportError::Broker { .. })) => {
            warn!(
                event = events::PUBLISH_EMIT_FAILED,
                component = COMPONENT,
                worker_id = worker_context.worker_id.as_str(),
                topic,
                err = %err,
                "unable to publish to broker"
            );
        }
        Err(err) => {
            warn!(
                event = events::PUBLISH_POLL_FAILED,
                component = COMPONENT,
                worker_id = worker_context.worker_id.as_str(),
                topic,
                endpoint,
                method = route.method.as_str(),
                err = %err,
                "REST poll failed"
            );
        }
    }
}

/// Polls forever: each cycle is followed by a full interval of sleep, so slow
/// REST responses stretch the effective period.
pub(crate) async fn publish_loop(
    worker_id: String,
    route: Arc<Route>,
    rest: Arc<dyn RestClient>,
    broker: Arc<dyn Broker>,
) {
    let worker_context = WorkerContext::with_current_thread(worker_id);
    let interval = route.interval.unwrap_or(DEFAULT_POLLING_INTERVAL);

    loop {
        debug!(
            event = events::PUBLISH_POLL_ATTEMPT,
            component = COMPONENT,
            worker_id = worker_context.worker_id.as_str(),
            worker_thread = worker_context.worker_thread.as_str(),
            topic = route.topic.as_str(),
            endpoint = route.endpoint.as_str(),
            "polling REST endpoint"
        );

        let result = run_cycle(&route, rest.as_ref(), broker.as_ref()).await;
        report_cycle(&worker_context, &route, &result);

        tokio::time::sleep(interval).await;
    }
}

/// Handle for one spawned publish loop.
pub(crate) struct PublishWorker {
    worker_id: String,
    topic: String,
    handle: JoinHandle<()>,
}

impl PublishWorker {
    fn spawn(route: Route, rest: Arc<dyn RestClient>, broker: Arc<dyn Broker>) -> Self {
        let worker_id = Uuid::new_v4().hyphenated().to_string();
        let topic = route.topic.clone();

        info!(
            event = events::PUBLISH_WORKER_START,
            component = COMPONENT,
            worker_id = worker_id.as_str(),
            topic = topic.as_str(),
            endpoint = route.endpoint.as_str(),
            method = route.method.as_str(),
            interval_ms = route.interval.unwrap_or(DEFAULT_POLLING_INTERVAL).as_millis() as u64,
            "starting publish worker"
        );

        let handle = tokio::spawn(publish_loop(
            worker_id.clone(),
            Arc::new(route),
            rest,
            broker,
        ));

        Self {
            worker_id,
            topic,
            handle,
        }
    }
}

/// [`PublishScheduler`] owns one independent tokio task per publish route.
///
/// Loops never wait on each other. Dropping the scheduler, or calling
/// [`PublishScheduler::shutdown`], aborts every loop; nothing in a cycle holds
/// shared mutable state, so abandoning one mid-flight is safe.
pub struct PublishScheduler {
    workers: Vec<PublishWorker>,
}

impl PublishScheduler {
    /// Spawns a worker for every publish route. Must be called within a tokio runtime.
    pub fn start(
        registry: &RouteRegistry,
        rest: Arc<dyn RestClient>,
        broker: Arc<dyn Broker>,
    ) -> Self {
        let workers = registry
            .all_publish_routes()
            .map(|route| PublishWorker::spawn(route.clone(), rest.clone(), broker.clone()))
            .collect();

        Self { workers }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// `(worker_id, topic)` for every running worker.
    pub fn workers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.workers
            .iter()
            .map(|worker| (worker.worker_id.as_str(), worker.topic.as_str()))
    }

    /// Aborts every publish loop and waits until they have stopped.
    pub async fn shutdown(mut self) {
        let workers = std::mem::take(&mut self.workers);
        for worker in &workers {
            worker.handle.abort();
            debug!(
                event = events::PUBLISH_WORKER_ABORT,
                component = COMPONENT,
                worker_id = worker.worker_id.as_str(),
                topic = worker.topic.as_str(),
                "aborting publish worker"
            );
        }
        futures::future::join_all(workers.into_iter().map(|worker| worker.handle)).await;
    }
}

impl Drop for PublishScheduler {
    fn drop(&mut self) {
        for worker in &self.workers {
            worker.handle.abort();
        }
    }
}
