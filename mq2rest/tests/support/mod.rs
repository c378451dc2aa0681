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

use async_trait::async_trait;
use mq2rest::{Broker, RestClient, RestRequest, RestResponse, TransportError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Broker double that records every subscription and publish.
pub(crate) struct RecordingBroker {
    connected: AtomicBool,
    failing_publishes: AtomicUsize,
    subscribed: Mutex<Vec<String>>,
    published: Mutex<Vec<(String, String)>>,
}

impl RecordingBroker {
    pub(crate) fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            failing_publishes: AtomicUsize::new(0),
            subscribed: Mutex::new(Vec::new()),
            published: Mutex::new(Vec::new()),
        }
    }

    /// Rejects the next publish with a broker error; later ones succeed.
    #[allow(dead_code)]
    pub(crate) fn failing_once(self) -> Self {
        self.failing_publishes.fetch_add(1, Ordering::SeqCst);
        self
    }

    #[allow(dead_code)]
    pub(crate) fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    #[allow(dead_code)]
    pub(crate) fn subscribed(&self) -> Vec<String> {
        self.subscribed.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub(crate) fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Broker for RecordingBroker {
    async fn subscribe(&self, topic: &str) -> Result<(), TransportError> {
        self.subscribed.lock().unwrap().push(topic.to_string());
        Ok(())
    }

    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), TransportError> {
        if self
            .failing_publishes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(TransportError::Broker {
                topic: topic.to_string(),
                detail: "publish rejected".to_string(),
            });
        }
        let payload = String::from_utf8(payload).expect("bridge publishes UTF-8 JSON");
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// REST double answering from a script, then with a fixed body forever.
pub(crate) struct ScriptedRest {
    script: Mutex<VecDeque<Result<RestResponse, TransportError>>>,
    fallback: &'static str,
    requests: Mutex<Vec<RestRequest>>,
}

impl ScriptedRest {
    pub(crate) fn answering(fallback: &'static str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues a connection failure ahead of the fallback answers.
    pub(crate) fn failing_once(self, endpoint: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Connect {
                endpoint: endpoint.to_string(),
                detail: "connection refused".to_string(),
            }));
        self
    }

    /// Queues a non-2xx answer ahead of the fallback answers.
    #[allow(dead_code)]
    pub(crate) fn rejecting_once(self, endpoint: &str, status: u16) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status,
            }));
        self
    }

    pub(crate) fn requests(&self) -> Vec<RestRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestClient for ScriptedRest {
    async fn invoke(&self, request: RestRequest) -> Result<RestResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(RestResponse {
                    status: 200,
                    body: self.fallback.as_bytes().to_vec(),
                })
            })
    }
}
