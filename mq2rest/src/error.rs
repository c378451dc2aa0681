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

//! Error taxonomy shared by every bridge layer.
//!
//! Only [`ConfigError`] is fatal, and only at startup. Everything else is
//! terminal for a single message or polling cycle and is surfaced through
//! `tracing` events by the caller.

use crate::route::Direction;
use thiserror::Error;

/// Configuration defects that must prevent startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{direction} route for endpoint '{endpoint}' has no topic")]
    MissingTopic {
        direction: Direction,
        endpoint: String,
    },
    #[error("{direction} route on topic '{topic}' has no endpoint")]
    MissingEndpoint { direction: Direction, topic: String },
    #[error("{direction} topic '{topic}' is configured more than once")]
    DuplicateTopic { direction: Direction, topic: String },
    #[error("template does not match a known shape: {0}")]
    UnrecognizedShape(String),
    #[error("unsupported REST method '{0}'")]
    InvalidMethod(String),
    #[error("polling interval for topic '{topic}' must be greater than zero")]
    InvalidInterval { topic: String },
    #[error("invalid correlation entry '{message_id}': {reason}")]
    InvalidCorrelation { message_id: String, reason: String },
}

/// Failures of a single translation attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error("source is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("source does not match the template shape: expected {expected}, found {found}")]
    UnrecognizedShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("source is missing field '{0}'")]
    MissingField(String),
}

impl From<serde_json::Error> for TranslationError {
    fn from(err: serde_json::Error) -> Self {
        TranslationError::InvalidJson(err.to_string())
    }
}

/// Routing misses on the subscribe path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("no subscribe route for topic '{0}'")]
    UnknownTopic(String),
    #[error("message id {message_id:?} on topic '{topic}' does not resolve to a command")]
    UnresolvedCorrelation {
        topic: String,
        message_id: Option<String>,
    },
}

/// Failures reported by the broker or REST capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request to '{endpoint}' failed: {detail}")]
    Connect { endpoint: String, detail: String },
    #[error("HTTP {status} from '{endpoint}'")]
    Status { endpoint: String, status: u16 },
    #[error("broker operation on '{topic}' failed: {detail}")]
    Broker { topic: String, detail: String },
    #[error("broker is not connected")]
    Disconnected,
}

/// Any failure of one unit of bridge work.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Routing(#[from] RoutingError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
