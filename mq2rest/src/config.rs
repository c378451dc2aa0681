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

//! Configuration records and their conversion into routing state.
//!
//! The records mirror the route entries of a bridge configuration file. They
//! carry no file format of their own: any `serde` deserializer will do.

use crate::control_plane::correlation_table::{CorrelationEntry, CorrelationTable};
use crate::control_plane::route_registry::RouteRegistry;
use crate::error::ConfigError;
use crate::route::{Method, Route};
use crate::translation::{ShapeKind, Template, TemplateSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// A REST → broker route entry.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PublishRecord {
    #[serde(default)]
    pub rest_endpoint: String,
    #[serde(default)]
    pub rest_method: Option<String>,
    #[serde(default)]
    pub mqtt_topic: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Template for the payload emitted on the broker.
    #[serde(default)]
    pub body: Option<Value>,
    /// Static body sent with every polling request.
    #[serde(default)]
    pub payload: Option<Value>,
    /// Seconds between polling cycles.
    #[serde(default)]
    pub polling_interval: Option<f64>,
    #[serde(default)]
    pub shape: Option<ShapeKind>,
    #[serde(default)]
    pub rest_value_field: Option<String>,
    #[serde(default)]
    pub broker_value_field: Option<String>,
    #[serde(default)]
    pub readings_field: Option<String>,
}

/// A broker → REST route entry.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SubscribeRecord {
    #[serde(default)]
    pub mqtt_topic: String,
    #[serde(default)]
    pub rest_endpoint: String,
    #[serde(default)]
    pub rest_method: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Template for the REST request body.
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub shape: Option<ShapeKind>,
    #[serde(default)]
    pub rest_value_field: Option<String>,
    #[serde(default)]
    pub broker_value_field: Option<String>,
    #[serde(default)]
    pub readings_field: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CorrelationRecord {
    pub message_id: String,
    pub command: String,
}

/// Every route-related record of a configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RouteRecords {
    #[serde(default)]
    pub publish: Vec<PublishRecord>,
    #[serde(default)]
    pub subscribe: Vec<SubscribeRecord>,
    #[serde(default)]
    pub correlation: Vec<CorrelationRecord>,
}

impl RouteRecords {
    /// Validates every record and assembles the routing state.
    ///
    /// Stops at the first defect; a partially built registry is never returned.
    pub fn build(&self) -> Result<(RouteRegistry, CorrelationTable), ConfigError> {
        let mut registry = RouteRegistry::new();
        for record in &self.publish {
            registry.register(record.to_route()?)?;
        }
        for record in &self.subscribe {
            registry.register(record.to_route()?)?;
        }

        let correlations = CorrelationTable::from_entries(
            self.correlation
                .iter()
                .map(|record| CorrelationEntry::new(&record.message_id, &record.command)),
        )?;

        Ok((registry, correlations))
    }
}

impl PublishRecord {
    pub fn to_route(&self) -> Result<Route, ConfigError> {
        let template = build_template(
            &self.mqtt_topic,
            TemplateSpec {
                shape: self.shape,
                body: self.body.clone(),
                rest_value_field: self.rest_value_field.clone(),
                broker_value_field: self.broker_value_field.clone(),
                readings_field: self.readings_field.clone(),
            },
        )?;
        let mut route = Route::publish(&self.mqtt_topic, &self.rest_endpoint, template)
            .with_method(parse_method(self.rest_method.as_deref())?)
            .with_headers(self.headers.clone());

        if let Some(seconds) = self.polling_interval {
            let interval = Duration::try_from_secs_f64(seconds).map_err(|_| {
                ConfigError::InvalidInterval {
                    topic: self.mqtt_topic.clone(),
                }
            })?;
            route = route.with_interval(interval);
        }
        if let Some(payload) = &self.payload {
            route = route.with_request_body(payload.clone());
        }
        Ok(route)
    }
}

impl SubscribeRecord {
    pub fn to_route(&self) -> Result<Route, ConfigError> {
        let template = build_template(
            &self.mqtt_topic,
            TemplateSpec {
                shape: self.shape,
                body: self.body.clone(),
                rest_value_field: self.rest_value_field.clone(),
                broker_value_field: self.broker_value_field.clone(),
                readings_field: self.readings_field.clone(),
            },
        )?;
        Ok(
            Route::subscribe(&self.mqtt_topic, &self.rest_endpoint, template)
                .with_method(parse_method(self.rest_method.as_deref())?)
                .with_headers(self.headers.clone()),
        )
    }
}

fn parse_method(method: Option<&str>) -> Result<Method, ConfigError> {
    method.map_or(Ok(Method::default()), str::parse)
}

fn build_template(topic: &str, spec: TemplateSpec) -> Result<Template, ConfigError> {
    Template::from_spec(spec).map_err(|err| match err {
        ConfigError::UnrecognizedShape(reason) => {
            ConfigError::UnrecognizedShape(format!("topic '{topic}': {reason}"))
        }
        other => other,
    })
}
