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

use crate::error::ConfigError;
use crate::translation::Template;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Token in a subscribe endpoint that is replaced by the correlated command.
pub const COMMAND_PLACEHOLDER: &str = "<CMD>";

/// Polling interval used when a publish record does not set one.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(60);

/// Which way a [`Route`] moves data.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    /// REST → broker: poll an endpoint and republish.
    Publish,
    /// Broker → REST: relay inbound messages.
    Subscribe,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Publish => write!(f, "publish"),
            Direction::Subscribe => write!(f, "subscribe"),
        }
    }
}

/// REST methods the bridge can issue.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(ConfigError::InvalidMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Method {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}

///
/// [`Route`] binds one broker topic to one REST endpoint in one [`Direction`].
///
/// Routes are built once at startup and never mutated afterwards; the
/// [`RouteRegistry`][crate::RouteRegistry] validates them on registration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use mq2rest::{Method, Route, Template};
/// use serde_json::json;
///
/// let template = Template::scalar(json!({ "Value": "<VALUE>" })).unwrap();
/// let route = Route::publish("api/users", "users", template)
///     .with_method(Method::Get)
///     .with_interval(Duration::from_secs(10));
///
/// assert_eq!(route.topic(), "api/users");
/// assert_eq!(route.interval(), Some(Duration::from_secs(10)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub(crate) direction: Direction,
    pub(crate) topic: String,
    pub(crate) endpoint: String,
    pub(crate) method: Method,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) template: Template,
    pub(crate) interval: Option<Duration>,
    pub(crate) request_body: Option<Value>,
}

impl Route {
    /// Creates a REST → broker route polled every [`DEFAULT_POLLING_INTERVAL`].
    pub fn publish(topic: &str, endpoint: &str, template: Template) -> Self {
        Self::new(Direction::Publish, topic, endpoint, template)
    }

    /// Creates a broker → REST route.
    pub fn subscribe(topic: &str, endpoint: &str, template: Template) -> Self {
        Self::new(Direction::Subscribe, topic, endpoint, template)
    }

    fn new(direction: Direction, topic: &str, endpoint: &str, template: Template) -> Self {
        Self {
            direction,
            topic: topic.to_string(),
            endpoint: endpoint.to_string(),
            method: Method::default(),
            headers: BTreeMap::new(),
            template,
            interval: match direction {
                Direction::Publish => Some(DEFAULT_POLLING_INTERVAL),
                Direction::Subscribe => None,
            },
            request_body: None,
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the polling interval. Ignored for subscribe routes.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        if self.direction == Direction::Publish {
            self.interval = Some(interval);
        }
        self
    }

    /// Sets a static body sent with every polling request. Ignored for subscribe routes.
    pub fn with_request_body(mut self, body: Value) -> Self {
        if self.direction == Direction::Publish {
            self.request_body = Some(body);
        }
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn request_body(&self) -> Option<&Value> {
        self.request_body.as_ref()
    }

    /// Whether the endpoint needs a correlated command before dispatch.
    pub fn requires_command(&self) -> bool {
        self.endpoint.contains(COMMAND_PLACEHOLDER)
    }

    /// Returns the endpoint with every [`COMMAND_PLACEHOLDER`] replaced by `command`.
    pub fn endpoint_for_command(&self, command: &str) -> String {
        self.endpoint.replace(COMMAND_PLACEHOLDER, command)
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Method, Route, DEFAULT_POLLING_INTERVAL};
    use crate::translation::Template;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("get".parse::<Method>(), Ok(Method::Get));
        assert_eq!(" Put ".parse::<Method>(), Ok(Method::Put));
        assert_eq!("DELETE".parse::<Method>(), Ok(Method::Delete));
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn method_deserializes_from_lowercase_string() {
        let method: Method = serde_json::from_value(json!("post")).expect("method should parse");
        assert_eq!(method, Method::Post);
    }

    #[test]
    fn publish_route_defaults_to_get_and_sixty_seconds() {
        let route = Route::publish("api/users", "users", Template::passthrough());

        assert_eq!(route.direction(), Direction::Publish);
        assert_eq!(route.method(), Method::Get);
        assert_eq!(route.interval(), Some(DEFAULT_POLLING_INTERVAL));
    }

    #[test]
    fn subscribe_route_ignores_interval_and_request_body() {
        let route = Route::subscribe("cmd/set", "devices", Template::passthrough())
            .with_interval(Duration::from_secs(5))
            .with_request_body(json!({ "ignored": true }));

        assert_eq!(route.interval(), None);
        assert_eq!(route.request_body(), None);
    }

    #[test]
    fn endpoint_for_command_substitutes_placeholder() {
        let route = Route::subscribe("cmd/set", "devices/<CMD>/value", Template::passthrough());

        assert!(route.requires_command());
        assert_eq!(route.endpoint_for_command("gain"), "devices/gain/value");
    }
}
