//! Route registry: the immutable topic → route table built at startup.

use crate::error::ConfigError;
use crate::observability::events;
use crate::route::{Direction, Route};
use std::collections::HashMap;
use tracing::debug;

const COMPONENT: &str = "route_registry";

/// Topic-indexed route storage for both directions.
///
/// Routes are registered while the bridge is being assembled; afterwards the
/// registry is shared behind an `Arc` and only read.
#[derive(Clone, Debug, Default)]
pub struct RouteRegistry {
    publish: Vec<Route>,
    publish_index: HashMap<String, usize>,
    subscribe: HashMap<String, Route>,
}

impl RouteRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores one route.
    pub fn register(&mut self, route: Route) -> Result<(), ConfigError> {
        let topic = route.topic.trim();
        if topic.is_empty() {
            return Err(ConfigError::MissingTopic {
                direction: route.direction,
                endpoint: route.endpoint.clone(),
            });
        }
        if route.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint {
                direction: route.direction,
                topic: route.topic.clone(),
            });
        }
        if route.interval.is_some_and(|interval| interval.is_zero()) {
            return Err(ConfigError::InvalidInterval {
                topic: route.topic.clone(),
            });
        }

        let duplicate = match route.direction {
            Direction::Publish => self.publish_index.contains_key(&route.topic),
            Direction::Subscribe => self.subscribe.contains_key(&route.topic),
        };
        if duplicate {
            return Err(ConfigError::DuplicateTopic {
                direction: route.direction,
                topic: route.topic.clone(),
            });
        }

        debug!(
            event = events::ROUTE_REGISTER_OK,
            component = COMPONENT,
            direction = %route.direction,
            topic = route.topic.as_str(),
            endpoint = route.endpoint.as_str(),
            method = route.method.as_str(),
            "registered route"
        );

        match route.direction {
            Direction::Publish => {
                self.publish_index
                    .insert(route.topic.clone(), self.publish.len());
                self.publish.push(route);
            }
            Direction::Subscribe => {
                self.subscribe.insert(route.topic.clone(), route);
            }
        }
        Ok(())
    }

    /// Resolves the subscribe route for an inbound topic.
    pub fn lookup_subscribe(&self, topic: &str) -> Option<&Route> {
        self.subscribe.get(topic)
    }

    /// Resolves the publish route for a topic.
    pub fn lookup_publish(&self, topic: &str) -> Option<&Route> {
        self.publish_index
            .get(topic)
            .and_then(|index| self.publish.get(*index))
    }

    /// Publish routes in registration order.
    pub fn all_publish_routes(&self) -> impl Iterator<Item = &Route> {
        self.publish.iter()
    }

    /// Topics the broker must be subscribed to.
    pub fn subscribe_topics(&self) -> impl Iterator<Item = &str> {
        self.subscribe.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.publish.len() + self.subscribe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
