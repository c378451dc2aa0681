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

//! Route templates and their shape classification.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Literal token in a template body replaced by the translated value.
pub const VALUE_PLACEHOLDER: &str = "<VALUE>";
pub const DEFAULT_VALUE_FIELD: &str = "value";
pub const DEFAULT_READINGS_FIELD: &str = "readings";

/// Template shapes a configuration record may declare.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Passthrough,
    Scalar,
    Readings,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TemplateShape {
    /// Source document is re-encoded unchanged.
    Passthrough,
    /// Flat scalar value on both sides.
    Scalar { body: Value },
    /// REST side carries an array of readings; the last one is current.
    Readings { readings_field: String, body: Value },
}

/// Declarative template description as found in configuration records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateSpec {
    pub shape: Option<ShapeKind>,
    pub body: Option<Value>,
    pub rest_value_field: Option<String>,
    pub broker_value_field: Option<String>,
    pub readings_field: Option<String>,
}

/// [`Template`] describes how a payload is reshaped between the broker and REST
/// domains. Its shape is decided once when the template is built, so a
/// template that matches no known shape is rejected before any message flows.
///
/// # Examples
///
/// ```
/// use mq2rest::{ShapeKind, Template, TemplateSpec};
/// use serde_json::json;
///
/// let scalar = Template::from_spec(TemplateSpec {
///     body: Some(json!({ "Value": "<VALUE>" })),
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(scalar.kind(), ShapeKind::Scalar);
///
/// // A body with nothing to substitute is not a recognized shape.
/// assert!(Template::scalar(json!({ "Value": 1 })).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub(crate) shape: TemplateShape,
    pub(crate) rest_value_field: String,
    pub(crate) broker_value_field: String,
}

impl Template {
    pub fn passthrough() -> Self {
        Self::with_shape(TemplateShape::Passthrough)
    }

    pub fn scalar(body: Value) -> Result<Self, ConfigError> {
        require_placeholder(&body)?;
        Ok(Self::with_shape(TemplateShape::Scalar { body }))
    }

    pub fn readings(readings_field: &str, body: Value) -> Result<Self, ConfigError> {
        if readings_field.trim().is_empty() {
            return Err(ConfigError::UnrecognizedShape(
                "readings template needs a readings field".to_string(),
            ));
        }
        require_placeholder(&body)?;
        Ok(Self::with_shape(TemplateShape::Readings {
            readings_field: readings_field.to_string(),
            body,
        }))
    }

    /// Builds a template from a record, inferring the shape when none is declared.
    ///
    /// Inference priority: a declared readings field, then a missing body
    /// (passthrough), then a body containing [`VALUE_PLACEHOLDER`].
    pub fn from_spec(spec: TemplateSpec) -> Result<Self, ConfigError> {
        let kind = match spec.shape {
            Some(kind) => kind,
            None => classify(&spec)?,
        };

        let template = match (kind, spec.body) {
            (ShapeKind::Passthrough, None) => Self::passthrough(),
            (ShapeKind::Passthrough, Some(_)) => {
                return Err(ConfigError::UnrecognizedShape(
                    "passthrough template cannot carry a body".to_string(),
                ))
            }
            (ShapeKind::Scalar | ShapeKind::Readings, None) => {
                return Err(ConfigError::UnrecognizedShape(format!(
                    "{kind:?} template needs a body"
                )))
            }
            (ShapeKind::Scalar, Some(body)) => Self::scalar(body)?,
            (ShapeKind::Readings, Some(body)) => Self::readings(
                spec.readings_field
                    .as_deref()
                    .unwrap_or(DEFAULT_READINGS_FIELD),
                body,
            )?,
        };

        let mut template = template;
        if let Some(field) = spec.rest_value_field {
            template = template.with_rest_value_field(&field);
        }
        if let Some(field) = spec.broker_value_field {
            template = template.with_broker_value_field(&field);
        }
        Ok(template)
    }

    /// Field holding the value in REST documents.
    pub fn with_rest_value_field(mut self, field: &str) -> Self {
        self.rest_value_field = field.to_string();
        self
    }

    /// Field holding the value in broker payloads.
    pub fn with_broker_value_field(mut self, field: &str) -> Self {
        self.broker_value_field = field.to_string();
        self
    }

    pub fn kind(&self) -> ShapeKind {
        match self.shape {
            TemplateShape::Passthrough => ShapeKind::Passthrough,
            TemplateShape::Scalar { .. } => ShapeKind::Scalar,
            TemplateShape::Readings { .. } => ShapeKind::Readings,
        }
    }

    pub fn rest_value_field(&self) -> &str {
        &self.rest_value_field
    }

    pub fn broker_value_field(&self) -> &str {
        &self.broker_value_field
    }

    /// Rendering body, if the shape has one.
    pub fn body(&self) -> Option<&Value> {
        match &self.shape {
            TemplateShape::Passthrough => None,
            TemplateShape::Scalar { body } | TemplateShape::Readings { body, .. } => Some(body),
        }
    }

    fn with_shape(shape: TemplateShape) -> Self {
        Self {
            shape,
            rest_value_field: DEFAULT_VALUE_FIELD.to_string(),
            broker_value_field: DEFAULT_VALUE_FIELD.to_string(),
        }
    }
}

fn classify(spec: &TemplateSpec) -> Result<ShapeKind, ConfigError> {
    if spec.readings_field.is_some() {
        return Ok(ShapeKind::Readings);
    }
    match &spec.body {
        None => Ok(ShapeKind::Passthrough),
        Some(body) if contains_placeholder(body) => Ok(ShapeKind::Scalar),
        Some(_) => Err(ConfigError::UnrecognizedShape(format!(
            "body has no {VALUE_PLACEHOLDER} placeholder and no shape is declared"
        ))),
    }
}

fn require_placeholder(body: &Value) -> Result<(), ConfigError> {
    if contains_placeholder(body) {
        Ok(())
    } else {
        Err(ConfigError::UnrecognizedShape(format!(
            "body has no {VALUE_PLACEHOLDER} placeholder"
        )))
    }
}

fn contains_placeholder(node: &Value) -> bool {
    match node {
        Value::String(text) => text.contains(VALUE_PLACEHOLDER),
        Value::Array(items) => items.iter().any(contains_placeholder),
        Value::Object(map) => map.values().any(contains_placeholder),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{ShapeKind, Template, TemplateSpec, DEFAULT_READINGS_FIELD};
    use crate::error::ConfigError;
    use serde_json::json;

    #[test]
    fn missing_body_classifies_as_passthrough() {
        let template = Template::from_spec(TemplateSpec::default()).expect("passthrough");
        assert_eq!(template.kind(), ShapeKind::Passthrough);
        assert_eq!(template.body(), None);
    }

    #[test]
    fn readings_field_takes_priority_over_body() {
        let template = Template::from_spec(TemplateSpec {
            body: Some(json!({ "Value": "<VALUE>" })),
            readings_field: Some("samples".to_string()),
            ..Default::default()
        })
        .expect("readings template");

        assert_eq!(template.kind(), ShapeKind::Readings);
    }

    #[test]
    fn nested_placeholder_classifies_as_scalar() {
        let template = Template::from_spec(TemplateSpec {
            body: Some(json!({ "data": [{ "id": 1, "value": "<VALUE>" }] })),
            ..Default::default()
        })
        .expect("scalar template");

        assert_eq!(template.kind(), ShapeKind::Scalar);
    }

    #[test]
    fn body_without_placeholder_is_unrecognized() {
        let err = Template::from_spec(TemplateSpec {
            body: Some(json!({ "Value": 10 })),
            ..Default::default()
        })
        .expect_err("no placeholder");

        assert!(matches!(err, ConfigError::UnrecognizedShape(_)));
    }

    #[test]
    fn declared_passthrough_with_body_is_rejected() {
        let err = Template::from_spec(TemplateSpec {
            shape: Some(ShapeKind::Passthrough),
            body: Some(json!({ "Value": "<VALUE>" })),
            ..Default::default()
        })
        .expect_err("passthrough with body");

        assert!(matches!(err, ConfigError::UnrecognizedShape(_)));
    }

    #[test]
    fn declared_readings_uses_default_field_and_custom_value_fields() {
        let template = Template::from_spec(TemplateSpec {
            shape: Some(ShapeKind::Readings),
            body: Some(json!({ "Value": "<VALUE>" })),
            rest_value_field: Some("reading".to_string()),
            broker_value_field: Some("Value".to_string()),
            ..Default::default()
        })
        .expect("readings template");

        assert_eq!(template.kind(), ShapeKind::Readings);
        assert_eq!(template.rest_value_field(), "reading");
        assert_eq!(template.broker_value_field(), "Value");
        assert_eq!(
            template,
            Template::readings(DEFAULT_READINGS_FIELD, json!({ "Value": "<VALUE>" }))
                .unwrap()
                .with_rest_value_field("reading")
                .with_broker_value_field("Value")
        );
    }
}
