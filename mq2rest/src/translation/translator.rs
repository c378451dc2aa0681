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

//! Pure payload translation between broker and REST documents.

use crate::error::TranslationError;
use crate::route::Direction;
use crate::translation::template::{Template, TemplateShape, VALUE_PLACEHOLDER};
use serde_json::{Number, Value};

/// Input accepted by [`translate`]: a parsed document or its JSON encoding.
#[derive(Clone, Copy, Debug)]
pub enum Source<'a> {
    Document(&'a Value),
    Encoded(&'a [u8]),
}

impl<'a> From<&'a Value> for Source<'a> {
    fn from(value: &'a Value) -> Self {
        Source::Document(value)
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Encoded(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Source::Encoded(bytes.as_slice())
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Encoded(text.as_bytes())
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Source::Encoded(text.as_bytes())
    }
}

///
/// Translates `source` through `template` and returns the JSON-encoded result.
///
/// Publish translations read the template's REST value field, subscribe
/// translations its broker value field. The template is only borrowed, so one
/// route template serves any number of translations.
///
/// # Examples
///
/// ```
/// use mq2rest::{translate, Direction, Template};
/// use serde_json::json;
///
/// let template = Template::scalar(json!({ "Value": "<VALUE>" })).unwrap();
///
/// let numeric = translate(r#"{"value": "12.5"}"#, &template, Direction::Subscribe).unwrap();
/// assert_eq!(numeric, r#"{"Value":12.5}"#);
///
/// let textual = translate(r#"{"value": "abc"}"#, &template, Direction::Subscribe).unwrap();
/// assert_eq!(textual, r#"{"Value":"abc"}"#);
/// ```
pub fn translate<'a>(
    source: impl Into<Source<'a>>,
    template: &Template,
    direction: Direction,
) -> Result<String, TranslationError> {
    let decoded;
    let document = match source.into() {
        Source::Document(value) => value,
        Source::Encoded(bytes) => {
            decoded = serde_json::from_slice::<Value>(bytes)?;
            &decoded
        }
    };

    let rendered = match &template.shape {
        TemplateShape::Passthrough => document.clone(),
        TemplateShape::Scalar { body } => {
            let field = match direction {
                Direction::Publish => template.rest_value_field(),
                Direction::Subscribe => template.broker_value_field(),
            };
            render(body, scalar_value(document, field)?)
        }
        TemplateShape::Readings {
            readings_field,
            body,
        } => {
            let value = match direction {
                Direction::Publish => {
                    latest_reading(document, readings_field, template.rest_value_field())?
                }
                Direction::Subscribe => scalar_value(document, template.broker_value_field())?,
            };
            render(body, value)
        }
    };

    Ok(serde_json::to_string(&rendered)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads `field` from an object source; a bare scalar source is its own value.
fn scalar_value<'v>(document: &'v Value, field: &str) -> Result<&'v Value, TranslationError> {
    match document {
        Value::Object(map) => map
            .get(field)
            .ok_or_else(|| TranslationError::MissingField(field.to_string())),
        Value::Null | Value::Array(_) => Err(TranslationError::UnrecognizedShape {
            expected: "object or scalar",
            found: kind_of(document),
        }),
        scalar => Ok(scalar),
    }
}

fn latest_reading<'v>(
    document: &'v Value,
    readings_field: &str,
    value_field: &str,
) -> Result<&'v Value, TranslationError> {
    let Value::Object(map) = document else {
        return Err(TranslationError::UnrecognizedShape {
            expected: "object",
            found: kind_of(document),
        });
    };
    let readings = map
        .get(readings_field)
        .ok_or_else(|| TranslationError::MissingField(readings_field.to_string()))?;
    let Value::Array(readings) = readings else {
        return Err(TranslationError::UnrecognizedShape {
            expected: "array",
            found: kind_of(readings),
        });
    };
    let latest = readings
        .last()
        .ok_or_else(|| TranslationError::MissingField(format!("{readings_field}[]")))?;

    scalar_value(latest, value_field)
}

fn render(node: &Value, value: &Value) -> Value {
    match node {
        Value::String(text) if text == VALUE_PLACEHOLDER => coerce(value),
        Value::String(text) if text.contains(VALUE_PLACEHOLDER) => {
            Value::String(text.replace(VALUE_PLACEHOLDER, &stringify(value)))
        }
        Value::Array(items) => Value::Array(items.iter().map(|item| render(item, value)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), render(item, value)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Textual values become numbers when they parse strictly; otherwise they pass through.
fn coerce(value: &Value) -> Value {
    match value {
        Value::String(text) => parse_number(text)
            .map(Value::Number)
            .unwrap_or_else(|| value.clone()),
        other => other.clone(),
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(int.into());
    }
    if let Ok(uint) = text.parse::<u64>() {
        return Some(uint.into());
    }
    // Integer text outside i64/u64 would only survive as a lossy float.
    if !text.contains(['.', 'e', 'E']) {
        return None;
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
