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

//! Canonical structured field values and formatting helpers.

pub const NONE: &str = "none";
pub const REASON_CHANNEL_CLOSED: &str = "channel_closed";
pub const REASON_BROKER_DISCONNECTED: &str = "broker_disconnected";
pub const DEFAULT_WORKER_THREAD: &str = "unknown-thread";

/// Payload previews in log events are cut to this many characters.
pub const PAYLOAD_PREVIEW_LEN: usize = 50;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkerContext {
    pub worker_id: String,
    pub worker_thread: String,
}

impl WorkerContext {
    pub fn with_current_thread(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_thread: current_thread_name_or_default(),
        }
    }
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_WORKER_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

pub fn format_optional(value: Option<&str>) -> &str {
    value.unwrap_or(NONE)
}

/// Lossy UTF-8 preview of a payload, cut on a character boundary.
pub fn payload_preview(payload: &[u8]) -> String {
    let text = String::from_utf8_lossy(payload);
    let mut preview: String = text.chars().take(PAYLOAD_PREVIEW_LEN).collect();
    if text.chars().count() > PAYLOAD_PREVIEW_LEN {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::{format_optional, payload_preview, thread_name_or_default, NONE};

    #[test]
    fn payload_preview_keeps_short_payloads_intact() {
        assert_eq!(payload_preview(br#"{"Value":7}"#), r#"{"Value":7}"#);
    }

    #[test]
    fn payload_preview_truncates_on_char_boundary() {
        let payload = "é".repeat(60);
        let preview = payload_preview(payload.as_bytes());

        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 53);
    }

    #[test]
    fn defaults_are_used_when_absent() {
        assert_eq!(format_optional(None), NONE);
        assert_eq!(thread_name_or_default(Some("worker")), "worker");
    }
}
