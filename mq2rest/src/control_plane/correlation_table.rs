//! Message-id → command correlation table.

use crate::error::ConfigError;
use std::collections::HashMap;

/// One configured correlation between a message id and a logical command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CorrelationEntry {
    pub message_id: String,
    pub command: String,
}

impl CorrelationEntry {
    pub fn new(message_id: &str, command: &str) -> Self {
        Self {
            message_id: message_id.to_string(),
            command: command.to_string(),
        }
    }
}

/// Read-only lookup from the opaque message id carried in inbound metadata to a command.
#[derive(Clone, Debug, Default)]
pub struct CorrelationTable {
    commands: HashMap<String, String>,
}

impl CorrelationTable {
    /// Builds the table, rejecting blank fields and duplicate message ids.
    pub fn from_entries(
        entries: impl IntoIterator<Item = CorrelationEntry>,
    ) -> Result<Self, ConfigError> {
        let mut commands = HashMap::new();
        for entry in entries {
            if entry.message_id.trim().is_empty() {
                return Err(ConfigError::InvalidCorrelation {
                    message_id: entry.message_id,
                    reason: "message id is empty".to_string(),
                });
            }
            if entry.command.trim().is_empty() {
                return Err(ConfigError::InvalidCorrelation {
                    message_id: entry.message_id,
                    reason: "command is empty".to_string(),
                });
            }
            if commands.contains_key(&entry.message_id) {
                return Err(ConfigError::InvalidCorrelation {
                    message_id: entry.message_id,
                    reason: "message id is configured more than once".to_string(),
                });
            }
            commands.insert(entry.message_id, entry.command);
        }
        Ok(Self { commands })
    }

    pub fn resolve(&self, message_id: &str) -> Option<&str> {
        self.commands.get(message_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
