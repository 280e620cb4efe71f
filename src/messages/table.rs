use serde::{Deserialize, Serialize};

use crate::error::{Result, WheelError};

/// One outcome the wheel can land on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub weight: f64,
}

impl Message {
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

/// Ordered, validated set of messages. Order is the tie-break for the
/// cumulative draw, so it is never re-sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTable {
    messages: Vec<Message>,
    total_weight: f64,
}

impl MessageTable {
    pub fn new(messages: Vec<Message>) -> Result<Self> {
        if messages.is_empty() {
            return Err(WheelError::config("message table is empty"));
        }

        for message in &messages {
            if !message.weight.is_finite() || message.weight <= 0.0 {
                return Err(WheelError::config(format!(
                    "message {:?} has non-positive weight {}",
                    message.text, message.weight
                )));
            }
        }

        let total_weight: f64 = messages.iter().map(|m| m.weight).sum();
        if !total_weight.is_finite() || total_weight <= 0.0 {
            return Err(WheelError::config(format!(
                "total message weight {} is not a positive finite number",
                total_weight
            )));
        }

        Ok(Self {
            messages,
            total_weight,
        })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Probability of landing on the message at `index`.
    pub fn probability(&self, index: usize) -> Option<f64> {
        self.messages
            .get(index)
            .map(|m| m.weight / self.total_weight)
    }
}

impl Serialize for MessageTable {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.messages.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MessageTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let messages = Vec::<Message>::deserialize(deserializer)?;
        MessageTable::new(messages).map_err(serde::de::Error::custom)
    }
}
