use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Messages of one chat keyed by `custom_json.sending_time`.
pub type MessageEntities = BTreeMap<i64, Message>;

/// Structured client payload attached to every message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomJson {
    /// Client-side send time in unix milliseconds. Ordering key of the message within its chat.
    #[serde(deserialize_with = "deserialize_sending_time")]
    pub sending_time: i64,
    /// Remaining client fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg_attr(not(test), allow(dead_code))]
impl CustomJson {
    pub fn new(sending_time: i64) -> Self {
        Self {
            sending_time,
            extra: Map::new(),
        }
    }

    /// Decodes the JSON-in-JSON string the backend stores in `custom_json`.
    pub fn decode(encoded: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(encoded)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: i64,
    pub sender_username: Option<String>,
    pub text: String,
    pub created: DateTime<Utc>,
    pub custom_json: CustomJson,
}

impl Message {
    pub fn sending_time(&self) -> i64 {
        self.custom_json.sending_time
    }
}

/// Message as received from the chat service, `custom_json` still encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawMessage {
    pub id: i64,
    #[serde(default)]
    pub sender_username: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(with = "super::timestamp")]
    pub created: DateTime<Utc>,
    pub custom_json: String,
}

impl RawMessage {
    pub fn decode(self) -> Result<Message, serde_json::Error> {
        let custom_json = CustomJson::decode(&self.custom_json)?;

        Ok(Message {
            id: self.id,
            sender_username: self.sender_username,
            text: self.text,
            created: self.created,
            custom_json,
        })
    }
}

fn deserialize_sending_time<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("sending_time `{number}` is not an integer"))),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("sending_time `{text}` is not numeric"))),
        other => Err(D::Error::custom(format!(
            "sending_time must be a number or numeric string, got `{other}`"
        ))),
    }
}
