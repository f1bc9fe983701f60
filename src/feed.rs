//! Parsed realtime delay feed.
//!
//! Decoding the upstream wire format happens elsewhere; this module only describes the
//! entities the estimation pass consumes and reads them from JSON.

use std::io::Read;

use serde::Deserialize;

use crate::{data::ID, error::FeedError};

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    #[serde(default)]
    pub entities: Vec<FeedEntity>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntity {
    #[serde(default)]
    pub entity_id: ID,
    pub trip_id: ID,
    #[serde(default)]
    pub delay_updates: Vec<DelayUpdate>,
}

/// Delays are signed seconds. A missing field means "no news", not zero.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DelayUpdate {
    pub stop_id: ID,
    #[serde(default)]
    pub arrival_delay: Option<i64>,
    #[serde(default)]
    pub departure_delay: Option<i64>,
}

impl Feed {
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, FeedError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(serde_json::from_str(&content)?)
    }
}
