//! First-aid reference data for a wound class
//!
//! Mirrors one entry of `wound_info.json`. The published file uses
//! Indonesian keys (`ciri_ciri`, `penanganan`, ...); English aliases are
//! accepted as well. Every field is optional, and a field holding a value of
//! the wrong JSON type is treated as absent instead of failing the entry.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Reference content for one wound class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WoundInfo {
    /// Display name of the wound type
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Recognizable characteristics
    #[serde(
        rename = "ciri_ciri",
        alias = "symptoms",
        default,
        deserialize_with = "lenient"
    )]
    pub symptoms: Option<Vec<String>>,

    /// Ordered first-aid steps
    #[serde(
        rename = "penanganan",
        alias = "treatment_steps",
        default,
        deserialize_with = "lenient"
    )]
    pub treatment_steps: Option<Vec<TreatmentStep>>,

    /// When to seek professional medical help
    #[serde(
        rename = "pencarian_medis",
        alias = "seek_care",
        default,
        deserialize_with = "lenient"
    )]
    pub seek_care: Option<Vec<String>>,

    /// Expected healing time notes
    #[serde(
        rename = "waktu_penyembuhan",
        alias = "healing_time",
        default,
        deserialize_with = "lenient"
    )]
    pub healing_time: Option<Vec<String>>,

    /// Things to avoid
    #[serde(
        rename = "hindari",
        alias = "avoid",
        default,
        deserialize_with = "lenient"
    )]
    pub avoid: Option<Vec<String>>,

    /// Extra tips, either structured or a single paragraph
    #[serde(default, deserialize_with = "lenient")]
    pub tips: Option<Tips>,
}

/// One numbered treatment step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentStep {
    #[serde(default)]
    pub step: String,

    #[serde(rename = "penjelasan", alias = "explanation", default)]
    pub explanation: String,
}

/// One labelled tip
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    #[serde(rename = "penanganan", alias = "label", default)]
    pub label: String,

    #[serde(rename = "penjelasan", alias = "explanation", default)]
    pub explanation: String,
}

/// Tips are published either as a list of labelled entries or as plain text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tips {
    List(Vec<Tip>),
    Text(String),
}

/// Deserialize an optional field, mapping `null` and type mismatches to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::debug!("Ignoring malformed wound info field: {}", e);
            Ok(None)
        }
    }
}
