//! Detection response wire format and normalization
//!
//! The service answers `POST /detect` with
//! `{ "image_url", "total_wounds", "detections": [{ "class", "confidence", "bbox" }] }`.
//! Older deployments spell the list `detection`. Both are accepted and
//! `detections` wins when both are present. Failures carry `{ "error" }`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use woundscan_core::types::UNKNOWN_CLASS;
use woundscan_core::{Detection, DetectionError, DetectionResult};

#[derive(Debug, Deserialize)]
struct RawDetectionResponse {
    #[serde(default, deserialize_with = "lenient")]
    image_url: Option<String>,

    #[serde(default)]
    total_wounds: Option<serde_json::Value>,

    #[serde(default)]
    detections: Option<Vec<RawDetection>>,

    /// Legacy spelling
    #[serde(default)]
    detection: Option<Vec<RawDetection>>,

    #[serde(default, deserialize_with = "lenient")]
    error: Option<String>,
}

/// One detection. Each field is read on its own so a malformed value only
/// blanks that field.
#[derive(Debug, Deserialize)]
struct RawDetection {
    #[serde(rename = "class", default, deserialize_with = "lenient")]
    class_name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    confidence: Option<f64>,

    #[serde(default, deserialize_with = "lenient")]
    bbox: Option<Vec<f64>>,
}

/// Body of a failed request
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
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
            tracing::debug!("Ignoring malformed detection field: {}", e);
            Ok(None)
        }
    }
}

impl From<RawDetection> for Detection {
    fn from(raw: RawDetection) -> Self {
        Detection {
            class_name: raw
                .class_name
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_CLASS.to_string()),
            confidence: raw.confidence,
            bounding_box: raw.bbox,
        }
    }
}

impl RawDetectionResponse {
    fn into_result(self) -> Result<DetectionResult, DetectionError> {
        let list = match (self.detections, self.detection) {
            (Some(list), _) => Some(list),
            (None, legacy) => legacy,
        };

        // A 2xx body with only an `error` key is a failure in disguise
        let list = match (list, self.error) {
            (Some(list), _) => list,
            (None, Some(message)) => return Err(DetectionError::server(Some(200), Some(message))),
            (None, None) => Vec::new(),
        };

        let total_wounds = self
            .total_wounds
            .as_ref()
            .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64)))
            .unwrap_or(0);

        Ok(DetectionResult {
            image_url: self.image_url.filter(|u| !u.is_empty()),
            total_wounds,
            detections: list.into_iter().map(Detection::from).collect(),
        })
    }
}

/// Parse and normalize a successful (2xx) detection response body
pub fn parse_detection_response(body: &[u8]) -> Result<DetectionResult, DetectionError> {
    let raw: RawDetectionResponse = serde_json::from_slice(body)
        .map_err(|e| DetectionError::invalid_response(e.to_string()))?;
    raw.into_result()
}

/// Extract the server-supplied message from a failure body, if any
pub(crate) fn parse_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
}
