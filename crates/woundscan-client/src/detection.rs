//! Detection requests against `POST /detect`
//!
//! One multipart upload per call, single attempt, no retry. The caller is
//! responsible for keeping at most one request in flight.

use std::time::{Duration, Instant};

use reqwest::multipart::{Form, Part};
use tokio::time::timeout;
use url::Url;
use woundscan_core::prelude::*;
use woundscan_core::{DetectionError, DetectionResult, StagedFile};

use crate::wire::{parse_detection_response, parse_error_message};

/// Default deadline for a detection round trip (upload + inference + body)
pub const DEFAULT_DETECT_TIMEOUT: Duration = Duration::from_secs(60);

/// Multipart field name the service reads the image from
const FILE_FIELD: &str = "file";

/// Client for the detection endpoint
#[derive(Debug, Clone)]
pub struct DetectionClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl DetectionClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_timeout(endpoint, DEFAULT_DETECT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            timeout,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Upload a staged image and return the normalized result.
    pub async fn detect(&self, file: &StagedFile) -> std::result::Result<DetectionResult, DetectionError> {
        let start = Instant::now();
        info!(
            "Submitting {} ({} bytes, {}) to {}",
            file.file_name,
            file.size_bytes(),
            file.mime_type,
            self.endpoint
        );

        let result = timeout(self.timeout, self.exchange(file))
            .await
            .map_err(|_| DetectionError::Timeout {
                secs: self.timeout.as_secs(),
            })?;

        match &result {
            Ok(r) => info!(
                "Detection finished in {:?}: {} detections (total_wounds={})",
                start.elapsed(),
                r.detections.len(),
                r.total_wounds
            ),
            Err(e) => warn!("Detection failed after {:?}: {}", start.elapsed(), e),
        }

        result
    }

    async fn exchange(&self, file: &StagedFile) -> std::result::Result<DetectionResult, DetectionError> {
        let part = Part::bytes(file.raw_bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| {
                DetectionError::transport(format!("invalid MIME type '{}': {}", file.mime_type, e))
            })?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| DetectionError::transport(describe_transport_error(&e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DetectionError::transport(describe_transport_error(&e)))?;

        debug!("POST {} -> {} ({} bytes)", self.endpoint, status, body.len());

        if !status.is_success() {
            return Err(DetectionError::server(
                Some(status.as_u16()),
                parse_error_message(&body),
            ));
        }

        parse_detection_response(&body)
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_connect() {
        format!("could not connect to server ({})", e)
    } else {
        e.to_string()
    }
}
