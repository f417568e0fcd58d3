//! Calendar server communication
//!
//! Calendars aggregate submitted digests and later return proofs that
//! reach a blockchain attestation.
//! - `POST {url}/digest`: submit a digest, get a pending timestamp
//! - `GET {url}/timestamp/{hex}`: fetch the (possibly upgraded) timestamp
//!   for a commitment; 404 means not yet available

use async_trait::async_trait;

use crate::anchoring::error::AnchorError;
use crate::ots::Timestamp;

/// Accept header the calendar protocol expects
pub const OTS_ACCEPT: &str = "application/vnd.opentimestamps.v1";

/// Default cap on calendar response bodies
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 10_000;

/// A remote calendar server
#[async_trait]
pub trait RemoteCalendar: Send + Sync {
    /// Submit `digest` to the calendar at `calendar_url`
    ///
    /// Returns the calendar's timestamp rooted at `digest`.
    async fn submit(&self, calendar_url: &str, digest: &[u8]) -> Result<Timestamp, AnchorError>;

    /// Fetch the timestamp for `commitment`; `Ok(None)` when not yet available
    async fn get_timestamp(
        &self,
        calendar_url: &str,
        commitment: &[u8],
    ) -> Result<Option<Timestamp>, AnchorError>;
}

/// Parse a calendar response body as a timestamp over `digest`
pub(crate) fn parse_response(
    calendar_url: &str,
    digest: &[u8],
    body: &[u8],
    max_bytes: usize,
) -> Result<Timestamp, AnchorError> {
    if body.len() > max_bytes {
        return Err(AnchorError::InvalidResponse(format!(
            "{} returned {} bytes, limit is {}",
            calendar_url,
            body.len(),
            max_bytes
        )));
    }

    Timestamp::from_bytes(body, digest.to_vec()).map_err(|e| {
        AnchorError::InvalidResponse(format!(
            "failed to parse timestamp from {}: {}",
            calendar_url, e
        ))
    })
}

/// reqwest-backed calendar client
#[cfg(feature = "http")]
pub struct HttpCalendar {
    /// HTTP client
    client: reqwest::Client,

    /// Timeout
    timeout: std::time::Duration,

    max_response_bytes: usize,
}

#[cfg(feature = "http")]
impl HttpCalendar {
    /// Create a new calendar client
    pub fn new(timeout_secs: u64) -> Result<Self, AnchorError> {
        Self::with_limit(timeout_secs, DEFAULT_MAX_RESPONSE_BYTES)
    }

    /// Create a client with a custom response size limit
    pub fn with_limit(timeout_secs: u64, max_response_bytes: usize) -> Result<Self, AnchorError> {
        let timeout = std::time::Duration::from_secs(timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnchorError::Network(e.to_string()))?;

        Ok(Self {
            client,
            timeout,
            max_response_bytes,
        })
    }

    /// Read the body, stopping as soon as it passes `max_response_bytes`
    async fn read_body(&self, mut response: reqwest::Response) -> Result<Vec<u8>, AnchorError> {
        if let Some(len) = response.content_length() {
            if len > self.max_response_bytes as u64 {
                return Err(AnchorError::InvalidResponse(format!(
                    "response of {} bytes exceeds limit {}",
                    len, self.max_response_bytes
                )));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| AnchorError::Network(e.to_string()))?
        {
            if body.len() + chunk.len() > self.max_response_bytes {
                return Err(AnchorError::InvalidResponse(format!(
                    "response exceeds limit {}",
                    self.max_response_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl RemoteCalendar for HttpCalendar {
    async fn submit(&self, calendar_url: &str, digest: &[u8]) -> Result<Timestamp, AnchorError> {
        tracing::debug!(calendar_url = %calendar_url, "Submitting to calendar");

        let url = format!("{}/digest", calendar_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("Accept", OTS_ACCEPT)
            .header("User-Agent", concat!("ots-client/", env!("CARGO_PKG_VERSION")))
            .body(digest.to_vec())
            .send()
            .await
            .map_err(|e| AnchorError::from_reqwest(&e, self.timeout.as_secs()))?;

        if !response.status().is_success() {
            return Err(AnchorError::ServiceError(format!(
                "Calendar returned status {}",
                response.status()
            )));
        }

        let body = self.read_body(response).await?;
        let timestamp = parse_response(calendar_url, digest, &body, self.max_response_bytes)?;

        tracing::info!(calendar_url = %calendar_url, "Digest submitted successfully");

        Ok(timestamp)
    }

    async fn get_timestamp(
        &self,
        calendar_url: &str,
        commitment: &[u8],
    ) -> Result<Option<Timestamp>, AnchorError> {
        let url = format!(
            "{}/timestamp/{}",
            calendar_url.trim_end_matches('/'),
            hex::encode(commitment)
        );

        tracing::debug!(url = %url, "Fetching timestamp from calendar");

        let response = self
            .client
            .get(&url)
            .header("Accept", OTS_ACCEPT)
            .send()
            .await
            .map_err(|e| AnchorError::from_reqwest(&e, self.timeout.as_secs()))?;

        // 404 = timestamp not yet available
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(calendar_url = %calendar_url, "Timestamp not yet available at calendar");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(AnchorError::ServiceError(format!(
                "Calendar returned status {}",
                response.status()
            )));
        }

        let body = self.read_body(response).await?;
        let timestamp = parse_response(calendar_url, commitment, &body, self.max_response_bytes)?;

        tracing::info!(calendar_url = %calendar_url, "Timestamp fetched successfully");

        Ok(Some(timestamp))
    }
}
