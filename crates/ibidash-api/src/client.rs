// IBI dashboard HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, status checking, and
// JSON decoding. Endpoint methods live in `stats.rs`, `direct.rs` and
// `intents.rs` so this module stays focused on transport mechanics.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Longest body excerpt kept in error messages.
const BODY_PREVIEW: usize = 200;

/// Raw HTTP client for the IBI backend.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted, so
/// every concurrent fetch of a refresh cycle can hold its own copy.
#[derive(Debug, Clone)]
pub struct IbiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IbiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://127.0.0.1:8000`). A
    /// path prefix is allowed and kept: `http://host/ibi` resolves
    /// `stats/ibi` to `http://host/ibi/stats/ibi`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::checked(http, base_url)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Result<Self, Error> {
        Self::checked(http, base_url)
    }

    fn checked(http: reqwest::Client, base_url: Url) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        Ok(Self { http, base_url })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an endpoint path relative to the base URL.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Build `{base}/{collection}/{id}` with `id` percent-encoded as one segment.
    pub(crate) fn item_url(&self, collection: &str, id: &str) -> Result<Url, Error> {
        let mut url = self.endpoint_url(collection)?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        let body = Self::success_body(resp).await?;
        decode(&body)
    }

    /// Send a DELETE request and return the body as loose JSON.
    ///
    /// An empty body decodes to `Value::Null`; a non-JSON body is kept as
    /// a JSON string rather than treated as a failure, since nothing
    /// downstream consumes it.
    pub(crate) async fn delete_json(&self, url: Url) -> Result<serde_json::Value, Error> {
        debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await?;
        let body = Self::success_body(resp).await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }

    /// Reject non-2xx responses, returning the body text otherwise.
    async fn success_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            trace!(status = status.as_u16(), "non-success response");
            return Err(Error::Http {
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }
        Ok(resp.text().await?)
    }
}

/// Decode a JSON body, keeping a preview of it in the error.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

/// Truncate to at most `BODY_PREVIEW` bytes on a char boundary.
fn preview(body: &str) -> &str {
    if body.len() <= BODY_PREVIEW {
        return body;
    }
    let mut end = BODY_PREVIEW;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
