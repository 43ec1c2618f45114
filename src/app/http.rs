use tracing::{debug, instrument, warn};

use crate::app::ports::{HttpClientPort, HttpMethod, HttpResponse};
use crate::common::QueryParams;

/// Generic text used when a request fails without any HTTP status
pub const NETWORK_ERROR: &str = "There was a network error.";

/// A rejected request: either a non-2xx response or no response at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFailure {
    pub status: Option<u16>,
    pub status_text: String,
    pub body: Option<String>,
}

impl HttpFailure {
    fn network(detail: &str) -> Self {
        debug!(detail, "network-level failure");
        Self {
            status: None,
            status_text: NETWORK_ERROR.to_string(),
            body: None,
        }
    }

    fn from_response(resp: &HttpResponse) -> Self {
        Self {
            status: Some(resp.status),
            status_text: resp.status_text.clone(),
            body: Some(resp.text()),
        }
    }
}

impl std::fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} {}", status, self.status_text),
            None => write!(f, "{}", self.status_text),
        }
    }
}

/// Build the final URL for a request.
///
/// Parameters always travel on the query string, POST included; the Flickr
/// endpoint reads them from the URL regardless of method.
pub fn build_url(url: &str, params: Option<&QueryParams>) -> String {
    match params {
        Some(params) => format!("{}{}", url, params.to_query_string()),
        None => url.to_string(),
    }
}

/// Issue a request and resolve with the body text on any 2xx status
#[instrument(skip(http, params))]
pub async fn request(
    http: &dyn HttpClientPort,
    method: HttpMethod,
    url: &str,
    params: Option<&QueryParams>,
) -> Result<String, HttpFailure> {
    let final_url = build_url(url, params);
    let resp = http
        .send(method, &final_url)
        .await
        .map_err(|e| HttpFailure::network(&e))?;

    if (200..300).contains(&resp.status) {
        Ok(resp.text())
    } else {
        warn!(status = resp.status, "request rejected");
        Err(HttpFailure::from_response(&resp))
    }
}

/// GET a binary payload; only an exact 200 counts as success
#[instrument(skip(http))]
pub async fn get_binary(http: &dyn HttpClientPort, url: &str) -> Result<Vec<u8>, HttpFailure> {
    let resp = http
        .send(HttpMethod::Get, url)
        .await
        .map_err(|e| HttpFailure::network(&e))?;

    if resp.status == 200 {
        Ok(resp.bytes)
    } else {
        Err(HttpFailure::from_response(&resp))
    }
}
