//! Wire types and calls for the remote QR generation endpoint.

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::http::Client;

/// Body of `POST <endpoint_url>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateQrRequest<'a> {
    pub url: &'a str,
}

/// The endpoint answers either directly or wrapped in a gateway envelope whose
/// `body` is itself a JSON string. An empty `body` defers to a top-level
/// `qr_code_url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QrEnvelope {
    Wrapped {
        body: String,
        #[serde(default)]
        qr_code_url: Option<String>,
    },
    Direct {
        qr_code_url: String,
    },
}

#[derive(Debug, Deserialize)]
struct QrPayload {
    qr_code_url: String,
}

impl QrEnvelope {
    /// Unwrap to the image URL, rejecting empty ones.
    pub fn into_url(self) -> Result<String, GenerateError> {
        let url = match self {
            Self::Direct { qr_code_url } => qr_code_url,
            Self::Wrapped { body, qr_code_url } if body.is_empty() => {
                qr_code_url.unwrap_or_default()
            }
            Self::Wrapped { body, .. } => {
                let payload: QrPayload = serde_json::from_str(&body).map_err(|e| {
                    GenerateError::MalformedResponse(format!("unreadable body: {e}"))
                })?;
                payload.qr_code_url
            }
        };

        if url.trim().is_empty() {
            return Err(GenerateError::MalformedResponse(
                "no qr_code_url found".to_owned(),
            ));
        }
        Ok(url)
    }
}

/// Decode a successful response body into the QR image URL.
pub fn decode_qr_url(bytes: &[u8]) -> Result<String, GenerateError> {
    let envelope: QrEnvelope = serde_json::from_slice(bytes)
        .map_err(|_| GenerateError::MalformedResponse("no qr_code_url found".to_owned()))?;
    envelope.into_url()
}

/// Ask the endpoint to render `input` and return the image URL.
pub async fn request_qr_code(
    config: &GeneratorConfig,
    input: &str,
) -> Result<String, GenerateError> {
    let endpoint = config.endpoint_url();
    debug!("Requesting QR code from {endpoint}");

    let request = Client::post(endpoint.as_str())
        .json(&GenerateQrRequest { url: input })
        .map_err(|e| GenerateError::InvalidRequest(e.to_string()))?
        .timeout(config.timeout());

    let response = request.send().await?;

    if !response.is_success() {
        let body = response.text();
        error!(
            "QR endpoint answered {}: {body}",
            response.status
        );
        return Err(GenerateError::Remote {
            status: response.status,
            body,
        });
    }

    decode_qr_url(&response.body)
}

/// Download the rendered image.
pub async fn fetch_image_bytes(
    config: &GeneratorConfig,
    image_url: &str,
) -> Result<Vec<u8>, GenerateError> {
    let response = Client::get(image_url)
        .timeout(config.timeout())
        .send()
        .await?;

    if !response.is_success() {
        return Err(GenerateError::Remote {
            status: response.status,
            body: response.text(),
        });
    }
    debug!(
        "Fetched {} bytes of {}",
        response.body.len(),
        response.header("content-type").unwrap_or("unknown content")
    );
    Ok(response.body)
}
