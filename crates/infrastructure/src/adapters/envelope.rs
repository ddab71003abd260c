//! Response envelope decoding shared by the platform adapters.

use easytest_application::GatewayError;
use easytest_domain::ApiEnvelope;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Maps a transport failure.
pub(crate) fn transport_error(error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_decode() {
        GatewayError::Decode(error.to_string())
    } else {
        GatewayError::Network(error.to_string())
    }
}

/// Reads an enveloped response and returns its `data`.
///
/// A non-2xx HTTP status or envelope code becomes `GatewayError::Status`
/// carrying the envelope message when one is present.
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<Option<T>, GatewayError> {
    let status = response.status();
    let text = response.text().await.map_err(|e| transport_error(&e))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&text)
            .ok()
            .map(|envelope| envelope.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map_or_else(|| text.clone(), str::to_string)
            });
        return Err(GatewayError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: ApiEnvelope<T> =
        serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))?;
    if !envelope.is_success() {
        return Err(GatewayError::Status {
            status: envelope.code,
            message: envelope.message,
        });
    }
    Ok(envelope.data)
}

/// Fails with `Decode` when an envelope carried no data.
pub(crate) fn required<T>(data: Option<T>, what: &str) -> Result<T, GatewayError> {
    data.ok_or_else(|| GatewayError::Decode(format!("missing {what} in response")))
}
