use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::{
    config,
    error::TransferError,
    types::{TransferRequestBody, TransferResponse},
};

/// Submits the transfer job to the gateway and waits for the full result.
///
/// This is one long round trip: the gateway resolves the source playlist
/// again server-side, creates the destination playlist, matches and inserts
/// every track in batches and applies the cover image before responding. For
/// playlists near the 10,000-track mark this can take many minutes, so the
/// request is built without a client timeout; the orchestrator owns the
/// ceiling and aborts by dropping the in-flight future.
///
/// Status mapping: 401 invalidates the session (`AuthExpired`), 502 is an
/// overload/size problem (`ServerOverload`), any other non-2xx carries the
/// status and body as a generic gateway failure. None of these are retried
/// here; retry policy belongs to the user.
pub async fn transfer(body: &TransferRequestBody) -> Result<TransferResponse, TransferError> {
    let api_url = format!("{uri}/transfer", uri = &config::gateway_url());

    let client = Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .build()?;
    let response = client.post(&api_url).json(body).send().await?;

    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED => Err(TransferError::AuthExpired),
        StatusCode::BAD_GATEWAY => Err(TransferError::ServerOverload),
        status if !status.is_success() => {
            let body = response.text().await.unwrap_or_default();
            Err(TransferError::Gateway(status.as_u16(), body))
        }
        _ => {
            let payload: TransferResponse = response.json().await.map_err(|e| {
                TransferError::Gateway(
                    status.as_u16(),
                    format!("malformed transfer response: {}", e),
                )
            })?;
            Ok(payload)
        }
    }
}
