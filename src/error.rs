//! Error taxonomy for the authentication and transfer pipeline.
//!
//! Every failure the orchestrator can encounter is represented here so it can
//! be converted into a single user-facing `TransferOutcome` message at the
//! orchestration boundary instead of escaping to the CLI layer.

use std::fmt;

#[derive(Debug)]
pub enum TransferError {
    /// PKCE verifier absent at exchange time (storage cleared or never written).
    MissingVerifier,
    /// Token endpoint rejected the code (reused code, mismatched verifier, expired code).
    AuthExchange(String),
    /// Source playlist could not be fetched or parsed.
    Resolution(String),
    /// Destination token rejected mid-transfer (HTTP 401). Forces logout.
    AuthExpired,
    /// Gateway-reported 502 or similar overload condition.
    ServerOverload,
    /// Client-side ceiling exceeded with no response; backend work may continue unseen.
    Timeout,
    /// Explicit user abort. A non-error terminal state distinct from backend failures.
    UserCancelled,
    /// Durable client-side storage could not be read or written.
    Storage(String),
    /// Network or protocol failure talking to a collaborator.
    Http(reqwest::Error),
    /// Any other gateway failure with the HTTP status attached.
    Gateway(u16, String),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::MissingVerifier => {
                write!(f, "No login attempt in progress. Please log in again.")
            }
            TransferError::AuthExchange(desc) => {
                write!(f, "Token exchange failed: {}. Please log in again.", desc)
            }
            TransferError::Resolution(desc) => {
                write!(f, "Failed to fetch playlist info: {}", desc)
            }
            TransferError::AuthExpired => {
                write!(f, "Spotify session expired. Please log in again.")
            }
            TransferError::ServerOverload => write!(
                f,
                "The transfer service is overloaded or the playlist is too large. Try again later."
            ),
            TransferError::Timeout => write!(
                f,
                "The transfer did not finish within the configured ceiling. The server may still be working; check Spotify before retrying."
            ),
            TransferError::UserCancelled => write!(
                f,
                "Transfer cancelled. A partially created playlist may remain on Spotify."
            ),
            TransferError::Storage(desc) => write!(f, "Local storage error: {}", desc),
            TransferError::Http(e) => write!(f, "Request failed: {}", e),
            TransferError::Gateway(status, desc) => {
                write!(f, "Transfer failed (HTTP {}): {}", status, desc)
            }
        }
    }
}

impl std::error::Error for TransferError {}

impl From<reqwest::Error> for TransferError {
    fn from(err: reqwest::Error) -> Self {
        TransferError::Http(err)
    }
}

impl From<std::io::Error> for TransferError {
    fn from(err: std::io::Error) -> Self {
        TransferError::Storage(err.to_string())
    }
}
