use crate::{error, management::SessionManager, success};

/// Clears the persisted session and verifier. Idempotent and purely local;
/// no request is made to the provider.
pub async fn logout() {
    match SessionManager::clear().await {
        Ok(()) => success!("Logged out."),
        Err(e) => error!("Failed to clear session: {}", e),
    }
}
