use std::path::PathBuf;

use crate::error::TransferError;

/// Durable storage for the PKCE code verifier.
///
/// The verifier must survive the round trip through the provider's
/// authorization page and be consumed exactly once by the token exchange.
/// It lives in its own file so logout can purge it independently of the
/// session cache.
pub struct VerifierManager;

impl VerifierManager {
    pub async fn persist(verifier: &str) -> Result<(), TransferError> {
        let path = Self::verifier_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| TransferError::Storage(e.to_string()))?;
        }

        async_fs::write(path, verifier)
            .await
            .map_err(|e| TransferError::Storage(e.to_string()))
    }

    /// Consumes the stored verifier. The file is removed before the value is
    /// returned so a second take fails even when the exchange that follows
    /// does not succeed.
    pub async fn take() -> Result<String, TransferError> {
        let path = Self::verifier_path();
        let verifier = match async_fs::read_to_string(&path).await {
            Ok(v) if !v.is_empty() => v,
            Ok(_) => return Err(TransferError::MissingVerifier),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TransferError::MissingVerifier);
            }
            Err(e) => return Err(TransferError::Storage(e.to_string())),
        };

        let _ = async_fs::remove_file(&path).await;
        Ok(verifier)
    }

    /// Best-effort removal, used by logout.
    pub async fn clear() {
        let _ = async_fs::remove_file(Self::verifier_path()).await;
    }

    fn verifier_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("netify/state/verifier");
        path
    }
}
