use std::path::PathBuf;

use chrono::Utc;

use crate::{
    error::TransferError,
    spotify,
    types::{AuthSession, SpotifyUser},
};

/// Owner of the authenticated session for the lifetime of the process.
///
/// Persists the access token together with the user identity to the local
/// data directory so a session survives across runs. The user is stored only
/// alongside a token; clearing removes both atomically.
pub struct SessionManager {
    session: AuthSession,
}

impl SessionManager {
    pub fn new(session: AuthSession) -> Self {
        SessionManager { session }
    }

    pub async fn load() -> Result<Self, TransferError> {
        let path = Self::session_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| TransferError::Storage(e.to_string()))?;
        let session: AuthSession =
            serde_json::from_str(&content).map_err(|e| TransferError::Storage(e.to_string()))?;
        Ok(Self { session })
    }

    pub async fn persist(&self) -> Result<(), TransferError> {
        let path = Self::session_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| TransferError::Storage(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(&self.session)
            .map_err(|e| TransferError::Storage(e.to_string()))?;
        async_fs::write(path, json)
            .await
            .map_err(|e| TransferError::Storage(e.to_string()))
    }

    /// Returns a usable access token, refreshing it first when it is close to
    /// expiry and a refresh token is available.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            if let Some(refresh) = self.session.token.refresh_token.clone() {
                if let Ok(mut new_token) = spotify::auth::refresh_token(&refresh).await {
                    // The provider may not rotate the refresh token
                    if new_token.refresh_token.is_none() {
                        new_token.refresh_token = Some(refresh);
                    }
                    self.session.token = new_token;
                    let _ = self.persist().await;
                }
            }
        }

        self.session.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.session.token.obtained_at + self.session.token.expires_in - 240
    }

    pub fn current_user(&self) -> &SpotifyUser {
        &self.session.user
    }

    /// Removes the persisted session and any leftover PKCE verifier. Purely
    /// local; no network call is made.
    pub async fn clear() -> Result<(), TransferError> {
        super::VerifierManager::clear().await;
        match async_fs::remove_file(Self::session_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TransferError::Storage(e.to_string())),
        }
    }

    fn session_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("netify/cache/session.json");
        path
    }
}
