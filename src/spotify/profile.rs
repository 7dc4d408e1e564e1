use reqwest::{Client, StatusCode};

use crate::{config, error::TransferError, types::SpotifyUser};

/// Fetches the authenticated user's profile via `GET /me`.
///
/// Completes the login by binding the fresh access token to a user identity.
/// A 401 means the token is already invalid and the session must not be
/// created.
pub async fn get_current_user(token: &str) -> Result<SpotifyUser, TransferError> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    if response.status() == StatusCode::UNAUTHORIZED {
        return Err(TransferError::AuthExpired);
    }
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(TransferError::Gateway(status, body));
    }

    let user = response.json::<SpotifyUser>().await?;
    Ok(user)
}
