use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;

use tokio::sync::Mutex;

use crate::{
    config, error,
    error::TransferError,
    management::{SessionManager, VerifierManager},
    server::start_api_server,
    success,
    types::{AuthSession, OAuthErrorResponse, PendingLogin, Token, TokenResponse},
    utils, warning,
};

/// Initiates the complete OAuth 2.0 PKCE authentication flow with Spotify.
///
/// This function orchestrates the entire login process:
/// 1. Generating the PKCE code verifier and challenge
/// 2. Persisting the verifier to durable storage (it must survive until the
///    callback consumes it, exactly once)
/// 3. Starting a local callback server
/// 4. Opening the authorization URL in the user's browser
/// 5. Waiting for the callback to exchange the code and resolve the profile
/// 6. Persisting the resulting session for future runs
///
/// # Arguments
///
/// * `shared_state` - Thread-safe shared state carrying the pending login
///   between the auth flow and the callback handler
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - Storage failures for the verifier or session terminate with an error;
///   without a persisted verifier the exchange cannot complete
/// - Authentication timeouts or failures terminate with an error message
pub async fn auth(shared_state: Arc<Mutex<Option<PendingLogin>>>) {
    // generate PKCE verifier and challenge
    let pkce = utils::generate_pkce_challenge();

    // the verifier must be durable before the user is redirected
    if let Err(e) = VerifierManager::persist(&pkce.verifier).await {
        error!("Failed to store PKCE verifier: {}", e);
    }

    // start API server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    // Construct the authorization URL
    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = &config::spotify_redirect_uri(),
        code_challenge = pkce.challenge,
        scope = &config::spotify_scope()
    );

    // Store the pending login before the redirect happens
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PendingLogin {
            consumed: false,
            session: None,
        });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    let session = wait_for_session(shared_state).await;

    match session {
        Some(s) => {
            let name = s
                .user
                .display_name
                .clone()
                .unwrap_or_else(|| s.user.id.clone());

            let session_manager = SessionManager::new(s);
            if let Err(e) = session_manager.persist().await {
                error!("Failed to save session to cache: {}", e);
            }

            success!("Authentication successful! Logged in as {}.", name);
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Waits for the OAuth callback to complete and produce a session.
///
/// Polls the shared state with a 120-second timeout. This runs concurrently
/// with the callback handler that populates the session after the code
/// exchange and profile lookup succeed.
async fn wait_for_session(shared_state: Arc<Mutex<Option<PendingLogin>>>) -> Option<AuthSession> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(120);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pending) = lock.as_ref() {
            if let Some(session) = &pending.session {
                return Some(session.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for an access token.
///
/// Dispatches to the public-client PKCE exchange against the provider's token
/// endpoint, or to the configured confidential-client relay when
/// `TOKEN_RELAY_URL` is set. Either way the code is single-use; the provider
/// rejects a second exchange and the caller must start a fresh login.
pub async fn exchange_code(code: &str, verifier: &str) -> Result<Token, TransferError> {
    match config::token_relay_url() {
        Some(relay) => exchange_code_relay(&relay, code).await,
        None => exchange_code_pkce(code, verifier).await,
    }
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// The code verifier proves that the same client that initiated the auth flow
/// is completing it. Non-2xx responses are parsed for the provider's error
/// description so the user sees why the exchange was rejected (reused code,
/// mismatched verifier, expired code).
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, TransferError> {
    let client_id = config::spotify_client_id();
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    parse_token_response(res).await
}

/// Exchanges the code via a trusted backend relay holding the client secret.
///
/// `POST <relay>/auth/token {code}` returns the same token payload as the
/// public endpoint; the secret is injected server-side and never reaches
/// this process.
async fn exchange_code_relay(relay_url: &str, code: &str) -> Result<Token, TransferError> {
    let client = Client::new();
    let res = client
        .post(format!("{}/auth/token", relay_url.trim_end_matches('/')))
        .json(&serde_json::json!({ "code": code }))
        .send()
        .await?;

    parse_token_response(res).await
}

/// Refreshes an expired access token using a refresh token.
///
/// Exchanges a refresh token for a new access token so the session keeps
/// working without sending the user back through the browser. The provider
/// may rotate the refresh token; when the response omits one the previous
/// value is kept by the caller.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, TransferError> {
    let client_id = config::spotify_client_id();

    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?;

    parse_token_response(res).await
}

/// Validates a token endpoint response at the boundary.
///
/// Rejections surface the provider's `error_description` (falling back to the
/// bare `error` code); malformed success payloads are rejected rather than
/// propagated half-parsed.
async fn parse_token_response(res: reqwest::Response) -> Result<Token, TransferError> {
    if !res.status().is_success() {
        let err: OAuthErrorResponse = res.json().await.unwrap_or(OAuthErrorResponse {
            error: None,
            error_description: None,
        });
        let description = err
            .error_description
            .or(err.error)
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(TransferError::AuthExchange(description));
    }

    let payload: TokenResponse = res
        .json()
        .await
        .map_err(|e| TransferError::AuthExchange(format!("malformed token payload: {}", e)))?;

    Ok(Token {
        access_token: payload.access_token,
        refresh_token: payload.refresh_token,
        scope: payload.scope,
        expires_in: payload.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
