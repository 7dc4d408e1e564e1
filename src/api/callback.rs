use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    management::VerifierManager,
    spotify,
    types::{AuthSession, PendingLogin},
    warning,
};

/// OAuth redirect handler.
///
/// Parses the query string before anything else: a provider-reported
/// `?error=` is a distinct failure from a missing `code`. The authorization
/// code is claimed exactly once via the `consumed` latch on the pending
/// login, then exchanged together with the persisted verifier. The verifier
/// is consumed regardless of whether the exchange succeeds; a failed login
/// always requires a fresh attempt.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingLogin>>>>,
) -> Html<&'static str> {
    if let Some(provider_error) = params.get("error") {
        warning!("Authorization denied by provider: {}", provider_error);
        return Html("<h4>Authorization was denied. You can close this window.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    // Claim the code exactly once, even if the redirect fires twice
    {
        let mut state = shared_state.lock().await;
        let Some(pending) = state.as_mut() else {
            return Html("<h4>No login attempt in progress.</h4>");
        };
        if pending.consumed {
            return Html("<h4>This login was already processed.</h4>");
        }
        pending.consumed = true;
    }

    // Single-use: the verifier is gone after this, success or not
    let verifier = match VerifierManager::take().await {
        Ok(v) => v,
        Err(e) => {
            warning!("{}", e);
            return Html("<h4>Missing PKCE code verifier. Please log in again.</h4>");
        }
    };

    let token = match spotify::auth::exchange_code(code, &verifier).await {
        Ok(token) => token,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return Html("<h4>Login failed.</h4>");
        }
    };

    let user = match spotify::profile::get_current_user(&token.access_token).await {
        Ok(user) => user,
        Err(e) => {
            warning!("Failed to fetch user profile: {}", e);
            return Html("<h4>Login failed.</h4>");
        }
    };

    let mut state = shared_state.lock().await;
    if let Some(pending) = state.as_mut() {
        pending.session = Some(AuthSession { token, user });
    }

    Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
}
