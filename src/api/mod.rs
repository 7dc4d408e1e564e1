//! # API Module
//!
//! HTTP endpoints for the temporary local server Netify runs during login.
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles the OAuth redirect from Spotify's authorization
//!   server. Completes the PKCE flow by exchanging the authorization code for
//!   an access token and resolving the user profile. The handler latches on
//!   the first invocation so a duplicated redirect cannot consume the code
//!   twice, and it distinguishes a provider-reported error from a missing
//!   code parameter.
//! - [`health`] - Health check returning application status and version.
//!
//! The server exists only for the duration of the auth flow; it is built with
//! [Axum](https://docs.rs/axum) and wired up in [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
