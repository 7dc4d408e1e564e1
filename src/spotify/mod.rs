//! # Spotify Integration Module
//!
//! This module covers everything Netify needs from Spotify directly: the
//! OAuth 2.0 PKCE authentication flow and the profile lookup that turns a
//! fresh access token into an authenticated session. Playlist creation,
//! catalog search and track insertion are deliberately not here; those run
//! server-side inside the Netify gateway's transfer job.
//!
//! ## Authentication Strategy
//!
//! The PKCE (Proof Key for Code Exchange) flow lets a public client
//! authenticate without a stored client secret:
//!
//! 1. **Code Verifier Generation**: a cryptographically random 128-character
//!    verifier is created and persisted to durable local storage
//! 2. **Challenge Creation**: the SHA256 challenge is derived from the verifier
//! 3. **Authorization Request**: the user's browser is sent to Spotify with
//!    the challenge attached
//! 4. **Local Callback**: a temporary HTTP server receives the authorization
//!    code and claims it exactly once
//! 5. **Token Exchange**: code + verifier are exchanged for an access token,
//!    consuming the verifier
//! 6. **Profile Lookup**: `GET /me` resolves the authenticated user identity
//! 7. **Session Persistence**: token and user are stored together for
//!    future runs
//!
//! An optional confidential-client variant routes the token exchange through
//! a trusted relay endpoint that injects the client secret server-side; the
//! secret never reaches this process.
//!
//! ## Error Handling
//!
//! Token endpoint rejections are parsed at the boundary and surfaced with the
//! provider's `error_description`. Authorization codes are single-use; a
//! failed exchange is never retried automatically, the user has to start a
//! fresh login.

pub mod auth;
pub mod profile;
