//! # CLI Module
//!
//! User-facing command implementations for Netify. Each command coordinates
//! the underlying authentication, gateway and management modules while
//! handling progress feedback and error presentation.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify OAuth 2.0 PKCE login flow
//! - [`logout`] - Clears the stored session and any pending PKCE verifier
//! - [`preview`] - Resolves a source playlist and displays its metadata
//! - [`transfer`] - Runs the full playlist transfer job with live progress
//!
//! ## Design Notes
//!
//! Commands never let transfer failures escape as raw errors; the
//! orchestrator folds everything into a final outcome which is rendered the
//! same way on success and failure. Long operations show indicatif spinners
//! or a progress bar; results are printed as tabled tables with colored
//! status markers. Only one transfer runs per invocation by construction.
//! That is a client-side convenience only; the gateway is not protected
//! against duplicate submissions from separate processes.

mod auth;
mod logout;
mod preview;
mod transfer;

pub use auth::auth;
pub use logout::logout;
pub use preview::preview;
pub use transfer::transfer;
