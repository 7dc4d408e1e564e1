//! # Gateway Client Module
//!
//! HTTP client for the Netify gateway, the backend service that fronts the
//! NetEase catalog and performs the heavy lifting of a transfer. Two
//! endpoints are consumed, neither is owned by this crate:
//!
//! - `GET /playlist-info?url=...` - resolves a source playlist into a
//!   normalized preview (title, cover, ordered track list, authoritative
//!   total count). Implemented in [`resolver`].
//! - `POST /transfer` - creates the destination playlist, fuzzy-matches every
//!   track against the Spotify catalog, inserts matches in batches of ~300
//!   and applies the cover image, all server-side in one long round trip.
//!   Implemented in [`transfer`].
//!
//! ## Status Mapping
//!
//! The transfer endpoint's failure statuses are mapped to the error taxonomy
//! at this boundary: 401 means the Spotify token died mid-job, 502 means the
//! gateway buckled under load or playlist size, anything else non-2xx is a
//! generic gateway failure carrying the status and body. Response payloads
//! are parsed into explicit schemas; malformed bodies become typed errors
//! instead of propagating partial data.

pub mod resolver;
pub mod transfer;
