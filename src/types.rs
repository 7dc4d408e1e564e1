use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// PKCE verifier/challenge pair. The verifier stays client-side; only the
/// challenge is sent with the authorization request.
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    pub verifier: String,
    pub challenge: String,
}

/// Shared state between the auth flow and the callback handler. `consumed`
/// latches once the first callback claims the authorization code; the
/// verifier itself lives in durable storage, not here.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub consumed: bool,
    pub session: Option<AuthSession>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub images: Vec<UserImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: Token,
    pub user: SpotifyUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceTrack {
    pub name: String,
    pub artist: String,
}

/// Resolved preview of the source playlist. `tracks` may be a prefix of the
/// true list for very large playlists; `total_track_count` is authoritative.
#[derive(Debug, Clone)]
pub struct SourcePlaylist {
    pub title: String,
    pub cover_url: Option<String>,
    pub tracks: Vec<SourceTrack>,
    pub total_track_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistInfoResponse {
    pub playlist_title: String,
    pub cover_url: Option<String>,
    pub tracks: Vec<SourceTrack>,
    pub total_tracks_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferRequestBody {
    pub url: String,
    pub spotify_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    pub batch_number: u32,
    pub total_tracks: u64,
    pub matched_tracks: u64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferResponse {
    pub playlist_url: Option<String>,
    #[serde(default)]
    pub missing: Vec<String>,
    pub total_tracks: Option<u64>,
    pub total_transferred: Option<u64>,
    pub batch_results: Option<Vec<BatchStats>>,
    pub completed_batches: Option<u32>,
    pub processed_batches: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackStatus {
    Success,
    Failed,
}

impl std::fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackStatus::Success => write!(f, "success"),
            TrackStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackResult {
    pub name: String,
    pub artist: String,
    pub status: TrackStatus,
}

/// Final report of a transfer job. `track_results` may be a partial view when
/// the source listing itself was partial; `total_found`/`total_transferred`
/// always reflect the full job.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub success: bool,
    pub message: String,
    pub playlist_url: Option<String>,
    pub playlist_name: String,
    pub track_results: Vec<TrackResult>,
    pub total_found: u64,
    pub total_transferred: u64,
    pub batch_details: Option<Vec<BatchStats>>,
}

impl TransferOutcome {
    /// Terminal failure outcome. Preview-derived fields stay empty; the
    /// message carries the user-facing explanation.
    pub fn failed(message: String) -> Self {
        TransferOutcome {
            success: false,
            message,
            playlist_url: None,
            playlist_name: String::new(),
            track_results: Vec::new(),
            total_found: 0,
            total_transferred: 0,
            batch_details: None,
        }
    }
}

#[derive(Tabled)]
pub struct PreviewTableRow {
    pub name: String,
    pub artist: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artist: String,
    pub status: String,
}

#[derive(Tabled)]
pub struct BatchTableRow {
    pub batch: u32,
    pub tracks: u64,
    pub matched: u64,
    pub rate: String,
}
