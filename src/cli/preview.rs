use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, gateway, info,
    types::{PreviewTableRow, SourcePlaylist},
    warning,
};

/// Number of tracks shown by default; large playlists are cut off here
/// unless `--all` is passed.
const PREVIEW_LIMIT: usize = 20;

/// Resolves a source playlist and prints its preview without transferring.
pub async fn preview(url: String, all: bool) {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Resolving playlist...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let playlist = match gateway::resolver::resolve(&url).await {
        Ok(playlist) => {
            pb.finish_and_clear();
            playlist
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };

    render_preview(&playlist, all);
}

pub fn render_preview(playlist: &SourcePlaylist, all: bool) {
    info!("Playlist: {}", playlist.title);
    if let Some(cover) = &playlist.cover_url {
        info!("Cover: {}", cover);
    }
    // Totals always use the authoritative count, not the enumerated prefix
    info!("Tracks: {}", playlist.total_track_count);

    let limit = if all {
        playlist.tracks.len()
    } else {
        PREVIEW_LIMIT.min(playlist.tracks.len())
    };

    let rows: Vec<PreviewTableRow> = playlist
        .tracks
        .iter()
        .take(limit)
        .map(|t| PreviewTableRow {
            name: t.name.clone(),
            artist: t.artist.clone(),
        })
        .collect();

    if !rows.is_empty() {
        let table = Table::new(rows);
        println!("{}", table);
    }

    if (limit as u64) < playlist.total_track_count {
        warning!(
            "Showing {} of {} tracks.",
            limit,
            playlist.total_track_count
        );
    }
}
