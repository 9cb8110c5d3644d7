use std::path::Path;

use tabled::Table;

use crate::{Res, info, library, library::FrequencyTable, types::ArtistCountRow, warning};

/// Prints the artists of `dir` that appear in at least `threshold` tracks,
/// without contacting Spotify.
pub fn list_artists(dir: &Path, threshold: usize) -> Res<()> {
    let scan = library::scan(dir)?;
    let table = FrequencyTable::from_names(scan.artists);

    let rows: Vec<ArtistCountRow> = table
        .eligible(threshold)
        .into_iter()
        .map(|(artist, tracks)| ArtistCountRow {
            artist: artist.to_string(),
            tracks,
        })
        .collect();

    if rows.is_empty() {
        warning!("No artist appears in {} or more tracks.", threshold);
    } else {
        println!("{}", Table::new(rows));
    }

    info!(
        "{} audio files, {} distinct artists, {} unreadable.",
        scan.audio_files,
        table.len(),
        scan.unreadable.len()
    );
    Ok(())
}
