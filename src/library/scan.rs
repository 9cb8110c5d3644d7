use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{
    Res,
    library::{TagError, read_artist},
    utils, warning,
};

/// Outcome of walking a music directory.
#[derive(Debug, Clone, Default)]
pub struct LibraryScan {
    /// One entry per audio file with a usable artist tag, in walk order.
    pub artists: Vec<String>,
    /// Audio files that were opened.
    pub audio_files: usize,
    /// Audio files whose tags could not be parsed.
    pub unreadable: Vec<PathBuf>,
}

/// Recursively scans `dir` and collects artist names from audio file tags.
///
/// Only `.mp3` and `.m4a` files are opened. A file whose tags cannot be
/// parsed produces a warning and is skipped. Any error while walking the
/// directory tree, or an audio file that cannot be opened at all, aborts the
/// scan.
pub fn scan(dir: &Path) -> Res<LibraryScan> {
    let pb = utils::spinner(format!("Scanning {}...", dir.display()));
    let mut result = LibraryScan::default();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        };

        if !entry.file_type().is_file() || !utils::is_audio_file(entry.path()) {
            continue;
        }

        result.audio_files += 1;
        match read_artist(entry.path()) {
            Ok(Some(artist)) => result.artists.push(artist),
            Ok(None) => {}
            Err(TagError::Open(e)) => {
                pb.finish_and_clear();
                return Err(format!("cannot open {}: {}", entry.path().display(), e).into());
            }
            Err(e) => {
                pb.suspend(|| warning!("{} contained no tags ({})", entry.path().display(), e));
                result.unreadable.push(entry.path().to_path_buf());
            }
        }

        if result.audio_files % 50 == 0 {
            pb.set_message(format!("Scanned {} audio files...", result.audio_files));
        }
    }

    pb.finish_and_clear();
    Ok(result)
}
