use std::{fs::File, io::BufReader, path::Path};

use lofty::{prelude::*, probe::Probe};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("cannot open file: {0}")]
    Open(std::io::Error),
    #[error("cannot read tags: {0}")]
    Read(#[from] lofty::error::LoftyError),
}

/// Reads the artist field of an audio file.
///
/// The primary tag of the container is preferred, any other tag is used as a
/// fallback. Returns `Ok(None)` when the file carries no tag or the artist
/// field is absent or blank. Failing to open the file is reported as
/// [`TagError::Open`], everything the tag parser rejects as [`TagError::Read`].
pub fn read_artist(path: &Path) -> Result<Option<String>, TagError> {
    let file = File::open(path).map_err(TagError::Open)?;
    let tagged_file = Probe::new(BufReader::new(file))
        .guess_file_type()
        .map_err(TagError::Open)?
        .read()?;

    let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) else {
        return Ok(None);
    };

    Ok(tag
        .artist()
        .filter(|artist| !artist.trim().is_empty())
        .map(|artist| artist.into_owned()))
}
