//! # Library Module
//!
//! Everything that happens on the local disk before Spotify is contacted:
//!
//! - [`scan`] walks a directory tree and collects the artist tag of every
//!   `.mp3` and `.m4a` file it finds
//! - [`read_artist`] reads the artist of a single file
//! - [`FrequencyTable`] counts how often each artist name occurs
//!
//! Counting uses exact string equality. `"Air"` and `"AIR"` are two entries.

mod frequency;
mod scan;
mod tags;

pub use frequency::FrequencyTable;
pub use scan::{LibraryScan, scan};
pub use tags::{TagError, read_artist};
