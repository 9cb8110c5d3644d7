use std::{path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;

/// Number of random bytes behind a session state value.
pub const STATE_BYTES: usize = 16;

/// Audio container extensions that are opened for tag reading.
pub const AUDIO_EXTENSIONS: [&str; 2] = ["mp3", "m4a"];

/// Generates a fresh, hex encoded session state for one authorization attempt.
pub fn generate_state() -> String {
    let mut bytes = [0u8; STATE_BYTES];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

pub fn contains_ignore_case<S: AsRef<str>>(list: &[S], check: &str) -> bool {
    list.iter().any(|l| eq_ignore_case(l.as_ref(), check))
}

/// Unicode aware case-insensitive equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
