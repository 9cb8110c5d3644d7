//! Spotify Library Follower
//!
//! This library scans a local music collection for the artists that appear most
//! often in the file tags, authenticates the user against Spotify through a
//! browser based authorization code flow and follows every frequent artist the
//! user does not follow yet.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints served by the local callback server
//! - `cli` - Command implementations and the follow orchestration
//! - `config` - Credential file loading and runtime settings
//! - `library` - Directory walking, tag reading and artist counting
//! - `server` - One-shot local HTTP server for the OAuth callback
//! - `spotify` - Spotify Web API client and authorization flow
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use spot::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spot::Res<()> {
//!     let credentials = config::load_credentials().await?;
//!     cli::import(&credentials, Path::new("."), 5, false).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod library;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. Module specific error enums
/// convert into it through `?`, which keeps the decision about how to exit
/// in `main`.
///
/// # Example
///
/// ```
/// use spot::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Scanning {} for audio files", dir.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Following '{}'", artist.name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing. Only the
/// top-level handler in `main` uses it; library code returns errors.
///
/// # Example
///
/// ```
/// error!("Import failed. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, like a file without readable tags or a
/// search that returned no matching candidate.
///
/// # Example
///
/// ```
/// warning!("{} contained no tags", path.display());
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
