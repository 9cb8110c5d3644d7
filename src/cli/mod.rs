//! # CLI Module
//!
//! Command implementations behind the `spot` binary.
//!
//! - [`import`] - Scan, count, authorize, then follow every frequent artist
//!   that is not followed yet
//! - [`list_artists`] - Scan and count only, printed as a table
//!
//! [`follow_missing_artists`] holds the follow decisions and is generic over
//! [`crate::spotify::ArtistCatalog`], so it runs the same against Spotify or
//! a stand-in.
//!
//! ```bash
//! spot scan --dir ~/Music --threshold 3
//! spot import --dir ~/Music --threshold 5 --dry-run
//! spot import -d ~/Music -t 5
//! ```

mod import;
mod scan;

pub use import::FollowOptions;
pub use import::follow_missing_artists;
pub use import::frequent_artists;
pub use import::import;
pub use import::select_candidates;
pub use scan::list_artists;
