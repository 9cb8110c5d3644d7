//! # Spotify Integration Module
//!
//! Talks to the Spotify accounts service and the Web API.
//!
//! ## Modules
//!
//! - [`auth`] - Authorization code flow: session state, authorization URL,
//!   browser launch, one-shot local callback and token exchange
//! - [`artists`] - Followed artists (cursor paging), artist search and follow
//!
//! [`SpotifyClient`] bundles an access token with the HTTP client and
//! implements [`ArtistCatalog`], the seam the follow orchestration is written
//! against. Every failed request is returned as an error; nothing is retried.
//!
//! ## Endpoints
//!
//! - `GET /authorize` and `POST /api/token` on the accounts service
//! - `GET /me/following?type=artist` - followed artists, 50 per page
//! - `GET /search?type=artist` - artist search
//! - `PUT /me/following?type=artist` - follow artists

pub mod artists;
pub mod auth;
mod client;

pub use client::{ArtistCatalog, SpotifyClient};
