//! # API Module
//!
//! HTTP endpoints of the short-lived local server that receives the OAuth
//! redirect from Spotify.
//!
//! - [`callback`] - Accepts the authorization redirect, checks the echoed
//!   session state, exchanges the code for a token and reports the outcome
//!   through a one-shot channel. Only the first request is serviced.
//! - [`health`] - Returns status and version as JSON.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spot::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::{CallbackParams, CallbackState, ERROR_HTML, SUCCESS_HTML, callback, verify_callback};
pub use health::health;
