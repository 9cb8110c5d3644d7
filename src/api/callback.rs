use std::sync::Arc;

use axum::{Extension, extract::Query, response::Html};
use serde::Deserialize;
use tokio::sync::{Mutex, Notify, oneshot};

use crate::{
    config::OAuthConfig,
    spotify::auth::{AuthError, exchange_code},
    types::Token,
    warning,
};

pub const SUCCESS_HTML: &str = include_str!("../../assets/success.html");
pub const ERROR_HTML: &str = include_str!("../../assets/error.html");

/// Query parameters Spotify appends to the redirect URI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// State shared with the callback handler for a single authorization attempt.
///
/// Holds the session state the redirect must echo and the sending half of the
/// channel the flow waits on. The sender is taken by the first request, so
/// later requests can never replace the established result.
pub struct CallbackState {
    session_state: String,
    oauth: OAuthConfig,
    outcome: Mutex<Option<oneshot::Sender<Result<Token, AuthError>>>>,
    shutdown: Arc<Notify>,
}

impl CallbackState {
    pub fn new(
        session_state: String,
        oauth: OAuthConfig,
        outcome: oneshot::Sender<Result<Token, AuthError>>,
    ) -> Self {
        CallbackState {
            session_state,
            oauth,
            outcome: Mutex::new(Some(outcome)),
            shutdown: Arc::new(Notify::new()),
        }
    }

    pub fn session_state(&self) -> &str {
        &self.session_state
    }

    /// Takes the result sender. Returns `None` once a request has claimed it.
    pub async fn claim(&self) -> Option<oneshot::Sender<Result<Token, AuthError>>> {
        self.outcome.lock().await.take()
    }

    pub fn shutdown_signal(&self) -> Arc<Notify> {
        Arc::clone(&self.shutdown)
    }

    /// Asks the server to stop from a separate task so the response that is
    /// being written is not held up by the shutdown.
    pub fn request_shutdown(&self) {
        let shutdown = Arc::clone(&self.shutdown);
        tokio::spawn(async move {
            shutdown.notify_one();
        });
    }
}

/// Validates the redirect parameters against the expected session state and
/// returns the authorization code.
pub fn verify_callback(params: &CallbackParams, expected_state: &str) -> Result<String, AuthError> {
    if params.state.as_deref() != Some(expected_state) {
        return Err(AuthError::StateMismatch);
    }

    if let Some(reason) = &params.error {
        return Err(AuthError::Denied(reason.clone()));
    }

    params
        .code
        .as_ref()
        .filter(|code| !code.is_empty())
        .cloned()
        .ok_or(AuthError::MissingCode)
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(shared_state): Extension<Arc<CallbackState>>,
) -> Html<&'static str> {
    let Some(outcome) = shared_state.claim().await else {
        warning!("Ignoring repeated authorization callback.");
        return Html(ERROR_HTML);
    };

    let result = match verify_callback(&params, shared_state.session_state()) {
        Ok(code) => exchange_code(&shared_state.oauth, &code)
            .await
            .map_err(AuthError::from),
        Err(e) => Err(e),
    };

    let page = match &result {
        Ok(_) => SUCCESS_HTML,
        Err(e) => {
            warning!("Authorization failed: {}", e);
            ERROR_HTML
        }
    };

    // The receiver only disappears when the flow itself is gone.
    let _ = outcome.send(result);
    shared_state.request_shutdown();

    Html(page)
}
