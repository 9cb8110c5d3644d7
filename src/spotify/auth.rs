use std::sync::Arc;

use chrono::Utc;
use reqwest::{Client, Url};
use thiserror::Error;
use tokio::{net::TcpListener, sync::oneshot};

use crate::{
    Res,
    api::CallbackState,
    config::OAuthConfig,
    info, server,
    types::{Token, TokenResponse},
    utils, warning,
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("session state of the callback does not match the authorization request")]
    StateMismatch,
    #[error("callback did not carry an authorization code")]
    MissingCode,
    #[error("authorization was denied: {0}")]
    Denied(String),
    #[error("token exchange failed: {0}")]
    Exchange(#[from] reqwest::Error),
    #[error("callback server stopped without receiving a callback")]
    NoCallback,
}

/// Runs the complete authorization code flow and returns the access token.
///
/// The flow moves through these steps:
/// 1. A fresh random session state is generated
/// 2. The authorization URL is built and the callback listener is bound
/// 3. The URL is opened in the default browser (and printed, in case that fails)
/// 4. The call blocks until exactly one redirect reaches the callback path
/// 5. The code is exchanged for a token and the listener shuts down
///
/// There is no timeout. If the browser never redirects, this never returns.
///
/// # Errors
///
/// Fails if the listener cannot be bound, the echoed state does not match,
/// the user denied access, or the token exchange failed.
pub async fn authorize(oauth: &OAuthConfig, server_addr: &str) -> Res<Token> {
    let session_state = utils::generate_state();
    let auth_url = authorize_url(oauth, &session_state)?;

    let listener = TcpListener::bind(server_addr)
        .await
        .map_err(|e| format!("Cannot bind callback server to {server_addr}: {e}"))?;

    info!(
        "Logging in to Spotify. If your browser doesn't open, please navigate to the following URL:\n{}",
        auth_url
    );
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!("Failed to open browser. Please open the URL above manually.");
    }

    await_callback(listener, session_state, oauth).await
}

/// Serves a single authorization callback on an already bound listener.
///
/// The handler reports its result through a one-shot channel and stops the
/// server. This function returns once the server has shut down.
pub async fn await_callback(
    listener: TcpListener,
    session_state: String,
    oauth: &OAuthConfig,
) -> Res<Token> {
    let path = callback_path(&oauth.redirect_uri)?;
    let (tx, rx) = oneshot::channel();
    let state = Arc::new(CallbackState::new(session_state, oauth.clone(), tx));

    server::serve_callback(listener, &path, state).await?;

    match rx.await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AuthError::NoCallback.into()),
    }
}

/// Builds the URL the user is sent to for granting access.
pub fn authorize_url(oauth: &OAuthConfig, session_state: &str) -> Res<Url> {
    let scope = oauth.scopes.join(" ");
    let url = Url::parse_with_params(
        &oauth.authorize_url,
        &[
            ("client_id", oauth.credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", oauth.redirect_uri.as_str()),
            ("state", session_state),
            ("scope", scope.as_str()),
        ],
    )?;
    Ok(url)
}

/// Path component of the redirect URI, the route the callback is served on.
pub fn callback_path(redirect_uri: &str) -> Res<String> {
    let url = Url::parse(redirect_uri)
        .map_err(|e| format!("Invalid redirect URI '{redirect_uri}': {e}"))?;
    Ok(url.path().to_string())
}

/// Exchanges an authorization code for an access token.
///
/// Authenticates with the client id and secret over HTTP basic auth, as the
/// authorization code grant requires for confidential clients.
pub async fn exchange_code(oauth: &OAuthConfig, code: &str) -> Result<Token, reqwest::Error> {
    let client = Client::new();
    let res = client
        .post(&oauth.token_url)
        .basic_auth(
            &oauth.credentials.client_id,
            Some(&oauth.credentials.client_secret),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", oauth.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let body: TokenResponse = res.json().await?;

    Ok(Token {
        access_token: body.access_token,
        token_type: body.token_type,
        scope: body.scope,
        expires_in: body.expires_in,
        refresh_token: body.refresh_token,
        obtained_at: u64::try_from(Utc::now().timestamp()).unwrap_or_default(),
    })
}
