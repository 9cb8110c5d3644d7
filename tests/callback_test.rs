use std::collections::HashMap;

use axum::{
    Form, Json, Router,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::oneshot};

use spot::{
    api::{CallbackParams, CallbackState, ERROR_HTML, SUCCESS_HTML, verify_callback},
    config::{Credentials, OAuthConfig, SCOPES},
    spotify::auth::{AuthError, await_callback},
};

const SESSION_STATE: &str = "0123456789abcdef";

async fn token_endpoint(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
    let basic = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Basic "));

    if !basic
        || form.get("grant_type").map(String::as_str) != Some("authorization_code")
        || form.get("code").map(String::as_str) != Some("good-code")
    {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid_grant" })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "access_token": "access-123",
            "token_type": "Bearer",
            "scope": "user-read-private user-follow-read user-follow-modify",
            "expires_in": 3600,
            "refresh_token": "refresh-456"
        })),
    )
}

async fn spawn_token_endpoint() -> String {
    let app = Router::new().route("/api/token", post(token_endpoint));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/token")
}

fn oauth(token_url: String, redirect_uri: String) -> OAuthConfig {
    OAuthConfig {
        credentials: Credentials {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
        },
        authorize_url: "https://accounts.example.com/authorize".to_string(),
        token_url,
        redirect_uri,
        scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
    }
}

/// Binds a callback listener and runs the flow on it in the background.
async fn start_flow(
    token_url: String,
) -> (String, tokio::task::JoinHandle<spot::Res<spot::types::Token>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let config = oauth(token_url, format!("{base}/callback"));
    let flow = tokio::spawn(async move {
        await_callback(listener, SESSION_STATE.to_string(), &config).await
    });
    (base, flow)
}

fn auth_error<'a>(err: &'a (dyn std::error::Error + Send + Sync + 'static)) -> &'a AuthError {
    err.downcast_ref::<AuthError>()
        .expect("flow should fail with an AuthError")
}

#[tokio::test]
async fn test_successful_callback_yields_token_and_stops_server() {
    let token_url = spawn_token_endpoint().await;
    let (base, flow) = start_flow(token_url).await;

    let body = reqwest::get(format!(
        "{base}/callback?code=good-code&state={SESSION_STATE}"
    ))
    .await
    .unwrap()
    .text()
    .await
    .unwrap();
    assert_eq!(body, SUCCESS_HTML);

    let token = flow.await.unwrap().unwrap();
    assert_eq!(token.access_token, "access-123");
    assert_eq!(token.refresh_token.as_deref(), Some("refresh-456"));
    assert_eq!(token.expires_in, 3600);
    assert!(token.obtained_at > 0);
    assert!(token.expires_at().is_some());

    // the listener is gone once the flow returned
    assert!(reqwest::get(format!("{base}/health")).await.is_err());
}

#[tokio::test]
async fn test_state_mismatch_is_rejected() {
    let token_url = spawn_token_endpoint().await;
    let (base, flow) = start_flow(token_url).await;

    let body = reqwest::get(format!("{base}/callback?code=good-code&state=forged"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, ERROR_HTML);

    let err = flow.await.unwrap().unwrap_err();
    assert!(matches!(auth_error(err.as_ref()), AuthError::StateMismatch));
}

#[tokio::test]
async fn test_failed_exchange_renders_error_and_stops_server() {
    let token_url = spawn_token_endpoint().await;
    let (base, flow) = start_flow(token_url).await;

    let body = reqwest::get(format!(
        "{base}/callback?code=expired-code&state={SESSION_STATE}"
    ))
    .await
    .unwrap()
    .text()
    .await
    .unwrap();
    assert_eq!(body, ERROR_HTML);

    let err = flow.await.unwrap().unwrap_err();
    assert!(matches!(auth_error(err.as_ref()), AuthError::Exchange(_)));
    assert!(reqwest::get(format!("{base}/health")).await.is_err());
}

#[tokio::test]
async fn test_denied_authorization() {
    let token_url = spawn_token_endpoint().await;
    let (base, flow) = start_flow(token_url).await;

    let body = reqwest::get(format!(
        "{base}/callback?error=access_denied&state={SESSION_STATE}"
    ))
    .await
    .unwrap()
    .text()
    .await
    .unwrap();
    assert_eq!(body, ERROR_HTML);

    let err = flow.await.unwrap().unwrap_err();
    assert!(matches!(auth_error(err.as_ref()), AuthError::Denied(reason) if reason == "access_denied"));
}

#[tokio::test]
async fn test_health_while_waiting() {
    let token_url = spawn_token_endpoint().await;
    let (base, flow) = start_flow(token_url).await;

    let health: serde_json::Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
    assert!(!flow.is_finished());

    reqwest::get(format!("{base}/callback?code=good-code&state={SESSION_STATE}"))
        .await
        .unwrap();
    assert!(flow.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_callback_state_is_claimed_once() {
    let (tx, mut rx) = oneshot::channel();
    let state = CallbackState::new(
        SESSION_STATE.to_string(),
        oauth("http://127.0.0.1:9/api/token".to_string(), "http://127.0.0.1:9/callback".to_string()),
        tx,
    );

    let first = state.claim().await;
    assert!(first.is_some());
    assert!(state.claim().await.is_none());

    // nothing was sent yet, and only the first claimant can send
    assert!(rx.try_recv().is_err());
    let _ = first.unwrap().send(Err(AuthError::MissingCode));
    assert!(matches!(rx.await.unwrap(), Err(AuthError::MissingCode)));
}

#[test]
fn test_verify_callback() {
    let params = |code: Option<&str>, state: Option<&str>| CallbackParams {
        code: code.map(str::to_string),
        state: state.map(str::to_string),
        error: None,
    };

    assert_eq!(
        verify_callback(&params(Some("abc"), Some(SESSION_STATE)), SESSION_STATE).unwrap(),
        "abc"
    );

    for echoed in [
        Some("0123456789abcdeF"), // same length, one byte differs
        Some("0123456789abcde"),  // prefix
        Some("0123456789abcdef0"),
        Some(""),
        None,
    ] {
        assert!(matches!(
            verify_callback(&params(Some("abc"), echoed), SESSION_STATE),
            Err(AuthError::StateMismatch)
        ));
    }

    assert!(matches!(
        verify_callback(&params(None, Some(SESSION_STATE)), SESSION_STATE),
        Err(AuthError::MissingCode)
    ));
    assert!(matches!(
        verify_callback(&params(Some(""), Some(SESSION_STATE)), SESSION_STATE),
        Err(AuthError::MissingCode)
    ));
}

#[test]
fn test_state_is_checked_before_error() {
    let params = CallbackParams {
        code: None,
        state: Some("forged".to_string()),
        error: Some("access_denied".to_string()),
    };

    assert!(matches!(
        verify_callback(&params, SESSION_STATE),
        Err(AuthError::StateMismatch)
    ));
}
