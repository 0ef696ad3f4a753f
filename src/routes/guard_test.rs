use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use super::*;
use crate::routes::app;
use crate::session::Session;
use crate::state::test_helpers::{
    TEST_SECRET, mint_token, raw_cookie_header, sample_user, session_cookie_header, test_app_state, valid_session,
};

fn get(path: &str, cookie: Option<String>) -> Request<Body> {
    let mut req = Request::get(path);
    if let Some(c) = cookie {
        req = req.header(header::COOKIE, c);
    }
    req.body(Body::empty()).unwrap()
}

fn location(resp: &axum::response::Response) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

// =============================================================================
// decide
// =============================================================================

#[test]
fn public_path_skips_session_check() {
    let decision = decide(LOGIN_PATH, || panic!("session must not be checked"));
    assert_eq!(decision, GuardDecision::Allow);
}

#[test]
fn login_allowed_even_with_session() {
    assert_eq!(decide(LOGIN_PATH, || true), GuardDecision::Allow);
}

#[test]
fn invalid_session_redirects_to_login() {
    assert_eq!(decide("/painel", || false), GuardDecision::Redirect(LOGIN_PATH));
    assert_eq!(decide(ROOT_PATH, || false), GuardDecision::Redirect(LOGIN_PATH));
    assert_eq!(decide("/anything", || false), GuardDecision::Redirect(LOGIN_PATH));
}

#[test]
fn root_with_session_goes_to_dashboard() {
    assert_eq!(decide(ROOT_PATH, || true), GuardDecision::Redirect(DASHBOARD_PATH));
}

#[test]
fn other_paths_with_session_pass() {
    assert_eq!(decide("/painel/membros", || true), GuardDecision::Allow);
}

#[test]
fn only_login_is_public() {
    assert!(is_public_path("/login"));
    assert!(!is_public_path("/login/"));
    assert!(!is_public_path("/painel"));
}

// =============================================================================
// verify_session
// =============================================================================

#[test]
fn verify_session_accepts_fresh_token() {
    let state = test_app_state();
    let session = valid_session(&sample_user());
    let jar = CookieJar::new().add(store::create(&state.config, &session).unwrap());
    let verified = verify_session(&state, &jar).unwrap();
    assert_eq!(verified.session, session);
    assert!(verified.expires_at > OffsetDateTime::now_utc());
}

#[test]
fn verify_session_rejects_foreign_signature() {
    let state = test_app_state();
    let session = Session { access_token: mint_token(&sample_user(), 3600, "other-secret"), user: sample_user() };
    let jar = CookieJar::new().add(store::create(&state.config, &session).unwrap());
    assert!(verify_session(&state, &jar).is_none());
}

#[test]
fn verify_session_without_cookie_is_none() {
    assert!(verify_session(&test_app_state(), &CookieJar::new()).is_none());
}

// =============================================================================
// require_session middleware
// =============================================================================

#[tokio::test]
async fn dashboard_without_cookie_redirects_to_login() {
    let resp = app(test_app_state())
        .oneshot(get("/painel", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/login"));
}

#[tokio::test]
async fn root_with_valid_cookie_redirects_to_dashboard() {
    let cookie = session_cookie_header(&valid_session(&sample_user()));
    let resp = app(test_app_state())
        .oneshot(get("/", Some(cookie)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/painel"));
}

#[tokio::test]
async fn root_without_cookie_redirects_to_login() {
    let resp = app(test_app_state())
        .oneshot(get("/", None))
        .await
        .unwrap();
    assert_eq!(location(&resp), Some("/login"));
}

#[tokio::test]
async fn garbage_cookie_redirects_to_login() {
    let resp = app(test_app_state())
        .oneshot(get("/painel", Some(raw_cookie_header("not json at all"))))
        .await
        .unwrap();
    assert_eq!(location(&resp), Some("/login"));
}

#[tokio::test]
async fn expired_token_redirects_to_login() {
    let user = sample_user();
    let session = Session { access_token: mint_token(&user, -60, TEST_SECRET), user };
    let resp = app(test_app_state())
        .oneshot(get("/painel", Some(session_cookie_header(&session))))
        .await
        .unwrap();
    assert_eq!(location(&resp), Some("/login"));
}

#[tokio::test]
async fn login_page_reachable_without_cookie() {
    let resp = app(test_app_state())
        .oneshot(get("/login", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn valid_cookie_reaches_dashboard() {
    let cookie = session_cookie_header(&valid_session(&sample_user()));
    let resp = app(test_app_state())
        .oneshot(get("/painel", Some(cookie)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
