use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers::{sample_user, session_cookie_header, test_app_state, valid_session};

#[tokio::test]
async fn healthz_needs_no_session() {
    let resp = app(test_app_state())
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_path_redirects_anonymous_to_login() {
    let resp = app(test_app_state())
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[header::LOCATION], LOGIN_PATH);
}

#[tokio::test]
async fn unknown_path_is_404_when_signed_in() {
    let cookie = session_cookie_header(&valid_session(&sample_user()));
    let resp = app(test_app_state())
        .oneshot(
            Request::get("/nope")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assets_are_served_outside_the_guard() {
    let resp = app(test_app_state())
        .oneshot(Request::get("/assets/app.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
