//! Integration tests for the Authentication API

use super::*;
use auth0_client::{
    AuthenticationApiClient, AuthenticationRequest, ExchangeCodeRequest,
    IdTokenDelegationRequest, UsernamePasswordLoginRequest,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

const CLIENT_ID: &str = "client-id";
const CLIENT_SECRET: &str = "client-secret";
const CONNECTION: &str = "Username-Password-Authentication";

fn password_request(scope: &str) -> AuthenticationRequest {
    AuthenticationRequest::new(CLIENT_ID, "u@example.com", "password")
        .with_client_secret(CLIENT_SECRET)
        .with_connection(CONNECTION)
        .with_scope(scope)
}

/// Mirrors the service: tokens are issued according to the requested scope.
fn token_response(scope: &str) -> ResponseTemplate {
    let mut body = json!({
        "access_token": "access-token",
        "token_type": "bearer",
        "expires_in": 86400
    });
    if scope.split_whitespace().any(|s| s == "openid") {
        body["id_token"] = json!("eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiJ1In0.c2ln");
    }
    if scope.split_whitespace().any(|s| s == "offline_access") {
        body["refresh_token"] = json!("refresh-token");
    }
    success_response(body)
}

#[test_case("openid", false ; "openid only")]
#[test_case("openid offline_access", true ; "openid with offline access")]
#[tokio::test]
async fn test_password_grant_refresh_token_follows_scope(scope: &str, expect_refresh: bool) {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/oauth/ro"))
        .and(header_exists("Auth0-Client"))
        .and(body_partial_json(json!({
            "grant_type": "password",
            "client_id": CLIENT_ID,
            "connection": CONNECTION,
            "scope": scope
        })))
        .respond_with(token_response(scope))
        .expect(1)
        .mount(&server)
        .await;

    let response = assert_ok!(
        authentication_client(&server)
            .authenticate(password_request(scope))
            .await
    );

    assert_eq!(response.access_token, "access-token");
    assert!(response.id_token.is_some());
    assert_eq!(response.refresh_token.is_some(), expect_refresh);
}

#[tokio::test]
async fn test_password_grant_against_default_directory() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_partial_json(json!({ "grant_type": "password" })))
        .respond_with(token_response("openid"))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = password_request("openid");
    request.connection = None;

    let response = assert_ok!(authentication_client(&server).authenticate(request).await);
    assert!(response.id_token.is_some());

    let received = server.received_requests().await.unwrap_or_default();
    let body: serde_json::Value = received[0].body_json().unwrap();
    assert!(body.get("connection").is_none());
}

#[tokio::test]
async fn test_password_grant_without_default_directory_fails() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(oauth_error(
            500,
            "server_error",
            "Authorization server not configured with default connection.",
        ))
        .mount(&server)
        .await;

    let mut request = password_request("openid");
    request.connection = None;

    let err = assert_err!(authentication_client(&server).authenticate(request).await);

    assert!(err.is_authentication());
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.remote_error_code(), Some("server_error"));
}

#[tokio::test]
async fn test_invalid_authorization_code() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_partial_json(json!({
            "grant_type": "authorization_code",
            "code": "invalid-code"
        })))
        .respond_with(oauth_error(403, "invalid_grant", "Invalid authorization code"))
        .mount(&server)
        .await;

    let err = assert_err!(
        authentication_client(&server)
            .exchange_code_for_access_token(ExchangeCodeRequest::new(
                CLIENT_ID,
                CLIENT_SECRET,
                "http://www.blah.com/test",
                "invalid-code",
            ))
            .await
    );

    assert!(err.is_authentication());
    let code = err.remote_error_code().unwrap_or_default();
    assert!(!code.is_empty());
    assert_eq!(code, "invalid_grant");
}

#[tokio::test]
async fn test_error_without_body_still_carries_a_code() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = assert_err!(
        authentication_client(&server)
            .exchange_code_for_access_token(ExchangeCodeRequest::new(
                CLIENT_ID,
                CLIENT_SECRET,
                "http://www.blah.com/test",
                "code",
            ))
            .await
    );

    assert!(err.is_authentication());
    assert!(!err.remote_error_code().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_delegation_with_invalid_id_token() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/delegation"))
        .and(body_partial_json(json!({
            "grant_type": "urn:ietf:params:oauth:grant-type:jwt-bearer",
            "id_token": "not-a-token"
        })))
        .respond_with(oauth_error(401, "invalid_token", "jwt malformed"))
        .mount(&server)
        .await;

    let err = assert_err!(
        authentication_client(&server)
            .get_delegation_token(IdTokenDelegationRequest::new(
                CLIENT_ID,
                "target-client",
                "not-a-token",
            ))
            .await
    );

    assert!(err.is_authentication());
    assert_eq!(err.remote_error_code(), Some("invalid_token"));
}

#[tokio::test]
async fn test_authenticate_then_delegate() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/oauth/ro"))
        .respond_with(token_response("openid"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/delegation"))
        .and(body_partial_json(json!({
            "id_token": "eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiJ1In0.c2ln",
            "target": "target-client"
        })))
        .respond_with(success_response(json!({
            "id_token": "delegated-token",
            "token_type": "Bearer",
            "expires_in": 36000
        })))
        .mount(&server)
        .await;

    let client = authentication_client(&server);
    let tokens = assert_ok!(client.authenticate(password_request("openid")).await);
    let id_token = tokens.id_token.unwrap_or_default();

    let delegated = assert_ok!(
        client
            .get_delegation_token(IdTokenDelegationRequest::new(
                CLIENT_ID,
                "target-client",
                id_token,
            ))
            .await
    );

    assert_eq!(delegated.id_token, "delegated-token");
}

#[tokio::test]
async fn test_user_info() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header("Authorization", "Bearer access-token"))
        .respond_with(success_response(json!({
            "sub": "auth0|123",
            "email": "u@example.com",
            "email_verified": true,
            "updated_at": "2016-02-23T19:57:29.532Z",
            "https://example.com/roles": ["admin"]
        })))
        .mount(&server)
        .await;

    let info = assert_ok!(authentication_client(&server).get_user_info("access-token").await);

    assert_eq!(info.id(), Some("auth0|123"));
    assert_eq!(info.email.as_deref(), Some("u@example.com"));
    assert_eq!(info.extra["https://example.com/roles"], json!(["admin"]));
}

#[tokio::test]
async fn test_user_info_with_expired_token() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = assert_err!(authentication_client(&server).get_user_info("expired").await);

    assert!(err.is_authentication());
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_username_password_login_returns_form() {
    let server = setup_mock_server().await;
    let markup = r#"<form method="post" name="hiddenform" action="/login/callback"><input type="hidden" name="wresult" value="token"></form>"#;

    Mock::given(method("POST"))
        .and(path("/usernamepassword/login"))
        .and(body_partial_json(json!({
            "client_id": CLIENT_ID,
            "connection": CONNECTION,
            "username": "u@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(markup, "text/html"))
        .mount(&server)
        .await;

    let response = assert_ok!(
        authentication_client(&server)
            .username_password_login(UsernamePasswordLoginRequest::new(
                CLIENT_ID,
                CONNECTION,
                "u@example.com",
                "password",
                "http://www.blah.com/test",
            ))
            .await
    );

    assert_eq!(response.html_form, markup);
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let client = AuthenticationApiClient::new(unreachable_base_url()).expect("Failed to build client");

    let err = assert_err!(client.authenticate(password_request("openid")).await);

    assert!(err.is_transport());
    assert!(!err.is_authentication());
    assert!(!err.is_api());
}
