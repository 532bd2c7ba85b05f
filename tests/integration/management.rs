//! Integration tests for the Management API

use super::*;
use auth0_client::{
    ConnectionCreateRequest, ManagementApiClient, Metadata, TenantSettingsUpdateRequest,
    UserCreateRequest, UserUpdateRequest,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, Request, Respond, ResponseTemplate};

const CONNECTION: &str = "Username-Password-Authentication";

/// Stores the posted user and answers with it, the way the service does.
struct EchoCreatedUser;

impl Respond for EchoCreatedUser {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(mut user) = request.body_json::<serde_json::Map<String, Value>>() else {
            return ResponseTemplate::new(400);
        };
        user.remove("password");
        user.remove("connection");
        user.insert("user_id".into(), json!("auth0|58457fe6b27a3b6c5a42b63e"));
        user.insert(
            "identities".into(),
            json!([{
                "connection": CONNECTION,
                "user_id": "58457fe6b27a3b6c5a42b63e",
                "provider": "auth0",
                "isSocial": false
            }]),
        );
        user.insert("created_at".into(), json!("2016-12-05T11:16:54.243Z"));
        ResponseTemplate::new(201).set_body_json(user)
    }
}

fn metadata(value: Value) -> Metadata {
    match value {
        Value::Object(map) => map,
        _ => Metadata::new(),
    }
}

#[tokio::test]
async fn test_create_user_preserves_fields_and_metadata() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "/api/v2/users")
        .and(body_partial_json(json!({ "connection": CONNECTION })))
        .respond_with(EchoCreatedUser)
        .expect(1)
        .mount(&server)
        .await;

    let email = format!("{}@example.com", uuid::Uuid::new_v4());
    let app_metadata = metadata(json!({
        "plan": "gold",
        "roles": ["admin", "billing"],
        "limits": { "seats": 5, "ratio": 0.25 },
        "nothing": null
    }));
    let user_metadata: Metadata = serde_json::from_str(
        r#"{"zeta":"last-inserted-first","alpha":"ünïcödé","nested":{"b":1,"a":2},"big":12345678901234567890123,"exp":1e3}"#,
    )
    .expect("Invalid metadata");

    let request = UserCreateRequest::new(CONNECTION, email.clone())
        .with_username("johndoe")
        .with_password("correct horse battery staple")
        .with_app_metadata(app_metadata.clone())
        .with_user_metadata(user_metadata.clone());

    let user = assert_ok!(management_client(&server).users().create(request).await);

    assert_eq!(user.user_id, "auth0|58457fe6b27a3b6c5a42b63e");
    assert_eq!(user.email(), Some(email.as_str()));
    assert_eq!(user.username(), Some("johndoe"));
    assert_eq!(
        serde_json::to_string(&user.base.app_metadata).unwrap_or_default(),
        serde_json::to_string(&Some(app_metadata)).unwrap_or_default()
    );
    assert_eq!(
        serde_json::to_string(&user.base.user_metadata).unwrap_or_default(),
        serde_json::to_string(&Some(user_metadata)).unwrap_or_default()
    );
    assert!(user.identity(CONNECTION).is_some());
}

#[tokio::test]
async fn test_get_and_delete_user_encode_the_id() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "/api/v2/users/auth0%7C123")
        .respond_with(success_response(json!({
            "user_id": "auth0|123",
            "email": "u@example.com",
            "logins_count": 3,
            "last_login": 1456257449
        })))
        .expect(1)
        .mount(&server)
        .await;
    mock_with_auth("DELETE", "/api/v2/users/auth0%7C123")
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = management_client(&server);
    let user = assert_ok!(client.users().get("auth0|123").await);
    assert_eq!(user.logins_count, Some(3));
    assert!(user.last_login.and_then(|t| t.to_datetime()).is_some());

    assert_ok!(client.users().delete("auth0|123").await);
}

#[tokio::test]
async fn test_update_user() {
    let server = setup_mock_server().await;

    mock_with_auth("PATCH", "/api/v2/users/auth0%7C123")
        .and(body_partial_json(json!({ "blocked": true })))
        .respond_with(success_response(json!({
            "user_id": "auth0|123",
            "blocked": true
        })))
        .mount(&server)
        .await;

    let update = UserUpdateRequest {
        blocked: Some(true),
        ..UserUpdateRequest::default()
    };
    let user = assert_ok!(
        management_client(&server)
            .users()
            .update("auth0|123", update)
            .await
    );

    assert_eq!(user.blocked, Some(true));
}

#[tokio::test]
async fn test_duplicate_user_is_api_error() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "/api/v2/users")
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "statusCode": 409,
            "error": "Conflict",
            "message": "The user already exists.",
            "errorCode": "auth0_idp_error"
        })))
        .mount(&server)
        .await;

    let err = assert_err!(
        management_client(&server)
            .users()
            .create(UserCreateRequest::new(CONNECTION, "dup@example.com").with_password("pw"))
            .await
    );

    assert!(err.is_api());
    assert!(!err.is_authentication());
    assert_eq!(err.status_code(), Some(409));
    assert_eq!(err.remote_error_code(), Some("auth0_idp_error"));
}

#[tokio::test]
async fn test_connections_crud() {
    let server = setup_mock_server().await;
    let connection = json!({
        "id": "con_123",
        "name": "my-db",
        "strategy": "auth0",
        "enabled_clients": ["client-id"],
        "options": { "passwordPolicy": "good", "brute_force_protection": true }
    });

    mock_with_auth("POST", "/api/v2/connections")
        .and(body_partial_json(json!({ "name": "my-db", "strategy": "auth0" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(connection.clone()))
        .mount(&server)
        .await;
    mock_with_auth("GET", "/api/v2/connections")
        .and(query_param("strategy", "auth0"))
        .respond_with(success_response(json!([connection.clone()])))
        .mount(&server)
        .await;
    mock_with_auth("DELETE", "/api/v2/connections/con_123")
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = management_client(&server);

    let created = assert_ok!(
        client
            .connections()
            .create(ConnectionCreateRequest::new("my-db", "auth0").enable_client("client-id"))
            .await
    );
    assert!(created.is_enabled_for("client-id"));
    let options = created.options.unwrap_or_default();
    assert_eq!(
        options.keys().collect::<Vec<_>>(),
        vec!["passwordPolicy", "brute_force_protection"]
    );

    let all = assert_ok!(client.connections().get_all(Some("auth0")).await);
    assert_eq!(all.len(), 1);

    assert_ok!(client.connections().delete("con_123").await);
}

#[tokio::test]
async fn test_tenant_settings_default_directory() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "/api/v2/tenants/settings")
        .respond_with(success_response(json!({
            "friendly_name": "Test Tenant",
            "default_directory": "",
            "flags": { "enable_client_connections": false }
        })))
        .mount(&server)
        .await;
    mock_with_auth("PATCH", "/api/v2/tenants/settings")
        .and(body_partial_json(json!({ "default_directory": CONNECTION })))
        .respond_with(success_response(json!({
            "friendly_name": "Test Tenant",
            "default_directory": CONNECTION
        })))
        .mount(&server)
        .await;

    let client = management_client(&server);

    let settings = assert_ok!(client.tenant_settings().get().await);
    assert_eq!(settings.default_directory(), None);

    let update = TenantSettingsUpdateRequest {
        default_directory: Some(CONNECTION.to_string()),
        ..TenantSettingsUpdateRequest::default()
    };
    let settings = assert_ok!(client.tenant_settings().update(update).await);
    assert_eq!(settings.default_directory(), Some(CONNECTION));
}

#[tokio::test]
async fn test_base_url_with_api_prefix() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "/api/v2/tenants/settings")
        .respond_with(success_response(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ManagementApiClient::new(MANAGEMENT_TOKEN, format!("{}/api/v2", server.uri()))
        .expect("Failed to build client");

    assert_ok!(client.tenant_settings().get().await);
}

#[tokio::test]
async fn test_rejected_token_is_api_error() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users/auth0%7C1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "error": "Unauthorized",
            "message": "Invalid token"
        })))
        .mount(&server)
        .await;

    let err = assert_err!(management_client(&server).users().get("auth0|1").await);

    assert!(err.is_api());
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let client = ManagementApiClient::new(MANAGEMENT_TOKEN, unreachable_base_url())
        .expect("Failed to build client");

    let err = assert_err!(client.tenant_settings().get().await);

    assert!(err.is_transport());
    assert!(!err.is_api());
}
