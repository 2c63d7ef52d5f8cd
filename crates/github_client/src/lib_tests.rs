//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// --- Test Constants ---
const TEST_TOKEN: &str = "ghp_test_token";
const TEST_ORG: &str = "test-org";

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let octocrab = create_token_client(TEST_TOKEN, Some(&mock_server.uri()))
        .expect("Failed to build test client");
    GitHubClient::new(octocrab)
}

fn environment_property_json() -> serde_json::Value {
    json!({
        "property_name": "environment",
        "url": "https://api.github.com/orgs/test-org/properties/schema/environment",
        "source_type": "organization",
        "value_type": "single_select",
        "required": true,
        "default_value": "production",
        "description": "Prod or dev environment",
        "allowed_values": ["production", "development"],
        "values_editable_by": "org_actors"
    })
}

// --- create_or_update_org_custom_property ---

#[tokio::test]
async fn test_create_or_update_org_custom_property_success() {
    let mock_server = MockServer::start().await;
    let property = OrganizationCustomProperty {
        property_name: Some("environment".to_string()),
        value_type: "single_select".to_string(),
        required: Some(true),
        default_value: Some("production".to_string()),
        description: Some("Prod or dev environment".to_string()),
        allowed_values: Some(vec!["production".to_string(), "development".to_string()]),
        values_editable_by: Some("org_actors".to_string()),
        ..Default::default()
    };

    Mock::given(method("PUT"))
        .and(path(format!("/orgs/{TEST_ORG}/properties/schema/environment")))
        .and(body_json(json!({
            "property_name": "environment",
            "value_type": "single_select",
            "required": true,
            "default_value": "production",
            "description": "Prod or dev environment",
            "allowed_values": ["production", "development"],
            "values_editable_by": "org_actors"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(environment_property_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .create_or_update_org_custom_property(TEST_ORG, "environment", &property)
        .await;

    if let Err(e) = &result {
        eprintln!("create_or_update_org_custom_property error: {e:?}");
    }
    let created = result.expect("Create should succeed");
    assert!(created.has_name("environment"));
    assert_eq!(created.source_type.as_deref(), Some("organization"));
}

#[tokio::test]
async fn test_create_or_update_org_custom_property_validation_failure() {
    let mock_server = MockServer::start().await;
    let property = OrganizationCustomProperty {
        property_name: Some("environment".to_string()),
        value_type: "single_select".to_string(),
        ..Default::default()
    };

    Mock::given(method("PUT"))
        .and(path(format!("/orgs/{TEST_ORG}/properties/schema/environment")))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "documentation_url": "https://docs.github.com/rest/orgs/custom-properties"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .create_or_update_org_custom_property(TEST_ORG, "environment", &property)
        .await;

    match result {
        Err(Error::ApiError(message)) => assert_eq!(message, "Validation Failed"),
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

// --- list_org_custom_properties ---

#[tokio::test]
async fn test_list_org_custom_properties_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/orgs/{TEST_ORG}/properties/schema")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            environment_property_json(),
            {
                "property_name": "owner",
                "value_type": "string",
                "required": false,
                "default_value": null,
                "description": "Repository owner",
                "allowed_values": null,
                "values_editable_by": "org_and_repo_actors"
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let properties = client
        .list_org_custom_properties(TEST_ORG)
        .await
        .expect("List should succeed");

    assert_eq!(properties.len(), 2);
    assert!(properties[0].has_name("environment"));
    assert_eq!(
        properties[0].allowed_values,
        Some(vec!["production".to_string(), "development".to_string()])
    );
    assert!(properties[1].has_name("owner"));
    assert_eq!(properties[1].allowed_values, None);
    assert_eq!(
        properties[1].values_editable_by.as_deref(),
        Some("org_and_repo_actors")
    );
}

#[tokio::test]
async fn test_list_org_custom_properties_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/orgs/{TEST_ORG}/properties/schema")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let properties = client
        .list_org_custom_properties(TEST_ORG)
        .await
        .expect("Empty list should be Ok");

    assert!(properties.is_empty());
}

/// Verifies that a 404 response is mapped to Error::NotFound.
#[tokio::test]
async fn test_list_org_custom_properties_org_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/orgs/{TEST_ORG}/properties/schema")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_org_custom_properties(TEST_ORG).await;

    assert!(
        matches!(result, Err(Error::NotFound)),
        "Should return NotFound error for 404 response"
    );
}

/// Verifies that authentication failures are mapped to Error::AuthError.
#[tokio::test]
async fn test_list_org_custom_properties_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/orgs/{TEST_ORG}/properties/schema")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_org_custom_properties(TEST_ORG).await;

    assert!(
        matches!(result, Err(Error::AuthError(_))),
        "Should return AuthError for 401 response"
    );
}

/// Verifies that rate limit errors are mapped to Error::RateLimitExceeded.
#[tokio::test]
async fn test_list_org_custom_properties_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/orgs/{TEST_ORG}/properties/schema")))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({
                    "message": "API rate limit exceeded",
                    "documentation_url": "https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting"
                }))
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("X-RateLimit-Reset", "1234567890"),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_org_custom_properties(TEST_ORG).await;

    assert!(
        matches!(result, Err(Error::RateLimitExceeded)),
        "Should return RateLimitExceeded for 403 with rate limit"
    );
}

// --- remove_org_custom_property ---

#[tokio::test]
async fn test_remove_org_custom_property_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/orgs/{TEST_ORG}/properties/schema/environment")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .remove_org_custom_property(TEST_ORG, "environment")
        .await;

    if let Err(e) = &result {
        eprintln!("remove_org_custom_property error: {e:?}");
    }
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_remove_org_custom_property_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/orgs/{TEST_ORG}/properties/schema/environment")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Must have admin rights to Repository.",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .remove_org_custom_property(TEST_ORG, "environment")
        .await;

    match result {
        Err(Error::ApiError(message)) => {
            assert_eq!(message, "Must have admin rights to Repository.")
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

// --- get_account ---

#[tokio::test]
async fn test_get_account_organization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/users/{TEST_ORG}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": TEST_ORG,
            "id": 4242,
            "node_id": "MDEyOk9yZ2FuaXphdGlvbjQyNDI=",
            "type": "Organization",
            "site_admin": false
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let account = client
        .get_account(TEST_ORG)
        .await
        .expect("Account lookup should succeed");

    assert_eq!(account.login, TEST_ORG);
    assert!(account.is_organization());
}

#[tokio::test]
async fn test_get_account_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost-org"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_account("ghost-org").await;

    assert!(matches!(result, Err(Error::NotFound)));
}

// --- client construction ---

#[test]
fn test_create_token_client_rejects_invalid_base_uri() {
    let result = create_token_client(TEST_TOKEN, Some("not a uri"));

    assert!(matches!(result, Err(Error::AuthError(_))));
}

// --- request paths ---

#[test]
fn test_schema_path_encodes_reserved_characters() {
    assert_eq!(
        schema_path("acme", None).unwrap(),
        "/orgs/acme/properties/schema"
    );
    assert_eq!(
        schema_path("acme", Some("environment")).unwrap(),
        "/orgs/acme/properties/schema/environment"
    );
    assert_eq!(
        schema_path("acme", Some("$pecial#name")).unwrap(),
        "/orgs/acme/properties/schema/$pecial%23name"
    );
    assert_eq!(
        schema_path("acme", Some("a/b?c")).unwrap(),
        "/orgs/acme/properties/schema/a%2Fb%3Fc"
    );
}

#[tokio::test]
async fn test_remove_org_custom_property_with_hash_in_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!(
            "/orgs/{TEST_ORG}/properties/schema/$pecial%23name"
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .remove_org_custom_property(TEST_ORG, "$pecial#name")
        .await;

    assert!(result.is_ok());
}
