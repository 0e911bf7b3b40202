//! Integration tests for `RosterContext` lifecycle
//!
//! The context is wired against a mock roster service and driven through its
//! startup load and shutdown.

use rota_app::RosterContext;
use rota_domain::constants::MSG_LOAD_USERS_FAILED;
use rota_domain::{ApiConfig, Config, RosterConfig, RosterError, UserId, YearMonth};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(base_url: String) -> Config {
    Config {
        api: ApiConfig { base_url, ..ApiConfig::default() },
        roster: RosterConfig { default_people_per_day: 3 },
        ..Config::default()
    }
}

/// Validates `RosterContext::start` behavior for the initial load scenario.
#[tokio::test]
async fn start_loads_users_and_both_month_views() {
    let server = MockServer::start().await;
    let first_day = YearMonth::current().range().start.to_string();

    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "full_name": "Ann Lee" },
            { "id": 2, "full_name": "Bob Stone" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/days-off/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 5, "date": first_day, "user": 2 }])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/duties/list_assignments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "date": first_day, "users": [{ "id": 1, "full_name": "Ann Lee" }] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let context = RosterContext::with_config(config_for(server.uri())).unwrap();
    context.start().await.unwrap();

    let store = &context.store;
    assert_eq!(store.users().len(), 2);
    assert_eq!(store.unavailability_for(UserId(2)).len(), 1);
    assert_eq!(store.assignees_on(YearMonth::current().range().start).len(), 1);
    assert_eq!(store.people_per_day(), 3, "headcount comes from configuration");
    assert!(store.feedback().current_error().is_none());

    context.shutdown();
}

/// Validates `RosterContext::start` behavior for the unreachable service scenario.
#[tokio::test]
async fn unreachable_service_surfaces_error_until_shutdown() {
    let context = RosterContext::with_config(config_for("http://127.0.0.1:1".into())).unwrap();

    let result = context.start().await;

    assert!(matches!(result, Err(RosterError::Network(_))), "got {result:?}");
    let store = &context.store;
    assert!(store.users().is_empty());
    assert!(store.assignments().is_empty());
    assert!(store.feedback().current_error().is_some());
    assert!(!store.is_loading_users());

    context.shutdown();
    assert!(store.feedback().current_error().is_none());
    assert!(!store.popovers().is_any_open());
}

/// Validates `RosterContext::start` behavior for the failed user listing scenario.
#[tokio::test]
async fn failed_user_listing_reports_the_load_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/days-off/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/duties/list_assignments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let context = RosterContext::with_config(config_for(server.uri())).unwrap();
    let result = context.start().await;

    assert!(matches!(result, Err(RosterError::Server(_))), "got {result:?}");
    assert_eq!(context.store.feedback().current_error().as_deref(), Some(MSG_LOAD_USERS_FAILED));
}

/// Validates `RosterContext::with_config` behavior for the missing base URL scenario.
#[test]
fn empty_base_url_is_a_config_error() {
    let result = RosterContext::with_config(config_for(String::new()));
    assert!(matches!(result, Err(RosterError::Config(_))));
}
