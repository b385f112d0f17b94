//! End-to-end view flows against the mock API.

mod common;

use std::sync::Arc;

use positions_core::auth::{MemoryTokenStore, TokenStore};
use positions_core::controllers::{AuthFlow, AuthForm, DashboardController};
use positions_core::error::UNEXPECTED_ERROR;
use positions_core::{ApiClient, Credential, GuardState, Position, Route, SessionGuard};

fn fresh_list(api: &common::MockApi) -> Vec<Position> {
    serde_json::from_value(serde_json::Value::Array(api.state.positions())).unwrap()
}

#[tokio::test]
async fn test_login_with_empty_field_sends_nothing() {
    let api = common::spawn().await;
    let store = Arc::new(MemoryTokenStore::new());
    let client = api.client(store.clone());

    let mut form = AuthForm::new(AuthFlow::Login).with_username("alice");
    assert_eq!(form.submit(&client, store.as_ref()).await, None);
    assert_eq!(form.field_errors().password.as_deref(), Some("Password is required"));
    assert!(api.state.requests().is_empty());
}

#[tokio::test]
async fn test_login_rejected_shows_message_and_stays() {
    let api = common::spawn().await;
    let store = Arc::new(MemoryTokenStore::new());
    let client = api.client(store.clone());

    let mut form = AuthForm::new(AuthFlow::Login).with_username("alice");
    form.password = "wrong".to_string();
    assert_eq!(form.submit(&client, store.as_ref()).await, None);
    assert_eq!(form.error(), Some("Invalid username or password"));
    assert!(!form.submitting());
    assert!(!store.has_session());
}

#[tokio::test]
async fn test_login_then_dashboard() {
    let api = common::spawn().await;
    api.state.seed("ENG", "Engineer", "Full-time", "R&D");
    let store = Arc::new(MemoryTokenStore::new());
    let client = api.client(store.clone());

    // Before login the dashboard is not reachable
    let mut guard = SessionGuard::new(Route::Dashboard);
    assert_eq!(guard.check(store.as_ref()), GuardState::Redirecting(Route::Login));

    let mut form = AuthForm::new(AuthFlow::Login).with_username("alice");
    form.password = "secret".to_string();
    let route = form.submit(&client, store.as_ref()).await;
    assert_eq!(route, Some(Route::Dashboard));
    assert_eq!(store.read(), Some(Credential::new("abc").with_display_name("alice")));

    let mut guard = SessionGuard::new(Route::Dashboard);
    assert_eq!(guard.check(store.as_ref()), GuardState::Ready);

    let mut dashboard = DashboardController::new();
    dashboard.load(&client).await;
    assert_eq!(dashboard.positions(), fresh_list(&api).as_slice());
    assert_eq!(dashboard.positions().len(), 1);
}

#[tokio::test]
async fn test_register_paths() {
    let api = common::spawn().await;
    let store = Arc::new(MemoryTokenStore::new());
    let client = api.client(store.clone());

    let mut form = AuthForm::new(AuthFlow::Register).with_username("taken");
    form.password = "pw".to_string();
    assert_eq!(form.submit(&client, store.as_ref()).await, None);
    assert_eq!(form.error(), Some("Username already exists"));

    let mut form = AuthForm::new(AuthFlow::Register).with_username("bob");
    form.password = "pw".to_string();
    assert_eq!(form.submit(&client, store.as_ref()).await, Some(Route::Login));
    assert!(!store.has_session());

    let mut form = AuthForm::new(AuthFlow::Register).with_username("with-token");
    form.password = "pw".to_string();
    assert_eq!(form.submit(&client, store.as_ref()).await, Some(Route::Login));
    assert_eq!(store.read().map(|c| c.token), Some("reg-token".to_string()));
}

#[tokio::test]
async fn test_mutations_keep_list_in_sync_with_server() {
    let api = common::spawn().await;
    let existing = api.state.seed("OPS", "Operator", "Shift", "Plant");
    let store = Arc::new(MemoryTokenStore::with_credential(
        Credential::new(common::VALID_TOKEN).with_display_name("alice"),
    ));
    let client = api.client(store.clone());

    let mut dashboard = DashboardController::new();
    dashboard.load(&client).await;
    assert_eq!(dashboard.positions().len(), 1);

    // Create
    dashboard.form.position_code = "ENG".to_string();
    dashboard.form.position_name = "Engineer".to_string();
    dashboard.form.position_type = "Full-time".to_string();
    dashboard.form.department = "R&D".to_string();
    dashboard.submit(&client).await;
    assert!(!dashboard.submitting());
    assert_eq!(dashboard.positions(), fresh_list(&api).as_slice());
    assert_eq!(dashboard.positions().len(), 2);

    // Update
    assert!(dashboard.edit(existing));
    dashboard.form.department = "Logistics".to_string();
    dashboard.submit(&client).await;
    assert_eq!(dashboard.editing_id(), None);
    assert_eq!(dashboard.positions(), fresh_list(&api).as_slice());
    let updated = dashboard
        .positions()
        .iter()
        .find(|p| p.position_id == existing)
        .unwrap();
    assert_eq!(updated.department, "Logistics");

    // Delete
    dashboard.delete(&client, existing).await;
    assert_eq!(dashboard.deleting(), None);
    assert_eq!(dashboard.positions(), fresh_list(&api).as_slice());
    assert_eq!(dashboard.positions().len(), 1);

    // No duplicated rows after repeated refreshes
    dashboard.load(&client).await;
    dashboard.load(&client).await;
    assert_eq!(dashboard.positions(), fresh_list(&api).as_slice());
}

#[tokio::test]
async fn test_rejected_mutation_is_not_shown() {
    let api = common::spawn().await;
    let store = Arc::new(MemoryTokenStore::with_credential(Credential::new(common::VALID_TOKEN)));
    let client = api.client(store.clone());

    let mut dashboard = DashboardController::new();
    dashboard.load(&client).await;
    dashboard.submit(&client).await;

    assert_eq!(dashboard.error(), None);
    assert!(!dashboard.submitting());
    assert!(dashboard.positions().is_empty());
    let methods: Vec<_> = api.state.requests().iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["GET", "POST", "GET"]);
}

#[tokio::test]
async fn test_network_failure_keeps_view_alive() {
    let base = common::closed_base_url().await;
    let store = Arc::new(MemoryTokenStore::with_credential(Credential::new("abc")));
    let client = ApiClient::new(base, store.clone()).unwrap();

    let mut form = AuthForm::new(AuthFlow::Login).with_username("alice");
    form.password = "secret".to_string();
    assert_eq!(form.submit(&client, store.as_ref()).await, None);
    assert_eq!(form.error(), Some(UNEXPECTED_ERROR));
    assert!(!form.submitting());

    let mut dashboard = DashboardController::new();
    dashboard.form.position_code = "ENG".to_string();
    dashboard.submit(&client).await;
    assert!(!dashboard.submitting());
    assert!(!dashboard.loading());
    assert_eq!(dashboard.error(), Some(UNEXPECTED_ERROR));
}
