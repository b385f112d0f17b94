//! Login and registration form controller.
//!
//! Both views share one submission shape: two required fields, a single
//! request, an inline error line. They differ in endpoint, fallback message
//! and what a success leads to.

use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::auth::TokenStore;
use crate::error::ClientError;
use crate::models::{AuthRequest, AuthResponse, Credential};
use crate::route::Route;

use super::classify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Login,
    Register,
}

impl AuthFlow {
    /// Message shown when the server rejects without a `message`
    pub fn fallback_message(&self) -> &'static str {
        match self {
            AuthFlow::Login => "Invalid username or password",
            AuthFlow::Register => "Register Failed",
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self {
            AuthFlow::Login => "Login",
            AuthFlow::Register => "Register",
        }
    }

    /// Button label while the request is outstanding
    pub fn busy_label(&self) -> &'static str {
        match self {
            AuthFlow::Login => "Logging in...",
            AuthFlow::Register => "Registering...",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            AuthFlow::Login => Route::Login,
            AuthFlow::Register => Route::Register,
        }
    }

    /// The other form, for the "switch" link under the button
    pub fn other(&self) -> AuthFlow {
        match self {
            AuthFlow::Login => AuthFlow::Register,
            AuthFlow::Register => AuthFlow::Login,
        }
    }

    /// Where a successful submission leads. Registration does not open a
    /// session, so it goes back to the login view.
    pub fn success_route(&self) -> Route {
        match self {
            AuthFlow::Login => Route::Dashboard,
            AuthFlow::Register => Route::Login,
        }
    }
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct AuthForm {
    flow: AuthFlow,
    pub username: String,
    pub password: String,
    submitting: bool,
    error: Option<String>,
    field_errors: FieldErrors,
}

impl AuthForm {
    pub fn new(flow: AuthFlow) -> Self {
        Self {
            flow,
            username: String::new(),
            password: String::new(),
            submitting: false,
            error: None,
            field_errors: FieldErrors::default(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn flow(&self) -> AuthFlow {
        self.flow
    }

    /// True while a request is outstanding; the submit control is disabled
    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    fn validate(&self) -> FieldErrors {
        let required = |value: &str, field: &'static str| {
            value
                .is_empty()
                .then(|| ClientError::Validation { field }.to_string())
        };
        FieldErrors {
            username: required(&self.username, "Username"),
            password: required(&self.password, "Password"),
        }
    }

    /// Start a submission. Returns the request to send, or `None` when a
    /// request is already in flight or a field is empty.
    pub fn begin_submit(&mut self) -> Option<AuthRequest> {
        if self.submitting {
            return None;
        }

        self.error = None;
        self.field_errors = self.validate();
        if !self.field_errors.is_empty() {
            return None;
        }

        self.submitting = true;
        Some(AuthRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }

    /// Apply the outcome of the request issued by `begin_submit`.
    /// Returns the route to navigate to on success.
    pub fn finish_submit(
        &mut self,
        outcome: Result<ApiResponse, ApiError>,
        store: &dyn TokenStore,
    ) -> Option<Route> {
        self.submitting = false;

        let fallback = self.flow.fallback_message();
        let result = classify(outcome, |response| {
            ClientError::Auth(response.message_or(fallback))
        })
        .and_then(|response| self.accept(&response, store));

        match result {
            Ok(route) => {
                info!(flow = ?self.flow, username = %self.username, "Authentication succeeded");
                self.password.clear();
                Some(route)
            }
            Err(e) => {
                match e {
                    ClientError::Auth(_) => warn!(flow = ?self.flow, error = %e, "Authentication rejected"),
                    _ => error!(flow = ?self.flow, error = %e, "Authentication failed"),
                }
                self.error = e.user_message();
                None
            }
        }
    }

    /// Store whatever credential the success response carries
    fn accept(&self, response: &ApiResponse, store: &dyn TokenStore) -> Result<Route, ClientError> {
        let auth: AuthResponse = response.json()?;

        match (self.flow, auth.token()) {
            (AuthFlow::Login, Some(token)) => {
                store.save(&Credential::new(token).with_display_name(self.username.clone()))?;
            }
            (AuthFlow::Login, None) => {
                return Err(ClientError::Network(
                    "login response did not include an access token".to_string(),
                ));
            }
            (AuthFlow::Register, Some(token)) => {
                store.save(&Credential::new(token))?;
            }
            (AuthFlow::Register, None) => {}
        }

        Ok(self.flow.success_route())
    }

    /// Run a whole submission inline
    pub async fn submit(&mut self, api: &ApiClient, store: &dyn TokenStore) -> Option<Route> {
        let request = self.begin_submit()?;
        let outcome = match self.flow {
            AuthFlow::Login => api.login(&request).await,
            AuthFlow::Register => api.register(&request).await,
        };
        self.finish_submit(outcome, store)
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new(AuthFlow::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemoryTokenStore, StorageError};
    use crate::error::UNEXPECTED_ERROR;
    use reqwest::StatusCode;
    use serde_json::json;

    fn filled(flow: AuthFlow) -> AuthForm {
        let mut form = AuthForm::new(flow).with_username("alice");
        form.password = "secret".to_string();
        form
    }

    fn response(status: StatusCode, body: serde_json::Value) -> Result<ApiResponse, ApiError> {
        Ok(ApiResponse::new(status, body))
    }

    /// A store whose writes always fail
    struct FullDisk;

    impl TokenStore for FullDisk {
        fn save(&self, _: &Credential) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk full").into())
        }
        fn read(&self) -> Option<Credential> {
            None
        }
        fn clear(&self) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_fields_block_submission() {
        let mut form = AuthForm::new(AuthFlow::Login);
        assert_eq!(form.begin_submit(), None);
        assert!(!form.submitting());
        assert_eq!(form.field_errors().username.as_deref(), Some("Username is required"));
        assert_eq!(form.field_errors().password.as_deref(), Some("Password is required"));

        form.username = "alice".to_string();
        assert_eq!(form.begin_submit(), None);
        assert_eq!(form.field_errors().username, None);
        assert_eq!(form.field_errors().password.as_deref(), Some("Password is required"));
    }

    #[test]
    fn test_begin_submit_disables_until_finished() {
        let mut form = filled(AuthFlow::Login);
        let request = form.begin_submit().unwrap();
        assert_eq!(request.username, "alice");
        assert!(form.submitting());

        // Second press while in flight sends nothing
        assert_eq!(form.begin_submit(), None);

        let store = MemoryTokenStore::new();
        form.finish_submit(response(StatusCode::UNAUTHORIZED, json!({})), &store);
        assert!(!form.submitting());
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn test_login_rejection_shows_server_message() {
        let store = MemoryTokenStore::new();
        let mut form = filled(AuthFlow::Login);
        form.begin_submit().unwrap();
        let route = form.finish_submit(
            response(
                StatusCode::UNAUTHORIZED,
                json!({"message": "Invalid username or password"}),
            ),
            &store,
        );
        assert_eq!(route, None);
        assert_eq!(form.error(), Some("Invalid username or password"));
        assert_eq!(store.read(), None);
        assert!(!form.submitting());
    }

    #[test]
    fn test_login_success_saves_credential() {
        let store = MemoryTokenStore::new();
        let mut form = filled(AuthFlow::Login);
        form.begin_submit().unwrap();
        let route = form.finish_submit(response(StatusCode::CREATED, json!({"accessToken": "abc"})), &store);
        assert_eq!(route, Some(Route::Dashboard));
        assert_eq!(store.read(), Some(Credential::new("abc").with_display_name("alice")));
        assert_eq!(form.error(), None);
        assert!(form.password.is_empty());
    }

    #[test]
    fn test_login_success_without_token_is_unexpected() {
        let store = MemoryTokenStore::new();
        let mut form = filled(AuthFlow::Login);
        form.begin_submit().unwrap();
        let route = form.finish_submit(response(StatusCode::OK, json!({"ok": true})), &store);
        assert_eq!(route, None);
        assert_eq!(form.error(), Some(UNEXPECTED_ERROR));
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_network_failure_shows_generic_message() {
        let store = MemoryTokenStore::new();
        let mut form = filled(AuthFlow::Login);
        form.begin_submit().unwrap();
        let route = form.finish_submit(Err(ApiError::InvalidResponse("<html>".to_string())), &store);
        assert_eq!(route, None);
        assert_eq!(form.error(), Some("An unexpected error occurred"));
        assert!(!form.submitting());
    }

    #[test]
    fn test_storage_failure_does_not_navigate() {
        let mut form = filled(AuthFlow::Login);
        form.begin_submit().unwrap();
        let route = form.finish_submit(response(StatusCode::OK, json!({"accessToken": "abc"})), &FullDisk);
        assert_eq!(route, None);
        assert_eq!(form.error(), Some(UNEXPECTED_ERROR));
    }

    #[test]
    fn test_error_cleared_on_next_attempt() {
        let store = MemoryTokenStore::new();
        let mut form = filled(AuthFlow::Login);
        form.begin_submit().unwrap();
        form.finish_submit(response(StatusCode::UNAUTHORIZED, json!({})), &store);
        assert_eq!(form.error(), Some("Invalid username or password"));

        form.begin_submit().unwrap();
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_register_goes_to_login() {
        let store = MemoryTokenStore::new();
        let mut form = filled(AuthFlow::Register);
        form.begin_submit().unwrap();
        let route = form.finish_submit(response(StatusCode::CREATED, json!({"id": 9})), &store);
        assert_eq!(route, Some(Route::Login));
        assert_eq!(store.read(), None);

        let mut form = filled(AuthFlow::Register);
        form.begin_submit().unwrap();
        let route = form.finish_submit(response(StatusCode::CREATED, json!({"accessToken": "reg"})), &store);
        assert_eq!(route, Some(Route::Login));
        assert_eq!(store.read(), Some(Credential::new("reg")));
    }

    #[test]
    fn test_register_rejection_fallback() {
        let store = MemoryTokenStore::new();
        let mut form = filled(AuthFlow::Register);
        form.begin_submit().unwrap();
        form.finish_submit(response(StatusCode::CONFLICT, json!({"statusCode": 409})), &store);
        assert_eq!(form.error(), Some("Register Failed"));
    }
}
