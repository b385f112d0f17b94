//! Application state management for the positions front end.
//!
//! This module contains the core `App` struct: the active route and its
//! session guard, the controllers of each view, and the channel through
//! which background requests report back to the UI loop.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use positions_core::api::{ApiClient, ApiError, ApiResponse};
use positions_core::auth::{GuardState, SessionGuard, TokenStore};
use positions_core::controllers::{AuthFlow, AuthForm, DashboardController, Mutation, PositionField};
use positions_core::{Config, Route};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// Only a handful of requests can be in flight at once (one per control).
const CHANNEL_BUFFER_SIZE: usize = 32;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    /// Waiting for the user to confirm deleting the given position
    ConfirmingDelete(i64),
    Quitting,
}

/// Login/register form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
    /// The link to the other form
    Switch,
}

impl LoginFocus {
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::Username => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Button,
            LoginFocus::Button => LoginFocus::Switch,
            LoginFocus::Switch => LoginFocus::Username,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::Username => LoginFocus::Switch,
            LoginFocus::Password => LoginFocus::Username,
            LoginFocus::Button => LoginFocus::Password,
            LoginFocus::Switch => LoginFocus::Button,
        }
    }
}

/// Dashboard focus: one of the form fields, or the position table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardFocus {
    Field(PositionField),
    Table,
}

impl DashboardFocus {
    pub fn next(&self) -> Self {
        match self {
            DashboardFocus::Field(PositionField::Code) => DashboardFocus::Field(PositionField::Name),
            DashboardFocus::Field(PositionField::Name) => DashboardFocus::Field(PositionField::Type),
            DashboardFocus::Field(PositionField::Type) => DashboardFocus::Field(PositionField::Department),
            DashboardFocus::Field(PositionField::Department) => DashboardFocus::Table,
            DashboardFocus::Table => DashboardFocus::Field(PositionField::Code),
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            DashboardFocus::Field(PositionField::Code) => DashboardFocus::Table,
            DashboardFocus::Field(PositionField::Name) => DashboardFocus::Field(PositionField::Code),
            DashboardFocus::Field(PositionField::Type) => DashboardFocus::Field(PositionField::Name),
            DashboardFocus::Field(PositionField::Department) => DashboardFocus::Field(PositionField::Type),
            DashboardFocus::Table => DashboardFocus::Field(PositionField::Department),
        }
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// What a background request produced.
enum TaskOutcome {
    /// Login or register response for the current auth form
    Auth(Result<ApiResponse, ApiError>),
    /// Full position list
    Positions(Result<ApiResponse, ApiError>),
    /// Create, update or delete, returned with its outcome
    Mutation(Mutation, Result<ApiResponse, ApiError>),
}

/// A task outcome tagged with the view activation that started it.
///
/// Results whose activation is no longer current belong to a view the user
/// has left and are discarded.
struct TaskResult {
    activation: u64,
    outcome: TaskOutcome,
}

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub store: Arc<dyn TokenStore>,
    pub api: ApiClient,

    // Navigation
    pub state: AppState,
    pub route: Route,
    pub guard: SessionGuard,
    activation: u64,

    // Login/register form state
    pub auth_form: AuthForm,
    pub login_focus: LoginFocus,

    // Dashboard state
    pub dashboard: DashboardController,
    pub dashboard_focus: DashboardFocus,
    pub table_selection: usize,
    pub display_name: String,

    // Status message
    pub status_message: Option<String>,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,
}

impl App {
    /// Create a new application instance. Call `navigate` to enter the first view.
    pub fn new(config: Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let api_base = config.api_base();
        debug!(%api_base, backend = ?config.token_backend, "App::new()");
        let api = ApiClient::new(api_base, store.clone())?;

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            store,
            api,

            state: AppState::Normal,
            route: Route::Intro,
            guard: SessionGuard::new(Route::Intro),
            activation: 0,

            auth_form: AuthForm::default(),
            login_focus: LoginFocus::Username,

            dashboard: DashboardController::new(),
            dashboard_focus: DashboardFocus::Field(PositionField::Code),
            table_selection: 0,
            display_name: String::new(),

            status_message: None,

            task_rx: rx,
            task_tx: tx,
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Enter a view. A fresh guard is checked for every activation; a
    /// protected view without a session is replaced by the login view before
    /// anything of it is drawn.
    pub fn navigate(&mut self, route: Route) {
        let mut target = route;
        // Terminates: redirects only ever point at the login view, which is
        // never protected.
        loop {
            self.activation += 1;
            self.route = target;
            self.guard = SessionGuard::new(target);
            match self.guard.check(self.store.as_ref()) {
                GuardState::Redirecting(next) => {
                    info!(from = ?target, to = ?next, "No session, redirecting");
                    target = next;
                }
                GuardState::Ready | GuardState::Unchecked => break,
            }
        }
        debug!(route = ?self.route, activation = self.activation, "View activated");
        self.enter_view();
    }

    fn enter_view(&mut self) {
        self.state = AppState::Normal;
        match self.route {
            Route::Intro => {}
            Route::Login => {
                let username = self.config.last_username.clone().unwrap_or_default();
                self.open_auth_form(AuthFlow::Login, username);
            }
            Route::Register => self.open_auth_form(AuthFlow::Register, String::new()),
            Route::Dashboard => {
                self.display_name = self
                    .guard
                    .credential()
                    .map(|c| c.display_name_or_default().to_string())
                    .unwrap_or_default();
                self.dashboard = DashboardController::new();
                self.dashboard_focus = DashboardFocus::Field(PositionField::Code);
                self.table_selection = 0;
                self.load_positions();
            }
        }
    }

    fn open_auth_form(&mut self, flow: AuthFlow, username: String) {
        self.auth_form = AuthForm::new(flow).with_username(username);
        self.login_focus = if self.auth_form.username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
    }

    /// Check if a session exists right now
    pub fn is_authenticated(&self) -> bool {
        self.store.has_session()
    }

    /// Token shown in the dashboard footer
    pub fn session_token(&self) -> Option<&str> {
        self.guard.credential().map(|c| c.token.as_str())
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Submit the login/register form. Does nothing while a request is out
    /// or when validation fails.
    pub fn submit_auth(&mut self) {
        let Some(request) = self.auth_form.begin_submit() else {
            return;
        };
        let flow = self.auth_form.flow();
        let api = self.api.clone();
        self.spawn(async move {
            let outcome = match flow {
                AuthFlow::Login => api.login(&request).await,
                AuthFlow::Register => api.register(&request).await,
            };
            TaskOutcome::Auth(outcome)
        });
    }

    /// Clear the stored credential and return to the login view
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            error!(error = %e, "Failed to clear stored credential");
        }
        info!("Logged out");
        self.navigate(Route::Login);
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    pub fn load_positions(&mut self) {
        if self.dashboard.request_load() {
            self.spawn_load();
        }
    }

    pub fn refresh_positions(&mut self) {
        if self.dashboard.refresh() {
            self.spawn_load();
        }
    }

    pub fn submit_position(&mut self) {
        if let Some(mutation) = self.dashboard.begin_submit() {
            self.spawn_mutation(mutation);
        }
    }

    /// Load the selected row into the form
    pub fn edit_selected(&mut self) {
        if let Some(id) = self.selected_position_id() {
            if self.dashboard.edit(id) {
                self.dashboard_focus = DashboardFocus::Field(PositionField::Code);
            }
        }
    }

    /// Ask for confirmation before deleting the selected row
    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_position_id() {
            self.state = AppState::ConfirmingDelete(id);
        }
    }

    pub fn confirm_delete(&mut self, position_id: i64) {
        self.state = AppState::Normal;
        if let Some(mutation) = self.dashboard.begin_delete(position_id) {
            self.spawn_mutation(mutation);
        }
    }

    pub fn selected_position_id(&self) -> Option<i64> {
        self.dashboard
            .positions()
            .get(self.table_selection)
            .map(|p| p.position_id)
    }

    fn clamp_selection(&mut self) {
        let len = self.dashboard.positions().len();
        self.table_selection = self.table_selection.min(len.saturating_sub(1));
    }

    fn spawn_load(&self) {
        let api = self.api.clone();
        self.spawn(async move { TaskOutcome::Positions(api.list_positions().await) });
    }

    fn spawn_mutation(&self, mutation: Mutation) {
        let api = self.api.clone();
        self.spawn(async move {
            let outcome = mutation.send(&api).await;
            TaskOutcome::Mutation(mutation, outcome)
        });
    }

    // =========================================================================
    // Background Tasks
    // =========================================================================

    /// Run a request on the runtime and report its outcome, tagged with the
    /// current activation, through the task channel.
    fn spawn<F>(&self, work: F)
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
    {
        let tx = self.task_tx.clone();
        let activation = self.activation;
        tokio::spawn(async move {
            let outcome = work.await;
            if tx.send(TaskResult { activation, outcome }).await.is_err() {
                warn!("Task result dropped: receiver closed");
            }
        });
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.process_task_result(result);
        }
    }

    fn process_task_result(&mut self, result: TaskResult) {
        if result.activation != self.activation {
            debug!(
                activation = result.activation,
                current = self.activation,
                "Dropping result for a view that is no longer active"
            );
            return;
        }

        match result.outcome {
            TaskOutcome::Auth(outcome) => {
                let flow = self.auth_form.flow();
                let username = self.auth_form.username.clone();
                let Some(route) = self.auth_form.finish_submit(outcome, self.store.as_ref()) else {
                    return;
                };

                match flow {
                    AuthFlow::Login => {
                        self.config.last_username = Some(username);
                        if let Err(e) = self.config.save() {
                            warn!(error = %e, "Failed to save config");
                        }
                        self.status_message = None;
                        self.navigate(route);
                    }
                    AuthFlow::Register => {
                        self.navigate(route);
                        self.auth_form.username = username;
                        self.login_focus = LoginFocus::Password;
                        self.status_message = Some("Registration complete. Please log in.".to_string());
                    }
                }
            }
            TaskOutcome::Positions(outcome) => {
                if self.dashboard.finish_load(outcome) {
                    self.spawn_load();
                }
                self.clamp_selection();
            }
            TaskOutcome::Mutation(mutation, outcome) => {
                if self.dashboard.finish_mutation(&mutation, outcome) {
                    self.spawn_load();
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
