//! Dashboard controller: the position list and its create/edit form.
//!
//! The list shown is always the last full response of `GET /positions`.
//! Mutations never patch it locally; every create, update or delete is
//! followed by a complete refetch.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::error::ClientError;
use crate::models::{Position, PositionInput};

use super::{classify, request_error};

/// Editable fields of the position form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionField {
    Code,
    Name,
    Type,
    Department,
}

impl PositionField {
    pub const ALL: [PositionField; 4] = [
        PositionField::Code,
        PositionField::Name,
        PositionField::Type,
        PositionField::Department,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PositionField::Code => "Position Code",
            PositionField::Name => "Position Name",
            PositionField::Type => "Position Type",
            PositionField::Department => "Department",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionForm {
    pub position_code: String,
    pub position_name: String,
    pub position_type: String,
    pub department: String,
}

impl PositionForm {
    pub fn value(&self, field: PositionField) -> &str {
        match field {
            PositionField::Code => &self.position_code,
            PositionField::Name => &self.position_name,
            PositionField::Type => &self.position_type,
            PositionField::Department => &self.department,
        }
    }

    pub fn value_mut(&mut self, field: PositionField) -> &mut String {
        match field {
            PositionField::Code => &mut self.position_code,
            PositionField::Name => &mut self.position_name,
            PositionField::Type => &mut self.position_type,
            PositionField::Department => &mut self.department,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_input(&self) -> PositionInput {
        PositionInput {
            position_code: self.position_code.clone(),
            position_name: self.position_name.clone(),
            position_type: self.position_type.clone(),
            department: self.department.clone(),
        }
    }
}

impl From<&Position> for PositionForm {
    fn from(p: &Position) -> Self {
        Self {
            position_code: p.position_code.clone(),
            position_name: p.position_name.clone(),
            position_type: p.position_type.clone(),
            department: p.department.clone(),
        }
    }
}

/// A write against the positions collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create(PositionInput),
    Update { position_id: i64, input: PositionInput },
    Delete { position_id: i64 },
}

impl Mutation {
    pub async fn send(&self, api: &ApiClient) -> Result<ApiResponse, ApiError> {
        match self {
            Mutation::Create(input) => api.create_position(input).await,
            Mutation::Update { position_id, input } => api.update_position(*position_id, input).await,
            Mutation::Delete { position_id } => api.delete_position(*position_id).await,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "create",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardController {
    positions: Vec<Position>,
    pub form: PositionForm,
    editing_id: Option<i64>,
    loading: bool,
    /// A refetch was requested while one was already running
    reload_pending: bool,
    submitting: bool,
    deleting: Option<i64>,
    error: Option<String>,
    last_loaded: Option<DateTime<Local>>,
}

impl DashboardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// Id of the position whose delete is in flight
    pub fn deleting(&self) -> Option<i64> {
        self.deleting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_loaded(&self) -> Option<DateTime<Local>> {
        self.last_loaded
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing_id.is_some() {
            "Update"
        } else {
            "Create"
        }
    }

    pub fn refresh_label(&self) -> &'static str {
        if self.loading {
            "Refreshing..."
        } else {
            "Refresh"
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Ask for a full list fetch. Returns true when the caller should send
    /// `GET /positions` now; otherwise one is already running and another
    /// will be requested when it finishes.
    pub fn request_load(&mut self) -> bool {
        if self.loading {
            self.reload_pending = true;
            return false;
        }
        self.loading = true;
        true
    }

    /// User-triggered refresh. Clears the error line.
    pub fn refresh(&mut self) -> bool {
        self.error = None;
        self.request_load()
    }

    /// Apply a list response. Returns true when another fetch must be sent
    /// right away because one was requested while this one ran.
    pub fn finish_load(&mut self, outcome: Result<ApiResponse, ApiError>) -> bool {
        self.loading = false;

        let result = classify(outcome, request_error)
            .and_then(|response| response.json::<Vec<Position>>().map_err(ClientError::from));
        match result {
            Ok(positions) => {
                debug!(count = positions.len(), "Positions loaded");
                self.positions = positions;
                self.last_loaded = Some(Local::now());
            }
            Err(e) => self.record_failure("load positions", e),
        }

        if self.reload_pending {
            self.reload_pending = false;
            self.loading = true;
            return true;
        }
        false
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Copy a listed position into the form and switch to update mode
    pub fn edit(&mut self, position_id: i64) -> bool {
        match self.positions.iter().find(|p| p.position_id == position_id) {
            Some(position) => {
                self.form = PositionForm::from(position);
                self.editing_id = Some(position_id);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form.clear();
        self.editing_id = None;
    }

    /// Start a create or update from the form. `None` while one is in flight.
    pub fn begin_submit(&mut self) -> Option<Mutation> {
        if self.submitting {
            return None;
        }
        self.error = None;
        self.submitting = true;

        let input = self.form.to_input();
        Some(match self.editing_id {
            Some(position_id) => Mutation::Update { position_id, input },
            None => Mutation::Create(input),
        })
    }

    /// Start deleting a listed position. `None` while a delete is in flight.
    pub fn begin_delete(&mut self, position_id: i64) -> Option<Mutation> {
        if self.deleting.is_some() {
            return None;
        }
        self.error = None;
        self.deleting = Some(position_id);
        Some(Mutation::Delete { position_id })
    }

    /// Apply the outcome of a mutation and schedule the refetch that always
    /// follows. Returns true when the caller should send `GET /positions` now.
    pub fn finish_mutation(
        &mut self,
        mutation: &Mutation,
        outcome: Result<ApiResponse, ApiError>,
    ) -> bool {
        match mutation {
            Mutation::Delete { .. } => self.deleting = None,
            // Leave the form alone if the user moved on to another row
            Mutation::Create(_) => {
                self.submitting = false;
                if self.editing_id.is_none() {
                    self.form.clear();
                }
            }
            Mutation::Update { position_id, .. } => {
                self.submitting = false;
                if self.editing_id == Some(*position_id) {
                    self.cancel_edit();
                }
            }
        }

        match classify(outcome, request_error) {
            Ok(response) => info!(action = mutation.describe(), status = %response.status, "Position saved"),
            Err(e) => self.record_failure(mutation.describe(), e),
        }

        self.request_load()
    }

    /// Log a failure; surface it only when it has a user-facing message.
    /// Rejections of dashboard calls stay in the log.
    fn record_failure(&mut self, action: &'static str, e: ClientError) {
        warn!(action, error = %e, "Dashboard request failed");
        if let Some(message) = e.user_message() {
            self.error = Some(message);
        }
    }

    // =========================================================================
    // Inline helpers
    // =========================================================================

    pub async fn load(&mut self, api: &ApiClient) {
        if self.request_load() {
            self.run_loads(api).await;
        }
    }

    pub async fn submit(&mut self, api: &ApiClient) {
        let Some(mutation) = self.begin_submit() else {
            return;
        };
        let outcome = mutation.send(api).await;
        if self.finish_mutation(&mutation, outcome) {
            self.run_loads(api).await;
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, position_id: i64) {
        let Some(mutation) = self.begin_delete(position_id) else {
            return;
        };
        let outcome = mutation.send(api).await;
        if self.finish_mutation(&mutation, outcome) {
            self.run_loads(api).await;
        }
    }

    async fn run_loads(&mut self, api: &ApiClient) {
        loop {
            let outcome = api.list_positions().await;
            if !self.finish_load(outcome) {
                break;
            }
        }
    }
}
