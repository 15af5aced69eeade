//! REST API handlers for shift rostering.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::constraints::{self, Analysis};
use crate::demo_data::{self, DemoData};
use crate::domain::{Roster, RosterProblem};
use crate::dto::{
    AnalyzeRequestDto, AnalyzeResponse, EmployeeDto, ErrorResponse, HealthResponse, InfoResponse,
    LeaveDto, RosterDto, RosterRequestDto, SummaryDto,
};
use crate::error::RosterError;
use crate::generator;
use crate::import;

/// A generated roster kept for later edits.
#[derive(Debug, Clone)]
pub struct RosterJob {
    pub problem: RosterProblem,
    pub roster: Roster,
    pub analysis: Analysis,
}

/// Application state shared across handlers.
pub struct AppState {
    /// Maps roster id -> job
    rosters: RwLock<HashMap<String, RosterJob>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            rosters: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Error response with a JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(what: &str, id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{} '{}' not found", what, id),
        }
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Creates the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health & Info
        .route("/health", get(health))
        .route("/info", get(info))
        // Demo data
        .route("/demo-data", get(list_demo_data))
        .route("/demo-data/{id}", get(get_demo_data))
        // Rosters
        .route("/rosters", post(create_roster).get(list_rosters))
        .route("/rosters/analyze", put(analyze_roster))
        .route("/rosters/{id}", get(get_roster).delete(delete_roster))
        .route("/rosters/{id}/summary", get(get_summary))
        .route("/rosters/{id}/leave", post(apply_leave))
        // Employees
        .route("/employees/import", post(import_employees))
        .with_state(state)
}

/// GET /health - Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}

/// GET /info - Application info endpoint.
async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: "Shift Roster",
        version: env!("CARGO_PKG_VERSION"),
        engine: "Greedy coverage filler",
    })
}

/// GET /demo-data - List available demo data sets.
async fn list_demo_data() -> Json<Vec<&'static str>> {
    Json(demo_data::list_demo_data())
}

/// GET /demo-data/{id} - Get a demo request.
async fn get_demo_data(Path(id): Path<String>) -> Result<Json<RosterRequestDto>, ApiError> {
    let demo = id
        .parse::<DemoData>()
        .map_err(|_| ApiError::not_found("Demo data", &id))?;
    let problem = demo_data::generate(demo);
    Ok(Json(RosterRequestDto::from_problem(&problem)))
}

/// POST /rosters - Generate and store a roster.
/// Returns the roster ID as plain text.
async fn create_roster(
    State(state): State<Arc<AppState>>,
    Json(dto): Json<RosterRequestDto>,
) -> Result<String, ApiError> {
    let problem = dto.to_domain()?;
    let generated = generator::generate(&problem)?;

    let id = uuid::Uuid::new_v4().to_string();
    info!(id = %id, score = %generated.analysis.score, "Roster stored");
    state.rosters.write().insert(
        id.clone(),
        RosterJob {
            problem,
            roster: generated.roster,
            analysis: generated.analysis,
        },
    );
    Ok(id)
}

/// GET /rosters - List all roster IDs.
async fn list_rosters(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.rosters.read().keys().cloned().collect())
}

/// GET /rosters/{id} - Get a roster with its analysis.
async fn get_roster(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RosterDto>, ApiError> {
    let rosters = state.rosters.read();
    let job = rosters
        .get(&id)
        .ok_or_else(|| ApiError::not_found("Roster", &id))?;
    Ok(Json(RosterDto::from_roster(&id, &job.roster, &job.analysis)))
}

/// GET /rosters/{id}/summary - Shift counts per employee and per day.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SummaryDto>, ApiError> {
    let rosters = state.rosters.read();
    let job = rosters
        .get(&id)
        .ok_or_else(|| ApiError::not_found("Roster", &id))?;
    Ok(Json(SummaryDto::from_roster(&job.roster)))
}

/// POST /rosters/{id}/leave - Mark leave days and re-analyze.
///
/// Edits are applied all-or-nothing.
async fn apply_leave(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(edits): Json<Vec<LeaveDto>>,
) -> Result<Json<RosterDto>, ApiError> {
    let mut rosters = state.rosters.write();
    let job = rosters
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found("Roster", &id))?;

    let mut roster = job.roster.clone();
    let mut changed = 0;
    for edit in &edits {
        changed += roster.apply_leave(edit.employee.trim(), &edit.days, edit.code)?;
    }
    let analysis = constraints::analyze(&job.problem, &roster);
    info!(id = %id, changed, score = %analysis.score, "Leave applied");

    job.roster = roster;
    job.analysis = analysis;
    Ok(Json(RosterDto::from_roster(&id, &job.roster, &job.analysis)))
}

/// DELETE /rosters/{id} - Remove a roster.
async fn delete_roster(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> StatusCode {
    match state.rosters.write().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

/// PUT /rosters/analyze - Analyze constraints for a supplied grid.
async fn analyze_roster(
    Json(dto): Json<AnalyzeRequestDto>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let (problem, roster) = dto.to_domain()?;
    let analysis = constraints::analyze(&problem, &roster);
    Ok(Json(AnalyzeResponse::from(&analysis)))
}

/// POST /employees/import - Parse employee attributes from a CSV body.
async fn import_employees(body: String) -> Result<Json<Vec<EmployeeDto>>, ApiError> {
    let employees = import::read_employees(body.as_bytes())?;
    Ok(Json(employees.iter().map(EmployeeDto::from).collect()))
}
