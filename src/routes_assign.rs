// --------------------------------------------------
// Assignment suggestion endpoints.
//
// Each returns 200 with a null result when nobody can be
// suggested; the operator then assigns by hand.
// --------------------------------------------------

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::logic::{self, AutoAssignment};
use crate::models::{City, User};
use crate::routes_roster::parse_reference;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextInput {
    pub preferred_location: Option<City>,
    pub at: Option<String>, // RFC3339
}

#[derive(Debug, Serialize)]
pub struct NextResponse {
    pub staff: Option<User>,
}

// -----------------------------
// POST /api/assign/next
// -----------------------------
pub async fn assign_next(
    State(state): State<AppState>,
    Json(input): Json<NextInput>,
) -> AppResult<Json<NextResponse>> {
    let at = parse_reference(input.at.as_deref())?;
    let roster = store::load_roster(&state.db_path)?;

    let staff = {
        let mut picker = state.picker();
        logic::get_next_available_staff(
            &roster.users,
            &roster.jobs,
            at,
            input.preferred_location,
            &mut **picker,
        )
    };
    if staff.is_none() {
        log::warn!("next: no staff can take a new job");
    }

    Ok(Json(NextResponse { staff }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoInput {
    pub job_location: Option<String>,
    pub job_id: Option<String>,
    pub at: Option<String>, // RFC3339
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub assignment: Option<AutoAssignment>,
}

// -----------------------------
// POST /api/assign/auto
// Uses the stored job's address when only jobId is given
// -----------------------------
pub async fn assign_auto(
    State(state): State<AppState>,
    Json(input): Json<AutoInput>,
) -> AppResult<Json<AssignmentResponse>> {
    let at = parse_reference(input.at.as_deref())?;
    let roster = store::load_roster(&state.db_path)?;

    let job_location = match (input.job_location, input.job_id.as_deref()) {
        (Some(text), _) => Some(text),
        (None, Some(id)) => {
            let Some(job) = roster.jobs.iter().find(|j| j.id == id) else {
                return Err(AppError::JobNotFound { id: id.to_string() });
            };
            job.location.clone()
        }
        (None, None) => None,
    };

    let assignment = {
        let mut picker = state.picker();
        logic::auto_assign_staff(
            &roster.users,
            &roster.jobs,
            job_location.as_deref(),
            at,
            &*state.classifier,
            &mut **picker,
        )
    };

    match &assignment {
        Some(a) => log::info!("auto-assign: {}", a.reason),
        None => log::warn!("auto-assign: no eligible staff, job left unassigned"),
    }

    Ok(Json(AssignmentResponse { assignment }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstInput {
    pub preferred_location: Option<City>,
}

// -----------------------------
// POST /api/assign/first
// Ignores workload entirely
// -----------------------------
pub async fn assign_first(
    State(state): State<AppState>,
    Json(input): Json<FirstInput>,
) -> AppResult<Json<AssignmentResponse>> {
    let roster = store::load_roster(&state.db_path)?;

    let assignment = {
        let mut picker = state.picker();
        logic::get_first_available_staff(&roster.users, input.preferred_location, &mut **picker)
    };

    Ok(Json(AssignmentResponse { assignment }))
}
