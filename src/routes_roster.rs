// --------------------------------------------------
// Roster snapshot and availability endpoints.
//
// The job backend owns users and jobs; it pushes its current
// collections here so the engine can score them.
// --------------------------------------------------

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::logic::{self, StaffAvailability};
use crate::models::Roster;
use crate::state::AppState;
use crate::store;

// Parse an optional RFC 3339 reference time from a request.
pub fn parse_reference(at: Option<&str>) -> AppResult<Option<DateTime<FixedOffset>>> {
    at.map(|raw| {
        DateTime::parse_from_rfc3339(raw.trim()).map_err(|_| AppError::InvalidTimestamp {
            value: raw.to_string(),
        })
    })
    .transpose()
}

// -----------------------------
// GET /api/roster
// -----------------------------
pub async fn get_roster(State(state): State<AppState>) -> AppResult<Json<Roster>> {
    Ok(Json(store::load_roster(&state.db_path)?))
}

#[derive(Debug, Serialize)]
pub struct RosterSaved {
    pub users: usize,
    pub jobs: usize,
}

// -----------------------------
// PUT /api/roster
// Replaces the whole snapshot
// -----------------------------
pub async fn put_roster(
    State(state): State<AppState>,
    Json(roster): Json<Roster>,
) -> AppResult<Json<RosterSaved>> {
    store::save_roster(&state.db_path, &roster)?;
    Ok(Json(RosterSaved {
        users: roster.users.len(),
        jobs: roster.jobs.len(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub at: Option<String>, // RFC3339
}

#[derive(Debug, Serialize)]
pub struct AvailabilityEntry {
    #[serde(flatten)]
    pub availability: StaffAvailability,
    pub summary: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub at: String,
    pub staff: Vec<AvailabilityEntry>,
}

// -----------------------------
// GET /api/availability
// Most available staff first
// -----------------------------
pub async fn get_availability(
    State(state): State<AppState>,
    Query(q): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let at = parse_reference(q.at.as_deref())?.unwrap_or_else(logic::now_fixed_offset);
    let roster = store::load_roster(&state.db_path)?;

    let staff = logic::calculate_staff_availability(&roster.users, &roster.jobs, Some(at))
        .into_iter()
        .map(|availability| AvailabilityEntry {
            summary: logic::get_availability_summary(&availability),
            availability,
        })
        .collect();

    Ok(Json(AvailabilityResponse {
        at: at.to_rfc3339(),
        staff,
    }))
}
