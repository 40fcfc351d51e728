/*
Staff availability scoring and selection logic.
Module is independent from HTTP / Axum so it can be tested on plain data.
*/

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::location::LocationClassifier;
use crate::models::{City, Job, JobStatus, User};
use crate::rng::{self, TieBreaker};

// Hard caps; a staff member at either cap is not offered new work.
pub const MAX_JOBS_PER_DAY: usize = 15;
pub const MAX_JOBS_PER_WEEK: usize = 50;

// Score weights (lower total = more available)
const CURRENT_WEIGHT: f64 = 3.0;
const PENDING_WEIGHT: f64 = 2.0;
const TODAY_WEIGHT: f64 = 1.5;
const WEEK_WEIGHT: f64 = 0.5;
const OFF_SHIFT_PENALTY: f64 = 5.0;

// Between these hours (inclusive) everyone counts as on shift.
const LENIENT_FIRST_HOUR: u32 = 6;
const LENIENT_LAST_HOUR: u32 = 20;

const DEFAULT_SHIFT_START: u32 = 5 * 60;
const DEFAULT_SHIFT_END: u32 = 17 * 60;

// Derived per-staff workload; rebuilt from scratch on every call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAvailability {
    pub staff_id: String,
    pub staff: User,
    pub current_jobs: usize, // pending + in progress
    pub pending_jobs: usize,
    pub today_jobs: usize,
    pub week_jobs: usize,    // Sunday..=Saturday around the reference date
    pub availability_score: f64,
    pub is_on_shift: bool,
    pub can_take_new_job: bool,
}

// Result of a selection, ready to show to an operator
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AutoAssignment {
    pub staff_id: String,
    pub staff_name: String,
    pub reason: String,
}

pub fn now_fixed_offset() -> DateTime<FixedOffset> {
    chrono::Local::now().fixed_offset()
}

// Parse "HH:MM" into minutes since midnight.
fn parse_hhmm(hhmm: &str) -> Option<u32> {
    let (h, m) = hhmm.trim().split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

// Resolve a job's due date to a calendar day in the reference offset.
//
// Accepts RFC 3339, a zoneless "YYYY-MM-DDTHH:MM[:SS]" (taken as local to
// the reference) or a bare "YYYY-MM-DD". Anything else has no day.
fn due_day(raw: &str, offset: FixedOffset) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&offset).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

// A staff member's configured working window, defaults filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShiftWindow {
    start: u32, // minutes since midnight
    end: u32,
}

impl ShiftWindow {
    fn for_staff(staff: &User) -> Self {
        let schedule = staff.schedule.as_ref();
        let start = schedule
            .and_then(|s| s.shift_start_time.as_deref())
            .and_then(parse_hhmm)
            .unwrap_or(DEFAULT_SHIFT_START);
        let end = schedule
            .and_then(|s| s.shift_end_time.as_deref())
            .and_then(parse_hhmm)
            .unwrap_or(DEFAULT_SHIFT_END);
        ShiftWindow { start, end }
    }

    fn contains(&self, minute: u32) -> bool {
        if self.start > self.end {
            // crosses midnight
            minute >= self.start || minute < self.end
        } else {
            self.start <= minute && minute < self.end
        }
    }
}

/// Whether `staff` counts as working at `at`.
///
/// Any time from 06:00 through 20:59 is treated as on shift for every
/// staff member, whatever their schedule says. Outside that window the
/// configured shift (default 05:00-17:00) decides.
pub fn is_staff_on_shift(staff: &User, at: DateTime<FixedOffset>) -> bool {
    let hour = at.hour();
    if (LENIENT_FIRST_HOUR..=LENIENT_LAST_HOUR).contains(&hour) {
        return true;
    }
    ShiftWindow::for_staff(staff).contains(hour * 60 + at.minute())
}

pub fn availability_score(
    current_jobs: usize,
    pending_jobs: usize,
    today_jobs: usize,
    week_jobs: usize,
    is_on_shift: bool,
) -> f64 {
    let load = current_jobs as f64 * CURRENT_WEIGHT
        + pending_jobs as f64 * PENDING_WEIGHT
        + today_jobs as f64 * TODAY_WEIGHT
        + week_jobs as f64 * WEEK_WEIGHT;
    if is_on_shift { load } else { load + OFF_SHIFT_PENALTY }
}

pub fn can_take_new_job(today_jobs: usize, week_jobs: usize) -> bool {
    today_jobs < MAX_JOBS_PER_DAY && week_jobs < MAX_JOBS_PER_WEEK
}

/// Score every user with the `staff` role against `all_jobs`.
///
/// Reference time is `target` or now. Output is sorted by ascending
/// score (most available first); equal scores keep roster order.
pub fn calculate_staff_availability(
    all_staff: &[User],
    all_jobs: &[Job],
    target: Option<DateTime<FixedOffset>>,
) -> Vec<StaffAvailability> {
    let reference = target.unwrap_or_else(now_fixed_offset);
    let offset = *reference.offset();
    let today = reference.date_naive();
    let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    let week_end = week_start + Duration::days(6);

    let mut availability: Vec<StaffAvailability> = all_staff
        .iter()
        .filter(|u| u.is_staff())
        .map(|staff| {
            let jobs: Vec<&Job> = all_jobs.iter().filter(|j| j.is_assigned_to(&staff.id)).collect();

            let current_jobs = jobs
                .iter()
                .filter(|j| matches!(j.status, JobStatus::Pending | JobStatus::InProgress))
                .count();
            let pending_jobs = jobs.iter().filter(|j| j.status == JobStatus::Pending).count();

            let due_days: Vec<NaiveDate> = jobs
                .iter()
                .filter_map(|j| j.due_date.as_deref())
                .filter_map(|d| due_day(d, offset))
                .collect();
            let today_jobs = due_days.iter().filter(|d| **d == today).count();
            let week_jobs = due_days
                .iter()
                .filter(|d| (week_start..=week_end).contains(*d))
                .count();

            let is_on_shift = is_staff_on_shift(staff, reference);

            StaffAvailability {
                staff_id: staff.id.clone(),
                staff: staff.clone(),
                current_jobs,
                pending_jobs,
                today_jobs,
                week_jobs,
                availability_score: availability_score(
                    current_jobs,
                    pending_jobs,
                    today_jobs,
                    week_jobs,
                    is_on_shift,
                ),
                is_on_shift,
                can_take_new_job: can_take_new_job(today_jobs, week_jobs),
            }
        })
        .collect();

    availability.sort_by(|a, b| a.availability_score.total_cmp(&b.availability_score));
    availability
}

// Qualitative label, checked in this order:
//     off shift -> at capacity -> by current job count
pub fn get_availability_summary(availability: &StaffAvailability) -> &'static str {
    if !availability.is_on_shift {
        "Off Shift"
    } else if !availability.can_take_new_job {
        "At Capacity"
    } else if availability.current_jobs == 0 {
        "Available"
    } else if availability.current_jobs <= 2 {
        "Lightly Loaded"
    } else if availability.current_jobs <= 4 {
        "Moderately Loaded"
    } else {
        "Heavily Loaded"
    }
}

// Pick the lowest-scored eligible record, random among ties.
//
// Eligibility is `can_take_new_job` only; off-shift staff stay in the
// pool with their penalty. A location with nobody eligible falls back to
// the whole roster.
fn select_next<'a>(
    availability: &'a [StaffAvailability],
    preferred: Option<City>,
    picker: &mut dyn TieBreaker,
) -> Option<&'a StaffAvailability> {
    let in_preferred =
        |a: &StaffAvailability| preferred.is_none_or(|city| a.staff.city() == Some(city));

    let mut candidates: Vec<&StaffAvailability> = availability
        .iter()
        .filter(|a| a.can_take_new_job && in_preferred(*a))
        .collect();
    if candidates.is_empty() && preferred.is_some() {
        candidates = availability.iter().filter(|a| a.can_take_new_job).collect();
    }

    let best_score = candidates
        .iter()
        .map(|a| a.availability_score)
        .min_by(|a, b| a.total_cmp(b))?;
    let best: Vec<&StaffAvailability> = candidates
        .into_iter()
        .filter(|a| a.availability_score == best_score)
        .collect();

    rng::pick(picker, &best).copied()
}

/// Most available staff member, or `None` when nobody can take a job.
pub fn get_next_available_staff(
    all_staff: &[User],
    all_jobs: &[Job],
    target: Option<DateTime<FixedOffset>>,
    preferred_location: Option<City>,
    picker: &mut dyn TieBreaker,
) -> Option<User> {
    let availability = calculate_staff_availability(all_staff, all_jobs, target);
    select_next(&availability, preferred_location, picker).map(|a| a.staff.clone())
}

/// Choose a staff member for a job at `job_location` (free text) and
/// explain the choice.
///
/// The job's region comes from `classifier`; the full availability
/// snapshot is written to the debug log.
pub fn auto_assign_staff(
    all_staff: &[User],
    all_jobs: &[Job],
    job_location: Option<&str>,
    target: Option<DateTime<FixedOffset>>,
    classifier: &dyn LocationClassifier,
    picker: &mut dyn TieBreaker,
) -> Option<AutoAssignment> {
    let preferred = job_location.and_then(|text| classifier.classify(text));
    let availability = calculate_staff_availability(all_staff, all_jobs, target);

    for a in &availability {
        log::debug!(
            "availability: {} ({}) score={:.1} current={} pending={} today={} week={} on_shift={} can_take={}",
            a.staff.name,
            a.staff_id,
            a.availability_score,
            a.current_jobs,
            a.pending_jobs,
            a.today_jobs,
            a.week_jobs,
            a.is_on_shift,
            a.can_take_new_job,
        );
    }

    let chosen = select_next(&availability, preferred, picker)?;

    let mut reason = format!("Auto-assigned to {}", chosen.staff.name);
    if let Some(city) = preferred {
        reason.push_str(&format!(" ({city} area)"));
    }
    reason.push_str(&format!(" - {}", get_availability_summary(chosen)));
    if chosen.today_jobs > 0 {
        reason.push_str(&format!(" ({} jobs today)", chosen.today_jobs));
    }

    Some(AutoAssignment {
        staff_id: chosen.staff_id.clone(),
        staff_name: chosen.staff.name.clone(),
        reason,
    })
}

/// Workload-blind fallback: a random staff member, from `preferred_location`
/// when anyone is based there.
pub fn get_first_available_staff(
    all_staff: &[User],
    preferred_location: Option<City>,
    picker: &mut dyn TieBreaker,
) -> Option<AutoAssignment> {
    let staff: Vec<&User> = all_staff.iter().filter(|u| u.is_staff()).collect();

    let local: Vec<&User> = match preferred_location {
        Some(city) => staff.iter().copied().filter(|u| u.city() == Some(city)).collect(),
        None => Vec::new(),
    };

    let (chosen, area) = if local.is_empty() {
        (rng::pick(picker, &staff).copied()?, None)
    } else {
        (rng::pick(picker, &local).copied()?, preferred_location)
    };

    let mut reason = format!("Auto-assigned to {}", chosen.name);
    if let Some(city) = area {
        reason.push_str(&format!(" ({city} area)"));
    }
    reason.push_str(" - First Available");

    Some(AutoAssignment {
        staff_id: chosen.id.clone(),
        staff_name: chosen.name.clone(),
        reason,
    })
}
