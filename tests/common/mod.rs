#![allow(dead_code)]

use chrono::{DateTime, FixedOffset};
use job_dispatch::models::{City, Job, JobStatus, Role, ShiftSchedule, StaffLocation, User};
use job_dispatch::rng::TieBreaker;

/// Wednesday mid-morning, inside the always-on-shift window.
pub const WEDNESDAY_10AM: &str = "2024-03-06T10:00:00+02:00";
pub const WEDNESDAY_11PM: &str = "2024-03-06T23:00:00+02:00";

pub fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid timestamp")
}

pub fn staff(id: &str, name: &str, city: Option<City>) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        role: Role::Staff,
        email: None,
        location: city.map(|c| StaffLocation { city: Some(c) }),
        schedule: None,
    }
}

pub fn with_shift(mut user: User, start: &str, end: &str) -> User {
    user.schedule = Some(ShiftSchedule {
        shift_start_time: Some(start.to_string()),
        shift_end_time: Some(end.to_string()),
    });
    user
}

pub fn user_with_role(id: &str, role: Role) -> User {
    User {
        role,
        ..staff(id, id, None)
    }
}

pub fn job(id: &str, assignee: &str, status: JobStatus, due: Option<&str>) -> Job {
    Job {
        id: id.to_string(),
        assigned_to: Some(assignee.to_string()),
        status,
        due_date: due.map(str::to_string),
        title: None,
        location: None,
    }
}

/// `n` completed jobs for `assignee`, all due at `due`.
pub fn completed_jobs(prefix: &str, assignee: &str, n: usize, due: &str) -> Vec<Job> {
    (0..n)
        .map(|i| job(&format!("{prefix}-{i}"), assignee, JobStatus::Completed, Some(due)))
        .collect()
}

/// Always picks the first candidate.
pub struct First;

impl TieBreaker for First {
    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}

/// Always picks the last candidate and records pool sizes.
#[derive(Default)]
pub struct Recording {
    pub seen: Vec<usize>,
}

impl TieBreaker for Recording {
    fn pick_index(&mut self, len: usize) -> usize {
        self.seen.push(len);
        len - 1
    }
}
