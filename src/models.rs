use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// Roles the backend may send; anything unrecognised becomes `Other` and is
// never scored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Role {
    Admin,
    Supervisor,
    Staff,
    Other,
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "admin" => Role::Admin,
            "supervisor" => Role::Supervisor,
            "staff" => Role::Staff,
            _ => Role::Other,
        }
    }
}

// Service regions staff are based in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum City {
    Johannesburg,
    #[serde(rename = "Cape Town")]
    CapeTown,
}

impl City {
    pub fn from_name(name: &str) -> Option<City> {
        match name.trim().to_lowercase().as_str() {
            "johannesburg" => Some(City::Johannesburg),
            "cape town" => Some(City::CapeTown),
            _ => None,
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            City::Johannesburg => f.write_str("Johannesburg"),
            City::CapeTown => f.write_str("Cape Town"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffLocation {
    // unknown or blank city names read as no city
    #[serde(default, deserialize_with = "lenient_city")]
    pub city: Option<City>,
}

fn lenient_city<'de, D>(deserializer: D) -> Result<Option<City>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(City::from_name))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSchedule {
    pub shift_start_time: Option<String>, // "HH:MM"
    pub shift_end_time: Option<String>,   // "HH:MM"
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<StaffLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ShiftSchedule>,
}

impl User {
    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }

    pub fn city(&self) -> Option<City> {
        self.location.as_ref().and_then(|l| l.city)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub assigned_to: Option<String>, // staff id, empty when unassigned
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>, // ISO datetime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>, // free-text address
}

impl Job {
    pub fn is_assigned_to(&self, staff_id: &str) -> bool {
        matches!(self.assigned_to.as_deref(), Some(id) if !id.is_empty() && id == staff_id)
    }
}

// Snapshot of the collections fetched from the job backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_city_reads_as_none_without_losing_roster() {
        let raw = r#"{
            "users": [
                { "id": "a", "name": "Alice", "role": "staff", "location": { "city": "Johannesburg" } },
                { "id": "d", "name": "Dineo", "role": "staff", "location": { "city": "Durban" } },
                { "id": "e", "name": "Esi", "role": "staff", "location": { "city": "" } },
                { "id": "n", "name": "Nandi", "role": "staff", "location": { "city": null } },
                { "id": "m", "name": "Musa", "role": "staff", "location": {} }
            ],
            "jobs": []
        }"#;
        let roster: Roster = serde_json::from_str(raw).unwrap();

        let cities: Vec<Option<City>> = roster.users.iter().map(User::city).collect();
        assert_eq!(cities, [Some(City::Johannesburg), None, None, None, None]);
        assert!(roster.users.iter().all(User::is_staff));
    }

    #[test]
    fn city_names_match_loosely() {
        assert_eq!(City::from_name(" cape town "), Some(City::CapeTown));
        assert_eq!(City::from_name("JOHANNESBURG"), Some(City::Johannesburg));
        assert_eq!(City::from_name("Durban"), None);
    }

    #[test]
    fn unknown_role_is_never_staff() {
        let raw = r#"[
            { "id": "1", "name": "One", "role": "contractor" },
            { "id": "2", "name": "Two", "role": "Staff" },
            { "id": "3", "name": "Three", "role": "admin" }
        ]"#;
        let users: Vec<User> = serde_json::from_str(raw).unwrap();

        assert_eq!(users[0].role, Role::Other);
        assert!(!users[0].is_staff());
        assert_eq!(users[1].role, Role::Staff);
        assert_eq!(users[2].role, Role::Admin);
    }
}
