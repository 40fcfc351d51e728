use std::{fs, io, io::Write, path::Path};

use tempfile::NamedTempFile;

use crate::error::AppResult;
use crate::models::Roster;

// Missing file means nothing has been synced yet.
pub fn load_roster(path: &Path) -> AppResult<Roster> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no roster at {}, using empty roster", path.display());
            return Ok(Roster::default());
        }
        Err(e) => return Err(e.into()),
    };
    let roster: Roster = serde_json::from_str(&text)?;
    Ok(roster)
}

// Each save writes its own temp file beside the target, then renames it
// into place; concurrent saves never share a temp path.
pub fn save_roster(path: &Path, roster: &Roster) -> AppResult<()> {
    let text = serde_json::to_string_pretty(roster)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(text.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    log::info!(
        "saved roster to {} ({} users, {} jobs)",
        path.display(),
        roster.users.len(),
        roster.jobs.len()
    );
    Ok(())
}
