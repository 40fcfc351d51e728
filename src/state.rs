use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::ServerConfig;
use crate::location::{KeywordClassifier, LocationClassifier};
use crate::rng::{SeededPicker, ThreadRngPicker, TieBreaker};

type SharedPicker = Arc<Mutex<Box<dyn TieBreaker + Send>>>;

// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db_path: PathBuf,
    pub classifier: Arc<dyn LocationClassifier + Send + Sync>,
    picker: SharedPicker,
}

impl AppState {
    pub fn new(
        db_path: PathBuf,
        classifier: Arc<dyn LocationClassifier + Send + Sync>,
        picker: Box<dyn TieBreaker + Send>,
    ) -> Self {
        Self {
            db_path,
            classifier,
            picker: Arc::new(Mutex::new(picker)),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let picker: Box<dyn TieBreaker + Send> = match config.rng_seed {
            Some(seed) => Box::new(SeededPicker::new(seed)),
            None => Box::new(ThreadRngPicker),
        };
        Self::new(
            config.db_path.clone(),
            Arc::new(KeywordClassifier::default()),
            picker,
        )
    }

    // Poison is ignored: picker state is valid even after a panic.
    pub fn picker(&self) -> MutexGuard<'_, Box<dyn TieBreaker + Send>> {
        self.picker.lock().unwrap_or_else(|e| e.into_inner())
    }
}
