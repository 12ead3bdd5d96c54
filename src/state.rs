//! View state for the exercise catalog.
//!
//! `UiState` is a three-way projection of the data layer (Loading,
//! Success, Error); `ExerciseStore` holds the current state and applies
//! the refresh cycle: try the remote catalog, fall back to the cached
//! snapshot, surface a fixed error message when neither has data.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::data::{Exercise, ExerciseApi, ExerciseRepository};

/// Message shown when neither the remote catalog nor the cache has data
pub const NO_DATA_MSG: &str = "No data available";

/// Message shown when the remote catalog is reachable but empty
pub const EMPTY_CATALOG_MSG: &str = "API returned no exercises.";

/// What the UI is currently showing; exactly one variant at a time
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Loading,
    Success(Vec<Exercise>),
    Error(String),
}

/// Result of one refresh cycle, ready to be applied to a store
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: UiState,
    /// True when the data came from the cache instead of the network
    pub from_cache: bool,
    /// Timestamp of the last successful fetch persisted in the cache
    pub synced_at: Option<DateTime<Utc>>,
}

/// Run one refresh cycle against the repository.
///
/// Success with a non-empty list wins outright. On any fetch failure the
/// cached snapshot is served if non-empty; otherwise the fixed error
/// message is surfaced. No retries.
pub fn resolve<A: ExerciseApi>(repo: &mut ExerciseRepository<A>) -> Snapshot {
    match repo.fetch() {
        Ok(exercises) if exercises.is_empty() => {
            warn!("remote catalog is empty");
            Snapshot {
                state: UiState::Error(EMPTY_CATALOG_MSG.to_string()),
                from_cache: false,
                synced_at: repo.last_synced(),
            }
        }
        Ok(exercises) => {
            info!(count = exercises.len(), "catalog refreshed from network");
            Snapshot {
                state: UiState::Success(exercises),
                from_cache: false,
                synced_at: repo.last_synced(),
            }
        }
        Err(err) => {
            warn!("fetch failed, falling back to cache: {err}");
            let cached = repo.read_cache().unwrap_or_else(|cache_err| {
                warn!("cache read failed: {cache_err:#}");
                Vec::new()
            });
            if cached.is_empty() {
                Snapshot {
                    state: UiState::Error(NO_DATA_MSG.to_string()),
                    from_cache: false,
                    synced_at: None,
                }
            } else {
                info!(count = cached.len(), "serving cached snapshot");
                Snapshot {
                    state: UiState::Success(cached),
                    from_cache: true,
                    synced_at: repo.last_synced(),
                }
            }
        }
    }
}

/// Holder of the current view state
#[derive(Debug)]
pub struct ExerciseStore {
    state: UiState,
    from_cache: bool,
    synced_at: Option<DateTime<Utc>>,
}

impl ExerciseStore {
    /// A store starts out loading, before the first refresh lands
    pub fn new() -> Self {
        ExerciseStore {
            state: UiState::Loading,
            from_cache: false,
            synced_at: None,
        }
    }

    /// Run a full refresh cycle synchronously and apply the result
    pub fn refresh<A: ExerciseApi>(&mut self, repo: &mut ExerciseRepository<A>) {
        self.set_loading();
        let snapshot = resolve(repo);
        self.apply(snapshot);
    }

    /// Enter the Loading state (a refresh has been kicked off)
    pub fn set_loading(&mut self) {
        self.state = UiState::Loading;
        self.from_cache = false;
    }

    /// Apply the outcome of a refresh cycle
    pub fn apply(&mut self, snapshot: Snapshot) {
        self.state = snapshot.state;
        self.from_cache = snapshot.from_cache;
        self.synced_at = snapshot.synced_at;
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Exercises of the current Success payload; empty otherwise
    pub fn exercises(&self) -> &[Exercise] {
        match &self.state {
            UiState::Success(exercises) => exercises,
            _ => &[],
        }
    }

    /// Find an exercise by name in the current Success payload.
    /// Returns `None` while Loading or Error, or when no name matches.
    pub fn lookup(&self, name: &str) -> Option<&Exercise> {
        match &self.state {
            UiState::Success(exercises) => exercises.iter().find(|e| e.name == name),
            _ => None,
        }
    }

    /// True when the current data was served from the cache
    pub fn is_from_cache(&self) -> bool {
        self.from_cache
    }

    /// Timestamp of the snapshot backing the current data, if known
    pub fn synced_at(&self) -> Option<DateTime<Utc>> {
        self.synced_at
    }
}

impl Default for ExerciseStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::data::testing::{decode_error, exercise, MockApi};
    use crate::data::{Cache, ExerciseRepository};

    use super::*;

    fn temp_repository(api: MockApi) -> (tempfile::TempDir, ExerciseRepository<MockApi>) {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(&Cache::db_path(dir.path())).unwrap();
        (dir, ExerciseRepository::new(api, cache))
    }

    fn sample_catalog() -> Vec<crate::data::Exercise> {
        vec![
            exercise("Squat", "Legs", "Intermediate"),
            exercise("Bench Press", "Chest", "Advanced"),
            exercise("Plank", "Core", "Beginner"),
        ]
    }

    #[test]
    fn test_successful_fetch_yields_success_and_fills_cache() {
        let catalog = sample_catalog();
        let (_dir, mut repo) = temp_repository(MockApi::ok(catalog.clone()));
        let mut store = ExerciseStore::new();

        store.refresh(&mut repo);

        assert_eq!(store.state(), &UiState::Success(catalog.clone()));
        assert!(!store.is_from_cache());
        assert_eq!(repo.read_cache().unwrap(), catalog);
    }

    #[test]
    fn test_fetch_failure_with_cache_yields_cached_success() {
        let catalog = sample_catalog();
        let (_dir, mut repo) = temp_repository(MockApi::queued(vec![
            Ok(catalog.clone()),
            Err(decode_error()),
        ]));
        let mut store = ExerciseStore::new();

        store.refresh(&mut repo);
        store.refresh(&mut repo);

        assert_eq!(store.state(), &UiState::Success(catalog));
        assert!(store.is_from_cache());
        assert!(store.synced_at().is_some());
    }

    #[test]
    fn test_fetch_failure_with_empty_cache_yields_error() {
        let (_dir, mut repo) = temp_repository(MockApi::failing());
        let mut store = ExerciseStore::new();

        store.refresh(&mut repo);

        assert_eq!(store.state(), &UiState::Error(NO_DATA_MSG.to_string()));
    }

    #[test]
    fn test_empty_catalog_yields_error_and_keeps_cache() {
        let catalog = sample_catalog();
        let (_dir, mut repo) = temp_repository(MockApi::queued(vec![
            Ok(catalog.clone()),
            Ok(vec![]),
        ]));
        let mut store = ExerciseStore::new();

        store.refresh(&mut repo);
        store.refresh(&mut repo);

        assert_eq!(
            store.state(),
            &UiState::Error(EMPTY_CATALOG_MSG.to_string())
        );
        assert_eq!(repo.read_cache().unwrap(), catalog);
    }

    #[test]
    fn test_refresh_replaces_stale_records() {
        let first = sample_catalog();
        let second = vec![exercise("Lunge", "Legs", "Beginner")];
        let (_dir, mut repo) = temp_repository(MockApi::queued(vec![
            Ok(first),
            Ok(second.clone()),
        ]));
        let mut store = ExerciseStore::new();

        store.refresh(&mut repo);
        store.refresh(&mut repo);

        assert_eq!(store.state(), &UiState::Success(second.clone()));
        assert_eq!(repo.read_cache().unwrap(), second);
    }

    #[test]
    fn test_lookup_finds_present_name() {
        let catalog = sample_catalog();
        let (_dir, mut repo) = temp_repository(MockApi::ok(catalog));
        let mut store = ExerciseStore::new();
        store.refresh(&mut repo);

        let found = store.lookup("Bench Press").unwrap();
        assert_eq!(found.body_part, "Chest");
        assert!(store.lookup("Handstand").is_none());
    }

    #[test]
    fn test_lookup_outside_success_returns_none() {
        let store = ExerciseStore::new();
        assert_eq!(store.state(), &UiState::Loading);
        assert!(store.lookup("Squat").is_none());

        let (_dir, mut repo) = temp_repository(MockApi::failing());
        let mut store = ExerciseStore::new();
        store.refresh(&mut repo);
        assert!(matches!(store.state(), UiState::Error(_)));
        assert!(store.lookup("Squat").is_none());
    }

    #[test]
    fn test_exercises_accessor_is_empty_outside_success() {
        let store = ExerciseStore::new();
        assert!(store.exercises().is_empty());
    }
}
