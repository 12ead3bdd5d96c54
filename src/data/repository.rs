//! Repository combining the remote catalog with the local cache.
//!
//! The remote endpoint is the authoritative source; the cache only holds
//! the last successful snapshot for offline fallback.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use super::api::{ExerciseApi, FetchError};
use super::cache::Cache;
use super::models::Exercise;

/// Data access for the exercise catalog
pub struct ExerciseRepository<A> {
    api: A,
    cache: Cache,
}

impl<A: ExerciseApi> ExerciseRepository<A> {
    pub fn new(api: A, cache: Cache) -> Self {
        ExerciseRepository { api, cache }
    }

    /// Fetch the catalog from the remote endpoint.
    ///
    /// On success the cache is replaced with the fetched snapshot. A
    /// cache-write failure is logged but does not fail the fetch; the
    /// remote result is returned unchanged. An empty payload leaves the
    /// previous snapshot in place.
    pub fn fetch(&mut self) -> Result<Vec<Exercise>, FetchError> {
        let exercises = self.api.fetch_exercises()?;

        if exercises.is_empty() {
            debug!("remote catalog is empty, keeping cached snapshot");
            return Ok(exercises);
        }

        if let Err(err) = self.cache.replace_all(&exercises) {
            error!("failed to write exercises into cache: {err:#}");
        }

        Ok(exercises)
    }

    /// Read the last persisted snapshot; empty if nothing was ever cached
    pub fn read_cache(&self) -> Result<Vec<Exercise>> {
        self.cache.list()
    }

    /// Timestamp of the last successful fetch persisted in the cache
    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.cache.last_fetched_at().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::super::api::testing::{decode_error, exercise, MockApi};
    use super::*;

    fn temp_repository(api: MockApi) -> (tempfile::TempDir, ExerciseRepository<MockApi>) {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(&Cache::db_path(dir.path())).unwrap();
        (dir, ExerciseRepository::new(api, cache))
    }

    #[test]
    fn test_fetch_returns_decoded_list_and_fills_cache() {
        let exercises = vec![
            exercise("Squat", "Legs", "Intermediate"),
            exercise("Plank", "Core", "Beginner"),
        ];
        let (_dir, mut repo) = temp_repository(MockApi::ok(exercises.clone()));

        assert_eq!(repo.fetch().unwrap(), exercises);
        assert_eq!(repo.read_cache().unwrap(), exercises);
        assert!(repo.last_synced().is_some());
    }

    #[test]
    fn test_fetch_failure_propagates_and_leaves_cache_alone() {
        let cached = vec![exercise("Squat", "Legs", "Intermediate")];
        let (_dir, mut repo) = temp_repository(MockApi::queued(vec![
            Ok(cached.clone()),
            Err(decode_error()),
        ]));

        repo.fetch().unwrap();
        assert!(matches!(repo.fetch(), Err(FetchError::Decode(_))));
        assert_eq!(repo.read_cache().unwrap(), cached);
    }

    #[test]
    fn test_fetch_replaces_cache_wholesale() {
        let first = vec![
            exercise("Squat", "Legs", "Intermediate"),
            exercise("Deadlift", "Back", "Advanced"),
        ];
        let second = vec![exercise("Plank", "Core", "Beginner")];
        let (_dir, mut repo) = temp_repository(MockApi::queued(vec![
            Ok(first),
            Ok(second.clone()),
        ]));

        repo.fetch().unwrap();
        repo.fetch().unwrap();

        assert_eq!(repo.read_cache().unwrap(), second);
    }

    #[test]
    fn test_empty_fetch_keeps_previous_snapshot() {
        let cached = vec![exercise("Squat", "Legs", "Intermediate")];
        let (_dir, mut repo) = temp_repository(MockApi::queued(vec![
            Ok(cached.clone()),
            Ok(vec![]),
        ]));

        repo.fetch().unwrap();
        assert_eq!(repo.fetch().unwrap(), vec![]);
        assert_eq!(repo.read_cache().unwrap(), cached);
    }

    #[test]
    fn test_read_cache_on_fresh_database_is_empty() {
        let (_dir, repo) = temp_repository(MockApi::failing());
        assert!(repo.read_cache().unwrap().is_empty());
        assert!(repo.last_synced().is_none());
    }
}
