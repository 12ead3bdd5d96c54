//! Data layer: remote exercise catalog, local cache, and the repository
//! combining the two.

mod api;
mod cache;
mod models;
mod repository;

pub use api::{ExerciseApi, FetchError, HttpExerciseApi, DEFAULT_URL};
pub use cache::Cache;
pub use models::Exercise;
pub use repository::ExerciseRepository;

#[cfg(test)]
pub(crate) use api::testing;
