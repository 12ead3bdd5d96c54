//! Remote source for the exercise catalog.
//!
//! The catalog is a single JSON array served from a fixed URL. The HTTP
//! transport sits behind the `ExerciseApi` trait so tests can substitute
//! a canned implementation.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use super::models::Exercise;

/// Default catalog endpoint
pub const DEFAULT_URL: &str = "https://raw.githubusercontent.com/theo-picar1/Mobile_Integration_CA3/refs/heads/main/app/src/main/assets/exercises.json";

/// Request timeout for the catalog endpoint
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure modes of a catalog fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request itself failed (connection, DNS, timeout, HTTP status)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not a valid exercise array
    #[error("invalid catalog payload: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A source of exercise records
pub trait ExerciseApi {
    /// Fetch the full exercise catalog
    fn fetch_exercises(&self) -> Result<Vec<Exercise>, FetchError>;
}

/// HTTP implementation of `ExerciseApi` using a blocking reqwest client
pub struct HttpExerciseApi {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpExerciseApi {
    /// Create a client for the given catalog URL
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(HttpExerciseApi {
            client,
            url: url.into(),
        })
    }
}

impl ExerciseApi for HttpExerciseApi {
    fn fetch_exercises(&self) -> Result<Vec<Exercise>, FetchError> {
        debug!(url = %self.url, "fetching exercise catalog");

        let body = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .text()?;

        // Decode separately from the transfer so a bad payload is
        // distinguishable from a transport failure.
        let exercises: Vec<Exercise> =
            serde_json::from_str(&body).map_err(FetchError::Decode)?;

        debug!(count = exercises.len(), "catalog fetched");
        Ok(exercises)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canned `ExerciseApi` implementations shared by the data-layer tests.

    use std::cell::RefCell;

    use super::{Exercise, ExerciseApi, FetchError};

    /// Mock API returning queued responses in order; once the queue is
    /// exhausted every further call fails with a decode error.
    pub struct MockApi {
        responses: RefCell<Vec<Result<Vec<Exercise>, FetchError>>>,
    }

    impl MockApi {
        pub fn queued(responses: Vec<Result<Vec<Exercise>, FetchError>>) -> Self {
            MockApi {
                responses: RefCell::new(responses),
            }
        }

        /// A mock that answers one successful fetch with the given list
        pub fn ok(exercises: Vec<Exercise>) -> Self {
            Self::queued(vec![Ok(exercises)])
        }

        /// A mock whose fetches always fail
        pub fn failing() -> Self {
            Self::queued(vec![])
        }
    }

    impl ExerciseApi for MockApi {
        fn fetch_exercises(&self) -> Result<Vec<Exercise>, FetchError> {
            let mut responses = self.responses.borrow_mut();
            if responses.is_empty() {
                Err(decode_error())
            } else {
                responses.remove(0)
            }
        }
    }

    /// A constructible stand-in for a failed fetch
    pub fn decode_error() -> FetchError {
        FetchError::Decode(serde_json::from_str::<Vec<Exercise>>("{").unwrap_err())
    }

    /// Shorthand for building an exercise record in tests
    pub fn exercise(name: &str, body_part: &str, difficulty: &str) -> Exercise {
        Exercise {
            name: name.to_string(),
            description: format!("{name} description"),
            image: format!("https://example.com/{name}.png"),
            body_part: body_part.to_string(),
            difficulty: difficulty.to_string(),
            needs_equipment: false,
        }
    }
}
