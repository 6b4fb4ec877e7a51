use shared::{FetchError, InterpolationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid interpolation request: {0}")]
    Interpolation(#[from] InterpolationError),
    #[error("street {id} has no start/end coordinates")]
    MissingStreetCoordinates { id: u32 },
}
