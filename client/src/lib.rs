pub mod api;
pub mod error;
pub mod scope;
pub mod tour;

pub use api::{ApiClient, PointSource, StreetPath};
pub use error::ClientError;
pub use scope::{Pending, ViewScope};
pub use tour::start_tour;
