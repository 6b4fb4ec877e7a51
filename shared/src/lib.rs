pub mod analytics;
pub mod api;
pub mod error;
pub mod fetch;
pub mod geo;
pub mod street;
pub mod tiles;
pub mod viewport;

pub use error::{FetchError, InterpolationError};
pub use fetch::{FetchState, RequestTracker, Ticket};
pub use geo::{GeoPoint, interpolate};
pub use street::{
    ApiError, InterpolateRequest, InterpolateResponse, StreetBasicInfo, StreetDetailedInfo,
};
pub use tiles::{DashboardConfig, SignedRequest, TileSigner};
pub use viewport::{Easing, Transition, Viewport, ViewportSequencer, ViewportState};
