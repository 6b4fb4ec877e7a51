use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    ApiError, DashboardConfig, FetchError, GeoPoint, InterpolateRequest, InterpolateResponse,
    StreetBasicInfo, StreetDetailedInfo, api, interpolate,
};

use crate::error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the points along a street come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSource {
    Remote,
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreetPath {
    pub street: StreetBasicInfo,
    pub points: Vec<GeoPoint>,
}

/// Thin async wrapper around the street REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, ClientError> {
        Self::new(config.api_base_url.clone())
    }

    pub async fn street_basic(&self, street_id: u32) -> Result<StreetBasicInfo, FetchError> {
        self.get_json(api::street_basic_url(&self.base_url, street_id))
            .await
    }

    pub async fn street_detailed(&self, street_id: u32) -> Result<StreetDetailedInfo, FetchError> {
        self.get_json(api::street_detailed_url(&self.base_url, street_id))
            .await
    }

    pub async fn interpolate_points(
        &self,
        request: &InterpolateRequest,
    ) -> Result<Vec<GeoPoint>, FetchError> {
        tracing::debug!(
            num_points = request.num_points,
            "requesting interpolated points"
        );
        let response = self
            .http
            .post(api::interpolate_url(&self.base_url))
            .json(request)
            .send()
            .await
            .map_err(network_error)?;
        let body: InterpolateResponse = decode(response).await?;
        Ok(body.points)
    }

    /// Street info first, then the points between its endpoints: the second
    /// call needs the coordinates returned by the first.
    ///
    /// Without an explicit count, one point per light is produced; a street
    /// with no lights gets no points rather than an error.
    pub async fn street_path(
        &self,
        street_id: u32,
        num_points: Option<usize>,
        source: PointSource,
    ) -> Result<StreetPath, ClientError> {
        let street = self.street_basic(street_id).await?;
        let (start, end) = street
            .endpoints()
            .ok_or(ClientError::MissingStreetCoordinates { id: street_id })?;
        let count = match num_points {
            Some(count) => count,
            None if street.total_lights == 0 => {
                return Ok(StreetPath {
                    street,
                    points: Vec::new(),
                });
            }
            None => street.total_lights as usize,
        };
        let request = InterpolateRequest::new(start, end, count)?;

        let points = match source {
            PointSource::Remote => self.interpolate_points(&request).await?,
            PointSource::Local => interpolate(start, end, count)?,
        };
        Ok(StreetPath { street, points })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).send().await.map_err(network_error)?;
        decode(response).await
    }
}

fn network_error(err: reqwest::Error) -> FetchError {
    tracing::warn!("street API unreachable: {err}");
    FetchError::Network(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|err| err.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });
        tracing::warn!(status = status.as_u16(), "street API error: {message}");
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|err| FetchError::Decode(err.to_string()))
}
