use seed::browser::fetch::{Method, Request, Response};
use seed::prelude::web_sys;
use serde::de::DeserializeOwned;
use shared::{
    ApiError, FetchError, GeoPoint, InterpolateRequest, InterpolateResponse, StreetBasicInfo,
    StreetDetailedInfo, api,
};

pub async fn fetch_street_basic(
    base_url: String,
    street_id: u32,
) -> Result<StreetBasicInfo, FetchError> {
    get_json(api::street_basic_url(&base_url, street_id)).await
}

pub async fn fetch_street_detailed(
    base_url: String,
    street_id: u32,
) -> Result<StreetDetailedInfo, FetchError> {
    get_json(api::street_detailed_url(&base_url, street_id)).await
}

pub async fn fetch_interpolated_points(
    base_url: String,
    request: InterpolateRequest,
) -> Result<Vec<GeoPoint>, FetchError> {
    web_sys::console::debug_1(
        &format!(
            "[frontend] requesting {} points between ({:.5},{:.5}) and ({:.5},{:.5})",
            request.num_points,
            request.start_point.lon,
            request.start_point.lat,
            request.end_point.lon,
            request.end_point.lat
        )
        .into(),
    );
    let request = Request::new(api::interpolate_url(&base_url))
        .method(Method::Post)
        .json(&request)
        .map_err(|err| FetchError::Network(format!("{err:?}")))?;
    let response = request.fetch().await.map_err(network_error)?;
    let body: InterpolateResponse = read_json(response).await?;
    Ok(body.points)
}

async fn get_json<T: DeserializeOwned>(url: String) -> Result<T, FetchError> {
    let response = Request::new(url)
        .method(Method::Get)
        .fetch()
        .await
        .map_err(network_error)?;
    read_json(response).await
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;

    if !status.is_ok() {
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|err| err.message)
            .unwrap_or_else(|_| status.text.clone());
        web_sys::console::error_1(
            &format!("[frontend] API answered {}: {message}", status.code).into(),
        );
        return Err(FetchError::Status {
            status: status.code,
            message,
        });
    }

    serde_json::from_str(&body).map_err(|err| FetchError::Decode(err.to_string()))
}

fn network_error(err: seed::browser::fetch::FetchError) -> FetchError {
    web_sys::console::error_1(&format!("[frontend] fetch failed: {err:?}").into());
    FetchError::Network(format!("{err:?}"))
}
