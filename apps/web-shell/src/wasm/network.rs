use gloo_net::http::Request;
use miniflux_tweaks_core::api::{
    ApiError, ApiRequest, HttpMethod, SortDirection, User, decode_user_response, plan_fetch_me,
    plan_update_sorting,
};
use wasm_bindgen::JsValue;

use super::*;

pub(super) async fn fetch_me(token: &str) -> Result<User, ApiError> {
    let request = plan_fetch_me(token)?;
    let (status, body) = execute(&request).await?;
    decode_user_response(status, &body)
}

pub(super) async fn update_sorting(
    token: &str,
    user_id: i64,
    direction: SortDirection,
) -> Result<User, ApiError> {
    let request = plan_update_sorting(token, user_id, direction)?;
    let (status, body) = execute(&request).await?;
    decode_user_response(status, &body)
}

async fn execute(request: &ApiRequest) -> Result<(u16, String), ApiError> {
    let mut builder = match request.method {
        HttpMethod::Get => Request::get(&request.path),
        HttpMethod::Put => Request::put(&request.path),
    };
    for (header_name, header_value) in &request.headers {
        builder = builder.header(header_name, header_value);
    }

    let response = if let Some(body) = request.body.as_ref() {
        builder
            .body(body.clone())
            .map_err(|error| ApiError::Network(error.to_string()))?
            .send()
            .await
    } else {
        builder.send().await
    }
    .map_err(|error| ApiError::Network(error.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| ApiError::Network(error.to_string()))?;
    Ok((status, body))
}

/// Every API failure is terminal for that operation; the only trace it
/// leaves is a tagged console diagnostic.
pub(super) fn log_api_failure(operation: &str, error: &ApiError) {
    web_sys::console::error_1(&JsValue::from_str(&format!(
        "{CONSOLE_TAG} {operation} failed: {error}"
    )));
}
