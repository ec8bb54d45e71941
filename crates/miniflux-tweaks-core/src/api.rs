use serde::{Deserialize, Serialize};

pub const ME_PATH: &str = "/v1/me";
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("api token is not configured")]
    MissingToken,
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Chronological order of feed entries in list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Desc,
    Asc,
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Desc
    }
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desc => "desc",
            Self::Asc => "asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Desc => "Newest first",
            Self::Asc => "Oldest first",
        }
    }

    pub fn from_value(raw: &str) -> Option<Self> {
        match raw {
            "desc" => Some(Self::Desc),
            "asc" => Some(Self::Asc),
            _ => None,
        }
    }
}

/// The slice of the Miniflux user record this module cares about.
/// Unknown fields in the response are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_sorting_direction: Option<SortDirection>,
}

impl User {
    /// Server-reported direction, defaulting to newest-first when the
    /// record omits it.
    pub fn sorting_direction(&self) -> SortDirection {
        self.entry_sorting_direction.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
}

/// A planned REST call, as plain data. The shell owns the transport;
/// this type carries everything it needs to issue the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

fn auth_headers(token: &str) -> Vec<(&'static str, String)> {
    vec![
        (AUTH_TOKEN_HEADER, token.to_string()),
        ("Content-Type", JSON_CONTENT_TYPE.to_string()),
    ]
}

/// Plans `GET /v1/me`. Fails without touching the network when no
/// token is configured.
pub fn plan_fetch_me(token: &str) -> Result<ApiRequest, ApiError> {
    if token.is_empty() {
        return Err(ApiError::MissingToken);
    }
    Ok(ApiRequest {
        method: HttpMethod::Get,
        path: ME_PATH.to_string(),
        headers: auth_headers(token),
        body: None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct SortingUpdateBody {
    entry_sorting_direction: SortDirection,
}

/// Plans `PUT /v1/users/{id}` carrying only the sorting preference.
pub fn plan_update_sorting(
    token: &str,
    user_id: i64,
    direction: SortDirection,
) -> Result<ApiRequest, ApiError> {
    if token.is_empty() {
        return Err(ApiError::MissingToken);
    }
    let body = serde_json::to_string(&SortingUpdateBody {
        entry_sorting_direction: direction,
    })
    .map_err(|error| ApiError::Decode(error.to_string()))?;
    Ok(ApiRequest {
        method: HttpMethod::Put,
        path: format!("/v1/users/{user_id}"),
        headers: auth_headers(token),
        body: Some(body),
    })
}

/// Decodes a user response. Non-2xx statuses and malformed bodies are
/// errors; callers log and degrade, they never propagate.
pub fn decode_user_response(status: u16, body: &str) -> Result<User, ApiError> {
    if !(200..=299).contains(&status) {
        return Err(ApiError::Status(status));
    }
    serde_json::from_str(body).map_err(|error| ApiError::Decode(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_me_requires_a_token() {
        assert_eq!(plan_fetch_me(""), Err(ApiError::MissingToken));
    }

    #[test]
    fn fetch_me_plans_get_with_auth_headers() {
        let request = plan_fetch_me("secret").expect("planned request");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/v1/me");
        assert!(request.body.is_none());
        assert!(request
            .headers
            .contains(&(AUTH_TOKEN_HEADER, "secret".to_string())));
        assert!(request
            .headers
            .contains(&("Content-Type", JSON_CONTENT_TYPE.to_string())));
    }

    #[test]
    fn update_plans_put_against_the_user_id() {
        let request =
            plan_update_sorting("secret", 42, SortDirection::Asc).expect("planned request");
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path, "/v1/users/42");
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"entry_sorting_direction":"asc"}"#)
        );
    }

    #[test]
    fn update_body_carries_only_the_sorting_field() {
        let request =
            plan_update_sorting("secret", 7, SortDirection::Desc).expect("planned request");
        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap_or("{}")).expect("valid json");
        let object = body.as_object().expect("json object");
        assert_eq!(object.len(), 1);
        assert_eq!(object["entry_sorting_direction"], "desc");
    }

    #[test]
    fn decode_accepts_success_with_extra_fields() {
        let user = decode_user_response(
            200,
            r#"{"id":1,"username":"reader","entry_sorting_direction":"asc"}"#,
        )
        .expect("decoded user");
        assert_eq!(user.id, 1);
        assert_eq!(user.sorting_direction(), SortDirection::Asc);
    }

    #[test]
    fn decode_defaults_missing_direction_to_desc() {
        let user = decode_user_response(200, r#"{"id":3}"#).expect("decoded user");
        assert_eq!(user.entry_sorting_direction, None);
        assert_eq!(user.sorting_direction(), SortDirection::Desc);
    }

    #[test]
    fn decode_rejects_non_success_status() {
        assert_eq!(
            decode_user_response(401, r#"{"error_message":"unauthorized"}"#),
            Err(ApiError::Status(401))
        );
    }

    #[test]
    fn decode_rejects_malformed_body() {
        let error = decode_user_response(200, "<html>").expect_err("expected decode error");
        assert!(matches!(error, ApiError::Decode(_)));
    }

    #[test]
    fn direction_round_trips_through_select_values() {
        assert_eq!(SortDirection::from_value("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::from_value("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::from_value("sideways"), None);
        assert_eq!(SortDirection::Asc.as_str(), "asc");
    }
}
