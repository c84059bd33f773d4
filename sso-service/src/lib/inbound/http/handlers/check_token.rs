use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn check_token(
    State(state): State<AppState>,
    payload: Result<Json<CheckTokenRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<CheckTokenResponseData>, ApiError> {
    let Json(body) = payload?;

    let claims = state.validation.validate(&body.token).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        CheckTokenResponseData {
            valid: true,
            audience: claims.aud,
            expires_at: claims.exp.and_then(|exp| DateTime::from_timestamp(exp, 0)),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckTokenRequestBody {
    #[serde(default)]
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckTokenResponseData {
    pub valid: bool,
    pub audience: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
