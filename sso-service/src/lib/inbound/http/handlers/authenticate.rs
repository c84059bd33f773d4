use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::INVALID_CREDENTIALS;
use crate::domain::credential::models::Login;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let Json(body) = payload?;

    if body.login.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "login and password are required".to_string(),
        ));
    }

    // A login that cannot exist is answered like any other unknown login
    let login = Login::new(body.login)
        .map_err(|_| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let token = state
        .authentication
        .authenticate(&login, &body.password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData { token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    #[serde(default)]
    login: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub token: String,
}
