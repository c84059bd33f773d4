use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn status() -> ApiSuccess<StatusResponseData> {
    ApiSuccess::new(StatusCode::OK, StatusResponseData { status: "ok" })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponseData {
    pub status: &'static str,
}
