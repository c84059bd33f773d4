use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// Serve the current verification key as a PKCS#1 PEM attachment.
pub async fn public_key(State(state): State<AppState>) -> Result<Response, ApiError> {
    let der = state.validation.public_key_material().await?;

    let pem = auth::PublicKey::from_pkcs1_der(der)
        .to_pkcs1_pem()
        .map_err(|e| {
            tracing::error!(error = %e, "Public key could not be encoded");
            ApiError::InternalServerError("internal error".to_string())
        })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"public.pem\"",
            ),
        ],
        pem,
    )
        .into_response())
}
