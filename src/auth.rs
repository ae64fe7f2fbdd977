use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Gate for mutating routes: the X-API-KEY header must match the configured
/// secret exactly, or the request never reaches its handler. Stateless; no
/// sessions, no scoping.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if presented != Some(state.api_key.as_str()) {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
