use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Handles the redirect path: resolve the code and issue a temporary
/// redirect to the original URL, or a not-found response.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    match state.resolver().resolve(&code).await? {
        Some(url) => Ok(Redirect::temporary(&url).into_response()),
        None => Err(ApiError::NotFound(code)),
    }
}
