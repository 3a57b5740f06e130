use axum::extract::State;
use axum::response::Redirect;
use axum_extra::extract::Form;
use tracing::info;

use crate::error::AppError;
use crate::inquiry::{accept_submission, RawInquiry};
use crate::routes::AppState;

/// POST /inquiry
///
/// Validate the submitted form, relay it as an email, and redirect to the
/// success page. Validation failures stop before any transport call.
pub async fn action(
    State(state): State<AppState>,
    Form(input): Form<RawInquiry>,
) -> Result<Redirect, AppError> {
    let record = accept_submission(input)?;
    info!(name = %record.name, "inquiry accepted");

    state.dispatcher.dispatch(&record)?;

    Ok(Redirect::to("/success"))
}

/// Any non-POST request to the submission endpoint. No field processing
/// happens here.
pub async fn invalid_request() -> AppError {
    AppError::InvalidRequest
}
