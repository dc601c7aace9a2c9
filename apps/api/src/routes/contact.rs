use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use portfolio_shared::{parse_contact_payload, ApiResponse, ContactMessage, ValidationErrors};
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/contact
///
/// The body is taken as untyped JSON so missing or mistyped fields come back
/// as a 400 in the standard envelope instead of axum's plain-text rejection.
pub async fn handle_create_contact(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ContactMessage>>), AppError> {
    let Json(body) = payload.map_err(|r| ValidationErrors::malformed(r.body_text()))?;
    let input = parse_contact_payload(&body)?;

    let stored = state.store.create(input).await?;
    info!("Stored contact message {}", stored.id);
    debug!("Contact message {} sender: {}", stored.id, stored.email);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Contact message sent successfully", stored)),
    ))
}
