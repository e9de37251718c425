use axum::http::StatusCode;
use axum::response::IntoResponse;

use contactbook_infra::contact_store::StoreError;

pub const INVALID_REQUEST: &str = "Request has to be valid";
pub const INVALID_EMAIL: &str = "Email has to be valid";
pub const CONTACT_NOT_FOUND: &str = "Contact not found by email";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Plain-text error response.
pub fn text_error(status: StatusCode, message: &'static str) -> axum::response::Response {
    (status, message).into_response()
}

/// Storage failures are never retried; log the cause and answer 500.
pub fn store_error_to_response(operation: &'static str, err: StoreError) -> axum::response::Response {
    tracing::error!(operation, error = %err, "contact store failure");
    text_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}
