use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use contactbook_core::Entity;

use crate::app::errors::{self, CONTACT_NOT_FOUND, INVALID_EMAIL, INVALID_REQUEST};
use crate::app::dto;
use crate::app::services::AppServices;

pub const CONTACTS_PATH: &str = "/api/v1/contacts";

pub fn router() -> Router {
    Router::new()
        .route(CONTACTS_PATH, post(create_contact).get(missing_email))
        .route("/api/v1/contacts/", get(missing_email))
        .route("/api/v1/contacts/:email", get(find_contact_by_email))
}

pub async fn create_contact(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateContactRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            tracing::debug!(reason = %rejection, "rejected contact body");
            return errors::text_error(StatusCode::BAD_REQUEST, INVALID_REQUEST);
        }
    };

    let contact = match body.into_new_contact() {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(reason = %e, "contact failed validation");
            return errors::text_error(StatusCode::BAD_REQUEST, INVALID_REQUEST);
        }
    };

    match services.contacts().save(contact).await {
        Ok(saved) => {
            tracing::info!(contact_id = %saved.id(), "saved contact");
            (StatusCode::CREATED, Json(saved)).into_response()
        }
        Err(e) => errors::store_error_to_response("save_contact", e),
    }
}

pub async fn find_contact_by_email(
    Extension(services): Extension<Arc<AppServices>>,
    Path(email): Path<String>,
) -> axum::response::Response {
    if email.trim().is_empty() {
        return errors::text_error(StatusCode::BAD_REQUEST, INVALID_EMAIL);
    }

    match services.contacts().find_by_email(&email).await {
        Ok(Some(contact)) => (StatusCode::OK, Json(contact)).into_response(),
        Ok(None) => errors::text_error(StatusCode::NOT_FOUND, CONTACT_NOT_FOUND),
        Err(e) => errors::store_error_to_response("find_contact_by_email", e),
    }
}

/// `GET` on the collection or with an empty path segment: no email to look up.
pub async fn missing_email() -> axum::response::Response {
    errors::text_error(StatusCode::BAD_REQUEST, INVALID_EMAIL)
}
