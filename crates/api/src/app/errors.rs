use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use schoolhub_application::{SchoolClassServiceError, StudentServiceError};
use schoolhub_classes::SchoolClassError;
use schoolhub_core::InvalidId;
use schoolhub_infra::RepositoryError;

pub fn student_error_to_response(err: StudentServiceError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        StudentServiceError::StudentNotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
        StudentServiceError::DuplicateStudentId => json_error(StatusCode::CONFLICT, "conflict", message),
        StudentServiceError::Domain(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        StudentServiceError::Repository(e) => repository_error_to_response(e),
    }
}

pub fn class_error_to_response(err: SchoolClassServiceError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        SchoolClassServiceError::ClassNotFound | SchoolClassServiceError::StudentNotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", message)
        }
        SchoolClassServiceError::Domain(e) => match e {
            SchoolClassError::EmptyClassName | SchoolClassError::EmptyTeacher => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", message)
            }
            SchoolClassError::DuplicateAssignment(_) => json_error(StatusCode::CONFLICT, "conflict", message),
            SchoolClassError::CapacityExceeded { .. } => {
                json_error(StatusCode::UNPROCESSABLE_ENTITY, "capacity_exceeded", message)
            }
        },
        SchoolClassServiceError::Repository(e) => repository_error_to_response(e),
    }
}

fn repository_error_to_response(err: RepositoryError) -> axum::response::Response {
    tracing::error!(error = %err, "repository failure");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", err.to_string())
}

pub fn invalid_id(err: InvalidId) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_id", err.to_string())
}

/// Unreadable or incomplete request bodies.
pub fn invalid_body(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
