use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use schoolhub_core::StudentKey;

use crate::app::routes::parse_key;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/by-id/:student_id", get(get_student_by_code))
        .route("/:id", get(get_student).put(update_student).delete(delete_student))
}

pub async fn list_students(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.students.get_all().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::student_error_to_response(e),
    }
}

pub async fn get_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StudentKey = match parse_key(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.students.get_by_id(id).await {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(e) => errors::student_error_to_response(e),
    }
}

pub async fn get_student_by_code(
    Extension(services): Extension<Arc<AppServices>>,
    Path(student_id): Path<String>,
) -> axum::response::Response {
    match services.students.get_by_student_id(&student_id).await {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(e) => errors::student_error_to_response(e),
    }
}

pub async fn create_student(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::StudentRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::invalid_body(rejection),
    };
    match services.students.create(body.into()).await {
        Ok(dto) => (
            StatusCode::CREATED,
            [(header::LOCATION, format!("/students/{}", dto.id))],
            Json(dto),
        )
            .into_response(),
        Err(e) => errors::student_error_to_response(e),
    }
}

pub async fn update_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::StudentRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: StudentKey = match parse_key(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::invalid_body(rejection),
    };
    match services.students.update(id, body.into()).await {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(e) => errors::student_error_to_response(e),
    }
}

pub async fn delete_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StudentKey = match parse_key(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.students.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::student_error_to_response(e),
    }
}
