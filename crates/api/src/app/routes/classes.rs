use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};

use schoolhub_core::{ClassKey, StudentKey};

use crate::app::routes::parse_key;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route("/:id", get(get_class).put(update_class).delete(delete_class))
        .route("/:id/assign/:student_id", post(assign_student))
        .route("/:id/unassign/:student_id", delete(unassign_student))
}

pub async fn list_classes(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.classes.get_all().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::class_error_to_response(e),
    }
}

pub async fn get_class(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClassKey = match parse_key(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.classes.get_by_id(id).await {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(e) => errors::class_error_to_response(e),
    }
}

pub async fn create_class(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::SchoolClassRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::invalid_body(rejection),
    };
    match services.classes.create(body.into()).await {
        Ok(dto) => (
            StatusCode::CREATED,
            [(header::LOCATION, format!("/classes/{}", dto.id))],
            Json(dto),
        )
            .into_response(),
        Err(e) => errors::class_error_to_response(e),
    }
}

pub async fn update_class(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::SchoolClassRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: ClassKey = match parse_key(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::invalid_body(rejection),
    };
    match services.classes.update(id, body.into()).await {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(e) => errors::class_error_to_response(e),
    }
}

pub async fn delete_class(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClassKey = match parse_key(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.classes.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::class_error_to_response(e),
    }
}

pub async fn assign_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, student_id)): Path<(String, String)>,
) -> axum::response::Response {
    let (id, student): (ClassKey, StudentKey) = match (parse_key(&id), parse_key(&student_id)) {
        (Ok(c), Ok(s)) => (c, s),
        (Err(res), _) | (_, Err(res)) => return res,
    };
    match services.classes.assign_student(id, student).await {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(e) => errors::class_error_to_response(e),
    }
}

pub async fn unassign_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, student_id)): Path<(String, String)>,
) -> axum::response::Response {
    let (id, student): (ClassKey, StudentKey) = match (parse_key(&id), parse_key(&student_id)) {
        (Ok(c), Ok(s)) => (c, s),
        (Err(res), _) | (_, Err(res)) => return res,
    };
    match services.classes.unassign_student(id, student).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::class_error_to_response(e),
    }
}
