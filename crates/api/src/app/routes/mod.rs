use axum::Router;

pub mod classes;
pub mod students;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/students", students::router())
        .nest("/classes", classes::router())
}

/// Parse a path segment into a typed key.
pub(crate) fn parse_key<K>(raw: &str) -> Result<K, axum::response::Response>
where
    K: std::str::FromStr<Err = schoolhub_core::InvalidId>,
{
    raw.parse().map_err(crate::app::errors::invalid_id)
}
