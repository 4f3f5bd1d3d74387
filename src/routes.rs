use crate::{
    config::ALLOWED_ORIGINS,
    routes::{
        health::get_health,
        index::get_registration_form,
        students::{delete_student, get_students, post_student, put_student},
    },
    state::RegistryState,
};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, put},
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod health;
pub mod index;
pub mod students;

fn cors_layer() -> CorsLayer {
    let origins = ALLOWED_ORIGINS.map(HeaderValue::from_static);

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn router(state: RegistryState) -> Router {
    Router::new()
        .route("/", get(get_registration_form))
        .route("/health", get(get_health))
        .route("/api/student", get(get_students).post(post_student))
        .route("/api/student/{id}", put(put_student).delete(delete_student))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
