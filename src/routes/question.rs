use axum::{http::Method, routing::get, Router};
use tower_http::{
    cors::{AllowHeaders, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::handlers::question::{
    create_question, delete_question, get_question, list_questions, update_question,
};
use crate::AppState;

/// questions 路由
fn question_routes() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/", get(list_questions).post(create_question))
        .route(
            "/questions/:question_id",
            get(get_question).put(update_question).delete(delete_question),
        )
}

/// Only the configured front-end origin may call the API from a browser
fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the full application router
pub fn app(state: AppState, config: &Config) -> Router {
    Router::new()
        .merge(question_routes())
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
