// src/api/routes.rs
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::middleware::from_fn;
use actix_web::{web, HttpResponse};

use super::handlers;
use super::AppState;
use crate::models::ApiError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(handlers::health_check))
        .route("/languages", web::get().to(handlers::list_languages))
        .service(
            web::resource("/run")
                .wrap(from_fn(handlers::limit_runs))
                .route(web::post().to(handlers::run_code)),
        );
}

/// Registers shared state, the JSON body policy and all routes.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let limit = state.config.json_body_limit;
        cfg.app_data(web::Data::new(state))
            .app_data(json_config(limit))
            .configure(configure_routes);
    }
}

/// Bodies over `limit` bytes get 413, malformed ones 400, both as JSON.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let status = match &err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    StatusCode::PAYLOAD_TOO_LARGE
                }
                _ => StatusCode::BAD_REQUEST,
            };
            log::warn!("Rejected JSON body: {}", err);
            let response = HttpResponse::build(status).json(ApiError { error: err.to_string() });
            InternalError::from_response(err, response).into()
        })
}
