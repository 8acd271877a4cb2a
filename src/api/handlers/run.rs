// src/api/handlers/run.rs
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpResponse, Result};
use serde_json::json;
use std::net::{IpAddr, Ipv4Addr};
use uuid::Uuid;

use crate::api::AppState;
use crate::errors::CodebookError;
use crate::executor::Submission;
use crate::models::{ApiError, RunRequest};

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests, please try again later.";

/// Middleware guarding `/run` with the per-IP fixed-window limiter.
pub async fn limit_runs(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let limiter = req
        .app_data::<web::Data<AppState>>()
        .map(|state| state.limiter.clone());
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if let Some(limiter) = limiter {
        if !limiter.check(ip).await {
            log::warn!("🚦 Rate limit hit for {}", ip);
            let response = HttpResponse::TooManyRequests()
                .content_type("text/plain; charset=utf-8")
                .body(RATE_LIMITED_MESSAGE);
            return Ok(req.into_response(response));
        }
    }

    Ok(next.call(req).await?.map_into_boxed_body())
}

pub async fn run_code(
    state: web::Data<AppState>,
    req: web::Json<RunRequest>,
) -> Result<HttpResponse> {
    let run_id = Uuid::new_v4();
    let RunRequest { language, source, stdin } = req.into_inner();

    let Some(language_id) = state.languages.judge0_id(&language) else {
        log::warn!("[{}] Unsupported language requested: '{}'", run_id, language);
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: CodebookError::UnsupportedLanguage(language).to_string(),
        }));
    };

    log::info!(
        "[{}] ▶️  Running {} ({} bytes source, {} bytes stdin)",
        run_id,
        language,
        source.len(),
        stdin.len()
    );

    let submission = Submission {
        source_code: source,
        language_id,
        stdin,
    };

    match state.executor.execute(&submission).await {
        Ok(result) => {
            log::info!(
                "[{}] ✅ Finished: {}",
                run_id,
                result
                    .status
                    .as_ref()
                    .map(|s| s.description.as_str())
                    .unwrap_or("no status")
            );
            Ok(HttpResponse::Ok().json(result))
        }
        Err(CodebookError::ApiError { status, body }) => {
            log::error!("[{}] ❌ Judge0 request failed with status {}", run_id, status);
            Ok(HttpResponse::BadGateway().json(json!({
                "error": "Judge0 request failed",
                "status": status,
                "body": body,
            })))
        }
        Err(e) => {
            log::error!("[{}] ❌ Server /run error: {}", run_id, e);
            Ok(HttpResponse::InternalServerError().json(ApiError { error: e.to_string() }))
        }
    }
}
