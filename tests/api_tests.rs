// tests/api_tests.rs
use actix_web::http::StatusCode;
use actix_web::{test, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use codebook::api::handlers::RATE_LIMITED_MESSAGE;
use codebook::api::{configure_app, AppState};
use codebook::config::AppConfig;
use codebook::errors::{CodebookError, Result};
use codebook::executor::{ExecutionService, Submission};
use codebook::languages::LanguageTable;
use codebook::models::{RunResult, RunStatus};

#[derive(Clone, Copy)]
enum Behaviour {
    Accept,
    Unauthorized,
    Broken,
}

struct FakeExecutor {
    behaviour: Behaviour,
    seen: Arc<Mutex<Vec<Submission>>>,
}

#[async_trait]
impl ExecutionService for FakeExecutor {
    async fn execute(&self, submission: &Submission) -> Result<RunResult> {
        self.seen.lock().unwrap().push(submission.clone());
        match self.behaviour {
            Behaviour::Accept => Ok(RunResult {
                stdout: Some("hello\n".into()),
                time: Some("0.004".into()),
                memory: Some(812.0),
                status: Some(RunStatus {
                    id: 3,
                    description: "Accepted".into(),
                }),
                ..RunResult::default()
            }),
            Behaviour::Unauthorized => Err(CodebookError::ApiError {
                status: 401,
                body: "Unauthorized".into(),
            }),
            Behaviour::Broken => Err(CodebookError::Io(std::io::Error::other("socket hang up"))),
        }
    }
}

fn state(behaviour: Behaviour, config: AppConfig) -> (AppState, Arc<Mutex<Vec<Submission>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let executor = Arc::new(FakeExecutor {
        behaviour,
        seen: seen.clone(),
    });
    let state = AppState::with_executor(config, LanguageTable::builtin().unwrap(), executor);
    (state, seen)
}

#[actix_web::test]
async fn test_run_forwards_language_id_and_returns_result() {
    let (state, seen) = state(Behaviour::Accept, AppConfig::default());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/run")
        .set_json(json!({"language": "Python", "source": "print('hello')", "stdin": "1\n"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["stdout"], "hello\n");
    assert_eq!(body["stderr"], Value::Null);
    assert_eq!(body["time"], "0.004");
    assert_eq!(body["status"]["description"], "Accepted");

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen[0],
        Submission {
            source_code: "print('hello')".into(),
            language_id: 71,
            stdin: "1\n".into(),
        }
    );
}

#[actix_web::test]
async fn test_missing_stdin_defaults_to_empty() {
    let (state, seen) = state(Behaviour::Accept, AppConfig::default());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/run")
        .set_json(json!({"language": "C", "source": "int main(){}"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(seen.lock().unwrap()[0].stdin, "");
}

#[actix_web::test]
async fn test_unsupported_language_is_400() {
    let (state, seen) = state(Behaviour::Accept, AppConfig::default());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/run")
        .set_json(json!({"language": "Brainfuck", "source": "+."}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Unsupported language: Brainfuck"}));
    assert!(seen.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_upstream_rejection_is_502_with_details() {
    let (state, _) = state(Behaviour::Unauthorized, AppConfig::default());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/run")
        .set_json(json!({"language": "Go", "source": "package main"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"error": "Judge0 request failed", "status": 401, "body": "Unauthorized"})
    );
}

#[actix_web::test]
async fn test_other_failures_are_500() {
    let (state, _) = state(Behaviour::Broken, AppConfig::default());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/run")
        .set_json(json!({"language": "Go", "source": "package main"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("socket hang up"));
}

#[actix_web::test]
async fn test_rate_limit_returns_429() {
    let mut config = AppConfig::default();
    config.rate_limit.max_requests = 2;
    let (state, seen) = state(Behaviour::Accept, config);
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/run")
            .peer_addr("10.1.2.3:5555".parse().unwrap())
            .set_json(json!({"language": "Python", "source": "print(1)"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        statuses.push(resp.status());
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            let body = test::read_body(resp).await;
            assert_eq!(body, RATE_LIMITED_MESSAGE.as_bytes());
        }
    }

    assert_eq!(
        statuses,
        vec![StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]
    );
    assert_eq!(seen.lock().unwrap().len(), 2);

    // other routes are not limited
    let req = test::TestRequest::get()
        .uri("/healthz")
        .peer_addr("10.1.2.3:5555".parse().unwrap())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_oversized_body_is_413() {
    let mut config = AppConfig::default();
    config.json_body_limit = 64;
    let (state, seen) = state(Behaviour::Accept, config);
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/run")
        .set_json(json!({"language": "Python", "source": "x".repeat(500)}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
    assert!(seen.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_malformed_json_is_400() {
    let (state, _) = state(Behaviour::Accept, AppConfig::default());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::post()
        .uri("/run")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_healthz_says_ok() {
    let (state, _) = state(Behaviour::Accept, AppConfig::default());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get().uri("/healthz").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "OK".as_bytes());
}

#[actix_web::test]
async fn test_languages_lists_table() {
    let (state, _) = state(Behaviour::Accept, AppConfig::default());
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get().uri("/languages").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let languages = body["languages"].as_array().unwrap();
    assert_eq!(languages.len(), 13);
    let js = languages.iter().find(|l| l["name"] == "JavaScript").unwrap();
    assert_eq!(js["id"], 63);
    assert_eq!(js["interactive_shim"], true);
}
