// src/api/handlers/languages.rs
use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::api::AppState;

#[derive(Serialize)]
pub struct LanguageInfo {
    pub name: String,
    pub id: u32,
    pub extension: String,
    pub interactive_shim: bool,
}

#[derive(Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageInfo>,
}

pub async fn list_languages(state: web::Data<AppState>) -> Result<HttpResponse> {
    let languages = state
        .languages
        .iter()
        .map(|l| LanguageInfo {
            name: l.name.clone(),
            id: l.id,
            extension: l.extension.clone(),
            interactive_shim: l.shim.is_some(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(LanguagesResponse { languages }))
}
