// src/client/share.rs
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::errors::{CodebookError, Result};

pub const SHARE_PARAM: &str = "share";

/// What a share link carries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharedCode {
    pub language: String,
    pub code: String,
}

/// Builds `<base_url>?share=<token>` for the trimmed code.
pub fn encode_share_link(base_url: &str, language: &str, code: &str) -> Result<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(CodebookError::EmptySource);
    }

    let payload = serde_json::to_vec(&SharedCode {
        language: language.to_string(),
        code: code.to_string(),
    })?;
    let token = URL_SAFE_NO_PAD.encode(payload);

    let mut url = Url::parse(base_url)
        .map_err(|e| CodebookError::InvalidShareLink(format!("{}: {}", base_url, e)))?;
    url.query_pairs_mut().clear().append_pair(SHARE_PARAM, &token);
    Ok(url.into())
}

/// Accepts either a full link or the bare token, in the current format or
/// the browser notebook's older one.
pub fn decode_share_link(link: &str) -> Result<SharedCode> {
    let link = link.trim();
    let token = match Url::parse(link) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == SHARE_PARAM)
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| CodebookError::InvalidShareLink(format!("no '{}' parameter", SHARE_PARAM)))?,
        Err(_) => link.to_string(),
    };

    let current = URL_SAFE_NO_PAD
        .decode(token.as_bytes())
        .ok()
        .and_then(|payload| serde_json::from_slice(&payload).ok());
    match current {
        Some(shared) => Ok(shared),
        None => decode_legacy_token(&token),
    }
}

/// Older links carry standard base64 of the percent-encoded JSON. Query
/// decoding has already turned any `+` of such a token into a space.
fn decode_legacy_token(token: &str) -> Result<SharedCode> {
    let token = token.replace(' ', "+");
    let escaped = String::from_utf8(STANDARD.decode(token.as_bytes())?)
        .map_err(|e| CodebookError::InvalidShareLink(e.to_string()))?;

    let mut carrier = Url::parse("http://localhost/")
        .map_err(|e| CodebookError::InvalidShareLink(e.to_string()))?;
    carrier.set_query(Some(&format!("v={}", escaped)));
    let json = carrier
        .query_pairs()
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();
    Ok(serde_json::from_str(&json)?)
}
