//! Single-attempt call to the Gemini generateContent endpoint.

use crate::prompt;
use reqwest::blocking::Client;

/// The one user-facing failure message; underlying causes stay in the log.
pub const GENERATION_ERROR: &str =
    "We encountered an error analyzing your text. Please ensure it's readable and try again.";

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

fn load_env() {
    let _ = dotenvy::dotenv();
}

pub fn gemini_status() -> String {
    load_env();
    match std::env::var("GEMINI_API_KEY") {
        Ok(k) if !k.trim().is_empty() => "configured".to_string(),
        _ => "not_configured".to_string(),
    }
}

/// Run one analysis request and return the verbatim text payload. No
/// retry; any transport, auth or provider failure (or an empty body)
/// surfaces as the single fixed error message.
pub fn analyze_receipt_text(text: &str, target_language: &str) -> Result<String, String> {
    load_env();
    let key = std::env::var("GEMINI_API_KEY").map_err(|_| {
        eprintln!("[gemini] GEMINI_API_KEY not set in .env");
        GENERATION_ERROR.to_string()
    })?;
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
        model, key
    );

    let user_prompt = prompt::build_user_prompt(text, target_language);
    let body = serde_json::json!({
        "contents": [{ "parts": [{ "text": user_prompt }] }],
        "systemInstruction": { "parts": [{ "text": prompt::SYSTEM_PROMPT }] },
        "generationConfig": { "temperature": 0.1 }
    });

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(120))
        .build()
        .map_err(|e| {
            eprintln!("[gemini] Client build error: {}", e);
            GENERATION_ERROR.to_string()
        })?;

    let response = client.post(&url).json(&body).send().map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            eprintln!("[gemini] Network error (connect/timeout): {}", e);
        } else {
            eprintln!("[gemini] Network error: {}", e);
        }
        GENERATION_ERROR.to_string()
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        eprintln!(
            "[gemini] Generation failed ({}): {}",
            status,
            if body.is_empty() {
                "Invalid key or model?"
            } else {
                body.as_str()
            }
        );
        return Err(GENERATION_ERROR.to_string());
    }

    let json: serde_json::Value = response.json().map_err(|e| {
        eprintln!("[gemini] Invalid JSON in response: {}", e);
        GENERATION_ERROR.to_string()
    })?;

    extract_text(&json).ok_or_else(|| {
        eprintln!("[gemini] Response contained no text payload");
        GENERATION_ERROR.to_string()
    })
}

/// Concatenate candidates[0].content.parts[*].text; None when the
/// response carries no non-empty text.
fn extract_text(json: &serde_json::Value) -> Option<String> {
    let parts = json
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())?;
    let text = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect::<Vec<_>>()
        .join("");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
