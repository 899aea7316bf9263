use crate::gemini;
use crate::history::HistoryStore;
use crate::parser::{self, ParsedDocument};
use crate::prompt;
use crate::types::AnalysisRecord;
use serde::Serialize;
use std::sync::Mutex;
use tauri::{AppHandle, Manager, State};

pub struct AppState {
    pub history: Mutex<HistoryStore>,
}

/// Sidebar entry: record id plus a vendor-derived display title.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub title: String,
    pub timestamp: i64,
}

#[tauri::command]
pub fn get_app_data_path(app: AppHandle) -> Result<String, String> {
    let path = app.path().app_data_dir().map_err(|e| e.to_string())?;
    path.to_str()
        .map(String::from)
        .ok_or_else(|| "Invalid path".to_string())
}

#[tauri::command]
pub fn get_app_version(app: AppHandle) -> String {
    app.package_info().version.to_string()
}

#[tauri::command]
pub fn open_app_data_folder(app: AppHandle) -> Result<(), String> {
    let path = app.path().app_data_dir().map_err(|e| e.to_string())?;
    opener::open(&path).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_gemini_status() -> String {
    gemini::gemini_status()
}

#[tauri::command]
pub fn get_languages() -> Vec<String> {
    prompt::LANGUAGES.iter().map(|l| l.to_string()).collect()
}

/// Run one analysis: validate input, call the generator on a blocking
/// thread, append the record to history on success.
#[tauri::command]
pub async fn analyze_receipt(
    state: State<'_, AppState>,
    text: String,
    target_language: String,
) -> Result<AnalysisRecord, String> {
    if text.trim().is_empty() {
        return Err("Please provide some text from a receipt or invoice.".to_string());
    }
    if !prompt::is_supported_language(&target_language) {
        return Err("Unsupported output language.".to_string());
    }

    let input = text.clone();
    let language = target_language.clone();
    let output =
        tauri::async_runtime::spawn_blocking(move || gemini::analyze_receipt_text(&input, &language))
            .await
            .map_err(|e| e.to_string())??;

    let record = AnalysisRecord::new(text, output);
    {
        let mut history = state.history.lock().map_err(|e| e.to_string())?;
        // The analysis itself succeeded; a persistence hiccup should not
        // take the result away from the user.
        if let Err(e) = history.append(record.clone()) {
            eprintln!("[history] Failed to persist new record: {}", e);
        }
    }
    Ok(record)
}

/// Render-model boundary: rebuild sections from stored raw output.
#[tauri::command]
pub fn parse_analysis(formatted_output: String) -> ParsedDocument {
    parser::parse(&formatted_output)
}

#[tauri::command]
pub fn get_history(state: State<AppState>) -> Result<Vec<AnalysisRecord>, String> {
    let history = state.history.lock().map_err(|e| e.to_string())?;
    Ok(history.records().to_vec())
}

#[tauri::command]
pub fn get_history_titles(state: State<AppState>) -> Result<Vec<HistoryEntry>, String> {
    let history = state.history.lock().map_err(|e| e.to_string())?;
    Ok(history
        .records()
        .iter()
        .map(|r| HistoryEntry {
            id: r.id.clone(),
            title: parser::record_title(&r.formatted_output),
            timestamp: r.timestamp,
        })
        .collect())
}

#[tauri::command]
pub fn get_history_by_id(
    state: State<AppState>,
    id: String,
) -> Result<Option<AnalysisRecord>, String> {
    let history = state.history.lock().map_err(|e| e.to_string())?;
    Ok(history.get(&id).cloned())
}

#[tauri::command]
pub fn clear_history(state: State<AppState>) -> Result<(), String> {
    let mut history = state.history.lock().map_err(|e| e.to_string())?;
    history.clear()
}
