pub mod commands;
pub mod db;
pub mod gemini;
pub mod history;
pub mod parser;
pub mod prompt;
pub mod types;

use commands::AppState;
use history::HistoryStore;
use std::sync::Mutex;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let app_data_dir = app.path().app_data_dir().map_err(|e| e.to_string())?;
            // Load .env from app data dir so production users can place credentials there (Settings → Open app data folder)
            let env_path = app_data_dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
            }
            let db_path = app_data_dir.join("spendwise.db");
            let db = db::Db::new(db_path)?;
            app.manage(AppState {
                history: Mutex::new(HistoryStore::load(db)),
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_app_data_path,
            commands::open_app_data_folder,
            commands::get_app_version,
            commands::get_gemini_status,
            commands::get_languages,
            commands::analyze_receipt,
            commands::parse_analysis,
            commands::get_history,
            commands::get_history_titles,
            commands::get_history_by_id,
            commands::clear_history,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
