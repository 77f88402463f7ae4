//! Sidechat panel host
//!
//! Owns the webview panel and relays typed envelopes between it and the
//! two adapters: the completion API client and the open project folder.
//! The webview posts [`UiMessage`] values through the `post_message`
//! command; replies come back asynchronously as `host-message` events.

// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod logger;

use sidechat_core::{route, CompletionClient, Config, HostMessage, UiMessage};
use std::path::PathBuf;
use std::sync::Mutex;
use tauri::{AppHandle, Emitter, State};

/// Event name the webview listens on for reply envelopes
pub const HOST_MESSAGE_EVENT: &str = "host-message";

/// State shared across panel commands.
///
/// The workspace root is read fresh on every file request, so changing the
/// open folder takes effect on the next call.
struct PanelState {
    client: Option<CompletionClient>,
    workspace_root: Option<PathBuf>,
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Relay one UI envelope and post the reply back to the webview.
///
/// Each call is one independent round trip; there is no queue and no
/// correlation between concurrent calls.
#[tauri::command]
async fn post_message(
    app: AppHandle,
    state: State<'_, Mutex<PanelState>>,
    message: UiMessage,
) -> Result<(), String> {
    let (client, workspace_root) = {
        let state = state.lock().unwrap();
        (state.client.clone(), state.workspace_root.clone())
    };

    let reply: HostMessage = route(client.as_ref(), workspace_root.as_deref(), message).await;
    app.emit(HOST_MESSAGE_EVENT, &reply).map_err(|e| e.to_string())
}

/// Open a project folder; subsequent file requests resolve against it
#[tauri::command]
fn open_workspace(state: State<Mutex<PanelState>>, path: PathBuf) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("not a directory: {}", path.display()));
    }
    log::info!("workspace opened: {}", path.display());
    state.lock().unwrap().workspace_root = Some(path);
    Ok(())
}

/// Close the open project folder; file requests fail until one is opened
#[tauri::command]
fn close_workspace(state: State<Mutex<PanelState>>) {
    log::info!("workspace closed");
    state.lock().unwrap().workspace_root = None;
}

/// Currently open project folder, if any
#[tauri::command]
fn workspace_root(state: State<Mutex<PanelState>>) -> Option<PathBuf> {
    state.lock().unwrap().workspace_root.clone()
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    logger::setup();

    let config = Config::load().unwrap_or_else(|_| Config::new());
    let client = config.client();
    if client.is_none() {
        log::warn!(
            "no API key found; chat requests will fail until {} or the config file provides one",
            sidechat_core::config::API_KEY_ENV
        );
    }

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .manage(Mutex::new(PanelState {
            client,
            workspace_root: None,
        }))
        .invoke_handler(tauri::generate_handler![
            post_message,
            open_workspace,
            close_workspace,
            workspace_root,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
