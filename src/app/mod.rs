//! App module - contains the main application state and logic

mod fetch;
mod views;

use crate::mail;
use crate::settings::Settings;
use crate::theme;
use crate::types::FetchState;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Shared with the fetch task; the task may finish after the view is gone
    pub(crate) fetch_state: Arc<Mutex<FetchState>>,
    pub(crate) fetch_started: bool,
    // Resolved endpoint (env var > settings > default) used for requests
    pub(crate) api_url: String,
    // Raw settings override; the only endpoint value that gets persisted
    pub(crate) api_url_override: Option<String>,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Inbox state
    pub(crate) selected_folder: usize,
    pub(crate) selected_entry: Option<usize>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Window geometry tracking for saving on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);
        theme::apply_visuals(&cc.egui_ctx);

        Self::with_settings(settings, data_dir)
    }

    /// Construct the app state without an eframe creation context.
    pub fn with_settings(settings: Settings, data_dir: PathBuf) -> Self {
        Self {
            fetch_state: Arc::new(Mutex::new(FetchState::Loading)),
            fetch_started: false,
            api_url: settings.api_url_or_default(),
            api_url_override: settings.api_url.clone(),
            runtime: tokio::runtime::Runtime::new().unwrap(),
            selected_folder: mail::DEFAULT_FOLDER,
            selected_entry: None,
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    /// Snapshot of the current fetch state.
    pub fn fetch_state(&self) -> FetchState {
        self.fetch_state.lock().unwrap().clone()
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            api_url: self.api_url_override.clone(),
        };
        settings.save(&self.data_dir);
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some(message);
        self.toast_start = Some(std::time::Instant::now());
    }

    pub fn select_folder(&mut self, idx: usize) {
        self.selected_folder = idx;
        self.selected_entry = None;
        self.show_toast(format!("You clicked on {}", mail::FOLDERS[idx].label));
    }

    pub fn select_entry(&mut self, idx: usize) {
        self.selected_entry = Some(idx);
        self.show_toast(format!(
            "You clicked on entry for MRN: {}",
            mail::SAMPLE_ENTRIES[idx].mrn
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_data_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        let _ = std::fs::remove_file(dir.join("settings.json"));
        dir
    }

    #[test]
    fn save_settings_does_not_promote_resolved_url() {
        // Default settings resolve to the built-in endpoint; saving must not
        // write that resolved value into the settings file
        let dir = temp_data_dir("dataview-save-no-promote");
        let app = App::with_settings(Settings::default(), dir.clone());
        app.save_settings();

        let reloaded = Settings::load(&dir);
        assert_eq!(reloaded.api_url, None);
    }

    #[test]
    fn save_settings_keeps_explicit_override() {
        let dir = temp_data_dir("dataview-save-explicit");
        let settings = Settings {
            api_url: Some("http://127.0.0.1:9000/api/data".to_string()),
            ..Default::default()
        };
        let app = App::with_settings(settings, dir.clone());
        app.save_settings();

        let reloaded = Settings::load(&dir);
        assert_eq!(
            reloaded.api_url.as_deref(),
            Some("http://127.0.0.1:9000/api/data")
        );
    }

    #[test]
    fn mounts_with_messages_folder_selected() {
        let app = App::with_settings(Settings::default(), std::env::temp_dir());
        assert_eq!(mail::FOLDERS[app.selected_folder].id, "messages");
        assert_eq!(app.selected_entry, None);
    }

    #[test]
    fn folder_click_selects_and_announces() {
        let mut app = App::with_settings(Settings::default(), std::env::temp_dir());
        app.select_folder(0);
        assert_eq!(app.selected_folder, 0);
        assert_eq!(
            app.toast_message.as_deref(),
            Some("You clicked on Labs/Diag - 8")
        );
    }

    #[test]
    fn entry_click_selects_and_announces_mrn() {
        let mut app = App::with_settings(Settings::default(), std::env::temp_dir());
        app.select_entry(1);
        assert_eq!(app.selected_entry, Some(1));
        assert_eq!(
            app.toast_message.as_deref(),
            Some("You clicked on entry for MRN: 234567")
        );
    }
}
