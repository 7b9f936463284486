//! App module - contains the main application state and logic

mod predict;
mod views;
mod voice;

use crate::client::{PredictError, PredictionClient};
use crate::session::ChatSession;
use crate::settings::Settings;
use crate::theme;
use crate::types::PredictionResult;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Settled prediction outcomes, pushed from runtime tasks and drained by the
/// update loop.
pub(crate) type PredictionInbox = Arc<Mutex<Vec<(u64, Result<PredictionResult, PredictError>)>>>;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) session: ChatSession,
    pub(crate) client: PredictionClient,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) inbox: PredictionInbox,
    // Input bar
    pub(crate) input: String,
    pub(crate) focus_input: bool,
    // Voice capture
    pub(crate) voice_command: Option<String>,
    pub(crate) voice_busy: bool,
    // Window geometry tracking for save on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self {
            session: ChatSession::new(),
            client: PredictionClient::new(settings.service_url.clone()),
            runtime: tokio::runtime::Runtime::new().unwrap(),
            inbox: Arc::new(Mutex::new(Vec::new())),
            input: String::new(),
            focus_input: true,
            voice_command: settings.voice_command,
            voice_busy: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            service_url: self.client.base_url().to_string(),
            voice_command: self.voice_command.clone(),
        };
        settings.save(&self.data_dir);
    }

    /// Voice input is an optional affordance: no transcriber configured
    /// means no mic button.
    pub fn voice_available(&self) -> bool {
        self.voice_command.is_some()
    }
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Settle predictions resolved by background tasks
        self.poll_predictions();

        // Apply voice capture results from background threads
        self.poll_voice_results(ctx);

        // Result panel (must be added BEFORE CentralPanel)
        self.render_result_panel(ctx);

        // Input bar pinned to the bottom
        self.render_input_bar(ctx);

        // Chat log
        self.render_chat_panel(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
    }
}
