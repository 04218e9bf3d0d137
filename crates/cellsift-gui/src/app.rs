use std::cell::RefCell;
use std::rc::Rc;

use cellsift_core::cell::Cell;
use cellsift_core::config::DisplayConfig;
use cellsift_core::error::Result;
use cellsift_core::highlight::OutlineColor;
use cellsift_core::io::loader::ProjectionImage;
use cellsift_core::session::{CurationObserver, CurationOutcome, CurationSession};

use crate::convert::projection_to_color_image;
use crate::panels;
use crate::state::UIState;

pub struct CurationApp {
    pub session: CurationSession,
    pub projection: egui::TextureHandle,
    pub display: DisplayConfig,
    pub ui_state: UIState,
    log: Rc<RefCell<Vec<String>>>,
    outcome: Rc<RefCell<CurationOutcome>>,
}

impl CurationApp {
    pub fn new(
        ctx: &egui::Context,
        mut session: CurationSession,
        image: ProjectionImage,
        display: DisplayConfig,
        outcome: Rc<RefCell<CurationOutcome>>,
    ) -> Self {
        // Ctrl +/- drive the overlay zoom, not the UI scale.
        ctx.options_mut(|o| o.zoom_with_keyboard = false);

        let projection = ctx.load_texture(
            "projection",
            projection_to_color_image(&image),
            egui::TextureOptions::NEAREST,
        );

        let log = Rc::new(RefCell::new(Vec::new()));
        session.add_observer(Box::new(StatusLog(log.clone())));

        Self {
            session,
            projection,
            display,
            ui_state: UIState::default(),
            log,
            outcome,
        }
    }

    /// Run one session operation. A failure here is a contract violation:
    /// it is shown to the user and all further input is ignored.
    pub fn run<T>(&mut self, op: impl FnOnce(&mut CurationSession) -> Result<T>) -> Option<T> {
        if self.ui_state.fatal.is_some() {
            return None;
        }
        match op(&mut self.session) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::error!("{e}");
                self.add_log(format!("ERROR: {e}"));
                self.ui_state.fatal = Some(e.to_string());
                None
            }
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log.borrow_mut().push(msg);
    }

    pub fn log_messages(&self) -> std::cell::Ref<'_, Vec<String>> {
        self.log.borrow()
    }

    /// Freeze the selection and close the window.
    pub fn export(&mut self, ctx: &egui::Context) {
        if let Some(result) = self.run(|s| s.export()) {
            *self.outcome.borrow_mut() = CurationOutcome::Exported(result);
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::R)) {
            self.run(|s| s.reset_zoom());
        }
        let zoom_in = ctx.input_mut(|i| {
            i.consume_key(egui::Modifiers::COMMAND, egui::Key::Equals)
                || i.consume_key(egui::Modifiers::COMMAND, egui::Key::Plus)
        });
        if zoom_in {
            self.run(|s| s.zoom_in());
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Minus)) {
            self.run(|s| s.zoom_out());
        }
    }

    fn show_fatal(&self, ctx: &egui::Context) {
        let Some(ref message) = self.ui_state.fatal else {
            return;
        };
        egui::Window::new("Curation error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
    }
}

impl eframe::App for CurationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.session.is_finished() {
            self.session.close();
        }

        if !self.session.is_finished() {
            self.handle_shortcuts(ctx);
        }

        panels::status::show(ctx, self);
        panels::cell_list::show(ctx, self);
        panels::traces::show(ctx, self);
        panels::projection::show(ctx, self);

        self.show_fatal(ctx);

        if !self.session.take_outline_redraws().is_empty() {
            ctx.request_repaint();
        }
    }
}

/// Mirrors session events into the status bar log.
struct StatusLog(Rc<RefCell<Vec<String>>>);

impl CurationObserver for StatusLog {
    fn outline_recolored(&mut self, cell: &Cell, color: OutlineColor) {
        let state = match color {
            OutlineColor::Affirmative => "shown",
            OutlineColor::Negative => "hidden",
        };
        self.0.borrow_mut().push(format!("{} {state}", cell.key));
    }

    fn outlines_reset(&mut self) {
        self.0.borrow_mut().push("All outlines reset".into());
    }

    fn finished(&mut self, outcome: &CurationOutcome) {
        let msg = match outcome.accepted() {
            Some(result) => format!("Exported {} cells", result.len()),
            None => "Cancelled".to_string(),
        };
        self.0.borrow_mut().push(msg);
    }
}
