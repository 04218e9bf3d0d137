use cellsift_core::geometry::{Point, Size};

use crate::app::CurationApp;
use crate::convert::{outline_color, to_pos, to_point};

const LINE_DEGREES: f32 = 15.0;
/// Pixel deltas (touchpads) are converted at this many points per wheel notch.
const POINTS_PER_NOTCH: f32 = 50.0;
const PAGE_DEGREES: f32 = 120.0;

pub fn show(ctx: &egui::Context, app: &mut CurationApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        toolbar(ui, app);
        ui.separator();

        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        let active = !app.session.is_finished() && app.ui_state.fatal.is_none();
        if active {
            on_layout(app, rect);
            on_wheel(ui, &response, app, rect);
            on_drag(&response, app);
            if response.double_clicked() {
                app.run(|s| s.reset_zoom());
            }
        }

        let painter = ui.painter_at(rect);
        draw_image(&painter, app, rect);
        draw_outlines(&painter, app, rect);
        draw_labels(&painter, app, rect);
    });
}

fn toolbar(ui: &mut egui::Ui, app: &mut CurationApp) {
    let enabled = !app.session.is_finished() && app.ui_state.fatal.is_none();
    let mut zoom_in = false;
    let mut zoom_out = false;
    let mut reset = false;
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal(|ui| {
            zoom_in = ui.button("+").on_hover_text("Zoom in (Ctrl +)").clicked();
            zoom_out = ui.button("-").on_hover_text("Zoom out (Ctrl -)").clicked();
            reset = ui.button("R").on_hover_text("Reset view (R)").clicked();
        });
    });
    if zoom_in {
        app.run(|s| s.zoom_in());
    }
    if zoom_out {
        app.run(|s| s.zoom_out());
    }
    if reset {
        app.run(|s| s.reset_zoom());
    }
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// First layout shows the overlay; later size changes are resizes.
fn on_layout(app: &mut CurationApp, rect: egui::Rect) {
    let size = rect.size();
    if app.ui_state.projection_size == Some(size) {
        return;
    }
    let viewport = Size::new(size.x, size.y);
    if app.ui_state.projection_shown {
        app.run(|s| s.on_resize(viewport));
    } else {
        app.run(|s| s.on_show(viewport));
        app.ui_state.projection_shown = true;
    }
    app.ui_state.projection_size = Some(size);
}

/// Ctrl + wheel zooms around the cursor. Plain wheel is left to egui.
fn on_wheel(ui: &egui::Ui, response: &egui::Response, app: &mut CurationApp, rect: egui::Rect) {
    if !response.hovered() {
        return;
    }
    let Some(cursor) = ui.input(|i| i.pointer.hover_pos()) else {
        return;
    };

    let degrees: f32 = ui.input(|i| {
        i.raw
            .events
            .iter()
            .filter_map(|e| match e {
                egui::Event::MouseWheel {
                    unit,
                    delta,
                    modifiers,
                    ..
                } if modifiers.command => Some(match unit {
                    egui::MouseWheelUnit::Line => delta.y * LINE_DEGREES,
                    egui::MouseWheelUnit::Point => delta.y / POINTS_PER_NOTCH * LINE_DEGREES,
                    egui::MouseWheelUnit::Page => delta.y * PAGE_DEGREES,
                }),
                _ => None,
            })
            .sum()
    });
    if degrees == 0.0 {
        return;
    }

    let anchor = to_point(rect.min, cursor);
    app.run(|s| s.on_wheel(degrees, anchor));
}

fn on_drag(response: &egui::Response, app: &mut CurationApp) {
    if !response.dragged_by(egui::PointerButton::Primary)
        && !response.dragged_by(egui::PointerButton::Middle)
    {
        return;
    }
    let delta = response.drag_delta();
    if delta != egui::Vec2::ZERO {
        app.run(|s| s.pan(Point::new(delta.x, delta.y)));
    }
}

fn draw_image(painter: &egui::Painter, app: &CurationApp, rect: egui::Rect) {
    let viewport = app.session.viewport();
    let [w, h] = app.projection.size();
    let min = viewport.scene_to_screen(Point::ZERO);
    let max = viewport.scene_to_screen(Point::new(w as f32, h as f32));
    painter.image(
        app.projection.id(),
        egui::Rect::from_min_max(to_pos(rect.min, min), to_pos(rect.min, max)),
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_outlines(painter: &egui::Painter, app: &CurationApp, rect: egui::Rect) {
    let viewport = app.session.viewport();
    let highlighter = app.session.highlighter();
    for (index, cell) in app.session.registry().iter() {
        let style = highlighter.style(index);
        let points: Vec<egui::Pos2> = cell
            .outline
            .iter()
            .map(|&p| to_pos(rect.min, viewport.scene_to_screen(p)))
            .collect();
        let stroke = egui::Stroke::new(style.stroke_width, outline_color(style.stroke));
        painter.add(egui::Shape::closed_line(points, stroke));
    }
}

fn draw_labels(painter: &egui::Painter, app: &CurationApp, rect: egui::Rect) {
    let viewport = app.session.viewport();
    let font = egui::FontId::proportional(app.display.label_font_size);
    for (_, cell) in app.session.registry().iter() {
        let pos = to_pos(rect.min, viewport.scene_to_screen(cell.label_anchor));
        painter.text(
            pos,
            egui::Align2::CENTER_CENTER,
            &cell.label,
            font.clone(),
            egui::Color32::WHITE,
        );
    }
}
