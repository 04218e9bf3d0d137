use cellsift_core::cell::CellKey;
use cellsift_core::trace::TracePanel;
use egui_plot::{HLine, Line, LineStyle, Plot, PlotPoints};

use crate::app::CurationApp;

const PANEL_HEIGHT: f32 = 320.0;
const VIEW_LIST_WIDTH: f32 = 140.0;

pub fn show(ctx: &egui::Context, app: &mut CurationApp) {
    egui::TopBottomPanel::bottom("traces")
        .resizable(true)
        .default_height(PANEL_HEIGHT)
        .show(ctx, |ui| {
            let enabled = !app.session.is_finished() && app.ui_state.fatal.is_none();
            let mut changes: Vec<(CellKey, bool)> = Vec::new();
            let mut view_all = false;
            let mut view_none = false;

            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    ui.set_width(VIEW_LIST_WIDTH);
                    let status = format!(
                        "{}/{}",
                        app.session.visibility().visible_count(),
                        app.session.registry().len()
                    );
                    super::section_header(ui, "View", Some(&status));
                    ui.add_enabled_ui(enabled, |ui| {
                        ui.horizontal(|ui| {
                            view_all = ui.button("View All").clicked();
                            view_none = ui.button("View None").clicked();
                        });
                        egui::ScrollArea::vertical()
                            .id_salt("view_list")
                            .auto_shrink([false, false])
                            .show(ui, |ui| {
                                let visibility = app.session.visibility();
                                for (index, cell) in app.session.registry().iter() {
                                    let mut visible = visibility.is_visible(index);
                                    if ui.checkbox(&mut visible, cell.key.as_str()).changed() {
                                        changes.push((cell.key.clone(), visible));
                                    }
                                }
                            });
                    });
                });

                ui.separator();

                let traces = app.session.traces();
                let shown = app.session.shown_traces();

                // Rows have a fixed height, so only the visible plots are built.
                let spacing = ui.spacing().item_spacing.y;
                let row_height = ui.text_style_height(&egui::TextStyle::Body)
                    + spacing
                    + app.display.trace_height;
                egui::ScrollArea::vertical()
                    .id_salt("trace_list")
                    .auto_shrink([false, false])
                    .show_rows(ui, row_height, shown.len(), |ui, rows| {
                        for &handle in &shown[rows] {
                            trace_plot(ui, traces.panel(handle), app.display.trace_height);
                        }
                    });
            });

            for (key, visible) in changes {
                app.run(|s| s.set_view(&key, visible));
            }
            if view_all {
                app.run(|s| s.view_all());
            }
            if view_none {
                app.run(|s| s.view_none());
            }
        });
}

/// One cell's trace: scaled samples, the mean as a dashed line, and the y
/// axis labelled with the raw range.
fn trace_plot(ui: &mut egui::Ui, panel: &TracePanel, height: f32) {
    ui.label(panel.title());

    let points: PlotPoints = panel
        .samples
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v as f64])
        .collect();
    let line = Line::new(panel.key.as_str(), points).color(egui::Color32::from_rgb(90, 160, 255));
    let mean = HLine::new("mean", panel.mean as f64)
        .color(egui::Color32::RED)
        .style(LineStyle::dashed_loose());

    let (raw_min, raw_max) = (panel.raw_min, panel.raw_max);
    Plot::new(("trace", panel.key.as_str()))
        .height(height)
        .include_y(0.0)
        .include_y(1.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .y_grid_spacer(|_| {
            vec![
                egui_plot::GridMark { value: 0.0, step_size: 1.0 },
                egui_plot::GridMark { value: 1.0, step_size: 1.0 },
            ]
        })
        .y_axis_formatter(move |mark, _range| {
            if mark.value <= 0.5 {
                format!("{raw_min}")
            } else {
                format!("{raw_max}")
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.line(line);
            plot_ui.hline(mean);
        });
}
