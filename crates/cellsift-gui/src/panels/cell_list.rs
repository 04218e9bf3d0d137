use cellsift_core::cell::CellKey;

use crate::app::CurationApp;

const PANEL_WIDTH: f32 = 180.0;

pub fn show(ctx: &egui::Context, app: &mut CurationApp) {
    egui::SidePanel::left("cells")
        .resizable(true)
        .default_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            let registry = app.session.registry();
            let selection = app.session.selection();
            let status = format!("{}/{}", selection.included_count(), registry.len());
            super::section_header(ui, "Cells", Some(&status));
            ui.separator();

            let enabled = !app.session.is_finished() && app.ui_state.fatal.is_none();
            let mut changes: Vec<(CellKey, bool)> = Vec::new();

            ui.add_enabled_ui(enabled, |ui| {
                let footer = ui.spacing().interact_size.y * 3.0 + ui.spacing().item_spacing.y * 4.0;
                egui::ScrollArea::vertical()
                    .max_height((ui.available_height() - footer).max(0.0))
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for (index, cell) in registry.iter() {
                            let mut included = selection.is_included(index);
                            if ui.checkbox(&mut included, cell.key.as_str()).changed() {
                                changes.push((cell.key.clone(), included));
                            }
                        }
                    });
            });

            ui.separator();

            let mut select_all = false;
            let mut select_none = false;
            let mut export = false;
            ui.add_enabled_ui(enabled, |ui| {
                ui.horizontal(|ui| {
                    select_all = ui.button("Select All").clicked();
                    select_none = ui.button("Select None").clicked();
                });
                export = ui
                    .add_sized([ui.available_width(), 0.0], egui::Button::new("Export Cells"))
                    .clicked();
            });

            for (key, included) in changes {
                app.run(|s| s.set_selection(&key, included));
            }
            if select_all {
                app.run(|s| s.select_all());
            }
            if select_none {
                app.run(|s| s.select_none());
            }
            if export {
                app.export(ctx);
            }
        });
}
