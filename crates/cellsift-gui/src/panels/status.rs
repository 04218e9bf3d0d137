use crate::app::CurationApp;

pub fn show(ctx: &egui::Context, app: &mut CurationApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Fixed height for 3 lines so the layout does not jump.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                let log = app.log_messages();
                if log.is_empty() {
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in log.iter() {
                        ui.label(msg);
                    }
                }
            });

        let session = &app.session;
        let viewport = session.viewport();
        ui.horizontal(|ui| {
            ui.label(format!("Zoom: {:.0}%", viewport.zoom() * 100.0));
            ui.separator();
            ui.label(viewport.state().phase.to_string());
            ui.separator();
            ui.label(format!(
                "Selected: {}/{}",
                session.selection().included_count(),
                session.registry().len()
            ));
            ui.separator();
            ui.label(format!(
                "Visible: {}/{}",
                session.visibility().visible_count(),
                session.registry().len()
            ));
        });

        ui.add_space(2.0);
    });
}
