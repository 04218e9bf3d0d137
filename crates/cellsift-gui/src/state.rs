/// Window-level state that is not part of the curation session.
#[derive(Default)]
pub struct UIState {
    /// The overlay has been laid out at least once.
    pub projection_shown: bool,

    /// Last laid-out overlay size, in points.
    pub projection_size: Option<egui::Vec2>,

    /// Fatal contract violation; further input is ignored.
    pub fatal: Option<String>,
}
