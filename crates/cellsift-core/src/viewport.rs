use std::fmt;

use tracing::debug;

use crate::config::{ZoomConfig, ZoomPolicy};
use crate::geometry::{Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    pub fn from_steps(steps: i32) -> Option<Self> {
        match steps.signum() {
            1 => Some(ZoomDirection::In),
            -1 => Some(ZoomDirection::Out),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomPhase {
    Idle,
    ZoomingIn,
    ZoomingOut,
}

impl fmt::Display for ZoomPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoomPhase::Idle => write!(f, "Idle"),
            ZoomPhase::ZoomingIn => write!(f, "Zooming In"),
            ZoomPhase::ZoomingOut => write!(f, "Zooming Out"),
        }
    }
}

/// Zoom bookkeeping for the overlay view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Step factor baseline, centred at 1.0.
    pub scale: f32,
    /// Direction of the last applied step.
    pub direction: Option<ZoomDirection>,
    /// The view still shows the fitted scene; resizes refit it.
    pub at_default: bool,
    pub phase: ZoomPhase,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            direction: None,
            at_default: true,
            phase: ZoomPhase::Idle,
        }
    }
}

/// Owns zoom and pan of the overlay. Maps scene points to screen points as
/// `offset + p * fit_scale * zoom`, with screen coordinates relative to the
/// viewport's top-left corner.
#[derive(Clone, Debug)]
pub struct ViewportController {
    config: ZoomConfig,
    state: ViewportState,
    scene: Rect,
    viewport: Size,
    fit_scale: f32,
    zoom: f32,
    offset: Point,
    wheel_remainder: f32,
}

impl ViewportController {
    pub fn new(config: ZoomConfig, scene: Rect) -> Self {
        Self {
            config,
            state: ViewportState::default(),
            scene,
            viewport: Size::default(),
            fit_scale: 1.0,
            zoom: 1.0,
            offset: Point::ZERO,
            wheel_remainder: 0.0,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn scene(&self) -> Rect {
        self.scene
    }

    /// Zoom relative to the fitted view.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Total scene-to-screen scale.
    pub fn total_scale(&self) -> f32 {
        self.fit_scale * self.zoom
    }

    pub fn scene_to_screen(&self, p: Point) -> Point {
        self.offset + p.scaled(self.total_scale())
    }

    pub fn screen_to_scene(&self, p: Point) -> Point {
        (p - self.offset).scaled(1.0 / self.total_scale())
    }

    /// The part of the scene currently inside the viewport.
    pub fn visible_scene_rect(&self) -> Rect {
        Rect {
            min: self.screen_to_scene(Point::ZERO),
            max: self.screen_to_scene(Point::new(self.viewport.width, self.viewport.height)),
        }
    }

    /// First show of the viewport; always fits.
    pub fn show(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.fit();
    }

    /// Reset scale to 1.0 and fit the whole scene, preserving aspect ratio.
    pub fn fit(&mut self) {
        self.state.scale = 1.0;
        self.state.at_default = true;
        self.state.phase = ZoomPhase::Idle;
        self.zoom = 1.0;
        self.wheel_remainder = 0.0;

        let scene = self.scene.size();
        if self.viewport.is_empty() || scene.is_empty() {
            self.fit_scale = 1.0;
            self.offset = Point::ZERO;
            return;
        }

        self.fit_scale = (self.viewport.width / scene.width).min(self.viewport.height / scene.height);
        let viewport_center = Point::new(self.viewport.width * 0.5, self.viewport.height * 0.5);
        self.offset = viewport_center - self.scene.center().scaled(self.fit_scale);
        debug!(fit_scale = self.fit_scale, "viewport fitted");
    }

    /// Dedicated reset input; identical to [`fit`](Self::fit).
    pub fn reset(&mut self) {
        self.fit();
    }

    /// Window or panel resize. Refits only while still at the default scale.
    pub fn resize(&mut self, viewport: Size) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        if self.state.at_default {
            self.fit();
        }
    }

    /// Apply `steps` discrete zoom steps (positive zooms in), anchored on the
    /// viewport centre.
    pub fn step(&mut self, steps: i32) {
        let center = Point::new(self.viewport.width * 0.5, self.viewport.height * 0.5);
        self.step_at(steps, center);
    }

    /// Apply `steps` zoom steps keeping the scene point under `anchor` fixed.
    pub fn step_at(&mut self, steps: i32, anchor: Point) {
        let Some(direction) = ZoomDirection::from_steps(steps) else {
            return;
        };
        let anchored = self.screen_to_scene(anchor);
        let delta = self.config.step_factor * steps as f32;

        let new_zoom = match self.config.policy {
            ZoomPolicy::Rebaseline => {
                if self.state.direction != Some(direction) {
                    self.state.scale = 1.0;
                }
                self.state.scale += delta;
                self.zoom * self.state.scale
            }
            ZoomPolicy::Clamp => {
                self.state.scale = (self.state.scale + delta)
                    .clamp(self.config.clamp_min, self.config.clamp_max);
                self.state.scale
            }
        };

        self.state.direction = Some(direction);
        self.state.at_default = false;
        self.state.phase = match direction {
            ZoomDirection::In => ZoomPhase::ZoomingIn,
            ZoomDirection::Out => ZoomPhase::ZoomingOut,
        };
        self.zoom = new_zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.offset = anchor - anchored.scaled(self.total_scale());
        debug!(
            steps,
            scale = self.state.scale,
            zoom = self.zoom,
            "viewport zoom step"
        );
    }

    pub fn zoom_in(&mut self) {
        self.step(1);
    }

    pub fn zoom_out(&mut self) {
        self.step(-1);
    }

    /// Wheel rotation in degrees (positive away from the user). Whole steps
    /// are applied; the fractional remainder carries over to the next event
    /// in the same direction and is dropped when the direction flips.
    pub fn wheel(&mut self, degrees: f32, anchor: Point) {
        if self.wheel_remainder != 0.0 && degrees.signum() != self.wheel_remainder.signum() {
            self.wheel_remainder = 0.0;
        }
        let total = self.wheel_remainder + degrees / self.config.wheel_degrees_per_step;
        let steps = total.trunc();
        self.wheel_remainder = total - steps;
        if steps != 0.0 {
            self.step_at(steps as i32, anchor);
        }
    }

    /// Translate the view by a screen-space delta.
    pub fn pan(&mut self, delta: Point) {
        self.offset = self.offset + delta;
    }
}
