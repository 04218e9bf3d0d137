/// Uniform multiplier applied to contour and centroid coordinates before drawing.
pub const OUTLINE_SCALE: f32 = 4.0;

/// Stroke width of a cell outline, in screen points.
pub const OUTLINE_STROKE_WIDTH: f32 = 2.0;

/// Scale increment applied per discrete zoom step.
pub const ZOOM_STEP_FACTOR: f32 = 0.01;

/// Wheel rotation (in degrees) that counts as one zoom step.
pub const WHEEL_DEGREES_PER_STEP: f32 = 15.0;

/// Lower bound of the per-step multiplier under the clamp policy.
pub const DEFAULT_CLAMP_MIN: f32 = 0.5;

/// Upper bound of the per-step multiplier under the clamp policy.
pub const DEFAULT_CLAMP_MAX: f32 = 1.5;

/// Smallest total zoom, relative to the fitted view.
pub const MIN_ZOOM: f32 = 0.05;

/// Largest total zoom, relative to the fitted view.
pub const MAX_ZOOM: f32 = 40.0;

/// Prefix shared by every cell name ("C003").
pub const CELL_NAME_PREFIX: char = 'C';

/// Number of decimals kept for the original min/max shown beside a trace.
pub const TRACE_LABEL_DECIMALS: i32 = 4;

/// Minimum cell count to normalise traces with Rayon parallelism.
pub const PARALLEL_CELL_THRESHOLD: usize = 64;

/// Default trace panel height in points.
pub const DEFAULT_TRACE_HEIGHT: f32 = 110.0;

/// Default font size for overlay labels.
pub const DEFAULT_LABEL_FONT_SIZE: f32 = 12.0;
