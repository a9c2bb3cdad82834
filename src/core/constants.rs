//! Gameplay tuning constants and the serializable [`GameConfig`] built from them.

use serde::{Deserialize, Serialize};

// Screen
pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;

// Physics (units per second)
pub const GRAVITY: f64 = 400.0;
pub const DRAG: f64 = 0.3;
pub const SCROLL_SNAP_SPEED: f64 = 1.0;
pub const ROTATION_FACTOR: f64 = 0.002;
pub const MAX_NOSE_UP: f64 = -0.78; // ~45 degrees
pub const MAX_NOSE_DOWN: f64 = 1.57; // ~90 degrees

// Launch
pub const MAX_PULL: f64 = 200.0;
pub const POWER_MULTIPLIER: f64 = 3.0;

// Pipes
pub const PIPE_WIDTH: f64 = 80.0;
pub const PIPE_GAP: f64 = 180.0;
pub const PIPE_MIN_HEIGHT: f64 = 100.0;
pub const PIPE_DIST_INTERVAL: f64 = 400.0;
pub const PIPE_SPAWN_OFFSET: f64 = 50.0;
pub const PIPE_CULL_MARGIN: f64 = 100.0;

// Bird
pub const BIRD_RADIUS: f64 = 20.0;
pub const BIRD_RAIL_X: f64 = 100.0;
pub const BIRD_START_Y: f64 = 300.0;
pub const RECENTER_RATE: f64 = 5.0;
pub const RECENTER_SNAP: f64 = 1.0;
/// Below both of these the flight animation stops.
pub const ANIM_STOP_SCROLL_SPEED: f64 = 50.0;
pub const ANIM_STOP_VERTICAL_SPEED: f64 = 10.0;

// Run timing (seconds)
pub const START_TIME: f64 = 30.0;
pub const LOW_TIME_THRESHOLD: f64 = 5.0;
pub const AIM_TIME_SCALE: f64 = 0.1;
pub const MAX_FRAME_DT: f64 = 0.1;

// Cosmetics
pub const BACKGROUND_PARALLAX: f64 = 0.1;
pub const TITLE_SLIDE_SPEED: f64 = 1000.0;
pub const TITLE_TEXT: &str = "Angry Flappy Bird";

// Trajectory preview
pub const PREVIEW_STEPS: usize = 90;
pub const PREVIEW_DT: f64 = 1.0 / 60.0;
pub const PREVIEW_SAMPLE_EVERY: usize = 3;

/// Every tunable used by the simulation.
///
/// Loaded from `~/.angry-flappy/config.json` by the binary; missing fields
/// fall back to the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f64,
    pub screen_height: f64,

    pub gravity: f64,
    pub drag: f64,
    pub max_pull: f64,
    pub power_multiplier: f64,

    pub pipe_width: f64,
    pub pipe_gap: f64,
    pub pipe_min_height: f64,
    pub pipe_dist_interval: f64,
    pub pipe_spawn_offset: f64,
    pub pipe_cull_margin: f64,

    pub bird_radius: f64,
    pub bird_rail_x: f64,
    pub bird_start_y: f64,

    /// Seconds on the clock at the start of a run.
    pub start_time: f64,
    pub low_time_threshold: f64,
    /// Gameplay delta multiplier while an aim gesture is held.
    pub aim_time_scale: f64,
    /// Upper bound on a single frame's delta, so a stalled terminal doesn't teleport the bird.
    pub max_frame_dt: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            gravity: GRAVITY,
            drag: DRAG,
            max_pull: MAX_PULL,
            power_multiplier: POWER_MULTIPLIER,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_min_height: PIPE_MIN_HEIGHT,
            pipe_dist_interval: PIPE_DIST_INTERVAL,
            pipe_spawn_offset: PIPE_SPAWN_OFFSET,
            pipe_cull_margin: PIPE_CULL_MARGIN,
            bird_radius: BIRD_RADIUS,
            bird_rail_x: BIRD_RAIL_X,
            bird_start_y: BIRD_START_Y,
            start_time: START_TIME,
            low_time_threshold: LOW_TIME_THRESHOLD,
            aim_time_scale: AIM_TIME_SCALE,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl GameConfig {
    /// Default tuning on a differently sized screen.
    pub fn with_screen(width: f64, height: f64) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Default::default()
        }
    }

    /// Copy with every value the simulation can't run on replaced.
    ///
    /// Non-finite values fall back to the defaults. Sizes, rates and the frame
    /// cap are clamped to be non-negative; screen sizes must be positive.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite = |value: f64, default: f64| if value.is_finite() { value } else { default };
        let non_negative = |value: f64, default: f64| finite(value, default).max(0.0);
        let positive = |value: f64, default: f64| {
            let value = finite(value, default);
            if value > 0.0 {
                value
            } else {
                default
            }
        };

        Self {
            screen_width: positive(self.screen_width, defaults.screen_width),
            screen_height: positive(self.screen_height, defaults.screen_height),
            gravity: finite(self.gravity, defaults.gravity),
            drag: non_negative(self.drag, defaults.drag),
            max_pull: non_negative(self.max_pull, defaults.max_pull),
            power_multiplier: finite(self.power_multiplier, defaults.power_multiplier),
            pipe_width: non_negative(self.pipe_width, defaults.pipe_width),
            pipe_gap: non_negative(self.pipe_gap, defaults.pipe_gap),
            pipe_min_height: non_negative(self.pipe_min_height, defaults.pipe_min_height),
            pipe_dist_interval: positive(self.pipe_dist_interval, defaults.pipe_dist_interval),
            pipe_spawn_offset: finite(self.pipe_spawn_offset, defaults.pipe_spawn_offset),
            pipe_cull_margin: non_negative(self.pipe_cull_margin, defaults.pipe_cull_margin),
            bird_radius: non_negative(self.bird_radius, defaults.bird_radius),
            bird_rail_x: finite(self.bird_rail_x, defaults.bird_rail_x),
            bird_start_y: finite(self.bird_start_y, defaults.bird_start_y),
            start_time: non_negative(self.start_time, defaults.start_time),
            low_time_threshold: non_negative(self.low_time_threshold, defaults.low_time_threshold),
            aim_time_scale: non_negative(self.aim_time_scale, defaults.aim_time_scale),
            max_frame_dt: non_negative(self.max_frame_dt, defaults.max_frame_dt),
        }
    }

    /// The subset of tuning the kinematics need.
    pub fn physics(&self) -> Physics {
        Physics {
            gravity: self.gravity,
            drag: self.drag,
        }
    }
}

/// Gravity and drag, copied out of [`GameConfig`] for the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub gravity: f64,
    pub drag: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            drag: DRAG,
        }
    }
}
