//! Plain data records shared by the simulation components.

use super::constants::{BIRD_RADIUS, BIRD_RAIL_X, BIRD_START_Y, PIPE_DIST_INTERVAL, START_TIME};
use serde::{Deserialize, Serialize};

/// Which per-frame subsystems run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen; the first release launches straight into play.
    Menu,
    /// Fresh run waiting for the first press.
    Start,
    Playing,
    /// Frozen until the next press resets the run.
    GameOver,
}

/// A position in world units (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The bird. Horizontal position is fixed during flight; the world scrolls instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdState {
    pub x: f64,
    pub y: f64,
    /// Positive is downward.
    pub vertical_velocity: f64,
    /// Radians, clamped by the integrator.
    pub rotation: f64,
    pub radius: f64,
}

impl Default for BirdState {
    fn default() -> Self {
        Self {
            x: BIRD_RAIL_X,
            y: BIRD_START_Y,
            vertical_velocity: 0.0,
            rotation: 0.0,
            radius: BIRD_RADIUS,
        }
    }
}

impl BirdState {
    /// Bird at rest at the given position.
    pub fn at(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            vertical_velocity: 0.0,
            rotation: 0.0,
            radius,
        }
    }

    pub fn left(&self) -> f64 {
        self.x - self.radius
    }

    pub fn right(&self) -> f64 {
        self.x + self.radius
    }

    pub fn top(&self) -> f64 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.radius
    }
}

/// Horizontal motion of the environment relative to the bird.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldState {
    pub scroll_speed: f64,
    /// Only accumulates while `scroll_speed > 0`.
    pub distance_traveled: f64,
    pub next_pipe_spawn_distance: f64,
    pub background_scroll_offset: f64,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(PIPE_DIST_INTERVAL)
    }
}

impl WorldState {
    /// Stationary world whose first pipe appears after `first_spawn` units.
    pub fn new(first_spawn: f64) -> Self {
        Self {
            scroll_speed: 0.0,
            distance_traveled: 0.0,
            next_pipe_spawn_distance: first_spawn,
            background_scroll_offset: 0.0,
        }
    }
}

/// Per-run scoring and the process-wide best.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStats {
    pub score: u32,
    /// Combo counter; reset on every launch.
    pub pipes_cleared_since_launch: u32,
    pub time_left: f64,
    /// Never decreases.
    pub highscore: u32,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new(START_TIME, 0)
    }
}

impl RunStats {
    pub fn new(time_left: f64, highscore: u32) -> Self {
        Self {
            score: 0,
            pipes_cleared_since_launch: 0,
            time_left,
            highscore,
        }
    }

    /// Fold the current score into the best. Returns true when the best moved.
    pub fn promote_highscore(&mut self) -> bool {
        if self.score > self.highscore {
            self.highscore = self.score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_bounds() {
        let bird = BirdState::at(100.0, 300.0, 20.0);
        assert_eq!(bird.left(), 80.0);
        assert_eq!(bird.right(), 120.0);
        assert_eq!(bird.top(), 280.0);
        assert_eq!(bird.bottom(), 320.0);
    }

    #[test]
    fn test_promote_highscore_only_raises() {
        let mut stats = RunStats::new(30.0, 10);
        stats.score = 4;
        assert!(!stats.promote_highscore());
        assert_eq!(stats.highscore, 10);

        stats.score = 11;
        assert!(stats.promote_highscore());
        assert_eq!(stats.highscore, 11);
    }
}
