//! Aiming preview: where the bird would fly if released now.

use super::aim::PullVector;
use super::constants::{Physics, PREVIEW_DT, PREVIEW_SAMPLE_EVERY, PREVIEW_STEPS};
use super::kinematics::{decay_scroll_speed, integrate_bird};
use super::types::{BirdState, Point};

/// Forward simulation over copies of the bird and scroll speed.
///
/// Each call to [`Iterator::next`] runs fixed steps up to the next sampled
/// one. A clone taken before iteration replays the same points.
#[derive(Debug, Clone)]
pub struct Trajectory {
    bird: BirdState,
    sim_x: f64,
    scroll_speed: f64,
    physics: Physics,
    screen_width: f64,
    screen_height: f64,
    step: usize,
    done: bool,
}

impl Trajectory {
    /// Preview for `pull` applied to `bird` while the world scrolls at `world_speed`.
    pub fn predict(
        bird: &BirdState,
        world_speed: f64,
        pull: PullVector,
        power: f64,
        physics: Physics,
        screen_width: f64,
        screen_height: f64,
    ) -> Self {
        let (vy, added_speed) = pull.impulse(power);
        let mut sim = *bird;
        sim.vertical_velocity = vy;
        Self {
            bird: sim,
            sim_x: bird.x,
            scroll_speed: world_speed + added_speed,
            physics,
            screen_width,
            screen_height,
            step: 0,
            done: false,
        }
    }

    fn off_screen(&self) -> bool {
        self.bird.y > self.screen_height || self.bird.y < 0.0 || self.sim_x > self.screen_width
    }
}

impl Iterator for Trajectory {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while !self.done && self.step < PREVIEW_STEPS {
            let i = self.step;
            self.step += 1;

            integrate_bird(&mut self.bird, PREVIEW_DT, self.physics.gravity);
            self.scroll_speed = decay_scroll_speed(self.scroll_speed, PREVIEW_DT, self.physics.drag);
            self.sim_x += self.scroll_speed * PREVIEW_DT;

            let sampled = i % PREVIEW_SAMPLE_EVERY == 0;
            // The step that leaves the screen is still drawn.
            if self.off_screen() {
                self.done = true;
            }
            if sampled {
                return Some(Point::new(self.sim_x, self.bird.y));
            }
        }
        None
    }
}
