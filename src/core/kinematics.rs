//! Bird and world-scroll integration.
//!
//! Semi-implicit Euler: velocity is updated first and the new velocity moves
//! the position. Shared by the live simulation and the trajectory preview.

use super::constants::{
    Physics, MAX_NOSE_DOWN, MAX_NOSE_UP, ROTATION_FACTOR, SCROLL_SNAP_SPEED,
};
use super::types::{BirdState, WorldState};

/// Advance the bird and the world scroll by `dt` seconds.
pub fn integrate(bird: &mut BirdState, world: &mut WorldState, dt: f64, physics: Physics) {
    integrate_bird(bird, dt, physics.gravity);
    world.scroll_speed = decay_scroll_speed(world.scroll_speed, dt, physics.drag);
    bird.rotation = bird_angle(bird.vertical_velocity);
}

/// Gravity step for the bird alone.
pub fn integrate_bird(bird: &mut BirdState, dt: f64, gravity: f64) {
    bird.vertical_velocity += gravity * dt;
    bird.y += bird.vertical_velocity * dt;
}

/// Exponential drag on the scroll speed, snapping to zero below 1 unit/s.
///
/// The decay factor is capped at 1 so a huge `dt` stops the world instead of
/// reversing it.
pub fn decay_scroll_speed(speed: f64, dt: f64, drag: f64) -> f64 {
    let factor = (drag * dt).clamp(0.0, 1.0);
    let speed = speed - speed * factor;
    if speed.abs() < SCROLL_SNAP_SPEED {
        0.0
    } else {
        speed
    }
}

/// Nose angle in radians for a vertical velocity.
pub fn bird_angle(vertical_velocity: f64) -> f64 {
    (vertical_velocity * ROTATION_FACTOR).clamp(MAX_NOSE_UP, MAX_NOSE_DOWN)
}
