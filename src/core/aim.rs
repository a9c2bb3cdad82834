//! Drag-to-launch gesture.
//!
//! The player presses, drags back-left, and releases. The pull vector runs
//! from the release point to the press point; rightward pull is discarded and
//! the length is capped at the configured maximum.

use super::types::{BirdState, Point, WorldState};

/// Press/drag/release tracking for the slingshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AimGesture {
    pub active: bool,
    pub start_x: f64,
    pub start_y: f64,
    pub current_x: f64,
    pub current_y: f64,
}

impl AimGesture {
    /// Begin a gesture at the press point.
    pub fn press(&mut self, x: f64, y: f64) {
        self.active = true;
        self.start_x = x;
        self.start_y = y;
        self.current_x = x;
        self.current_y = y;
    }

    /// Track the pointer while a gesture is held. Ignored otherwise.
    pub fn drag(&mut self, x: f64, y: f64) {
        if self.active {
            self.current_x = x;
            self.current_y = y;
        }
    }

    /// Finish the gesture, returning the clamped pull. `None` without a press.
    pub fn release(&mut self, x: f64, y: f64, max_pull: f64) -> Option<PullVector> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(PullVector::from_drag(self.start_x, self.start_y, x, y, max_pull))
    }

    /// Pull the preview would launch with if released at the current point.
    pub fn current_pull(&self, max_pull: f64) -> Option<PullVector> {
        self.active.then(|| {
            PullVector::from_drag(
                self.start_x,
                self.start_y,
                self.current_x,
                self.current_y,
                max_pull,
            )
        })
    }
}

/// A clamped pull: `dx >= 0`, length at most the maximum pull.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PullVector {
    pub dx: f64,
    pub dy: f64,
}

impl PullVector {
    /// Pull from press point `(start_x, start_y)` to release point `(end_x, end_y)`.
    pub fn from_drag(start_x: f64, start_y: f64, end_x: f64, end_y: f64, max_pull: f64) -> Self {
        let dx = (start_x - end_x).max(0.0);
        let dy = start_y - end_y;
        Self::clamped(dx, dy, max_pull)
    }

    /// Rescale `(dx, dy)` onto the circle of radius `max_pull` when longer.
    pub fn clamped(dx: f64, dy: f64, max_pull: f64) -> Self {
        let len = (dx * dx + dy * dy).sqrt();
        if len > max_pull {
            let scale = max_pull / len;
            Self {
                dx: dx * scale,
                dy: dy * scale,
            }
        } else {
            Self { dx, dy }
        }
    }

    pub fn length(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }

    /// Where the slingshot handle sits relative to an anchor.
    pub fn handle_from(&self, anchor: Point) -> Point {
        Point::new(anchor.x - self.dx, anchor.y - self.dy)
    }

    /// Launch velocities for this pull: `(vertical_velocity, added_scroll_speed)`.
    pub fn impulse(&self, power: f64) -> (f64, f64) {
        (self.dy * power, self.dx * power)
    }

    /// Overwrite the bird's vertical velocity and add to the world scroll.
    pub fn apply(&self, bird: &mut BirdState, world: &mut WorldState, power: f64) {
        let (vy, speed) = self.impulse(power);
        bird.vertical_velocity = vy;
        world.scroll_speed += speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_pull_is_rescaled() {
        let pull = PullVector::clamped(300.0, 100.0, 200.0);
        assert!((pull.length() - 200.0).abs() < 1e-9);
        assert!((pull.dx - 189.7366).abs() < 1e-3);
        assert!((pull.dy - 63.2456).abs() < 1e-3);

        let (vy, speed) = pull.impulse(3.0);
        assert!((vy - 189.7366).abs() < 1e-3);
        assert!((speed - 569.2099).abs() < 1e-3);
    }

    #[test]
    fn test_pull_clamp_preserves_direction() {
        for &(dx, dy) in &[(10.0, 5.0), (500.0, -20.0), (0.0, 900.0), (150.0, 150.0)] {
            let pull = PullVector::clamped(dx, dy, 200.0);
            assert!(pull.length() <= 200.0 + 1e-9);
            // Cross product zero, same orientation.
            assert!((pull.dx * dy - pull.dy * dx).abs() < 1e-6);
            assert!(pull.dx * dx + pull.dy * dy >= 0.0);
        }
    }

    #[test]
    fn test_rightward_drag_has_no_horizontal_pull() {
        // Released to the right of the press point.
        let pull = PullVector::from_drag(100.0, 100.0, 250.0, 40.0, 200.0);
        assert_eq!(pull.dx, 0.0);
        assert!((pull.dy - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_drag_is_zero_impulse() {
        let pull = PullVector::from_drag(50.0, 50.0, 50.0, 50.0, 200.0);
        assert_eq!(pull, PullVector::default());
        assert_eq!(pull.impulse(3.0), (0.0, 0.0));
    }

    #[test]
    fn test_release_without_press_is_noop() {
        let mut aim = AimGesture::default();
        assert!(aim.release(10.0, 10.0, 200.0).is_none());
        aim.drag(20.0, 20.0);
        assert_eq!(aim, AimGesture::default());
    }

    #[test]
    fn test_gesture_lifecycle() {
        let mut aim = AimGesture::default();
        aim.press(400.0, 300.0);
        assert!(aim.active);
        aim.drag(350.0, 350.0);
        assert_eq!((aim.current_x, aim.current_y), (350.0, 350.0));

        let preview = aim.current_pull(200.0).unwrap();
        assert_eq!(preview, PullVector { dx: 50.0, dy: -50.0 });

        let pull = aim.release(300.0, 400.0, 200.0).unwrap();
        assert!(!aim.active);
        assert_eq!(pull, PullVector { dx: 100.0, dy: -100.0 });
        assert!(aim.current_pull(200.0).is_none());
    }

    #[test]
    fn test_apply_overwrites_velocity_and_adds_speed() {
        let mut bird = BirdState::default();
        bird.vertical_velocity = 250.0;
        let mut world = WorldState::default();
        world.scroll_speed = 100.0;

        PullVector { dx: 50.0, dy: 20.0 }.apply(&mut bird, &mut world, 3.0);
        assert_eq!(bird.vertical_velocity, 60.0);
        assert_eq!(world.scroll_speed, 250.0);
    }
}
