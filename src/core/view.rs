//! Per-frame snapshot handed to the renderer.
//!
//! Everything here is derived data; the renderer never reaches back into the
//! session.

use super::pipes::PipePair;
use super::types::{GamePhase, Point};

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Both solid halves of a pipe pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeView {
    pub top: Rect,
    pub bottom: Rect,
}

impl PipeView {
    pub fn from_pair(pipe: &PipePair, screen_height: f64) -> Self {
        let bottom_y = pipe.gap_bottom();
        Self {
            top: Rect {
                x: pipe.x,
                y: 0.0,
                width: pipe.width,
                height: pipe.gap_top,
            },
            bottom: Rect {
                x: pipe.x,
                y: bottom_y,
                width: pipe.width,
                height: (screen_height - bottom_y).max(0.0),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdView {
    pub position: Point,
    pub rotation: f64,
    pub radius: f64,
    /// Flight animation is playing.
    pub animating: bool,
}

/// Slingshot string and predicted flight, present only while aiming.
#[derive(Debug, Clone, PartialEq)]
pub struct AimView {
    /// The bird end of the string.
    pub anchor: Point,
    /// The pulled end of the string.
    pub handle: Point,
    pub trajectory: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub score: u32,
    pub highscore: u32,
    pub time_left: f64,
    /// Time is under the low-time threshold.
    pub low_time: bool,
}

impl HudView {
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn highscore_text(&self) -> String {
        format!("Best: {}", self.highscore)
    }

    pub fn time_text(&self) -> String {
        format!("Time: {:.1}", self.time_left)
    }
}

/// Title banner shown on the menu and sliding away on the first launch.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleView {
    pub text: &'static str,
    /// Vertical offset per character.
    pub char_offsets: Vec<f64>,
    /// Horizontal slide accumulated during the re-center transition.
    pub slide: f64,
    pub visible: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub phase: GamePhase,
    pub bird: BirdView,
    pub pipes: Vec<PipeView>,
    pub aim: Option<AimView>,
    pub hud: HudView,
    /// Multi-line prompt for the middle of the screen; empty while playing.
    pub center_text: String,
    pub title: TitleView,
    pub background_offset: f64,
    pub screen_width: f64,
    pub screen_height: f64,
}
