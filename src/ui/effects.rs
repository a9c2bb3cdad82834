//! Cosmetic effects the simulation never sees: floating score labels and
//! terminal audio cues.

use crate::core::events::{AudioSink, GameEvent};

/// How long a score label stays on screen, in seconds.
pub const POPUP_LIFETIME: f64 = 0.8;
/// How far a label rises over its lifetime, in world units.
pub const POPUP_RISE: f64 = 50.0;

/// A floating `+N (+Ns)` label.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorePopup {
    pub label: String,
    pub x: f64,
    /// Spawn height; the drawn height rises from here.
    pub y: f64,
    pub age: f64,
}

impl ScorePopup {
    pub fn current_y(&self) -> f64 {
        self.y - POPUP_RISE * (self.age / POPUP_LIFETIME).min(1.0)
    }

    /// Grows to 1.5x at half life, then shrinks back.
    pub fn scale(&self) -> f64 {
        let t = (self.age / POPUP_LIFETIME).clamp(0.0, 1.0);
        1.0 + 0.5 * (t * std::f64::consts::PI).sin()
    }
}

/// Active score labels.
#[derive(Debug, Clone, Default)]
pub struct PopupLayer {
    pub popups: Vec<ScorePopup>,
}

impl PopupLayer {
    /// Start a label for every score award in `events`.
    pub fn absorb(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ScoreAwarded {
                    points,
                    time_bonus,
                    combo,
                    position,
                } => self.popups.push(ScorePopup {
                    label: GameEvent::score_label(*points, *time_bonus, *combo),
                    x: position.x,
                    y: position.y,
                    age: 0.0,
                }),
                GameEvent::Reset => self.popups.clear(),
                _ => {}
            }
        }
    }

    /// Age every label by `dt` real seconds and drop the expired ones.
    pub fn tick(&mut self, dt: f64) {
        for popup in &mut self.popups {
            popup.age += dt;
        }
        self.popups.retain(|p| p.age < POPUP_LIFETIME);
    }
}

/// Audio over a terminal: the bell for launches and scores.
#[derive(Debug, Clone, Default)]
pub struct TerminalAudio {
    pub muted: bool,
    /// Background music is lowered for the current flight.
    pub music_ducked: bool,
    bell_pending: bool,
}

impl TerminalAudio {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Default::default()
        }
    }

    /// Whether a bell should ring this frame. Clears the request.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending) && !self.muted
    }
}

impl AudioSink for TerminalAudio {
    fn on_launch(&mut self) {
        self.bell_pending = true;
    }

    fn on_score(&mut self) {
        self.bell_pending = true;
    }

    fn duck_music(&mut self) {
        self.music_ducked = true;
    }

    fn restore_music(&mut self) {
        self.music_ducked = false;
    }
}
