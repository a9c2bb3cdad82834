//! Discrete events the simulation emits for the presentation layer.
//!
//! The session queues these during input handling and `update`; the frontend
//! drains them once per frame and owns every sound and animation they trigger.

use super::types::Point;

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A launch impulse was applied. Play the launch sound, start the flight
    /// animation and duck the music.
    Launched { vertical_velocity: f64, scroll_speed: f64 },

    /// A pipe was cleared.
    ScoreAwarded {
        points: u32,
        time_bonus: f64,
        combo: u32,
        /// Where to float the score label.
        position: Point,
    },

    /// The stored best moved; already written to the highscore store.
    NewHighscore { highscore: u32 },

    /// The run ended. Restore the music.
    GameOver { score: u32, highscore: u32, reason: GameOverReason },

    /// A fresh run is waiting in START.
    Reset,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    TimeUp,
    OutOfBounds,
    PipeCollision,
}

impl GameEvent {
    /// Floating label for a score award, e.g. `+3 (+3s) (x3!)`.
    pub fn score_label(points: u32, time_bonus: f64, combo: u32) -> String {
        let mut label = format!("+{} (+{}s)", points, time_bonus);
        if combo > 1 {
            label.push_str(&format!(" (x{}!)", combo));
        }
        label
    }
}

/// Audio cues. Implementations decide what "play" means.
pub trait AudioSink {
    fn on_launch(&mut self);
    fn on_score(&mut self);
    /// Lower the background music for the duration of a flight.
    fn duck_music(&mut self);
    /// Bring the background music back to normal volume.
    fn restore_music(&mut self);
}

/// Forward the audio-relevant subset of `events` to `sink`.
pub fn route_audio<A: AudioSink + ?Sized>(events: &[GameEvent], sink: &mut A) {
    for event in events {
        match event {
            GameEvent::Launched { .. } => {
                sink.on_launch();
                sink.duck_music();
            }
            GameEvent::ScoreAwarded { .. } => sink.on_score(),
            GameEvent::GameOver { .. } | GameEvent::Reset => sink.restore_music(),
            GameEvent::NewHighscore { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        cues: Vec<&'static str>,
    }

    impl AudioSink for Recorder {
        fn on_launch(&mut self) {
            self.cues.push("launch");
        }
        fn on_score(&mut self) {
            self.cues.push("score");
        }
        fn duck_music(&mut self) {
            self.cues.push("duck");
        }
        fn restore_music(&mut self) {
            self.cues.push("restore");
        }
    }

    #[test]
    fn test_score_label() {
        assert_eq!(GameEvent::score_label(1, 1.0, 1), "+1 (+1s)");
        assert_eq!(GameEvent::score_label(3, 3.0, 3), "+3 (+3s) (x3!)");
    }

    #[test]
    fn test_route_audio_order() {
        let events = vec![
            GameEvent::Launched {
                vertical_velocity: -100.0,
                scroll_speed: 300.0,
            },
            GameEvent::ScoreAwarded {
                points: 1,
                time_bonus: 1.0,
                combo: 1,
                position: Point::new(100.0, 270.0),
            },
            GameEvent::NewHighscore { highscore: 1 },
            GameEvent::GameOver {
                score: 1,
                highscore: 1,
                reason: GameOverReason::PipeCollision,
            },
        ];
        let mut recorder = Recorder::default();
        route_audio(&events, &mut recorder);
        assert_eq!(recorder.cues, vec!["launch", "duck", "score", "restore"]);
    }
}
