//! The pipe field: spawning, scrolling, collision, scoring and culling.

use super::types::{BirdState, RunStats};
use rand::Rng;

/// A top/bottom pipe pair with a gap between them.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    /// Left edge.
    pub x: f64,
    pub width: f64,
    /// Top of the gap (bottom of the upper pipe).
    pub gap_top: f64,
    pub gap_height: f64,
    /// Set once, the frame the pipe passes behind the bird.
    pub scored: bool,
}

impl PipePair {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn gap_bottom(&self) -> f64 {
        self.gap_top + self.gap_height
    }

    /// Bird's bounding square overlaps a solid part of the pair.
    pub fn hits(&self, bird: &BirdState) -> bool {
        let overlaps_column = bird.right() > self.x && bird.left() < self.right();
        overlaps_column && (bird.top() < self.gap_top || bird.bottom() > self.gap_bottom())
    }

    /// Trailing edge is fully behind the bird's leading edge.
    pub fn passed(&self, bird: &BirdState) -> bool {
        self.right() < bird.left()
    }
}

/// Sizes shared by every pipe in a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeGeometry {
    pub width: f64,
    pub gap: f64,
    /// Smallest allowed height of either pipe.
    pub min_height: f64,
    /// How far past the left screen edge a pipe survives.
    pub cull_margin: f64,
}

/// Points and time granted for clearing one pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAward {
    pub points: u32,
    pub time_bonus: f64,
    /// Combo counter after this pipe.
    pub combo: u32,
    pub new_highscore: bool,
}

/// What one collision/scoring pass found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeOutcome {
    pub collided: bool,
    pub awards: Vec<ScoreAward>,
}

/// Owns every pipe pair and the RNG that places their gaps.
#[derive(Debug, Clone)]
pub struct PipeField<R> {
    pipes: Vec<PipePair>,
    geometry: PipeGeometry,
    rng: R,
}

impl<R: Rng> PipeField<R> {
    pub fn new(geometry: PipeGeometry, rng: R) -> Self {
        Self {
            pipes: Vec::new(),
            geometry,
            rng,
        }
    }

    /// Pipes in spawn order (oldest, leftmost first).
    pub fn pipes(&self) -> &[PipePair] {
        &self.pipes
    }

    pub fn geometry(&self) -> PipeGeometry {
        self.geometry
    }

    pub fn clear(&mut self) {
        self.pipes.clear();
    }

    /// Add a pair at `x` with a gap placed uniformly on whole units.
    ///
    /// Screens too short for a whole-unit gap between the margins put the gap
    /// at `min_height`.
    pub fn spawn(&mut self, x: f64, screen_height: f64) -> &PipePair {
        let min_top = self.geometry.min_height;
        let max_top = screen_height - self.geometry.gap - self.geometry.min_height;
        let lo = min_top.ceil() as i64;
        let hi = max_top.floor() as i64;
        let gap_top = if lo <= hi {
            self.rng.gen_range(lo..=hi) as f64
        } else {
            min_top
        };

        self.pipes.push(PipePair {
            x,
            width: self.geometry.width,
            gap_top,
            gap_height: self.geometry.gap,
            scored: false,
        });
        &self.pipes[self.pipes.len() - 1]
    }

    /// Scroll every pipe left by `scroll_speed * dt`.
    pub fn advance(&mut self, scroll_speed: f64, dt: f64) {
        let shift = scroll_speed * dt;
        for pipe in &mut self.pipes {
            pipe.x -= shift;
        }
    }

    /// Check the bird against every pipe, then score pipes it has cleared.
    ///
    /// A hit anywhere suppresses scoring for the whole pass. Each cleared pipe
    /// bumps the combo and is worth the new combo value in both points and
    /// seconds.
    pub fn collide_and_score(&mut self, bird: &BirdState, stats: &mut RunStats) -> PipeOutcome {
        if self.pipes.iter().any(|pipe| pipe.hits(bird)) {
            return PipeOutcome {
                collided: true,
                awards: Vec::new(),
            };
        }

        let mut awards = Vec::new();
        for pipe in self.pipes.iter_mut().filter(|p| !p.scored) {
            if !pipe.passed(bird) {
                continue;
            }
            pipe.scored = true;

            stats.pipes_cleared_since_launch += 1;
            let combo = stats.pipes_cleared_since_launch;
            stats.score += combo;
            stats.time_left += combo as f64;

            awards.push(ScoreAward {
                points: combo,
                time_bonus: combo as f64,
                combo,
                new_highscore: stats.promote_highscore(),
            });
        }

        PipeOutcome {
            collided: false,
            awards,
        }
    }

    /// Drop pipes whose trailing edge is more than the cull margin off the left edge.
    /// Returns how many were removed.
    pub fn cull(&mut self) -> usize {
        let before = self.pipes.len();
        let margin = self.geometry.cull_margin;
        self.pipes.retain(|p| p.right() >= -margin);
        before - self.pipes.len()
    }

    /// Insert a pair as-is, for scripted layouts.
    pub fn place(&mut self, pipe: PipePair) {
        self.pipes.push(pipe);
    }
}
