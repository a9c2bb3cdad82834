//! The game session: state machine, timers and per-frame orchestration.
//!
//! One [`GameSession::update`] per rendered frame. Pointer input arrives
//! between updates through [`GameSession::pointer_down`], [`GameSession::pointer_move`]
//! and [`GameSession::pointer_up`]. Events produced along the way are queued
//! until the frontend calls [`GameSession::drain_events`].

use super::aim::AimGesture;
use super::constants::{
    GameConfig, ANIM_STOP_SCROLL_SPEED, ANIM_STOP_VERTICAL_SPEED, BACKGROUND_PARALLAX,
    RECENTER_RATE, RECENTER_SNAP, TITLE_SLIDE_SPEED, TITLE_TEXT,
};
use super::events::{GameEvent, GameOverReason};
use super::kinematics::integrate;
use super::pipes::{PipeField, PipeGeometry};
use super::trajectory::Trajectory;
use super::types::{BirdState, GamePhase, Point, RunStats, WorldState};
use super::view::{AimView, BirdView, FrameView, HudView, PipeView, TitleView};
use crate::persistence::HighscoreStore;
use rand::Rng;
use tracing::{debug, info};

/// Vertical distance above the bird where score labels appear.
const SCORE_LABEL_LIFT: f64 = 30.0;

/// Everything one player's game owns.
pub struct GameSession<S, R> {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub bird: BirdState,
    pub world: WorldState,
    pub pipes: PipeField<R>,
    pub aim: AimGesture,
    pub stats: RunStats,

    /// Flight animation is playing.
    pub animating: bool,
    /// Bird is sliding from the menu position back to its rail.
    pub transitioning: bool,
    /// Seconds spent on the menu, drives the title wobble.
    pub menu_timer: f64,
    pub title_slide: f64,

    aim_preview: Option<AimView>,
    store: S,
    events: Vec<GameEvent>,
}

impl<S: HighscoreStore, R: Rng> GameSession<S, R> {
    /// New session on the title screen with the bird centered. Unusable
    /// config values are replaced, see [`GameConfig::sanitized`].
    pub fn new(config: GameConfig, store: S, rng: R) -> Self {
        let config = config.sanitized();
        let geometry = PipeGeometry {
            width: config.pipe_width,
            gap: config.pipe_gap,
            min_height: config.pipe_min_height,
            cull_margin: config.pipe_cull_margin,
        };
        let highscore = store.read();

        let mut session = Self {
            phase: GamePhase::Menu,
            bird: BirdState::at(config.bird_rail_x, config.bird_start_y, config.bird_radius),
            world: WorldState::new(config.pipe_dist_interval),
            pipes: PipeField::new(geometry, rng),
            aim: AimGesture::default(),
            stats: RunStats::new(config.start_time, highscore),
            animating: false,
            transitioning: false,
            menu_timer: 0.0,
            title_slide: 0.0,
            aim_preview: None,
            store,
            events: Vec::new(),
            config,
        };
        session.reset_run();
        session.phase = GamePhase::Menu;
        session.bird.x = session.config.screen_width / 2.0;
        session.bird.y = session.config.screen_height / 2.0;
        session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a fresh run in START. The highscore survives.
    pub fn reset(&mut self) {
        self.reset_run();
        self.events.push(GameEvent::Reset);
        debug!("run reset");
    }

    fn reset_run(&mut self) {
        let background = self.world.background_scroll_offset;
        self.bird = BirdState::at(
            self.config.bird_rail_x,
            self.config.bird_start_y,
            self.config.bird_radius,
        );
        self.animating = false;
        self.pipes.clear();
        self.stats = RunStats::new(self.config.start_time, self.stats.highscore);
        self.phase = GamePhase::Start;
        self.aim = AimGesture::default();
        self.aim_preview = None;
        self.world = WorldState::new(self.config.pipe_dist_interval);
        self.world.background_scroll_offset = background;
        self.title_slide = 0.0;
        self.transitioning = false;
    }

    // ── Input ───────────────────────────────────────────────────

    /// Press. Resets a finished run, otherwise starts aiming.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if self.phase == GamePhase::GameOver {
            self.reset();
            return;
        }

        self.aim.press(x, y);
        if self.phase == GamePhase::Start {
            self.phase = GamePhase::Playing;
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.aim.drag(x, y);
    }

    /// Release. Launches if a gesture was being held.
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        let Some(pull) = self.aim.release(x, y, self.config.max_pull) else {
            return;
        };
        self.aim_preview = None;

        match self.phase {
            GamePhase::Menu => {
                self.phase = GamePhase::Playing;
                self.transitioning = true;
            }
            GamePhase::Start => self.phase = GamePhase::Playing,
            _ => {}
        }

        pull.apply(&mut self.bird, &mut self.world, self.config.power_multiplier);
        self.stats.pipes_cleared_since_launch = 0;
        self.animating = true;

        debug!(
            vy = self.bird.vertical_velocity,
            scroll_speed = self.world.scroll_speed,
            "launch"
        );
        self.events.push(GameEvent::Launched {
            vertical_velocity: self.bird.vertical_velocity,
            scroll_speed: self.world.scroll_speed,
        });
    }

    // ── Frame ───────────────────────────────────────────────────

    /// Advance one frame by `dt` seconds of real time.
    pub fn update(&mut self, dt: f64) {
        // `config` is public; a NaN or negative cap collapses to 0 here.
        let dt = dt.clamp(0.0, self.config.max_frame_dt.max(0.0));
        let time_scale = if self.aim.active {
            self.config.aim_time_scale
        } else {
            1.0
        };
        let game_dt = dt * time_scale;

        self.world.background_scroll_offset +=
            self.world.scroll_speed * BACKGROUND_PARALLAX * game_dt;

        self.aim_preview = self.compute_aim_preview();

        if self.transitioning {
            self.step_transition(dt);
        }

        if self.phase == GamePhase::Menu {
            self.menu_timer += dt;
        }

        if self.phase == GamePhase::Playing {
            self.step_playing(dt, game_dt);
        }
    }

    fn compute_aim_preview(&self) -> Option<AimView> {
        let pull = self.aim.current_pull(self.config.max_pull)?;
        let anchor = Point::new(self.bird.x, self.bird.y);
        let trajectory = Trajectory::predict(
            &self.bird,
            self.world.scroll_speed,
            pull,
            self.config.power_multiplier,
            self.config.physics(),
            self.config.screen_width,
            self.config.screen_height,
        );
        Some(AimView {
            anchor,
            handle: pull.handle_from(anchor),
            trajectory: trajectory.collect(),
        })
    }

    /// Slide the bird from the menu position to the launch rail.
    fn step_transition(&mut self, dt: f64) {
        let rail = self.config.bird_rail_x;
        self.title_slide += TITLE_SLIDE_SPEED * dt;
        self.bird.x += (rail - self.bird.x) * RECENTER_RATE * dt;
        if (self.bird.x - rail).abs() < RECENTER_SNAP {
            self.bird.x = rail;
            self.transitioning = false;
        }
    }

    fn step_playing(&mut self, dt: f64, game_dt: f64) {
        // The countdown runs on real time, unaffected by aim dilation.
        self.stats.time_left -= dt;
        if self.stats.time_left <= 0.0 {
            self.stats.time_left = 0.0;
            self.set_game_over(GameOverReason::TimeUp);
            return;
        }

        integrate(
            &mut self.bird,
            &mut self.world,
            game_dt,
            self.config.physics(),
        );

        if self.animating
            && self.world.scroll_speed.abs() < ANIM_STOP_SCROLL_SPEED
            && self.bird.vertical_velocity.abs() < ANIM_STOP_VERTICAL_SPEED
        {
            self.animating = false;
        }

        if self.bird.y < 0.0 || self.bird.y > self.config.screen_height {
            self.set_game_over(GameOverReason::OutOfBounds);
            return;
        }

        if self.world.scroll_speed > 0.0 {
            self.world.distance_traveled += self.world.scroll_speed * game_dt;
        }
        if self.world.distance_traveled > self.world.next_pipe_spawn_distance {
            let x = self.config.screen_width + self.config.pipe_spawn_offset;
            let gap_top = self.pipes.spawn(x, self.config.screen_height).gap_top;
            self.world.next_pipe_spawn_distance += self.config.pipe_dist_interval;
            debug!(x, gap_top, "pipe spawned");
        }

        self.pipes.advance(self.world.scroll_speed, game_dt);
        let outcome = self.pipes.collide_and_score(&self.bird, &mut self.stats);

        for award in &outcome.awards {
            self.events.push(GameEvent::ScoreAwarded {
                points: award.points,
                time_bonus: award.time_bonus,
                combo: award.combo,
                position: Point::new(self.bird.x, self.bird.y - SCORE_LABEL_LIFT),
            });
            if award.new_highscore {
                self.save_highscore();
            }
        }

        if outcome.collided {
            self.set_game_over(GameOverReason::PipeCollision);
        }

        self.pipes.cull();
    }

    /// Enter GAMEOVER. A no-op when already there.
    pub fn set_game_over(&mut self, reason: GameOverReason) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.aim = AimGesture::default();
        self.aim_preview = None;

        if self.stats.promote_highscore() {
            self.save_highscore();
        }

        info!(
            score = self.stats.score,
            highscore = self.stats.highscore,
            ?reason,
            "game over"
        );
        self.events.push(GameEvent::GameOver {
            score: self.stats.score,
            highscore: self.stats.highscore,
            reason,
        });
    }

    fn save_highscore(&mut self) {
        let highscore = self.stats.highscore;
        self.store.write(highscore);
        info!(highscore, "new highscore");
        self.events.push(GameEvent::NewHighscore { highscore });
    }

    // ── Presentation ────────────────────────────────────────────

    /// Prompt for the middle of the screen.
    pub fn center_text(&self) -> String {
        match self.phase {
            GamePhase::Menu => "Drag to Start!".to_string(),
            GamePhase::Start => {
                format!("Click and Drag to Launch!\nBest: {}", self.stats.highscore)
            }
            GamePhase::GameOver => format!(
                "GAME OVER\nScore: {}\nBest: {}\nClick to Restart",
                self.stats.score, self.stats.highscore
            ),
            GamePhase::Playing => String::new(),
        }
    }

    /// Per-character title wobble.
    pub fn title_offsets(&self) -> Vec<f64> {
        (0..TITLE_TEXT.chars().count())
            .map(|i| (self.menu_timer * 5.0 + i as f64 * 0.5).sin() * 10.0)
            .collect()
    }

    /// Snapshot of everything drawable this frame.
    pub fn view(&self) -> FrameView {
        let screen_height = self.config.screen_height;
        FrameView {
            phase: self.phase,
            bird: BirdView {
                position: Point::new(self.bird.x, self.bird.y),
                rotation: self.bird.rotation,
                radius: self.bird.radius,
                animating: self.animating,
            },
            pipes: self
                .pipes
                .pipes()
                .iter()
                .map(|p| PipeView::from_pair(p, screen_height))
                .collect(),
            aim: self.aim_preview.clone(),
            hud: HudView {
                score: self.stats.score,
                highscore: self.stats.highscore,
                time_left: self.stats.time_left,
                low_time: self.stats.time_left < self.config.low_time_threshold,
            },
            center_text: self.center_text(),
            title: TitleView {
                text: TITLE_TEXT,
                char_offsets: self.title_offsets(),
                slide: self.title_slide,
                visible: self.phase == GamePhase::Menu || self.transitioning,
            },
            background_offset: self.world.background_scroll_offset,
            screen_width: self.config.screen_width,
            screen_height,
        }
    }
}
