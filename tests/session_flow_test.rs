//! End-to-end runs of the game session through its public API.

use angry_flappy::core::{
    route_audio, AudioSink, GameConfig, GameEvent, GameOverReason, GamePhase, GameSession,
    PipePair,
};
use angry_flappy::persistence::{JsonHighscoreStore, MemoryHighscoreStore, HIGHSCORE_FILE};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;

const FRAME: f64 = 1.0 / 60.0;

type Session = GameSession<MemoryHighscoreStore, ChaCha8Rng>;

/// START session with gravity and drag off and no random pipes.
fn still_air() -> Session {
    let config = GameConfig {
        gravity: 0.0,
        drag: 0.0,
        pipe_dist_interval: 1.0e9,
        ..Default::default()
    };
    let mut session = GameSession::new(
        config,
        MemoryHighscoreStore::default(),
        ChaCha8Rng::seed_from_u64(7),
    );
    session.reset();
    session.drain_events();
    session
}

fn pipe_at(x: f64) -> PipePair {
    PipePair {
        x,
        width: 80.0,
        gap_top: 200.0,
        gap_height: 180.0,
        scored: false,
    }
}

/// Press and release with a pull of `(dx, dy)`.
fn launch<R: rand::Rng>(session: &mut GameSession<MemoryHighscoreStore, R>, dx: f64, dy: f64) {
    session.pointer_down(400.0, 300.0);
    session.pointer_up(400.0 - dx, 300.0 - dy);
}

fn awards(events: &[GameEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ScoreAwarded { points, .. } => Some(*points),
            _ => None,
        })
        .collect()
}

#[test]
fn test_three_pipes_in_one_flight_build_a_combo() {
    let mut session = still_air();
    launch(&mut session, 100.0, 0.0);
    assert_eq!(session.world.scroll_speed, 300.0);

    for x in [200.0, 400.0, 600.0] {
        session.pipes.place(pipe_at(x));
    }

    let mut events = Vec::new();
    for _ in 0..150 {
        session.update(FRAME);
        events.extend(session.drain_events());
    }

    assert_eq!(session.phase, GamePhase::Playing);
    assert_eq!(awards(&events), vec![1, 2, 3]);
    assert_eq!(session.stats.score, 6);
    assert_eq!(session.stats.pipes_cleared_since_launch, 3);
    // 2.5 s elapsed, 6 s earned.
    assert!((session.stats.time_left - 33.5).abs() < 1e-6);
    assert!(session.pipes.pipes().iter().all(|p| p.scored));
}

#[test]
fn test_relaunch_restarts_combo() {
    let mut session = still_air();
    launch(&mut session, 100.0, 0.0);
    session.pipes.place(pipe_at(100.0));
    session.update(FRAME);
    for _ in 0..60 {
        session.update(FRAME);
    }
    assert_eq!(session.stats.score, 1);

    // Mid-air relaunch: no extra speed, just a fresh combo.
    launch(&mut session, 0.0, 0.0);
    assert_eq!(session.stats.pipes_cleared_since_launch, 0);
    session.pipes.place(pipe_at(150.0));
    session.drain_events();
    for _ in 0..60 {
        session.update(FRAME);
    }

    assert_eq!(awards(&session.drain_events()), vec![1]);
    assert_eq!(session.stats.score, 2);
}

#[test]
fn test_bird_above_screen_ends_run() {
    let mut session = GameSession::new(
        GameConfig::default(),
        MemoryHighscoreStore::default(),
        ChaCha8Rng::seed_from_u64(1),
    );
    session.reset();
    launch(&mut session, 50.0, 0.0);
    session.drain_events();

    session.bird.y = -1.0;
    session.update(FRAME);

    assert_eq!(session.phase, GamePhase::GameOver);
    let events = session.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::GameOver {
            reason: GameOverReason::OutOfBounds,
            ..
        }
    )));
}

#[test]
fn test_pipe_collision_ends_run_without_scoring() {
    let mut session = still_air();
    launch(&mut session, 100.0, 0.0);
    // Gap far above the bird.
    session.pipes.place(PipePair {
        gap_top: 0.0,
        gap_height: 150.0,
        ..pipe_at(130.0)
    });
    session.drain_events();

    for _ in 0..30 {
        session.update(FRAME);
    }

    assert_eq!(session.phase, GamePhase::GameOver);
    assert_eq!(session.stats.score, 0);
    let events = session.drain_events();
    assert!(awards(&events).is_empty());
    let game_overs: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .collect();
    assert_eq!(game_overs.len(), 1);
}

#[test]
fn test_clock_runs_out_and_restart_keeps_best() {
    let mut session = still_air();
    launch(&mut session, 0.0, 0.0);
    session.stats.score = 4;

    // 30 s of frames at the dt clamp.
    for _ in 0..310 {
        session.update(0.1);
    }
    assert_eq!(session.phase, GamePhase::GameOver);
    assert_eq!(session.stats.time_left, 0.0);
    assert_eq!(session.stats.highscore, 4);
    assert_eq!(session.store().highscore, 4);

    session.pointer_down(10.0, 10.0);
    assert_eq!(session.phase, GamePhase::Start);
    assert_eq!(session.stats.score, 0);
    assert_eq!(session.stats.highscore, 4);
    assert_eq!(
        session.view().center_text,
        "Click and Drag to Launch!\nBest: 4"
    );
}

#[derive(Default)]
struct CountingAudio {
    launches: u32,
    scores: u32,
    ducked: bool,
}

impl AudioSink for CountingAudio {
    fn on_launch(&mut self) {
        self.launches += 1;
    }

    fn on_score(&mut self) {
        self.scores += 1;
    }

    fn duck_music(&mut self) {
        self.ducked = true;
    }

    fn restore_music(&mut self) {
        self.ducked = false;
    }
}

#[test]
fn test_audio_follows_the_event_stream() {
    let mut session = still_air();
    let mut audio = CountingAudio::default();

    launch(&mut session, 100.0, 0.0);
    session.pipes.place(pipe_at(100.0));
    for _ in 0..30 {
        session.update(FRAME);
        route_audio(&session.drain_events(), &mut audio);
    }
    assert_eq!(audio.launches, 1);
    assert_eq!(audio.scores, 1);
    assert!(audio.ducked);

    session.set_game_over(GameOverReason::TimeUp);
    route_audio(&session.drain_events(), &mut audio);
    assert!(!audio.ducked);
}

#[test]
fn test_menu_launch_slides_bird_to_rail() {
    let mut session = GameSession::new(
        GameConfig::default(),
        MemoryHighscoreStore::default(),
        ChaCha8Rng::seed_from_u64(3),
    );
    assert_eq!(session.phase, GamePhase::Menu);
    assert!(session.view().title.visible);

    launch(&mut session, 150.0, -50.0);
    assert_eq!(session.phase, GamePhase::Playing);
    assert!(session.transitioning);

    let mut frames = 0;
    while session.transitioning && frames < 300 {
        session.update(FRAME);
        frames += 1;
    }
    assert!(!session.transitioning);
    assert_eq!(session.bird.x, 100.0);
    assert!(!session.view().title.visible);
}

#[test]
fn test_highscore_survives_restart_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(HIGHSCORE_FILE);

    let config = GameConfig {
        gravity: 0.0,
        drag: 0.0,
        pipe_dist_interval: 1.0e9,
        ..Default::default()
    };
    let mut session = GameSession::new(
        config.clone(),
        JsonHighscoreStore::at(&path),
        ChaCha8Rng::seed_from_u64(5),
    );
    session.reset();
    session.pointer_down(400.0, 300.0);
    session.pointer_up(300.0, 300.0);
    session.pipes.place(pipe_at(100.0));
    for _ in 0..30 {
        session.update(FRAME);
    }
    assert_eq!(session.stats.score, 1);
    session.set_game_over(GameOverReason::TimeUp);

    let reopened = GameSession::new(
        config,
        JsonHighscoreStore::at(&path),
        ChaCha8Rng::seed_from_u64(5),
    );
    assert_eq!(reopened.stats.highscore, 1);
}
