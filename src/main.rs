use angry_flappy::build_info;
use angry_flappy::core::{route_audio, GameConfig, GamePhase, GameSession};
use angry_flappy::logging::{init_tracing, DEFAULT_LOG_LEVEL};
use angry_flappy::persistence::{
    load_json_or_default, save_path, HighscoreStore, JsonHighscoreStore, MemoryHighscoreStore,
    CONFIG_FILE, LOG_FILE,
};
use angry_flappy::ui::{render_play_screen, PopupLayer, TerminalAudio, Viewport};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Target frame time, roughly 60 FPS.
const FRAME_TIME: Duration = Duration::from_millis(16);

type Session = GameSession<Box<dyn HighscoreStore>, StdRng>;

struct Options {
    seed: Option<u64>,
    muted: bool,
}

fn print_help() {
    println!("Angry Flappy - slingshot flappy bird for the terminal\n");
    println!("Usage: angry-flappy [options]\n");
    println!("Options:");
    println!("  --seed N   Fixed seed for pipe gaps");
    println!("  --mute     Never ring the terminal bell");
    println!("  --version  Show version information");
    println!("  --help     Show this help message");
    println!();
    println!("Controls: drag with the left mouse button and release to launch.");
    println!("          R restarts after a crash, Q or Esc quits.");
}

fn parse_args() -> Options {
    let mut options = Options {
        seed: None,
        muted: false,
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--mute" => options.muted = true,
            "--seed" => match args.next().and_then(|s| s.parse().ok()) {
                Some(seed) => options.seed = Some(seed),
                None => {
                    eprintln!("--seed expects a non-negative integer");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'angry-flappy --help' for usage.");
                std::process::exit(1);
            }
        }
    }
    options
}

fn open_highscore_store() -> Box<dyn HighscoreStore> {
    match JsonHighscoreStore::new() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "highscore file unavailable, keeping it in memory");
            Box::new(MemoryHighscoreStore::default())
        }
    }
}

fn load_config() -> GameConfig {
    match save_path(CONFIG_FILE) {
        Ok(path) => load_json_or_default::<GameConfig>(&path).sanitized(),
        Err(_) => GameConfig::default(),
    }
}

fn main() -> io::Result<()> {
    let options = parse_args();

    // Logging is optional; the game runs without it.
    match save_path(LOG_FILE) {
        Ok(path) => {
            if let Err(e) = init_tracing(&path, DEFAULT_LOG_LEVEL) {
                eprintln!("Logging disabled: {} ({})", e, path.display());
            }
        }
        Err(e) => eprintln!("Logging disabled: {}", e),
    }

    let config = load_config();
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session: Session = GameSession::new(config, open_highscore_store(), rng);
    info!(seed = ?options.seed, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session, options.muted);

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "frame loop failed");
    }
    info!(highscore = session.stats.highscore, "exiting");
    println!("Best: {}", session.stats.highscore);
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut Session,
    muted: bool,
) -> io::Result<()> {
    let mut popups = PopupLayer::default();
    let mut audio = TerminalAudio::new(muted);
    let mut viewport: Option<Viewport> = None;
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        session.update(dt);
        let events = session.drain_events();
        route_audio(&events, &mut audio);
        popups.absorb(&events);
        popups.tick(dt);

        let view = session.view();
        terminal.draw(|frame| {
            let area = frame.size();
            viewport = Some(render_play_screen(
                frame,
                area,
                &view,
                &popups,
                audio.music_ducked,
            ));
        })?;

        if audio.take_bell() {
            let mut out = io::stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }

        // Drain input until the frame budget is spent.
        while let Some(timeout) = FRAME_TIME.checked_sub(now.elapsed()) {
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        if session.phase == GamePhase::GameOver {
                            session.reset();
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if let Some(vp) = viewport {
                        handle_mouse(session, vp, mouse);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Forward left-button mouse events in world coordinates.
fn handle_mouse(session: &mut Session, viewport: Viewport, mouse: MouseEvent) {
    let (x, y) = viewport.to_world(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if viewport.contains(mouse.column, mouse.row) {
                session.pointer_down(x, y);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => session.pointer_move(x, y),
        MouseEventKind::Up(MouseButton::Left) => session.pointer_up(x, y),
        _ => {}
    }
}
