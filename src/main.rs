mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_survival::clock::{Clock, MonotonicClock};
use space_survival::compute::{init_state, new_game, tick};
use space_survival::config::GameConfig;
use space_survival::entities::{EntireGameStateInfo, GameStatus};
use space_survival::events::{Notification, NotificationSink};
use space_survival::keys::KeyTracker;
use space_survival::snapshot::snapshot;

/// Dodge and shoot falling rocks in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML file overriding the default game settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here (the terminal itself is busy drawing the game).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for a reproducible sequence of rocks and power-ups.
    #[arg(long)]
    seed: Option<u64>,
}

// ── Notifications ─────────────────────────────────────────────────────────────

/// There is no audio in the terminal; notifications only go to the log.
struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, notification: Notification) {
        debug!("notification: {:?}", notification);
    }
}

// ── Title gate ────────────────────────────────────────────────────────────────

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

/// Returns `true` when the player asked to quit instead of starting.
fn wait_for_start<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    last_score: Option<u32>,
) -> std::io::Result<bool> {
    display::render_title(out, last_score)?;
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            })) => return Ok(is_quit(code, modifiers)),
            Ok(_) => {}
            // input thread is gone, nothing more can start a game
            Err(_) => return Ok(true),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    RoundOver,
}

fn game_loop<W: Write>(
    out: &mut W,
    state: &mut EntireGameStateInfo,
    rx: &mpsc::Receiver<Event>,
    clock: &impl Clock,
    rng: &mut StdRng,
) -> std::io::Result<LoopExit> {
    let frame_len = Duration::from_millis(1000 / u64::from(state.config.playfield.fps));
    let mut keys = KeyTracker::default();
    let mut sink = LogSink;

    loop {
        let frame_start = Instant::now();
        keys.next_frame();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            {
                if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                    return Ok(LoopExit::Quit);
                }
                keys.record(code, kind);
            }
        }

        *state = tick(state, &keys, clock.now_millis(), rng, &mut sink);
        display::render(out, &snapshot(state))?;

        if state.status == GameStatus::RoundOver {
            return Ok(LoopExit::RoundOver);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let clock = MonotonicClock::new();
    let state = init_state(config, clock.now_millis(), &mut rng)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, state, &clock, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(Into::into)
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut state: EntireGameStateInfo,
    clock: &impl Clock,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut last_score = None;

    loop {
        if wait_for_start(out, rx, last_score)? {
            break;
        }
        state = new_game(&state, clock.now_millis(), rng);

        match game_loop(out, &mut state, rx, clock, rng)? {
            LoopExit::Quit => break,
            LoopExit::RoundOver => last_score = Some(state.score),
        }
    }
    Ok(())
}
