//! Flappy Sim entry point
//!
//! Runs the game loop headless for a fixed time, optionally with an autopilot
//! tapping from a separate input thread, and reports the result.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;

use flappy_sim::hud;
use flappy_sim::levels::LevelProgress;
use flappy_sim::platform::{GameRunner, InputSender, Presenter};
use flappy_sim::sim::{FrameSnapshot, GameEvent, GameState};
use flappy_sim::{Settings, Tuning};

#[derive(Debug, Parser)]
#[command(name = "flappy-sim", about = "Run the Flappy Bird simulation headless")]
struct Args {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 1080)]
    width: u32,
    /// Viewport height in pixels
    #[arg(long, default_value_t = 1920)]
    height: u32,
    /// RNG seed for gap placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// How long to run, in seconds
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,
    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// JSON presentation settings
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Level file used to report unlocked games
    #[arg(long)]
    levels: Option<PathBuf>,
    /// Tap automatically to keep the bird in the gap
    #[arg(long)]
    autopilot: bool,
    /// Print the final frame as JSON
    #[arg(long)]
    json: bool,
}

/// Keeps the latest frame for the autopilot and logs events
#[derive(Clone, Default)]
struct HeadlessPresenter {
    latest: Arc<Mutex<Option<FrameSnapshot>>>,
    best: Arc<Mutex<u32>>,
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, frame: &FrameSnapshot) {
        if let Ok(mut latest) = self.latest.lock() {
            *latest = Some(*frame);
        }
    }

    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Scored { score } => {
                log::info!("Score: {}", score);
                if let Ok(mut best) = self.best.lock() {
                    *best = (*best).max(*score);
                }
            }
            GameEvent::OutOfBounds(_) | GameEvent::Crashed(_) => log::info!("Game Over ({:?})", event),
            GameEvent::PipeRecycled { .. } => {}
        }
    }
}

/// Tap when below the gap and falling; restart after a crash
fn autopilot_step(frame: &FrameSnapshot, input: &InputSender) {
    if !frame.ready {
        return;
    }
    let below_gap = frame.bird.center.y > frame.pipes.gap_center_y + frame.bird.rect.height();
    let should_tap = frame.is_over() || (below_gap && frame.bird.velocity > 0.0);
    if should_tap {
        // A full queue or stopped loop just means this tap is lost
        let _ = input.tap();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).context("loading tuning")?,
        None => Tuning::default(),
    };
    let settings = match &args.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Flappy Sim starting with seed {}", seed);

    if let Some(path) = &args.levels {
        let progress = LevelProgress::load_or_default(path);
        let games: Vec<_> = progress.unlocked_games().iter().map(|g| g.as_str()).collect();
        log::info!("Level {}: unlocked {}", progress.current_level(), games.join(", "));
    }

    let presenter = HeadlessPresenter::default();
    let runner = GameRunner::spawn(GameState::new(tuning, seed), presenter.clone(), &settings)
        .context("starting game loop")?;
    let input = runner.input();
    input
        .resize(args.width, args.height)
        .context("sending initial viewport")?;

    let deadline = Instant::now() + Duration::from_secs_f32(args.seconds.max(0.0));
    let poll = settings.frame_budget().unwrap_or(Duration::from_millis(16));
    while Instant::now() < deadline {
        if args.autopilot {
            let frame = presenter.latest.lock().ok().and_then(|f| *f);
            if let Some(frame) = frame {
                autopilot_step(&frame, &input);
            }
        }
        thread::sleep(poll);
    }

    let state = runner.stop().context("stopping game loop")?;
    let frame = state.snapshot();
    let best = presenter.best.lock().map(|b| *b).unwrap_or(0);

    println!("{}", hud::score_label(&frame));
    println!("Best: {}", best);
    println!("Phase: {:?} after {} ticks", frame.phase, frame.tick);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    }

    Ok(())
}
