use std::time::Duration;

use instant::Instant;

use crate::config::WorldConfig;
use crate::game::Game;
use crate::input::{InputState, Key};
use crate::present::LogPresenter;
use crate::resource::ResourceCatalog;
use crate::terrain::HeightSampler;

/// Frame budget the driver sleeps toward (seconds).
const FRAME_BUDGET: f64 = 1.0 / 60.0;
/// How many frames to run when `ISLAND_FRAMES` is unset.
const DEFAULT_FRAMES: u64 = 900;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// Frame at which the driver simulates the host hiding the window.
const PAUSE_FRAME: u64 = 300;
/// How long the simulated pause lasts.
const PAUSE_DURATION: Duration = Duration::from_millis(400);

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_min: f64::MAX,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    /// Returns true when a stats line was just logged.
    fn record_frame(&mut self, dt: f64) -> bool {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_min = self.frame_time_min.min(dt);
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed < FPS_LOG_INTERVAL {
            return false;
        }
        let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
        let fps = self.frames_since_log as f64 / elapsed;
        log::info!(
            "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total frames: {}",
            fps,
            avg_ms,
            self.frame_time_min * 1000.0,
            self.frame_time_max * 1000.0,
            self.frame_count,
        );
        self.last_log_time = Instant::now();
        self.frame_time_sum = 0.0;
        self.frame_time_min = f64::MAX;
        self.frame_time_max = 0.0;
        self.frames_since_log = 0;
        true
    }
}

/// Measures time between frames. After `pause`, the next frame reports zero
/// so time spent while the host wasn't stepping is never integrated.
struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    fn new() -> Self {
        Self { last: None }
    }

    fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = self
            .last
            .map(|last| now.duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last = Some(now);
        dt
    }

    fn pause(&mut self) {
        self.last = None;
    }
}

// ---------------------------------------------------------------------------
// Scripted input
// ---------------------------------------------------------------------------

/// Stands in for a keyboard: wanders forward in a slow arc, hops now and
/// then, and taps interact a few times a second.
struct Autopilot {
    turn_rate: f32,
}

impl Autopilot {
    fn new(rng: &mut fastrand::Rng) -> Self {
        Self {
            turn_rate: 0.3 + rng.f32() * 0.5,
        }
    }

    fn drive(&mut self, frame: u64, dt: f32, input: &mut InputState) {
        // Walk forward, back up for a second every ten.
        if frame % 600 < 540 {
            input.release(Key::Back);
            input.press(Key::Forward);
        } else {
            input.release(Key::Forward);
            input.press(Key::Back);
        }
        // Strafe right, then left, once every four seconds.
        match frame % 240 {
            0..=59 => input.press(Key::Right),
            120..=179 => input.press(Key::Left),
            _ => {
                input.release(Key::Right);
                input.release(Key::Left);
            }
        }
        input.turn(self.turn_rate * dt);

        if frame % 90 == 0 {
            input.press(Key::Jump);
        } else {
            input.release(Key::Jump);
        }
        if frame % 15 == 0 {
            input.press(Key::Interact);
        } else {
            input.release(Key::Interact);
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

fn env_u64(name: &str) -> Result<Option<u64>, std::num::ParseIntError> {
    std::env::var(name).ok().map(|v| v.trim().parse()).transpose()
}

/// Entry point: build the world and run the frame loop.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = WorldConfig {
        seed: env_u64("ISLAND_SEED")?,
        ..Default::default()
    };
    let frames = env_u64("ISLAND_FRAMES")?.unwrap_or(DEFAULT_FRAMES);

    let mut presenter = LogPresenter::new(ResourceCatalog::new(config.resource_kinds.clone()));
    let mut rng = config
        .seed
        .map(fastrand::Rng::with_seed)
        .unwrap_or_else(fastrand::Rng::new);
    let mut game = Game::build(config, &mut presenter)?;
    log::info!("Presented {} resource objects", presenter.placed());

    let mut input = InputState::new();
    let mut autopilot = Autopilot::new(&mut rng);
    let mut clock = FrameClock::new();
    let mut stats = FrameStats::new();
    let mut jumps = 0u32;
    let mut blocked_frames = 0u32;

    for frame in 0..frames {
        if frame == PAUSE_FRAME {
            log::info!("Host paused for {}ms; skipping that interval", PAUSE_DURATION.as_millis());
            clock.pause();
            std::thread::sleep(PAUSE_DURATION);
        }

        let frame_start = Instant::now();
        let dt = clock.tick();

        autopilot.drive(frame, dt as f32, &mut input);
        let intents = input.take_intents();
        let report = game.step(dt as f32, &intents, &mut presenter);
        if report.motion.jumped {
            jumps += 1;
        }
        if report.motion.blocked {
            blocked_frames += 1;
        }

        if stats.record_frame(dt) {
            let timers = game.timers();
            log::info!("Systems: {} | total {:.1}us", timers.summary(), timers.total_us());
        }

        let spent = frame_start.elapsed().as_secs_f64();
        if spent < FRAME_BUDGET {
            std::thread::sleep(Duration::from_secs_f64(FRAME_BUDGET - spent));
        }
    }

    let player = game.player();
    let pos = player.position();
    log::info!(
        "Ran {} steps: player at {:.2} (ground {:.2}, yaw {:.2}), {} jumps, {} blocked frames",
        game.steps(),
        pos,
        game.terrain().height_at(pos.x, pos.z),
        player.transform().yaw,
        jumps,
        blocked_frames,
    );
    log::info!(
        "Collected {} resources, {} remain",
        game.inventory().total(),
        game.resources().len()
    );
    log::info!("Final inventory:");
    for line in game.inventory().describe(game.catalog()) {
        log::info!("{line}");
    }
    Ok(())
}
