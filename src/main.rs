use anyhow::{Result, anyhow};
use clap::Parser;
use pixels::{Pixels, SurfaceTexture};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use snake_stats::config::GameConfig;
use snake_stats::draw::Canvas;
use snake_stats::game::{Dir, Game, StepOutcome};
use snake_stats::game_view::{draw_game, draw_game_over, replay_button};
use snake_stats::record::MatchStats;
use snake_stats::store::StatsFile;

/// Play snake; every finished match is appended to a stats file.
#[derive(Parser, Debug)]
#[command(name = "snake", version)]
struct Args {
    /// JSON file that receives one record per finished match.
    #[arg(long, default_value = "stats_player.json")]
    stats_file: PathBuf,

    /// Simulation ticks per second.
    #[arg(long, default_value_t = 15)]
    fps: u32,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,
}

enum Screen {
    Playing,
    GameOver { stats: MatchStats, saved_id: Option<u64> },
}

const STEER_KEYS: [(VirtualKeyCode, VirtualKeyCode, Dir); 4] = [
    (VirtualKeyCode::Up, VirtualKeyCode::W, Dir::Up),
    (VirtualKeyCode::Down, VirtualKeyCode::S, Dir::Down),
    (VirtualKeyCode::Left, VirtualKeyCode::A, Dir::Left),
    (VirtualKeyCode::Right, VirtualKeyCode::D, Dir::Right),
];

fn save_match(store: &StatsFile, stats: MatchStats) -> Option<u64> {
    match store.append(stats) {
        Ok(rec) => {
            info!(
                id = rec.id,
                score = rec.score,
                moves = rec.moves,
                time_seconds = rec.time_seconds,
                path = %store.path().display(),
                "saved match"
            );
            Some(rec.id)
        }
        Err(e) => {
            error!(error = %e, path = %store.path().display(), "could not save match");
            None
        }
    }
}

fn main() -> Result<()> {
    snake_stats::init_tracing();
    let args = Args::parse();
    let cfg = GameConfig {
        stats_file: args.stats_file,
        ticks_per_second: args.fps,
        rng_seed: args.seed,
        ..GameConfig::default()
    };
    let store = StatsFile::new(&cfg.stats_file);

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let window = WindowBuilder::new()
        .with_title("Snake")
        .with_inner_size(LogicalSize::new(cfg.width, cfg.height))
        .with_resizable(false)
        .build(&event_loop)
        .map_err(|e| anyhow!("failed to open the game window: {e}"))?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(cfg.width, cfg.height, surface_texture)
            .map_err(|e| anyhow!("failed to create the pixel buffer: {e}"))?
    };

    let mut game = Game::new(&cfg, Instant::now());
    let mut screen = Screen::Playing;
    let mut last_update = Instant::now();
    let tick = cfg.tick_duration();
    info!(
        stats_file = %cfg.stats_file.display(),
        tick_ms = tick.as_millis() as u64,
        "starting snake"
    );

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        if let Event::RedrawRequested(_) = event {
            {
                let mut canvas = Canvas::new(pixels.frame_mut(), cfg.width, cfg.height);
                match &screen {
                    Screen::Playing => {
                        let elapsed = game.elapsed_secs(Instant::now());
                        draw_game(&mut canvas, &cfg, &game, elapsed);
                    }
                    Screen::GameOver { stats, saved_id } => {
                        draw_game_over(&mut canvas, &cfg, stats, *saved_id);
                    }
                }
            }
            if let Err(e) = pixels.render() {
                error!(error = %e, "render failed");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape)
                || input.close_requested()
                || input.destroyed()
            {
                *control_flow = ControlFlow::Exit;
                return;
            }
            let now = Instant::now();

            if matches!(screen, Screen::GameOver { .. }) {
                let clicked = input.mouse_pressed(0)
                    && input
                        .mouse()
                        .and_then(|pos| pixels.window_pos_to_pixel(pos).ok())
                        .is_some_and(|(x, y)| replay_button(&cfg).contains(x as u32, y as u32));
                if clicked
                    || input.key_pressed(VirtualKeyCode::R)
                    || input.key_pressed(VirtualKeyCode::Return)
                {
                    game = Game::new(&cfg, now);
                    screen = Screen::Playing;
                    last_update = now;
                }
                window.request_redraw();
                return;
            }

            if input.key_pressed(VirtualKeyCode::P) || input.key_pressed(VirtualKeyCode::Space) {
                game.toggle_pause(now);
            }
            for (primary, alt, dir) in STEER_KEYS {
                if input.key_pressed(primary) || input.key_pressed(alt) {
                    game.change_dir(dir);
                }
            }

            if now.duration_since(last_update) >= tick {
                last_update = now;
                if game.step() == StepOutcome::Died {
                    let stats = game.match_stats(now);
                    let saved_id = save_match(&store, stats);
                    screen = Screen::GameOver { stats, saved_id };
                }
            }

            window.request_redraw();
        }
    });
}
