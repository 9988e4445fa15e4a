use anyhow::{Context, Result, anyhow};
use clap::Parser;
use pixels::{Pixels, SurfaceTexture};
use tracing::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use snake_stats::config::DashboardConfig;
use snake_stats::dashboard::{Dashboard, Tab};
use snake_stats::dashboard_view::draw_dashboard;
use snake_stats::dataset::Dataset;
use snake_stats::draw::Canvas;
use snake_stats::leaderboard::Preset;
use snake_stats::report;

/// Compare agents from their stats files: learning curves, score distributions
/// and a weighted leaderboard.
#[derive(Parser, Debug)]
#[command(name = "dashboard", version)]
struct Args {
    /// Glob matching the per-agent stats files.
    #[arg(long, default_value = "stats_*.json")]
    pattern: String,

    /// Rolling-mean window in matches (1-1000).
    #[arg(long, default_value_t = 100)]
    window: usize,

    /// Proficiency threshold in points; defaults to min(10, best score).
    #[arg(long)]
    threshold: Option<u32>,

    /// Ranking preset.
    #[arg(long, value_enum, default_value_t = Preset::Balanced)]
    preset: Preset,

    /// Agents to compare (repeatable). Defaults to all.
    #[arg(long = "agent")]
    agents: Vec<String>,

    /// Print the text report and exit instead of opening a window.
    #[arg(long)]
    report: bool,
}

const TAB_KEYS: [(VirtualKeyCode, Tab); 4] = [
    (VirtualKeyCode::Key1, Tab::LearningCurve),
    (VirtualKeyCode::Key2, Tab::Distribution),
    (VirtualKeyCode::Key3, Tab::Leaderboard),
    (VirtualKeyCode::Key4, Tab::RawData),
];

fn build_dashboard(args: &Args, cfg: &DashboardConfig) -> Result<Dashboard> {
    let dataset = Dataset::load(&cfg.pattern).context("cannot build the dashboard")?;
    let mut dash = Dashboard::new(dataset, cfg);
    if !args.agents.is_empty() {
        for a in &args.agents {
            if dash.dataset().agent(a).is_none() {
                warn!(agent = %a, "unknown agent ignored");
            }
        }
        dash.set_agents(args.agents.clone());
    }
    dash.set_window(args.window);
    if let Some(t) = args.threshold {
        dash.set_threshold(t);
    }
    dash.preset = args.preset;
    Ok(dash)
}

/// Applies one frame of keyboard input. Returns true if anything changed.
fn handle_keys(input: &WinitInputHelper, dash: &mut Dashboard, cfg: &DashboardConfig) -> bool {
    let before = (dash.selection.clone(), dash.preset, dash.tab, dash.cursor);

    for (key, tab) in TAB_KEYS {
        if input.key_pressed(key) {
            dash.tab = tab;
        }
    }
    if input.key_pressed(VirtualKeyCode::Left) {
        dash.move_cursor(-1);
    }
    if input.key_pressed(VirtualKeyCode::Right) {
        dash.move_cursor(1);
    }
    if input.key_pressed(VirtualKeyCode::Space) {
        dash.toggle_agent(dash.cursor);
    }
    if input.key_pressed(VirtualKeyCode::Up) {
        dash.adjust_window(10);
    }
    if input.key_pressed(VirtualKeyCode::Down) {
        dash.adjust_window(-10);
    }
    if input.key_pressed(VirtualKeyCode::Equals) || input.key_pressed(VirtualKeyCode::NumpadAdd) {
        dash.adjust_window(1);
    }
    if input.key_pressed(VirtualKeyCode::Minus)
        || input.key_pressed(VirtualKeyCode::NumpadSubtract)
    {
        dash.adjust_window(-1);
    }
    if input.key_pressed(VirtualKeyCode::RBracket) {
        dash.adjust_threshold(1);
    }
    if input.key_pressed(VirtualKeyCode::LBracket) {
        dash.adjust_threshold(-1);
    }
    if input.key_pressed(VirtualKeyCode::P) {
        dash.cycle_preset();
    }
    let mut reloaded = false;
    if input.key_pressed(VirtualKeyCode::R) {
        match Dataset::load(&cfg.pattern) {
            Ok(ds) => {
                dash.replace_dataset(ds);
                reloaded = true;
            }
            Err(e) => warn!(error = %e, "reload failed, keeping previous data"),
        }
    }

    reloaded || before != (dash.selection.clone(), dash.preset, dash.tab, dash.cursor)
}

fn main() -> Result<()> {
    snake_stats::init_tracing();
    let args = Args::parse();
    let cfg = DashboardConfig {
        pattern: args.pattern.clone(),
        ..DashboardConfig::default()
    };
    let mut dash = build_dashboard(&args, &cfg)?;

    if args.report {
        print!("{}", report::render(&dash.summary()));
        return Ok(());
    }

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();
    let window = WindowBuilder::new()
        .with_title("Snake agent dashboard")
        .with_inner_size(LogicalSize::new(cfg.width, cfg.height))
        .with_resizable(false)
        .build(&event_loop)
        .map_err(|e| anyhow!("failed to open the dashboard window: {e}"))?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(cfg.width, cfg.height, surface_texture)
            .map_err(|e| anyhow!("failed to create the pixel buffer: {e}"))?
    };

    let mut summary = dash.summary();
    info!(agents = summary.cards.len(), "dashboard ready");
    window.request_redraw();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        if let Event::RedrawRequested(_) = event {
            {
                let mut canvas = Canvas::new(pixels.frame_mut(), cfg.width, cfg.height);
                draw_dashboard(&mut canvas, &dash, &summary);
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
            if handle_keys(&input, &mut dash, &cfg) {
                summary = dash.summary();
                window.request_redraw();
            }
        }
    });
}
