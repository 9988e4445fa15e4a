use crate::config::GameConfig;
use crate::draw::{Canvas, Rect, Rgba, rgb};
use crate::game::{Dir, Game};
use crate::record::MatchStats;

const BACKGROUND: Rgba = rgb(0, 0, 0);
const GRID: Rgba = rgb(40, 40, 40);
const BODY: Rgba = rgb(0, 255, 0);
const HEAD: Rgba = rgb(0, 155, 0);
const FOOD: Rgba = rgb(255, 0, 0);
const WHITE: Rgba = rgb(255, 255, 255);

/// `mm:ss` for a duration in seconds.
pub fn clock_label(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Where the game-over screen puts its replay button.
pub fn replay_button(cfg: &GameConfig) -> Rect {
    Rect::new(cfg.width / 2 - 100, cfg.height / 2 + 50, 200, 50)
}

pub fn draw_game(canvas: &mut Canvas, cfg: &GameConfig, game: &Game, elapsed_secs: u64) {
    let block = cfg.block_size;
    canvas.clear(BACKGROUND);

    for x in (0..cfg.width).step_by(block as usize) {
        canvas.fill_rect(x, 0, 1, cfg.height, GRID);
    }
    for y in (0..cfg.height).step_by(block as usize) {
        canvas.fill_rect(0, y, cfg.width, 1, GRID);
    }

    for p in &game.snake {
        fill_cell(canvas, block, p.x, p.y, BODY);
    }
    let head = game.head();
    fill_cell(canvas, block, head.x, head.y, HEAD);
    if head.x >= 0 && head.y >= 0 {
        draw_eyes(canvas, block, head.x as u32, head.y as u32, game.dir);
    }
    fill_cell(canvas, block, game.food.x, game.food.y, FOOD);

    canvas.text(&format!("SCORE: {}", game.score), 10, 10, 2, WHITE);
    let time = format!("TIME: {}", clock_label(elapsed_secs));
    canvas.text_centered(&time, cfg.width / 2, 10, 2, WHITE);
    canvas.text_right(&format!("MOVES: {}", game.moves), cfg.width - 10, 10, 2, WHITE);

    if game.paused {
        canvas.fill_rect(0, 0, cfg.width, cfg.height, (0, 0, 0, 120));
        canvas.text_centered("PAUSED", cfg.width / 2, cfg.height / 2 - 14, 4, WHITE);
    }
}

fn fill_cell(canvas: &mut Canvas, block: u32, x: i32, y: i32, col: Rgba) {
    if x >= 0 && y >= 0 {
        canvas.fill_rect(x as u32 * block, y as u32 * block, block, block, col);
    }
}

fn draw_eyes(canvas: &mut Canvas, block: u32, gx: u32, gy: u32, dir: Dir) {
    let base_x = gx * block;
    let base_y = gy * block;
    let near = block / 4;
    let far = block - block / 4 - 2;
    let (e1, e2) = match dir {
        Dir::Right => ((far, near), (far, far)),
        Dir::Left => ((near, near), (near, far)),
        Dir::Up => ((near, near), (far, near)),
        Dir::Down => ((near, far), (far, far)),
    };
    for (ex, ey) in [e1, e2] {
        canvas.fill_rect(base_x + ex, base_y + ey, 2, 2, rgb(0, 0, 0));
    }
}

pub fn draw_game_over(
    canvas: &mut Canvas,
    cfg: &GameConfig,
    stats: &MatchStats,
    saved_id: Option<u64>,
) {
    canvas.clear(BACKGROUND);
    canvas.text_centered("GAME OVER", cfg.width / 2, cfg.height / 4, 6, WHITE);
    let line = format!(
        "SCORE: {} | MOVES: {} | TIME: {}",
        stats.score,
        stats.moves,
        clock_label(stats.time_seconds)
    );
    canvas.text_centered(&line, cfg.width / 2, cfg.height / 2 - 20, 2, WHITE);
    let note = match saved_id {
        Some(id) => format!("SAVED AS MATCH #{id}"),
        None => "COULD NOT SAVE THIS MATCH".to_string(),
    };
    canvas.text_centered(&note, cfg.width / 2, cfg.height / 2 + 10, 2, rgb(160, 160, 160));
    let button = replay_button(cfg);
    canvas.fill_rect(button.x, button.y, button.w, button.h, rgb(0, 100, 200));
    canvas.button(button, "PLAY AGAIN");
}
