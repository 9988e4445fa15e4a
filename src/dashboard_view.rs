//! Draws the dashboard: sidebar filters, mean-score cards and the active tab.

use crate::dashboard::{Dashboard, Summary, Tab};
use crate::draw::{Canvas, Rect, Rgba, rgb, text_height};
use crate::leaderboard::Metric;
use crate::report::{format_value, metric_decimals};

const BACKGROUND: Rgba = rgb(18, 18, 26);
const PANEL: Rgba = (0, 0, 0, 140);
const TEXT: Rgba = rgb(230, 230, 230);
const DIM: Rgba = rgb(150, 150, 160);
const ACCENT: Rgba = rgb(180, 220, 255);
const AXIS: Rgba = rgb(200, 200, 200);

const SIDEBAR_W: u32 = 300;
const MARGIN: u32 = 10;

const PALETTE: [Rgba; 8] = [
    rgb(31, 119, 180),
    rgb(255, 127, 14),
    rgb(44, 160, 44),
    rgb(214, 39, 40),
    rgb(148, 103, 189),
    rgb(140, 86, 75),
    rgb(227, 119, 194),
    rgb(127, 127, 127),
];

/// Colour of an agent, keyed by its position in the dataset so it survives toggling.
pub fn agent_color(dash: &Dashboard, agent: &str) -> Rgba {
    let idx = dash
        .dataset()
        .agents()
        .iter()
        .position(|a| a.name == agent)
        .unwrap_or(0);
    PALETTE[idx % PALETTE.len()]
}

fn with_alpha(col: Rgba, a: u8) -> Rgba {
    (col.0, col.1, col.2, a)
}

/// Linear map of `v` from `[lo, hi]` onto `[out_lo, out_hi]`.
fn scale(v: f64, lo: f64, hi: f64, out_lo: u32, out_hi: u32) -> i32 {
    let t = if hi > lo { (v - lo) / (hi - lo) } else { 0.5 };
    (out_lo as f64 + t * (out_hi as f64 - out_lo as f64)).round() as i32
}

pub fn draw_dashboard(canvas: &mut Canvas, dash: &Dashboard, summary: &Summary) {
    canvas.clear(BACKGROUND);
    draw_sidebar(canvas, dash, summary);

    let x0 = SIDEBAR_W + MARGIN;
    let w = canvas.width().saturating_sub(x0 + MARGIN);
    canvas.text("SNAKE AGENT COMPARISON", x0, MARGIN, 3, ACCENT);

    let cards_y = MARGIN + 34;
    draw_cards(canvas, dash, summary, Rect::new(x0, cards_y, w, 44));

    let tabs_y = cards_y + 54;
    draw_tab_bar(canvas, dash.tab, Rect::new(x0, tabs_y, w, 26));

    let body_y = tabs_y + 36;
    let body = Rect::new(x0, body_y, w, canvas.height().saturating_sub(body_y + MARGIN));
    match dash.tab {
        Tab::LearningCurve => draw_learning_curve(canvas, dash, summary, body),
        Tab::Distribution => draw_distribution(canvas, dash, summary, body),
        Tab::Leaderboard => draw_leaderboard(canvas, dash, summary, body),
        Tab::RawData => draw_raw_data(canvas, dash, body),
    }
}

fn draw_sidebar(canvas: &mut Canvas, dash: &Dashboard, summary: &Summary) {
    let h = canvas.height();
    canvas.fill_rect(0, 0, SIDEBAR_W, h, PANEL);
    canvas.stroke_rect(0, 0, SIDEBAR_W, h, (255, 255, 255, 60));

    let x = MARGIN;
    let mut y = MARGIN;
    canvas.text("FILTERS", x, y, 2, ACCENT);
    y += 28;
    canvas.text(&format!("WINDOW: {} MATCHES", summary.window), x, y, 2, TEXT);
    y += 22;
    let (lo, hi) = dash.threshold_range();
    canvas.text(&format!("THRESHOLD: {} ({lo}-{hi})", summary.threshold), x, y, 2, TEXT);
    y += 22;
    canvas.text(&format!("PRESET: {}", summary.preset.label()), x, y, 2, TEXT);
    y += 34;

    canvas.text("AGENTS", x, y, 2, ACCENT);
    y += 24;
    for (i, agent) in dash.dataset().agents().iter().enumerate() {
        let selected = dash.is_selected(&agent.name);
        let marker = if i == dash.cursor { ">" } else { " " };
        let check = if selected { "[X]" } else { "[ ]" };
        let col = if selected { TEXT } else { DIM };
        let adv = canvas.text(&format!("{marker}{check} "), x, y, 2, col);
        canvas.fill_rect(x + adv, y, 12, 14, agent_color(dash, &agent.name));
        canvas.text(&agent.name, x + adv + 18, y, 2, col);
        y += 22;
    }

    let help = [
        "1-4  TABS",
        "</>  AGENT CURSOR",
        "SPACE  TOGGLE AGENT",
        "UP/DOWN  WINDOW +-10",
        "+/-  WINDOW +-1",
        "[ ]  THRESHOLD",
        "P  PRESET",
        "R  RELOAD FILES",
        "ESC  QUIT",
    ];
    let mut hy = h.saturating_sub(MARGIN + help.len() as u32 * 16);
    for line in help {
        canvas.text(line, x, hy, 1, DIM);
        hy += 16;
    }
}

fn draw_cards(canvas: &mut Canvas, dash: &Dashboard, summary: &Summary, area: Rect) {
    if summary.cards.is_empty() {
        canvas.text("SELECT AT LEAST ONE AGENT", area.x, area.y + 12, 2, DIM);
        return;
    }
    let n = summary.cards.len() as u32;
    let card_w = (area.w / n).max(1);
    for (i, card) in summary.cards.iter().enumerate() {
        let cx = area.x + i as u32 * card_w;
        canvas.fill_rect(cx, area.y, card_w.saturating_sub(6), area.h, PANEL);
        canvas.fill_rect(cx, area.y, 4, area.h, agent_color(dash, &card.agent));
        canvas.text(&format!("MEAN SCORE ({})", card.agent), cx + 10, area.y + 6, 1, DIM);
        canvas.text(&format_value(card.mean_score, 2), cx + 10, area.y + 20, 2, TEXT);
    }
}

fn draw_tab_bar(canvas: &mut Canvas, active: Tab, area: Rect) {
    let tab_w = area.w / Tab::ALL.len() as u32;
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let r = Rect::new(area.x + i as u32 * tab_w, area.y, tab_w.saturating_sub(6), area.h);
        let fill = if *tab == active { (60, 80, 120, 220) } else { (40, 40, 60, 160) };
        canvas.fill_rect(r.x, r.y, r.w, r.h, fill);
        canvas.stroke_rect(r.x, r.y, r.w, r.h, (200, 200, 220, 120));
        let label = format!("{} {}", i + 1, tab.label());
        canvas.text_centered(&label, r.x + r.w / 2, r.y + (r.h - text_height(2)) / 2, 2, TEXT);
    }
}

fn empty_notice(canvas: &mut Canvas, area: Rect, msg: &str) {
    canvas.text_centered(msg, area.x + area.w / 2, area.y + area.h / 2, 2, DIM);
}

fn draw_legend(canvas: &mut Canvas, dash: &Dashboard, agents: &[&str], x: u32, y: u32) {
    let mut ly = y;
    for agent in agents {
        canvas.fill_rect(x, ly, 12, 12, agent_color(dash, agent));
        canvas.text(agent, x + 18, ly + 2, 1, TEXT);
        ly += 16;
    }
}

fn draw_learning_curve(canvas: &mut Canvas, dash: &Dashboard, summary: &Summary, area: Rect) {
    let points = summary.curves.iter().flat_map(|c| c.points.iter());
    let (mut x_lo, mut x_hi, mut y_hi) = (usize::MAX, 0usize, 0.0f64);
    for &(x, y) in points {
        x_lo = x_lo.min(x);
        x_hi = x_hi.max(x);
        y_hi = y_hi.max(y);
    }
    if x_lo > x_hi {
        empty_notice(canvas, area, "SELECT AT LEAST ONE AGENT TO SEE THE LEARNING CURVE");
        return;
    }

    canvas.text(
        &format!("ROLLING MEAN SCORE ({} MATCH WINDOW) BY GLOBAL MATCH INDEX", summary.window),
        area.x,
        area.y,
        2,
        TEXT,
    );
    let plot = Rect::new(
        area.x + 50,
        area.y + 30,
        area.w.saturating_sub(60),
        area.h.saturating_sub(60),
    );
    canvas.stroke_rect(plot.x, plot.y, plot.w, plot.h, AXIS);
    let y_hi = if y_hi > 0.0 { y_hi } else { 1.0 };
    canvas.text_right(&format_value(y_hi, 1), plot.x - 4, plot.y, 1, DIM);
    canvas.text_right("0", plot.x - 4, plot.y + plot.h - 7, 1, DIM);
    canvas.text(&x_lo.to_string(), plot.x, plot.y + plot.h + 6, 1, DIM);
    canvas.text_right(&x_hi.to_string(), plot.x + plot.w, plot.y + plot.h + 6, 1, DIM);

    let (left, right) = (plot.x + 1, plot.x + plot.w - 2);
    let (top, bottom) = (plot.y + 1, plot.y + plot.h - 2);
    for curve in &summary.curves {
        let col = agent_color(dash, &curve.agent);
        let mut prev: Option<(i32, i32)> = None;
        for &(x, y) in &curve.points {
            let px = scale(x as f64, x_lo as f64, x_hi as f64, left, right);
            let py = scale(y, 0.0, y_hi, bottom, top);
            if let Some((qx, qy)) = prev {
                canvas.line(qx, qy, px, py, col);
            }
            prev = Some((px, py));
        }
    }
    let agents: Vec<&str> = summary.curves.iter().map(|c| c.agent.as_str()).collect();
    draw_legend(canvas, dash, &agents, plot.x + 10, plot.y + 10);
}

fn draw_distribution(canvas: &mut Canvas, dash: &Dashboard, summary: &Summary, area: Rect) {
    if summary.distributions.is_empty() {
        empty_notice(canvas, area, "SELECT AT LEAST ONE AGENT TO SEE THE DISTRIBUTIONS");
        return;
    }
    let half = area.w / 2;
    canvas.text("FINAL SCORE SUMMARY (BOX PLOT)", area.x, area.y, 2, TEXT);
    canvas.text("SCORE FREQUENCY (HISTOGRAM)", area.x + half + 10, area.y, 2, TEXT);

    let box_area = Rect::new(
        area.x + 40,
        area.y + 30,
        half.saturating_sub(50),
        area.h.saturating_sub(60),
    );
    canvas.stroke_rect(box_area.x, box_area.y, box_area.w, box_area.h, AXIS);
    let y_hi = summary.histogram_max.max(1.0);
    let (top, bottom) = (box_area.y + 2, box_area.y + box_area.h - 3);
    canvas.text_right(&format_value(y_hi, 0), box_area.x - 4, box_area.y, 1, DIM);
    canvas.text_right("0", box_area.x - 4, bottom - 6, 1, DIM);

    let n = summary.distributions.len() as u32;
    let slot = (box_area.w / n).max(1);
    for (i, d) in summary.distributions.iter().enumerate() {
        let col = agent_color(dash, &d.agent);
        let cx = box_area.x + i as u32 * slot + slot / 2;
        canvas.text_centered(&d.agent, cx, box_area.y + box_area.h + 6, 1, TEXT);
        let Some(b) = &d.box_stats else { continue };
        let y = |v: f64| scale(v, 0.0, y_hi, bottom, top).max(0) as u32;
        let bw = (slot / 2).max(4);
        let (q3y, q1y) = (y(b.q3), y(b.q1));
        canvas.fill_rect(cx - bw / 2, q3y, bw, (q1y - q3y).max(1), with_alpha(col, 160));
        canvas.stroke_rect(cx - bw / 2, q3y, bw, (q1y - q3y).max(1), col);
        canvas.fill_rect(cx - bw / 2, y(b.median), bw, 2, TEXT);
        canvas.line(cx as i32, y(b.q3) as i32, cx as i32, y(b.whisker_high) as i32, col);
        canvas.line(cx as i32, y(b.q1) as i32, cx as i32, y(b.whisker_low) as i32, col);
        for wy in [y(b.whisker_high), y(b.whisker_low)] {
            canvas.fill_rect(cx - bw / 4, wy, (bw / 2).max(1), 1, col);
        }
        for &o in &b.outliers {
            canvas.fill_rect(cx.saturating_sub(1), y(o).saturating_sub(1), 3, 3, TEXT);
        }
    }

    let hist_area = Rect::new(
        area.x + half + 10,
        area.y + 30,
        half.saturating_sub(20),
        area.h.saturating_sub(60),
    );
    for d in &summary.distributions {
        canvas.bar_chart(hist_area, &d.histogram, with_alpha(agent_color(dash, &d.agent), 110));
    }
    canvas.text("0", hist_area.x, hist_area.y + hist_area.h + 6, 1, DIM);
    canvas.text_right(
        &format_value(summary.histogram_max, 0),
        hist_area.x + hist_area.w,
        hist_area.y + hist_area.h + 6,
        1,
        DIM,
    );
    let agents: Vec<&str> = summary.distributions.iter().map(|d| d.agent.as_str()).collect();
    draw_legend(
        canvas,
        dash,
        &agents,
        hist_area.x + hist_area.w.saturating_sub(140),
        hist_area.y + 10,
    );
}

fn draw_leaderboard(canvas: &mut Canvas, dash: &Dashboard, summary: &Summary, area: Rect) {
    let Some(ranking) = &summary.ranking else {
        empty_notice(canvas, area, "SELECT AT LEAST TWO AGENTS TO BUILD THE RANKING");
        return;
    };

    canvas.text("METRICS", area.x, area.y, 2, ACCENT);
    let col_w = area.w / 6;
    let mut y = area.y + 24;
    canvas.text("AGENT", area.x, y, 1, DIM);
    for (i, m) in Metric::ALL.iter().enumerate() {
        canvas.text(m.label(), area.x + (i as u32 + 1) * col_w, y, 1, DIM);
    }
    canvas.text(&format!("REACHED {}?", summary.threshold), area.x + 5 * col_w, y, 1, DIM);
    y += 16;
    for m in &summary.metrics {
        canvas.text(&m.agent, area.x, y, 1, agent_color(dash, &m.agent));
        for (i, metric) in Metric::ALL.iter().enumerate() {
            let v = format_value(metric.value(m), metric_decimals(*metric));
            canvas.text(&v, area.x + (i as u32 + 1) * col_w, y, 1, TEXT);
        }
        let reached = if m.reached_threshold() { "YES" } else { "NO" };
        canvas.text(reached, area.x + 5 * col_w, y, 1, TEXT);
        y += 14;
    }

    y += 20;
    canvas.text(&format!("RANKING: {}", summary.preset.label()), area.x, y, 2, ACCENT);
    y += 20;
    canvas.text(summary.preset.description(), area.x, y, 1, DIM);
    y += 22;

    let bar_x = area.x + 260;
    let bar_w = area.w.saturating_sub(260 + 200);
    for (i, r) in ranking.iter().enumerate() {
        if y + 30 > area.y + area.h {
            break;
        }
        let col = agent_color(dash, &r.agent);
        canvas.text(&format!("#{} {}", i + 1, r.agent), area.x, y + 4, 2, col);
        canvas.fill_rect(bar_x, y, bar_w, 22, (40, 40, 60, 160));
        let filled = ((r.final_score / 100.0) * bar_w as f64).round() as u32;
        canvas.fill_rect(bar_x, y, filled.min(bar_w), 22, with_alpha(col, 200));
        canvas.text(&format_value(r.final_score, 2), bar_x + 6, y + 4, 2, TEXT);
        if let Some(m) = summary.metrics.iter().find(|m| m.agent == r.agent) {
            canvas.text(
                &format!("COST/POINT {}", format_value(m.cost_per_point, 2)),
                bar_x + bar_w + 12,
                y + 8,
                1,
                DIM,
            );
        }
        y += 30;
    }
}

fn draw_raw_data(canvas: &mut Canvas, dash: &Dashboard, area: Rect) {
    let rows: Vec<_> = dash.dataset().rows(&dash.selection.agents).collect();
    if rows.is_empty() {
        empty_notice(canvas, area, "NO ROWS SELECTED");
        return;
    }
    let line_h = 14;
    let visible = (area.h.saturating_sub(40) / line_h) as usize;
    let start = rows.len().saturating_sub(visible);
    canvas.text(
        &format!("LAST {} OF {} ROWS", rows.len() - start, rows.len()),
        area.x,
        area.y,
        2,
        TEXT,
    );
    let cols = ["ROW", "AGENT", "ID", "SCORE", "MOVES", "TIME (S)"];
    let col_w = area.w / cols.len() as u32;
    let mut y = area.y + 26;
    for (i, c) in cols.iter().enumerate() {
        canvas.text(c, area.x + i as u32 * col_w, y, 1, DIM);
    }
    y += line_h;
    for (row, agent, r) in &rows[start..] {
        let cells = [
            row.to_string(),
            agent.to_string(),
            r.id.to_string(),
            r.score.to_string(),
            r.moves.to_string(),
            r.time_seconds.to_string(),
        ];
        for (i, c) in cells.iter().enumerate() {
            let col = if i == 1 { agent_color(dash, agent) } else { TEXT };
            canvas.text(c, area.x + i as u32 * col_w, y, 1, col);
        }
        y += line_h;
    }
}
