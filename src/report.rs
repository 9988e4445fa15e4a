//! Plain-text rendering of a dashboard [`Summary`].

use std::fmt::Write;

use crate::dashboard::Summary;
use crate::leaderboard::Metric;

/// `INF` for infinite values, `N/A` for missing ones.
pub fn format_value(v: f64, decimals: usize) -> String {
    if v.is_nan() {
        "N/A".to_string()
    } else if v.is_infinite() {
        "INF".to_string()
    } else {
        format!("{v:.decimals$}")
    }
}

pub fn metric_decimals(metric: Metric) -> usize {
    match metric {
        Metric::LearningRate => 4,
        _ => 2,
    }
}

pub fn render(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "window: {} matches | threshold: {} points | preset: {}",
        summary.window,
        summary.threshold,
        summary.preset.label()
    );
    out.push('\n');

    if summary.cards.is_empty() {
        out.push_str("no agents selected\n");
        return out;
    }

    out.push_str("mean score\n");
    for c in &summary.cards {
        let _ = writeln!(out, "  {:<20} {}", c.agent, format_value(c.mean_score, 2));
    }
    out.push('\n');

    let Some(ranking) = &summary.ranking else {
        out.push_str("select at least two agents to build the ranking\n");
        return out;
    };

    let _ = write!(out, "{:<20}", "agent");
    for m in Metric::ALL {
        let _ = write!(out, " {:>15}", m.label().to_lowercase());
    }
    let _ = writeln!(out, " {:>10}", "reached");
    for m in &summary.metrics {
        let _ = write!(out, "{:<20}", m.agent);
        for metric in Metric::ALL {
            let _ = write!(out, " {:>15}", format_value(metric.value(m), metric_decimals(metric)));
        }
        let _ = writeln!(out, " {:>10}", if m.reached_threshold() { "yes" } else { "no" });
    }
    out.push('\n');

    let _ = writeln!(out, "ranking ({})", summary.preset.description());
    for (i, r) in ranking.iter().enumerate() {
        let cost = summary
            .metrics
            .iter()
            .find(|m| m.agent == r.agent)
            .map(|m| format_value(m.cost_per_point, 2))
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(
            out,
            "  {:>2}. {:<20} {:>6.2}   cost per point {}",
            i + 1,
            r.agent,
            r.final_score,
            cost
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dashboard::Dashboard;
    use crate::dataset::Dataset;
    use crate::record::MatchRecord;

    fn rec(id: u64, score: u32) -> MatchRecord {
        MatchRecord {
            id,
            score,
            moves: 30,
            time_seconds: 12,
        }
    }

    #[test]
    fn formats_special_values() {
        assert_eq!(format_value(f64::INFINITY, 2), "INF");
        assert_eq!(format_value(f64::NAN, 2), "N/A");
        assert_eq!(format_value(1.23456, 4), "1.2346");
    }

    #[test]
    fn report_lists_ranking_best_first() {
        let ds = Dataset::from_series([
            ("low".to_string(), vec![rec(1, 0), rec(2, 1), rec(3, 0)]),
            ("high".to_string(), vec![rec(1, 4), rec(2, 6), rec(3, 9)]),
        ]);
        let mut d = Dashboard::new(ds, &DashboardConfig::default());
        d.set_window(1);
        let text = render(&d.summary());
        let first = text.find(" 1. high").expect(&text);
        let second = text.find(" 2. low").expect(&text);
        assert!(first < second);
        assert!(text.contains("100.00"));
    }

    #[test]
    fn single_agent_report_skips_ranking() {
        let ds = Dataset::from_series([("solo".to_string(), vec![rec(1, 2)])]);
        let d = Dashboard::new(ds, &DashboardConfig::default());
        let text = render(&d.summary());
        assert!(text.contains("at least two agents"));
    }
}
