//! Dashboard state: filters over a [`Dataset`] and the figures derived from them.

use tracing::debug;

use crate::config::{DashboardConfig, MAX_WINDOW, MIN_WINDOW};
use crate::dataset::Dataset;
use crate::leaderboard::{AgentMetrics, Preset, RankedAgent, rank};
use crate::stats::{BoxStats, histogram, mean, rolling_mean};

/// Score ceiling used for the threshold range when no rows are selected.
const EMPTY_SELECTION_MAX_SCORE: u32 = 20;
const DEFAULT_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    LearningCurve,
    Distribution,
    Leaderboard,
    RawData,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::LearningCurve,
        Tab::Distribution,
        Tab::Leaderboard,
        Tab::RawData,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::LearningCurve => "LEARNING CURVE",
            Tab::Distribution => "DISTRIBUTION",
            Tab::Leaderboard => "LEADERBOARD",
            Tab::RawData => "RAW DATA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selected agents, in dataset order.
    pub agents: Vec<String>,
    /// Rolling-mean window in matches.
    pub window: usize,
    /// Proficiency threshold in points.
    pub threshold: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentCard {
    pub agent: String,
    pub mean_score: f64,
}

/// Rolling mean of one agent against the global row index.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub agent: String,
    pub points: Vec<(usize, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub agent: String,
    pub box_stats: Option<BoxStats>,
    pub histogram: Vec<u32>,
}

/// Everything the views need for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub window: usize,
    pub threshold: u32,
    pub preset: Preset,
    pub cards: Vec<AgentCard>,
    pub curves: Vec<Curve>,
    pub distributions: Vec<Distribution>,
    /// Upper edge of the shared histogram range.
    pub histogram_max: f64,
    pub metrics: Vec<AgentMetrics>,
    /// Present only when at least two agents are selected.
    pub ranking: Option<Vec<RankedAgent>>,
}

pub struct Dashboard {
    dataset: Dataset,
    pub selection: Selection,
    pub preset: Preset,
    pub tab: Tab,
    /// Agent under the sidebar cursor.
    pub cursor: usize,
    histogram_bins: usize,
}

impl Dashboard {
    pub fn new(dataset: Dataset, cfg: &DashboardConfig) -> Self {
        let mut d = Self {
            selection: Selection {
                agents: dataset.agent_names(),
                window: cfg.default_window.clamp(MIN_WINDOW, MAX_WINDOW),
                threshold: DEFAULT_THRESHOLD,
            },
            dataset,
            preset: Preset::Balanced,
            tab: Tab::LearningCurve,
            cursor: 0,
            histogram_bins: cfg.histogram_bins.max(1),
        };
        d.selection.threshold = DEFAULT_THRESHOLD.min(d.selected_max_score()).max(1);
        d
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Swaps in freshly loaded data, keeping the agents that still exist.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        let keep: Vec<String> = self.selection.agents.clone();
        self.dataset = dataset;
        self.set_agents(keep);
        self.cursor = self.cursor.min(self.dataset.agents().len().saturating_sub(1));
    }

    pub fn is_selected(&self, agent: &str) -> bool {
        self.selection.agents.iter().any(|a| a == agent)
    }

    /// Highest score among selected rows.
    pub fn selected_max_score(&self) -> u32 {
        self.dataset
            .agents()
            .iter()
            .filter(|a| self.is_selected(&a.name))
            .filter_map(|a| a.max_score())
            .max()
            .unwrap_or(EMPTY_SELECTION_MAX_SCORE)
    }

    pub fn threshold_range(&self) -> (u32, u32) {
        (1, self.selected_max_score().max(1))
    }

    fn clamp_threshold(&mut self) {
        let (lo, hi) = self.threshold_range();
        self.selection.threshold = self.selection.threshold.clamp(lo, hi);
    }

    /// Selects exactly the known agents in `agents`, in dataset order.
    pub fn set_agents(&mut self, agents: Vec<String>) {
        self.selection.agents = self
            .dataset
            .agent_names()
            .into_iter()
            .filter(|n| agents.contains(n))
            .collect();
        self.clamp_threshold();
    }

    pub fn toggle_agent(&mut self, index: usize) {
        let Some(name) = self.dataset.agents().get(index).map(|a| a.name.clone()) else {
            return;
        };
        let mut agents = self.selection.agents.clone();
        if let Some(pos) = agents.iter().position(|a| *a == name) {
            agents.remove(pos);
        } else {
            agents.push(name);
        }
        self.set_agents(agents);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let n = self.dataset.agents().len();
        if n == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(n as isize) as usize;
    }

    pub fn set_window(&mut self, window: usize) {
        self.selection.window = window.clamp(MIN_WINDOW, MAX_WINDOW);
    }

    pub fn adjust_window(&mut self, delta: isize) {
        self.set_window(self.selection.window.saturating_add_signed(delta));
    }

    pub fn set_threshold(&mut self, threshold: u32) {
        self.selection.threshold = threshold;
        self.clamp_threshold();
    }

    pub fn adjust_threshold(&mut self, delta: i32) {
        self.set_threshold(self.selection.threshold.saturating_add_signed(delta));
    }

    pub fn cycle_preset(&mut self) {
        self.preset = self.preset.next();
    }

    pub fn summary(&self) -> Summary {
        let sel = &self.selection;
        let series: Vec<_> = self
            .dataset
            .agents()
            .iter()
            .filter(|a| self.is_selected(&a.name))
            .collect();

        let histogram_max = series
            .iter()
            .filter_map(|a| a.max_score())
            .max()
            .map(f64::from)
            .unwrap_or(0.0);

        let mut cards = Vec::with_capacity(series.len());
        let mut curves = Vec::with_capacity(series.len());
        let mut distributions = Vec::with_capacity(series.len());
        let mut metrics = Vec::with_capacity(series.len());
        for a in &series {
            let scores = a.scores();
            cards.push(AgentCard {
                agent: a.name.clone(),
                mean_score: mean(&scores),
            });
            curves.push(Curve {
                agent: a.name.clone(),
                points: rolling_mean(&scores, sel.window)
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (a.offset + i, v))
                    .collect(),
            });
            distributions.push(Distribution {
                agent: a.name.clone(),
                box_stats: BoxStats::from_values(&scores),
                histogram: histogram(&scores, histogram_max, self.histogram_bins),
            });
            metrics.push(AgentMetrics::compute(
                a.name.clone(),
                &scores,
                sel.window,
                f64::from(sel.threshold),
            ));
        }

        let ranking = (metrics.len() > 1).then(|| rank(&metrics, self.preset));
        debug!(
            agents = metrics.len(),
            window = sel.window,
            threshold = sel.threshold,
            preset = ?self.preset,
            "recomputed dashboard"
        );

        Summary {
            window: sel.window,
            threshold: sel.threshold,
            preset: self.preset,
            cards,
            curves,
            distributions,
            histogram_max,
            metrics,
            ranking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MatchRecord;

    fn series(name: &str, scores: &[u32]) -> (String, Vec<MatchRecord>) {
        let records = scores
            .iter()
            .zip(1..)
            .map(|(&score, id)| MatchRecord {
                id,
                score,
                moves: score * 10 + 20,
                time_seconds: 10,
            })
            .collect();
        (name.to_string(), records)
    }

    fn dashboard() -> Dashboard {
        let ds = Dataset::from_series([
            series("cautious", &[0, 1, 1, 2, 3]),
            series("aggressive", &[0, 6, 0, 8, 12]),
        ]);
        Dashboard::new(ds, &DashboardConfig::default())
    }

    #[test]
    fn defaults_select_everything() {
        let d = dashboard();
        assert_eq!(d.selection.agents, vec!["cautious", "aggressive"]);
        assert_eq!(d.selection.window, 100);
        assert_eq!(d.selection.threshold, 10);
    }

    #[test]
    fn threshold_defaults_to_max_score_when_low() {
        let ds = Dataset::from_series([series("a", &[1, 3]), series("b", &[2])]);
        let d = Dashboard::new(ds, &DashboardConfig::default());
        assert_eq!(d.selection.threshold, 3);
    }

    #[test]
    fn deselecting_clamps_threshold() {
        let mut d = dashboard();
        d.set_threshold(12);
        assert_eq!(d.selection.threshold, 12);
        d.toggle_agent(1);
        assert_eq!(d.selection.agents, vec!["cautious"]);
        assert_eq!(d.selection.threshold, 3);
    }

    #[test]
    fn empty_selection_uses_default_ceiling() {
        let mut d = dashboard();
        d.set_agents(Vec::new());
        assert_eq!(d.threshold_range(), (1, 20));
        let s = d.summary();
        assert!(s.cards.is_empty());
        assert!(s.ranking.is_none());
    }

    #[test]
    fn window_is_clamped() {
        let mut d = dashboard();
        d.adjust_window(-500);
        assert_eq!(d.selection.window, 1);
        d.set_window(5000);
        assert_eq!(d.selection.window, 1000);
    }

    #[test]
    fn ranking_needs_two_agents() {
        let mut d = dashboard();
        d.set_window(2);
        d.set_threshold(3);
        let s = d.summary();
        let ranking = s.ranking.expect("two agents selected");
        assert_eq!(ranking.len(), 2);
        assert!(ranking.iter().any(|r| r.final_score == 100.0));

        d.toggle_agent(0);
        assert!(d.summary().ranking.is_none());
    }

    #[test]
    fn curves_use_global_row_index() {
        let mut d = dashboard();
        d.set_window(2);
        let s = d.summary();
        let aggressive = &s.curves[1];
        assert_eq!(aggressive.points[0], (5, 0.0));
        assert_eq!(aggressive.points[1], (6, 3.0));
    }

    #[test]
    fn cursor_wraps() {
        let mut d = dashboard();
        d.move_cursor(-1);
        assert_eq!(d.cursor, 1);
        d.move_cursor(1);
        assert_eq!(d.cursor, 0);
    }

    #[test]
    fn reload_keeps_known_agents() {
        let mut d = dashboard();
        d.toggle_agent(0);
        d.replace_dataset(Dataset::from_series([series("aggressive", &[1]), series("new", &[2])]));
        assert_eq!(d.selection.agents, vec!["aggressive"]);
    }
}
