//! Weighted multi-metric ranking of agents.

use ahash::AHashMap;

use crate::stats::{mean, rolling_mean, safe_normalize, sample_std, slope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    HigherBetter,
    LowerBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    MeanScore,
    /// Standard deviation of the score.
    Consistency,
    /// Slope of the rolling-mean score curve.
    LearningRate,
    /// Matches needed to reach the threshold per point of mean score.
    CostPerPoint,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::MeanScore,
        Metric::Consistency,
        Metric::LearningRate,
        Metric::CostPerPoint,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::MeanScore => "MEAN SCORE",
            Metric::Consistency => "STD DEV",
            Metric::LearningRate => "SLOPE",
            Metric::CostPerPoint => "COST PER POINT",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Metric::MeanScore | Metric::LearningRate => Direction::HigherBetter,
            Metric::Consistency | Metric::CostPerPoint => Direction::LowerBetter,
        }
    }

    pub fn value(self, m: &AgentMetrics) -> f64 {
        match self {
            Metric::MeanScore => m.mean_score,
            Metric::Consistency => m.std_dev,
            Metric::LearningRate => m.slope,
            Metric::CostPerPoint => m.cost_per_point,
        }
    }
}

/// Per-agent leaderboard inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentMetrics {
    pub agent: String,
    pub mean_score: f64,
    pub std_dev: f64,
    pub slope: f64,
    /// First 0-based match whose rolling mean reached the threshold.
    pub first_reach: Option<usize>,
    pub cost_per_point: f64,
}

impl AgentMetrics {
    pub fn compute(
        agent: impl Into<String>,
        scores: &[f64],
        window: usize,
        threshold: f64,
    ) -> Self {
        let mean_score = mean(scores);
        let curve = rolling_mean(scores, window);
        let first_reach = curve.iter().position(|&v| v >= threshold);
        let cost_per_point = match first_reach {
            Some(idx) if mean_score > 0.0 => idx as f64 / mean_score,
            _ => f64::INFINITY,
        };
        Self {
            agent: agent.into(),
            mean_score,
            std_dev: sample_std(scores),
            slope: slope(&curve),
            first_reach,
            cost_per_point,
        }
    }

    pub fn reached_threshold(&self) -> bool {
        self.first_reach.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Preset {
    Balanced,
    MaxPerformance,
    FastLearner,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Balanced, Preset::MaxPerformance, Preset::FastLearner];

    pub fn label(self) -> &'static str {
        match self {
            Preset::Balanced => "BALANCED",
            Preset::MaxPerformance => "MAX PERFORMANCE",
            Preset::FastLearner => "FAST LEARNER",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::Balanced => "Every metric has the same weight.",
            Preset::MaxPerformance => {
                "Favours high, consistent scores even if learning takes longer."
            }
            Preset::FastLearner => {
                "Favours a steep learning curve and reaching the threshold in few matches."
            }
        }
    }

    pub fn weights(self) -> AHashMap<Metric, f64> {
        match self {
            Preset::Balanced => Metric::ALL.iter().map(|&m| (m, 1.0)).collect(),
            Preset::MaxPerformance => AHashMap::from_iter([
                (Metric::MeanScore, 3.0),
                (Metric::Consistency, 1.5),
                (Metric::LearningRate, 0.5),
            ]),
            Preset::FastLearner => {
                AHashMap::from_iter([(Metric::LearningRate, 3.0), (Metric::CostPerPoint, 2.0)])
            }
        }
    }

    pub fn next(self) -> Preset {
        match self {
            Preset::Balanced => Preset::MaxPerformance,
            Preset::MaxPerformance => Preset::FastLearner,
            Preset::FastLearner => Preset::Balanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedAgent {
    pub agent: String,
    /// 0 to 100.
    pub final_score: f64,
    /// Direction-corrected normalized value per metric, before weighting.
    pub normalized: Vec<(Metric, f64)>,
}

/// Ranks agents best first.
pub fn rank(metrics: &[AgentMetrics], preset: Preset) -> Vec<RankedAgent> {
    if metrics.is_empty() {
        return Vec::new();
    }
    let weights = preset.weights();
    let mut raw = vec![0.0; metrics.len()];
    let mut normalized: Vec<Vec<(Metric, f64)>> =
        vec![Vec::with_capacity(Metric::ALL.len()); metrics.len()];

    for metric in Metric::ALL {
        let column: Vec<f64> = metrics.iter().map(|m| metric.value(m)).collect();
        let weight = weights.get(&metric).copied().unwrap_or(0.0);
        for (i, v) in safe_normalize(&column).into_iter().enumerate() {
            let v = match metric.direction() {
                Direction::HigherBetter => v,
                Direction::LowerBetter => 1.0 - v,
            };
            let v = if v.is_finite() { v } else { 0.0 };
            normalized[i].push((metric, v));
            raw[i] += v * weight;
        }
    }

    let lo = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = hi - lo;

    let mut ranked: Vec<RankedAgent> = metrics
        .iter()
        .zip(raw)
        .zip(normalized)
        .map(|((m, s), normalized)| RankedAgent {
            agent: m.agent.clone(),
            final_score: if spread > 0.0 { 100.0 * (s - lo) / spread } else { 100.0 },
            normalized,
        })
        .collect();
    ranked.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(agent: &str, mean_score: f64, std_dev: f64, slope: f64, cost: f64) -> AgentMetrics {
        AgentMetrics {
            agent: agent.to_string(),
            mean_score,
            std_dev,
            slope,
            first_reach: cost.is_finite().then_some(0),
            cost_per_point: cost,
        }
    }

    #[test]
    fn identical_agents_all_score_one_hundred() {
        let m = vec![metrics("a", 4.0, 1.0, 0.1, 2.0), metrics("b", 4.0, 1.0, 0.1, 2.0)];
        for preset in Preset::ALL {
            let ranked = rank(&m, preset);
            assert!(ranked.iter().all(|r| r.final_score == 100.0));
        }
    }

    #[test]
    fn single_agent_is_degenerate() {
        let ranked = rank(&[metrics("solo", 3.0, 2.0, 0.5, 1.0)], Preset::Balanced);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].final_score, 100.0);
    }

    #[test]
    fn dominant_agent_wins_balanced() {
        let m = vec![
            metrics("weak", 2.0, 3.0, 0.01, 50.0),
            metrics("strong", 9.0, 1.0, 0.2, 5.0),
            metrics("middle", 5.0, 2.0, 0.1, 20.0),
        ];
        let ranked = rank(&m, Preset::Balanced);
        let order: Vec<&str> = ranked.iter().map(|r| r.agent.as_str()).collect();
        assert_eq!(order, vec!["strong", "middle", "weak"]);
        assert_eq!(ranked[0].final_score, 100.0);
        assert_eq!(ranked[2].final_score, 0.0);
    }

    #[test]
    fn lower_is_better_columns_are_inverted() {
        let m = vec![metrics("steady", 5.0, 0.5, 0.1, 2.0), metrics("erratic", 5.0, 4.0, 0.1, 2.0)];
        let ranked = rank(&m, Preset::MaxPerformance);
        assert_eq!(ranked[0].agent, "steady");
        let steady_std = ranked[0]
            .normalized
            .iter()
            .find(|(metric, _)| *metric == Metric::Consistency)
            .map(|(_, v)| *v);
        assert_eq!(steady_std, Some(1.0));
    }

    #[test]
    fn unlisted_metrics_carry_no_weight() {
        // FastLearner ignores mean score and spread entirely.
        let m = vec![
            metrics("scorer", 50.0, 0.1, 0.1, 3.0),
            metrics("learner", 1.0, 9.0, 0.9, 3.0),
        ];
        let ranked = rank(&m, Preset::FastLearner);
        assert_eq!(ranked[0].agent, "learner");
    }

    #[test]
    fn infinite_cost_counts_as_worst() {
        let m = vec![
            metrics("never", 3.0, 1.0, 0.1, f64::INFINITY),
            metrics("reached", 3.0, 1.0, 0.1, 40.0),
        ];
        let ranked = rank(&m, Preset::FastLearner);
        assert_eq!(ranked[0].agent, "reached");
        assert_eq!(ranked[1].final_score, 0.0);
    }

    #[test]
    fn scores_stay_within_bounds() {
        let m: Vec<AgentMetrics> = (0..7)
            .map(|i| {
                let f = i as f64;
                let cost = if i % 3 == 0 { f64::INFINITY } else { f };
                metrics(&format!("a{i}"), f * 1.3, 5.0 - f * 0.4, (f - 3.0) * 0.02, cost)
            })
            .collect();
        for preset in Preset::ALL {
            for r in rank(&m, preset) {
                assert!((0.0..=100.0).contains(&r.final_score), "{r:?}");
            }
        }
    }

    #[test]
    fn metrics_from_scores() {
        let m = AgentMetrics::compute("x", &[0.0, 2.0, 4.0, 6.0], 2, 3.0);
        assert_eq!(m.mean_score, 3.0);
        // rolling means: 0, 1, 3, 5
        assert_eq!(m.first_reach, Some(2));
        assert!((m.cost_per_point - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.slope - 1.7).abs() < 1e-12);
    }

    #[test]
    fn unreached_threshold_costs_infinity() {
        let m = AgentMetrics::compute("x", &[1.0, 1.0], 10, 5.0);
        assert!(!m.reached_threshold());
        assert!(m.cost_per_point.is_infinite());
    }
}
