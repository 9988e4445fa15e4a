//! Synthetic match histories for the three built-in agent profiles.

use std::path::Path;

use rand::Rng;
use rand_distr::{Distribution, Triangular};

use crate::record::{MatchRecord, MatchStats};
use crate::store::{StatsError, StatsFile};

/// Peak of the aggressive profile's score distribution.
const AGGRESSIVE_MODE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Profile {
    /// Slow learner with little variance.
    Cautious,
    Balanced,
    /// Goes for high scores and dies early often.
    Aggressive,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Cautious, Profile::Balanced, Profile::Aggressive];

    pub fn name(self) -> &'static str {
        match self {
            Profile::Cautious => "cautious",
            Profile::Balanced => "balanced",
            Profile::Aggressive => "aggressive",
        }
    }

    pub fn file_name(self) -> String {
        format!("stats_{}.json", self.name())
    }

    /// Highest score reachable in the `index`-th match (0-based).
    pub fn max_score(self, index: u32) -> u32 {
        match self {
            Profile::Cautious => 3 + index / 100,
            Profile::Balanced => 5 + index / 50,
            Profile::Aggressive => 8 + index / 30,
        }
    }

    pub fn sample<R: Rng>(self, index: u32, rng: &mut R) -> MatchStats {
        let max = self.max_score(index);
        let (score, moves) = match self {
            Profile::Cautious => {
                let score = rng.gen_range(0..=max);
                (score, score * rng.gen_range(15..=25) + rng.gen_range(20..=40))
            }
            Profile::Balanced => {
                let score = rng.gen_range(0..=max);
                (score, score * rng.gen_range(8..=20) + rng.gen_range(10..=50))
            }
            Profile::Aggressive => {
                let score = triangular(rng, 0.0, f64::from(max), AGGRESSIVE_MODE) as u32;
                (score, score * rng.gen_range(5..=15) + rng.gen_range(10..=30))
            }
        };
        let time_seconds = (f64::from(moves) * rng.gen_range(0.3..=0.8)) as u64;
        MatchStats {
            score,
            moves,
            time_seconds,
        }
    }
}

/// Triangular draw on `[low, high]` peaking at `mode` (clamped into the range).
/// A degenerate range yields `low`.
pub fn triangular<R: Rng>(rng: &mut R, low: f64, high: f64, mode: f64) -> f64 {
    if !(high > low) {
        return low;
    }
    match Triangular::new(low, high, mode.clamp(low, high)) {
        Ok(dist) => dist.sample(rng),
        Err(_) => low,
    }
}

/// `count` matches for `profile`, without ids.
pub fn generate_stats<R: Rng>(profile: Profile, count: u32, rng: &mut R) -> Vec<MatchStats> {
    (0..count).map(|i| profile.sample(i, rng)).collect()
}

/// `count` matches for `profile` numbered `1..=count`.
pub fn generate<R: Rng>(profile: Profile, count: u32, rng: &mut R) -> Vec<MatchRecord> {
    generate_stats(profile, count, rng)
        .into_iter()
        .zip(1..)
        .map(|(s, id)| s.with_id(id))
        .collect()
}

/// Writes one `stats_<profile>.json` per profile into `out_dir`, replacing
/// each file or, with `append`, continuing its ids. A failed profile does not
/// stop the others; every outcome is returned with the number of records written.
pub fn write_profiles<R: Rng>(
    out_dir: &Path,
    profiles: &[Profile],
    count: u32,
    append: bool,
    rng: &mut R,
) -> Vec<(Profile, Result<usize, StatsError>)> {
    profiles
        .iter()
        .map(|&profile| {
            let file = StatsFile::new(out_dir.join(profile.file_name()));
            let written = if append {
                file.append_all(generate_stats(profile, count, rng))
                    .map(|added| added.len())
            } else {
                let records = generate(profile, count, rng);
                file.overwrite(&records).map(|()| records.len())
            };
            (profile, written)
        })
        .collect()
}
