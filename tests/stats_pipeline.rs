use std::fs;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use snake_stats::config::DashboardConfig;
use snake_stats::dashboard::Dashboard;
use snake_stats::dataset::{Dataset, DatasetError};
use snake_stats::generator::{Profile, generate, generate_stats, write_profiles};
use snake_stats::leaderboard::Preset;
use snake_stats::record::MatchStats;
use snake_stats::store::StatsFile;
use tempfile::tempdir;

fn pattern(dir: &std::path::Path) -> String {
    dir.join("stats_*.json").to_string_lossy().into_owned()
}

#[test]
fn generated_then_appended_ids_continue() {
    let dir = tempdir().expect("tempdir");
    let file = StatsFile::new(dir.path().join(Profile::Balanced.file_name()));
    let mut rng = SmallRng::seed_from_u64(11);

    file.overwrite(&generate(Profile::Balanced, 1, &mut rng)).expect("write");
    assert_eq!(file.read().expect("read")[0].id, 1);

    let added = file
        .append_all(generate_stats(Profile::Balanced, 3, &mut rng))
        .expect("append");
    assert_eq!(added.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3, 4]);

    let next = file
        .append(MatchStats {
            score: 1,
            moves: 20,
            time_seconds: 9,
        })
        .expect("append one");
    assert_eq!(next.id, 5);
}

#[test]
fn dashboard_ranks_generated_profiles() {
    let dir = tempdir().expect("tempdir");
    let mut rng = SmallRng::seed_from_u64(2024);
    for profile in Profile::ALL {
        let file = StatsFile::new(dir.path().join(profile.file_name()));
        file.overwrite(&generate(profile, 300, &mut rng)).expect("write");
    }

    let ds = Dataset::load(&pattern(dir.path())).expect("load");
    assert_eq!(ds.agent_names(), vec!["aggressive", "balanced", "cautious"]);
    assert_eq!(ds.row_count(), 900);

    let mut dash = Dashboard::new(ds, &DashboardConfig::default());
    for preset in Preset::ALL {
        dash.preset = preset;
        let summary = dash.summary();
        let ranking = summary.ranking.expect("three agents selected");
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking[0].final_score, 100.0);
        assert!(ranking.iter().all(|r| (0.0..=100.0).contains(&r.final_score)));
    }
}

#[test]
fn malformed_and_empty_files_are_skipped() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("stats_broken.json"), "[{\"id\": 1,").expect("write");
    fs::write(dir.path().join("stats_empty.json"), "[]").expect("write");
    let good = StatsFile::new(dir.path().join("stats_good.json"));
    good.append(MatchStats {
        score: 2,
        moves: 30,
        time_seconds: 12,
    })
    .expect("append");

    let ds = Dataset::load(&pattern(dir.path())).expect("load");
    assert_eq!(ds.agent_names(), vec!["good"]);
}

#[test]
fn missing_files_are_reported() {
    let dir = tempdir().expect("tempdir");
    match Dataset::load(&pattern(dir.path())) {
        Err(DatasetError::NoStatsFiles(_)) => {}
        other => panic!("expected NoStatsFiles, got {other:?}"),
    }

    fs::write(dir.path().join("stats_x.json"), "not json").expect("write");
    match Dataset::load(&pattern(dir.path())) {
        Err(DatasetError::NoUsableFiles(_)) => {}
        other => panic!("expected NoUsableFiles, got {other:?}"),
    }
}

#[test]
fn one_unwritable_profile_does_not_stop_the_rest() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir(dir.path().join(Profile::Balanced.file_name())).expect("mkdir");
    let mut rng = SmallRng::seed_from_u64(5);

    let outcomes = write_profiles(dir.path(), &Profile::ALL, 3, false, &mut rng);
    assert_eq!(outcomes.len(), 3);
    for (profile, outcome) in &outcomes {
        match profile {
            Profile::Balanced => assert!(outcome.is_err(), "{outcome:?}"),
            _ => assert_eq!(outcome.as_ref().ok(), Some(&3), "{profile:?}"),
        }
    }

    let ds = Dataset::load(&pattern(dir.path())).expect("load");
    assert_eq!(ds.agent_names(), vec!["aggressive", "cautious"]);
}

#[test]
fn append_mode_continues_each_profile() {
    let dir = tempdir().expect("tempdir");
    let mut rng = SmallRng::seed_from_u64(8);
    let profiles = [Profile::Cautious];

    write_profiles(dir.path(), &profiles, 2, false, &mut rng);
    let outcomes = write_profiles(dir.path(), &profiles, 3, true, &mut rng);
    assert_eq!(outcomes[0].1.as_ref().ok(), Some(&3));

    let file = StatsFile::new(dir.path().join(Profile::Cautious.file_name()));
    let ids: Vec<u64> = file.read().expect("read").iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn recursive_pattern_merges_same_named_agents() {
    let dir = tempdir().expect("tempdir");
    for (sub, score) in [("run1", 2), ("run2", 5)] {
        fs::create_dir(dir.path().join(sub)).expect("mkdir");
        StatsFile::new(dir.path().join(sub).join("stats_player.json"))
            .append(MatchStats {
                score,
                moves: 40,
                time_seconds: 15,
            })
            .expect("append");
    }

    let ds = Dataset::load(&dir.path().join("**/stats_*.json").to_string_lossy()).expect("load");
    assert_eq!(ds.agent_names(), vec!["player"]);
    assert_eq!(ds.agent("player").expect("player").scores(), vec![2.0, 5.0]);
}
