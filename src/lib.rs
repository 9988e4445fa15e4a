//! Snake with match statistics.
//!
//! - `game` / `game_view`: the playable snake and its screens
//! - `store`: the shared JSON stats file format
//! - `generator`: synthetic histories for three agent profiles
//! - `dataset`, `dashboard`, `leaderboard`, `report`, `dashboard_view`: loading,
//!   filtering, ranking and drawing agent comparisons

pub mod config;
pub mod dashboard;
pub mod dashboard_view;
pub mod dataset;
pub mod draw;
pub mod game;
pub mod game_view;
pub mod generator;
pub mod leaderboard;
pub mod pos;
pub mod record;
pub mod report;
pub mod stats;
pub mod store;

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
