use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{error, info};

use snake_stats::generator::{Profile, write_profiles};

/// Write synthetic match histories, one `stats_<profile>.json` per profile.
#[derive(Parser, Debug)]
#[command(name = "gen-stats", version)]
struct Args {
    /// Matches to generate per profile.
    #[arg(short = 'n', long, default_value_t = 500)]
    count: u32,

    /// Directory that receives the files.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Profiles to generate (repeatable). Defaults to all three.
    #[arg(long = "profile", value_enum)]
    profiles: Vec<Profile>,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Continue existing files instead of replacing them.
    #[arg(long)]
    append: bool,
}

fn main() -> Result<()> {
    snake_stats::init_tracing();
    let mut args = Args::parse();
    if args.profiles.is_empty() {
        args.profiles = Profile::ALL.to_vec();
    }
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("cannot create output directory {}", args.out_dir.display()))?;

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    info!(
        count = args.count,
        out_dir = %args.out_dir.display(),
        append = args.append,
        "generating matches"
    );
    let outcomes =
        write_profiles(&args.out_dir, &args.profiles, args.count, args.append, &mut rng);
    let mut failed = 0;
    for (profile, outcome) in outcomes {
        match outcome {
            Ok(written) => info!(profile = profile.name(), written, "file written"),
            Err(e) => {
                error!(profile = profile.name(), error = %e, "could not write stats file");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} stats files could not be written", args.profiles.len());
    }
    info!(profiles = args.profiles.len(), "all stats files generated");
    Ok(())
}
