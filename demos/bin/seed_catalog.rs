//! Run the seed-generation pipeline repeatedly, growing a persistent
//! catalog of identity circuits.

use std::time::Instant;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use idrc_catalog::{Catalog, SqliteCatalogStore};
use idrc_demos::{init_tracing, print_header, print_info, print_result, print_section, print_success};
use idrc_seed::{run_seed, SeedConfig, UnrollConfig};
use idrc_unroll::CancelToken;

#[derive(Parser, Debug)]
#[command(name = "seed-catalog")]
#[command(about = "Grow a catalog of identity circuits via SAT-backed seed generation")]
struct Args {
    /// Number of wires.
    #[arg(long, default_value_t = 3)]
    width: u32,

    /// Gate count of each randomly drawn forward circuit.
    #[arg(long, default_value_t = 5)]
    forward_length: usize,

    /// Gate budget allowed for the synthesized inverse.
    #[arg(long, default_value_t = 5)]
    inverse_budget: usize,

    /// Number of seeds to attempt.
    #[arg(long, default_value_t = 10)]
    seeds: usize,

    /// Named SAT backend (minisat, glucose, cadical, ...).
    #[arg(long, default_value = "cadical")]
    sat_backend: String,

    /// Path to a SQLite catalog file; defaults to an in-memory catalog.
    #[arg(long)]
    db: Option<String>,

    /// RNG seed, for reproducible demo runs.
    #[arg(long, default_value_t = 1)]
    rng_seed: u64,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    print_header("Identity Circuit Catalog — Seed Generation");
    print_result("Width", args.width);
    print_result("Forward length", args.forward_length);
    print_result("Inverse budget", args.inverse_budget);
    print_result("SAT backend", &args.sat_backend);
    print_result("Seeds requested", args.seeds);

    let store = match &args.db {
        Some(path) => SqliteCatalogStore::open(path).expect("failed to open catalog database"),
        None => SqliteCatalogStore::in_memory().expect("failed to open in-memory catalog"),
    };
    let catalog = Catalog::new(store);

    let cfg = SeedConfig::new(args.width, args.forward_length, args.inverse_budget)
        .with_sat_backend(args.sat_backend.clone());
    let unroll_cfg = UnrollConfig::default();
    let mut rng = StdRng::seed_from_u64(args.rng_seed);
    let cancel = CancelToken::new();

    print_section("Running seeds");

    let start = Instant::now();
    let mut succeeded = 0;
    for i in 0..args.seeds {
        match run_seed(&cfg, unroll_cfg, &catalog, &mut rng, &cancel) {
            Ok(outcome) => {
                succeeded += 1;
                print_result(
                    &format!("seed {i}"),
                    format!(
                        "representative={} attempts={} inserted={} duplicates={} demoted={}",
                        outcome.representative_id,
                        outcome.attempts,
                        outcome.fold_stats.inserted,
                        outcome.fold_stats.duplicates,
                        outcome.fold_stats.demoted,
                    ),
                );
            }
            Err(err) => print_info(&format!("seed {i} failed: {err}")),
        }
    }

    print_result("Elapsed", format!("{:.2?}", start.elapsed()));
    print_success(&format!("{succeeded}/{} seeds cataloged", args.seeds));

    let reps = catalog
        .list_representatives(args.width, args.forward_length + args.inverse_budget)
        .unwrap_or_default();
    print_result("Representatives in this dimension group", reps.len());
}
