use std::path::PathBuf;

use ::log::{LevelFilter, info};
use anyhow::ensure;
use rand::SeedableRng;
use structopt::*;
use tsp_bnb::{log, prelude::*};

#[derive(Debug, StructOpt)]
struct Opt {
    /// Number of nodes per instance
    #[structopt(short, long)]
    nodes: NumNodes,

    #[structopt(short, long, default_value = "1")]
    count: u32,

    /// Weights are drawn uniformly from 1..=max_weight
    #[structopt(short = "w", long, default_value = "100")]
    max_weight: Weight,

    #[structopt(short, long)]
    symmetric: bool,

    /// Probability of an off-diagonal zero (i.e. a missing edge)
    #[structopt(short, long, default_value = "0")]
    zero_prob: f64,

    #[structopt(long, default_value = "1234")]
    seed: u64,

    #[structopt(short, long, default_value = "instances/random")]
    output_dir: PathBuf,

    /// Solve every instance and log its optimum
    #[structopt(long)]
    solve: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    log::build_logger_for_verbosity(LevelFilter::Info, opt.verbose);

    ensure!(opt.nodes > 0, "Number of nodes must be positive");
    ensure!(opt.max_weight > 0, "Maximum weight must be positive");
    ensure!(
        (0.0..=1.0).contains(&opt.zero_prob),
        "Zero probability must be within [0, 1]"
    );

    std::fs::create_dir_all(&opt.output_dir)?;
    let mut rng = rand_pcg::Pcg64::seed_from_u64(opt.seed);

    for i in 0..opt.count {
        let weights = 1..=opt.max_weight;
        let matrix = if opt.symmetric {
            WeightMatrix::random_symmetric(&mut rng, opt.nodes, weights, opt.zero_prob)?
        } else {
            WeightMatrix::random_asymmetric(&mut rng, opt.nodes, weights, opt.zero_prob)?
        };

        let filename = opt.output_dir.join(format!(
            "{}_n{:>03}_s{}_{:>04}.txt",
            if opt.symmetric { "sym" } else { "asym" },
            opt.nodes,
            opt.seed,
            i
        ));
        matrix.try_write_matrix_file(&filename)?;

        if opt.solve {
            match solve(&matrix) {
                Ok(tour) => info!("{}: cost {}", filename.display(), tour.cost()),
                Err(e) => info!("{}: {e}", filename.display()),
            }
        } else {
            info!("Wrote {}", filename.display());
        }
    }

    Ok(())
}
