use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use log::{LevelFilter, info};
use structopt::StructOpt;
use tsp_bnb::{
    log::build_logger_for_verbosity,
    prelude::*,
    utils::{Tour, signal_handling},
};

#[derive(StructOpt)]
#[structopt(about = "Exact branch-and-bound solver for the travelling salesman problem")]
struct Opts {
    /// Weight matrix file; read from stdin if omitted
    #[structopt(short, long)]
    instance: Option<PathBuf>,

    /// Write the tour to this file instead of stdout
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Lower bound used for pruning: "outgoing" (exact) or "half-edge"
    #[structopt(short, long, default_value = "outgoing")]
    bound: LowerBound,

    /// Give up after this many seconds without reporting a tour
    #[structopt(short, long)]
    timeout: Option<f64>,

    /// Emit the tour as JSON
    #[structopt(long)]
    json: bool,

    /// Print the instance before solving
    #[structopt(short, long)]
    print_matrix: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn load_graph(path: &Option<PathBuf>) -> anyhow::Result<WeightMatrix> {
    if let Some(path) = path {
        WeightMatrix::try_read_matrix_file(path)
            .with_context(|| format!("Cannot read instance {}", path.display()))
    } else {
        let stdin = std::io::stdin().lock();
        Ok(WeightMatrix::try_read_matrix(stdin)?)
    }
}

fn write_tour(tour: &Tour, opts: &Opts) -> anyhow::Result<()> {
    let write = |writer: &mut dyn std::io::Write| {
        if opts.json {
            tour.write_json(writer)
        } else {
            tour.write(writer)
        }
    };

    if let Some(path) = &opts.output {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush()?;
        Ok(())
    } else {
        write(&mut std::io::stdout().lock())
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opts.verbose);
    signal_handling::initialize()?;

    let timeout = opts
        .timeout
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("Invalid timeout")?;

    let graph = load_graph(&opts.instance)?;
    info!(
        "Loaded instance with {} nodes (symmetric: {})",
        graph.number_of_nodes(),
        graph.is_symmetric()
    );

    if opts.print_matrix {
        graph.try_write_summary(std::io::stdout().lock())?;
    }

    let mut algo = BranchAndBound::new(&graph);
    algo.set_lower_bound(opts.bound);
    algo.set_timeout(timeout);
    algo.set_interruptible(true);

    let tour = algo.solve()?;
    assert!(tour.is_valid_for(&graph), "Produced tour is not valid");

    write_tour(&tour, &opts)
}
