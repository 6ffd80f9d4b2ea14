//! CLI: evaluate a partition tree's per-layer accuracy

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ktree_accuracy::{
    DistanceMetric, EvalConfig, Evaluator, JsonSink, LogSink, PartitionTree, ReportSink,
    TextSink, TreeParams, Vector,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser)]
#[command(name = "ktree-accuracy")]
#[command(about = "Per-layer accuracy of a hierarchical nearest-neighbour index", long_about = None)]
struct Cli {
    /// Points to index, one comma-separated vector per line.
    /// Without it a synthetic uniform point set is generated.
    #[arg(long, global = true)]
    data: Option<String>,

    /// Synthetic point count
    #[arg(long, default_value = "2000", global = true)]
    points: usize,

    /// Synthetic dimensionality
    #[arg(long, default_value = "2", global = true)]
    dim: usize,

    /// Seed for the synthetic point set
    #[arg(long, default_value = "42", global = true)]
    seed: u64,

    /// Children per internal node
    #[arg(long, default_value = "4", global = true)]
    branching: usize,

    /// Maximum points per leaf
    #[arg(long, default_value = "16", global = true)]
    leaf_size: usize,

    /// Maximum tree depth
    #[arg(long, default_value = "16", global = true)]
    max_depth: usize,

    #[arg(long, value_enum, default_value = "euclidean", global = true)]
    metric: Metric,

    /// Report format
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy)]
enum Metric {
    Euclidean,
    Manhattan,
    Cosine,
}

impl From<Metric> for DistanceMetric {
    fn from(m: Metric) -> Self {
        match m {
            Metric::Euclidean => DistanceMetric::Euclidean,
            Metric::Manhattan => DistanceMetric::Manhattan,
            Metric::Cosine => DistanceMetric::Cosine,
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum Format {
    Text,
    Json,
    Log,
}

#[derive(Args)]
struct RunArgs {
    /// JSON config file with `n`, `times` and `k`
    #[arg(long)]
    config: Option<String>,

    /// Number of query points
    #[arg(short, long)]
    n: Option<usize>,

    /// Neighbour count used for ground truth
    #[arg(short, long)]
    k: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Uniform random query points, averaged over several seeded trials
    Random {
        #[command(flatten)]
        run: RunArgs,

        /// Number of trials
        #[arg(short, long)]
        times: Option<usize>,
    },
    /// Deterministic lattice of query points
    Grid {
        #[command(flatten)]
        run: RunArgs,
    },
}

fn resolve_config(
    base: EvalConfig,
    run: &RunArgs,
    times: Option<usize>,
) -> Result<EvalConfig> {
    let mut config = match &run.config {
        Some(path) => EvalConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path))?,
        None => base,
    };
    if let Some(n) = run.n {
        config.n = n;
    }
    if let Some(k) = run.k {
        config.k = k;
    }
    if let Some(times) = times {
        config.times = times;
    }
    config.validate()?;
    Ok(config)
}

fn load_points(cli: &Cli) -> Result<Vec<Vector>> {
    if let Some(path) = &cli.data {
        let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
        let points = raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Vector::from_str)
            .collect::<ktree_accuracy::Result<Vec<_>>>()?;
        return Ok(points);
    }

    let mut rng = StdRng::seed_from_u64(cli.seed);
    Ok((0..cli.points)
        .map(|_| Vector::new((0..cli.dim).map(|_| rng.gen::<f32>()).collect()))
        .collect())
}

fn sink_for(format: Format) -> Box<dyn ReportSink> {
    match format {
        Format::Text => Box::new(TextSink::stdout()),
        Format::Json => Box::new(JsonSink::new(std::io::stdout())),
        Format::Log => Box::new(LogSink),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = TreeParams {
        branching: cli.branching,
        leaf_size: cli.leaf_size,
        max_depth: cli.max_depth,
        metric: cli.metric.into(),
    };
    let points = load_points(&cli)?;
    let tree = PartitionTree::build(points, params)?;
    let evaluator = Evaluator::new(&tree)?;
    let mut sink = sink_for(cli.format);

    match &cli.command {
        Commands::Random { run, times } => {
            let config = resolve_config(EvalConfig::default(), run, *times)?;
            evaluator.random_queries(&config, sink.as_mut())?;
        }
        Commands::Grid { run } => {
            let config = resolve_config(EvalConfig::grid_default(), run, None)?;
            evaluator.grid_queries(&config, sink.as_mut())?;
        }
    }
    Ok(())
}
