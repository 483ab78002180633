//! Metric center CLI
//!
//! Prints the point of a coordinates file whose farthest neighbour is closest.
//!
//! Usage:
//!     metric-center points.txt
//!     metric-center points.txt --workers 8 --strategy strided -v

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use metric_center::format::Report;
use metric_center::{MetricCenter, PartitionStrategy, PointSet};

/// Find the metric center of a set of 2-D points
#[derive(Parser, Debug)]
#[command(name = "metric-center")]
#[command(version)]
#[command(long_about = None)]
struct Cli {
    /// File with one "x y" pair per line
    file: PathBuf,

    /// Number of parallel workers [default: available parallelism]
    #[arg(short, long)]
    workers: Option<usize>,

    /// How candidates are split among workers: contiguous or strided
    #[arg(short, long, default_value = "contiguous")]
    strategy: PartitionStrategy,

    /// Evaluate every candidate against every point
    #[arg(long)]
    no_pruning: bool,

    /// Increase log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn metric_center(&self) -> Result<MetricCenter> {
        let mut center = MetricCenter::new()
            .with_strategy(self.strategy)
            .with_pruning(!self.no_pruning);
        if let Some(workers) = self.workers {
            center = center.with_workers(workers)?;
        }
        Ok(center)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let center = cli.metric_center()?;
    let file = File::open(&cli.file)
        .with_context(|| format!("cannot open {}", cli.file.display()))?;
    let points = PointSet::load(BufReader::new(file))
        .with_context(|| format!("cannot load points from {}", cli.file.display()))?;

    let result = center.fit(&points)?;
    println!("{}", Report::new(&points, &result)?);
    Ok(())
}
