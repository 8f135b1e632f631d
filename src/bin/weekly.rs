use std::env;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use punter::data::{download, read_from_file, CapturedSnapshot};
use punter::predictor::CumulativePredictor;
use punter::print::{tabulate_failures, tabulate_fantasy_points};
use punter::statistic::Statistic;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// statistics to combine, comma-separated
    #[clap(
        short = 's',
        long,
        value_delimiter = ',',
        default_values_t = [Statistic::PassingTouchdowns, Statistic::PassingYards, Statistic::RushingYards]
    )]
    statistics: Vec<Statistic>,

    /// directory of saved snapshots, one `<STATISTIC>.json` file per statistic; downloads if absent
    #[clap(long)]
    dir: Option<PathBuf>,

    /// remove the bookmaker's margin before building distributions
    #[clap(long)]
    devig: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    debug!("args: {args:?}");

    let mut columns = Vec::with_capacity(args.statistics.len());
    for &statistic in &args.statistics {
        let captured = read_snapshot(&args, statistic).await?;
        let predictor = CumulativePredictor::for_statistic(&captured.snapshot, statistic);
        let predictions = predictor.all_fantasy_points(args.devig);
        info!(
            "{statistic}: {} player(s) predicted, {} failed",
            predictions.values.len(),
            predictions.failures.len()
        );
        if !predictions.is_complete() {
            warn!(
                "{statistic} failures:\n{}",
                Console::default().render(&tabulate_failures(&predictions.failures))
            );
        }
        columns.push((statistic, predictions));
    }

    let table = tabulate_fantasy_points(&columns);
    info!("Fantasy points:\n{}", Console::default().render(&table));
    Ok(())
}

async fn read_snapshot(args: &Args, statistic: Statistic) -> anyhow::Result<CapturedSnapshot> {
    match args.dir.as_ref() {
        Some(dir) => Ok(read_from_file(statistic, dir.join(format!("{statistic}.json")))?),
        None => Ok(download(statistic).await?),
    }
}
