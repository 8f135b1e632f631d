use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use punter::data::{download, read_from_file, CapturedSnapshot};
use punter::distribution::{Config, DistributionBuilder, Resolution};
use punter::line::LinePredictor;
use punter::predictor::{CumulativePredictor, Predictions};
use punter::print::{tabulate_failures, tabulate_predictions};
use punter::statistic::Statistic;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// statistic to predict (PASS_TDS, PASS_YDS, RUSH_YDS or REC_YDS)
    #[clap(short = 's', long)]
    statistic: Statistic,

    /// file to source the market snapshot from
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// download the current market snapshot
    #[clap(short = 'd', long)]
    download: bool,

    /// predict a single player only
    #[clap(short = 'p', long)]
    player: Option<String>,

    /// remove the bookmaker's margin before building distributions
    #[clap(long)]
    devig: bool,

    /// print fantasy points rather than the expected statistic
    #[clap(long)]
    fantasy: bool,

    /// fantasy points per unit of the statistic
    #[clap(long = "fantasy-value")]
    fantasy_value: Option<f64>,

    /// gaps beneath the lowest threshold at which the lower boundary is assumed
    #[clap(long = "assumption-factor")]
    assumption_factor: Option<f64>,

    /// discrete or continuous
    #[clap(short = 'r', long, value_parser = parse_resolution)]
    resolution: Option<Resolution>,

    /// treat the market as single Over/Under lines
    #[clap(long)]
    lines: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.file.is_none() && !self.download || self.file.is_some() && self.download {
            bail!("either the -f or the -d flag must be specified");
        }
        Ok(())
    }

    fn config(&self) -> Config {
        let mut config = self.statistic.config();
        if let Some(assumption_factor) = self.assumption_factor {
            config.assumption_factor = assumption_factor;
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        config
    }
}
fn parse_resolution(s: &str) -> anyhow::Result<Resolution> {
    match s.to_lowercase().as_str() {
        "d" | "discrete" => Ok(Resolution::Discrete),
        "c" | "continuous" => Ok(Resolution::Continuous),
        _ => Err(anyhow!("unsupported resolution {s}")),
    }
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
    args.validate()?;
    debug!("args: {args:?}");

    let captured = read_snapshot(&args).await?;
    info!(
        "{} ({}): {} selections captured at {}",
        captured.statistic,
        captured.statistic.description(),
        captured.snapshot.selections.len(),
        captured.capture_time
    );

    let fantasy_value = args
        .fantasy_value
        .unwrap_or_else(|| args.statistic.fantasy_value());
    let heading = if args.fantasy { "Fantasy points" } else { "Expectation" };

    if args.lines {
        let predictor = LinePredictor::new(&captured.snapshot, fantasy_value);
        if let Some(player) = &args.player {
            let expectation = predictor.player_expectation(player)?;
            let value = if args.fantasy { expectation * fantasy_value } else { expectation };
            info!("{player}: {heading}: {value:.3}");
            return Ok(());
        }
        let predictions = if args.fantasy {
            predictor.all_fantasy_points()
        } else {
            predictor.all_expectations()
        };
        print_predictions(&predictions, heading);
        return Ok(());
    }

    let builder = DistributionBuilder::try_from(args.config())?;
    debug!("builder: {builder:?}");
    let predictor = CumulativePredictor::new(&captured.snapshot, fantasy_value, builder);
    if let Some(player) = &args.player {
        let probs = predictor.cumulative_probs(player, args.devig)?;
        debug!("{player}: cumulative: {:?}", probs.pairs());
        let value = if args.fantasy {
            predictor.player_fantasy_points(player, args.devig)?
        } else {
            predictor.player_expectation(player, args.devig)?
        };
        info!("{player}: {heading}: {value:.3}");
        return Ok(());
    }

    let predictions = if args.fantasy {
        predictor.all_fantasy_points(args.devig)
    } else {
        predictor.all_expectations(args.devig)
    };
    print_predictions(&predictions, heading);
    Ok(())
}

fn print_predictions(predictions: &Predictions, heading: &str) {
    let table = tabulate_predictions(predictions, heading);
    info!("\n{}", Console::default().render(&table));
    if !predictions.is_complete() {
        warn!(
            "{} player(s) could not be predicted:\n{}",
            predictions.failures.len(),
            Console::default().render(&tabulate_failures(&predictions.failures))
        );
    }
}

async fn read_snapshot(args: &Args) -> anyhow::Result<CapturedSnapshot> {
    if let Some(path) = args.file.as_ref() {
        return Ok(read_from_file(args.statistic, path)?);
    }
    if args.download {
        return Ok(download(args.statistic).await?);
    }
    unreachable!()
}
