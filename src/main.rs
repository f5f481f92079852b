use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{ArgAction, Parser};
use httpbench::{bench, load_requests, Benchmarker};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Print current version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Number of workers issuing requests in parallel
    #[arg(short = 'n', long = "worker-num", default_value_t = bench::DEFAULT_WORKERS)]
    worker_num: usize,

    /// File with one URL per line
    #[arg(short = 'f', long = "filename")]
    filename: PathBuf,

    /// Latency bucket thresholds in milliseconds, ascending
    #[arg(
        short = 't',
        long = "thresholds",
        value_delimiter = ',',
        default_value = "50,100,200,300,500"
    )]
    thresholds: Vec<u64>,

    /// Workload label used in the summary
    #[arg(long = "name", default_value = bench::DEFAULT_NAME)]
    name: String,

    /// Also print min/max/p50/p90/p99 latency
    #[arg(long = "percentiles")]
    percentiles: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the summary.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let requests = load_requests(&args.filename)?;
    info!(file = %args.filename.display(), requests = requests.len(), "loaded workload");

    let benchmarker = Benchmarker::builder()
        .worker_count(args.worker_num)
        .thresholds(args.thresholds.iter().copied().map(Duration::from_millis).collect())
        .name(args.name)
        .requests(requests)
        .build()?;

    let report = benchmarker.benchmark().await?;
    if args.percentiles {
        println!();
        print!("{}", report.percentiles());
    }

    Ok(())
}
