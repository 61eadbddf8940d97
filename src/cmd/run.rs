use crate::reports;
use clap::{ArgMatches, Args};
use seatforge::api::{self, GenerateRequest, GenerateResult, RunEvent};
use seatforge::config::Config;
use seatforge::error::{SeatForgeError, SfResult};
use seatforge::optimizer::{GenScore, ProgressCallback};
use seatforge::plan::Plan;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use tracing::{debug, info, warn};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Request JSON (grid, groups, constraints, GA parameters).
    #[arg(short, long)]
    pub request: String,

    #[command(flatten)]
    pub config: Config,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Stream run events to this file, one JSON object per line.
    #[arg(short, long)]
    pub events: Option<String>,

    /// Write the final result JSON here.
    #[arg(short, long)]
    pub output: Option<String>,
}

struct CliLogger;
impl ProgressCallback for CliLogger {
    fn on_progress(&self, generation: usize, total: usize) {
        debug!("Gen {:5} / {}", generation, total);
    }

    fn on_snapshot(&self, gen_of_best: GenScore, best: &Plan) {
        info!(
            "Best: {} (since gen {}) | Seated: {}",
            best.score(),
            gen_of_best.generation,
            best.seated_count()
        );
    }
}

fn resolve_request(args: &RunArgs, config_path: Option<&str>, matches: &ArgMatches) -> SfResult<GenerateRequest> {
    info!("📂 Loading Request: {}", args.request);
    let mut request = GenerateRequest::load_from_file(&args.request)?;

    // Request values first, then the config file, then explicit CLI flags.
    let mut config = match config_path {
        Some(path) => {
            info!("⚖️  Loading Config from: {}", path);
            Config::load_from_file(path)?
        }
        None => request.config(),
    };
    config.merge_from_cli(&args.config, matches);
    request.set_config(config);

    if args.seed.is_some() {
        request.seed = args.seed;
    }
    Ok(request)
}

fn run_with_event_log(request: &GenerateRequest, path: &str) -> SfResult<GenerateResult> {
    let file = File::create(path)?;
    let (tx, rx) = mpsc::channel::<RunEvent>();

    let writer = thread::spawn(move || -> SfResult<usize> {
        let mut out = BufWriter::new(file);
        let mut count = 0;
        for event in rx {
            serde_json::to_writer(&mut out, &event)?;
            out.write_all(b"\n")?;
            count += 1;
        }
        out.flush()?;
        Ok(count)
    });

    let result = api::generate_streaming(request, &tx);
    drop(tx);

    match writer.join() {
        Ok(Ok(count)) => info!("📝 Wrote {} events to {}", count, path),
        Ok(Err(e)) => warn!("Event log {} is incomplete: {}", path, e),
        Err(_) => warn!("Event writer for {} panicked", path),
    }
    result
}

pub fn run(args: RunArgs, config_path: Option<&str>, matches: &ArgMatches) -> SfResult<()> {
    let request = resolve_request(&args, config_path, matches)?;
    info!(
        "🚀 Seating {} groups on a {}x{} grid",
        request.groups.len(),
        request.grid_size.width,
        request.grid_size.height
    );

    let result = match &args.events {
        Some(path) => run_with_event_log(&request, path)?,
        None => api::generate(&request, &CliLogger)?,
    };

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&result)?)?;
        info!("💾 Result saved to {}", path);
    }

    reports::print_summary(&result);
    reports::print_plan("BEST PLAN", &result.best_plan);

    match result.error {
        Some(e) => Err(SeatForgeError::RunAborted(e)),
        None => Ok(()),
    }
}
