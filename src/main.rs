use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::PathBuf;
use std::time::Instant;
use trivialnet::encoder::{encode_position, parse_fen};
use trivialnet::positions::{random_positions, read_fen_lines};
use trivialnet::{InputPlanes, Network, NetworkFactory, OptionsDict, WeightsFile, POLICY_SIZE};

#[derive(Parser, Debug)]
#[command(author, version, about = "Evaluate chess positions through a network backend", long_about = None)]
struct Args {
    /// Backend name (defaults to the highest-priority registered backend)
    #[arg(long)]
    backend: Option<String>,

    /// Backend options as key=value pairs, e.g. "input_mode=1"
    #[arg(long, default_value = "")]
    backend_opts: String,

    /// Weights file handed to the backend
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Position to evaluate (repeatable)
    #[arg(long)]
    fen: Vec<String>,

    /// File with one FEN per line
    #[arg(long)]
    positions: Option<PathBuf>,

    /// Number of random-walk positions to add
    #[arg(long, default_value_t = 0)]
    random: usize,

    /// Maximum plies per random walk
    #[arg(long, default_value_t = 40)]
    max_plies: usize,

    /// Seed for random positions
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Positions per computation
    #[arg(long, default_value_t = 256)]
    batch_size: usize,

    /// Worker threads; each runs its own computations
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Report the N highest-scoring move indices per position
    #[arg(long, default_value_t = 0)]
    top_policy: usize,

    /// Print one JSON object per position
    #[arg(long)]
    json: bool,

    /// List registered backends and exit
    #[arg(long)]
    list_backends: bool,
}

#[derive(Serialize, Debug)]
struct EvalRecord {
    fen: String,
    value: f32,
    draw: f32,
    moves_left: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    top_policy: Vec<(usize, f32)>,
}

fn top_moves(logits: impl Fn(usize) -> f32, n: usize) -> Vec<(usize, f32)> {
    if n == 0 { return Vec::new(); }
    let mut all: Vec<(usize, f32)> = (0..POLICY_SIZE).map(|m| (m, logits(m))).collect();
    all.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    all.truncate(n);
    all
}

fn evaluate_chunk(network: &dyn Network, chunk: &[(String, InputPlanes)], top_n: usize) -> Result<Vec<EvalRecord>> {
    let mut comp = network.new_computation();
    for (_, planes) in chunk { comp.add_input(planes.clone()); }
    comp.compute_blocking()?;
    let mut out = Vec::with_capacity(comp.batch_size());
    for (i, (fen, _)) in chunk.iter().enumerate() {
        out.push(EvalRecord {
            fen: fen.clone(),
            value: comp.value(i),
            draw: comp.draw(i),
            moves_left: comp.moves_left(i),
            top_policy: top_moves(|m| comp.policy_logit(i, m), top_n),
        });
    }
    Ok(out)
}

fn collect_fens(args: &Args) -> Result<Vec<String>> {
    let mut fens = args.fen.clone();
    if let Some(path) = &args.positions {
        fens.extend(read_fen_lines(path)?);
    }
    if args.random > 0 {
        fens.extend(random_positions(args.random, args.max_plies, args.seed).iter().map(|b| b.to_string()));
    }
    Ok(fens)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let factory = NetworkFactory::global();

    if args.list_backends {
        for reg in factory.registrations() {
            println!("{:<12} priority {}", reg.name, reg.priority);
        }
        return Ok(());
    }

    let options = OptionsDict::parse(&args.backend_opts)?;
    let weights = args.weights.as_ref().map(WeightsFile::load).transpose()?;
    let network = match &args.backend {
        Some(name) => factory.create(name, weights.as_ref(), &options)?,
        None => factory.create_default(weights.as_ref(), &options)?,
    };
    let caps = *network.capabilities();
    info!("Backend capabilities: {}", serde_json::to_string(&caps)?);

    let fens = collect_fens(&args)?;
    if fens.is_empty() {
        bail!("no positions given; use --fen, --positions or --random");
    }
    let mut inputs = Vec::with_capacity(fens.len());
    for fen in fens {
        let board = parse_fen(&fen)?;
        let planes = encode_position(&board, caps.input_format)
            .with_context(|| format!("encode position for backend input format {:?}", caps.input_format))?;
        inputs.push((fen, planes));
    }

    let batch_size = args.batch_size.max(1);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} positions {elapsed}")?);
    let start = Instant::now();
    let chunks: Vec<Vec<EvalRecord>> = pool.install(|| {
        inputs
            .par_chunks(batch_size)
            .map(|chunk| {
                let r = evaluate_chunk(&*network, chunk, args.top_policy);
                pb.inc(chunk.len() as u64);
                r
            })
            .collect::<Result<Vec<_>>>()
    })?;
    pb.finish_and_clear();
    let elapsed = start.elapsed();

    let mut total = 0usize;
    for rec in chunks.iter().flatten() {
        total += 1;
        if args.json {
            println!("{}", serde_json::to_string(rec)?);
        } else {
            println!("{:+.5}  d={:.3} m={:.1}  {}", rec.value, rec.draw, rec.moves_left, rec.fen);
            for (m, logit) in &rec.top_policy {
                println!("    move {:>4}  logit {:.5}", m, logit);
            }
        }
    }
    info!("Evaluated {} positions in {:.3}s", total, elapsed.as_secs_f64());
    Ok(())
}
