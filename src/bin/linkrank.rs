use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use linkrank::dense::{google_matrix, perron_vector, power_method, textbook};
use linkrank::validation::{compare_scores, PetgraphOracle, ReferenceRanker, AGREEMENT_THRESHOLD};
use linkrank::{load_graph, report, PageRankEngine, RankConfig};

#[derive(Parser)]
#[command(name = "linkrank", version, about = "PageRank for web-link datasets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank the pages of a dataset
    Rank {
        #[command(flatten)]
        opts: RankOpts,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Rank a dataset and check it against the petgraph reference computation
    Compare {
        #[command(flatten)]
        opts: RankOpts,
    },
    /// Show the dense-matrix results for the textbook link matrices
    Textbook,
}

#[derive(Args)]
struct RankOpts {
    /// Dataset file: a header line, then `<id> <url>` and `<src> <dst>` lines
    path: PathBuf,
    /// JSON file with damping, tolerance and max_iterations
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    damping: Option<f64>,
    #[arg(long)]
    tolerance: Option<f64>,
    #[arg(long = "max-iter")]
    max_iter: Option<usize>,
    /// Number of pages to show
    #[arg(long, default_value_t = 10)]
    top: usize,
}

impl RankOpts {
    fn config(&self) -> Result<RankConfig> {
        let mut cfg = match &self.config {
            Some(path) => RankConfig::from_path(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => RankConfig::default(),
        };
        if let Some(d) = self.damping {
            cfg.damping = d;
        }
        if let Some(t) = self.tolerance {
            cfg.tolerance = t;
        }
        if let Some(k) = self.max_iter {
            cfg.max_iterations = k;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn rank(opts: &RankOpts, json: bool) -> Result<ExitCode> {
    let cfg = opts.config()?;
    let graph = load_graph(&opts.path)?;
    let result = PageRankEngine::from_config(&cfg)?.compute_rank(&graph);
    let rows = report::top_n(&result, &graph, opts.top);

    if json {
        let out = serde_json::json!({
            "nodes": graph.num_nodes,
            "iterations": result.iterations,
            "converged": result.converged,
            "delta": result.delta,
            "top": rows,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("=== TOP {} ===", opts.top);
        print!("{}", report::format_table(&rows));
    }
    Ok(ExitCode::SUCCESS)
}

fn compare(opts: &RankOpts) -> Result<ExitCode> {
    let cfg = opts.config()?;
    let graph = load_graph(&opts.path)?;
    let ours = PageRankEngine::from_config(&cfg)?.compute_rank(&graph);
    let reference = PetgraphOracle::default().pagerank(&graph, cfg.damping, cfg.tolerance)?;
    let cmp = compare_scores(&ours, &reference, opts.top)?;

    print!("{}", report::format_comparison(&cmp));
    if cmp.agrees(AGREEMENT_THRESHOLD) {
        println!("Results agree");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Results disagree");
        Ok(ExitCode::FAILURE)
    }
}

fn print_vector(title: &str, values: impl Iterator<Item = f64>) {
    println!("\n--- {title} ---");
    for (i, s) in values.enumerate() {
        println!("Page {}: {s:.5}", i + 1);
    }
}

fn show_textbook() -> Result<ExitCode> {
    let defaults = RankConfig::default();
    for (name, a) in textbook::all() {
        let m = google_matrix(&a, defaults.teleport())?;
        let run = power_method(&m, defaults.tolerance, 1000)?;
        print_vector(
            &format!("{name} ({} iterations)", run.iterations),
            run.vector.iter().copied(),
        );
    }

    let raw = textbook::dangling_page_three();
    let drained = power_method(&raw, defaults.tolerance, 1000)?;
    println!(
        "\nUndamped power method on the dangling matrix: sum {:.3e} after {} iterations",
        drained.vector.sum(),
        drained.iterations
    );
    let perron = perron_vector(&raw)?;
    println!("Perron eigenvalue: {:.4}", perron.eigenvalue);
    print_vector("Perron vector", perron.vector.iter().copied());
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let outcome = match &cli.command {
        Command::Rank { opts, json } => rank(opts, *json),
        Command::Compare { opts } => compare(opts),
        Command::Textbook => show_textbook(),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
