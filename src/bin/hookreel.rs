use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hookreel", version)]
struct Cli {
    /// Log planning decisions (debug level) unless RUST_LOG is set.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a request and write the render tree as JSON.
    Plan(PlanArgs),
    /// Print the nodes active at one or more frames.
    Frame(FrameArgs),
    /// Export script subtitles as SubRip.
    Subtitles(SubtitlesArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write the whole plan (counts, words, clips, tree) instead of the tree alone.
    #[arg(long, default_value_t = false)]
    full: bool,

    /// Pretty-print JSON.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Global frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Evaluate every frame up to this one (exclusive) as well.
    #[arg(long)]
    to: Option<u64>,
}

#[derive(Parser, Debug)]
struct SubtitlesArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output SRT path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Subtitles(args) => cmd_subtitles(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "hookreel=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_plan(path: &Path) -> anyhow::Result<hookreel::RenderPlan> {
    let req = hookreel::RenderRequest::from_path(path)
        .with_context(|| format!("load request '{}'", path.display()))?;
    let plan = hookreel::plan_render(&req).context("plan render")?;
    if let Some(w) = plan.counts.warning {
        eprintln!("warning: {w}");
    }
    Ok(plan)
}

fn write_output(out: Option<&Path>, body: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, body).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let plan = load_plan(&args.in_path)?;
    let body = match (args.full, args.pretty) {
        (true, true) => serde_json::to_string_pretty(&plan)?,
        (true, false) => serde_json::to_string(&plan)?,
        (false, true) => serde_json::to_string_pretty(&plan.tree)?,
        (false, false) => serde_json::to_string(&plan.tree)?,
    };
    write_output(args.out.as_deref(), &body)?;
    eprintln!(
        "{} frames, fingerprint {}",
        plan.counts.total_frames, plan.fingerprint
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let plan = load_plan(&args.in_path)?;
    let end = args.to.unwrap_or(args.frame + 1).max(args.frame + 1);
    for f in args.frame..end {
        let eval = hookreel::Evaluator::eval_frame_unchecked(&plan.tree, hookreel::FrameIndex(f))
            .with_context(|| format!("evaluate frame {f}"))?;
        println!("{}", serde_json::to_string(&eval)?);
    }
    Ok(())
}

fn cmd_subtitles(args: SubtitlesArgs) -> anyhow::Result<()> {
    let plan = load_plan(&args.in_path)?;
    let srt = hookreel::write_srt(
        &plan.words,
        plan.counts.fps,
        plan.counts.script_origin(),
    );
    write_output(Some(&args.out), &srt)
}
