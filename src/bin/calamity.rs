use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use calamity::Clock as _;
use clap::{Parser, Subcommand};

const MAX_FRAMES: f64 = 10_000_000.0;

#[derive(Parser, Debug)]
#[command(name = "calamity", version)]
struct Cli {
    /// Log channel setup and timeline events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a calamity document, validate it and resolve every subject.
    Validate(ValidateArgs),
    /// Run a calamity at a fixed frame rate and print scene snapshots as JSON lines.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input calamity JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input calamity JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Ticks per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Stop after this many seconds (defaults to the calamity duration).
    #[arg(long)]
    until: Option<f64>,

    /// Seconds between printed samples (defaults to every tick).
    #[arg(long)]
    every: Option<f64>,
}

#[derive(serde::Serialize)]
struct Sample<'a> {
    time: f64,
    progress: calamity::Progress,
    scene: &'a calamity::SceneSnapshot,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_document(path: &Path) -> anyhow::Result<calamity::CalamityDocument> {
    let f = File::open(path).with_context(|| format!("open calamity '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: calamity::CalamityDocument =
        serde_json::from_reader(r).with_context(|| "parse calamity JSON")?;
    Ok(doc)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path)?;
    doc.validate()?;
    let scene = calamity::Scene::from_snapshot(doc.scene.clone());
    let controller = calamity::build_controller(&doc.calamity, &scene)?;

    eprintln!(
        "ok: {} channel(s) over {}s ({:?})",
        controller.channel_count(),
        controller.duration_secs(),
        controller.ease()
    );
    for (kind, label) in controller.channel_labels() {
        eprintln!("  {kind:<14} {label}");
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be > 0");
    }

    let doc = read_document(&args.in_path)?;
    let scene = calamity::Scene::from_snapshot(doc.scene.clone());
    let mut controller = calamity::build_controller(&doc.calamity, &scene)?;

    let until = args.until.unwrap_or(controller.duration_secs());
    if !until.is_finite() || until < 0.0 {
        anyhow::bail!("--until must be >= 0");
    }
    let frames = (until * args.fps).round();
    if frames > MAX_FRAMES {
        anyhow::bail!("--until * --fps is {frames} frames; the limit is {MAX_FRAMES}");
    }
    let frames = frames as u64;
    let every = args.every.unwrap_or(1.0 / args.fps).max(1.0 / args.fps);
    let frames_per_sample = ((every * args.fps).round() as u64).max(1);

    let clock = calamity::ManualClock::default();
    controller
        .setup_with(&clock)
        .context("set up calamity timeline")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in 0..=frames {
        clock.set(frame as f64 / args.fps);
        let progress = controller
            .tick_with(&clock)
            .with_context(|| format!("tick frame {frame}"))?;

        if frame % frames_per_sample == 0 || frame == frames {
            let snapshot = scene.snapshot().context("snapshot scene")?;
            let sample = Sample {
                time: clock.now(),
                progress,
                scene: &snapshot,
            };
            serde_json::to_writer(&mut out, &sample).context("write sample")?;
            writeln!(out).context("write sample")?;
        }
    }
    Ok(())
}
