use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use neonclock::{
    ClockEngine, EngineConfig, FixedClock, FrameRGBA, PixmapHost, ResourceManifest, SurfaceSize,
    SystemClock, WallClock, WallpaperService,
};

#[derive(Parser, Debug)]
#[command(name = "neonclock", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Run the redraw loop in real time for a fixed duration.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Resource manifest JSON; paths inside are relative to it.
    #[arg(long)]
    resources: PathBuf,

    /// Engine config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 1080)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 1920)]
    height: u32,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Timestamp to show, in Unix epoch milliseconds. Defaults to now.
    #[arg(long)]
    at: Option<i64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// How long to run.
    #[arg(long)]
    seconds: f64,

    /// Write the last presented frame here.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn build_engine(
    scene: &SceneArgs,
    clock: Box<dyn WallClock>,
) -> anyhow::Result<ClockEngine<PixmapHost>> {
    let resources = ResourceManifest::from_path(&scene.resources)?;
    let config = match &scene.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let service = WallpaperService::new(Arc::new(resources), config)?;
    let size = SurfaceSize::new(scene.width, scene.height)?;
    let host = PixmapHost::new(size)?;
    Ok(service.create_engine_with_clock(host, clock)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let clock: Box<dyn WallClock> = match args.at {
        Some(at) => Box::new(FixedClock(at)),
        None => Box::new(SystemClock),
    };
    let mut engine = build_engine(&args.scene, clock)?;
    engine.on_visibility_changed(true);
    engine.on_destroy();

    let frame = engine
        .host()
        .snapshot()
        .context("surface has no pixels after drawing")?;
    write_png(&args.out, frame)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        anyhow::bail!("--seconds must be finite and >= 0");
    }
    let run_for = Duration::from_secs_f64(args.seconds);
    let mut engine = build_engine(&args.scene, Box::new(SystemClock))?;

    let start = Instant::now();
    engine.on_visibility_changed(true);
    loop {
        let elapsed = start.elapsed();
        engine.advance_to(elapsed);
        if elapsed >= run_for {
            break;
        }
        let wake = engine.next_deadline().unwrap_or(run_for).min(run_for);
        if let Some(sleep) = wake.checked_sub(start.elapsed()) {
            std::thread::sleep(sleep);
        }
    }
    engine.on_destroy();

    let presented = engine.host().presented();
    tracing::info!(
        presented,
        seconds = args.seconds,
        fps = presented as f64 / args.seconds.max(f64::EPSILON),
        "run finished"
    );

    if let Some(out) = &args.out {
        let frame = engine
            .host()
            .snapshot()
            .context("surface has no pixels after running")?;
        write_png(out, frame)?;
    }
    Ok(())
}

fn write_png(out: &Path, frame: FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let frame = frame.into_straight();
    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
