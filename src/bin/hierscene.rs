use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use hierscene::{
    AnimationClock, BackendKind, FfmpegSink, FrameDriver, FrameIndex, FramePlan,
    FrameRGBA, FrameSink, Pacing, PngSequenceSink, RenderSettings, Scene, SceneConfig, SceneHost,
    SceneResult, SinkConfig, create_backend, fingerprint_plan,
};

#[derive(Parser, Debug)]
#[command(name = "hierscene", version, about = "Render the hierarchical windmill scene")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render consecutive frames as numbered PNGs.
    Sequence(SequenceArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the display list of one frame as JSON.
    Plan(PlanArgs),
    /// Run the animation paced to its tick period without writing files.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// JSON scene configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override surface width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Override surface height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Pad the world window so shapes keep their proportions.
    #[arg(long, default_value_t = false)]
    preserve_aspect: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Clock tick to render.
    #[arg(long, default_value_t = 0)]
    tick: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to render.
    #[arg(long)]
    frames: u64,

    /// First clock tick.
    #[arg(long, default_value_t = 0)]
    start_tick: u64,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to render.
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Overwrite output if it already exists (`--overwrite false` to refuse).
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    overwrite: bool,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Clock tick to compose.
    #[arg(long, default_value_t = 0)]
    tick: u64,

    /// Print only the fingerprint.
    #[arg(long, default_value_t = false)]
    fingerprint_only: bool,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to run.
    #[arg(long, default_value_t = 100)]
    frames: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &SceneArgs) -> anyhow::Result<SceneConfig> {
    let mut cfg = match &args.config {
        Some(path) => SceneConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if args.preserve_aspect {
        cfg.viewport.preserve_aspect = true;
    }
    cfg.validate().context("invalid scene configuration")?;
    tracing::debug!(
        title = %cfg.title,
        width = cfg.width,
        height = cfg.height,
        "config loaded"
    );
    Ok(cfg)
}

fn build_host(cfg: &SceneConfig, start: AnimationClock) -> anyhow::Result<SceneHost> {
    let host = SceneHost::new(Scene::new(cfg.style()), cfg.viewport, cfg.canvas()?, start)?;
    Ok(host)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let mut host = build_host(&cfg, AnimationClock::at(args.tick))?;
    let mut backend = create_backend(BackendKind::Cpu, &RenderSettings::default())?;
    let frame = host.render_frame(backend.as_mut())?;
    hierscene::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let mut host = build_host(&cfg, AnimationClock::at(args.start_tick))?;
    let mut backend = create_backend(BackendKind::Cpu, &RenderSettings::default())?;
    let driver = FrameDriver::new(cfg.tick_period_ms, Pacing::Offline)?;
    let mut sink = PngSequenceSink::new(&args.out_dir);
    let stats = driver.run(&mut host, args.frames, backend.as_mut(), &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let mut host = build_host(&cfg, AnimationClock::new())?;
    let mut backend = create_backend(BackendKind::Cpu, &RenderSettings::default())?;
    let driver = FrameDriver::new(cfg.tick_period_ms, Pacing::Offline)?;

    let mut sink = FfmpegSink::new(&args.out).overwrite(args.overwrite);
    if let Some(bg) = cfg.background {
        sink = sink.matte(bg.to_rgba8_premul());
    }
    driver.run(&mut host, args.frames, backend.as_mut(), &mut sink)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let host = build_host(&cfg, AnimationClock::at(args.tick))?;
    let plan = host.plan_frame();
    let fingerprint = fingerprint_plan(&plan);
    if args.fingerprint_only {
        println!("{fingerprint}");
        return Ok(());
    }

    let out = PlanOutput {
        tick: args.tick,
        fingerprint: fingerprint.to_string(),
        plan: &plan,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize frame plan")?
    );
    Ok(())
}

#[derive(serde::Serialize)]
struct PlanOutput<'a> {
    tick: u64,
    fingerprint: String,
    plan: &'a FramePlan,
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let mut host = build_host(&cfg, AnimationClock::new())?;
    let mut backend = create_backend(BackendKind::Cpu, &RenderSettings::default())?;
    let driver = FrameDriver::new(cfg.tick_period_ms, Pacing::RealTime)?;
    let mut sink = DigestSink::default();
    let stats = driver.run(&mut host, args.frames, backend.as_mut(), &mut sink)?;

    eprintln!(
        "{}: {} frames, {} late ticks",
        cfg.title, stats.frames_rendered, stats.late_ticks
    );
    Ok(())
}

/// Sink that only logs a pixel digest per frame.
#[derive(Default)]
struct DigestSink {
    frames: u64,
}

impl FrameSink for DigestSink {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        tracing::info!(
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "play started"
        );
        self.frames = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SceneResult<()> {
        let digest = xxhash_rust::xxh3::xxh3_64(&frame.data);
        tracing::info!(frame = idx.0, digest = %format!("{digest:016x}"), "frame");
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        tracing::info!(frames = self.frames, "play finished");
        Ok(())
    }
}
