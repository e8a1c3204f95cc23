use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scrollreel::{
    CaptionController, Compositor, FrameLibrary, FrameState, FsFrameSource, Hud, LoadOpts,
    Navigator, ReelConfig, ScrollProgressSource, ScrollRatio, SequencePlayer, Surface, Timeline,
    Viewport, render::choose_strategy,
};

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the surface at one scroll ratio as a PNG.
    Frame(FrameArgs),
    /// Render a sweep of scroll ratios as numbered PNGs.
    Scrub(ScrubArgs),
    /// Print the per-tick state at a scroll ratio as JSON.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Asset root holding one directory per section.
    #[arg(long)]
    assets: PathBuf,

    /// Scroll ratio in [0, 1].
    #[arg(long)]
    ratio: f64,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    /// Asset root holding one directory per section.
    #[arg(long)]
    assets: PathBuf,

    /// First scroll ratio.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll ratio.
    #[arg(long, default_value_t = 1.0)]
    to: f64,

    /// Number of evenly spaced ratios, endpoints included.
    #[arg(long, default_value_t = 60)]
    steps: u32,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Output directory for `step-NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Override rayon worker threads for frame loading.
    #[arg(long)]
    threads: Option<usize>,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Scroll ratio in [0, 1].
    #[arg(long)]
    ratio: f64,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Scrub(args) => cmd_scrub(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "scrollreel=debug" } else { "scrollreel=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ReelConfig> {
    match path {
        Some(p) => Ok(ReelConfig::from_json_file(p)?),
        None => Ok(ReelConfig::default()),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let viewport = Viewport::new(args.width, args.height)?;
    let ratio = ScrollRatio::new(args.ratio);
    let timeline = Timeline::from_config(&cfg)?;
    let source = FsFrameSource::new(&args.assets, cfg.naming.clone());

    // Only the layers visible at this ratio are decoded.
    let states = timeline.map(ratio);
    let (library, _) = FrameLibrary::load_selected(
        &source,
        &cfg,
        &timeline.visible_frames([ratio]),
        LoadOpts::default(),
    )?;

    let mut surface = Surface::new(viewport);
    let stats = Compositor::from_config(&cfg).compose(&states, &timeline, &library, &mut surface)?;
    tracing::info!(drawn = stats.drawn, missing = stats.missing, "composed");

    write_png(&surface, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.steps > 0, "--steps must be >= 1");
    let cfg = load_config(args.config.as_deref())?;
    let viewport = Viewport::new(args.width, args.height)?;

    let timeline = Timeline::from_config(&cfg)?;

    // Resolve every step's ratio through a scroll source first so only frames the sweep shows
    // get decoded.
    let span = args.to - args.from;
    let last = f64::from(args.steps.saturating_sub(1).max(1));
    let step_ratio = |i: u32| ScrollRatio::new(args.from + span * f64::from(i) / last);
    let mut planner = ScrollProgressSource::new(cfg.track, viewport);
    let ratios: Vec<ScrollRatio> = (0..args.steps)
        .map(|i| {
            planner.on_scroll(planner.scroll_y_for(step_ratio(i)));
            planner.snapshot().ratio
        })
        .collect();

    let frames = FsFrameSource::new(&args.assets, cfg.naming.clone());
    let (library, reports) = FrameLibrary::load_selected(
        &frames,
        &cfg,
        &timeline.visible_frames(ratios),
        LoadOpts {
            threads: args.threads,
        },
    )?;
    let failed: usize = reports.iter().map(|r| r.failed.len()).sum();
    if failed > 0 {
        tracing::warn!(failed, "some frames failed to load");
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut source = ScrollProgressSource::new(cfg.track, viewport);
    let mut player = SequencePlayer::attach(&mut source, cfg, library)?;

    // Offline ticks are spaced a full second apart so the redraw cap never defers a step.
    let t0 = Instant::now();
    for i in 0..args.steps {
        source.on_scroll(source.scroll_y_for(step_ratio(i)));
        player.tick(t0 + Duration::from_secs(u64::from(i)))?;

        let out = args.out_dir.join(format!("step-{i:04}.png"));
        write_png(player.surface(), &out)?;
    }

    let stats = player.stats();
    tracing::info!(
        steps = args.steps,
        redraws = stats.redraws,
        elided = stats.elided,
        "scrub finished"
    );
    eprintln!("wrote {} frames to {}", args.steps, args.out_dir.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let viewport = Viewport::new(args.width, args.height)?;
    let timeline = Timeline::from_config(&cfg)?;
    let captions = CaptionController::new(&cfg.captions)?;

    let mut source = ScrollProgressSource::new(cfg.track, viewport);
    source.on_scroll(source.scroll_y_for(ScrollRatio::new(args.ratio)));
    let snapshot = source.snapshot();
    let state = FrameState::compute(snapshot, &timeline, &captions);

    let mut hud = Hud::new(&cfg);
    hud.on_snapshot(&snapshot, &timeline);
    // Report the settled readout.
    hud.advance(Duration::from_secs(10));

    let placements: Vec<_> = timeline
        .sections()
        .iter()
        .map(|s| {
            serde_json::json!({
                "section": s.id(),
                "strategy": choose_strategy(
                    s.placement(),
                    viewport,
                    cfg.mobile_breakpoint,
                    cfg.smart_scale_weight,
                ),
            })
        })
        .collect();

    let nav = Navigator::new(&cfg.nav, &timeline).active(snapshot.ratio);
    let out = serde_json::json!({
        "state": state,
        "nav": nav.map(|n| n.label.as_str()),
        "hud": hud.readout(),
        "placements": placements,
        "scroll_y": snapshot.scroll_y,
        "scrollable_px": source.scrollable_px(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize inspect output")?
    );
    Ok(())
}

fn write_png(surface: &Surface, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        &surface.to_straight_rgba8(),
        surface.width(),
        surface.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}
