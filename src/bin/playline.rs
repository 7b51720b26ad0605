use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "playline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append a clip to a timeline document.
    Place(PlaceArgs),
    /// Resolve one instant and print the frame manifest as JSON.
    Inspect(InspectArgs),
    /// Walk the whole timeline on a frame grid and write the sampled manifests.
    Export(ExportArgs),
    /// Drive the logical clock for a bounded number of ticks.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct PlaceArgs {
    /// Input timeline JSON; omitted starts from an empty timeline.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output timeline JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Clip kind.
    #[arg(long, value_enum)]
    kind: KindChoice,

    /// Locator of the underlying media resource.
    #[arg(long)]
    source: String,

    /// Explicit track id; inferred from the kind when omitted.
    #[arg(long)]
    track: Option<u32>,

    /// Clip duration in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Display name for the clip.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Instant to resolve, in timeline seconds.
    #[arg(long)]
    at: f64,

    /// Report every active overlay instead of the exclusive winner.
    #[arg(long)]
    sampled: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output manifest-array JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Sampling rate in frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input timeline JSON; omitted means an empty timeline.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Maximum number of ticks to fire.
    #[arg(long, default_value_t = 4000)]
    ticks: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Video,
    Image,
    Audio,
}

impl From<KindChoice> for playline::ClipKind {
    fn from(choice: KindChoice) -> Self {
        match choice {
            KindChoice::Video => playline::ClipKind::Video,
            KindChoice::Image => playline::ClipKind::Image,
            KindChoice::Audio => playline::ClipKind::Audio,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Place(args) => cmd_place(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Export(args) => cmd_export(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_store(path: &Path) -> anyhow::Result<playline::ClipStore> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open timeline '{}'", path.display()))?;
    let store = playline::ClipStore::from_json(&s)?;
    Ok(store)
}

fn read_store_or_empty(path: Option<&Path>) -> anyhow::Result<playline::ClipStore> {
    match path {
        Some(p) => read_store(p),
        None => Ok(playline::ClipStore::new()),
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), value).with_context(|| "write JSON")?;
    Ok(())
}

fn cmd_place(args: PlaceArgs) -> anyhow::Result<()> {
    let mut store = read_store_or_empty(args.in_path.as_deref())?;

    let mut spec = playline::PlaceSpec::new(args.kind.into(), args.source);
    if let Some(track) = args.track {
        spec = spec.track(playline::TrackId(track));
    }
    if let Some(duration) = args.duration {
        spec = spec.duration_secs(duration);
    }
    if let Some(name) = args.name {
        spec = spec.display_name(name);
    }
    let clip = playline::place(&mut store, spec)?;

    write_json(&args.out, &store)?;
    eprintln!(
        "placed '{}' on track {} at {}s for {}s",
        clip.display_name, clip.track, clip.span.start_secs, clip.span.duration_secs
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let store = read_store(&args.in_path)?;

    let manifest = if args.sampled {
        playline::Compositor::compose_sampled(&store, args.at)
    } else {
        playline::Compositor::compose_live(&store, args.at)
    };
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let store = read_store(&args.in_path)?;
    let fps = playline::Fps::new(args.fps, 1)?;

    let mut sink = playline::InMemorySink::new();
    let stats = playline::export_manifests(&store, fps, &mut sink)?;
    write_json(&args.out, &sink.into_frames())?;

    eprintln!(
        "exported {} samples ({} with main, {} with overlay, {} with audio)",
        stats.samples_total, stats.with_main, stats.with_overlay, stats.with_audio
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let store = read_store_or_empty(args.in_path.as_deref())?;
    let mut session = playline::EditorSession::with_store(store);

    session.play();
    let mut fired = 0u64;
    while fired < args.ticks {
        if session.pump().is_none() {
            break;
        }
        fired += 1;
    }

    let clock = session.clock();
    println!("ticks fired: {fired}");
    println!(
        "transport:   {}",
        if clock.is_playing() { "playing" } else { "paused" }
    );
    println!(
        "position:    {}",
        playline::format_timecode(clock.current_secs())
    );
    Ok(())
}
