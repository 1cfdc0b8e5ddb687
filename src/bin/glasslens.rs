use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glasslens", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one frame of the lens over a background and write a PNG.
    Frame(FrameArgs),
    /// Print the default lens parameters as JSON.
    Params(ParamsArgs),
    /// List the adjustable lens controls with their ranges.
    Controls,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Lens parameter JSON. Missing fields take their defaults.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Background image. Without one a checkerboard is generated.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Checkerboard width in pixels (ignored with --background).
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Checkerboard height in pixels (ignored with --background).
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Checkerboard cell size in pixels.
    #[arg(long, default_value_t = 32.0)]
    cell_px: f64,

    /// Lens center in pixels as `X,Y`; overrides the normalized center.
    #[arg(long)]
    center_px: Option<String>,

    /// Control override as `name=value`, clamped to the control range. Repeatable.
    #[arg(long = "set")]
    sets: Vec<String>,

    /// How the background answers reads outside its bounds.
    #[arg(long, value_enum, default_value_t = EdgeChoice::Clamp)]
    edge: EdgeChoice,

    /// Background reconstruction filter.
    #[arg(long, value_enum, default_value_t = FilterChoice::Bilinear)]
    filter: FilterChoice,

    /// Shade rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct ParamsArgs {
    /// Surface width to embed in the printed parameters.
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Surface height to embed in the printed parameters.
    #[arg(long, default_value_t = 400)]
    height: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EdgeChoice {
    Clamp,
    Transparent,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterChoice {
    Nearest,
    Bilinear,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Params(args) => cmd_params(args),
        Command::Controls => cmd_controls(),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut params = match &args.params {
        Some(path) => glasslens::LensParams::from_path(path)
            .with_context(|| format!("load lens params '{}'", path.display()))?,
        None => glasslens::LensParams::default(),
    };

    let edge = match args.edge {
        EdgeChoice::Clamp => glasslens::EdgeMode::Clamp,
        EdgeChoice::Transparent => glasslens::EdgeMode::Transparent,
    };
    let filter = match args.filter {
        FilterChoice::Nearest => glasslens::SampleFilter::Nearest,
        FilterChoice::Bilinear => glasslens::SampleFilter::Bilinear,
    };

    let (content, resolution): (Box<dyn glasslens::ContentSampler + Sync>, _) =
        match &args.background {
            Some(path) => {
                let field = glasslens::ImageField::open(path)?
                    .with_edge_mode(edge)
                    .with_filter(filter);
                let res = glasslens::Resolution::new(field.width(), field.height())?;
                (Box::new(field), res)
            }
            None => {
                let board = glasslens::Checkerboard {
                    cell_px: args.cell_px,
                    ..glasslens::Checkerboard::default()
                };
                let res = glasslens::Resolution::new(args.width, args.height)?;
                (Box::new(board), res)
            }
        };
    params.resolution = resolution;

    if let Some(raw) = &args.center_px {
        let pos = parse_point(raw)?;
        params.center = glasslens::center_from_pixels(pos, resolution);
    }
    for assignment in &args.sets {
        let (name, value) = glasslens::parse_assignment(assignment)?;
        params.set_control(&name, value)?;
    }
    params.validate()?;
    tracing::debug!(?params, "rendering lens frame");

    let threading = glasslens::RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let frame = glasslens::render_frame(&params, content.as_ref(), &threading)?;
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_params(args: ParamsArgs) -> anyhow::Result<()> {
    let params = glasslens::LensParams::default()
        .with_resolution(glasslens::Resolution::new(args.width, args.height)?);
    println!("{}", params.to_json_pretty()?);
    Ok(())
}

fn cmd_controls() -> anyhow::Result<()> {
    for c in glasslens::CONTROLS.iter() {
        println!(
            "{:<30} {:<10} [{}, {}] default {}  {}",
            c.name, c.label, c.min, c.max, c.default, c.description
        );
    }
    Ok(())
}

fn parse_point(raw: &str) -> anyhow::Result<glasslens::Point> {
    let (x, y) = raw
        .split_once(',')
        .with_context(|| format!("expected X,Y, got '{raw}'"))?;
    let x: f64 = x.trim().parse().with_context(|| format!("parse x in '{raw}'"))?;
    let y: f64 = y.trim().parse().with_context(|| format!("parse y in '{raw}'"))?;
    Ok(glasslens::Point::new(x, y))
}
