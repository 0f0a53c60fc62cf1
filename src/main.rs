use clap::Parser;
use mirror_marcher::marcher::{DEFAULT_HIT_EPSILON, DEFAULT_MAX_BOUNCES, DEFAULT_MAX_STEPS};
use mirror_marcher::{render, Error, RenderContext, SceneConfig};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,

    /// JSON scene description; the built-in scene is used when absent.
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image, format taken from the extension.
    #[arg(short, long, default_value = "out.png")]
    out: PathBuf,

    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    steps: u32,

    #[arg(short, long, default_value_t = DEFAULT_MAX_BOUNCES)]
    bounces: u32,

    #[arg(short, long, default_value_t = DEFAULT_HIT_EPSILON)]
    epsilon: f64,

    /// Worker threads, 0 for one per core.
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .init();
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    setup_logging(args.verbose);

    if args.threads > 0 {
        // only fails if a global pool already exists
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
        {
            tracing::warn!("keeping default thread pool: {}", e);
        }
    }

    let config = match &args.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    let scene = config.build()?;
    info!(objects = scene.objects().len(), "scene ready");

    let ctx = RenderContext {
        max_steps: args.steps,
        max_bounces: args.bounces,
        hit_epsilon: args.epsilon,
    };
    let img = render::render(&ctx, &scene, args.width, args.height)?;
    img.save(&args.out)?;
    info!(out = %args.out.display(), "image written");
    Ok(())
}
