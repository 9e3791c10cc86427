use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use stillmotion::encode::ffmpeg::ensure_parent_dir;
use stillmotion::{
    CaptionFont, Ease, FfmpegRecorderFactory, ImageFetcher, ImageLoader, MotionJob, Pacing,
    PromptService, StudioConfig, parse_codecs, parse_fps, render_still, synthesize_encoded,
    video_filename,
};

#[derive(Parser, Debug)]
#[command(name = "stillmotion", version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Enhance prompts and print the generation result as JSON.
    Generate(GenerateArgs),
    /// Animate an image (path or URL) into a Ken Burns clip (requires `ffmpeg` on PATH).
    Animate(AnimateArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Listen host.
    #[arg(long)]
    host: Option<String>,

    /// Listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Seconds before an image fetch is abandoned.
    #[arg(long)]
    fetch_timeout_secs: Option<u64>,

    #[command(flatten)]
    motion: MotionArgs,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Prompt describing the still image.
    #[arg(long)]
    image_prompt: Option<String>,

    /// Prompt describing the motion.
    #[arg(long)]
    video_prompt: Option<String>,

    /// Seed for descriptor sampling and the image seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    /// Source image: a file path, `file://` URL or `http(s)://` URL.
    #[arg(long)]
    image: String,

    /// Caption drawn over the clip.
    #[arg(long, default_value = "")]
    caption: String,

    /// Output video path (defaults to `ken-burns.<ext>` for the chosen codec).
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    motion: MotionArgs,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Source image: a file path, `file://` URL or `http(s)://` URL.
    #[arg(long)]
    image: String,

    /// Caption drawn over the frame.
    #[arg(long, default_value = "")]
    caption: String,

    /// Normalized time in `[0, 1]`.
    #[arg(long, default_value_t = 1.0)]
    t: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    motion: MotionArgs,
}

#[derive(Args, Debug, Default)]
struct MotionArgs {
    /// Frame rate, `30` or `30000/1001`.
    #[arg(long)]
    fps: Option<String>,

    /// Clip length in milliseconds.
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Longest canvas edge in pixels.
    #[arg(long)]
    max_edge: Option<u32>,

    /// Comma-separated codec preference, e.g. `vp9,vp8,h264`.
    #[arg(long)]
    codecs: Option<String>,

    /// `offline` (deterministic) or `realtime`.
    #[arg(long)]
    pacing: Option<Pacing>,

    /// Zoom/pan easing: `out_cubic`, `out_quad`, `in_out_cubic` or `linear`.
    #[arg(long)]
    ease: Option<Ease>,

    /// Caption font file.
    #[arg(long)]
    font: Option<PathBuf>,

    /// `ffmpeg` executable.
    #[arg(long)]
    ffmpeg: Option<PathBuf>,
}

impl MotionArgs {
    fn apply(self, cfg: &mut StudioConfig) -> anyhow::Result<()> {
        if let Some(fps) = self.fps {
            cfg.motion.fps = parse_fps(&fps).with_context(|| format!("invalid --fps '{fps}'"))?;
        }
        if let Some(ms) = self.duration_ms {
            cfg.motion.duration_ms = ms;
        }
        if let Some(edge) = self.max_edge {
            cfg.motion.max_edge = edge;
        }
        if let Some(codecs) = self.codecs {
            let parsed = parse_codecs(&codecs);
            anyhow::ensure!(!parsed.is_empty(), "no known codec in --codecs '{codecs}'");
            cfg.motion.codecs = parsed;
        }
        if let Some(pacing) = self.pacing {
            cfg.motion.pacing = pacing;
        }
        if let Some(ease) = self.ease {
            cfg.motion.ken_burns.ease = ease;
        }
        if self.font.is_some() {
            cfg.font_path = self.font;
        }
        if let Some(ffmpeg) = self.ffmpeg {
            cfg.ffmpeg = ffmpeg;
        }
        cfg.validate()?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stillmotion::init_tracing();
    let cli = Cli::parse();
    let mut cfg = StudioConfig::from_env();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args, &mut cfg).await,
        Command::Generate(args) => cmd_generate(args, &cfg),
        Command::Animate(args) => cmd_animate(args, &mut cfg).await,
        Command::Frame(args) => cmd_frame(args, &mut cfg).await,
    }
}

async fn cmd_serve(args: ServeArgs, cfg: &mut StudioConfig) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        cfg.host = host;
    }
    if let Some(port) = args.port {
        cfg.port = port;
    }
    if let Some(secs) = args.fetch_timeout_secs {
        cfg.fetch_timeout = (secs > 0).then(|| std::time::Duration::from_secs(secs));
    }
    args.motion.apply(cfg)?;
    stillmotion::server::serve(cfg).await?;
    Ok(())
}

fn cmd_generate(args: GenerateArgs, cfg: &StudioConfig) -> anyhow::Result<()> {
    cfg.image_endpoint.validate()?;
    let mut rng = match args.seed.or(cfg.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let service = PromptService::new(cfg.image_endpoint.clone());
    let result = service.generate(
        args.image_prompt.as_deref(),
        args.video_prompt.as_deref(),
        &mut rng,
        chrono::Utc::now(),
    )?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn load_image(source: &str, cfg: &StudioConfig) -> anyhow::Result<Vec<u8>> {
    let loader = ImageLoader::new(cfg.fetch_timeout)?;
    Ok(loader.fetch(source).await?)
}

async fn cmd_animate(args: AnimateArgs, cfg: &mut StudioConfig) -> anyhow::Result<()> {
    args.motion.apply(cfg)?;
    let encoded = load_image(&args.image, cfg).await?;
    let font = CaptionFont::resolve(cfg.font_path.as_deref())?;
    let factory = Arc::new(FfmpegRecorderFactory::new(cfg.ffmpeg.clone()));

    let settings = cfg.motion.clone();
    let caption = args.caption;
    let video = tokio::task::spawn_blocking(move || {
        synthesize_encoded(&encoded, &caption, &settings, font.as_ref(), factory.as_ref())
    })
    .await
    .context("synthesis task failed")??;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(video_filename(video.codec)));
    ensure_parent_dir(&out)?;
    std::fs::write(&out, &video.bytes)
        .with_context(|| format!("write video '{}'", out.display()))?;

    eprintln!("wrote {} ({}, {} bytes)", out.display(), video.codec, video.bytes.len());
    Ok(())
}

async fn cmd_frame(args: FrameArgs, cfg: &mut StudioConfig) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.t),
        "--t must be within [0, 1] (got {})",
        args.t
    );
    args.motion.apply(cfg)?;
    let encoded = load_image(&args.image, cfg).await?;
    let font = CaptionFont::resolve(cfg.font_path.as_deref())?;

    let job = MotionJob::from_encoded(&encoded, &args.caption, cfg.motion.clone())?;
    let frame = render_still(&job, font.as_ref(), args.t)?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
