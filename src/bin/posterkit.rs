use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

use posterkit::{
    CropRegion, DirectorySink, DisplaySize, DownloadOutcome, FrameRGBA, PosterConfig,
    PosterSession, PosterState, decode_image_file, default_square_crop, encode_png, png_data_url,
    rasterize_crop,
};

#[derive(Parser, Debug)]
#[command(name = "posterkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a photo and a name onto the poster and save it as PNG.
    Render(RenderArgs),
    /// Crop a photo to a square and save it as PNG.
    Crop(CropArgs),
    /// Composite like `render` but print the PNG as a data URL instead of saving it.
    DataUrl(ComposeArgs),
}

#[derive(Args, Debug)]
struct ComposeArgs {
    /// Background poster image (overrides the config's `poster`).
    #[arg(long)]
    poster: Option<PathBuf>,

    /// Photo to place in the circle.
    #[arg(long)]
    photo: PathBuf,

    /// Name drawn under the photo.
    #[arg(long, default_value = "")]
    name: String,

    /// Square crop as `X,Y,SIZE` in preview pixels; defaults to the centered 90% square.
    #[arg(long, value_parser = parse_crop)]
    crop: Option<CropRegion>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device pixel ratio used when rasterizing the crop.
    #[arg(long)]
    dpr: Option<f64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    compose: ComposeArgs,

    /// Directory the PNG is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Output file name (overrides the config's `export_file_name`).
    #[arg(long)]
    file_name: Option<String>,

    /// Fail instead of replacing an existing file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct CropArgs {
    /// Photo to crop.
    #[arg(long)]
    photo: PathBuf,

    /// Square crop as `X,Y,SIZE` in photo pixels; defaults to the centered 90% square.
    #[arg(long, value_parser = parse_crop)]
    crop: Option<CropRegion>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Device pixel ratio of the output.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Crop(args) => cmd_crop(args),
        Command::DataUrl(args) => cmd_data_url(args),
    }
}

fn parse_crop(s: &str) -> Result<CropRegion, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid number \"{p}\": {e}"))
        })
        .collect::<Result<_, _>>()?;
    let [x, y, size] = parts[..] else {
        return Err(format!("expected X,Y,SIZE, got \"{s}\""));
    };
    let region = CropRegion::square(x, y, size);
    if region.is_degenerate() {
        return Err(format!("crop \"{s}\" has no area"));
    }
    Ok(region)
}

fn load_config(args: &ComposeArgs) -> anyhow::Result<PosterConfig> {
    let mut cfg = match &args.config {
        Some(path) => PosterConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => PosterConfig::default(),
    };
    if let Some(poster) = &args.poster {
        cfg.poster = Some(poster.clone());
    }
    if let Some(dpr) = args.dpr {
        cfg.device_pixel_ratio = dpr;
    }
    Ok(cfg)
}

/// Session with poster and photo loaded, the crop applied and the name set.
fn prepare_session(args: &ComposeArgs, cfg: &PosterConfig) -> anyhow::Result<PosterSession> {
    let poster = cfg
        .poster
        .as_deref()
        .context("no poster given (use --poster or set `poster` in the config)")?;

    let mut session = PosterSession::new(cfg)?;
    session.load_poster_file(poster);
    if let PosterState::Failed(reason) = session.poster().state() {
        anyhow::bail!("load poster '{}': {reason}", poster.display());
    }

    if !session.select_file_path(&args.photo) {
        anyhow::bail!("could not decode photo '{}'", args.photo.display());
    }
    if let Some(region) = args.crop {
        session.complete_crop_region(region);
    }
    session.apply_crop().context("crop photo")?;
    session.set_name(args.name.as_str());
    Ok(session)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.compose)?;
    if let Some(name) = &args.file_name {
        cfg.export_file_name = name.clone();
    }
    let mut session = prepare_session(&args.compose, &cfg)?;

    let mut sink = DirectorySink::new(&args.out_dir).with_overwrite(!args.no_overwrite);
    match session.download(&mut sink)? {
        DownloadOutcome::Saved {
            path,
            width,
            height,
            ..
        } => {
            let png = std::fs::read(&path)
                .with_context(|| format!("read back '{}'", path.display()))?;
            println!("wrote {} ({width}x{height})", path.display());
            println!("sha256 {}", sha256_hex(&png));
            Ok(())
        }
        DownloadOutcome::NotReady(reason) => anyhow::bail!("nothing to save: {reason}"),
    }
}

fn cmd_crop(args: CropArgs) -> anyhow::Result<()> {
    let photo = decode_image_file(&args.photo)?;
    let display: DisplaySize = photo.natural_size().as_display();
    let region = args.crop.unwrap_or_else(|| default_square_crop(display).pixels);

    let cropped = rasterize_crop(&photo, display, &region, args.dpr)?;
    let png = encode_png(&FrameRGBA {
        width: cropped.width,
        height: cropped.height,
        data: cropped.rgba8_premul.as_ref().clone(),
        premultiplied: true,
    })?;

    write_png(&args.out, &png)?;
    println!("wrote {} ({}x{})", args.out.display(), cropped.width, cropped.height);
    println!("sha256 {}", sha256_hex(&png));
    Ok(())
}

fn cmd_data_url(args: ComposeArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let mut session = prepare_session(&args, &cfg)?;
    let png = session.render_png()?;
    println!("{}", png_data_url(&png));
    Ok(())
}

fn write_png(path: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
