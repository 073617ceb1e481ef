use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "frameshot", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the device category guessed from pixel dimensions.
    Classify(ClassifyArgs),
    /// Print the frame that would be used for a screenshot.
    Select(SelectArgs),
    /// Compose screenshots into marketing images.
    Compose(ComposeArgs),
    /// Render a screenshot inside its bezel only, on a transparent canvas.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    /// Screenshot width in pixels.
    #[arg(long)]
    width: u32,

    /// Screenshot height in pixels.
    #[arg(long)]
    height: u32,
}

#[derive(Parser, Debug)]
struct FrameChoice {
    /// Frame catalog JSON.
    #[arg(long)]
    catalog: PathBuf,

    /// Directory holding bezel and mask images (defaults to the catalog's directory).
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Device category (iphone, ipad, mac, watch); guessed from the screenshot when omitted.
    #[arg(long, value_parser = parse_category)]
    category: Option<frameshot::DeviceCategory>,

    /// Preferred frame name or display name.
    #[arg(long)]
    frame: Option<String>,
}

#[derive(Parser, Debug)]
struct SelectArgs {
    #[command(flatten)]
    choice: FrameChoice,

    /// Screenshot image.
    #[arg(long)]
    screenshot: PathBuf,
}

#[derive(Parser, Debug)]
struct FontArgs {
    /// Extra font directory (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Extra font file (repeatable); a caption `font` may name it by path.
    #[arg(long = "font-file")]
    font_files: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Project configuration JSON (captions, backgrounds, devices).
    #[arg(long)]
    project: PathBuf,

    /// Device key in the project configuration.
    #[arg(long)]
    device: String,

    /// Caption language.
    #[arg(long, default_value = frameshot::FALLBACK_LANGUAGE)]
    lang: String,

    /// Frame catalog JSON; screenshots are composed without frames when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Device category override.
    #[arg(long, value_parser = parse_category)]
    category: Option<frameshot::DeviceCategory>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Encode JPEG at this quality instead of PNG.
    #[arg(long)]
    jpeg_quality: Option<u8>,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    fonts: FontArgs,

    /// Screenshot images.
    #[arg(required = true)]
    screenshots: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    choice: FrameChoice,

    /// Screenshot image.
    #[arg(long)]
    screenshot: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Classify(args) => cmd_classify(args),
        Command::Select(args) => cmd_select(args),
        Command::Compose(args) => cmd_compose(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_category(s: &str) -> Result<frameshot::DeviceCategory, String> {
    let wanted = s.trim().to_ascii_lowercase();
    frameshot::DeviceCategory::ALL
        .into_iter()
        .find(|c| c.to_string() == wanted)
        .ok_or_else(|| format!("unknown device category '{s}' (expected iphone, ipad, mac or watch)"))
}

fn cmd_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    match frameshot::classify_device_category(args.width, args.height) {
        Some(category) => println!("{category}"),
        None => println!("unclassified"),
    }
    Ok(())
}

fn catalog_dir(catalog: &Path) -> PathBuf {
    catalog
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn choose_frame(
    choice: &FrameChoice,
    screenshot: &Path,
    dry_run: bool,
) -> anyhow::Result<frameshot::FrameSelection> {
    let registry = frameshot::FrameRegistry::from_path(&choice.catalog)?;
    let frames_dir = choice
        .frames_dir
        .clone()
        .unwrap_or_else(|| catalog_dir(&choice.catalog));
    Ok(frameshot::select_frame(
        &registry,
        screenshot,
        &frames_dir,
        choice.category,
        choice.frame.as_deref(),
        dry_run,
    )?)
}

fn cmd_select(args: SelectArgs) -> anyhow::Result<()> {
    let selection = choose_frame(&args.choice, &args.screenshot, true)?;
    match selection.metadata {
        Some(frame) => println!("{}", serde_json::to_string_pretty(&frame)?),
        None => println!("null"),
    }
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let project = frameshot::ProjectConfig::from_path(&args.project)?;
    project.validate()?;
    let device = project.device(&args.device);
    let category = args.category.or(device.category);
    let registry = args
        .catalog
        .as_deref()
        .map(frameshot::FrameRegistry::from_path)
        .transpose()?;
    let frames_dir = project
        .frames_dir
        .clone()
        .or_else(|| args.catalog.as_deref().map(catalog_dir))
        .unwrap_or_else(|| PathBuf::from("."));
    let captions = project.captions.get(&args.device);
    let format = match args.jpeg_quality {
        Some(quality) => frameshot::OutputFormat::Jpeg { quality },
        None => frameshot::OutputFormat::Png,
    };

    let prepare = |path: &PathBuf| -> anyhow::Result<frameshot::BatchJob> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read screenshot '{}'", path.display()))?;
        let output = match device.resolution {
            Some(resolution) => resolution,
            None => frameshot::image_dimensions(path)?,
        };
        let frame = match &registry {
            Some(registry) => frameshot::select_frame(
                registry,
                path,
                &frames_dir,
                category,
                device.frame.as_deref(),
                false,
            )?,
            None => frameshot::FrameSelection::default(),
        };
        let mut request = frameshot::ComposeRequest::new(bytes, output)
            .with_screenshot_path(path.clone())
            .with_frame(frame)
            .with_background(project.background.clone())
            .with_device(device.clone())
            .with_format(format);
        if let Some(text) = captions.and_then(|map| frameshot::caption_for(map, path, &args.lang)) {
            request = request.with_caption(text, project.caption.clone());
        }
        Ok(frameshot::BatchJob {
            name: output_name(path, format),
            request,
        })
    };

    let mut jobs = Vec::with_capacity(args.screenshots.len());
    let mut skipped = 0usize;
    for path in &args.screenshots {
        match prepare(path) {
            Ok(job) => jobs.push(job),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "screenshot skipped");
                eprintln!("failed {}: {err:#}", output_name(path, format));
                skipped += 1;
            }
        }
    }

    let fonts = frameshot::FontSet::load(&args.fonts.font_dirs, &args.fonts.font_files);
    let compositor = frameshot::Compositor::new(fonts);
    let report = frameshot::compose_all(&compositor, jobs, args.threads)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;
    for item in &report.results {
        match &item.result {
            Ok(image) => {
                let out = args.out.join(&item.name);
                std::fs::write(&out, &image.bytes)
                    .with_context(|| format!("write '{}'", out.display()))?;
                eprintln!("wrote {}", out.display());
            }
            Err(err) => eprintln!("failed {}: {err}", item.name),
        }
    }

    let failed = report.failed + skipped;
    if failed > 0 {
        anyhow::bail!("{failed} of {} screenshots failed", args.screenshots.len());
    }
    Ok(())
}

fn output_name(path: &Path, format: frameshot::OutputFormat) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("screenshot");
    format!("{stem}.{}", format.extension())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let selection = choose_frame(&args.choice, &args.screenshot, false)?;
    let bytes = std::fs::read(&args.screenshot)
        .with_context(|| format!("read screenshot '{}'", args.screenshot.display()))?;
    let compositor = frameshot::Compositor::default();
    let image =
        compositor.compose_frame_only(&bytes, &selection, frameshot::OutputFormat::Png)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &image.bytes)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
