use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use collage_core::{
    InputImage, Layout, LayoutConfig, MixedFallback, Orientation, Strategy, classify,
    compose_onto, fit_image, pack_layout, sizes_of, to_json,
};
use globset::{Glob, GlobSet, GlobSetBuilder};
use image::{DynamicImage, ImageReader, Rgba, RgbaImage};
use serde::Deserialize;
use tracing::{error, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "collage",
    about = "Arrange a set of images on a fixed-size canvas",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lay out the images and render the collage
    Compose(ComposeArgs),
    /// Layout-only export (no raster): compute placements and print/write JSON
    Layout(LayoutArgs),
    /// Print the shape classification of the input set as JSON
    Classify(CollageArgs),
}

/// Input discovery and layout options shared by every subcommand.
#[derive(Parser, Debug, Clone)]
struct CollageArgs {
    // Input
    /// Input file or directory
    #[arg(help_heading = "Input")]
    input: PathBuf,
    /// YAML config file path (fields present in the file override the flags)
    #[arg(long, help_heading = "Input")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input")]
    exclude: Vec<String>,

    // Canvas
    /// Canvas width
    #[arg(long, default_value_t = 800, help_heading = "Canvas")]
    width: u32,
    /// Canvas height
    #[arg(long, default_value_t = 800, help_heading = "Canvas")]
    height: u32,

    // Layout
    /// Strategy: auto | grid | lanes | golden-split | aspect-grid
    #[arg(long, default_value = "auto", help_heading = "Layout")]
    strategy: String,
    /// Gap between images and around the canvas edge (px)
    #[arg(long, default_value_t = 10, help_heading = "Layout")]
    padding: u32,
    /// Lane orientation: horizontal | vertical
    #[arg(long, default_value = "horizontal", help_heading = "Layout")]
    orientation: String,
    /// Center the cell/lane block on the canvas
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    centered: bool,
    /// Shuffle the image order (GoldenSplit also flips sweep directions)
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    randomize: bool,
    /// Seed for --randomize
    #[arg(long, help_heading = "Layout")]
    seed: Option<u64>,
    /// Mixed image sets under auto: golden-split | aspect-grid
    #[arg(long, default_value = "golden-split", help_heading = "Layout")]
    mixed_fallback: String,

    // Aspect grid
    /// Multiplier applied to every image's native size
    #[arg(long, default_value_t = 1.0, help_heading = "Aspect grid")]
    scaling_factor: f64,
    /// Max lane-thickness mismatch in pixels before an image is skipped
    #[arg(long, default_value_t = 50, help_heading = "Aspect grid")]
    tolerance: u32,

    // Config
    /// Draw red outlines around every image when rendering (debug)
    #[arg(long, default_value_t = false, help_heading = "Config")]
    outlines: bool,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Config")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Config")]
    print_config_format: String,
}

#[derive(Parser, Debug, Clone)]
struct ComposeArgs {
    #[command(flatten)]
    common: CollageArgs,
    /// Output image (.png or .jpg)
    #[arg(short, long, default_value = "collage.png", help_heading = "Output")]
    out: PathBuf,
    /// Background colour: #rrggbb, #rrggbbaa, white, black or transparent
    #[arg(long, default_value = "white", help_heading = "Output")]
    background: String,
    /// Background image, fitted to the canvas (overrides --background)
    #[arg(long, help_heading = "Output")]
    background_image: Option<PathBuf>,
    /// Also write the layout (placements, skipped images, stats) as JSON to this file
    #[arg(long, help_heading = "Output")]
    export_layout: Option<PathBuf>,
    /// Dry run: compute layout and stats but do not render or write files
    #[arg(long, default_value_t = false, help_heading = "Output")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct LayoutArgs {
    #[command(flatten)]
    common: CollageArgs,
    /// Write the layout JSON to this file instead of stdout
    #[arg(long, help_heading = "Output")]
    export_layout: Option<PathBuf>,
    /// Dry run: print the layout to stdout even when --export-layout is set
    #[arg(long, default_value_t = false, help_heading = "Output")]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let progress = cli.progress && !cli.quiet;
    match &cli.command {
        Commands::Compose(args) => run_compose(args, progress),
        Commands::Layout(args) => run_layout(args, progress),
        Commands::Classify(args) => run_classify(args, progress),
    }
}

fn build_config(cli: &CollageArgs) -> anyhow::Result<LayoutConfig> {
    let cfg = LayoutConfig::builder()
        .with_canvas(cli.width, cli.height)
        .padding(cli.padding)
        .strategy(cli.strategy.parse()?)
        .orientation(cli.orientation.parse()?)
        .centered(cli.centered)
        .randomize(cli.randomize)
        .seed(cli.seed)
        .scaling_factor(cli.scaling_factor)
        .tolerance(cli.tolerance)
        .mixed_fallback(cli.mixed_fallback.parse()?)
        .outlines(cli.outlines)
        .build();
    let cfg = match &cli.config {
        Some(path) => {
            let file = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            let y: YamlConfig = serde_yaml::from_str(&file)
                .with_context(|| format!("parse config {}", path.display()))?;
            y.into_layout_config(cfg)?
        }
        None => cfg,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Returns true when the config was printed and the command should stop.
fn maybe_print_config(cli: &CollageArgs, cfg: &LayoutConfig) -> anyhow::Result<bool> {
    if !cli.print_config {
        return Ok(false);
    }
    match cli.print_config_format.as_str() {
        "yaml" => println!("{}", serde_yaml::to_string(cfg)?),
        _ => println!("{}", serde_json::to_string_pretty(cfg)?),
    }
    Ok(true)
}

fn load_inputs(cli: &CollageArgs, show_progress: bool) -> anyhow::Result<Vec<InputImage>> {
    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    let inputs = load_images_with_progress(&paths, show_progress)?;
    if inputs.is_empty() {
        anyhow::bail!("no decodable images found under {}", cli.input.display());
    }
    info!(count = inputs.len(), "loaded input images");
    Ok(inputs)
}

fn run_compose(args: &ComposeArgs, show_progress: bool) -> anyhow::Result<()> {
    let cfg = build_config(&args.common)?;
    if maybe_print_config(&args.common, &cfg)? {
        return Ok(());
    }
    let background = parse_color(&args.background)?;
    let inputs = load_inputs(&args.common, show_progress)?;

    if args.dry_run {
        let layout = pack_layout(&sizes_of(&inputs), &cfg)?;
        info!(stats = %layout.stats().summary(), "dry run, nothing written");
        return Ok(());
    }

    let mut canvas = match &args.background_image {
        Some(path) => {
            let bg = load_image(path)
                .with_context(|| format!("load background {}", path.display()))?;
            fit_image(&bg, cfg.canvas_width, cfg.canvas_height)
        }
        None => RgbaImage::from_pixel(cfg.canvas_width, cfg.canvas_height, background),
    };

    let layout = compose_onto(&mut canvas, &inputs, &cfg)?;
    save_canvas(canvas, &args.out)?;
    info!(path = ?args.out, stats = %layout.stats().summary(), "collage written");

    if let Some(path) = &args.export_layout {
        write_layout_json(&layout, &inputs, path)?;
    }
    Ok(())
}

fn run_layout(args: &LayoutArgs, show_progress: bool) -> anyhow::Result<()> {
    let cfg = build_config(&args.common)?;
    if maybe_print_config(&args.common, &cfg)? {
        return Ok(());
    }
    let inputs = load_inputs(&args.common, show_progress)?;
    let layout = pack_layout(&sizes_of(&inputs), &cfg)?;
    info!(stats = %layout.stats().summary(), "layout computed");

    match (&args.export_layout, args.dry_run) {
        (Some(path), false) => write_layout_json(&layout, &inputs, path)?,
        _ => {
            let keys: Vec<&str> = inputs.iter().map(|i| i.key.as_str()).collect();
            println!("{}", serde_json::to_string_pretty(&to_json(&layout, &keys))?);
        }
    }
    Ok(())
}

fn run_classify(cli: &CollageArgs, show_progress: bool) -> anyhow::Result<()> {
    let cfg = build_config(cli)?;
    if maybe_print_config(cli, &cfg)? {
        return Ok(());
    }
    let inputs = load_inputs(cli, show_progress)?;
    let class = classify(&sizes_of(&inputs), cfg.canvas_size())?;
    let value = serde_json::json!({
        "classification": class,
        "kind": class.kind(),
        "elongation": class.elongation(),
        "fill_scaling_factor": class.fill_scaling_factor(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn write_layout_json(layout: &Layout, inputs: &[InputImage], path: &Path) -> anyhow::Result<()> {
    let keys: Vec<&str> = inputs.iter().map(|i| i.key.as_str()).collect();
    let json = serde_json::to_string_pretty(&to_json(layout, &keys))?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(?path, "layout written");
    Ok(())
}

fn save_canvas(canvas: RgbaImage, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    let is_jpeg = matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref(),
        Some("jpg" | "jpeg")
    );
    // JPEG has no alpha channel
    if is_jpeg {
        DynamicImage::ImageRgba8(canvas)
            .to_rgb8()
            .save(path)
            .with_context(|| format!("write {}", path.display()))?;
    } else {
        canvas
            .save(path)
            .with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

fn parse_color(s: &str) -> anyhow::Result<Rgba<u8>> {
    match s.trim().to_ascii_lowercase().as_str() {
        "white" => return Ok(Rgba([255, 255, 255, 255])),
        "black" => return Ok(Rgba([0, 0, 0, 255])),
        "transparent" => return Ok(Rgba([0, 0, 0, 0])),
        _ => {}
    }
    let hex = s.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("invalid colour '{s}', expected #rrggbb, #rrggbbaa, white, black or transparent");
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globset(include)?;
    let exc_set = build_globset(exclude)?;
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("bad glob '{pat}'"))?);
    }
    Ok(Some(b.build()?))
}

fn should_skip(p: &Path, include: Option<&GlobSet>, exclude: Option<&GlobSet>) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if exclude.is_some_and(|ex| ex.is_match(&s)) {
        return true;
    }
    include.is_some_and(|inc| !inc.is_match(&s))
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "gif" | "webp" | "tif" | "tiff")
    )
}

fn load_images_with_progress(paths: &[PathBuf], progress: bool) -> anyhow::Result<Vec<InputImage>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match load_image(p) {
            Ok(img) => {
                let key = p.to_string_lossy().replace('\\', "/");
                list.push(InputImage { key, image: img });
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

fn load_image(p: &Path) -> anyhow::Result<DynamicImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    Ok(img)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

/// Layout options read from `--config`; every field is optional and overrides the flag value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlConfig {
    canvas_width: Option<u32>,
    canvas_height: Option<u32>,
    padding: Option<u32>,
    strategy: Option<String>,
    randomize: Option<bool>,
    seed: Option<u64>,
    centered: Option<bool>,
    orientation: Option<String>,
    scaling_factor: Option<f64>,
    tolerance: Option<u32>,
    mixed_fallback: Option<String>,
    outlines: Option<bool>,
}

impl YamlConfig {
    fn into_layout_config(self, mut cfg: LayoutConfig) -> anyhow::Result<LayoutConfig> {
        if let Some(v) = self.canvas_width {
            cfg.canvas_width = v;
        }
        if let Some(v) = self.canvas_height {
            cfg.canvas_height = v;
        }
        if let Some(v) = self.padding {
            cfg.padding = v;
        }
        if let Some(v) = self.strategy {
            cfg.strategy = v.parse::<Strategy>()?;
        }
        if let Some(v) = self.randomize {
            cfg.randomize = v;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(v) = self.centered {
            cfg.centered = v;
        }
        if let Some(v) = self.orientation {
            cfg.orientation = v.parse::<Orientation>()?;
        }
        if let Some(v) = self.scaling_factor {
            cfg.scaling_factor = v;
        }
        if let Some(v) = self.tolerance {
            cfg.tolerance = v;
        }
        if let Some(v) = self.mixed_fallback {
            cfg.mixed_fallback = v.parse::<MixedFallback>()?;
        }
        if let Some(v) = self.outlines {
            cfg.outlines = v;
        }
        Ok(cfg)
    }
}
