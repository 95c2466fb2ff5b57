use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::Engine as _;
use clap::Parser;
use image_labeler::config::{configure, LabelOptions, PositionValue};
use image_labeler::label::{Labeler, OutputSink};

/// Image Labeler - overlay a text label onto PNG, GIF and JPEG images
#[derive(Parser, Debug)]
#[command(name = "image-labeler")]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML file with label options; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source image (`-` reads from stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Label text
    #[arg(short, long)]
    text: Option<String>,

    /// Position name (bottom-right, top-left, center, ...) or index 0-6
    #[arg(short, long)]
    position: Option<String>,

    /// Explicit X coordinate (used together with --y)
    #[arg(long, allow_hyphen_values = true)]
    x: Option<i32>,

    /// Explicit Y coordinate (used together with --x)
    #[arg(long, allow_hyphen_values = true)]
    y: Option<i32>,

    /// Bitmap font size, 1-5
    #[arg(long)]
    font_size: Option<i64>,

    /// Text color as RRGGBB
    #[arg(long)]
    font_color: Option<String>,

    /// Halo color as RRGGBB
    #[arg(long)]
    background_color: Option<String>,

    /// Output format: png, gif, jpg or jpeg
    #[arg(short, long)]
    format: Option<String>,

    /// Target quality, 1-100
    #[arg(short, long)]
    quality: Option<i64>,

    #[arg(long, allow_hyphen_values = true)]
    offset_x: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    offset_y: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    box_padding: Option<i32>,

    /// Box border thickness; 0 disables the box
    #[arg(long)]
    box_border_thickness: Option<i64>,

    #[arg(long)]
    box_border_color: Option<String>,

    #[arg(long)]
    box_background_color: Option<String>,

    /// Write the result to this file instead of stdout
    #[arg(short, long, conflicts_with = "temp_dir")]
    output: Option<PathBuf>,

    /// Write the result to a uniquely named file in this directory
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Prefix stdout output with Content-Type and Content-Length headers
    #[arg(long, conflicts_with_all = ["output", "temp_dir"])]
    emit_http: bool,
}

impl Args {
    fn overrides(&self) -> Result<LabelOptions> {
        let mut options = LabelOptions {
            text: self.text.clone(),
            position: self.position.clone().map(position_value),
            position_x: self.x,
            position_y: self.y,
            font_size: self.font_size,
            font_color: self.font_color.clone(),
            background_color: self.background_color.clone(),
            format: self.format.clone(),
            target_file_quality: self.quality,
            label_offset_x: self.offset_x,
            label_offset_y: self.offset_y,
            box_padding: self.box_padding,
            box_border_thickness: self.box_border_thickness,
            box_border_color: self.box_border_color.clone(),
            box_background_color: self.box_background_color.clone(),
            ..Default::default()
        };

        match self.input.as_deref() {
            Some(path) if path.as_os_str() == "-" => {
                let mut bytes = Vec::new();
                std::io::Read::read_to_end(&mut std::io::stdin().lock(), &mut bytes)
                    .context("Failed to read source image from stdin")?;
                options.file_content = Some(base64::engine::general_purpose::STANDARD.encode(bytes));
            }
            Some(path) => options.file_path = Some(path.to_path_buf()),
            None => {}
        }

        Ok(options)
    }

    fn sink(&self) -> OutputSink {
        match (&self.output, &self.temp_dir) {
            (Some(path), _) => OutputSink::File(path.clone()),
            (None, Some(dir)) => OutputSink::TempDir(dir.clone()),
            (None, None) => OutputSink::Memory,
        }
    }
}

fn position_value(value: String) -> PositionValue {
    match value.trim().parse::<i64>() {
        Ok(index) => PositionValue::Index(index),
        Err(_) => PositionValue::Name(value),
    }
}

fn run(args: &Args) -> Result<()> {
    let base = match &args.config {
        Some(path) => LabelOptions::from_file(path)
            .with_context(|| format!("Failed to load label options from {}", path.display()))?,
        None => LabelOptions::default(),
    };
    let options = base.merge(args.overrides()?);
    let config = configure(&options).context("Invalid label options")?;

    let sink = args.sink();
    let writes_stdout = sink == OutputSink::Memory;
    let result = Labeler::new(config).with_sink(sink).render()?;

    if writes_stdout {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if args.emit_http {
            result.write_http_response(&mut out)?;
        } else {
            out.write_all(result.bytes())?;
            out.flush()?;
        }
    } else if let Some(path) = result.path() {
        tracing::info!(path = %path.display(), "Labeled image written");
        println!("{}", path.display());
    }

    Ok(())
}

fn main() {
    if let Err(e) = image_labeler::logging::init_subscriber() {
        eprintln!("Failed to initialize logging subsystem: {}", e);
    }

    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!(error = %format!("{:#}", e), "Labeling failed");
        std::process::exit(1);
    }
}
