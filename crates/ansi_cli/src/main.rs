use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use ansi_render::{
    AnsiRenderer, ImageKind, LayoutPolicy, RenderOptions, RenderOutput, StdoutTerminal,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render PNG or JPEG images as truecolor ANSI block text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the rendered image to stdout
    Preview(PreviewArgs),
    /// Render an image and write the escaped text to disk
    Convert(ConvertArgs),
    /// Render every PNG or JPEG under a directory to `.ans` files
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input image path
    input: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image path
    input: PathBuf,
    /// Output file path
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory searched recursively for images
    input: PathBuf,
    /// Output directory; mirrors the input tree, e.g. `a/b.png` -> `a/b.png.ans`
    #[arg(short, long)]
    out_dir: PathBuf,
    /// Target column width
    #[arg(long)]
    width: u32,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// Target column width; defaults to the width of the terminal
    #[arg(long)]
    width: Option<u32>,
    /// Never render wider than this many columns
    #[arg(long)]
    max_width: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => preview(args),
        Commands::Convert(args) => convert(args),
        Commands::Batch(args) => batch(args),
    }
}

fn preview(args: PreviewArgs) -> Result<()> {
    let renderer = AnsiRenderer::new(StdoutTerminal);
    let output = renderer
        .render_path(&args.input, &args.settings.to_options())
        .with_context(|| format!("failed to render {:?}", args.input))?;

    output.print().context("failed to write to stdout")?;
    Ok(())
}

fn convert(args: ConvertArgs) -> Result<()> {
    let renderer = AnsiRenderer::new(StdoutTerminal);
    let output = renderer
        .render_path(&args.input, &args.settings.to_options())
        .with_context(|| format!("failed to render {:?}", args.input))?;

    write_output(&args.output, &output)?;
    info!("wrote {} lines to {:?}", output.lines.len(), args.output);
    Ok(())
}

fn batch(args: BatchArgs) -> Result<()> {
    let renderer = AnsiRenderer::new(StdoutTerminal);
    let options = RenderOptions::with_width(args.width);
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let inputs = collect_images(&args.input)?;
    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images",
        )
        .context("invalid progress template")?
        .progress_chars("=> "),
    );

    for input in &inputs {
        let output = renderer
            .render_path(input, &options)
            .with_context(|| format!("failed to render {:?}", input))?;

        let target = output_path(&args.input, &args.out_dir, input)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory {:?}", parent))?;
        }
        write_output(&target, &output)?;
        progress.inc(1);
    }

    progress
        .finish_with_message(format!("Rendered {} images to {:?}", inputs.len(), args.out_dir));
    Ok(())
}

/// Target for `input` under `out_dir`, keeping its path relative to `root` and
/// its extension so `a.png`, `a.jpg` and `nested/a.png` stay distinct.
fn output_path(root: &Path, out_dir: &Path, input: &Path) -> Result<PathBuf> {
    let relative = match input.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative,
        _ => Path::new(
            input.file_name().with_context(|| format!("{:?} has no file name", input))?,
        ),
    };

    let mut name = relative.as_os_str().to_os_string();
    name.push(".ans");
    Ok(out_dir.join(name))
}

fn write_output(path: &Path, output: &RenderOutput) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    output.write_to(BufWriter::new(file)).with_context(|| format!("failed to write {:?}", path))
}

fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| match ImageKind::from_path(path) {
            Ok(_) => true,
            Err(err) => {
                debug!("skipping {}", err);
                false
            },
        })
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no PNG or JPEG files found in {:?}", dir);
    }
    Ok(entries)
}

impl RenderSettings {
    fn to_options(&self) -> RenderOptions {
        let mut options = RenderOptions::default();
        if let Some(width) = self.width {
            options.layout = LayoutPolicy::FixedColumns(width);
        }
        options.max_width = self.max_width;
        options
    }
}
