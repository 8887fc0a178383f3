#![warn(clippy::all, rust_2018_idioms)]

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};
use screenmark::{AnnotateApp, Editor, EditorConfig, EditorResult};

/// Annotate a screenshot with arrows, boxes, text and numbered stamps
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Image to annotate
    image: PathBuf,

    /// JSON file with editor settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where Ctrl+S writes the result (defaults to `<image>-annotated.png`)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn default_output(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screenshot".to_owned());
    image.with_file_name(format!("{stem}-annotated.png"))
}

fn open_editor(args: &Args) -> EditorResult<Editor> {
    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let image = image::open(&args.image)?.into_rgba8();
    info!("Opened {}", args.image.display());
    Editor::with_config(image, &config)
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let args = Args::parse();
    let output = args.output.clone().unwrap_or_else(|| default_output(&args.image));
    let editor = match open_editor(&args) {
        Ok(editor) => editor,
        Err(err) => {
            error!("{err}");
            eprintln!("screenmark: {err}");
            std::process::exit(1);
        }
    };

    let size = [
        (editor.width() as f32 + 200.0).min(1600.0),
        (editor.height() as f32 + 40.0).min(1000.0),
    ];
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "screenmark",
        native_options,
        Box::new(move |_cc| Ok(Box::new(AnnotateApp::new(editor, output)))),
    )
}
