//! BlockForm command-line front end.
//!
//! Works on project files with a headless canvas:
//! - `new` writes an empty project
//! - `add` places a widget and sets its properties
//! - `info` lists the placed widgets
//! - `export` generates a Python script or a `.ui` document
//! - `types` lists the widget catalog

use anyhow::{Context, Result, bail};
use blockform_core::export::{self, ExportFormat, ExportOptions};
use blockform_core::storage::PROJECT_EXTENSION;
use blockform_core::{Canvas, CanvasConfig, HeadlessFacade, PropertyOutcome, PropertyValue, catalog};
use clap::{Parser, Subcommand, ValueEnum};
use kurbo::Point;
use std::fs;
use std::path::{Path, PathBuf};

/// Visual GUI designer, headless edition
#[derive(Parser, Debug)]
#[command(name = "blockform")]
#[command(about = "Edit and export BlockForm projects")]
#[command(version)]
struct Args {
    /// Canvas configuration (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty project file (`.bform` is added when the name has no extension)
    New {
        project: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Place a widget in a project
    Add {
        project: PathBuf,

        /// Widget type tag, e.g. `button` or `text-field`
        widget_type: String,

        #[arg(short, default_value = "0")]
        x: f64,

        #[arg(short, default_value = "0")]
        y: f64,

        /// Property assignment `name=value`; values are read as JSON when
        /// possible and as plain text otherwise
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },

    /// List the widgets of a project
    Info { project: PathBuf },

    /// Generate code from a project
    Export {
        project: PathBuf,

        #[arg(short, long, value_enum, default_value = "script")]
        format: Format,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Window title of the generated UI
        #[arg(long, default_value = "BlockForm")]
        title: String,
    },

    /// List the available widget types
    Types,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Script,
    Markup,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Script => ExportFormat::Script,
            Format::Markup => ExportFormat::Markup,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::New { project, force } => new_project(&project, force, config),
        Command::Add {
            project,
            widget_type,
            x,
            y,
            set,
        } => add_widget(&project, &widget_type, Point::new(x, y), &set, config),
        Command::Info { project } => info(&project, config),
        Command::Export {
            project,
            format,
            output,
            title,
        } => export_project(&project, format.into(), output.as_deref(), title, config),
        Command::Types => {
            for descriptor in catalog::all() {
                let (w, h) = descriptor.default_size;
                println!(
                    "{:<14} {:<14} {}x{}  {}",
                    descriptor.tag(),
                    descriptor.class_name(),
                    w,
                    h,
                    descriptor.kind.description()
                );
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CanvasConfig> {
    let Some(path) = path else {
        return Ok(CanvasConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = CanvasConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn open(project: &Path, config: CanvasConfig) -> Result<Canvas<HeadlessFacade>> {
    let mut canvas = Canvas::with_config(HeadlessFacade::new(), config)?;
    canvas
        .load_file(project)
        .with_context(|| format!("Failed to open {}", project.display()))?;
    Ok(canvas)
}

/// `project` with the project file extension when it has none.
fn with_project_extension(project: &Path) -> PathBuf {
    if project.extension().is_some() {
        project.to_path_buf()
    } else {
        project.with_extension(PROJECT_EXTENSION)
    }
}

fn new_project(project: &Path, force: bool, config: CanvasConfig) -> Result<()> {
    let project = with_project_extension(project);
    let project = project.as_path();
    if project.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", project.display());
    }
    let canvas = Canvas::with_config(HeadlessFacade::new(), config)?;
    canvas
        .save_file(project)
        .with_context(|| format!("Failed to write {}", project.display()))?;
    println!("Created {}", project.display());
    Ok(())
}

fn add_widget(
    project: &Path,
    widget_type: &str,
    position: Point,
    assignments: &[String],
    config: CanvasConfig,
) -> Result<()> {
    if catalog::describe(widget_type).is_none() {
        bail!("Unknown widget type '{}' (see `blockform types`)", widget_type);
    }
    let mut canvas = open(project, config)?;
    let id = canvas.create_widget(widget_type, position);

    for assignment in assignments {
        let (name, raw) = assignment
            .split_once('=')
            .with_context(|| format!("Expected NAME=VALUE, got '{}'", assignment))?;
        let value = parse_value(raw);
        let outcome = canvas
            .apply_property(id, name, value)
            .with_context(|| format!("Cannot set '{}'", name))?;
        if let PropertyOutcome::Failed(reason) = outcome {
            log::warn!("Setting '{}' failed: {}", name, reason);
        }
    }

    canvas
        .save_file(project)
        .with_context(|| format!("Failed to write {}", project.display()))?;
    if let Some(widget) = canvas.get(id) {
        let rect = widget.geometry();
        println!(
            "Added {} at ({}, {}) {}x{}",
            widget.type_tag, rect.x, rect.y, rect.width, rect.height
        );
    }
    Ok(())
}

fn parse_value(raw: &str) -> PropertyValue {
    serde_json::from_str(raw).unwrap_or_else(|_| PropertyValue::String(raw.to_string()))
}

fn info(project: &Path, config: CanvasConfig) -> Result<()> {
    let canvas = open(project, config)?;
    println!("{}: {} widget(s)", project.display(), canvas.len());
    for (index, widget) in canvas.widgets().enumerate() {
        let rect = widget.geometry();
        println!(
            "{:>3}. {:<14} ({}, {}) {}x{}  {}",
            index + 1,
            widget.type_tag,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            widget.object_name().unwrap_or("-")
        );
    }
    Ok(())
}

fn export_project(
    project: &Path,
    format: ExportFormat,
    output: Option<&Path>,
    title: String,
    config: CanvasConfig,
) -> Result<()> {
    let size = config.canvas_size;
    let canvas = open(project, config)?;
    let options = ExportOptions {
        window_title: title,
        width: size.width.round().max(1.0) as u32,
        height: size.height.round().max(1.0) as u32,
    };
    let text = export::export(format, canvas.widgets(), &options);

    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Exported {} widgets to {}", canvas.len(), path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
