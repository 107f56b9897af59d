mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "epsplit",
    version,
    about = "Split EPS illustrations into per-component, per-shape and per-quadrant documents"
)]
struct Cli {
    /// Log decisions per run and shape (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One document per palette component
    Components {
        /// Path to the source EPS file
        input_file: PathBuf,

        #[command(flatten)]
        palette: PaletteArgs,

        /// Name colors missing from the palette extra_1, extra_2, ... by frequency
        #[arg(long)]
        infer_extras: bool,

        #[command(flatten)]
        split: SplitArgs,
    },
    /// One document per shape, nested in a directory per component
    Shapes {
        /// Path to the source EPS file
        input_file: PathBuf,

        #[command(flatten)]
        palette: PaletteArgs,

        /// Name colors missing from the palette extra_1, extra_2, ... by frequency
        #[arg(long)]
        infer_extras: bool,

        #[command(flatten)]
        split: SplitArgs,
    },
    /// One document per canvas quadrant
    Quadrants {
        /// Path to the source EPS sheet
        input_file: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Move each quadrant's drawing to the origin
        #[arg(long)]
        translate: bool,

        #[command(flatten)]
        split: SplitArgs,
    },
    /// Report colors, shape counts and start positions of one or more files
    Analyze {
        /// Paths to EPS files
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Predefined layout for per-quadrant counts
        #[arg(long, value_name = "NAME", conflicts_with = "layout_file")]
        layout: Option<String>,

        /// Custom JSON layout file for per-quadrant counts
        #[arg(long, value_name = "FILE")]
        layout_file: Option<PathBuf>,

        /// Predefined palette used to name known colors
        #[arg(long, value_name = "NAME")]
        palette: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect palettes and layouts
    Presets {
        #[command(subcommand)]
        action: PresetsAction,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct PaletteArgs {
    /// Predefined palette: love, crown, balloon, ill, expressions
    #[arg(long, value_name = "NAME")]
    pub palette: Option<String>,

    /// Custom JSON palette file
    #[arg(long, value_name = "FILE")]
    pub palette_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct LayoutArgs {
    /// Predefined layout: first-set, second-set
    #[arg(long, value_name = "NAME", conflicts_with_all = ["layout_file", "mid_x"])]
    pub layout: Option<String>,

    /// Custom JSON layout file
    #[arg(long, value_name = "FILE", conflicts_with = "mid_x")]
    pub layout_file: Option<PathBuf>,

    /// Vertical midline (x of the left/right split)
    #[arg(long, requires = "mid_y")]
    pub mid_x: Option<f64>,

    /// Horizontal midline (y of the upper/lower split)
    #[arg(long, requires = "mid_x")]
    pub mid_y: Option<f64>,
}

#[derive(Args)]
pub struct SplitArgs {
    /// Name used in titles and file names (default: input file stem)
    #[arg(long, value_name = "NAME")]
    pub asset: Option<String>,

    /// Directory the documents are written under
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Report what would be written without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    pub output: String,
}

#[derive(Subcommand)]
enum PresetsAction {
    /// List predefined palettes and layouts
    List,
    /// Show the colors of a palette or the labels of a layout
    Explain {
        /// Preset name (e.g., "love" or "second-set")
        preset: String,
    },
    /// Print the JSON schema of palette and layout files
    Schema,
    /// Validate a custom palette or layout file
    Validate {
        /// Path to JSON file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Components {
            input_file,
            palette,
            infer_extras,
            split,
        } => commands::split::components(&input_file, &palette, infer_extras, &split),
        Commands::Shapes {
            input_file,
            palette,
            infer_extras,
            split,
        } => commands::split::shapes(&input_file, &palette, infer_extras, &split),
        Commands::Quadrants {
            input_file,
            layout,
            translate,
            split,
        } => commands::split::quadrants(&input_file, &layout, translate, &split),
        Commands::Analyze {
            input_files,
            layout,
            layout_file,
            palette,
            output,
        } => commands::analyze::run(
            &input_files,
            layout.as_deref(),
            layout_file.as_deref(),
            palette.as_deref(),
            &output,
        ),
        Commands::Presets { action } => match action {
            PresetsAction::List => commands::presets::list(),
            PresetsAction::Explain { preset } => commands::presets::explain(&preset),
            PresetsAction::Schema => commands::presets::schema(),
            PresetsAction::Validate { file } => commands::presets::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
