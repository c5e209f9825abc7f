use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, error};

use ewgpal::config::{parse_readable_dir, DEFAULT_FONT_SCALE, DEFAULT_OUTPUT};
use ewgpal::{export_palette, logging, PaletteConfig};

const EXAMPLES: &str = "\
Examples:
    ewgpal -w ~/servers/pve-dev/world
        Generate ewgpal.png in the current working directory using the biomes
        configured in the specified world directory.

    ewgpal -w ~/servers/pve-dev/world -o palette.png
        Save the palette as palette.png in the current directory. You can
        specify a full path to the output file if desired.";

#[derive(Parser, Debug)]
#[command(name = "ewgpal")]
#[command(about = "Generate a palette image of biomes for EpicWorldGenerator")]
#[command(after_help = EXAMPLES, arg_required_else_help = true)]
struct Args {
    /// The path to the world directory containing the EWG settings/ directory
    #[arg(short, long, value_parser = parse_readable_dir)]
    world_dir: PathBuf,

    /// The filename of the output palette image
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Open a viewer window to show the generated image
    #[arg(short, long)]
    view: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Leave disabled biomes out of the palette
    #[arg(long)]
    enabled_only: bool,

    /// Pixel scale of the 5x7 label font
    #[arg(long, default_value_t = DEFAULT_FONT_SCALE, value_parser = clap::value_parser!(u32).range(1..=8))]
    font_scale: u32,
}

impl From<Args> for PaletteConfig {
    fn from(args: Args) -> Self {
        Self {
            world_dir: args.world_dir,
            output: args.output,
            view: args.view,
            debug: args.debug,
            enabled_only: args.enabled_only,
            font_scale: args.font_scale,
        }
    }
}

fn main() {
    let args = Args::parse();
    logging::init_logging(args.debug);

    debug!("dir: {}", args.world_dir.display());
    debug!("output: {}", args.output.display());
    debug!("view: {}", args.view);

    let config = PaletteConfig::from(args);
    if let Err(e) = export_palette(&config) {
        error!("{}", e);
        std::process::exit(1);
    }
}
