//! List every biome file of a world with its enabled status and type.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, warn};

use ewgpal::biomes::{base_name, find_biome_files, load_biome_file};
use ewgpal::config::parse_readable_dir;
use ewgpal::PaletteConfig;

#[derive(Parser, Debug)]
#[command(name = "list_biomes")]
#[command(about = "List the biome files of an EpicWorldGenerator world with status and type")]
#[command(arg_required_else_help = true)]
struct Args {
    /// The path to the world directory containing the EWG settings/ directory
    #[arg(short, long, value_parser = parse_readable_dir)]
    world_dir: PathBuf,
}

fn main() {
    let args = Args::parse();
    ewgpal::logging::init_logging(false);

    let config = PaletteConfig::new(args.world_dir);
    let files = match find_biome_files(&config.biomes_dir()) {
        Ok(files) => files,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    println!("{:<30} {:<8} {:<25}", "NAME", "STATUS", "TYPE");
    for path in &files {
        match load_biome_file(path) {
            Ok(Ok(loaded)) => {
                let status = if loaded.record.is_enabled() { "Enabled" } else { "Disabled" };
                println!("{:<30} {:<8} {:<25}", loaded.name, status, loaded.biome_type);
            }
            Ok(Err(diagnostic)) => {
                println!("{:<30} {:<8} {:<25}", base_name(path), "-", "(skipped)");
                warn!("{}", diagnostic);
            }
            Err(e) => error!("{}", e),
        }
    }
    println!();
    println!("{} biome files", files.len());
}
