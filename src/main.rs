//! colcrate command line
//!
//! - `colcrate simplify <input>` rewrites a collision file next to itself
//! - `colcrate inspect <file>` summarises a rewritten file per area and type

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colcrate::io::{CollisionMap, KeyPresence};
use colcrate::simplification::EditorScene;
use colcrate::{CollisionProcessor, GroupFailurePolicy, ProcessorConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "colcrate")]
#[command(about = "Simplify the triangle runs of collision files", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simplify every triangle group and write `<input><suffix>`
    Simplify {
        input: PathBuf,

        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Suffix appended to the input path for the output file
        #[arg(long)]
        suffix: Option<String>,

        /// Weld tolerance in model units
        #[arg(long)]
        weld_distance: Option<f64>,

        /// Angular tolerance in degrees for edge split and dissolve
        #[arg(long)]
        angle: Option<f64>,

        /// Reject runs that mix lines with and without key tokens
        #[arg(long)]
        strict_keys: bool,

        /// Leave out groups that fail to simplify instead of copying them
        #[arg(long)]
        drop_failed: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show triangle counts of a rewritten file
    Inspect {
        file: PathBuf,

        /// Print the full collision map as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Simplify {
            input,
            config,
            suffix,
            weld_distance,
            angle,
            strict_keys,
            drop_failed,
            json,
        } => {
            let mut settings = match &config {
                Some(path) => ProcessorConfig::load(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => ProcessorConfig::default(),
            };
            if let Some(suffix) = suffix {
                settings = settings.with_output_suffix(suffix);
            }
            if let Some(distance) = weld_distance {
                settings.params = settings.params.with_weld_distance(distance);
            }
            if let Some(degrees) = angle {
                settings.params = settings
                    .params
                    .with_edge_split_angle(degrees.to_radians())
                    .with_dissolve_angle(degrees.to_radians());
            }
            if strict_keys {
                settings = settings.with_key_presence(KeyPresence::Strict);
            }
            if drop_failed {
                settings = settings.with_failure_policy(GroupFailurePolicy::Drop);
            }

            let mut processor = CollisionProcessor::new(EditorScene::new(), settings);
            let (output, report) = processor
                .process_file(&input)
                .with_context(|| format!("failed to process {}", input.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}: {}", output.display(), report);
            }
        }
        Commands::Inspect { file, json } => {
            let map = CollisionMap::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&map)?);
                return Ok(());
            }

            println!("{} areas, {} triangles", map.areas.len(), map.triangle_count());
            for area in &map.areas {
                println!(
                    "AREA {} {}: {} vertices, {} triangles",
                    area.level_id,
                    area.area_id,
                    area.vertices.len(),
                    area.triangles.len()
                );
                for (collision_type, count) in area.type_histogram() {
                    println!("  COLLISIONTYPE {collision_type}: {count}");
                }
            }
        }
    }

    Ok(())
}
