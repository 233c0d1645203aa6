//! Lodge CLI - Command-line front end for the terrain builder

mod commands;
mod obj;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{build, edit, import, info, watch};

#[derive(Parser)]
#[command(name = "lodge")]
#[command(about = "Build and edit heightmap terrain meshes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a heightmap image into a height field resource
    Import {
        /// Heightmap image (red channel is used); defaults to the configured
        /// heightmap, or a flat plane when none is set
        image: Option<String>,

        /// Output height field path
        #[arg(short, long, default_value = "terrain.field.toml")]
        output: String,

        /// Terrain config file
        #[arg(long, default_value = "terrain.toml")]
        config: String,

        /// Override the configured height scale
        #[arg(long)]
        height_scale: Option<f32>,

        /// Keep raw heights instead of shifting the lowest point to zero
        #[arg(long)]
        raw: bool,
    },

    /// Build mesh and collision from a height field and report on them
    Build {
        /// Height field resource
        field: String,

        /// Terrain config file
        #[arg(long, default_value = "terrain.toml")]
        config: String,

        /// Export the mesh as Wavefront OBJ
        #[arg(long)]
        obj: Option<String>,

        /// Probe the collision surface height at x,z
        #[arg(long, value_parser = parse_vec2)]
        probe: Option<[f32; 2]>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Move one vertex of a height field
    Edit {
        /// Height field resource (rewritten in place)
        field: String,

        /// Row-major vertex index
        #[arg(long)]
        index: usize,

        /// New position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        position: [f32; 3],

        /// Also export the patched mesh as Wavefront OBJ
        #[arg(long)]
        obj: Option<String>,
    },

    /// Show height field information
    Info {
        /// Height field resource
        field: String,
    },

    /// Rebuild the terrain every time a heightmap image changes
    Watch {
        /// Heightmap image to watch
        image: String,

        /// Terrain config file
        #[arg(long, default_value = "terrain.toml")]
        config: String,

        /// Rewrite this OBJ after every rebuild
        #[arg(long)]
        obj: Option<String>,
    },
}

fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    let z: f32 = parts[2].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, y, z])
}

fn parse_vec2(s: &str) -> Result<[f32; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let z: f32 = parts[1].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, z])
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            image,
            output,
            config,
            height_scale,
            raw,
        } => import::run(import::ImportArgs {
            image,
            output,
            config,
            height_scale,
            raw,
        }),
        Commands::Build {
            field,
            config,
            obj,
            probe,
            format,
        } => build::run(build::BuildArgs {
            field,
            config,
            obj,
            probe,
            format,
        }),
        Commands::Edit {
            field,
            index,
            position,
            obj,
        } => edit::run(&field, index, position, obj.as_deref()),
        Commands::Info { field } => info::run(&field),
        Commands::Watch { image, config, obj } => watch::run(&image, &config, obj.as_deref()),
    }
}
