use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use genesis_terrain::config::GenesisConfig;
use genesis_terrain::erosion::ErosionPreset;
use genesis_terrain::export;
use genesis_terrain::world::World;

#[derive(Parser, Debug)]
#[command(name = "genesis_terrain")]
#[command(about = "Generate procedural terrain with erosion and rivers")]
struct Args {
    /// Grid cells along x
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Grid cells along z
    #[arg(short = 'D', long)]
    depth: Option<usize>,

    /// Terrain seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Noise scale (higher = smoother terrain)
    #[arg(long)]
    noise_scale: Option<f32>,

    /// Sea level in normalized height
    #[arg(long)]
    sea_level: Option<f32>,

    /// Vertical scale of the mesh
    #[arg(long)]
    height_multiplier: Option<f32>,

    /// Load settings from a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the final settings to a JSON config file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Run hydraulic erosion after generation
    #[arg(long)]
    erode: bool,

    /// Erosion preset: light, normal or heavy (replaces configured erosion settings)
    #[arg(long)]
    erosion_preset: Option<ErosionPreset>,

    /// Erosion droplet count (overrides config and preset)
    #[arg(long)]
    iterations: Option<usize>,

    /// Trace rivers after generation (and erosion, which they discard)
    #[arg(long)]
    rivers: bool,

    /// Derive erosion and river seeds from the terrain seed
    #[arg(long)]
    reproducible: bool,

    /// Export a top-down PNG preview
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GenesisConfig::load(path)?,
        None => GenesisConfig::default(),
    };
    if let Some(width) = args.width {
        config.terrain.width = width;
    }
    if let Some(depth) = args.depth {
        config.terrain.depth = depth;
    }
    if let Some(seed) = args.seed {
        config.terrain.seed = seed;
    }
    if let Some(noise_scale) = args.noise_scale {
        config.terrain.noise_scale = noise_scale;
    }
    if let Some(sea_level) = args.sea_level {
        config.terrain.sea_level = sea_level;
    }
    if let Some(height_multiplier) = args.height_multiplier {
        config.terrain.height_multiplier = height_multiplier;
    }
    if let Some(preset) = args.erosion_preset {
        tracing::info!(%preset, "erosion preset: {}", preset.description());
        config.apply_erosion_preset(preset);
    }
    if let Some(iterations) = args.iterations {
        config.erosion.iterations = iterations;
    }
    config.validate()?;

    let mut world = World::new(config);
    if args.reproducible {
        world.pin_seeds();
    }
    tracing::info!("{}", world.seeds());

    let terrain = world.generate_terrain();
    if let Some((min_h, max_h)) = terrain.heights().min_max() {
        tracing::info!(min = min_h, max = max_h, "height range");
    }

    if args.erode {
        let stats = world.run_erosion();
        println!(
            "Erosion: {} droplets, eroded {:.2}, deposited {:.2}",
            stats.droplets, stats.total_eroded, stats.total_deposited
        );
    }

    if args.rivers {
        let stats = world.generate_rivers();
        println!(
            "Rivers: {} of {} accepted ({} attempts, {} reached the sea, {} cells)",
            stats.accepted,
            world.config().rivers.river_count,
            stats.attempts,
            stats.reached_sea,
            stats.river_cells
        );
    }

    let tensor_seed = world.seeds().tensor;
    world.generate_tensor_field(tensor_seed);

    if let Some(mesh) = world.mesh() {
        println!("Mesh: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
    }

    if let Some(path) = &args.export {
        if let Some(terrain) = world.terrain() {
            export::export_preview(terrain, path)?;
            println!("Preview written to {}", path.display());
        }
    }

    if let Some(path) = &args.save_config {
        world.config().save(path)?;
        println!("Config written to {}", path.display());
    }

    Ok(())
}
