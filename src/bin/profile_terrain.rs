//! Profiling tool to identify performance bottlenecks

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use genesis_terrain::{
    erosion::{self, ErosionParams},
    heightmap::TerrainConfig,
    mesh::TerrainMesh,
    rivers::{self, RiverParams},
    tensor_field::TensorField,
    terrain::Terrain,
};

fn main() {
    let config = TerrainConfig {
        width: 512,
        depth: 512,
        seed: 1337,
        ..TerrainConfig::default()
    };

    println!("=== Performance Profiling ===");
    println!(
        "Map size: {}x{} ({} cells)",
        config.width,
        config.depth,
        config.width * config.depth
    );
    println!();

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let start = Instant::now();
    let mut terrain = Terrain::generate(&config);
    let heightmap_time = start.elapsed();
    println!("Heightmap generation: {:?}", heightmap_time);

    let start = Instant::now();
    let mut field = TensorField::new(config.width, config.depth);
    field.generate(config.seed);
    let tensor_time = start.elapsed();
    println!("Tensor field: {:?}", tensor_time);

    let params = ErosionParams::default();
    println!("\nErosion parameters:");
    println!("  Droplets: {}", params.iterations);
    println!("  Max lifetime: {}", params.max_lifetime);
    println!();

    let start = Instant::now();
    let stats = erosion::execute(&mut terrain, &params, &mut rng);
    let erosion_time = start.elapsed();
    println!("Erosion: {:?}", erosion_time);
    println!("  Steps: {}", stats.steps_taken);
    println!("  Eroded: {:.2} units", stats.total_eroded);
    println!("  Deposited: {:.2} units", stats.total_deposited);

    let start = Instant::now();
    let river_stats = rivers::generate(&mut terrain, &RiverParams::default(), &mut rng);
    let river_time = start.elapsed();
    println!("Rivers: {:?}", river_time);
    println!("  Accepted: {} of {} attempts", river_stats.accepted, river_stats.attempts);

    let start = Instant::now();
    let mesh = TerrainMesh::build(&terrain);
    let mesh_time = start.elapsed();
    println!(
        "Mesh build: {:?} ({} vertices)",
        mesh_time,
        mesh.map_or(0, |m| m.vertex_count())
    );

    let total = heightmap_time + tensor_time + erosion_time + river_time + mesh_time;
    let pct = |d: std::time::Duration| 100.0 * d.as_secs_f64() / total.as_secs_f64();
    println!("\n=== Summary ===");
    println!("Heightmap:        {:>8.2}% ({:?})", pct(heightmap_time), heightmap_time);
    println!("Tensor field:     {:>8.2}% ({:?})", pct(tensor_time), tensor_time);
    println!("Erosion:          {:>8.2}% ({:?})", pct(erosion_time), erosion_time);
    println!("Rivers:           {:>8.2}% ({:?})", pct(river_time), river_time);
    println!("Mesh:             {:>8.2}% ({:?})", pct(mesh_time), mesh_time);
    println!("─────────────────────────────────");
    println!("TOTAL:            {:>8}  {:?}", "100%", total);
}
