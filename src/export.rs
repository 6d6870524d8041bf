use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::mesh::surface_color;
use crate::terrain::Terrain;

/// Export a top-down preview using the same colors as the mesh.
pub fn export_preview(terrain: &Terrain, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
    preview_image(terrain).save(path)
}

pub fn preview_image(terrain: &Terrain) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(terrain.width() as u32, terrain.depth() as u32);
    let heights = terrain.heights();
    let rivers = terrain.river_map();

    for (x, z, &h) in heights.iter() {
        let [r, g, b, _] = surface_color(h, terrain.sea_level(), *rivers.get(x, z));
        img.put_pixel(x as u32, z as u32, Rgb([r, g, b]));
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::TerrainConfig;
    use crate::mesh::{RIVER_COLOR, SEA_COLOR};
    use crate::rivers::trace_river;
    use crate::tilemap::Tilemap;

    #[test]
    fn test_preview_marks_rivers_and_sea() {
        let mut heights = Tilemap::new_with(10, 10, 0.0f32);
        for z in 0..10 {
            for x in 0..10 {
                heights.set(x, z, 1.0 - (x + z) as f32 / 18.0);
            }
        }
        let mut terrain = Terrain::from_heights(TerrainConfig::default(), heights);
        let report = trace_river(&mut terrain, (0, 0), 2);
        assert!(report.accepted);

        let img = preview_image(&terrain);
        assert_eq!(img.dimensions(), (10, 10));
        let river = img.get_pixel(0, 0);
        assert_eq!(river.0, [RIVER_COLOR[0], RIVER_COLOR[1], RIVER_COLOR[2]]);
        // The trace stops at (8, 8), leaving the far corner as open sea
        assert_eq!(img.get_pixel(9, 9).0, [SEA_COLOR[0], SEA_COLOR[1], SEA_COLOR[2]]);
    }
}
