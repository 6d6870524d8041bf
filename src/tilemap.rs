/// A 2D row-major grid of `width × depth` cells. Edges do not wrap.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub depth: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            width,
            depth,
            data: vec![T::default(); width * depth],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, depth: usize, value: T) -> Self {
        Self {
            width,
            depth,
            data: vec![value; width * depth],
        }
    }

    /// Build a grid from existing row-major data.
    /// Returns `None` if the data length does not match `width * depth`.
    pub fn from_vec(width: usize, depth: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != width * depth {
            return None;
        }
        Some(Self { width, depth, data })
    }

    fn index(&self, x: usize, z: usize) -> usize {
        debug_assert!(x < self.width && z < self.depth);
        z * self.width + x
    }

    pub fn get(&self, x: usize, z: usize) -> &T {
        &self.data[self.index(x, z)]
    }

    pub fn get_mut(&mut self, x: usize, z: usize) -> &mut T {
        let idx = self.index(x, z);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, z: usize, value: T) {
        let idx = self.index(x, z);
        self.data[idx] = value;
    }

    /// Whether a signed coordinate falls inside the grid.
    pub fn in_bounds(&self, x: i64, z: i64) -> bool {
        x >= 0 && z >= 0 && (x as usize) < self.width && (z as usize) < self.depth
    }

    /// Bounds-checked access with signed coordinates.
    pub fn get_checked(&self, x: i64, z: i64) -> Option<&T> {
        if self.in_bounds(x, z) {
            Some(self.get(x as usize, z as usize))
        } else {
            None
        }
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn same_size<U>(&self, other: &Tilemap<U>) -> bool {
        self.width == other.width && self.depth == other.depth
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// 8-connected neighbors that lie inside the grid, scanned row by row
    /// (`dz` outer, `dx` inner).
    pub fn neighbors_8(&self, x: usize, z: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(8);

        for dz in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let nz = z as i64 + dz;
                if self.in_bounds(nx, nz) {
                    result.push((nx as usize, nz as usize));
                }
            }
        }

        result
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            (idx % width, idx / width, val)
        })
    }
}

impl Tilemap<f32> {
    /// Minimum and maximum value, or `None` on an empty grid.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        if self.data.is_empty() {
            return None;
        }
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &v in &self.data {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let mut map = Tilemap::new_with(3, 2, 0u8);
        map.set(2, 1, 7);
        assert_eq!(map.as_slice()[5], 7);
        assert_eq!(*map.get(2, 1), 7);
    }

    #[test]
    fn test_checked_access_outside_grid() {
        let map = Tilemap::new_with(4, 4, 1.0f32);
        assert!(map.get_checked(-1, 0).is_none());
        assert!(map.get_checked(0, 4).is_none());
        assert!(map.get_checked(4, 0).is_none());
        assert_eq!(map.get_checked(3, 3), Some(&1.0));
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        let map: Tilemap<f32> = Tilemap::new(5, 5);
        assert_eq!(map.neighbors_8(0, 0).len(), 3);
        assert_eq!(map.neighbors_8(4, 2).len(), 5);
        assert_eq!(map.neighbors_8(2, 2).len(), 8);
        // Scan order is row first, then column
        assert_eq!(map.neighbors_8(2, 2)[0], (1, 1));
        assert_eq!(map.neighbors_8(2, 2)[7], (3, 3));
    }

    #[test]
    fn test_from_vec_rejects_bad_length() {
        assert!(Tilemap::from_vec(2, 2, vec![0.0f32; 3]).is_none());
        assert!(Tilemap::from_vec(2, 2, vec![0.0f32; 4]).is_some());
    }
}
