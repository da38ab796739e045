//! Chunk, block, region and biome-layer tile coordinates.

use std::fmt;

/// Blocks along one horizontal edge of a chunk.
pub const CHUNK_WIDTH: i32 = 16;

/// A 16x16-block horizontal tile of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    /// The chunk containing block (0, 0).
    pub const ORIGIN: Self = Self { x: 0, z: 0 };

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// This chunk shifted by `(dx, dz)` chunks.
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// Manhattan distance in chunks.
    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    /// Euclidean distance in chunks.
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dz = f64::from(self.z) - f64::from(other.z);
        (dx * dx + dz * dz).sqrt()
    }

    /// Euclidean distance from the origin chunk.
    pub fn magnitude(self) -> f64 {
        self.distance(Self::ORIGIN)
    }

    /// The block at this chunk's north-west corner, at `y = 0`.
    pub const fn to_block(self) -> BlockPos {
        BlockPos::new(self.x * CHUNK_WIDTH, 0, self.z * CHUNK_WIDTH)
    }

    /// The block at the horizontal center of this chunk, at height `y`.
    pub const fn center(self, y: i32) -> BlockPos {
        BlockPos::new(
            self.x * CHUNK_WIDTH + CHUNK_WIDTH / 2,
            y,
            self.z * CHUNK_WIDTH + CHUNK_WIDTH / 2,
        )
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.z)
    }
}

/// A single block position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The same column, `dy` blocks higher.
    pub const fn above(self, dy: i32) -> Self {
        Self::new(self.x, self.y + dy, self.z)
    }

    /// The chunk containing this block.
    pub const fn chunk(self) -> ChunkPos {
        ChunkPos::new(self.x >> 4, self.z >> 4)
    }
}

/// Index of a landmark placement region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct RegionPos {
    pub x: i32,
    pub z: i32,
}

impl RegionPos {
    /// The region containing the origin chunk.
    pub const ORIGIN: Self = Self { x: 0, z: 0 };

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub const fn is_origin(self) -> bool {
        self.x == 0 && self.z == 0
    }
}

/// A cell on a coarse biome layer. Its block size depends on the layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TilePos {
    pub x: i32,
    pub z: i32,
}

impl TilePos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The `scale x scale` cells this tile covers on a layer `scale` times finer.
    pub fn subdivide(self, scale: i32) -> impl Iterator<Item = TilePos> {
        let (base_x, base_z) = (self.x * scale, self.z * scale);
        (0..scale).flat_map(move |dx| (0..scale).map(move |dz| TilePos::new(base_x + dx, base_z + dz)))
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.z)
    }
}

/// An inclusive rectangle of regions or tiles, iterated x-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionWindow {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl RegionWindow {
    pub const fn new(min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// A square window spanning `[min, max]` on both axes.
    pub const fn square(min: i32, max: i32) -> Self {
        Self::new(min, max, min, max)
    }

    /// Number of cells in the window.
    pub const fn len(&self) -> usize {
        ((self.max_x - self.min_x + 1) * (self.max_z - self.min_z + 1)) as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_z < self.min_z
    }

    /// All `(x, z)` pairs, x-major.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (self.min_x..=self.max_x).flat_map(move |x| (self.min_z..=self.max_z).map(move |z| (x, z)))
    }

    pub fn regions(self) -> impl Iterator<Item = RegionPos> {
        self.cells().map(|(x, z)| RegionPos::new(x, z))
    }

    pub fn tiles(self) -> impl Iterator<Item = TilePos> {
        self.cells().map(|(x, z)| TilePos::new(x, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_to_block_and_center() {
        let chunk = ChunkPos::new(-2, 3);
        assert_eq!(chunk.to_block(), BlockPos::new(-32, 0, 48));
        assert_eq!(chunk.center(40), BlockPos::new(-24, 40, 56));
        assert_eq!(chunk.center(40).chunk(), chunk);
    }

    #[test]
    fn test_distances() {
        let a = ChunkPos::new(3, 4);
        assert_eq!(a.manhattan(ChunkPos::ORIGIN), 7);
        assert!((a.magnitude() - 5.0).abs() < 1e-12);
        assert_eq!(ChunkPos::new(-3, 0).manhattan(ChunkPos::new(2, -1)), 6);
    }

    #[test]
    fn test_negative_block_maps_to_negative_chunk() {
        assert_eq!(BlockPos::new(-1, 0, -17).chunk(), ChunkPos::new(-1, -2));
    }

    #[test]
    fn test_window_sizes() {
        assert_eq!(RegionWindow::square(-1, 0).len(), 4);
        assert_eq!(RegionWindow::square(-2, 1).len(), 16);
        assert_eq!(RegionWindow::new(-2, 1, -2, 2).len(), 20);
        assert_eq!(RegionWindow::square(-2, 1).regions().count(), 16);
        assert!(RegionWindow::square(-2, 1).regions().any(RegionPos::is_origin));
    }

    #[test]
    fn test_window_iteration_order() {
        let cells: Vec<_> = RegionWindow::square(-1, 0).cells().collect();
        assert_eq!(cells, vec![(-1, -1), (-1, 0), (0, -1), (0, 0)]);
    }

    #[test]
    fn test_tile_subdivide() {
        let fine: Vec<_> = TilePos::new(-1, 2).subdivide(4).collect();
        assert_eq!(fine.len(), 16);
        assert_eq!(fine[0], TilePos::new(-4, 8));
        assert_eq!(fine[15], TilePos::new(-1, 11));
    }

    #[test]
    fn test_display() {
        assert_eq!(ChunkPos::new(-5, 7).to_string(), "-5,7");
        assert_eq!(TilePos::new(1, -1).to_string(), "1,-1");
    }
}
