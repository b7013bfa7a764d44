//! Spatial hashing for particle neighbor search.
//!
//! Pressure relaxation needs the particles within one interaction radius of
//! each other. A hashed uniform grid keeps that query O(1) per particle: each
//! cell is `cell_size` wide, cells map into a fixed-size table through a
//! prime-multiplier hash, and a query only visits the 3x3 cell neighborhood.

use glam::Vec2;

// Large primes for hash mixing.
const P1: u64 = 73856093;
const P2: u64 = 19349663;

/// Hashed uniform grid over particle positions.
///
/// The table is rebuilt every step; the per-cell vectors are reused between
/// rebuilds so the steady state does not allocate.
#[derive(Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    table: Vec<Vec<u32>>,
}

impl SpatialGrid {
    /// Create a grid with the given cell size (should be >= the interaction
    /// radius) and hash table size (prime for good distribution).
    pub fn new(cell_size: f32, table_size: usize) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            table: vec![Vec::new(); table_size],
        }
    }

    fn cell_of(&self, position: Vec2) -> (i32, i32) {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    fn hash_of(&self, cell: (i32, i32)) -> usize {
        let x = cell.0 as u32 as u64;
        let y = cell.1 as u32 as u64;
        ((x.wrapping_mul(P1) ^ y.wrapping_mul(P2)) % self.table.len() as u64) as usize
    }

    /// Rebuild the table from particle positions.
    pub fn build(&mut self, positions: &[Vec2]) {
        for cell in &mut self.table {
            cell.clear();
        }
        for (i, &pos) in positions.iter().enumerate() {
            let hash = self.hash_of(self.cell_of(pos));
            self.table[hash].push(i as u32);
        }
    }

    /// Visit every candidate neighbor index of `position`, including the
    /// particle itself if it was inserted. Candidates come from the 3x3 cell
    /// neighborhood; the caller filters by actual distance.
    pub fn for_each_candidate<F: FnMut(u32)>(&self, position: Vec2, mut visit: F) {
        let (cx, cy) = self.cell_of(position);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let hash = self.hash_of((cx + dx, cy + dy));
                for &i in &self.table[hash] {
                    visit(i);
                }
            }
        }
    }
}
