//! Progressive world loading.
//!
//! The initial active region is generated one row of chunks at a time so the
//! host can report progress (and yield to the browser) between rows.

use log::info;

use super::{coords::ChunkCoord, world::World};

/// Progress reported after each generated row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadProgress {
    /// Rows generated so far.
    pub rows_done: usize,
    /// Rows in the whole region.
    pub rows_total: usize,
}

impl LoadProgress {
    /// Completed fraction in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.rows_total == 0 {
            1.0
        } else {
            self.rows_done as f32 / self.rows_total as f32
        }
    }

    /// Whether every row has been generated.
    pub fn is_complete(&self) -> bool {
        self.rows_done >= self.rows_total
    }
}

/// Generates the square region of side `2 * render_distance + 1` around a
/// center chunk, yielding once per row in increasing Z.
///
/// # Examples
///
/// ```
/// use voxel_world::engine_state::voxels::{coords::ChunkCoord, loader::WorldLoader, world::World};
///
/// let mut world = World::with_seed(7);
/// let last = WorldLoader::new(&mut world, ChunkCoord::new(0, 0), 1).last().unwrap();
/// assert!(last.is_complete());
/// assert_eq!(world.len(), 9);
/// ```
pub struct WorldLoader<'a> {
    world: &'a mut World,
    center: ChunkCoord,
    render_distance: i32,
    next_row: usize,
}

impl<'a> WorldLoader<'a> {
    /// Prepares to load the region around `center`. Nothing is generated until iterated.
    pub fn new(world: &'a mut World, center: ChunkCoord, render_distance: i32) -> Self {
        WorldLoader {
            world,
            center,
            render_distance: render_distance.max(0),
            next_row: 0,
        }
    }

    /// Skips the first `rows` rows, for resuming a load begun by an earlier loader.
    pub fn starting_at_row(mut self, rows: usize) -> Self {
        self.next_row = rows;
        self
    }

    /// Number of rows (and chunks per row) in the region.
    pub fn rows_total(&self) -> usize {
        (2 * self.render_distance + 1) as usize
    }
}

impl Iterator for WorldLoader<'_> {
    type Item = LoadProgress;

    fn next(&mut self) -> Option<Self::Item> {
        let rows_total = self.rows_total();
        if self.next_row >= rows_total {
            return None;
        }

        let dz = self.next_row as i32 - self.render_distance;
        for dx in -self.render_distance..=self.render_distance {
            self.world.add_chunk_at(self.center.offset(dx, dz));
        }
        self.next_row += 1;

        let progress = LoadProgress {
            rows_done: self.next_row,
            rows_total,
        };
        if progress.is_complete() {
            info!("World loaded: {} chunks", self.world.len());
        }
        Some(progress)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows_total().saturating_sub(self.next_row);
        (remaining, Some(remaining))
    }
}
