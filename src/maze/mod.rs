//! Static maze layout and derived world geometry.
//!
//! The maze is a fixed, compiled-in table of occupied grid cells rather than
//! anything generated at runtime. This module owns that table and everything
//! derived from it: deduplicated wall cells, their world positions and
//! collision footprints, the goal position, and the torch placement rule.

use crate::game::collision::Footprint;
use crate::math::vec::Vec3;
use std::collections::HashSet;

/// World-space spacing between adjacent grid cells.
pub const CELL_WORLD_SIZE: f32 = 2.0;

/// Half-width of a wall cell's collision footprint. Adjacent footprints are
/// edge-touching by construction (half-width is half the cell spacing).
pub const WALL_HALF_WIDTH: f32 = 1.0;

/// World position of the goal chest.
pub const GOAL_POSITION: [f32; 3] = [34.0, 0.0, -10.0];

/// Height of a torch base above the floor of its wall cell.
const TORCH_BASE_HEIGHT: f32 = 0.3;

/// Raw wall layout as (gx, gz) grid coordinates.
///
/// The table contains a handful of duplicate border entries; they are kept
/// because torch placement indexes into this table as-is. [`MazeGrid`]
/// deduplicates for collision and drawing.
#[rustfmt::skip]
const LAYOUT_TABLE: [(i32, i32); 246] = [
    (0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0), (7, 0), (8, 0), (9, 0), (10, 0),
    (11, 0), (12, 0), (13, 0), (14, 0), (15, 0), (16, 0), (17, 0), (18, 0), (19, 0), (20, 0),
    (10, 1), (14, 1), (2, 2), (3, 2), (4, 2), (5, 2), (6, 2), (7, 2), (8, 2), (10, 2), (12, 2),
    (13, 2), (14, 2), (16, 2), (17, 2), (18, 2), (2, 3), (4, 3), (8, 3), (16, 3), (2, 4), (4, 4),
    (6, 4), (7, 4), (8, 4), (9, 4), (10, 4), (11, 4), (12, 4), (13, 4), (14, 4), (16, 4), (18, 4),
    (19, 4), (4, 5), (8, 5), (16, 5), (18, 5), (1, 6), (2, 6), (3, 6), (4, 6), (6, 6), (8, 6),
    (9, 6), (10, 6), (12, 6), (14, 6), (15, 6), (16, 6), (17, 6), (18, 6), (4, 7), (6, 7),
    (12, 7), (18, 7), (2, 8), (3, 8), (4, 8), (5, 8), (6, 8), (7, 8), (8, 8), (9, 8), (10, 8),
    (12, 8), (14, 8), (15, 8), (16, 8), (17, 8), (18, 8), (2, 9), (8, 9), (12, 9), (2, 10),
    (4, 10), (6, 10), (7, 10), (8, 10), (10, 10), (11, 10), (12, 10), (13, 10), (14, 10), (15, 10),
    (16, 10), (17, 10), (18, 10), (19, 10), (4, 11), (14, 11), (16, 11), (2, 12), (3, 12),
    (4, 12), (6, 12), (7, 12), (8, 12), (10, 12), (11, 12), (12, 12), (14, 12), (16, 12), (17, 12),
    (18, 12), (2, 13), (4, 13), (8, 13), (12, 13), (1, 14), (2, 14), (4, 14), (5, 14), (6, 14),
    (7, 14), (8, 14), (9, 14), (10, 14), (11, 14), (12, 14), (13, 14), (14, 14), (15, 14),
    (16, 14), (18, 14), (19, 14), (4, 15), (8, 15), (2, 16), (3, 16), (4, 16), (6, 16), (7, 16),
    (8, 16), (9, 16), (10, 16), (11, 16), (12, 16), (14, 16), (15, 16), (16, 16), (18, 16),
    (19, 16), (10, 17), (16, 17), (2, 18), (3, 18), (4, 18), (5, 18), (6, 18), (7, 18), (8, 18),
    (10, 18), (12, 18), (13, 18), (14, 18), (16, 18), (17, 18), (18, 18), (19, 18), (8, 19),
    (12, 19), (0, 20), (0, 0), (20, 0), (1, 20), (0, 1), (20, 1), (2, 20), (0, 2), (20, 2),
    (3, 20), (0, 3), (20, 3), (4, 20), (0, 4), (20, 4), (5, 20), (0, 5), (20, 5), (6, 20),
    (0, 6), (20, 6), (7, 20), (0, 7), (20, 7), (8, 20), (0, 8), (20, 8), (9, 20), (0, 9), (20, 9),
    (10, 20), (0, 10), (20, 10), (11, 20), (0, 11), (20, 11), (12, 20), (0, 12), (20, 12),
    (13, 20), (0, 13), (20, 13), (14, 20), (0, 14), (20, 14), (15, 20), (0, 15), (20, 15),
    (16, 20), (0, 16), (20, 16), (17, 20), (0, 17), (20, 17), (18, 20), (0, 18), (20, 18),
    (19, 20), (0, 19), (20, 19), (20, 20), (0, 20), (20, 20),
];

/// One occupied cell in the maze grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Grid x coordinate.
    pub gx: i32,
    /// Grid z coordinate. Positive gz extends into world -z.
    pub gz: i32,
}

impl Cell {
    /// Creates a new Cell with the given grid coordinates.
    pub fn new(gx: i32, gz: i32) -> Self {
        Self { gx, gz }
    }

    /// World position of this cell's wall cube center.
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(
            CELL_WORLD_SIZE * self.gx as f32,
            0.0,
            -CELL_WORLD_SIZE * self.gz as f32,
        )
    }

    /// Collision footprint on the ground plane. The plane flips z back, so
    /// the footprint is centered at (2·gx, 2·gz).
    pub fn footprint(&self) -> Footprint {
        Footprint::square(
            [
                CELL_WORLD_SIZE * self.gx as f32,
                CELL_WORLD_SIZE * self.gz as f32,
            ],
            WALL_HALF_WIDTH,
        )
    }
}

/// The deduplicated wall grid, built once from [`LAYOUT_TABLE`].
pub struct MazeGrid {
    cells: Vec<Cell>,
}

impl MazeGrid {
    /// Builds the grid from the layout table, dropping duplicate entries in
    /// first-occurrence order.
    pub fn from_table() -> Self {
        let mut seen = HashSet::new();
        let mut cells = Vec::with_capacity(LAYOUT_TABLE.len());
        for &(gx, gz) in LAYOUT_TABLE.iter() {
            let cell = Cell::new(gx, gz);
            if seen.insert(cell) {
                cells.push(cell);
            }
        }
        Self { cells }
    }

    /// All wall cells in table order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Collision footprints, one per wall cell, in table order.
    pub fn footprints(&self) -> Vec<Footprint> {
        self.cells.iter().map(Cell::footprint).collect()
    }
}

lazy_static::lazy_static! {
    /// Shared immutable wall grid.
    pub static ref MAZE_GRID: MazeGrid = MazeGrid::from_table();
}

/// World positions of torch bases.
///
/// Every third raw table entry hosts a torch one unit toward +x from its
/// wall center. Torches along the gz = 0 and gx = 20 borders are culled.
pub fn torch_positions() -> Vec<[f32; 3]> {
    let mut positions = Vec::new();
    for (i, &(gx, gz)) in LAYOUT_TABLE.iter().enumerate() {
        if i % 3 != 0 || gz == 0 || gx == 20 {
            continue;
        }
        let center = Cell::new(gx, gz).world_position();
        positions.push([center.x() + 1.0, TORCH_BASE_HEIGHT, center.z()]);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that deduplication keeps exactly the unique cells.
    #[test]
    fn test_grid_deduplicates_layout_table() {
        let grid = MazeGrid::from_table();
        assert_eq!(LAYOUT_TABLE.len(), 246);
        assert_eq!(grid.cells().len(), 242);

        // The four duplicated corner entries appear once each.
        for corner in [(0, 0), (20, 0), (0, 20), (20, 20)] {
            let count = grid
                .cells()
                .iter()
                .filter(|c| (c.gx, c.gz) == corner)
                .count();
            assert_eq!(count, 1, "corner {:?} duplicated", corner);
        }
    }

    /// Tests the footprint corner positions of a wall cell.
    #[test]
    fn test_cell_footprint_corners() {
        let footprint = Cell::new(3, 5).footprint();
        let expected = [[7.0, 9.0], [7.0, 11.0], [5.0, 11.0], [5.0, 9.0]];
        assert_eq!(footprint.corners(), &expected);
    }

    /// Tests that cells land at the expected world positions.
    #[test]
    fn test_cell_world_position_flips_z() {
        let position = Cell::new(10, 1).world_position();
        assert_eq!(
            <[f32; 3]>::from(position),
            [20.0, 0.0, -2.0],
            "grid z should extend into world -z"
        );
    }

    /// Tests that the goal cell is open corridor, not a wall.
    #[test]
    fn test_goal_cell_is_open() {
        let grid = MazeGrid::from_table();
        assert!(
            !grid.cells().contains(&Cell::new(17, 5)),
            "goal cell must not be a wall"
        );
    }

    /// Tests the torch placement rule against the raw table.
    #[test]
    fn test_torch_placement() {
        let torches = torch_positions();
        assert_eq!(torches.len(), 74);
        assert_eq!(torches[0], [21.0, 0.3, -2.0]);

        for torch in &torches {
            assert!(torch[0] > 0.0 && torch[0] < 40.0);
            assert!(torch[2] < 0.0, "no torches on the gz = 0 border");
        }
    }

    /// Tests that footprints come out ordered, one per cell.
    #[test]
    fn test_footprints_match_cells() {
        let grid = MazeGrid::from_table();
        let footprints = grid.footprints();
        assert_eq!(footprints.len(), grid.cells().len());

        let first = grid.cells()[0].footprint();
        assert_eq!(footprints[0].corners(), first.corners());
    }
}
