//! 2D axis-aligned collision detection for maze movement validation.
//!
//! # Overview
//!
//! Movement in the maze is validated on the ground plane only. Every wall
//! cell, the goal region, and the player each project to an axis-aligned
//! square footprint, and a proposed move is legal exactly when the player's
//! footprint at the new position overlaps no wall footprint. Overlap with the
//! goal footprint is not a block; it ends the game instead.
//!
//! # Core Components
//!
//! * [`Footprint`] - Axis-aligned 2D box described by its four corners
//! * [`overlap_1d`] / [`overlaps`] - Interval and box overlap predicates
//! * [`CollisionChecker`] - Holds the wall and goal footprints and answers
//!   blocked/goal queries for a proposed player footprint
//!
//! # How the System Works
//!
//! 1. Wall footprints are derived once from the maze table at construction
//! 2. Each input event produces a candidate player footprint
//! 3. The candidate is tested against every wall footprint, short-circuiting
//!    on the first hit
//! 4. If no wall blocks it, the goal footprint is tested to detect a win
//!
//! The player's footprint stays axis-aligned even though the player's facing
//! rotates freely. Corridor clearances assume this, so a rotated-box test
//! would change which moves are legal.

/// Axis-aligned 2D box on the ground plane, stored as its four corners.
///
/// The plane maps world (x, z) to (x, -z), so footprints of objects deeper
/// into the maze (more negative world z) have larger plane z. Corners are
/// generated in a fixed order from a center and half-width; only the
/// per-axis min/max matter for overlap tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    corners: [[f32; 2]; 4],
}

impl Footprint {
    /// Creates the square footprint centered at `center` extending
    /// `half_width` along both plane axes.
    pub fn square(center: [f32; 2], half_width: f32) -> Self {
        let b = half_width;
        let offsets = [[b, -b], [b, b], [-b, b], [-b, -b]];
        let corners = offsets.map(|[dx, dz]| [center[0] + dx, center[1] + dz]);
        Self { corners }
    }

    /// The four corner points.
    pub fn corners(&self) -> &[[f32; 2]; 4] {
        &self.corners
    }

    /// Minimum and maximum of the corners along one plane axis.
    fn extent(&self, axis: usize) -> (f32, f32) {
        let mut min = self.corners[0][axis];
        let mut max = min;
        for corner in &self.corners[1..] {
            min = min.min(corner[axis]);
            max = max.max(corner[axis]);
        }
        (min, max)
    }
}

/// Tests whether two closed 1D intervals overlap.
///
/// Touching endpoints count as overlap: `(0, 1)` and `(1, 2)` overlap. Both
/// arguments are (min, max) pairs.
pub fn overlap_1d(a: (f32, f32), b: (f32, f32)) -> bool {
    let (min1, max1) = a;
    let (min2, max2) = b;
    max1 >= min2 && max2 >= min1
}

/// Tests whether two footprints overlap.
///
/// This is the separating-axis test restricted to axis-aligned boxes: the
/// footprints overlap exactly when their projections onto both plane axes
/// overlap.
pub fn overlaps(a: &Footprint, b: &Footprint) -> bool {
    overlap_1d(a.extent(0), b.extent(0)) && overlap_1d(a.extent(1), b.extent(1))
}

/// Answers blocked/goal queries against the fixed maze geometry.
///
/// Purely functional over data fixed at construction; holds no mutable
/// state. Wall footprints keep the maze table's order, though order is
/// irrelevant to the existence tests below.
pub struct CollisionChecker {
    walls: Vec<Footprint>,
    goal: Footprint,
}

impl CollisionChecker {
    /// Creates a checker over the given wall footprints and goal footprint.
    pub fn new(walls: Vec<Footprint>, goal: Footprint) -> Self {
        Self { walls, goal }
    }

    /// Returns true if the player footprint overlaps any wall footprint.
    ///
    /// Short-circuits on the first overlapping wall.
    pub fn is_blocked(&self, player: &Footprint) -> bool {
        self.walls.iter().any(|wall| overlaps(wall, player))
    }

    /// Returns true if the player footprint overlaps the goal footprint.
    pub fn reaches_goal(&self, player: &Footprint) -> bool {
        overlaps(player, &self.goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Brute-force overlap check by sampling points on a fine grid.
    fn intervals_share_a_point(a: (f32, f32), b: (f32, f32)) -> bool {
        let step = 0.25;
        let mut x = a.0;
        while x <= a.1 + 1e-9 {
            if x >= b.0 && x <= b.1 {
                return true;
            }
            x += step;
        }
        false
    }

    /// Tests overlap_1d against brute-force point sampling over a grid of
    /// interval endpoints.
    #[test]
    fn test_overlap_1d_matches_brute_force() {
        let endpoints: Vec<f32> = (-6..=6).map(|i| i as f32 * 0.25).collect();
        for &a0 in &endpoints {
            for &a1 in &endpoints {
                if a1 < a0 {
                    continue;
                }
                for &b0 in &endpoints {
                    for &b1 in &endpoints {
                        if b1 < b0 {
                            continue;
                        }
                        let expected = intervals_share_a_point((a0, a1), (b0, b1));
                        assert_eq!(
                            overlap_1d((a0, a1), (b0, b1)),
                            expected,
                            "intervals ({}, {}) and ({}, {})",
                            a0,
                            a1,
                            b0,
                            b1
                        );
                    }
                }
            }
        }
    }

    /// Tests that touching endpoints count as overlap.
    #[test]
    fn test_overlap_1d_inclusive_at_endpoints() {
        assert!(overlap_1d((0.0, 1.0), (1.0, 2.0)));
        assert!(overlap_1d((1.0, 2.0), (0.0, 1.0)));
        assert!(!overlap_1d((0.0, 1.0), (1.0001, 2.0)));
    }

    /// Tests 2D overlap for separated, edge-touching, and corner-touching
    /// squares.
    #[test]
    fn test_overlaps_squares() {
        let base = Footprint::square([0.0, 0.0], 1.0);

        // Fully separated on x.
        assert!(!overlaps(&base, &Footprint::square([3.0, 0.0], 1.0)));
        // Sharing an edge.
        assert!(overlaps(&base, &Footprint::square([2.0, 0.0], 1.0)));
        // Sharing only a corner still touches on both axes.
        assert!(overlaps(&base, &Footprint::square([2.0, 2.0], 1.0)));
        // Overlap on x alone is not enough.
        assert!(!overlaps(&base, &Footprint::square([0.5, 3.0], 1.0)));
    }

    /// Tests blocked and goal queries against a small wall set.
    #[test]
    fn test_checker_blocked_and_goal() {
        let walls = vec![
            Footprint::square([2.0, 0.0], 1.0),
            Footprint::square([4.0, 0.0], 1.0),
        ];
        let goal = Footprint::square([10.0, 0.0], 1.0);
        let checker = CollisionChecker::new(walls, goal);

        let inside_wall = Footprint::square([2.0, 0.0], 0.15);
        let in_corridor = Footprint::square([2.0, 4.0], 0.15);
        let at_goal = Footprint::square([9.0, 0.0], 0.15);

        assert!(checker.is_blocked(&inside_wall));
        assert!(!checker.is_blocked(&in_corridor));
        assert!(checker.reaches_goal(&at_goal));
        assert!(!checker.reaches_goal(&in_corridor));
    }
}
