use bit_set::BitSet;
use petgraph::graph::IndexType;
use rand::{Rng, SeedableRng, XorShiftRng};

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::grid::{CoordinateSmallVec, SquareGrid};
use crate::units::{ColumnLength, RowLength};

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A randomized depth first search carves the maze: the top of an explicit
/// stack is the current cell, and each step either carves a passage to a
/// uniformly chosen unvisited neighbour of the current cell (pushing it), or
/// backtracks off a dead end (popping it). Every cell is pushed and popped
/// exactly once, so the walk terminates after visiting all cells and the
/// carved passages form a spanning tree of the grid - a perfect maze.
///
/// The explicit stack keeps deep dead end runs on large grids off the call
/// stack.
pub fn recursive_backtracker<GridIndexType>(grid: &mut SquareGrid<GridIndexType>,
                                            rng: &mut XorShiftRng)
    where GridIndexType: IndexType
{
    let start = Cartesian2DCoordinate::new(0, 0);
    let mut visited = BitSet::with_capacity(grid.size());
    let mut frontier_stack = Vec::with_capacity(grid.size());

    visited.insert(0);
    grid.open_cell(start);
    frontier_stack.push(start);

    while let Some(&current) = frontier_stack.last() {

        let unvisited_neighbours = grid.neighbours(current)
            .iter()
            .cloned()
            .filter(|&coord| {
                let cell_index = grid.grid_coordinate_to_index(coord)
                    .expect("neighbours gave an invalid cell coordinate");
                !visited.contains(cell_index)
            })
            .collect::<CoordinateSmallVec>();

        if unvisited_neighbours.is_empty() {
            // Dead end, backtrack.
            frontier_stack.pop();
        } else {
            let next = unvisited_neighbours[rng.gen::<usize>() % unvisited_neighbours.len()];
            visited.insert(grid.grid_coordinate_to_index(next)
                .expect("unvisited neighbour has an invalid cell coordinate"));
            grid.link(current, next)
                .expect("carving a passage to an adjacent cell cannot fail");
            frontier_stack.push(next);
        }
    }
}

/// Generate a carved maze grid ready to hand to a `game::GameSession`.
///
/// With `Some(seed)` the same seed always carves the same maze; with `None`
/// the maze differs per call.
pub fn generate(width: RowLength, height: ColumnLength, seed: Option<u64>) -> Result<SquareGrid<u32>> {
    let mut grid = SquareGrid::<u32>::new(width, height)?;
    let mut rng = match seed {
        Some(s) => seeded_rng(s),
        None => rand::weak_rng(),
    };
    recursive_backtracker(&mut grid, &mut rng);
    Ok(grid)
}

/// A xorshift rng with its state derived from the given seed.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    let low = seed as u32;
    let high = (seed >> 32) as u32;
    // The constant words keep the xorshift state from ever being all zero.
    XorShiftRng::from_seed([low ^ 0x193a_6754, high ^ 0xa8a7_d469, 0x9736_30bb, 0x85eb_ca6b])
}

#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::cells::CellState;
    use crate::pathing::Distances;
    use crate::units::{ColumnLength, EdgesCount, NodesCount, RowLength};

    fn carved_grid(w: usize, h: usize, seed: u64) -> SquareGrid<u32> {
        generate(RowLength(w), ColumnLength(h), Some(seed)).expect("generation failed")
    }

    fn sorted_links(grid: &SquareGrid<u32>) -> Vec<(Cartesian2DCoordinate, Cartesian2DCoordinate)> {
        let mut links: Vec<_> = grid.iter_links().collect();
        links.sort();
        links
    }

    #[test]
    fn invalid_dimensions_fail_generation() {
        assert!(generate(RowLength(0), ColumnLength(3), None).is_err());
        assert!(generate(RowLength(3), ColumnLength(0), None).is_err());
    }

    #[test]
    fn single_cell_grid_is_immediately_carved() {
        let g = carved_grid(1, 1, 1);
        assert_eq!(g.size(), 1);
        assert!(g.is_open(0, 0));
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn two_cell_grid_has_one_passage() {
        let g = carved_grid(2, 1, 42);
        assert!(g.is_open(0, 0));
        assert!(g.is_open(1, 0));
        assert_eq!(g.links_count(), 1);
        assert!(g.is_linked(Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(1, 0)));
    }

    #[test]
    fn carving_opens_every_cell() {
        let g = carved_grid(8, 5, 7);
        for coord in g.iter() {
            assert_eq!(g.cell_state(coord), Some(CellState::Open));
        }
    }

    #[test]
    fn carved_maze_is_a_spanning_tree() {
        // Connected with cells-1 links == spanning tree (no room left for a cycle).
        for &(w, h) in &[(1, 1), (2, 1), (1, 9), (5, 5), (12, 3)] {
            let g = carved_grid(w, h, 99);
            assert_eq!(g.graph_size(), (NodesCount(w * h), EdgesCount(w * h - 1)));

            let distances = Distances::<u32>::new(&g, Cartesian2DCoordinate::new(0, 0))
                .expect("start coordinate is invalid");
            for coord in g.iter() {
                assert!(distances.distance_from_start_to(coord).is_some(),
                        "{:?} is not reachable from the start on a {}x{} maze",
                        coord,
                        w,
                        h);
            }
        }
    }

    #[test]
    fn same_seed_carves_identical_mazes() {
        let g1 = carved_grid(10, 10, 7);
        let g2 = carved_grid(10, 10, 7);
        assert_eq!(sorted_links(&g1), sorted_links(&g2));
        for coord in g1.iter() {
            assert_eq!(g1.is_open(coord.x, coord.y), g2.is_open(coord.x, coord.y));
        }
    }

    #[test]
    fn different_seeds_carve_different_mazes() {
        let g1 = carved_grid(10, 10, 11111);
        let g2 = carved_grid(10, 10, 22222);
        assert_ne!(sorted_links(&g1), sorted_links(&g2));
    }

    #[test]
    fn quickcheck_carved_mazes_are_connected_spanning_trees() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            if w == 0 || h == 0 || w > 16 || h > 16 {
                return TestResult::discard();
            }
            let (w, h) = (w as usize, h as usize);
            let g = generate(RowLength(w), ColumnLength(h), Some(seed))
                .expect("generation failed");

            if g.links_count() != w * h - 1 {
                return TestResult::failed();
            }
            let distances = Distances::<u32>::new(&g, Cartesian2DCoordinate::new(0, 0))
                .expect("start coordinate is invalid");
            let all_reachable =
                g.iter().all(|coord| distances.distance_from_start_to(coord).is_some());
            TestResult::from_bool(all_reachable)
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
