//! Route finding over carved mazes.
//!
//! `Distances` is a breadth first flood fill from a start cell following
//! carved passages only; on a perfect maze every cell distance is also the
//! unique route length. `shortest_path` walks the flood fill data backwards
//! from an end cell.

use std::fmt::Debug;
use std::ops::Add;

use itertools::Itertools;
use num::traits::{Bounded, One, Unsigned, Zero};
use petgraph::graph::IndexType;
use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::SquareGrid;
use crate::utils;
use crate::utils::FnvHashMap;

/// Trait (hack) used purely as a generic type parameter alias because it
/// looks ugly to type this out each time.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Ord {
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Ord> MaxDistance for T {}

#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    /// Flood fill the grid with distances from `start_coordinate`, walking
    /// carved passages only. Cells without a route from the start get no
    /// distance. Returns None if the start coordinate is not on the grid.
    pub fn new<GridIndexType>(grid: &SquareGrid<GridIndexType>,
                              start_coordinate: Cartesian2DCoordinate)
                              -> Option<Distances<MaxDistanceT>>
        where GridIndexType: IndexType
    {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        // Every step costs one, so a cell's distance is final the first time
        // the frontier reaches it - the map doubles as the visited set.
        let mut max = Zero::zero();
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, Zero::zero());

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = *distances.entry(*cell_coord)
                    .or_insert_with(Bounded::max_value);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord)
                    .expect("frontier cell has an invalid coordinate");
                for link_coordinate in &*links {

                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + One::one());
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// Route length from the start to this cell, or None if the cell is
    /// unreachable or off the grid.
    #[inline]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// The reachable cells furthest away from the start.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let mut furthest = SmallVec::<[Cartesian2DCoordinate; 8]>::new();
        let furthest_distance = self.max();

        for (coord, distance) in &self.distances {
            if *distance == furthest_distance {
                furthest.push(*coord);
            }
        }
        furthest
    }
}

/// The route from the start cell of the flood fill data to `end_point`,
/// inclusive of both ends, or None if there is no route.
pub fn shortest_path<GridIndexType, MaxDistanceT>(grid: &SquareGrid<GridIndexType>,
                                                  distances_from_start: &Distances<MaxDistanceT>,
                                                  end_point: Cartesian2DCoordinate)
                                                  -> Option<Vec<Cartesian2DCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    if distances_from_start.distance_from_start_to(end_point).is_none() {
        // The end point is not reachable from the start.
        return None;
    }

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance = distances_from_start.distance_from_start_to(current_coord)
            .expect("path cell has no flood fill distance");

        let linked_neighbours = grid.links(current_coord)
            .expect("path cell has an invalid coordinate");
        let closest_to_start = linked_neighbours.iter()
            .map(|&coord| {
                (coord,
                 distances_from_start.distance_from_start_to(coord)
                     .expect("cell linked to a reachable cell has no flood fill distance"))
            })
            .fold1(|closest, candidate| {
                if candidate.1 < closest.1 {
                    candidate
                } else {
                    closest
                }
            });

        if let Some((closer_coord, closer_distance)) = closest_to_start {

            if closer_distance >= current_distance {
                // We are not getting any closer to the start, so there is no route.
                return None;
            }
            current_coord = closer_coord;
            path.push(current_coord);

        } else {
            // There are no linked neighbours - this input data is broken.
            return None;
        }
    }

    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators;
    use crate::units::{ColumnLength, RowLength};

    type SmallGrid = SquareGrid<u8>;
    type SmallDistances = Distances<u8>;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    static OUT_OF_GRID_COORDINATE: Cartesian2DCoordinate = Cartesian2DCoordinate {
        x: ::std::u32::MAX,
        y: ::std::u32::MAX,
    };

    /// A 3x1 grid carved as a single corridor.
    fn corridor_grid() -> SmallGrid {
        let mut g = SmallGrid::new(RowLength(3), ColumnLength(1)).expect("grid rejected");
        g.link(gc(0, 0), gc(1, 0)).expect("link failed");
        g.link(gc(1, 0), gc(2, 0)).expect("link failed");
        g
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let g = SmallGrid::new(RowLength(3), ColumnLength(3)).expect("grid rejected");
        let distances = SmallDistances::new(&g, OUT_OF_GRID_COORDINATE);
        assert!(distances.is_none());
    }

    #[test]
    fn start() {
        let g = SmallGrid::new(RowLength(3), ColumnLength(3)).expect("grid rejected");
        let start_coordinate = gc(1, 1);
        let distances = SmallDistances::new(&g, start_coordinate).unwrap();
        assert_eq!(start_coordinate, distances.start());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        // No passages carved at all: only the start is reachable.
        let g = SmallGrid::new(RowLength(3), ColumnLength(3)).expect("grid rejected");
        let start_coordinate = gc(0, 0);
        let distances = SmallDistances::new(&g, start_coordinate).unwrap();

        for coord in g.iter() {
            let d = distances.distance_from_start_to(coord);
            if coord != start_coordinate {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
    }

    #[test]
    fn distance_to_invalid_coordinate_is_none() {
        let g = SmallGrid::new(RowLength(3), ColumnLength(3)).expect("grid rejected");
        let distances = SmallDistances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
    }

    #[test]
    fn distances_along_a_corridor() {
        let g = corridor_grid();
        let distances = SmallDistances::new(&g, gc(0, 0)).unwrap();

        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(2, 0)), Some(2));
        assert_eq!(distances.max(), 2);
    }

    #[test]
    fn furthest_point_of_a_corridor_is_its_far_end() {
        let g = corridor_grid();
        let distances = SmallDistances::new(&g, gc(0, 0)).unwrap();
        let furthest = distances.furthest_points_on_grid();
        assert_eq!(&*furthest, &[gc(2, 0)]);
    }

    #[test]
    fn shortest_path_walks_the_corridor() {
        let g = corridor_grid();
        let distances = SmallDistances::new(&g, gc(0, 0)).unwrap();
        let path = shortest_path(&g, &distances, gc(2, 0));
        assert_eq!(path, Some(vec![gc(0, 0), gc(1, 0), gc(2, 0)]));
    }

    #[test]
    fn no_shortest_path_to_an_unreachable_cell() {
        let g = SmallGrid::new(RowLength(3), ColumnLength(3)).expect("grid rejected");
        let distances = SmallDistances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(shortest_path(&g, &distances, gc(2, 2)), None);
    }

    #[test]
    fn shortest_path_on_a_generated_maze_matches_the_flood_fill() {
        let g = generators::generate(RowLength(8), ColumnLength(8), Some(3))
            .expect("generation failed");
        let start = gc(0, 0);
        let goal = gc(7, 7);
        let distances = Distances::<u32>::new(&g, start).unwrap();

        let path = shortest_path(&g, &distances, goal).expect("goal is unreachable");
        assert_eq!(*path.first().unwrap(), start);
        assert_eq!(*path.last().unwrap(), goal);

        let goal_distance = distances.distance_from_start_to(goal).unwrap() as usize;
        assert_eq!(path.len(), goal_distance + 1);

        for pair in path.windows(2) {
            assert!(g.is_linked(pair[0], pair[1]),
                    "path step {:?} -> {:?} has no carved passage",
                    pair[0],
                    pair[1]);
        }
    }
}
