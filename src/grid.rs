use std::fmt;
use std::slice;

use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::{Graph, Undirected};
use smallvec::SmallVec;

use crate::cells::{offset_coordinate, Cartesian2DCoordinate, CellState, GridDirection,
                   COMPASS_PRIMARIES};
use crate::errors::{ErrorKind, Result};
use crate::units::{ColumnLength, ColumnsCount, EdgesCount, NodesCount, RowLength, RowsCount};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// A rectangular maze grid.
///
/// Each cell carries a two valued `Wall`/`Open` state. The carved passages
/// are undirected links in a graph whose node indices are the row major cell
/// indices, so a passage query is an edge lookup. The grid is generic over
/// the graph's index type, which lets small mazes use `u8`/`u16` node
/// indices.
pub struct SquareGrid<GridIndexType: IndexType> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    cell_states: Vec<CellState>,
    row_width: RowLength,
    column_height: ColumnLength,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
}

impl<GridIndexType: IndexType> fmt::Debug for SquareGrid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "SquareGrid :: width: {:?}, height: {:?}, links: {:?}",
               self.row_width,
               self.column_height,
               self.links_count())
    }
}

impl<GridIndexType: IndexType> SquareGrid<GridIndexType> {
    /// Create a fully walled grid with no passages carved.
    ///
    /// Fails with `InvalidDimension` if either dimension is zero and with
    /// `GridTooLarge` if `width * height` cells cannot be indexed by
    /// `GridIndexType`.
    pub fn new(row_width: RowLength,
               column_height: ColumnLength)
               -> Result<SquareGrid<GridIndexType>> {

        let RowLength(width) = row_width;
        let ColumnLength(height) = column_height;
        if width == 0 || height == 0 {
            return Err(ErrorKind::InvalidDimension(width, height).into());
        }

        let cells_count = width * height;
        let max_indexable = <GridIndexType as IndexType>::max().index();
        if cells_count > max_indexable {
            return Err(ErrorKind::GridTooLarge(cells_count, max_indexable).into());
        }

        // A perfect maze carves one link less than it has cells.
        let mut grid = SquareGrid {
            graph: Graph::with_capacity(cells_count, cells_count.saturating_sub(1)),
            cell_states: vec![CellState::Wall; cells_count],
            row_width,
            column_height,
        };
        for _ in 0..cells_count {
            let _ = grid.graph.add_node(());
        }

        Ok(grid)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.row_width.0 * self.column_height.0
    }

    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.column_height.0)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.row_width.0)
    }

    #[inline]
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.graph.node_count()), EdgesCount(self.graph.edge_count()))
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions.
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.row_width.0 && (coord.y as usize) < self.column_height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            let RowLength(width) = self.row_width;
            Some(coord.y as usize * width + coord.x as usize)
        } else {
            None
        }
    }

    /// The `Wall`/`Open` state of a cell, or None for an out of bounds coordinate.
    #[inline]
    pub fn cell_state(&self, coord: Cartesian2DCoordinate) -> Option<CellState> {
        self.grid_coordinate_to_index(coord)
            .map(|index| self.cell_states[index])
    }

    /// Is the cell at `(x, y)` carved open? Out of bounds coordinates are not open.
    #[inline]
    pub fn is_open(&self, x: u32, y: u32) -> bool {
        self.cell_state(Cartesian2DCoordinate::new(x, y)) == Some(CellState::Open)
    }

    /// Mark a single cell `Open` without carving a passage to it.
    ///
    /// Generation uses this for the starting cell, which has no already open
    /// neighbour to link from. Returns false if the coordinate is invalid.
    pub fn open_cell(&mut self, coord: Cartesian2DCoordinate) -> bool {
        if let Some(index) = self.grid_coordinate_to_index(coord) {
            self.cell_states[index] = CellState::Open;
            true
        } else {
            false
        }
    }

    /// Carve a passage between two cells: both cells become `Open` and an
    /// undirected link is recorded between them.
    ///
    /// Linking a cell to itself or to an invalid coordinate is rejected.
    /// Carving the same passage twice leaves a single link.
    pub fn link(&mut self,
                a: Cartesian2DCoordinate,
                b: Cartesian2DCoordinate)
                -> std::result::Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }

        match (self.grid_coordinate_graph_index(a), self.grid_coordinate_graph_index(b)) {
            (Some(a_index), Some(b_index)) => {
                self.open_cell(a);
                self.open_cell(b);
                let _ = self.graph.update_edge(a_index, b_index, ());
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Cell nodes that are linked to a particular node by a carved passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        self.grid_coordinate_graph_index(coord)
            .map(|graph_node_index| {
                self.graph
                    .neighbors(graph_node_index)
                    .map(|linked_node_index| {
                        Cartesian2DCoordinate::from_row_major_index(linked_node_index.index(),
                                                                    self.row_width)
                    })
                    .collect()
            })
    }

    /// Cell nodes that are to the North, South, East or West of a particular
    /// node, but not necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        COMPASS_PRIMARIES.iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: GridDirection)
                                  -> Option<Cartesian2DCoordinate> {
        offset_coordinate(coord, direction).and_then(|neighbour_coord| {
            if self.is_valid_coordinate(neighbour_coord) {
                Some(neighbour_coord)
            } else {
                None
            }
        })
    }

    /// Are two cells in the grid linked by a carved passage?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        if let (Some(a_index), Some(b_index)) =
            (self.grid_coordinate_graph_index(a), self.grid_coordinate_graph_index(b)) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_neighbour_linked(&self,
                               coord: Cartesian2DCoordinate,
                               direction: GridDirection)
                               -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false,
                    |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cells_count: self.size(),
            row_width: self.row_width,
        }
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::new(BatchIterType::Row, self.row_width, self.column_height)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::new(BatchIterType::Column, self.row_width, self.column_height)
    }

    pub fn iter_links(&self) -> LinksIter<GridIndexType> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            row_width: self.row_width,
        }
    }

    /// Convert a grid coordinate into a petgraph node index.
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: Cartesian2DCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        self.grid_coordinate_to_index(coord)
            .map(graph::NodeIndex::<GridIndexType>::new)
    }
}

impl<GridIndexType: IndexType> fmt::Display for SquareGrid<GridIndexType> {
    /// Render the grid as box ascii art, one `---`/`|` wall segment per
    /// uncarved cell side and a `#` body for cells still walled solid.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const CORNER: &str = "+";
        const WALL_SOUTH: &str = "---";
        const OPEN_SOUTH: &str = "   ";
        const WALL_EAST: &str = "|";
        const OPEN_EAST: &str = " ";

        let ColumnsCount(columns) = self.columns();

        let mut output = String::from(CORNER);
        for _ in 0..columns {
            output.push_str(WALL_SOUTH);
            output.push_str(CORNER);
        }
        output.push('\n');

        for row in self.iter_row() {
            let mut body_line = String::from(WALL_EAST);
            let mut south_line = String::from(CORNER);

            for coord in row {
                body_line.push_str(match self.cell_state(coord) {
                    Some(CellState::Open) => "   ",
                    _ => " # ",
                });
                body_line.push_str(if self.is_neighbour_linked(coord, GridDirection::East) {
                    OPEN_EAST
                } else {
                    WALL_EAST
                });

                south_line.push_str(if self.is_neighbour_linked(coord, GridDirection::South) {
                    OPEN_SOUTH
                } else {
                    WALL_SOUTH
                });
                south_line.push_str(CORNER);
            }

            output.push_str(&body_line);
            output.push('\n');
            output.push_str(&south_line);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cells_count: usize,
    row_width: RowLength,
}

impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.row_width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

// Converting a &SquareGrid into an iterator CellIter - the default most sensible.
impl<'a, GridIndexType: IndexType> IntoIterator for &'a SquareGrid<GridIndexType> {
    type Item = Cartesian2DCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    batches_count: usize,
    batch_length: usize,
}

impl BatchIter {
    fn new(iter_type: BatchIterType,
           row_width: RowLength,
           column_height: ColumnLength)
           -> BatchIter {
        let (batches_count, batch_length) = match iter_type {
            BatchIterType::Row => (column_height.0, row_width.0),
            BatchIterType::Column => (row_width.0, column_height.0),
        };
        BatchIter {
            iter_type,
            current_index: 0,
            batches_count,
            batch_length,
        }
    }
}

impl Iterator for BatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.batches_count {
            let coords = (0..self.batch_length)
                .map(|i| {
                    if let BatchIterType::Row = self.iter_type {
                        Cartesian2DCoordinate::new(i as u32, self.current_index as u32)
                    } else {
                        Cartesian2DCoordinate::new(self.current_index as u32, i as u32)
                    }
                })
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.batches_count - self.current_index;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for BatchIter {} // default impl using size_hint()

pub struct LinksIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    row_width: RowLength,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        self.graph_edge_iter.next().map(|edge| {
            let src = Cartesian2DCoordinate::from_row_major_index(edge.source().index(),
                                                                  self.row_width);
            let dst = Cartesian2DCoordinate::from_row_major_index(edge.target().index(),
                                                                  self.row_width);
            (src, dst)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {}
