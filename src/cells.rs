use std::convert::From;
use std::str::FromStr;

use crate::errors::*;
use crate::units::RowLength;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_length: RowLength) -> Cartesian2DCoordinate {
        let RowLength(width) = row_length;
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// The two valued state of a grid cell.
///
/// Every cell starts as `Wall`; carving a passage to a cell makes it `Open`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Wall,
    Open,
}

/// One of the four compass directions a player or carver can head in.
///
/// The grid is indexed with `(0, 0)` at the top left, so `North` decreases
/// `y` and `West` decreases `x`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridDirection {
    North,
    South,
    East,
    West,
}

pub const COMPASS_PRIMARIES: [GridDirection; 4] = [GridDirection::North,
                                                   GridDirection::South,
                                                   GridDirection::East,
                                                   GridDirection::West];

/// Creates a new `Cartesian2DCoordinate` offset 1 cell away in the given direction.
/// Returns None if the Coordinate is not representable (would need a negative x or y).
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: GridDirection)
                         -> Option<Cartesian2DCoordinate> {

    let (x, y) = (coord.x, coord.y);
    match dir {
        GridDirection::North => {
            if y > 0 {
                Some(Cartesian2DCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        GridDirection::South => Some(Cartesian2DCoordinate { x, y: y + 1 }),
        GridDirection::East => Some(Cartesian2DCoordinate { x: x + 1, y }),
        GridDirection::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

impl FromStr for GridDirection {
    type Err = Error;

    /// Parse a direction token supplied by a host input layer.
    ///
    /// Accepts the compass names and their screen relative aliases
    /// ("Up"/"Down"/"Left"/"Right"), case insensitively. Anything else is an
    /// `InvalidDirection` error.
    fn from_str(token: &str) -> Result<GridDirection> {
        match token.to_lowercase().as_ref() {
            "north" | "up" => Ok(GridDirection::North),
            "south" | "down" => Ok(GridDirection::South),
            "east" | "right" => Ok(GridDirection::East),
            "west" | "left" => Ok(GridDirection::West),
            _ => Err(ErrorKind::InvalidDirection(String::from(token)).into()),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn row_major_index_to_coordinate() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let coords: Vec<Cartesian2DCoordinate> =
            (0..6).map(|i| Cartesian2DCoordinate::from_row_major_index(i, RowLength(3))).collect();
        assert_eq!(coords,
                   vec![gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1)]);
    }

    #[test]
    fn offsets_at_the_grid_origin() {
        let origin = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(offset_coordinate(origin, GridDirection::North), None);
        assert_eq!(offset_coordinate(origin, GridDirection::West), None);
        assert_eq!(offset_coordinate(origin, GridDirection::South),
                   Some(Cartesian2DCoordinate::new(0, 1)));
        assert_eq!(offset_coordinate(origin, GridDirection::East),
                   Some(Cartesian2DCoordinate::new(1, 0)));
    }

    #[test]
    fn offsets_are_unit_steps() {
        let c = Cartesian2DCoordinate::new(3, 3);
        assert_eq!(offset_coordinate(c, GridDirection::North),
                   Some(Cartesian2DCoordinate::new(3, 2)));
        assert_eq!(offset_coordinate(c, GridDirection::South),
                   Some(Cartesian2DCoordinate::new(3, 4)));
        assert_eq!(offset_coordinate(c, GridDirection::East),
                   Some(Cartesian2DCoordinate::new(4, 3)));
        assert_eq!(offset_coordinate(c, GridDirection::West),
                   Some(Cartesian2DCoordinate::new(2, 3)));
    }

    #[test]
    fn directions_parse_from_compass_and_screen_names() {
        assert_eq!("North".parse::<GridDirection>().unwrap(), GridDirection::North);
        assert_eq!("up".parse::<GridDirection>().unwrap(), GridDirection::North);
        assert_eq!("Down".parse::<GridDirection>().unwrap(), GridDirection::South);
        assert_eq!("LEFT".parse::<GridDirection>().unwrap(), GridDirection::West);
        assert_eq!("right".parse::<GridDirection>().unwrap(), GridDirection::East);
    }

    #[test]
    fn unrecognised_direction_tokens_are_errors() {
        let parsed = "Northwest".parse::<GridDirection>();
        match parsed {
            Err(Error(ErrorKind::InvalidDirection(ref token), _)) => {
                assert_eq!(token, "Northwest")
            }
            other => panic!("expected an InvalidDirection error, got {:?}", other),
        }
    }
}
