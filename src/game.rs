//! The game session layer: one carved maze, one player.
//!
//! A session owns its grid and validates every requested player move against
//! the carved passages, counting only the moves that are accepted. Reaching
//! the goal cell in the bottom right corner ends the session; the `Won`
//! state is terminal and later move requests are ignored without touching
//! any state.
//!
//! Hosts driving a session on a timer tick hold `&mut GameSession`, so
//! overlapping `move_player` calls on one session cannot compile.

use petgraph::graph::IndexType;

use crate::cells::{Cartesian2DCoordinate, GridDirection};
use crate::grid::SquareGrid;
use crate::units::{ColumnLength, RowLength};

/// Session progress: still walking, or standing on the goal cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GameState {
    Playing,
    Won,
}

/// What a single `move_player` request did.
///
/// A declined move (into a wall, an uncarved passage or off the grid) is a
/// normal outcome, not an error, so it is reported here rather than through
/// a `Result`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MoveOutcome {
    pub accepted: bool,
    pub won: bool,
}

/// A single player walking one carved maze from the top left towards the
/// goal in the bottom right.
#[derive(Debug)]
pub struct GameSession<GridIndexType: IndexType> {
    grid: SquareGrid<GridIndexType>,
    player: Cartesian2DCoordinate,
    goal: Cartesian2DCoordinate,
    moves: usize,
    state: GameState,
}

impl<GridIndexType: IndexType> GameSession<GridIndexType> {
    /// Start a session on a carved grid, with the player at `(0, 0)` and the
    /// goal at `(width-1, height-1)`.
    ///
    /// The session takes ownership of the grid and never mutates it, only
    /// the player state. On a single cell grid the player starts on the goal
    /// and the session is already `Won`.
    pub fn new(grid: SquareGrid<GridIndexType>) -> GameSession<GridIndexType> {
        let RowLength(width) = grid.row_length();
        let ColumnLength(height) = grid.column_length();
        let player = Cartesian2DCoordinate::new(0, 0);
        let goal = Cartesian2DCoordinate::new(width as u32 - 1, height as u32 - 1);
        let state = if player == goal {
            GameState::Won
        } else {
            GameState::Playing
        };

        GameSession {
            grid,
            player,
            goal,
            moves: 0,
            state,
        }
    }

    /// Try to move the player one cell in the given direction.
    ///
    /// The move is declined, without counting it, when the target cell is
    /// off the grid, still a wall, or not linked to the player's cell by a
    /// carved passage. An accepted move onto the goal cell wins the session.
    /// Once won, further calls are no-ops reporting `accepted: false`.
    pub fn move_player(&mut self, direction: GridDirection) -> MoveOutcome {
        if self.state == GameState::Won {
            return MoveOutcome {
                accepted: false,
                won: true,
            };
        }

        let target = match self.grid.neighbour_at_direction(self.player, direction) {
            Some(coord) => coord,
            None => {
                return MoveOutcome {
                    accepted: false,
                    won: false,
                }
            }
        };
        if !self.grid.is_open(target.x, target.y) || !self.grid.is_linked(self.player, target) {
            return MoveOutcome {
                accepted: false,
                won: false,
            };
        }

        self.player = target;
        self.moves += 1;
        if self.player == self.goal {
            self.state = GameState::Won;
        }

        MoveOutcome {
            accepted: true,
            won: self.state == GameState::Won,
        }
    }

    #[inline]
    pub fn current_cell(&self) -> Cartesian2DCoordinate {
        self.player
    }

    #[inline]
    pub fn goal(&self) -> Cartesian2DCoordinate {
        self.goal
    }

    /// Count of accepted moves so far. Declined moves are not counted.
    #[inline]
    pub fn move_count(&self) -> usize {
        self.moves
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.state == GameState::Won
    }

    #[inline]
    pub fn grid(&self) -> &SquareGrid<GridIndexType> {
        &self.grid
    }
}
