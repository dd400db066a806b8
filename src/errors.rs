//! Crate wide `Error`, `ErrorKind` and `Result` types.
//!
//! Other modules `use errors::*;` to get access to everything `error_chain!`
//! creates. Declined player moves are ordinary boolean outcomes and never
//! surface here.

use error_chain::*;

error_chain! {

    errors {
        /// A grid or generation call was given a zero width or height.
        InvalidDimension(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: width and height must be at least 1", width, height)
        }

        /// The requested cell count cannot be indexed by the grid's index type.
        GridTooLarge(cells: usize, max_indexable: usize) {
            description("grid too large for its index type")
            display("grid of {} cells exceeds the {} cells indexable by the grid index type", cells, max_indexable)
        }

        /// A direction token supplied by the host could not be recognised.
        InvalidDirection(token: String) {
            description("unrecognised direction")
            display("unrecognised direction {:?}: expected North, South, East or West", token)
        }
    }
}
