//! Helpers for driving a [`Game`] from tests and scripted demos.
//!
//! Everything here works through the public drag API with pointer
//! coordinates derived from the game's own [`Layout`](crate::Layout), so a
//! scripted run exercises the same code paths as real input.

use jiglace_core::{Board, Position, Tile};

use crate::{DropOutcome, Game, SessionError};

/// The board cell currently holding `tile`, if it is on the board.
#[must_use]
pub fn tile_position(board: &Board, tile: Tile) -> Option<Position> {
    board
        .occupied()
        .find_map(|(position, t)| (t == tile).then_some(position))
}

/// The first cell (row-major) whose tile is not in its home cell.
#[must_use]
pub fn first_misplaced(board: &Board) -> Option<Position> {
    board
        .occupied()
        .find_map(|(position, tile)| (tile.home_position(board.size()) != position).then_some(position))
}

/// Drags the group under `from` and releases it over `to`, using cell
/// centers as pointer coordinates.
///
/// # Errors
///
/// Propagates any [`SessionError`] from the drag lifecycle.
pub fn drag_board_to(
    game: &mut Game,
    from: Position,
    to: Position,
) -> Result<DropOutcome, SessionError> {
    let start = game.layout().cell_center(from);
    game.begin_board_drag(from, start)?;
    let end = game.layout().cell_center(to);
    game.drag_move(end)?;
    game.release()
}

/// Repeatedly drags misplaced board tiles to their home cells until every
/// board tile is home, returning the number of drops performed.
///
/// Tiles parked in the tray are not touched; with an empty tray this solves
/// the puzzle outright. Each drop sends a whole group home, so the count of
/// home tiles strictly increases and the loop terminates.
///
/// # Errors
///
/// Propagates any [`SessionError`] from the drag lifecycle.
pub fn send_board_tiles_home(game: &mut Game) -> Result<usize, SessionError> {
    let mut drops = 0;
    while let Some(from) = first_misplaced(game.board()) {
        let Some(tile) = game.board().tile_at(from) else {
            break;
        };
        let home = tile.home_position(game.board().size());
        drag_board_to(game, from, home)?;
        drops += 1;
    }
    Ok(drops)
}
